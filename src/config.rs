//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Scholastic Forum"
//! tagline = "Discover Educational Institutions"
//! base_url = "https://hvstechzw.github.io/Scholastic-Schools-Catalog"
//! support_email = "support@scholasticforum.org"
//!
//! [database]
//! path = "school_manager.db"
//!
//! [home]
//! featured_count = 12       # Preview cards on the homepage
//!
//! [sitemap]
//! # lastmod = "2025-01-01"  # Fixed <lastmod> for every entry
//!
//! [processing]
//! # max_processes = 4       # Detail page workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Branding and public URL of the published directory.
    pub site: SiteSection,
    /// Where the school records live.
    pub database: DatabaseConfig,
    /// Homepage layout.
    pub home: HomeConfig,
    /// Sitemap settings.
    pub sitemap: SitemapConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        let base = self.site.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database.path must not be empty".into(),
            ));
        }
        if self.home.featured_count == 0 {
            return Err(ConfigError::Validation(
                "home.featured_count must be at least 1".into(),
            ));
        }
        if let Some(lastmod) = &self.sitemap.lastmod {
            if NaiveDate::parse_from_str(lastmod, "%Y-%m-%d").is_err() {
                return Err(ConfigError::Validation(format!(
                    "sitemap.lastmod must be YYYY-MM-DD, got {lastmod:?}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Site name shown in headers, titles and footers.
    pub title: String,
    /// Short line under the homepage heading.
    pub tagline: String,
    /// Public root URL. Used for canonical links, the sitemap and the
    /// external image URLs in `schools_data.json`.
    pub base_url: String,
    /// Address behind the "Report Issue" footer link.
    pub support_email: String,
}

impl SiteSection {
    /// `base_url` without a trailing slash.
    pub fn root_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Absolute URL for a site-relative path such as `schools/all.html`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.root_url(), path.trim_start_matches('/'))
    }
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Scholastic Forum".to_string(),
            tagline: "Discover Educational Institutions".to_string(),
            base_url: "https://hvstechzw.github.io/Scholastic-Schools-Catalog".to_string(),
            support_email: "support@scholasticforum.org".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the SQLite database holding the `schools` table. A relative
    /// path is taken relative to the directory of `config.toml`.
    pub path: String,
}

impl DatabaseConfig {
    /// The database location for a config loaded from `config_path`.
    pub fn resolve(&self, config_path: &Path) -> PathBuf {
        let path = Path::new(&self.path);
        match config_path.parent() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "school_manager.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Number of preview cards on the homepage, taken in name order.
    pub featured_count: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { featured_count: 12 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Fixed `<lastmod>` value (`YYYY-MM-DD`). Omitted from entries when unset.
    pub lastmod: Option<String>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel detail page workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given `config.toml` path.
///
/// A missing file yields the stock defaults. A file that exists but holds
/// invalid TOML, unknown keys or out-of-range values is an error.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str::<toml::Value>(&content)?)
    } else {
        None
    };
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# School Directory Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Name shown in page titles, headers and footers.
title = "Scholastic Forum"

# Line shown under the homepage heading.
tagline = "Discover Educational Institutions"

# Public root URL of the published site. Canonical links, the sitemap and
# external image URLs in assets/schools_data.json are built from it.
base_url = "https://hvstechzw.github.io/Scholastic-Schools-Catalog"

# Address behind the "Report Issue" footer link.
support_email = "support@scholasticforum.org"

# ---------------------------------------------------------------------------
# Storage
# ---------------------------------------------------------------------------
[database]
# SQLite database containing the `schools` table. Relative paths are
# resolved against the directory holding this file. Overridden by --db.
path = "school_manager.db"

# ---------------------------------------------------------------------------
# Homepage
# ---------------------------------------------------------------------------
[home]
# Number of preview cards shown on the homepage (first N by name).
featured_count = 12

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
# Fixed <lastmod> date for every sitemap entry (YYYY-MM-DD).
# Omit to leave <lastmod> out entirely.
# lastmod = "2025-01-01"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel detail-page render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
