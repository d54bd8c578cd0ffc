//! Static site generation.
//!
//! Stage 2 of the build. Takes the loaded record collection and produces
//! the complete output tree.
//!
//! ## Generated Artifacts
//!
//! ```text
//! <output>/
//! ├── index.html                          # Homepage, first N records
//! ├── sitemap.xml
//! ├── schools/
//! │   ├── all.html                        # Listing of every record
//! │   └── {school_id}.html                # One profile per record
//! └── assets/
//!     ├── style.css
//!     ├── schools.json                    # Summary export
//!     ├── schools_data.json               # Full export, external image URLs
//!     ├── schools_data_base64.json        # Full export, embedded images
//!     └── images/                         # Placeholders, created if absent
//! ```
//!
//! ## Two Phases
//!
//! [`render_site`] builds every artifact in memory and touches no files.
//! [`write_site`] then writes them out. A render failure therefore never
//! leaves a half-written tree, and a write failure names the artifact that
//! could not be written.
//!
//! Detail pages are rendered in parallel with rayon; `par_iter` preserves
//! input order so the output is identical to a sequential render.
//!
//! ## Stale Pages
//!
//! Every run is a full rebuild. `schools/*.html` files that do not belong
//! to a current record (a school that was deactivated, say) are removed
//! after the new pages are written.

use crate::config::SiteConfig;
use crate::export::{self, MediaMode};
use crate::render::{self, RenderContext};
use crate::types::SchoolRecord;
use chrono::NaiveDate;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CSS: &str = include_str!("../static/style.css");

pub const INDEX_PATH: &str = "index.html";
pub const SITEMAP_PATH: &str = "sitemap.xml";
pub const STYLE_PATH: &str = "assets/style.css";
pub const SUMMARY_JSON_PATH: &str = "assets/schools.json";
pub const FULL_JSON_PATH: &str = "assets/schools_data.json";
pub const BASE64_JSON_PATH: &str = "assets/schools_data_base64.json";
pub const SCHOOLS_DIR: &str = "schools";

/// Placeholder images: path and the stand-in content written when missing.
pub const PLACEHOLDER_IMAGES: &[(&str, &str)] = &[
    ("assets/images/logo_light.png", "<!-- Placeholder for SF -->"),
    ("assets/images/manufacturer_dark.png", "<!-- Placeholder for HVST -->"),
    ("assets/images/og-image.jpg", "<!-- Placeholder for Scholastic Forum -->"),
];

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to write {}: {source}", artifact.display())]
    Write {
        artifact: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to prune stale page {}: {source}", path.display())]
    Prune {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of an output file, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Homepage,
    Listing,
    Detail,
    Stylesheet,
    Sitemap,
    Json,
}

/// One fully rendered output file.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    pub kind: ArtifactKind,
    pub contents: String,
}

/// Every artifact of one build, in write order.
#[derive(Debug, Clone)]
pub struct Site {
    pub artifacts: Vec<Artifact>,
}

impl Site {
    pub fn get(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path == path)
    }

    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.artifacts.iter().filter(|a| a.kind == kind).count()
    }
}

/// What [`write_site`] did to the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub placeholders_created: Vec<String>,
    pub pruned: Vec<String>,
}

/// Summary of a build, used by the CLI output.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub total_schools: usize,
    pub homepage_cards: usize,
    pub detail_pages: usize,
    pub write: WriteReport,
}

/// First 8 hex digits of the stylesheet's SHA-256, used as a cache-busting
/// query on every `<link>` to it.
pub fn css_version(css: &str) -> String {
    let digest = Sha256::digest(css.as_bytes());
    let hex = format!("{:x}", digest);
    hex[..8].to_string()
}

/// Render every artifact into memory.
pub fn render_site(
    records: &[SchoolRecord],
    config: &SiteConfig,
    build_date: NaiveDate,
) -> Result<Site, GenerateError> {
    let version = css_version(CSS);
    let ctx = RenderContext {
        site: &config.site,
        build_date,
        css_version: &version,
        total_schools: records.len(),
    };

    let mut artifacts = vec![
        Artifact {
            path: INDEX_PATH.to_string(),
            kind: ArtifactKind::Homepage,
            contents: render::home::render_home(&ctx, records, config.home.featured_count)
                .into_string(),
        },
        Artifact {
            path: render::listing::PAGE_PATH.to_string(),
            kind: ArtifactKind::Listing,
            contents: render::listing::render_listing(&ctx, records).into_string(),
        },
    ];

    let details: Vec<Artifact> = records
        .par_iter()
        .map(|record| Artifact {
            path: render::detail::page_path(record),
            kind: ArtifactKind::Detail,
            contents: render::detail::render_detail(&ctx, record).into_string(),
        })
        .collect();
    artifacts.extend(details);

    artifacts.push(Artifact {
        path: STYLE_PATH.to_string(),
        kind: ArtifactKind::Stylesheet,
        contents: CSS.to_string(),
    });
    artifacts.push(Artifact {
        path: SITEMAP_PATH.to_string(),
        kind: ArtifactKind::Sitemap,
        contents: render::sitemap::render_sitemap(config, records).into_string(),
    });
    artifacts.push(Artifact {
        path: SUMMARY_JSON_PATH.to_string(),
        kind: ArtifactKind::Json,
        contents: export::summary_json(records)?,
    });
    artifacts.push(Artifact {
        path: FULL_JSON_PATH.to_string(),
        kind: ArtifactKind::Json,
        contents: export::full_json(records, &config.site, MediaMode::External)?,
    });
    artifacts.push(Artifact {
        path: BASE64_JSON_PATH.to_string(),
        kind: ArtifactKind::Json,
        contents: export::full_json(records, &config.site, MediaMode::Embedded)?,
    });

    Ok(Site { artifacts })
}

/// Write a rendered site under `output_dir`.
///
/// Placeholder images are only created when missing. Stale detail pages are
/// pruned once every artifact has been written.
pub fn write_site(site: &Site, output_dir: &Path) -> Result<WriteReport, GenerateError> {
    let mut report = WriteReport::default();

    for dir in ["", SCHOOLS_DIR, "assets", "assets/images"] {
        let path = output_dir.join(dir);
        fs::create_dir_all(&path).map_err(|source| GenerateError::CreateDir {
            path: path.clone(),
            source,
        })?;
    }

    for artifact in &site.artifacts {
        let path = output_dir.join(&artifact.path);
        fs::write(&path, &artifact.contents).map_err(|source| GenerateError::Write {
            artifact: path.clone(),
            source,
        })?;
        report.written.push(artifact.path.clone());
    }

    for (rel, contents) in PLACEHOLDER_IMAGES {
        let path = output_dir.join(rel);
        if path.exists() {
            continue;
        }
        fs::write(&path, contents).map_err(|source| GenerateError::Write {
            artifact: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "created placeholder image");
        report.placeholders_created.push(rel.to_string());
    }

    report.pruned = prune_stale_pages(site, output_dir)?;
    Ok(report)
}

/// Remove `schools/*.html` files (other than the listing) that no current
/// record produced.
fn prune_stale_pages(site: &Site, output_dir: &Path) -> Result<Vec<String>, GenerateError> {
    let schools_dir = output_dir.join(SCHOOLS_DIR);
    let current: BTreeSet<&str> = site.artifacts.iter().map(|a| a.path.as_str()).collect();

    let entries = fs::read_dir(&schools_dir).map_err(|source| GenerateError::Prune {
        path: schools_dir.clone(),
        source,
    })?;

    let mut stale = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| GenerateError::Prune {
            path: schools_dir.clone(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".html") || !path.is_file() {
            continue;
        }
        let rel = format!("{SCHOOLS_DIR}/{name}");
        if current.contains(rel.as_str()) {
            continue;
        }
        stale.push((rel, path));
    }
    stale.sort();

    let mut pruned = Vec::with_capacity(stale.len());
    for (rel, path) in stale {
        fs::remove_file(&path).map_err(|source| GenerateError::Prune {
            path: path.clone(),
            source,
        })?;
        tracing::info!(page = %rel, "removed stale detail page");
        pruned.push(rel);
    }
    Ok(pruned)
}

/// Render and write the whole site.
pub fn generate(
    records: &[SchoolRecord],
    config: &SiteConfig,
    output_dir: &Path,
    build_date: NaiveDate,
) -> Result<GenerateReport, GenerateError> {
    let site = render_site(records, config, build_date)?;
    let write = write_site(&site, output_dir)?;
    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        total_schools: records.len(),
        homepage_cards: records.len().min(config.home.featured_count),
        detail_pages: site.count(ArtifactKind::Detail),
        write,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn css_version_is_eight_hex_digits() {
        let v = css_version(CSS);
        assert_eq!(v.len(), 8);
        assert!(v.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(v, css_version(CSS));
        assert_ne!(v, css_version("body {}"));
    }

    #[test]
    fn render_site_lists_all_artifacts() {
        let records = numbered_records(3);
        let site = render_site(&records, &SiteConfig::default(), date()).unwrap();
        let paths: Vec<_> = site.artifacts.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "index.html",
                "schools/all.html",
                "schools/s01.html",
                "schools/s02.html",
                "schools/s03.html",
                "assets/style.css",
                "sitemap.xml",
                "assets/schools.json",
                "assets/schools_data.json",
                "assets/schools_data_base64.json",
            ]
        );
        assert_eq!(site.count(ArtifactKind::Detail), 3);
    }

    #[test]
    fn pages_link_current_css_version() {
        let site = render_site(&numbered_records(1), &SiteConfig::default(), date()).unwrap();
        let version = css_version(CSS);
        let index = &site.get("index.html").unwrap().contents;
        assert!(index.contains(&format!("assets/style.css?v={version}")));
        let detail = &site.get("schools/s01.html").unwrap().contents;
        assert!(detail.contains(&format!("../assets/style.css?v={version}")));
    }

    #[test]
    fn parallel_render_matches_sequential() {
        let records = numbered_records(20);
        let config = SiteConfig::default();
        let site = render_site(&records, &config, date()).unwrap();
        let version = css_version(CSS);
        let ctx = RenderContext {
            site: &config.site,
            build_date: date(),
            css_version: &version,
            total_schools: records.len(),
        };
        for record in &records {
            let expected = render::detail::render_detail(&ctx, record).into_string();
            let path = render::detail::page_path(record);
            assert_eq!(site.get(&path).unwrap().contents, expected);
        }
    }

    #[test]
    fn zero_records_still_render_pages() {
        let site = render_site(&[], &SiteConfig::default(), date()).unwrap();
        assert_eq!(site.count(ArtifactKind::Detail), 0);
        assert!(site.get("index.html").unwrap().contents.contains("Showing 0 of 0 institutions"));
        assert_eq!(site.get("assets/schools.json").unwrap().contents, "[]\n");
    }

    #[test]
    fn write_site_creates_tree_and_placeholders() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("site");
        let report = generate(&numbered_records(2), &SiteConfig::default(), &out, date()).unwrap();

        assert!(out.join("index.html").is_file());
        assert!(out.join("schools/all.html").is_file());
        assert!(out.join("schools/s02.html").is_file());
        assert!(out.join("assets/style.css").is_file());
        assert!(out.join("assets/images/og-image.jpg").is_file());
        assert_eq!(report.write.placeholders_created.len(), 3);
        assert_eq!(report.detail_pages, 2);
        assert!(report.write.pruned.is_empty());
    }

    #[test]
    fn existing_placeholder_is_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        let logo = tmp.path().join("assets/images/logo_light.png");
        fs::create_dir_all(logo.parent().unwrap()).unwrap();
        fs::write(&logo, b"real logo").unwrap();

        let report = generate(&[], &SiteConfig::default(), tmp.path(), date()).unwrap();
        assert_eq!(fs::read(&logo).unwrap(), b"real logo");
        assert!(!report
            .write
            .placeholders_created
            .contains(&"assets/images/logo_light.png".to_string()));
    }

    #[test]
    fn stale_detail_pages_are_pruned() {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();
        generate(&numbered_records(3), &config, tmp.path(), date()).unwrap();
        fs::write(tmp.path().join("schools/notes.txt"), "keep me").unwrap();

        let report = generate(&numbered_records(1), &config, tmp.path(), date()).unwrap();
        assert_eq!(report.write.pruned, vec!["schools/s02.html", "schools/s03.html"]);
        assert!(tmp.path().join("schools/s01.html").is_file());
        assert!(tmp.path().join("schools/all.html").is_file());
        assert!(!tmp.path().join("schools/s02.html").exists());
        assert!(tmp.path().join("schools/notes.txt").exists());
    }

    #[test]
    fn write_failure_names_artifact() {
        let tmp = TempDir::new().unwrap();
        // A directory where index.html should go makes the write fail.
        fs::create_dir_all(tmp.path().join("index.html")).unwrap();
        let err = generate(&[], &SiteConfig::default(), tmp.path(), date()).unwrap_err();
        match err {
            GenerateError::Write { artifact, .. } => {
                assert!(artifact.ends_with("index.html"));
            }
            other => panic!("expected write error, got {other:?}"),
        }
    }
}
