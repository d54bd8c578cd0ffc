//! # School Directory
//!
//! A static site generator for a directory of verified schools. The SQLite
//! `schools` table is the data source: every active, verified row becomes a
//! profile page, a card on the listing page and an entry in the JSON
//! exports.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Load      schools.db  →  Vec<SchoolRecord>   (rows → normalized records)
//! 2. Generate  records     →  output tree         (HTML, CSS, sitemap, JSON)
//! ```
//!
//! The record collection is loaded once and is read-only from then on; every
//! artifact is rendered from that one snapshot. Rendering is pure (records
//! in, strings out), so nearly all of the pipeline is testable without
//! touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`load`] | Stage 1: eligibility query, row normalization, derived fields |
//! | [`generate`] | Stage 2: renders every artifact in memory, then writes the output tree |
//! | [`render`] | Maud page renderers: homepage, listing, detail pages, sitemap |
//! | [`export`] | JSON exports: summary, full with image URLs, full with embedded images |
//! | [`stats`] | Listing aggregates and location filter options |
//! | [`config`] | `config.toml` loading, validation and merging over stock defaults |
//! | [`types`] | `SchoolRecord` and its parts, amenities, social links, star ratings |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Loaded Nothing vs. Failed to Load
//!
//! [`load::load_schools`] returns `Result<LoadOutcome, LoadError>`. A missing
//! database or a broken query is an error and the build stops; a database
//! with no eligible rows is [`load::LoadOutcome::NoEligibleRecords`] and the
//! build still produces an empty directory site.
//!
//! ## Render Everything, Then Write
//!
//! [`generate::render_site`] produces every artifact as a string before a
//! single file is written, so a rendering problem never leaves a partial
//! tree behind. Write errors name the artifact that failed.
//!
//! ## Maud Over String Templates
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), so every field
//! pulled from the database is escaped on interpolation. Structured data
//! blocks are built with `serde_json`, never spliced by hand.
//!
//! ## Deterministic Output
//!
//! The build date is passed in explicitly and appears in exactly one place
//! per page, the footer build stamp. Two builds of the same data on the same
//! day are byte-identical, which keeps diffs of the published site limited
//! to real changes.

pub mod config;
pub mod export;
pub mod generate;
pub mod load;
pub mod output;
pub mod render;
pub mod stats;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
