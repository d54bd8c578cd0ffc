//! CLI output formatting for the load and generate stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each school is shown
//! by positional index and name, with its identifier, location and rating
//! as indented context lines. Generated files appear after a `→` so the
//! output reads as an inventory of what the directory now contains.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Schools (2)
//! 001 Alpha Academy
//!     Id: s1
//!     Location: Harare, Harare Metropolitan
//!     Rating: 4.3 (37 reviews)
//! 002 Beta College
//!     Id: s2
//!     Rating: unrated
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html (2 of 2 cards)
//! Listing → schools/all.html
//! 001 Alpha Academy → schools/s1.html
//! 002 Beta College → schools/s2.html
//!
//! Data
//!     assets/schools.json
//!     assets/schools_data.json
//!     assets/schools_data_base64.json
//!     sitemap.xml
//!
//! Generated 2 school pages → dist
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::{
    BASE64_JSON_PATH, FULL_JSON_PATH, GenerateReport, INDEX_PATH, SITEMAP_PATH, SUMMARY_JSON_PATH,
};
use crate::load::LoadOutcome;
use crate::render::{detail, format_rating, listing};
use crate::stats::location_label;
use crate::types::SchoolRecord;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + name.
fn entity_header(index: usize, name: &str) -> String {
    format!("{} {}", format_index(index), name)
}

fn rating_line(record: &SchoolRecord) -> String {
    let ratings = &record.ratings;
    if ratings.overall > 0.0 {
        format!(
            "Rating: {} ({} reviews)",
            format_rating(ratings.overall),
            ratings.total_reviews
        )
    } else {
        "Rating: unrated".to_string()
    }
}

// ============================================================================
// Load / check
// ============================================================================

pub fn format_load_output(outcome: &LoadOutcome, db_path: &Path) -> Vec<String> {
    let records = match outcome {
        LoadOutcome::NoEligibleRecords => {
            return vec![format!(
                "No active, verified schools in {}",
                db_path.display()
            )];
        }
        LoadOutcome::Loaded(records) => records,
    };

    let mut lines = vec![format!("Schools ({})", records.len())];
    for (i, record) in records.iter().enumerate() {
        lines.push(entity_header(i + 1, &record.name));
        lines.push(format!("{}Id: {}", indent(1), record.school_id));
        if let Some(location) = location_label(record) {
            lines.push(format!("{}Location: {}", indent(1), location));
        }
        lines.push(format!("{}{}", indent(1), rating_line(record)));
        let images: Vec<&str> = [
            record.derived.logo_base64.as_ref().map(|_| "logo"),
            record.derived.banner_base64.as_ref().map(|_| "banner"),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !images.is_empty() {
            lines.push(format!("{}Images: {}", indent(1), images.join(", ")));
        }
    }
    lines
}

/// Print load output to stdout.
pub fn print_load_output(outcome: &LoadOutcome, db_path: &Path) {
    for line in format_load_output(outcome, db_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate / build
// ============================================================================

pub fn format_generate_output(report: &GenerateReport, records: &[SchoolRecord]) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Home \u{2192} {} ({} of {} cards)",
            INDEX_PATH, report.homepage_cards, report.total_schools
        ),
        format!("Listing \u{2192} {}", listing::PAGE_PATH),
    ];

    for (i, record) in records.iter().enumerate() {
        lines.push(format!(
            "{} \u{2192} {}",
            entity_header(i + 1, &record.name),
            detail::page_path(record)
        ));
    }

    lines.push(String::new());
    lines.push("Data".to_string());
    for path in [SUMMARY_JSON_PATH, FULL_JSON_PATH, BASE64_JSON_PATH, SITEMAP_PATH] {
        lines.push(format!("{}{}", indent(1), path));
    }

    if !report.write.placeholders_created.is_empty() {
        lines.push(String::new());
        lines.push("Placeholders".to_string());
        for path in &report.write.placeholders_created {
            lines.push(format!("{}{}", indent(1), path));
        }
    }

    if !report.write.pruned.is_empty() {
        lines.push(String::new());
        lines.push("Removed stale pages".to_string());
        for path in &report.write.pruned {
            lines.push(format!("{}{}", indent(1), path));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} school pages \u{2192} {}",
        report.detail_pages,
        report.output_dir.display()
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport, records: &[SchoolRecord]) {
    for line in format_generate_output(report, records) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::WriteReport;
    use crate::test_helpers::*;
    use std::path::PathBuf;

    fn report(records: &[SchoolRecord], write: WriteReport) -> GenerateReport {
        GenerateReport {
            output_dir: PathBuf::from("dist"),
            total_schools: records.len(),
            homepage_cards: records.len().min(12),
            detail_pages: records.len(),
            write,
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(120), "120");
    }

    #[test]
    fn load_output_lists_schools_with_context() {
        let records = vec![full_record("ghs", "Greenwood High"), bare_record("b", "Beta")];
        let lines = format_load_output(&LoadOutcome::Loaded(records), Path::new("x.db"));
        assert_eq!(
            lines,
            vec![
                "Schools (2)",
                "001 Greenwood High",
                "    Id: ghs",
                "    Location: Harare, Harare Metropolitan",
                "    Rating: 4.3 (37 reviews)",
                "    Images: logo, banner",
                "002 Beta",
                "    Id: b",
                "    Rating: unrated",
            ]
        );
    }

    #[test]
    fn load_output_no_eligible_records() {
        let lines = format_load_output(&LoadOutcome::NoEligibleRecords, Path::new("schools.db"));
        assert_eq!(lines, vec!["No active, verified schools in schools.db"]);
    }

    #[test]
    fn generate_output_lists_pages_and_data() {
        let records = numbered_records(2);
        let lines = format_generate_output(&report(&records, WriteReport::default()), &records);
        assert_eq!(lines[0], "Home \u{2192} index.html (2 of 2 cards)");
        assert_eq!(lines[1], "Listing \u{2192} schools/all.html");
        assert_eq!(lines[2], "001 School 01 \u{2192} schools/s01.html");
        assert!(lines.contains(&"    assets/schools_data_base64.json".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 school pages \u{2192} dist"
        );
        assert!(!lines.contains(&"Removed stale pages".to_string()));
    }

    #[test]
    fn generate_output_shows_pruned_and_placeholders() {
        let write = WriteReport {
            written: vec![],
            placeholders_created: vec!["assets/images/og-image.jpg".into()],
            pruned: vec!["schools/old.html".into()],
        };
        let lines = format_generate_output(&report(&[], write), &[]);
        assert!(lines.contains(&"Placeholders".to_string()));
        assert!(lines.contains(&"    assets/images/og-image.jpg".to_string()));
        assert!(lines.contains(&"Removed stale pages".to_string()));
        assert!(lines.contains(&"    schools/old.html".to_string()));
    }
}
