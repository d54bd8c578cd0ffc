//! Directory-wide aggregates for the listing page.

use crate::types::SchoolRecord;
use std::collections::BTreeSet;

/// Stat card figures for the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total_schools: usize,
    pub total_students: u64,
    pub total_teachers: u64,
    /// Earliest establishment year among records that have one.
    pub oldest_established: Option<i32>,
}

impl DirectoryStats {
    pub fn from_records(records: &[SchoolRecord]) -> Self {
        Self {
            total_schools: records.len(),
            total_students: records
                .iter()
                .map(|r| u64::from(r.counts.total_students))
                .sum(),
            total_teachers: records
                .iter()
                .map(|r| u64::from(r.counts.total_teachers))
                .sum(),
            oldest_established: records.iter().filter_map(|r| r.establishment_year).min(),
        }
    }
}

/// A location filter entry: display label plus the lowercase value the
/// client-side filter matches against.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocationOption {
    pub label: String,
    pub value: String,
}

/// The display label for a record's location: `"{city}, {province}"`, or
/// whichever of the two is present.
pub fn location_label(record: &SchoolRecord) -> Option<String> {
    match (
        record.location.city.as_deref(),
        record.location.province.as_deref(),
    ) {
        (Some(city), Some(province)) => Some(format!("{city}, {province}")),
        (Some(city), None) => Some(city.to_string()),
        (None, Some(province)) => Some(province.to_string()),
        (None, None) => None,
    }
}

/// Unique location labels across all records, sorted lexicographically.
pub fn location_options(records: &[SchoolRecord]) -> Vec<LocationOption> {
    records
        .iter()
        .filter_map(location_label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|label| LocationOption {
            value: label.to_lowercase(),
            label,
        })
        .collect()
}
