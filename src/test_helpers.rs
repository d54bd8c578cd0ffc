//! Shared test utilities for the school-directory test suite.
//!
//! Provides fixture databases with the full `schools` schema, row builders,
//! in-memory record constructors for renderer tests, and lookup helpers that
//! panic with a clear message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (_tmp, path, conn) = create_db();
//! insert_school(&conn, &eligible("s1", "Alpha Academy"));
//! drop(conn);
//!
//! let outcome = load_schools(&path, 2025).unwrap();
//! let record = find_record(outcome.records(), "s1");
//! ```

use rusqlite::Connection;
use rusqlite::types::Value;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::load::{derive_fields, encode_image};
use crate::types::{Contact, Counts, Facilities, Location, Ratings, SchoolRecord};

/// Build year used by every fixture so derived ages are stable.
pub const TEST_YEAR: i32 = 2025;

pub const SCHOOLS_DDL: &str = "
CREATE TABLE schools (
    school_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    short_name TEXT, motto TEXT, mission TEXT, vision TEXT, description TEXT,
    school_type TEXT, gender_focus TEXT, level TEXT, category TEXT,
    establishment_year INTEGER,
    address TEXT, city TEXT, province TEXT, district TEXT, country TEXT,
    postal_code TEXT, google_maps_link TEXT,
    email TEXT, phone TEXT, phone_primary TEXT, website TEXT,
    facebook_page TEXT, twitter_handle TEXT, instagram_handle TEXT, linkedin_page TEXT,
    principal_name TEXT, principal_email TEXT,
    curriculum TEXT,
    total_students INTEGER, total_teachers INTEGER, total_classrooms INTEGER,
    science_labs INTEGER, computer_labs INTEGER, library_rooms INTEGER,
    playground_area TEXT, sports_facilities TEXT,
    has_library INTEGER, has_science_lab INTEGER, has_computer_lab INTEGER,
    has_playground INTEGER, has_sports_field INTEGER, has_swimming_pool INTEGER,
    has_auditorium INTEGER, has_cafeteria INTEGER, has_health_clinic INTEGER,
    has_wifi INTEGER, has_smart_classes INTEGER,
    hostel_facilities INTEGER, transport_services INTEGER,
    fee_range TEXT, scholarships_available INTEGER, scholarship_details TEXT,
    overall_rating REAL, total_reviews INTEGER, academic_rating REAL,
    facility_rating REAL, discipline_rating REAL,
    logo_blob BLOB, banner_blob BLOB,
    latitude REAL, longitude REAL,
    created_at TEXT,
    is_active INTEGER DEFAULT 0,
    is_verified INTEGER DEFAULT 0
)";

// =========================================================================
// Fixture databases
// =========================================================================

/// Create an empty `schools.db` in a fresh temp directory.
///
/// Drop the returned connection before loading so the loader sees every
/// committed row.
pub fn create_db() -> (TempDir, PathBuf, Connection) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("schools.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHOOLS_DDL).unwrap();
    (tmp, path, conn)
}

/// Insert one row. Columns not named stay NULL (or their default).
pub fn insert_school(conn: &Connection, fields: &[(&str, Value)]) {
    let columns: Vec<&str> = fields.iter().map(|(c, _)| *c).collect();
    let placeholders: Vec<String> = (1..=fields.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO schools ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );
    let values = rusqlite::params_from_iter(fields.iter().map(|(_, v)| v));
    conn.execute(&sql, values).unwrap();
}

/// Minimal active + verified row. `school_id` is always the first field.
pub fn eligible(id: &str, name: &str) -> Vec<(&'static str, Value)> {
    vec![
        ("school_id", Value::Text(id.to_string())),
        ("name", Value::Text(name.to_string())),
        ("is_active", Value::Integer(1)),
        ("is_verified", Value::Integer(1)),
    ]
}

// =========================================================================
// In-memory records
// =========================================================================

/// A bare record with only identity set and derived fields computed.
pub fn bare_record(id: &str, name: &str) -> SchoolRecord {
    let mut record = SchoolRecord {
        school_id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    };
    record.derived = derive_fields(&record, None, None, TEST_YEAR);
    record
}

/// A fully populated record: every section of the detail page has content.
pub fn full_record(id: &str, name: &str) -> SchoolRecord {
    let mut record = SchoolRecord {
        school_id: id.to_string(),
        name: name.to_string(),
        short_name: Some("GHS".into()),
        motto: Some("Knowledge is Light".into()),
        mission: Some("To nurture curious minds.".into()),
        vision: Some("A leading centre of learning.".into()),
        description: Some("A co-educational secondary school in the capital.".into()),
        school_type: Some("Boarding".into()),
        gender_focus: Some("Co-ed".into()),
        level: Some("Secondary".into()),
        category: Some("Private".into()),
        curriculum: Some("Cambridge".into()),
        location: Location {
            address: Some("12 Main Rd".into()),
            city: Some("Harare".into()),
            province: Some("Harare Metropolitan".into()),
            district: Some("Avondale".into()),
            country: Some("Zimbabwe".into()),
            postal_code: None,
            latitude: Some(-17.8),
            longitude: Some(31.05),
            google_maps_link: Some("https://maps.example/ghs".into()),
        },
        contact: Contact {
            email: Some("info@ghs.example".into()),
            phone: Some("+263 4 111111".into()),
            phone_primary: Some("+263 4 222222".into()),
            website: Some("https://ghs.example".into()),
            facebook_page: Some("https://facebook.com/ghs".into()),
            twitter_handle: Some("ghs".into()),
            instagram_handle: None,
            linkedin_page: None,
            principal_name: Some("Dr. T. Moyo".into()),
            principal_email: Some("head@ghs.example".into()),
        },
        establishment_year: Some(1962),
        counts: Counts {
            total_students: 1250,
            total_teachers: 84,
            total_classrooms: 40,
            science_labs: 3,
            computer_labs: 2,
            library_rooms: 1,
        },
        facilities: Facilities {
            library: true,
            science_lab: true,
            computer_lab: true,
            sports_field: true,
            wifi: true,
            hostel: true,
            ..Default::default()
        },
        playground_area: Some("2 hectares".into()),
        sports_facilities: Some("Rugby, cricket and athletics".into()),
        fee_range: Some("USD 1,200 - 1,500 per term".into()),
        scholarships_available: true,
        scholarship_details: Some("Merit awards for top students".into()),
        ratings: Ratings {
            overall: 4.3,
            academic: 4.5,
            facility: 4.0,
            discipline: 4.2,
            total_reviews: 37,
        },
        created_at: Some("2024-03-01 10:00:00".into()),
        ..Default::default()
    };
    record.derived = derive_fields(
        &record,
        Some(encode_image(b"logo-bytes")),
        Some(encode_image(b"banner-bytes")),
        TEST_YEAR,
    );
    record
}

/// `count` bare records named `School 01`, `School 02`, … (ids `s01`, …).
pub fn numbered_records(count: usize) -> Vec<SchoolRecord> {
    (1..=count)
        .map(|i| bare_record(&format!("s{i:02}"), &format!("School {i:02}")))
        .collect()
}

// =========================================================================
// Lookups
// =========================================================================

/// Find a record by id. Panics if not found.
pub fn find_record<'a>(records: &'a [SchoolRecord], id: &str) -> &'a SchoolRecord {
    records
        .iter()
        .find(|r| r.school_id == id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = records.iter().map(|r| r.school_id.as_str()).collect();
            panic!("record '{id}' not found. Available: {ids:?}")
        })
}

/// All record names in collection order.
pub fn record_names(records: &[SchoolRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
