//! Record loading from the SQLite `schools` table.
//!
//! Stage 1 of the build: one read-only query selects every active, verified
//! school ordered by name, and each row is normalized into a self-contained
//! [`SchoolRecord`] with its derived fields filled in.
//!
//! ## Derived Fields
//!
//! Computed once per row, in this order:
//!
//! 1. `logo_base64` / `banner_base64`: standard base64 of the image blobs,
//!    present only for non-empty blobs
//! 2. `age_years`: build year minus establishment year
//! 3. `full_address`: non-empty address parts joined with `", "`
//! 4. `amenities`: labels of the set facility flags, in fixed order
//! 5. `social_links`: platform → URL, handles expanded to profile URLs
//!
//! ## Failure Modes
//!
//! Opening the database and running the query are fatal ([`LoadError`]).
//! "Nothing eligible" is a successful [`LoadOutcome::NoEligibleRecords`], so
//! callers can tell an empty directory apart from a broken one. An image
//! column holding something other than a blob is logged and skipped.

use crate::types::{
    Contact, Counts, Derived, Facilities, Location, Ratings, SchoolRecord, SocialLinks,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open database {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("school query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("invalid school record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}

/// Successful load result.
#[derive(Debug)]
pub enum LoadOutcome {
    /// At least one eligible record, sorted by name.
    Loaded(Vec<SchoolRecord>),
    /// The query ran but no record is both active and verified.
    NoEligibleRecords,
}

impl LoadOutcome {
    pub fn records(&self) -> &[SchoolRecord] {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::NoEligibleRecords => &[],
        }
    }

    pub fn into_records(self) -> Vec<SchoolRecord> {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::NoEligibleRecords => Vec::new(),
        }
    }
}

const SCHOOLS_QUERY: &str = "
SELECT
    school_id, name, short_name, motto, mission, vision, description,
    school_type, gender_focus, level, category, establishment_year,
    address, city, province, district, country, postal_code,
    google_maps_link,
    email, phone, phone_primary, website,
    facebook_page, twitter_handle, instagram_handle, linkedin_page,
    principal_name, principal_email,
    curriculum, total_students, total_teachers,
    total_classrooms, science_labs, computer_labs, library_rooms,
    playground_area, sports_facilities,
    has_library, has_science_lab, has_computer_lab, has_playground,
    has_sports_field, has_swimming_pool, has_auditorium, has_cafeteria,
    has_health_clinic, has_wifi, has_smart_classes,
    hostel_facilities, transport_services,
    fee_range, scholarships_available, scholarship_details,
    overall_rating, total_reviews, academic_rating, facility_rating,
    discipline_rating,
    logo_blob, banner_blob,
    latitude, longitude,
    created_at
FROM schools
WHERE is_active = 1 AND is_verified = 1
ORDER BY name
";

/// A read-only handle on the school database.
///
/// The connection is released when the handle drops, on every exit path.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open an existing database read-only. A missing file is an error,
    /// never an empty database.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
            |source| LoadError::Connection {
                path: path.to_path_buf(),
                source,
            },
        )?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Run the eligibility query and normalize every row.
    ///
    /// `current_year` feeds `age_years`; it is a parameter so a build is
    /// reproducible for a fixed date.
    pub fn load_schools(&self, current_year: i32) -> Result<LoadOutcome, LoadError> {
        let mut stmt = self.conn.prepare(SCHOOLS_QUERY)?;
        let mut rows = stmt.query([])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let row_number = records.len() + 1;
            let record = read_record(row, current_year)?;
            check_identity(&record).map_err(|reason| LoadError::InvalidRecord {
                row: row_number,
                reason,
            })?;
            records.push(record);
        }

        tracing::info!(count = records.len(), "loaded eligible schools");
        if records.is_empty() {
            Ok(LoadOutcome::NoEligibleRecords)
        } else {
            Ok(LoadOutcome::Loaded(records))
        }
    }
}

/// Open the database at `path`, load every eligible school, and close it.
pub fn load_schools(path: &Path, current_year: i32) -> Result<LoadOutcome, LoadError> {
    let storage = Storage::open(path)?;
    storage.load_schools(current_year)
}

fn read_record(row: &Row<'_>, current_year: i32) -> rusqlite::Result<SchoolRecord> {
    let school_id = text(row, "school_id")?.unwrap_or_default();

    let location = Location {
        address: text(row, "address")?,
        city: text(row, "city")?,
        province: text(row, "province")?,
        district: text(row, "district")?,
        country: text(row, "country")?,
        postal_code: text(row, "postal_code")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        google_maps_link: text(row, "google_maps_link")?,
    };

    let contact = Contact {
        email: text(row, "email")?,
        phone: text(row, "phone")?,
        phone_primary: text(row, "phone_primary")?,
        website: text(row, "website")?,
        facebook_page: text(row, "facebook_page")?,
        twitter_handle: text(row, "twitter_handle")?,
        instagram_handle: text(row, "instagram_handle")?,
        linkedin_page: text(row, "linkedin_page")?,
        principal_name: text(row, "principal_name")?,
        principal_email: text(row, "principal_email")?,
    };

    let counts = Counts {
        total_students: count(row, "total_students")?,
        total_teachers: count(row, "total_teachers")?,
        total_classrooms: count(row, "total_classrooms")?,
        science_labs: count(row, "science_labs")?,
        computer_labs: count(row, "computer_labs")?,
        library_rooms: count(row, "library_rooms")?,
    };

    let facilities = Facilities {
        library: flag(row, "has_library")?,
        science_lab: flag(row, "has_science_lab")?,
        computer_lab: flag(row, "has_computer_lab")?,
        playground: flag(row, "has_playground")?,
        sports_field: flag(row, "has_sports_field")?,
        swimming_pool: flag(row, "has_swimming_pool")?,
        auditorium: flag(row, "has_auditorium")?,
        cafeteria: flag(row, "has_cafeteria")?,
        health_clinic: flag(row, "has_health_clinic")?,
        wifi: flag(row, "has_wifi")?,
        smart_classes: flag(row, "has_smart_classes")?,
        hostel: flag(row, "hostel_facilities")?,
        transport: flag(row, "transport_services")?,
    };

    let ratings = Ratings {
        overall: real(row, "overall_rating")?,
        academic: real(row, "academic_rating")?,
        facility: real(row, "facility_rating")?,
        discipline: real(row, "discipline_rating")?,
        total_reviews: count(row, "total_reviews")?,
    };

    let logo_base64 = image(row, "logo_blob", &school_id)?;
    let banner_base64 = image(row, "banner_blob", &school_id)?;

    let mut record = SchoolRecord {
        name: text(row, "name")?.unwrap_or_default(),
        short_name: text(row, "short_name")?,
        motto: text(row, "motto")?,
        mission: text(row, "mission")?,
        vision: text(row, "vision")?,
        description: text(row, "description")?,
        school_type: text(row, "school_type")?,
        gender_focus: text(row, "gender_focus")?,
        level: text(row, "level")?,
        category: text(row, "category")?,
        curriculum: text(row, "curriculum")?,
        location,
        contact,
        establishment_year: year(row, "establishment_year")?,
        counts,
        facilities,
        playground_area: text(row, "playground_area")?,
        sports_facilities: text(row, "sports_facilities")?,
        fee_range: text(row, "fee_range")?,
        scholarships_available: flag(row, "scholarships_available")?,
        scholarship_details: text(row, "scholarship_details")?,
        ratings,
        created_at: text(row, "created_at")?,
        derived: Derived::default(),
        school_id,
    };
    record.derived = derive_fields(&record, logo_base64, banner_base64, current_year);
    Ok(record)
}

/// Compute the derived fields of a record whose stored fields are filled in.
pub fn derive_fields(
    record: &SchoolRecord,
    logo_base64: Option<String>,
    banner_base64: Option<String>,
    current_year: i32,
) -> Derived {
    Derived {
        logo_base64,
        banner_base64,
        age_years: age_years(record.establishment_year, current_year),
        full_address: format_address(&record.location),
        amenities: record.facilities.amenities(),
        social_links: SocialLinks::from_contact(
            &record.contact,
            record.location.google_maps_link.as_deref(),
        ),
    }
}

pub fn age_years(establishment_year: Option<i32>, current_year: i32) -> Option<i32> {
    establishment_year.map(|year| current_year - year)
}

/// Join address, district, city, province, postal code and country with
/// `", "`, skipping parts that are missing or blank.
pub fn format_address(location: &Location) -> String {
    [
        &location.address,
        &location.district,
        &location.city,
        &location.province,
        &location.postal_code,
        &location.country,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Standard (padded) base64 of an image payload.
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// A record needs a name to be listed and a file-safe id to get a page.
fn check_identity(record: &SchoolRecord) -> Result<(), String> {
    let id = record.school_id.as_str();
    if id.is_empty() {
        return Err("school_id is empty".to_string());
    }
    if id.contains(['/', '\\']) || id == "." || id.contains("..") {
        return Err(format!("school_id {id:?} is not usable as a file name"));
    }
    if id == "all" {
        return Err("school_id \"all\" collides with the listing page".to_string());
    }
    if record.name.trim().is_empty() {
        return Err(format!("school {id:?} has no name"));
    }
    Ok(())
}

// ============================================================================
// Column readers
// ============================================================================

fn column_type_error(row: &Row<'_>, col: &str, ty: Type) -> rusqlite::Error {
    let idx = row.as_ref().column_index(col).unwrap_or(usize::MAX);
    rusqlite::Error::InvalidColumnType(idx, col.to_string(), ty)
}

/// Text column; integers and reals are rendered as text, empty strings are
/// treated as absent.
fn text(row: &Row<'_>, col: &str) -> rusqlite::Result<Option<String>> {
    let value = match row.get_ref(col)? {
        ValueRef::Null => None,
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Blob(_) => return Err(column_type_error(row, col, Type::Blob)),
    };
    Ok(value.filter(|s| !s.is_empty()))
}

/// Integer column; reals are truncated and numeric text is parsed, since
/// SQLite column affinity does not guarantee an INTEGER storage class.
fn integer(row: &Row<'_>, col: &str) -> rusqlite::Result<Option<i64>> {
    Ok(match row.get_ref(col)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) if f.is_finite() => Some(f.trunc() as i64),
        ValueRef::Real(_) => None,
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        ValueRef::Blob(_) => return Err(column_type_error(row, col, Type::Blob)),
    })
}

/// Non-negative integer column, 0 when absent or negative.
fn count(row: &Row<'_>, col: &str) -> rusqlite::Result<u32> {
    let value = integer(row, col)?;
    Ok(value.and_then(|n| u32::try_from(n).ok()).unwrap_or(0))
}

/// Year column; NULL and 0 both mean "unknown".
fn year(row: &Row<'_>, col: &str) -> rusqlite::Result<Option<i32>> {
    let value = integer(row, col)?;
    Ok(value
        .filter(|y| *y > 0)
        .and_then(|y| i32::try_from(y).ok()))
}

fn flag(row: &Row<'_>, col: &str) -> rusqlite::Result<bool> {
    Ok(row.get::<_, Option<bool>>(col)?.unwrap_or(false))
}

fn real(row: &Row<'_>, col: &str) -> rusqlite::Result<f64> {
    Ok(row.get::<_, Option<f64>>(col)?.unwrap_or(0.0))
}

/// Image blob column encoded as base64. Anything that is not a non-empty
/// blob yields `None`; a non-blob value is logged.
fn image(row: &Row<'_>, col: &str, school_id: &str) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(col)? {
        ValueRef::Blob(bytes) if !bytes.is_empty() => Some(encode_image(bytes)),
        ValueRef::Blob(_) | ValueRef::Null => None,
        other => {
            tracing::warn!(
                school_id,
                column = col,
                kind = %other.data_type(),
                "image column does not hold a blob, leaving it out"
            );
            None
        }
    })
}
