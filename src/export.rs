//! JSON data exports.
//!
//! Three documents, all arrays in record order, pretty-printed:
//!
//! - `assets/schools.json`: compact summary used for client-side lookups
//! - `assets/schools_data.json`: every field, images as external URLs
//! - `assets/schools_data_base64.json`: every field, images embedded
//!
//! Absent optional values serialize as `null`. Image fields are left out
//! entirely when the record has no image, as is `age_years` when the
//! establishment year is unknown.

use crate::config::SiteSection;
use crate::types::{Amenity, SchoolRecord, SocialLinks};
use serde::Serialize;

/// Amenities listed per record in the summary export.
const SUMMARY_AMENITIES: usize = 5;

/// How image fields are represented in the full export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaMode {
    /// `logo_url`/`banner_url` point at `{base}/assets/{logos,banners}/{id}.{png,jpg}`.
    External,
    /// base64 payloads inlined, plus `data:` URIs in `logo_url`/`banner_url`.
    Embedded,
}

#[derive(Debug, Serialize)]
pub struct SummaryEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub short_name: Option<&'a str>,
    pub city: Option<&'a str>,
    pub province: Option<&'a str>,
    pub level: Option<&'a str>,
    #[serde(rename = "type")]
    pub school_type: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub curriculum: Option<&'a str>,
    pub students: u32,
    pub teachers: u32,
    pub rating: f64,
    pub established: Option<i32>,
    pub amenities: &'a [Amenity],
}

impl<'a> SummaryEntry<'a> {
    pub fn from_record(r: &'a SchoolRecord) -> Self {
        let amenities = &r.derived.amenities;
        Self {
            id: &r.school_id,
            name: &r.name,
            short_name: r.short_name.as_deref(),
            city: r.location.city.as_deref(),
            province: r.location.province.as_deref(),
            level: r.level.as_deref(),
            school_type: r.school_type.as_deref(),
            gender: r.gender_focus.as_deref(),
            curriculum: r.curriculum.as_deref(),
            students: r.counts.total_students,
            teachers: r.counts.total_teachers,
            rating: r.ratings.overall,
            established: r.establishment_year,
            amenities: &amenities[..amenities.len().min(SUMMARY_AMENITIES)],
        }
    }
}

/// One record in the full exports. Field names follow the storage columns.
#[derive(Debug, Serialize)]
pub struct FullEntry<'a> {
    pub school_id: &'a str,
    pub name: &'a str,
    pub short_name: Option<&'a str>,
    pub motto: Option<&'a str>,
    pub mission: Option<&'a str>,
    pub vision: Option<&'a str>,
    pub description: Option<&'a str>,
    pub school_type: Option<&'a str>,
    pub gender_focus: Option<&'a str>,
    pub level: Option<&'a str>,
    pub category: Option<&'a str>,
    pub establishment_year: Option<i32>,

    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub province: Option<&'a str>,
    pub district: Option<&'a str>,
    pub country: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub google_maps_link: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub phone_primary: Option<&'a str>,
    pub website: Option<&'a str>,
    pub facebook_page: Option<&'a str>,
    pub twitter_handle: Option<&'a str>,
    pub instagram_handle: Option<&'a str>,
    pub linkedin_page: Option<&'a str>,
    pub principal_name: Option<&'a str>,
    pub principal_email: Option<&'a str>,

    pub curriculum: Option<&'a str>,
    pub total_students: u32,
    pub total_teachers: u32,
    pub total_classrooms: u32,
    pub science_labs: u32,
    pub computer_labs: u32,
    pub library_rooms: u32,
    pub playground_area: Option<&'a str>,
    pub sports_facilities: Option<&'a str>,

    pub has_library: bool,
    pub has_science_lab: bool,
    pub has_computer_lab: bool,
    pub has_playground: bool,
    pub has_sports_field: bool,
    pub has_swimming_pool: bool,
    pub has_auditorium: bool,
    pub has_cafeteria: bool,
    pub has_health_clinic: bool,
    pub has_wifi: bool,
    pub has_smart_classes: bool,
    pub hostel_facilities: bool,
    pub transport_services: bool,

    pub fee_range: Option<&'a str>,
    pub scholarships_available: bool,
    pub scholarship_details: Option<&'a str>,

    pub overall_rating: f64,
    pub total_reviews: u32,
    pub academic_rating: f64,
    pub facility_rating: f64,
    pub discipline_rating: f64,

    pub created_at: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<i32>,
    pub full_address: &'a str,
    pub amenities: &'a [Amenity],
    pub social_links: &'a SocialLinks,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_base64: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_base64: Option<&'a str>,
}

impl<'a> FullEntry<'a> {
    pub fn from_record(r: &'a SchoolRecord, site: &SiteSection, mode: MediaMode) -> Self {
        let loc = &r.location;
        let contact = &r.contact;
        let f = &r.facilities;
        let logo = r.derived.logo_base64.as_deref();
        let banner = r.derived.banner_base64.as_deref();

        let (logo_url, banner_url, logo_base64, banner_base64) = match mode {
            MediaMode::External => (
                logo.map(|_| site.url_for(&format!("assets/logos/{}.png", r.school_id))),
                banner.map(|_| site.url_for(&format!("assets/banners/{}.jpg", r.school_id))),
                None,
                None,
            ),
            MediaMode::Embedded => (
                logo.map(data_uri),
                banner.map(data_uri),
                logo,
                banner,
            ),
        };

        Self {
            school_id: &r.school_id,
            name: &r.name,
            short_name: r.short_name.as_deref(),
            motto: r.motto.as_deref(),
            mission: r.mission.as_deref(),
            vision: r.vision.as_deref(),
            description: r.description.as_deref(),
            school_type: r.school_type.as_deref(),
            gender_focus: r.gender_focus.as_deref(),
            level: r.level.as_deref(),
            category: r.category.as_deref(),
            establishment_year: r.establishment_year,
            address: loc.address.as_deref(),
            city: loc.city.as_deref(),
            province: loc.province.as_deref(),
            district: loc.district.as_deref(),
            country: loc.country.as_deref(),
            postal_code: loc.postal_code.as_deref(),
            google_maps_link: loc.google_maps_link.as_deref(),
            latitude: loc.latitude,
            longitude: loc.longitude,
            email: contact.email.as_deref(),
            phone: contact.phone.as_deref(),
            phone_primary: contact.phone_primary.as_deref(),
            website: contact.website.as_deref(),
            facebook_page: contact.facebook_page.as_deref(),
            twitter_handle: contact.twitter_handle.as_deref(),
            instagram_handle: contact.instagram_handle.as_deref(),
            linkedin_page: contact.linkedin_page.as_deref(),
            principal_name: contact.principal_name.as_deref(),
            principal_email: contact.principal_email.as_deref(),
            curriculum: r.curriculum.as_deref(),
            total_students: r.counts.total_students,
            total_teachers: r.counts.total_teachers,
            total_classrooms: r.counts.total_classrooms,
            science_labs: r.counts.science_labs,
            computer_labs: r.counts.computer_labs,
            library_rooms: r.counts.library_rooms,
            playground_area: r.playground_area.as_deref(),
            sports_facilities: r.sports_facilities.as_deref(),
            has_library: f.library,
            has_science_lab: f.science_lab,
            has_computer_lab: f.computer_lab,
            has_playground: f.playground,
            has_sports_field: f.sports_field,
            has_swimming_pool: f.swimming_pool,
            has_auditorium: f.auditorium,
            has_cafeteria: f.cafeteria,
            has_health_clinic: f.health_clinic,
            has_wifi: f.wifi,
            has_smart_classes: f.smart_classes,
            hostel_facilities: f.hostel,
            transport_services: f.transport,
            fee_range: r.fee_range.as_deref(),
            scholarships_available: r.scholarships_available,
            scholarship_details: r.scholarship_details.as_deref(),
            overall_rating: r.ratings.overall,
            total_reviews: r.ratings.total_reviews,
            academic_rating: r.ratings.academic,
            facility_rating: r.ratings.facility,
            discipline_rating: r.ratings.discipline,
            created_at: r.created_at.as_deref(),
            age_years: r.derived.age_years,
            full_address: &r.derived.full_address,
            amenities: &r.derived.amenities,
            social_links: &r.derived.social_links,
            logo_url,
            banner_url,
            logo_base64,
            banner_base64,
        }
    }
}

fn data_uri(base64: &str) -> String {
    format!("data:image/jpeg;base64,{base64}")
}

/// `assets/schools.json`.
pub fn summary_json(records: &[SchoolRecord]) -> Result<String, serde_json::Error> {
    let entries: Vec<_> = records.iter().map(SummaryEntry::from_record).collect();
    to_pretty(&entries)
}

/// `assets/schools_data.json` or `assets/schools_data_base64.json`.
pub fn full_json(
    records: &[SchoolRecord],
    site: &SiteSection,
    mode: MediaMode,
) -> Result<String, serde_json::Error> {
    let entries: Vec<_> = records
        .iter()
        .map(|r| FullEntry::from_record(r, site, mode))
        .collect();
    to_pretty(&entries)
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
