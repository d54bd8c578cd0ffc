//! Domain types shared by the loader, the renderers and the JSON exports.
//!
//! A [`SchoolRecord`] is built once per eligible database row and is never
//! mutated after loading. Everything the renderers need, including the
//! derived fields, lives on the record so every artifact reads the same
//! snapshot.

use serde::{Serialize, Serializer};

/// One verified, active school as loaded from storage.
#[derive(Debug, Clone, Default)]
pub struct SchoolRecord {
    /// Opaque stable identifier; also the detail page file stem.
    pub school_id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub motto: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub description: Option<String>,

    pub school_type: Option<String>,
    pub gender_focus: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub curriculum: Option<String>,

    pub location: Location,
    pub contact: Contact,

    pub establishment_year: Option<i32>,
    pub counts: Counts,
    pub facilities: Facilities,

    pub playground_area: Option<String>,
    pub sports_facilities: Option<String>,
    pub fee_range: Option<String>,
    pub scholarships_available: bool,
    pub scholarship_details: Option<String>,

    pub ratings: Ratings,

    /// Passed through untouched from storage.
    pub created_at: Option<String>,

    pub derived: Derived,
}

#[derive(Debug, Clone, Default)]
pub struct Location {
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub google_maps_link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone_primary: Option<String>,
    pub website: Option<String>,
    pub facebook_page: Option<String>,
    pub twitter_handle: Option<String>,
    pub instagram_handle: Option<String>,
    pub linkedin_page: Option<String>,
    pub principal_name: Option<String>,
    pub principal_email: Option<String>,
}

/// Quantitative facts. Absent columns load as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub total_students: u32,
    pub total_teachers: u32,
    pub total_classrooms: u32,
    pub science_labs: u32,
    pub computer_labs: u32,
    pub library_rooms: u32,
}

/// The thirteen independent amenity flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facilities {
    pub library: bool,
    pub science_lab: bool,
    pub computer_lab: bool,
    pub playground: bool,
    pub sports_field: bool,
    pub swimming_pool: bool,
    pub auditorium: bool,
    pub cafeteria: bool,
    pub health_clinic: bool,
    pub wifi: bool,
    pub smart_classes: bool,
    pub hostel: bool,
    pub transport: bool,
}

impl Facilities {
    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Library => self.library,
            Amenity::ScienceLab => self.science_lab,
            Amenity::ComputerLab => self.computer_lab,
            Amenity::Playground => self.playground,
            Amenity::SportsField => self.sports_field,
            Amenity::SwimmingPool => self.swimming_pool,
            Amenity::Auditorium => self.auditorium,
            Amenity::Cafeteria => self.cafeteria,
            Amenity::HealthClinic => self.health_clinic,
            Amenity::Wifi => self.wifi,
            Amenity::SmartClasses => self.smart_classes,
            Amenity::Boarding => self.hostel,
            Amenity::Transport => self.transport,
        }
    }

    /// Amenities whose flag is set, in display order.
    pub fn amenities(&self) -> Vec<Amenity> {
        Amenity::ALL
            .into_iter()
            .filter(|a| self.has(*a))
            .collect()
    }
}

/// A displayable amenity. Serializes as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amenity {
    Library,
    ScienceLab,
    ComputerLab,
    Playground,
    SportsField,
    SwimmingPool,
    Auditorium,
    Cafeteria,
    HealthClinic,
    Wifi,
    SmartClasses,
    Boarding,
    Transport,
}

impl Amenity {
    pub const ALL: [Amenity; 13] = [
        Amenity::Library,
        Amenity::ScienceLab,
        Amenity::ComputerLab,
        Amenity::Playground,
        Amenity::SportsField,
        Amenity::SwimmingPool,
        Amenity::Auditorium,
        Amenity::Cafeteria,
        Amenity::HealthClinic,
        Amenity::Wifi,
        Amenity::SmartClasses,
        Amenity::Boarding,
        Amenity::Transport,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Amenity::Library => "Library",
            Amenity::ScienceLab => "Science Lab",
            Amenity::ComputerLab => "Computer Lab",
            Amenity::Playground => "Playground",
            Amenity::SportsField => "Sports Field",
            Amenity::SwimmingPool => "Swimming Pool",
            Amenity::Auditorium => "Auditorium",
            Amenity::Cafeteria => "Cafeteria",
            Amenity::HealthClinic => "Health Clinic",
            Amenity::Wifi => "WiFi",
            Amenity::SmartClasses => "Smart Classes",
            Amenity::Boarding => "Boarding",
            Amenity::Transport => "Transport",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Amenity::Library => "\u{1F4DA}",
            Amenity::ScienceLab => "\u{1F52C}",
            Amenity::ComputerLab => "\u{1F4BB}",
            Amenity::Playground => "\u{26BD}",
            Amenity::SportsField => "\u{1F3C5}",
            Amenity::SwimmingPool => "\u{1F3CA}",
            Amenity::Auditorium => "\u{1F3AD}",
            Amenity::Cafeteria => "\u{1F37D}\u{FE0F}",
            Amenity::HealthClinic => "\u{1F3E5}",
            Amenity::Wifi => "\u{1F4E1}",
            Amenity::SmartClasses => "\u{1F4A1}",
            Amenity::Boarding => "\u{1F3E0}",
            Amenity::Transport => "\u{1F68C}",
        }
    }
}

impl Serialize for Amenity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ratings {
    pub overall: f64,
    pub academic: f64,
    pub facility: f64,
    pub discipline: f64,
    pub total_reviews: u32,
}

/// Fields computed from stored columns at load time.
#[derive(Debug, Clone, Default)]
pub struct Derived {
    /// Present only when the establishment year is known.
    pub age_years: Option<i32>,
    pub full_address: String,
    pub amenities: Vec<Amenity>,
    pub social_links: SocialLinks,
    pub logo_base64: Option<String>,
    pub banner_base64: Option<String>,
}

/// Platform → URL. A key is present only if its source field was set.
///
/// Field order is the display order; serializes as a JSON object with
/// absent platforms omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps: Option<String>,
}

pub const TWITTER_BASE: &str = "https://twitter.com/";
pub const INSTAGRAM_BASE: &str = "https://instagram.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    Website,
    Facebook,
    Twitter,
    Instagram,
    Linkedin,
    Maps,
}

impl SocialPlatform {
    pub fn title(self) -> &'static str {
        match self {
            SocialPlatform::Website => "Official Website",
            SocialPlatform::Facebook => "Facebook Page",
            SocialPlatform::Twitter => "Twitter Profile",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Linkedin => "LinkedIn",
            SocialPlatform::Maps => "Google Maps",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            SocialPlatform::Website => "fas fa-globe",
            SocialPlatform::Facebook => "fab fa-facebook-f",
            SocialPlatform::Twitter => "fab fa-twitter",
            SocialPlatform::Instagram => "fab fa-instagram",
            SocialPlatform::Linkedin => "fab fa-linkedin-in",
            SocialPlatform::Maps => "fas fa-map-marked-alt",
        }
    }
}

impl SocialLinks {
    /// Build the link map from contact details and the maps link.
    ///
    /// Twitter and Instagram are stored as handles and get a fixed base URL
    /// prefix; every other platform is stored as a full URL.
    pub fn from_contact(contact: &Contact, maps_link: Option<&str>) -> Self {
        Self {
            website: contact.website.clone(),
            facebook: contact.facebook_page.clone(),
            twitter: contact
                .twitter_handle
                .as_deref()
                .map(|h| format!("{TWITTER_BASE}{h}")),
            instagram: contact
                .instagram_handle
                .as_deref()
                .map(|h| format!("{INSTAGRAM_BASE}{h}")),
            linkedin: contact.linkedin_page.clone(),
            maps: maps_link.map(str::to_string),
        }
    }

    /// Present links in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SocialPlatform, &str)> {
        [
            (SocialPlatform::Website, &self.website),
            (SocialPlatform::Facebook, &self.facebook),
            (SocialPlatform::Twitter, &self.twitter),
            (SocialPlatform::Instagram, &self.instagram),
            (SocialPlatform::Linkedin, &self.linkedin),
            (SocialPlatform::Maps, &self.maps),
        ]
        .into_iter()
        .filter_map(|(platform, url)| url.as_deref().map(|u| (platform, u)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

pub const FULL_STAR: char = '\u{2605}';
pub const HALF_STAR: char = '\u{2BEA}';
pub const EMPTY_STAR: char = '\u{2606}';

/// Five-position star breakdown of a 0–5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl Stars {
    /// `full = floor(r)`, a half star when the remainder is at least 0.5,
    /// the rest empty. Out-of-range input is clamped to `[0, 5]`.
    pub fn from_rating(rating: f64) -> Self {
        let r = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, 5.0)
        };
        let full = r.floor() as u8;
        let half = full < 5 && r - f64::from(full) >= 0.5;
        let empty = 5 - full - u8::from(half);
        Self { full, half, empty }
    }

    pub fn glyphs(&self) -> String {
        let mut out = String::with_capacity(5 * 3);
        out.extend(std::iter::repeat_n(FULL_STAR, self.full.into()));
        if self.half {
            out.push(HALF_STAR);
        }
        out.extend(std::iter::repeat_n(EMPTY_STAR, self.empty.into()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_three_point_seven() {
        let s = Stars::from_rating(3.7);
        assert_eq!(
            s,
            Stars {
                full: 3,
                half: true,
                empty: 1
            }
        );
        assert_eq!(s.glyphs(), "\u{2605}\u{2605}\u{2605}\u{2BEA}\u{2606}");
    }

    #[test]
    fn stars_zero_is_all_empty() {
        let s = Stars::from_rating(0.0);
        assert_eq!((s.full, s.half, s.empty), (0, false, 5));
    }

    #[test]
    fn stars_five_is_all_full() {
        let s = Stars::from_rating(5.0);
        assert_eq!((s.full, s.half, s.empty), (5, false, 0));
    }

    #[test]
    fn stars_below_half_threshold_rounds_down() {
        let s = Stars::from_rating(4.49);
        assert_eq!((s.full, s.half, s.empty), (4, false, 1));
    }

    #[test]
    fn stars_always_five_positions() {
        for tenth in 0..=50 {
            let s = Stars::from_rating(f64::from(tenth) / 10.0);
            assert_eq!(s.full + u8::from(s.half) + s.empty, 5, "rating {tenth}/10");
            assert_eq!(s.glyphs().chars().count(), 5);
        }
    }

    #[test]
    fn stars_clamp_out_of_range() {
        assert_eq!(Stars::from_rating(7.2).full, 5);
        assert_eq!(Stars::from_rating(-1.0).empty, 5);
        assert_eq!(Stars::from_rating(f64::NAN).empty, 5);
    }

    #[test]
    fn amenities_follow_fixed_order() {
        let facilities = Facilities {
            transport: true,
            library: true,
            wifi: true,
            ..Default::default()
        };
        assert_eq!(
            facilities.amenities(),
            vec![Amenity::Library, Amenity::Wifi, Amenity::Transport]
        );
    }

    #[test]
    fn amenity_serializes_as_label() {
        let json = serde_json::to_string(&vec![Amenity::Boarding, Amenity::ScienceLab]).unwrap();
        assert_eq!(json, r#"["Boarding","Science Lab"]"#);
    }

    #[test]
    fn social_links_prefix_handles() {
        let contact = Contact {
            twitter_handle: Some("greenwood".into()),
            instagram_handle: Some("greenwood.ig".into()),
            facebook_page: Some("https://facebook.com/greenwood".into()),
            ..Default::default()
        };
        let links = SocialLinks::from_contact(&contact, None);
        assert_eq!(
            links.twitter.as_deref(),
            Some("https://twitter.com/greenwood")
        );
        assert_eq!(
            links.instagram.as_deref(),
            Some("https://instagram.com/greenwood.ig")
        );
        assert_eq!(
            links.facebook.as_deref(),
            Some("https://facebook.com/greenwood")
        );
        assert!(links.website.is_none());
    }

    #[test]
    fn social_links_serialize_only_present_keys() {
        let contact = Contact {
            website: Some("https://school.example".into()),
            ..Default::default()
        };
        let links = SocialLinks::from_contact(&contact, Some("https://maps.example/x"));
        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(
            json,
            r#"{"website":"https://school.example","maps":"https://maps.example/x"}"#
        );
    }

    #[test]
    fn social_links_iter_in_display_order() {
        let contact = Contact {
            linkedin_page: Some("https://linkedin.example".into()),
            website: Some("https://school.example".into()),
            ..Default::default()
        };
        let links = SocialLinks::from_contact(&contact, None);
        let platforms: Vec<_> = links.iter().map(|(p, _)| p).collect();
        assert_eq!(
            platforms,
            vec![SocialPlatform::Website, SocialPlatform::Linkedin]
        );
        assert!(SocialLinks::default().is_empty());
    }
}
