//! Per-record profile page (`schools/{school_id}.html`).

use super::{
    PageDepth, PageHead, RenderContext, banner, base_document, format_count, format_rating, logo,
    site_footer, star_glyphs, truncate_chars,
};
use crate::types::SchoolRecord;
use maud::{Markup, html};
use serde_json::json;

const META_DESCRIPTION_CHARS: usize = 155;

/// Site-relative path of a record's profile page.
pub fn page_path(record: &SchoolRecord) -> String {
    format!("schools/{}.html", record.school_id)
}

/// Width of a rating bar: `rating * 20` percent, clamped to `0..=100`.
pub fn bar_width(rating: f64) -> f64 {
    if rating.is_nan() {
        return 0.0;
    }
    (rating * 20.0).clamp(0.0, 100.0)
}

/// Text for the scholarship row, or `None` to omit the row.
pub fn scholarship_text(record: &SchoolRecord) -> Option<String> {
    match (record.scholarships_available, &record.scholarship_details) {
        (true, Some(details)) => Some(format!("Available: {details}")),
        (true, None) => Some("Available".to_string()),
        (false, Some(_)) => Some("Not available".to_string()),
        (false, None) => None,
    }
}

fn meta_description(record: &SchoolRecord) -> String {
    let text = match record.description.as_deref().or(record.mission.as_deref()) {
        Some(text) => text.to_string(),
        None => format!(
            "Detailed profile of {} educational institution. Find information about \
             curriculum, facilities, location, and contact details.",
            record.name
        ),
    };
    truncate_chars(&text, META_DESCRIPTION_CHARS).to_string()
}

/// schema.org `EducationalOrganization` for the page's JSON-LD block.
pub fn structured_data(ctx: &RenderContext<'_>, record: &SchoolRecord) -> serde_json::Value {
    let loc = &record.location;
    let description = record.description.clone().unwrap_or_else(|| {
        let place = crate::stats::location_label(record).unwrap_or_default();
        format!("Educational institution in {place}")
    });
    let mut org = json!({
        "@context": "https://schema.org",
        "@type": "EducationalOrganization",
        "name": record.name,
        "description": description,
        "url": ctx.site.url_for(&page_path(record)),
        "address": {
            "@type": "PostalAddress",
            "streetAddress": loc.address,
            "addressLocality": loc.city,
            "addressRegion": loc.province,
            "postalCode": loc.postal_code,
            "addressCountry": loc.country.as_deref().unwrap_or("ZW"),
        },
        "telephone": record.contact.phone_primary.as_ref().or(record.contact.phone.as_ref()),
        "email": record.contact.email,
        "foundingDate": record.establishment_year.map(|y| y.to_string()),
        "numberOfStudents": record.counts.total_students,
        "numberOfEmployees": record.counts.total_teachers,
        "educationalLevel": record.level,
        "curriculum": record.curriculum,
    });
    if record.ratings.overall > 0.0 {
        org["aggregateRating"] = json!({
            "@type": "AggregateRating",
            "ratingValue": format_rating(record.ratings.overall),
            "reviewCount": record.ratings.total_reviews,
        });
    }
    org
}

/// Renders one profile page.
pub fn render_detail(ctx: &RenderContext<'_>, record: &SchoolRecord) -> Markup {
    let title = format!("{} - School Profile | {}", record.name, ctx.site.title);
    let description = meta_description(record);
    let path = page_path(record);
    let head = PageHead {
        title: &title,
        description: &description,
        path: &path,
        json_ld: vec![structured_data(ctx, record)],
    };

    let profile_id = html! {
        p.profile-id { "Profile ID: " (record.school_id) }
    };

    let content = html! {
        (profile_header(record))
        main.container {
            div.main-content {
                div.left-column {
                    (about_section(record))
                    (academic_section(record))
                    (facilities_section(record))
                }
                div.right-column {
                    (rating_section(record))
                    (contact_section(record))
                    (location_section(record))
                    (key_facts_section(record))
                }
            }
        }
        (site_footer(ctx, PageDepth::Schools, Some(profile_id)))
    };

    base_document(ctx, &head, PageDepth::Schools, content)
}

fn profile_header(record: &SchoolRecord) -> Markup {
    let counts = &record.counts;
    html! {
        section.school-header {
            (banner(record, "school-banner"))
            div.container {
                div.school-basic-info {
                    div.school-logo { (logo(record, "school-logo-img")) }
                    div.school-title-section {
                        h1 { (record.name) }
                        @if let Some(motto) = &record.motto {
                            p.school-motto { "\u{201C}" (motto) "\u{201D}" }
                        }
                        @if let Some(short) = &record.short_name {
                            p.school-short-name { (short) }
                        }
                        div.school-tags {
                            @if let Some(kind) = &record.school_type { span.school-tag { (kind) " School" } }
                            @if let Some(gender) = &record.gender_focus { span.school-tag { (gender) } }
                            @if let Some(level) = &record.level { span.school-tag { (level) } }
                            @if let Some(curriculum) = &record.curriculum { span.school-tag { (curriculum) } }
                            @if let Some(year) = record.establishment_year { span.school-tag { "Est. " (year) } }
                        }
                    }
                }
                div.school-stats {
                    @if let Some(year) = record.establishment_year {
                        (stat_item(&year.to_string(), "Established"))
                    }
                    (stat_item(&format_count(counts.total_students.into()), "Students"))
                    (stat_item(&format_count(counts.total_teachers.into()), "Teaching Staff"))
                    (stat_item(&format_count(counts.total_classrooms.into()), "Classrooms"))
                    @if counts.science_labs > 0 {
                        (stat_item(&counts.science_labs.to_string(), "Science Labs"))
                    }
                    @if counts.computer_labs > 0 {
                        (stat_item(&counts.computer_labs.to_string(), "Computer Labs"))
                    }
                }
            }
        }
    }
}

fn stat_item(value: &str, label: &str) -> Markup {
    html! {
        div.stat-item {
            div.stat-value { (value) }
            div.stat-label { (label) }
        }
    }
}

fn info_item(icon: &str, label: &str, value: &str) -> Markup {
    html! {
        div.info-item {
            div.info-label { i class={ "fas " (icon) } {} " " (label) }
            div.info-value { (value) }
        }
    }
}

fn about_section(record: &SchoolRecord) -> Markup {
    html! {
        section.section id="about" {
            h2.section-title { i.fas.fa-info-circle {} " About " (record.name) }
            div.info-grid {
                @if let Some(mission) = &record.mission { (info_item("fa-bullseye", "Mission", mission)) }
                @if let Some(vision) = &record.vision { (info_item("fa-eye", "Vision", vision)) }
                @if let Some(desc) = &record.description { (info_item("fa-align-left", "Description", desc)) }
            }
        }
    }
}

fn academic_section(record: &SchoolRecord) -> Markup {
    let students = record.counts.total_students;
    html! {
        section.section id="academics" {
            h2.section-title { i.fas.fa-graduation-cap {} " Academic Program" }
            div.info-grid {
                @if let Some(curriculum) = &record.curriculum {
                    (info_item("fa-book-open", "Curriculum System", curriculum))
                }
                @if students > 0 {
                    (info_item("fa-user-graduate", "Student Capacity", &format_count(students.into())))
                }
                @if let Some(fee) = &record.fee_range {
                    (info_item("fa-money-bill-wave", "Fee Structure", fee))
                }
                @if let Some(text) = scholarship_text(record) {
                    (info_item("fa-award", "Scholarship Program", &text))
                }
            }
        }
    }
}

fn facilities_section(record: &SchoolRecord) -> Markup {
    let counts = &record.counts;
    html! {
        section.section id="facilities" {
            h2.section-title { i.fas.fa-building {} " Campus Facilities" }
            @if record.derived.amenities.is_empty() {
                p.muted { "No facilities listed." }
            } @else {
                div.amenities-grid {
                    @for amenity in &record.derived.amenities {
                        div.amenity {
                            span.amenity-icon { (amenity.icon()) }
                            span { (amenity.label()) }
                        }
                    }
                }
            }
            div.info-grid {
                @if counts.science_labs > 0 {
                    (info_item("fa-flask", "Science Laboratories", &format!("{} fully equipped labs", counts.science_labs)))
                }
                @if counts.computer_labs > 0 {
                    (info_item("fa-desktop", "Computer Laboratories", &format!("{} labs with modern equipment", counts.computer_labs)))
                }
                @if counts.library_rooms > 0 {
                    (info_item("fa-book", "Library Resources", &format!("{} library rooms", counts.library_rooms)))
                }
                @if let Some(area) = &record.playground_area {
                    (info_item("fa-tree", "Playground Area", area))
                }
                @if let Some(sports) = &record.sports_facilities {
                    (info_item("fa-running", "Sports Facilities", sports))
                }
                @if record.facilities.transport {
                    (info_item("fa-bus", "Transport Services", "Available"))
                }
                @if record.facilities.hostel {
                    (info_item("fa-bed", "Boarding Facilities", "Available"))
                }
            }
        }
    }
}

fn rating_section(record: &SchoolRecord) -> Markup {
    let ratings = &record.ratings;
    let has_breakdown = ratings.academic > 0.0 || ratings.facility > 0.0 || ratings.discipline > 0.0;
    html! {
        section.section id="rating" {
            h2.section-title { i.fas.fa-star {} " Institutional Rating" }
            div.rating-main {
                @if ratings.overall > 0.0 {
                    div.rating-stars { (star_glyphs(ratings.overall)) }
                    div.rating-numbers {
                        div.rating-value { (format_rating(ratings.overall)) "/5.0" }
                        div.rating-count { "Based on " (ratings.total_reviews) " verified reviews" }
                    }
                } @else {
                    div.rating-stars { (star_glyphs(0.0)) }
                    div.rating-numbers {
                        div.rating-value { "No ratings yet" }
                        div.rating-count { "Be the first to review this institution" }
                    }
                }
            }
            @if has_breakdown {
                div.rating-breakdown {
                    (rating_bar("Academic", ratings.academic))
                    (rating_bar("Facilities", ratings.facility))
                    (rating_bar("Discipline", ratings.discipline))
                }
            }
        }
    }
}

fn rating_bar(label: &str, value: f64) -> Markup {
    let style = format!("width: {:.1}%", bar_width(value));
    html! {
        div.rating-bar {
            span.rating-label { (label) }
            div.bar-container { div.bar-fill style=(style) {} }
            span.rating-bar-value { (format_rating(value)) }
        }
    }
}

fn contact_method(href: Option<String>, icon: &str, heading: &str, value: &str) -> Markup {
    let body = html! {
        div.contact-icon { i class={ "fas " (icon) } {} }
        div.contact-details {
            h4 { (heading) }
            p { (value) }
        }
    };
    html! {
        @if let Some(href) = href {
            a.contact-method href=(href) { (body) }
        } @else {
            div.contact-method { (body) }
        }
    }
}

fn contact_section(record: &SchoolRecord) -> Markup {
    let contact = &record.contact;
    let address = if record.derived.full_address.is_empty() {
        "Address not specified"
    } else {
        record.derived.full_address.as_str()
    };
    html! {
        section.section id="contact" {
            h2.section-title { i.fas.fa-address-book {} " Contact Information" }
            div.contact-methods {
                @if let Some(phone) = &contact.phone_primary {
                    (contact_method(Some(format!("tel:{phone}")), "fa-phone", "Primary Phone", phone))
                }
                @if let Some(phone) = &contact.phone {
                    (contact_method(Some(format!("tel:{phone}")), "fa-phone-alt", "Alternative Phone", phone))
                }
                @if let Some(email) = &contact.email {
                    (contact_method(Some(format!("mailto:{email}")), "fa-envelope", "Email Address", email))
                }
                (contact_method(None, "fa-map-marker-alt", "Campus Address", address))
                @if let Some(principal) = &contact.principal_name {
                    (contact_method(None, "fa-user-tie", "Principal / Director", principal))
                }
                @if let Some(email) = &contact.principal_email {
                    (contact_method(Some(format!("mailto:{email}")), "fa-envelope-open-text", "Principal's Email", email))
                }
            }
            @if !record.derived.social_links.is_empty() {
                div.social-links {
                    @for (platform, url) in record.derived.social_links.iter() {
                        a.social-link href=(url) target="_blank" rel="noopener" title=(platform.title()) {
                            i class=(platform.icon_class()) {}
                        }
                    }
                }
            }
        }
    }
}

fn location_section(record: &SchoolRecord) -> Markup {
    let place = crate::stats::location_label(record);
    html! {
        section.section id="location" {
            h2.section-title { i.fas.fa-map {} " Location & Campus" }
            div.location-frame {
                @if let Some(place) = place {
                    h4 { (place) }
                }
                @if !record.derived.full_address.is_empty() {
                    p.location-address { (record.derived.full_address) }
                }
                div.map-placeholder {
                    @if let Some(maps) = &record.derived.social_links.maps {
                        a href=(maps) target="_blank" rel="noopener" {
                            "Open in Google Maps " i.fas.fa-external-link-alt {}
                        }
                    } @else {
                        p { "Map location available upon request" }
                    }
                }
            }
        }
    }
}

fn key_facts_section(record: &SchoolRecord) -> Markup {
    let na = "N/A";
    html! {
        section.section id="key-facts" {
            h2.section-title { i.fas.fa-lightbulb {} " Key Information" }
            div.quick-facts {
                (fact("fa-school", record.school_type.as_deref().unwrap_or(na)))
                (fact("fa-venus-mars", record.gender_focus.as_deref().unwrap_or(na)))
                (fact("fa-layer-group", record.category.as_deref().unwrap_or(na)))
                @if let Some(year) = record.establishment_year {
                    (fact("fa-landmark", &format!("Est. {year}")))
                }
            }
        }
    }
}

fn fact(icon: &str, text: &str) -> Markup {
    html! {
        div.fact {
            div.fact-icon { i class={ "fas " (icon) } {} }
            div.fact-text { (text) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::ctx;
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn full_record_renders_every_section() {
        let record = full_record("ghs", "Greenwood High");
        let html = render_detail(&ctx(7), &record).into_string();
        assert!(html.contains("<h1>Greenwood High</h1>"));
        assert!(html.contains("Knowledge is Light"));
        assert!(html.contains("To nurture curious minds."));
        assert!(html.contains("USD 1,200 - 1,500 per term"));
        assert!(html.contains("Available: Merit awards for top students"));
        assert!(html.contains("Rugby, cricket and athletics"));
        assert!(html.contains("Dr. T. Moyo"));
        assert!(html.contains("12 Main Rd, Avondale, Harare, Harare Metropolitan, Zimbabwe"));
        assert!(html.contains("Based on 37 verified reviews"));
        assert!(html.contains("4.3/5.0"));
        assert!(html.contains("Profile ID: ghs"));
        assert!(html.contains("All Schools (7)"));
    }

    #[test]
    fn unrated_record_shows_placeholder() {
        let record = bare_record("z", "Zenith College");
        let html = render_detail(&ctx(1), &record).into_string();
        assert!(html.contains("No ratings yet"));
        assert!(html.contains("Be the first to review this institution"));
        assert!(!html.contains("rating-breakdown"));
        assert!(!html.contains("aggregateRating"));
    }

    #[test]
    fn rating_bars_use_twenty_percent_per_point() {
        let record = full_record("ghs", "Greenwood High");
        let html = render_detail(&ctx(1), &record).into_string();
        assert!(html.contains(r#"style="width: 90.0%""#));
        assert!(html.contains(r#"style="width: 80.0%""#));
        assert!(html.contains(r#"style="width: 84.0%""#));
    }

    #[test]
    fn bar_width_clamps() {
        assert_eq!(bar_width(3.5), 70.0);
        assert_eq!(bar_width(6.0), 100.0);
        assert_eq!(bar_width(-1.0), 0.0);
        assert_eq!(bar_width(f64::NAN), 0.0);
    }

    #[test]
    fn social_links_render_in_order() {
        let record = full_record("ghs", "Greenwood High");
        let html = render_detail(&ctx(1), &record).into_string();
        let website = html.find(r#"title="Official Website""#).unwrap();
        let facebook = html.find(r#"title="Facebook Page""#).unwrap();
        let twitter = html.find(r#"href="https://twitter.com/ghs""#).unwrap();
        let maps = html.find(r#"title="Google Maps""#).unwrap();
        assert!(website < facebook && facebook < twitter && twitter < maps);
        assert!(!html.contains("Instagram"));
    }

    #[test]
    fn map_fallback_without_link() {
        let record = bare_record("z", "Zenith College");
        let html = render_detail(&ctx(1), &record).into_string();
        assert!(html.contains("Map location available upon request"));
        assert!(html.contains("Address not specified"));
    }

    #[test]
    fn scholarship_variants() {
        let mut record = bare_record("a", "A");
        assert_eq!(scholarship_text(&record), None);
        record.scholarships_available = true;
        assert_eq!(scholarship_text(&record).as_deref(), Some("Available"));
        record.scholarship_details = Some("Bursaries".into());
        assert_eq!(scholarship_text(&record).as_deref(), Some("Available: Bursaries"));
        record.scholarships_available = false;
        assert_eq!(scholarship_text(&record).as_deref(), Some("Not available"));
    }

    #[test]
    fn structured_data_aggregate_rating_only_when_rated() {
        let rated = structured_data(&ctx(1), &full_record("ghs", "Greenwood High"));
        assert_eq!(rated["aggregateRating"]["reviewCount"], 37);
        assert_eq!(rated["foundingDate"], "1962");
        assert_eq!(
            rated["url"],
            "https://hvstechzw.github.io/Scholastic-Schools-Catalog/schools/ghs.html"
        );
        let unrated = structured_data(&ctx(1), &bare_record("z", "Z"));
        assert!(unrated.get("aggregateRating").is_none());
        assert!(unrated["foundingDate"].is_null());
    }

    #[test]
    fn meta_description_truncates_and_falls_back() {
        let mut record = bare_record("a", "Alpha");
        assert!(meta_description(&record).starts_with("Detailed profile of Alpha"));
        record.mission = Some("m".repeat(300));
        assert_eq!(meta_description(&record).chars().count(), 155);
    }

    #[test]
    fn free_text_is_escaped() {
        let mut record = bare_record("x", "Evil <b>School</b>");
        record.motto = Some("\"quoted\" & <i>".into());
        let html = render_detail(&ctx(1), &record).into_string();
        assert!(html.contains("Evil &lt;b&gt;School&lt;/b&gt;"));
        assert!(html.contains("&quot;quoted&quot; &amp; &lt;i&gt;"));
    }
}
