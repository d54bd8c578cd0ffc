//! Homepage: hero, client-side filters and the first N records as preview
//! cards.

use super::{
    PageDepth, PageHead, RenderContext, base_document, card_rating, city_province, filter_attr,
    filter_script, item_list_elements, logo, search_blob, site_footer,
};
use crate::types::SchoolRecord;
use maud::{Markup, html};

/// Preview cards show at most this many amenities.
const CARD_AMENITIES: usize = 3;
/// Records listed in the homepage `ItemList` structured data.
const JSON_LD_ITEMS: usize = 5;

pub const LEVEL_OPTIONS: &[&str] = &[
    "Pre-School",
    "Primary",
    "Secondary",
    "High School",
    "College",
    "University",
    "Mixed",
];
pub const TYPE_OPTIONS: &[&str] = &["Day", "Boarding", "Mixed"];
pub const GENDER_OPTIONS: &[&str] = &["Mixed", "Boys Only", "Girls Only"];
pub const CURRICULUM_OPTIONS: &[&str] = &[
    "Competence-Based Learning",
    "Heritage-Based Education",
    "STEM Bias",
    "British",
    "American",
    "International Baccalaureate",
];

/// `"Showing {shown} of {total} institutions"`.
pub fn count_label(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} institutions")
}

/// Renders `index.html`.
pub fn render_home(ctx: &RenderContext<'_>, records: &[SchoolRecord], featured: usize) -> Markup {
    let total = records.len();
    let shown = &records[..featured.min(total)];
    let description = format!(
        "{}. Browse {} verified schools, colleges and universities.",
        ctx.site.tagline, total
    );
    let json_ld = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": ctx.site.title,
        "description": ctx.site.tagline,
        "url": ctx.site.url_for(""),
        "numberOfItems": total,
        "itemListElement": item_list_elements(ctx.site, records, JSON_LD_ITEMS),
    });
    let title = format!("{} | {}", ctx.site.title, ctx.site.tagline);
    let head = PageHead {
        title: &title,
        description: &description,
        path: "",
        json_ld: vec![json_ld],
    };

    let content = html! {
        section.hero {
            div.container {
                h1 { (ctx.site.title) }
                p.hero-tagline { (ctx.site.tagline) }
                div.search-box {
                    i.fas.fa-search {}
                    input id="searchInput" type="search"
                        placeholder="Search by name, city, province or curriculum..."
                        aria-label="Search schools";
                }
            }
        }
        main.container {
            section.filters {
                (filter_select("level", "All Levels", LEVEL_OPTIONS))
                (filter_select("type", "All Types", TYPE_OPTIONS))
                (filter_select("gender", "All Genders", GENDER_OPTIONS))
                (filter_select("curriculum", "All Curricula", CURRICULUM_OPTIONS))
            }
            p.schools-count id="schoolsCount" data-total=(total) data-label="institutions" {
                (count_label(shown.len(), total))
            }
            @if records.is_empty() {
                div.empty-state {
                    i.fas.fa-school {}
                    p { "No institutions are listed yet." }
                }
            }
            div.schools-grid id="schoolsGrid" {
                @for record in shown {
                    (preview_card(record))
                }
            }
            div.view-all {
                a.btn.btn-primary href="schools/all.html" {
                    i.fas.fa-list {} " View All Schools (" (total) " Total)"
                }
            }
        }
        (site_footer(ctx, PageDepth::Root, None))
        (filter_script())
    };

    base_document(ctx, &head, PageDepth::Root, content)
}

/// A `<select>` bound to the card attribute `data-{key}`.
pub(super) fn filter_select(key: &str, all_label: &str, options: &[&str]) -> Markup {
    html! {
        select.filter-select data-filter=(key) aria-label=(all_label) {
            option value="" { (all_label) }
            @for option in options {
                option value=(option.to_lowercase()) { (option) }
            }
        }
    }
}

fn preview_card(record: &SchoolRecord) -> Markup {
    let search = search_blob([
        Some(record.name.as_str()),
        record.location.city.as_deref(),
        record.location.province.as_deref(),
        record.curriculum.as_deref(),
    ]);
    let location = city_province(record);
    html! {
        article.school-card
            data-school-id=(record.school_id)
            data-level=(filter_attr(record.level.as_deref()))
            data-type=(filter_attr(record.school_type.as_deref()))
            data-gender=(filter_attr(record.gender_focus.as_deref()))
            data-curriculum=(filter_attr(record.curriculum.as_deref()))
            data-rating=(record.ratings.overall)
            data-search=(search)
        {
            div.card-header {
                div.card-logo { (logo(record, "card-logo-img")) }
                div {
                    h3.card-title { (record.name) }
                    @if !location.is_empty() {
                        p.card-location { i.fas.fa-map-marker-alt {} " " (location) }
                    }
                }
            }
            div.card-tags {
                @if let Some(level) = &record.level { span.tag { (level) } }
                @if let Some(kind) = &record.school_type { span.tag { (kind) } }
                @if let Some(curriculum) = &record.curriculum { span.tag { (curriculum) } }
            }
            (card_rating(record))
            @if !record.derived.amenities.is_empty() {
                ul.card-amenities {
                    @for amenity in record.derived.amenities.iter().take(CARD_AMENITIES) {
                        li { (amenity.icon()) " " (amenity.label()) }
                    }
                }
            }
            div.card-footer {
                @if let Some(year) = record.establishment_year {
                    span.card-established { "Est. " (year) }
                }
                a.card-link href={ "schools/" (record.school_id) ".html" } {
                    "View Complete Profile " i.fas.fa-arrow-right {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::ctx;
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn fifteen_records_show_twelve_cards() {
        let records = numbered_records(15);
        let html = render_home(&ctx(15), &records, 12).into_string();
        assert_eq!(count_occurrences(&html, "<article class=\"school-card\""), 12);
        assert!(html.contains("Showing 12 of 15 institutions"));
        assert!(html.contains("School 12"));
        assert!(!html.contains("School 13"));
        assert!(html.contains("View All Schools (15 Total)"));
    }

    #[test]
    fn fewer_records_than_featured() {
        let records = numbered_records(4);
        let html = render_home(&ctx(4), &records, 12).into_string();
        assert_eq!(count_occurrences(&html, "<article class=\"school-card\""), 4);
        assert!(html.contains("Showing 4 of 4 institutions"));
    }

    #[test]
    fn zero_records_render_empty_state() {
        let html = render_home(&ctx(0), &[], 12).into_string();
        assert!(html.contains("Showing 0 of 0 institutions"));
        assert!(html.contains("No institutions are listed yet."));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn card_carries_filter_attributes() {
        let record = full_record("ghs", "Greenwood High");
        let html = render_home(&ctx(1), std::slice::from_ref(&record), 12).into_string();
        assert!(html.contains(r#"data-school-id="ghs""#));
        assert!(html.contains(r#"data-level="secondary""#));
        assert!(html.contains(r#"data-type="boarding""#));
        assert!(html.contains(r#"data-gender="co-ed""#));
        assert!(html.contains(r#"data-curriculum="cambridge""#));
        assert!(html.contains(r#"data-rating="4.3""#));
        assert!(html.contains(r#"data-search="greenwood high harare harare metropolitan cambridge""#));
        assert!(html.contains(r#"href="schools/ghs.html""#));
        assert!(html.contains("Est. 1962"));
    }

    #[test]
    fn card_shows_first_three_amenities() {
        let record = full_record("ghs", "Greenwood High");
        let html = render_home(&ctx(1), std::slice::from_ref(&record), 12).into_string();
        assert!(html.contains("Library"));
        assert!(html.contains("Science Lab"));
        assert!(html.contains("Computer Lab"));
        assert!(!html.contains("Sports Field"));
    }

    #[test]
    fn unrated_card_has_no_rating_block() {
        let records = numbered_records(1);
        let html = render_home(&ctx(1), &records, 12).into_string();
        assert!(!html.contains("card-rating"));
        assert!(!html.contains("Est."));
    }

    #[test]
    fn filter_options_are_lowercase_values() {
        let html = filter_select("gender", "All Genders", GENDER_OPTIONS).into_string();
        assert!(html.contains(r#"<option value="boys only">Boys Only</option>"#));
        assert!(html.contains(r#"data-filter="gender""#));
    }

    #[test]
    fn embeds_item_list_of_first_five() {
        let records = numbered_records(8);
        let html = render_home(&ctx(8), &records, 12).into_string();
        assert!(html.contains(r#""@type":"ItemList""#));
        assert_eq!(count_occurrences(&html, r#""@type":"ListItem""#), 5);
        assert!(html.contains(r#""numberOfItems":8"#));
    }
}
