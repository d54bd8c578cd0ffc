//! "All schools" listing: stat cards, location/level/type/rating filters,
//! sorting, and one card per record.

use super::home::{LEVEL_OPTIONS, TYPE_OPTIONS, count_label, filter_select};
use super::{
    PageDepth, PageHead, RenderContext, banner, base_document, card_rating, city_province,
    filter_attr, filter_script, format_count, item_list_elements, logo, search_blob, site_footer,
};
use crate::stats::{DirectoryStats, LocationOption, location_label, location_options};
use crate::types::SchoolRecord;
use maud::{Markup, html};

pub const PAGE_PATH: &str = "schools/all.html";

/// Amenity labels folded into each card's search text.
const SEARCH_AMENITIES: usize = 2;
/// Records listed in the listing `ItemList` structured data.
const JSON_LD_ITEMS: usize = 10;

/// Shown in the "oldest institution" stat card when no record has a year.
pub const NO_YEAR: &str = "\u{2014}";

const RATING_OPTIONS: &[(&str, &str)] = &[
    ("0", "Any Rating"),
    ("3", "3.0+ Stars"),
    ("4", "4.0+ Stars"),
    ("4.5", "4.5+ Stars"),
];

const SORT_OPTIONS: &[(&str, &str)] = &[
    ("name", "Name (A-Z)"),
    ("name-desc", "Name (Z-A)"),
    ("rating", "Highest Rating"),
    ("students", "Most Students"),
    ("established", "Newest First"),
    ("established-desc", "Oldest First"),
];

/// Renders `schools/all.html`.
pub fn render_listing(ctx: &RenderContext<'_>, records: &[SchoolRecord]) -> Markup {
    let stats = DirectoryStats::from_records(records);
    let locations = location_options(records);
    let total = records.len();

    let title = format!("All Schools | {}", ctx.site.title);
    let description = format!(
        "Complete directory of {total} verified educational institutions. \
         Filter by location, level, type and rating."
    );
    let json_ld = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": format!("All Schools - {}", ctx.site.title),
        "url": ctx.site.url_for(PAGE_PATH),
        "numberOfItems": total,
        "itemListElement": item_list_elements(ctx.site, records, JSON_LD_ITEMS),
    });
    let head = PageHead {
        title: &title,
        description: &description,
        path: PAGE_PATH,
        json_ld: vec![json_ld],
    };

    let content = html! {
        section.page-hero {
            div.container {
                h1 { "All Educational Institutions" }
                p { "Browse, filter and compare every verified school in the directory." }
            }
        }
        main.container {
            (stat_cards(&stats))
            section.enhanced-search {
                div.search-header {
                    h2.search-title { "Find Schools" }
                    button.reset-btn id="resetFilters" type="button" {
                        i.fas.fa-redo {} " Reset Filters"
                    }
                }
                div.search-box {
                    i.fas.fa-search {}
                    input id="searchInput" type="search"
                        placeholder="Search by school name, location, curriculum, facilities, or keywords..."
                        aria-label="Search schools";
                }
                div.advanced-filters {
                    (location_select(&locations))
                    (filter_select("level", "All Levels", LEVEL_OPTIONS))
                    (filter_select("type", "All Types", TYPE_OPTIONS))
                    select.filter-select id="ratingFilter" aria-label="Minimum Rating" {
                        @for (value, label) in RATING_OPTIONS {
                            option value=(value) { (label) }
                        }
                    }
                }
            }
            section.schools-grid-container {
                div.grid-header {
                    h2.grid-title { "All Educational Institutions (" (total) " Total)" }
                    select.sort-select id="sortSelect" aria-label="Sort by" {
                        @for (value, label) in SORT_OPTIONS {
                            option value=(value) { (label) }
                        }
                    }
                }
                p.schools-count id="schoolsCount" data-total=(total) data-label="institutions" {
                    (count_label(total, total))
                }
                @if records.is_empty() {
                    div.empty-state {
                        i.fas.fa-school {}
                        p { "No institutions are listed yet." }
                    }
                }
                div.schools-grid id="schoolsGrid" {
                    @for record in records {
                        (listing_card(record))
                    }
                }
            }
        }
        (site_footer(ctx, PageDepth::Schools, None))
        (filter_script())
    };

    base_document(ctx, &head, PageDepth::Schools, content)
}

fn stat_cards(stats: &DirectoryStats) -> Markup {
    let oldest = stats
        .oldest_established
        .map(|y| y.to_string())
        .unwrap_or_else(|| NO_YEAR.to_string());
    html! {
        section.stats-overview {
            (stat_card("fa-school", &stats.total_schools.to_string(), "Total Institutions"))
            (stat_card("fa-graduation-cap", &format_count(stats.total_students), "Total Students"))
            (stat_card("fa-chalkboard-teacher", &format_count(stats.total_teachers), "Teaching Staff"))
            (stat_card("fa-landmark", &oldest, "Oldest Institution"))
        }
    }
}

fn stat_card(icon: &str, number: &str, label: &str) -> Markup {
    html! {
        div.stat-card {
            div.stat-icon { i class={ "fas " (icon) } {} }
            div.stat-number { (number) }
            div.stat-label { (label) }
        }
    }
}

fn location_select(options: &[LocationOption]) -> Markup {
    html! {
        select.filter-select data-filter="location" aria-label="All Locations" {
            option value="" { "All Locations" }
            @for option in options {
                option value=(option.value) { (option.label) }
            }
        }
    }
}

fn listing_card(record: &SchoolRecord) -> Markup {
    let amenity_sample: Vec<&str> = record
        .derived
        .amenities
        .iter()
        .take(SEARCH_AMENITIES)
        .map(|a| a.label())
        .collect();
    let search = search_blob(
        [
            Some(record.name.as_str()),
            record.location.city.as_deref(),
            record.location.province.as_deref(),
            record.curriculum.as_deref(),
            record.school_type.as_deref(),
        ]
        .into_iter()
        .chain(amenity_sample.into_iter().map(Some)),
    );
    let location_value = location_label(record)
        .map(|l| l.to_lowercase())
        .unwrap_or_default();
    let established = record
        .establishment_year
        .map(|y| y.to_string())
        .unwrap_or_default();
    let location = city_province(record);

    html! {
        article.school-card
            data-name=(record.name.to_lowercase())
            data-location=(location_value)
            data-level=(filter_attr(record.level.as_deref()))
            data-type=(filter_attr(record.school_type.as_deref()))
            data-gender=(filter_attr(record.gender_focus.as_deref()))
            data-curriculum=(filter_attr(record.curriculum.as_deref()))
            data-rating=(record.ratings.overall)
            data-students=(record.counts.total_students)
            data-established=(established)
            data-search=(search)
        {
            div.school-card-header {
                (banner(record, "school-banner"))
                div.school-logo-container { (logo(record, "school-logo")) }
                @if let Some(kind) = &record.school_type {
                    div.school-type-badge { (kind) }
                }
            }
            div.school-card-body {
                h3.school-name { (record.name) }
                @if !location.is_empty() {
                    div.school-location {
                        i.fas.fa-map-marker-alt {}
                        span { (location) }
                    }
                }
                div.school-details {
                    div.detail-item {
                        i.fas.fa-graduation-cap {}
                        span { (record.level.as_deref().unwrap_or("N/A")) }
                    }
                    div.detail-item {
                        i.fas.fa-users {}
                        span { (format_count(record.counts.total_students.into())) " Students" }
                    }
                    @if let Some(year) = record.establishment_year {
                        div.detail-item {
                            i.fas.fa-landmark {}
                            span { "Est. " (year) }
                        }
                    }
                    div.detail-item {
                        i.fas.fa-book {}
                        span { (record.curriculum.as_deref().unwrap_or("Various")) }
                    }
                }
                (card_rating(record))
                a.view-btn href={ (record.school_id) ".html" } {
                    i.fas.fa-external-link-alt {} " View Complete Profile"
                }
            }
        }
    }
}
