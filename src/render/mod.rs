//! HTML rendering.
//!
//! Every page is a pure function from records (plus a [`RenderContext`]) to
//! [`Markup`]. Nothing here touches the filesystem; [`crate::generate`]
//! decides where the output goes.
//!
//! ## Pages
//!
//! - [`home`]: homepage with the first N records as preview cards
//! - [`listing`]: every record as a card, stat cards, location filter
//! - [`detail`]: one full profile page per record
//! - [`sitemap`]: `sitemap.xml`
//!
//! ## Escaping
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/), so every
//! interpolated field is escaped. The only raw insertions are the embedded
//! filter script and JSON-LD blocks, which go through [`json_ld`].

pub mod detail;
pub mod home;
pub mod listing;
pub mod sitemap;

use crate::config::SiteSection;
use crate::types::{SchoolRecord, Stars};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const FILTERS_JS: &str = include_str!("../../static/filters.js");
pub const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

/// Inputs shared by every page of one build.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub site: &'a SiteSection,
    /// Date shown in the footer build stamp. The only run-dependent content.
    pub build_date: NaiveDate,
    /// Cache-busting token appended to the stylesheet URL.
    pub css_version: &'a str,
    /// Size of the whole directory, shown in navigation and footers.
    pub total_schools: usize,
}

/// Where a page lives relative to the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDepth {
    /// `index.html`
    Root,
    /// `schools/*.html`
    Schools,
}

impl PageDepth {
    /// Relative prefix from the page back to the output root.
    pub fn root(self) -> &'static str {
        match self {
            PageDepth::Root => "",
            PageDepth::Schools => "../",
        }
    }
}

/// Per-page `<head>` metadata.
pub struct PageHead<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Site-relative path of the page, for the canonical and og:url tags.
    pub path: &'a str,
    pub json_ld: Vec<serde_json::Value>,
}

// ============================================================================
// Document shell
// ============================================================================

/// Renders the base HTML document structure.
pub fn base_document(
    ctx: &RenderContext<'_>,
    head: &PageHead<'_>,
    depth: PageDepth,
    content: Markup,
) -> Markup {
    let root = depth.root();
    let canonical = ctx.site.url_for(head.path);
    let og_image = ctx.site.url_for("assets/images/og-image.jpg");
    html! {
        (DOCTYPE)
        html lang="en" data-theme="light" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (head.title) }
                meta name="description" content=(head.description);
                meta name="robots" content="index, follow";
                link rel="canonical" href=(canonical);
                meta property="og:type" content="website";
                meta property="og:url" content=(canonical);
                meta property="og:title" content=(head.title);
                meta property="og:description" content=(head.description);
                meta property="og:image" content=(og_image);
                @for block in &head.json_ld {
                    (json_ld(block))
                }
                link rel="stylesheet" href=(FONT_AWESOME_CSS);
                link rel="stylesheet" href={ (root) "assets/style.css?v=" (ctx.css_version) };
            }
            body {
                (site_header(ctx, depth))
                (content)
            }
        }
    }
}

/// Top bar with the site name and the two directory entry points.
fn site_header(ctx: &RenderContext<'_>, depth: PageDepth) -> Markup {
    let root = depth.root();
    html! {
        header.site-header {
            nav.navbar.container {
                a.logo href={ (root) "index.html" } {
                    i.fas.fa-graduation-cap {}
                    span { (ctx.site.title) }
                }
                div.nav-links {
                    a.nav-link href={ (root) "index.html" } {
                        i.fas.fa-home {} " Home"
                    }
                    a.nav-link href={ (root) "schools/all.html" } {
                        i.fas.fa-list {} " All Schools (" (ctx.total_schools) ")"
                    }
                }
            }
        }
    }
}

/// Page footer. `extra` lines go above the build stamp.
///
/// The build stamp paragraph is the only part of any page that changes
/// between runs over the same data.
pub fn site_footer(ctx: &RenderContext<'_>, depth: PageDepth, extra: Option<Markup>) -> Markup {
    let root = depth.root();
    html! {
        footer.footer {
            div.container {
                div.footer-content {
                    div.footer-section {
                        h3 { (ctx.site.title) }
                        div.manufacturer-logo {
                            img src={ (root) "assets/images/manufacturer_dark.png" } alt="Manufacturer logo";
                        }
                    }
                    div.footer-section {
                        h3 { "Navigation" }
                        ul.footer-links {
                            li { a href={ (root) "index.html" } { i.fas.fa-home {} " Home Directory" } }
                            li { a href={ (root) "schools/all.html" } { i.fas.fa-list {} " All Schools (" (ctx.total_schools) ")" } }
                            li { a href={ "mailto:" (ctx.site.support_email) } { i.fas.fa-question-circle {} " Report Issue" } }
                        }
                    }
                }
                div.footer-bottom {
                    p { "\u{a9} " (ctx.site.title) }
                    @if let Some(extra) = extra {
                        (extra)
                    }
                    p.build-stamp { "Last updated: " (ctx.build_date.format("%Y-%m-%d").to_string()) }
                }
            }
        }
    }
}

/// Embed a JSON-LD block. `</` is escaped so the payload cannot close the
/// surrounding `<script>` element.
pub fn json_ld(value: &serde_json::Value) -> Markup {
    let json = value.to_string().replace("</", "<\\/");
    html! {
        script type="application/ld+json" { (PreEscaped(json)) }
    }
}

/// The client-side search/filter/sort script.
pub fn filter_script() -> Markup {
    html! {
        script { (PreEscaped(FILTERS_JS)) }
    }
}

// ============================================================================
// Shared card pieces
// ============================================================================

/// Star glyphs for a rating, always five positions wide.
pub fn star_glyphs(rating: f64) -> Markup {
    let stars = Stars::from_rating(rating);
    html! {
        span.stars aria-label={ (format_rating(rating)) " out of 5" } { (stars.glyphs()) }
    }
}

/// Card rating block; nothing at all for unrated schools.
pub fn card_rating(record: &SchoolRecord) -> Markup {
    let rating = record.ratings.overall;
    html! {
        @if rating > 0.0 {
            div.card-rating {
                (star_glyphs(rating))
                span.rating-text { (format_rating(rating)) "/5.0" }
            }
        }
    }
}

/// Logo image or the generic school icon.
pub fn logo(record: &SchoolRecord, class: &str) -> Markup {
    html! {
        @if let Some(data) = &record.derived.logo_base64 {
            img class=(class) src={ "data:image/jpeg;base64," (data) } alt={ (record.name) " Logo" };
        } @else {
            i.fas.fa-school {}
        }
    }
}

/// Banner image, if the record has one.
pub fn banner(record: &SchoolRecord, class: &str) -> Markup {
    html! {
        @if let Some(data) = &record.derived.banner_base64 {
            img class=(class) src={ "data:image/jpeg;base64," (data) } alt={ (record.name) " Banner" };
        }
    }
}

/// `"{city}, {province}"` with whichever parts exist.
pub fn city_province(record: &SchoolRecord) -> String {
    crate::stats::location_label(record).unwrap_or_default()
}

/// Lowercased, space-joined search text for client-side matching.
pub fn search_blob<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase filter attribute value; empty when the field is absent.
pub fn filter_attr(value: Option<&str>) -> String {
    value.map(str::to_lowercase).unwrap_or_default()
}

/// One decimal place, e.g. `4.3`.
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

/// Thousands-separated integer, e.g. `12,500`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate to at most `max` characters on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// schema.org `ListItem` entries for the first `limit` records.
pub fn item_list_elements(
    site: &SiteSection,
    records: &[SchoolRecord],
    limit: usize,
) -> Vec<serde_json::Value> {
    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, r)| {
            serde_json::json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": {
                    "@type": "EducationalOrganization",
                    "name": r.name,
                    "description": truncate_chars(
                        r.description.as_deref().unwrap_or("Educational institution"),
                        200,
                    ),
                    "url": site.url_for(&detail::page_path(r)),
                }
            })
        })
        .collect()
}
