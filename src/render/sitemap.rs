//! `sitemap.xml`: the homepage, the listing page and one entry per record.

use super::detail::page_path;
use super::listing;
use crate::config::SiteConfig;
use crate::types::SchoolRecord;
use maud::{Markup, PreEscaped, html};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Entries in output order: homepage, listing, then records in name order.
pub fn entries(config: &SiteConfig, records: &[SchoolRecord]) -> Vec<SitemapEntry> {
    let site = &config.site;
    let mut out = vec![
        SitemapEntry {
            loc: site.url_for(""),
            changefreq: "weekly",
            priority: "1.0",
        },
        SitemapEntry {
            loc: site.url_for(listing::PAGE_PATH),
            changefreq: "weekly",
            priority: "0.9",
        },
    ];
    out.extend(records.iter().map(|r| SitemapEntry {
        loc: site.url_for(&page_path(r)),
        changefreq: "monthly",
        priority: "0.8",
    }));
    out
}

/// Renders the sitemap document. `<lastmod>` appears only when configured.
pub fn render_sitemap(config: &SiteConfig, records: &[SchoolRecord]) -> Markup {
    let lastmod = config.sitemap.lastmod.as_deref();
    html! {
        (PreEscaped(XML_DECLARATION))
        "\n"
        urlset xmlns=(SITEMAP_NS) {
            @for entry in entries(config, records) {
                "\n  "
                url {
                    loc { (entry.loc) }
                    @if let Some(date) = lastmod {
                        lastmod { (date) }
                    }
                    changefreq { (entry.changefreq) }
                    priority { (entry.priority) }
                }
            }
            "\n"
        }
        "\n"
    }
}
