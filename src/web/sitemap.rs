//! `sitemap.xml`: the fixed marketing routes plus one entry per active product.

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use crate::config::StorefrontConfig;
use crate::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

const STATIC_ROUTES: [(&str, ChangeFrequency, f32); 5] = [
    ("/", ChangeFrequency::Weekly, 1.0),
    ("/san-pham", ChangeFrequency::Weekly, 0.9),
    ("/gioi-thieu", ChangeFrequency::Monthly, 0.7),
    ("/may-do", ChangeFrequency::Monthly, 0.8),
    ("/lien-he", ChangeFrequency::Monthly, 0.6),
];

pub fn static_entries(config: &StorefrontConfig, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    STATIC_ROUTES
        .iter()
        .map(|&(path, change_frequency, priority)| SitemapEntry {
            loc: config.site_link(path),
            last_modified: now,
            change_frequency,
            priority,
        })
        .collect()
}

pub fn product_entries(products: &[Product], config: &StorefrontConfig, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    products
        .iter()
        .filter(|p| p.is_active())
        .map(|p| SitemapEntry {
            loc: config.site_link(&format!("/san-pham/{}", p.id)),
            last_modified: p
                .updated_at
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.with_timezone(&Utc))
                .unwrap_or(now),
            change_frequency: ChangeFrequency::Weekly,
            priority: 0.8,
        })
        .collect()
}

pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "<url>\n<loc>{}</loc>\n<lastmod>{}</lastmod>\n<changefreq>{}</changefreq>\n<priority>{:.1}</priority>\n</url>\n",
            escape_xml(&entry.loc),
            entry.last_modified.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            entry.change_frequency.as_str(),
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
