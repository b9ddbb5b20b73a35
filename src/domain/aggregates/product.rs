//! Product listing: filter, sort and display cards.
//!
//! The catalog is small enough to load whole, so every query is answered
//! in memory over the full active set.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::domain::value_objects::{relative_image_url, Vnd};
use crate::Product;

/// Category keys the showroom filters on, with their display labels.
pub const CATEGORY_LABELS: [(&str, &str); 4] = [
    ("ao_dai_ngu_than", "Áo Dài Ngũ Thân"),
    ("ao_dai_4_ta", "Áo Dài 4 Tà"),
    ("ao_dai_2_ta", "Áo Dài 2 Tà"),
    ("phap_phuc_linen", "Pháp Phục Linen"),
];

pub fn category_label(key: &str) -> &str {
    CATEGORY_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange { pub min: i64, pub max: i64 }

impl PriceRange {
    pub const ALL: PriceRange = PriceRange { min: 0, max: 100_000_000 };

    /// Builds a range, swapping the bounds if they arrive reversed.
    pub fn new(min: i64, max: i64) -> Self {
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }

    /// Both bounds inclusive.
    pub fn contains(&self, price: i64) -> bool { self.min <= price && price <= self.max }

    /// The drawer's preset brackets, label first.
    pub fn presets() -> [(&'static str, PriceRange); 5] {
        [
            ("Tất Cả", Self::ALL),
            ("Dưới 3 Triệu", Self::new(0, 3_000_000)),
            ("3 - 5 Triệu", Self::new(3_000_000, 5_000_000)),
            ("5 - 10 Triệu", Self::new(5_000_000, 10_000_000)),
            ("Trên 10 Triệu", Self::new(10_000_000, 100_000_000)),
        ]
    }
}

impl Default for PriceRange { fn default() -> Self { Self::ALL } }

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "name")]
    Name,
}

impl FromStr for SortKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "newest" => Ok(Self::Newest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Empty means every category.
    pub category: String,
    pub price_range: PriceRange,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut selected: Vec<&Product> = products
            .iter()
            .filter(|p| p.is_active())
            .filter(|p| self.category.is_empty() || p.category == self.category)
            .filter(|p| self.price_range.contains(p.price))
            .collect();

        match self.sort {
            SortKey::Newest => selected.sort_by(|a, b| created_at(b).cmp(&created_at(a))),
            SortKey::PriceAsc => selected.sort_by_key(|p| p.price),
            SortKey::PriceDesc => selected.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Name => selected.sort_by(|a, b| compare_names(&a.name, &b.name)),
        }
        selected
    }
}

fn created_at(product: &Product) -> Option<DateTime<FixedOffset>> {
    product
        .created_at
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// =============================================================================
// Display
// =============================================================================

const EXCERPT_CHARS: usize = 200;

/// A product as the listing shows it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub price_label: String,
    pub category: String,
    pub category_label: String,
    pub image: Option<String>,
    pub secondary_image: Option<String>,
    pub excerpt: String,
}

impl ProductCard {
    pub fn from_product(product: &Product, site_domain: &str) -> Self {
        let image_at = |i: usize| product.images.get(i).filter(|u| !u.is_empty()).map(|u| relative_image_url(u, site_domain));
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            price_label: Vnd::new(product.price).to_string(),
            category: product.category.clone(),
            category_label: category_label(&product.category).to_string(),
            image: image_at(0),
            secondary_image: image_at(1),
            excerpt: excerpt(&product.description),
        }
    }
}

fn excerpt(description: &str) -> String {
    if description.chars().count() > EXCERPT_CHARS {
        let cut: String = description.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", cut)
    } else {
        description.to_string()
    }
}
