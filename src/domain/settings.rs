//! Site settings.
//!
//! The API stores site copy, images and contact details as a flat
//! `key → value` list. [`SettingsMap`] is that list as fetched;
//! [`SiteSettings::resolve`] is the one decode step that walks every
//! fallback chain and produces typed content with defaults merged in.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::domain::value_objects::relative_image_url;
use crate::Setting;

pub const SITE_NAME: &str = "Hỷ Lạc Việt";
pub const SITE_TAGLINE: &str = "Áo Dài & Pháp Phục Cao Cấp";
pub const SITE_DESCRIPTION: &str = "Nơi nghệ thuật áo dài truyền thống hội tụ cùng tâm huyết của những nghệ nhân lành nghề. Mỗi tác phẩm là một câu chuyện văn hóa được thêu dệt bằng sự tinh tế.";
pub const HERO_LABEL: &str = "Since 2026 • Hà Nội";
pub const HERO_CTA: &str = "Khám Phá Bộ Sưu Tập";

pub const CONTACT_PHONE: &str = "0912 503 456";
pub const CONTACT_ZALO: &str = "https://zalo.me/0912503456";
pub const CONTACT_EMAIL: &str = "info@hylacviet.com";
pub const CONTACT_ADDRESS: &str = "123 Nguyễn Huệ, Quận 1, TP.HCM";

pub const CONTACT_HERO_IMAGE: &str = "/images/craft-measuring.webp";
pub const CONTACT_SHOWROOM_IMAGE: &str = "/images/craft-embroidery.webp";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsMap(HashMap<String, String>);

impl SettingsMap {
    pub fn new() -> Self { Self::default() }

    pub fn from_settings(settings: impl IntoIterator<Item = Setting>) -> Self {
        Self(settings.into_iter().map(|s| (s.key, s.value)).collect())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Value for `key`, treating an empty string as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// First key in the chain with a non-empty value.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn resolve_or(&self, keys: &[&str], default: &str) -> String {
        self.first_of(keys).unwrap_or(default).to_string()
    }

    /// A JSON-encoded list of strings (image galleries). Absent or malformed means empty.
    pub fn json_list(&self, key: &str) -> Vec<String> {
        let Some(raw) = self.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(key, error = %e, "setting is not a JSON string list");
                Vec::new()
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// =============================================================================
// Typed site content
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeroContent {
    pub label: String,
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub cta_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContactInfo {
    pub phone: String,
    pub zalo: String,
    pub email: String,
    pub address: String,
    pub hero_image: String,
    pub showroom_image: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteSettings {
    pub site_name: String,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub hero: HeroContent,
    pub contact: ContactInfo,
    pub gallery: Vec<String>,
}

impl SiteSettings {
    /// Walks every fallback chain once. Image URLs on `site_domain` come back relative.
    pub fn resolve(map: &SettingsMap, site_domain: &str) -> Self {
        let image = |keys: &[&str], default: &str| relative_image_url(&map.resolve_or(keys, default), site_domain);

        Self {
            site_name: map.resolve_or(&["site_name"], SITE_NAME),
            logo_url: map.get("logo_url").map(|u| relative_image_url(u, site_domain)),
            favicon_url: map.get("favicon_url").map(str::to_string),
            hero: HeroContent {
                label: map.resolve_or(&["hero_label"], HERO_LABEL),
                title: map.resolve_or(&["hero_title", "site_name"], SITE_NAME),
                tagline: map.resolve_or(&["hero_tagline", "site_tagline"], SITE_TAGLINE),
                description: map.resolve_or(&["hero_description", "site_description"], SITE_DESCRIPTION),
                cta_text: map.resolve_or(&["hero_cta_text"], HERO_CTA),
            },
            contact: ContactInfo {
                phone: map.resolve_or(&["contact_phone", "phone"], CONTACT_PHONE),
                zalo: map.resolve_or(&["zalo_url", "zalo"], CONTACT_ZALO),
                email: map.resolve_or(&["contact_email", "email"], CONTACT_EMAIL),
                address: map.resolve_or(&["address"], CONTACT_ADDRESS),
                hero_image: image(&["craft_step4_image", "step4_image", "story_image"], CONTACT_HERO_IMAGE),
                showroom_image: image(&["story_image_2", "craft_step3_image", "step3_image"], CONTACT_SHOWROOM_IMAGE),
            },
            gallery: map
                .json_list("gallery_images")
                .iter()
                .map(|u| relative_image_url(u, site_domain))
                .collect(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self::resolve(&SettingsMap::new(), "")
    }
}

// =============================================================================
// Size chart
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRow {
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub bust: String,
    #[serde(default)]
    pub ao_dai: String,
    #[serde(default)]
    pub tay: String,
    #[serde(default)]
    pub quan: String,
}

/// Size label (`S`, `M`, ...) to its row of measurements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeChart(pub BTreeMap<String, SizeRow>);

impl SizeChart {
    /// Parses the `size_chart` setting; malformed JSON yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(chart) => Some(chart),
            Err(e) => {
                tracing::warn!(error = %e, "size_chart setting is not valid JSON");
                None
            }
        }
    }

    pub fn row(&self, size: &str) -> Option<&SizeRow> { self.0.get(size) }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}
