//! Value Objects for the storefront

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Price in Vietnamese đồng, displayed with `.` grouping and a `₫` suffix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Vnd(i64);

impl Vnd {
    pub fn new(amount: i64) -> Self { Self(amount) }
    pub fn amount(&self) -> i64 { self.0 }
}

impl From<i64> for Vnd {
    fn from(amount: i64) -> Self { Self(amount) }
}

impl fmt::Display for Vnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}₫", grouped)
    }
}

/// Body measurements in centimetres, bounded to the ranges the fitting wizard offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMeasurements")]
pub struct Measurements { bust: u32, waist: u32, hips: u32, height: u32 }

pub const BUST_RANGE: (u32, u32) = (70, 120);
pub const WAIST_RANGE: (u32, u32) = (55, 100);
pub const HIPS_RANGE: (u32, u32) = (80, 130);
pub const HEIGHT_RANGE: (u32, u32) = (145, 185);

#[derive(Deserialize)]
struct RawMeasurements {
    bust: u32,
    waist: u32,
    hips: u32,
    #[serde(default = "default_height")]
    height: u32,
}

fn default_height() -> u32 { 160 }

impl TryFrom<RawMeasurements> for Measurements {
    type Error = MeasurementError;
    fn try_from(raw: RawMeasurements) -> Result<Self, Self::Error> {
        Measurements::new(raw.bust, raw.waist, raw.hips, raw.height)
    }
}

impl Measurements {
    pub fn new(bust: u32, waist: u32, hips: u32, height: u32) -> Result<Self, MeasurementError> {
        check("bust", bust, BUST_RANGE)?;
        check("waist", waist, WAIST_RANGE)?;
        check("hips", hips, HIPS_RANGE)?;
        check("height", height, HEIGHT_RANGE)?;
        Ok(Self { bust, waist, hips, height })
    }
    pub fn bust(&self) -> u32 { self.bust }
    pub fn waist(&self) -> u32 { self.waist }
    pub fn hips(&self) -> u32 { self.hips }
    pub fn height(&self) -> u32 { self.height }

    /// One-line summary suitable for the free-text `measurements` field of an order.
    pub fn summary(&self) -> String {
        format!(
            "Ngực {}cm · Eo {}cm · Mông {}cm · Cao {}cm",
            self.bust, self.waist, self.hips, self.height
        )
    }
}

impl Default for Measurements {
    fn default() -> Self { Self { bust: 88, waist: 68, hips: 94, height: 160 } }
}

fn check(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), MeasurementError> {
    if value < min || value > max {
        return Err(MeasurementError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasurementError { OutOfRange { field: &'static str, value: u32, min: u32, max: u32 } }
impl std::error::Error for MeasurementError {}
impl fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, value, min, max } => {
                write!(f, "{} {}cm outside {}..={}cm", field, value, min, max)
            }
        }
    }
}

/// Rewrites an absolute URL on the site's own domain to a site-relative path.
///
/// Foreign hosts, already-relative paths and anything that does not parse
/// come back verbatim.
pub fn relative_image_url(url: &str, site_domain: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    match parsed.host_str() {
        Some(host) if is_site_host(host, site_domain) => {
            let mut relative = parsed.path().to_string();
            if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
                relative.push('?');
                relative.push_str(query);
            }
            relative
        }
        _ => url.to_string(),
    }
}

fn is_site_host(host: &str, site_domain: &str) -> bool {
    if site_domain.is_empty() {
        return false;
    }
    host.eq_ignore_ascii_case(site_domain)
        || host
            .to_ascii_lowercase()
            .ends_with(&format!(".{}", site_domain.to_ascii_lowercase()))
}
