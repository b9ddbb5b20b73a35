//! Environment-driven configuration.
//!
//! Read once at start-up (after `dotenvy` has populated the environment)
//! and shared immutably through `AppState`.

use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://hylacviet-api:3000";
pub const DEFAULT_SITE_URL: &str = "https://hylacviet.vn";
pub const DEFAULT_FAVICON_PATH: &str = "/favicon.svg";

#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    pub bind_address: String,
    pub api_url: Url,
    pub site_url: Url,
    /// Host of `site_url`; absolute image URLs on this domain get relativized.
    pub site_domain: String,
    pub default_favicon_path: String,
    pub favicon_cache_ttl: Duration,
    pub api_timeout: Duration,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl { key: &'static str, source: url::ParseError },

    #[error("{key} has no host")]
    MissingHost { key: &'static str },

    #[error("{key} is not a number: {value}")]
    InvalidNumber { key: &'static str, value: String },
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_number(&lookup, "PORT", 3000)?;
        let api_url = parse_url(&lookup, "API_URL", DEFAULT_API_URL)?;
        let site_url = parse_url(&lookup, "SITE_URL", DEFAULT_SITE_URL)?;
        let site_domain = site_url
            .host_str()
            .ok_or(ConfigError::MissingHost { key: "SITE_URL" })?
            .to_string();
        let favicon_cache_secs: u64 = parse_number(&lookup, "FAVICON_CACHE_SECS", 300)?;
        let api_timeout_secs: u64 = parse_number(&lookup, "API_TIMEOUT_SECS", 10)?;

        Ok(Self {
            bind_address: format!("0.0.0.0:{}", port),
            api_url,
            site_url,
            site_domain,
            default_favicon_path: lookup("DEFAULT_FAVICON_PATH")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_FAVICON_PATH.to_string()),
            favicon_cache_ttl: Duration::from_secs(favicon_cache_secs),
            api_timeout: Duration::from_secs(api_timeout_secs),
        })
    }

    /// Absolute URL for a site path, e.g. `/san-pham` → `https://hylacviet.vn/san-pham`.
    pub fn site_link(&self, path: &str) -> String {
        let base = self.site_url.as_str().trim_end_matches('/');
        if path.is_empty() || path == "/" {
            base.to_string()
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            site_url: Url::parse(DEFAULT_SITE_URL).expect("default site URL is valid"),
            site_domain: "hylacviet.vn".to_string(),
            default_favicon_path: DEFAULT_FAVICON_PATH.to_string(),
            favicon_cache_ttl: Duration::from_secs(300),
            api_timeout: Duration::from_secs(10),
        }
    }
}

fn parse_url<F>(lookup: &F, key: &'static str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { key, source })
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}
