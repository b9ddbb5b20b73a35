//! `/favicon.ico` redirects to whatever the `favicon_url` setting says.
//!
//! The lookup is cached for `FAVICON_CACHE_SECS`; a zero TTL disables caching.
//! Concurrent misses wait on the write lock and share one lookup.

use axum::{extract::State, http::HeaderValue, response::Redirect};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

use crate::api::ApiClient;
use crate::config::StorefrontConfig;

use super::AppState;

#[derive(Clone, Debug)]
struct CachedFavicon {
    target: String,
    resolved_at: Instant,
}

impl CachedFavicon {
    fn fresh(&self, ttl: Duration) -> Option<String> {
        (self.resolved_at.elapsed() < ttl).then(|| self.target.clone())
    }
}

#[derive(Clone, Debug, Default)]
pub struct FaviconCache {
    inner: Arc<RwLock<Option<CachedFavicon>>>,
}

impl FaviconCache {
    pub async fn resolve(&self, api: &ApiClient, config: &StorefrontConfig) -> String {
        let ttl = config.favicon_cache_ttl;
        if ttl.is_zero() {
            return lookup(api, config).await;
        }
        if let Some(target) = self.inner.read().await.as_ref().and_then(|c| c.fresh(ttl)) {
            return target;
        }

        let mut slot = self.inner.write().await;
        if let Some(target) = slot.as_ref().and_then(|c| c.fresh(ttl)) {
            return target;
        }
        let target = lookup(api, config).await;
        *slot = Some(CachedFavicon { target: target.clone(), resolved_at: Instant::now() });
        target
    }
}

async fn lookup(api: &ApiClient, config: &StorefrontConfig) -> String {
    let fallback = || config.site_link(&config.default_favicon_path);
    let settings = match api.settings().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "favicon lookup failed; using default");
            return fallback();
        }
    };
    match settings.get("favicon_url") {
        None => fallback(),
        Some(raw) => redirect_target(raw).unwrap_or_else(|| {
            tracing::warn!(favicon_url = ?raw, "favicon_url is not a usable redirect target; using default");
            fallback()
        }),
    }
}

/// An absolute URL or a site path that can go into a `Location` header as is.
fn redirect_target(raw: &str) -> Option<String> {
    let target = raw.trim();
    if target.is_empty() || HeaderValue::from_str(target).is_err() {
        return None;
    }
    (target.starts_with('/') || Url::parse(target).is_ok()).then(|| target.to_string())
}

pub async fn favicon(State(s): State<AppState>) -> Redirect {
    let target = s.favicon.resolve(&s.api, &s.config).await;
    Redirect::temporary(&target)
}
