//! HTTP surface of the storefront.

pub mod favicon;
pub mod metadata;
pub mod pages;
pub mod sitemap;

use axum::{routing::{get, post}, Json, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::ApiClient;
use crate::config::StorefrontConfig;
use crate::Result;

pub use favicon::FaviconCache;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub config: Arc<StorefrontConfig>,
    pub favicon: FaviconCache,
}

impl AppState {
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let api = ApiClient::from_config(&config)?;
        Ok(Self { api, config: Arc::new(config), favicon: FaviconCache::default() })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "hylacviet-storefront"})) }))
        .route("/api/storefront/site", get(pages::site))
        .route("/api/storefront/categories", get(pages::categories))
        .route("/api/storefront/products", get(pages::products))
        .route("/api/storefront/products/:id", get(pages::product_detail))
        .route("/api/storefront/consultations", post(pages::submit_consultation))
        .route("/api/storefront/body-type", post(pages::body_type))
        .route("/api/storefront/metadata", get(pages::page_metadata))
        .route("/sitemap.xml", get(pages::sitemap_xml))
        .route("/favicon.ico", get(favicon::favicon))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
