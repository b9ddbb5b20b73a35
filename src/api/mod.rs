//! Client for the catalog REST API.
//!
//! Thin typed wrappers over the public endpoints. Callers decide how to
//! degrade; nothing here retries.

pub mod admin;

pub use admin::{AdminClient, ListParams};

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;
use uuid::Uuid;
use validator::Validate;

use crate::config::StorefrontConfig;
use crate::domain::aggregates::ConsultationRequest;
use crate::domain::settings::{SettingsMap, SizeChart};
use crate::{ApiEnvelope, Category, Product, ProductList, Result, Setting, StorefrontError, ACTIVE_STATUS};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Page size asked for when the whole active catalog is needed at once.
/// The API pages at 20 rows unless told otherwise.
pub const CATALOG_LIMIT: u32 = 1000;

#[derive(Clone, Debug)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.api_timeout)
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorefrontError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and decodes the `{ success, data }` envelope.
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiEnvelope<T>> {
        let request_id = Uuid::new_v4().to_string();
        let response = request.header(REQUEST_ID_HEADER, &request_id).send().await?;
        let status = response.status();
        tracing::debug!(request_id = %request_id, url = %response.url(), status = status.as_u16(), "API response");

        match status {
            StatusCode::UNAUTHORIZED => return Err(StorefrontError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(StorefrontError::NotFound),
            _ => {}
        }

        let body = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(StorefrontError::Status { status: status.as_u16(), message });
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.send(self.http.get(url)).await?.into_data()
    }

    /// `GET /api/settings`
    pub async fn settings(&self) -> Result<SettingsMap> {
        let settings: Vec<Setting> = self.get(&["api", "settings"]).await?;
        Ok(SettingsMap::from_settings(settings))
    }

    /// `GET /api/settings/{key}`
    pub async fn setting(&self, key: &str) -> Result<Setting> {
        self.get(&["api", "settings", key]).await
    }

    /// The `size_chart` setting decoded; `None` when its value is not valid JSON.
    pub async fn size_chart(&self) -> Result<Option<SizeChart>> {
        let setting = self.setting("size_chart").await?;
        Ok(SizeChart::parse(&setting.value))
    }

    /// `GET /api/products`, whichever shape the list comes back in.
    pub async fn products(&self) -> Result<Vec<Product>> {
        let list: ProductList = self.get(&["api", "products"]).await?;
        Ok(list.into_items())
    }

    /// `GET /api/products?status=active&limit=..`: the full active catalog in one request.
    pub async fn active_products(&self) -> Result<Vec<Product>> {
        let params = ListParams {
            status: Some(ACTIVE_STATUS.to_string()),
            limit: Some(CATALOG_LIMIT),
            ..Default::default()
        };
        let url = self.endpoint(&["api", "products"])?;
        let list: ProductList = self.send(self.http.get(url).query(&params)).await?.into_data()?;
        let mut products = list.into_items();
        products.retain(Product::is_active);
        Ok(products)
    }

    /// `GET /api/products/{id}`
    pub async fn product(&self, id: &str) -> Result<Product> {
        self.get(&["api", "products", id]).await
    }

    /// `GET /api/categories`
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.get(&["api", "categories"]).await
    }

    /// `POST /api/orders`. Required fields are checked before anything is sent.
    pub async fn create_order(&self, request: &ConsultationRequest) -> Result<()> {
        let request = request.clone().normalized();
        request.validate()?;

        let url = self.endpoint(&["api", "orders"])?;
        let envelope: ApiEnvelope<serde_json::Value> = self.send(self.http.post(url).json(&request)).await?;
        envelope.into_ack()?;
        tracing::info!(product_id = ?request.product_id, "consultation request submitted");
        Ok(())
    }
}
