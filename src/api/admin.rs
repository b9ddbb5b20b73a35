//! Authenticated admin client.
//!
//! Every request carries `Authorization: Bearer <token>` from the owned
//! [`AdminSession`]. A 401 from any endpoint expires the session and wipes
//! the persisted token; callers treat [`StorefrontError::Unauthorized`] as
//! "go back to the login screen".

use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::domain::aggregates::{AdminSession, TokenStore};
use crate::domain::events::{DomainEvent, SessionEvent};
use crate::domain::settings::SettingsMap;
use crate::{
    ApiEnvelope, AuthUser, Category, LoginResponse, Order, Product, Result, Setting, StorefrontError,
};

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub images: Vec<String>,
    pub category: String,
    pub sort_order: i32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub image: String,
    pub description: String,
    pub sort_order: i32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
struct SettingsUpdate<'a> {
    settings: Vec<SettingPair<'a>>,
}

#[derive(Clone, Debug, Serialize)]
struct SettingPair<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub active_products: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

// =============================================================================
// Client
// =============================================================================

pub struct AdminClient {
    api: ApiClient,
    session: AdminSession,
    store: Arc<dyn TokenStore>,
}

impl AdminClient {
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self { api, session: AdminSession::new(), store }
    }

    pub fn session(&self) -> &AdminSession { &self.session }
    pub fn is_authenticated(&self) -> bool { self.session.is_authenticated() }

    /// Picks up a token persisted by an earlier run. Returns whether one was found.
    pub fn restore(&mut self) -> Result<bool> {
        match self.store.load()? {
            Some(token) => {
                self.session = AdminSession::restore(token);
                self.log_session_events();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `POST /api/auth/login`. Bad credentials come back as `Unauthorized` and leave the session untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<AuthUser> {
        let url = self.api.endpoint(&["api", "auth", "login"])?;
        let request = self.api.http.post(url).json(&Credentials { username, password });
        let login: LoginResponse = match self.api.send(request).await.and_then(ApiEnvelope::into_data) {
            Ok(login) => login,
            Err(e) => {
                tracing::warn!(username, error = %e, "admin login failed");
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&login.token) {
            tracing::warn!(error = %e, "could not persist admin token");
        }
        let user = login.user.clone();
        self.session.begin(login);
        self.log_session_events();
        Ok(user)
    }

    /// `POST /api/auth/logout`, best effort. Local state is cleared whatever the API says.
    pub async fn logout(&mut self) {
        if let (Some(bearer), Ok(url)) = (self.session.bearer(), self.api.endpoint(&["api", "auth", "logout"])) {
            let request = self.api.http.post(url).header(AUTHORIZATION, bearer);
            if let Err(e) = self.api.send::<serde_json::Value>(request).await {
                tracing::debug!(error = %e, "logout call failed; clearing session anyway");
            }
        }
        self.session.end();
        self.forget_token();
        self.log_session_events();
    }

    /// `GET /api/auth/me`; also fills in the session user after a restore.
    pub async fn me(&mut self) -> Result<AuthUser> {
        let url = self.api.endpoint(&["api", "auth", "me"])?;
        let user: AuthUser = self.authorized(self.api.http.get(url)).await?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    /// `GET /api/stats`
    pub async fn stats(&mut self) -> Result<DashboardStats> {
        let url = self.api.endpoint(&["api", "stats"])?;
        self.authorized(self.api.http.get(url)).await
    }

    // --- products ------------------------------------------------------------

    pub async fn products(&mut self, params: &ListParams) -> Result<Paginated<Product>> {
        let url = self.api.endpoint(&["api", "products"])?;
        self.authorized(self.api.http.get(url).query(params)).await
    }

    pub async fn create_product(&mut self, product: &NewProduct) -> Result<Product> {
        let url = self.api.endpoint(&["api", "products"])?;
        self.authorized(self.api.http.post(url).json(product)).await
    }

    pub async fn update_product(&mut self, id: &str, patch: &ProductPatch) -> Result<Product> {
        let url = self.api.endpoint(&["api", "products", id])?;
        self.authorized(self.api.http.put(url).json(patch)).await
    }

    pub async fn delete_product(&mut self, id: &str) -> Result<()> {
        let url = self.api.endpoint(&["api", "products", id])?;
        self.acknowledged(self.api.http.delete(url)).await
    }

    // --- categories ----------------------------------------------------------

    pub async fn create_category(&mut self, category: &NewCategory) -> Result<Category> {
        let url = self.api.endpoint(&["api", "categories"])?;
        self.authorized(self.api.http.post(url).json(category)).await
    }

    pub async fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> Result<Category> {
        let url = self.api.endpoint(&["api", "categories", id])?;
        self.authorized(self.api.http.put(url).json(patch)).await
    }

    pub async fn delete_category(&mut self, id: &str) -> Result<()> {
        let url = self.api.endpoint(&["api", "categories", id])?;
        self.acknowledged(self.api.http.delete(url)).await
    }

    // --- orders --------------------------------------------------------------

    pub async fn orders(&mut self, params: &ListParams) -> Result<Paginated<Order>> {
        let url = self.api.endpoint(&["api", "orders"])?;
        self.authorized(self.api.http.get(url).query(params)).await
    }

    pub async fn order(&mut self, id: &str) -> Result<Order> {
        let url = self.api.endpoint(&["api", "orders", id])?;
        self.authorized(self.api.http.get(url)).await
    }

    pub async fn update_order(&mut self, id: &str, patch: &OrderPatch) -> Result<Order> {
        let url = self.api.endpoint(&["api", "orders", id])?;
        self.authorized(self.api.http.put(url).json(patch)).await
    }

    pub async fn delete_order(&mut self, id: &str) -> Result<()> {
        let url = self.api.endpoint(&["api", "orders", id])?;
        self.acknowledged(self.api.http.delete(url)).await
    }

    // --- settings ------------------------------------------------------------

    /// `PUT /api/settings`; upserts each pair and returns the full map afterwards.
    pub async fn update_settings(&mut self, pairs: &[(&str, &str)]) -> Result<SettingsMap> {
        let url = self.api.endpoint(&["api", "settings"])?;
        let body = SettingsUpdate {
            settings: pairs.iter().map(|&(key, value)| SettingPair { key, value }).collect(),
        };
        let settings: Vec<Setting> = self.authorized(self.api.http.put(url).json(&body)).await?;
        Ok(SettingsMap::from_settings(settings))
    }

    // --- plumbing ------------------------------------------------------------

    async fn authorized<T: DeserializeOwned>(&mut self, request: RequestBuilder) -> Result<T> {
        self.dispatch(request).await?.into_data()
    }

    async fn acknowledged(&mut self, request: RequestBuilder) -> Result<()> {
        self.dispatch::<serde_json::Value>(request).await?.into_ack()
    }

    async fn dispatch<T: DeserializeOwned>(&mut self, request: RequestBuilder) -> Result<ApiEnvelope<T>> {
        let bearer = self.session.bearer().ok_or(StorefrontError::NotAuthenticated)?;
        match self.api.send(request.header(AUTHORIZATION, bearer)).await {
            Err(StorefrontError::Unauthorized) => {
                self.session.expire();
                self.forget_token();
                self.log_session_events();
                Err(StorefrontError::Unauthorized)
            }
            other => other,
        }
    }

    fn forget_token(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "could not clear persisted admin token");
        }
    }

    fn log_session_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                DomainEvent::Session(SessionEvent::LoggedIn { username }) => {
                    tracing::info!(%username, "admin logged in")
                }
                DomainEvent::Session(SessionEvent::Restored) => tracing::info!("admin session restored"),
                DomainEvent::Session(SessionEvent::LoggedOut { username }) => {
                    tracing::info!(username = ?username, "admin logged out")
                }
                DomainEvent::Session(SessionEvent::Expired) => {
                    tracing::warn!("admin session expired; login required")
                }
            }
        }
    }
}
