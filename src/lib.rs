//! Hỷ Lạc Việt storefront
//!
//! Storefront service for a bespoke áo dài and pháp phục atelier. It sits in
//! front of the catalog REST API and assembles what the public site needs.
//!
//! ## Features
//! - Typed client for the catalog REST API (public and admin)
//! - Settings-driven site content with fallback chains
//! - Product listing filter and sort
//! - Body-type classification for the made-to-measure journey
//! - Sitemap and favicon routes

pub mod api;
pub mod config;
pub mod domain;
pub mod web;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Core Types
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Whole đồng; VND has no minor unit.
    pub price: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

pub const ACTIVE_STATUS: &str = "active";

fn default_category() -> String {
    "ao-dai".to_string()
}

fn default_status() -> String {
    ACTIVE_STATUS.to_string()
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `GET /api/products` answers with either a bare array or a page object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductList {
    Items(Vec<Product>),
    Page {
        #[serde(default)]
        items: Vec<Product>,
    },
}

impl ProductList {
    pub fn into_items(self) -> Vec<Product> {
        match self {
            ProductList::Items(items) | ProductList::Page { items } => items,
        }
    }
}

/// Order as the admin panel sees it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub measurements: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_order_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_order_status() -> String {
    "pending".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Every API response is wrapped as `{ success, data, message }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), message: None }
    }

    /// Unwraps `data`, treating `success: false` or a missing payload as a rejection.
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(StorefrontError::Rejected(
                self.message.unwrap_or_else(|| "request rejected".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| StorefrontError::Rejected("response carried no data".to_string()))
    }

    /// For endpoints that only acknowledge (`data` is null).
    pub fn into_ack(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(StorefrontError::Rejected(
                self.message.unwrap_or_else(|| "request rejected".to_string()),
            ))
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API rejected request: {0}")]
    Rejected(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Not found")]
    NotFound,

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
