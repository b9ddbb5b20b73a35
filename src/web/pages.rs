//! JSON endpoints behind the public pages.
//!
//! Read paths degrade to defaults when the catalog API is down; only the
//! consultation form surfaces upstream failures to the visitor.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{CatalogQuery, ConsultationRequest, PriceRange, ProductCard, SortKey};
use crate::domain::settings::{SettingsMap, SiteSettings, SizeChart, CONTACT_ZALO};
use crate::domain::silhouette::MeasurementProfile;
use crate::domain::value_objects::{relative_image_url, Measurements};
use crate::{Category, StorefrontError};

use super::metadata::{self, PageMetadata};
use super::sitemap;
use super::AppState;

pub const SUBMIT_FAILED: &str = "Có lỗi xảy ra, vui lòng thử lại";

// =============================================================================
// Site content
// =============================================================================

pub async fn site(State(s): State<AppState>) -> Json<SiteSettings> {
    let map = s.api.settings().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "settings unavailable; rendering defaults");
        SettingsMap::new()
    });
    Json(SiteSettings::resolve(&map, &s.config.site_domain))
}

/// Shown on the home page whenever the API has no categories to offer.
pub fn default_categories() -> Vec<Category> {
    let category = |id: &str, name: &str, slug: &str, description: &str, icon: &str, count: i64, order: i32| Category {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        image: format!("/images/categories/{id}.jpg"),
        icon: icon.to_string(),
        sort_order: order,
        product_count: Some(count),
    };
    vec![
        category("traditional", "Áo Dài Truyền Thống", "ao-dai-truyen-thong", "Áo dài ngũ thân, tứ thân - tinh hoa nghìn năm", "👘", 12, 1),
        category("wedding", "Áo Dài Cưới", "ao-dai-cuoi", "Kiệt tác cho ngày trọng đại", "💒", 8, 2),
        category("buddhist", "Pháp Phục", "phap-phuc", "Áo tràng, pháp phục tu tập thanh tịnh", "🪷", 6, 3),
        category("custom", "May Đo Theo Yêu Cầu", "may-do", "Thiết kế riêng theo ý tưởng của bạn", "✂️", 0, 4),
    ]
}

pub async fn categories(State(s): State<AppState>) -> Json<Vec<Category>> {
    match s.api.categories().await {
        Ok(categories) if !categories.is_empty() => Json(
            categories
                .into_iter()
                .map(|c| Category { image: relative_image_url(&c.image, &s.config.site_domain), ..c })
                .collect(),
        ),
        Ok(_) => Json(default_categories()),
        Err(e) => {
            tracing::warn!(error = %e, "categories unavailable; using defaults");
            Json(default_categories())
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub category: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort: Option<String>,
}

impl ListingParams {
    fn into_query(self) -> Result<CatalogQuery, String> {
        let sort: SortKey = self.sort.as_deref().unwrap_or_default().parse()?;
        Ok(CatalogQuery {
            category: self.category.unwrap_or_default(),
            price_range: PriceRange::new(
                self.min_price.unwrap_or(PriceRange::ALL.min),
                self.max_price.unwrap_or(PriceRange::ALL.max),
            ),
            sort,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListing {
    pub total: usize,
    pub products: Vec<ProductCard>,
}

pub async fn products(State(s): State<AppState>, Query(p): Query<ListingParams>) -> Result<Json<ProductListing>, (StatusCode, String)> {
    let query = p.into_query().map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let all = s.api.active_products().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "product list unavailable");
        Vec::new()
    });
    let products: Vec<ProductCard> = query
        .apply(&all)
        .into_iter()
        .map(|p| ProductCard::from_product(p, &s.config.site_domain))
        .collect();
    Ok(Json(ProductListing { total: products.len(), products }))
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub card: ProductCard,
    pub description: String,
    pub gallery: Vec<String>,
    pub size_chart: Option<SizeChart>,
    /// Zalo chat link with the product name pre-filled.
    pub consult_link: String,
}

pub async fn product_detail(State(s): State<AppState>, Path(id): Path<String>) -> Result<Json<ProductDetail>, (StatusCode, String)> {
    let (product, chart, settings) = tokio::join!(s.api.product(&id), s.api.size_chart(), s.api.settings());
    let product = product.map_err(|e| match e {
        StorefrontError::NotFound | StorefrontError::Rejected(_) => (StatusCode::NOT_FOUND, "Không tìm thấy sản phẩm".to_string()),
        other => {
            tracing::warn!(%id, error = %other, "product lookup failed");
            (StatusCode::BAD_GATEWAY, other.to_string())
        }
    })?;
    let size_chart = chart.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "no size chart");
        None
    });
    let zalo = settings
        .ok()
        .and_then(|m| m.first_of(&["zalo_url", "zalo"]).map(str::to_string))
        .unwrap_or_else(|| CONTACT_ZALO.to_string());

    let domain = &s.config.site_domain;
    Ok(Json(ProductDetail {
        card: ProductCard::from_product(&product, domain),
        description: product.description.clone(),
        gallery: product.images.iter().filter(|u| !u.is_empty()).map(|u| relative_image_url(u, domain)).collect(),
        size_chart,
        consult_link: consult_link(&zalo, &product.name),
    }))
}

fn consult_link(zalo: &str, product_name: &str) -> String {
    let text = format!("Xin chào, tôi muốn tư vấn về {}", product_name);
    let encoded: String = url::form_urlencoded::byte_serialize(text.as_bytes()).collect();
    let separator = if zalo.contains('?') { '&' } else { '?' };
    format!("{}{}text={}", zalo, separator, encoded)
}

// =============================================================================
// Forms
// =============================================================================

pub async fn submit_consultation(State(s): State<AppState>, Json(r): Json<ConsultationRequest>) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    match s.api.create_order(&r).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(serde_json::json!({"success": true})))),
        Err(StorefrontError::Validation(e)) => Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string())),
        Err(e) => {
            tracing::error!(error = %e, "consultation request not delivered");
            Err((StatusCode::BAD_GATEWAY, SUBMIT_FAILED.to_string()))
        }
    }
}

/// Range checks happen while deserializing `Measurements`; axum answers 422 for those.
pub async fn body_type(Json(m): Json<Measurements>) -> Json<MeasurementProfile> {
    Json(MeasurementProfile::from_measurements(m))
}

// =============================================================================
// SEO
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct MetadataParams {
    #[serde(default)]
    pub path: String,
}

pub async fn page_metadata(State(s): State<AppState>, Query(p): Query<MetadataParams>) -> Result<Json<PageMetadata>, (StatusCode, String)> {
    let not_found = || (StatusCode::NOT_FOUND, format!("no page at {}", p.path));

    if let Some(id) = p.path.strip_prefix("/san-pham/").map(|id| id.trim_end_matches('/')).filter(|id| !id.is_empty() && !id.contains('/')) {
        return match s.api.product(id).await {
            Ok(product) => Ok(Json(metadata::product_page(&product, &s.config))),
            Err(StorefrontError::NotFound) => Err(not_found()),
            Err(e) => {
                tracing::warn!(%id, error = %e, "product metadata unavailable; using listing metadata");
                metadata::static_page("/san-pham", &s.config).map(Json).ok_or_else(not_found)
            }
        };
    }
    metadata::static_page(&p.path, &s.config).map(Json).ok_or_else(not_found)
}

pub async fn sitemap_xml(State(s): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let mut entries = sitemap::static_entries(&s.config, now);
    match s.api.active_products().await {
        Ok(products) => entries.extend(sitemap::product_entries(&products, &s.config, now)),
        Err(e) => tracing::warn!(error = %e, "sitemap built without products"),
    }
    ([(header::CONTENT_TYPE, "application/xml")], sitemap::render(&entries))
}
