//! Shared utilities for integration tests: an in-process stand-in for the catalog API.
//!
//! Product and order listings page like the real API: `status` and `category`
//! filter, `limit` defaults to 20, `page` starts at 1.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use hylacviet_storefront::{api::ApiClient, config::StorefrontConfig, Category, Product, Setting};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use url::Url;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "lua-to-tam";
pub const ADMIN_TOKEN: &str = "test-token-1";
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One authenticated request as the mock saw it.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockData {
    pub settings: Vec<Setting>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub orders: Vec<Value>,
    pub fail_orders: bool,
    /// Serve `/api/products` as a bare array instead of `{ items, total, ... }`.
    pub bare_product_list: bool,
    pub settings_calls: usize,
    pub product_queries: Vec<HashMap<String, String>>,
    pub admin_requests: Vec<Recorded>,
}

pub type Shared = Arc<Mutex<MockData>>;

pub struct MockApi {
    pub addr: SocketAddr,
    pub data: Shared,
}

impl MockApi {
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.url(), Duration::from_secs(5)).unwrap()
    }

    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig { api_url: self.url(), ..StorefrontConfig::default() }
    }

    pub fn last_admin_request(&self) -> Recorded {
        self.data.lock().unwrap().admin_requests.last().cloned().expect("no admin request recorded")
    }
}

/// Config pointing at a port nothing listens on.
pub fn unreachable_config() -> StorefrontConfig {
    StorefrontConfig {
        api_url: Url::parse("http://127.0.0.1:1").unwrap(),
        api_timeout: Duration::from_secs(2),
        ..StorefrontConfig::default()
    }
}

pub fn setting(key: &str, value: &str) -> Setting {
    Setting { key: key.to_string(), value: value.to_string(), kind: None, updated_at: None }
}

pub fn product(id: &str, name: &str, category: &str, price: i64, created_at: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} may đo thủ công"),
        price,
        images: vec![format!("https://hylacviet.vn/uploads/{id}.webp"), format!("https://cdn.example.com/{id}-2.webp")],
        category: category.to_string(),
        status: "active".to_string(),
        sort_order: 0,
        created_at: Some(created_at.to_string()),
        updated_at: Some(created_at.to_string()),
    }
}

pub fn catalog() -> Vec<Product> {
    let mut draft = product("p4", "Áo Dài Nháp", "ao_dai_4_ta", 3_000_000, "2026-09-04T08:00:00Z");
    draft.status = "draft".to_string();
    vec![
        product("p1", "Áo Dài Ngũ Thân Đỏ", "ao_dai_ngu_than", 8_500_000, "2026-09-01T08:00:00Z"),
        product("p2", "Pháp Phục Linen", "phap_phuc_linen", 1_200_000, "2026-09-03T08:00:00Z"),
        product("p3", "Áo Dài Ngũ Thân Lam", "ao_dai_ngu_than", 12_000_000, "2026-09-02T08:00:00Z"),
        draft,
    ]
}

/// `count` active products followed by as many drafts, enough to spill past one default page.
pub fn large_catalog(count: usize) -> Vec<Product> {
    let mut products: Vec<Product> = (0..count)
        .map(|i| product(&format!("a{i:02}"), &format!("Áo Dài {i:02}"), "ao_dai_2_ta", 2_000_000 + i as i64, "2026-08-01T08:00:00Z"))
        .collect();
    products.extend((0..count).map(|i| {
        let mut p = product(&format!("d{i:02}"), &format!("Nháp {i:02}"), "ao_dai_2_ta", 1_000_000, "2026-07-01T08:00:00Z");
        p.status = "draft".to_string();
        p
    }));
    // Drafts first, as `sort_order` would put them on the real API.
    products.reverse();
    products
}

pub fn order(id: &str, customer: &str, status: &str) -> Value {
    json!({
        "id": id,
        "customer_name": customer,
        "customer_phone": "0912 503 456",
        "product_name": "Áo Dài Cưới",
        "status": status,
        "created_at": "2026-09-10T08:00:00Z"
    })
}

pub async fn start_mock_api(data: MockData) -> MockApi {
    let data: Shared = Arc::new(Mutex::new(data));
    let app = Router::new()
        .route("/api/settings", get(list_settings).put(update_settings))
        .route("/api/settings/:key", get(get_setting))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/categories/:id", axum::routing::put(update_category).delete(delete_category))
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/:id", get(get_order).put(update_order).delete(delete_order))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/stats", get(stats))
        .with_state(data.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    MockApi { addr, data }
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn ok(data: Value) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

fn ack(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "data": null, "message": message }))
}

fn fail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "data": null, "message": message })))
}

/// Checks the bearer token and records the request.
fn admin(d: &Shared, method: Method, uri: &Uri, headers: &HeaderMap, body: Option<&Value>) -> Result<(), (StatusCode, Json<Value>)> {
    let authorization = headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_string);
    d.lock().unwrap().admin_requests.push(Recorded {
        method,
        uri: uri.to_string(),
        authorization: authorization.clone(),
        body: body.cloned(),
    });
    if authorization.as_deref() == Some(format!("Bearer {ADMIN_TOKEN}").as_str()) {
        Ok(())
    } else {
        Err(fail(StatusCode::UNAUTHORIZED, "Invalid token"))
    }
}

/// Shallow merge of a JSON patch object into a stored record.
fn merge(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn page(rows: Vec<Value>, query: &HashMap<String, String>) -> Value {
    let limit = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let page = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1usize).max(1);
    let total = rows.len();
    let items: Vec<Value> = rows.into_iter().skip((page - 1) * limit).take(limit).collect();
    json!({ "items": items, "total": total, "page": page, "limit": limit, "total_pages": total.div_ceil(limit) })
}

fn filtered(rows: Vec<Value>, query: &HashMap<String, String>) -> Vec<Value> {
    rows.into_iter()
        .filter(|row| ["status", "category"].iter().all(|key| query.get(*key).map_or(true, |want| row[*key] == want.as_str())))
        .collect()
}

// --- settings ----------------------------------------------------------------

async fn list_settings(State(d): State<Shared>) -> Json<Value> {
    let mut data = d.lock().unwrap();
    data.settings_calls += 1;
    ok(json!(data.settings))
}

async fn get_setting(State(d): State<Shared>, Path(key): Path<String>) -> Reply {
    let data = d.lock().unwrap();
    data.settings
        .iter()
        .find(|s| s.key == key)
        .map(|s| ok(json!(s)))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Setting not found"))
}

async fn update_settings(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    admin(&d, Method::PUT, &uri, &headers, Some(&body))?;
    let mut data = d.lock().unwrap();
    for pair in body["settings"].as_array().cloned().unwrap_or_default() {
        let key = pair["key"].as_str().unwrap_or_default().to_string();
        let value = pair["value"].as_str().unwrap_or_default().to_string();
        data.settings.retain(|s| s.key != key);
        data.settings.push(setting(&key, &value));
    }
    Ok(ok(json!(data.settings)))
}

// --- products ----------------------------------------------------------------

async fn list_products(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Reply {
    // Public reads carry no token; the admin listing does and must be valid.
    if headers.contains_key("authorization") {
        admin(&d, Method::GET, &uri, &headers, None)?;
    }
    let mut data = d.lock().unwrap();
    data.product_queries.push(query.clone());
    let rows = filtered(data.products.iter().map(|p| json!(p)).collect(), &query);
    let listing = page(rows, &query);
    if data.bare_product_list {
        Ok(ok(listing["items"].clone()))
    } else {
        Ok(ok(listing))
    }
}

async fn get_product(State(d): State<Shared>, Path(id): Path<String>) -> Reply {
    let data = d.lock().unwrap();
    data.products
        .iter()
        .find(|p| p.id == id)
        .map(|p| ok(json!(p)))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Product not found"))
}

async fn create_product(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    admin(&d, Method::POST, &uri, &headers, Some(&body))?;
    let mut data = d.lock().unwrap();
    let mut record = json!({ "id": format!("p{}", data.products.len() + 1), "status": "active", "created_at": "2026-10-01T08:00:00Z" });
    merge(&mut record, &body);
    let product: Product = serde_json::from_value(record).map_err(|e| fail(StatusCode::BAD_REQUEST, &e.to_string()))?;
    data.products.push(product.clone());
    Ok(ok(json!(product)))
}

async fn update_product(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Reply {
    admin(&d, Method::PUT, &uri, &headers, Some(&body))?;
    let mut data = d.lock().unwrap();
    let stored = data.products.iter_mut().find(|p| p.id == id).ok_or_else(|| fail(StatusCode::NOT_FOUND, "Product not found"))?;
    let mut record = json!(stored);
    merge(&mut record, &body);
    *stored = serde_json::from_value(record).map_err(|e| fail(StatusCode::BAD_REQUEST, &e.to_string()))?;
    Ok(ok(json!(stored)))
}

async fn delete_product(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    admin(&d, Method::DELETE, &uri, &headers, None)?;
    let mut data = d.lock().unwrap();
    let before = data.products.len();
    data.products.retain(|p| p.id != id);
    if data.products.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Product not found"));
    }
    Ok(ack("Product deleted"))
}

// --- categories --------------------------------------------------------------

async fn list_categories(State(d): State<Shared>) -> Json<Value> {
    ok(json!(d.lock().unwrap().categories))
}

async fn create_category(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    admin(&d, Method::POST, &uri, &headers, Some(&body))?;
    let mut data = d.lock().unwrap();
    let mut record = json!({ "id": format!("c{}", data.categories.len() + 1) });
    merge(&mut record, &body);
    let category: Category = serde_json::from_value(record).map_err(|e| fail(StatusCode::BAD_REQUEST, &e.to_string()))?;
    data.categories.push(category.clone());
    Ok(ok(json!(category)))
}

async fn update_category(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Reply {
    admin(&d, Method::PUT, &uri, &headers, Some(&body))?;
    let mut data = d.lock().unwrap();
    let stored = data.categories.iter_mut().find(|c| c.id == id).ok_or_else(|| fail(StatusCode::NOT_FOUND, "Category not found"))?;
    let mut record = json!(stored);
    merge(&mut record, &body);
    *stored = serde_json::from_value(record).map_err(|e| fail(StatusCode::BAD_REQUEST, &e.to_string()))?;
    Ok(ok(json!(stored)))
}

async fn delete_category(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    admin(&d, Method::DELETE, &uri, &headers, None)?;
    let mut data = d.lock().unwrap();
    let before = data.categories.len();
    data.categories.retain(|c| c.id != id);
    if data.categories.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Category not found"));
    }
    Ok(ack("Category deleted"))
}

// --- orders ------------------------------------------------------------------

async fn create_order(State(d): State<Shared>, Json(body): Json<Value>) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let mut data = d.lock().unwrap();
    if data.fail_orders {
        return Err(fail(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable"));
    }
    let mut record = json!({ "id": format!("o{}", data.orders.len() + 1), "status": "pending", "created_at": "2026-10-01T08:00:00Z" });
    merge(&mut record, &body);
    data.orders.push(record);
    Ok((StatusCode::CREATED, ack("Order created")))
}

async fn list_orders(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Reply {
    admin(&d, Method::GET, &uri, &headers, None)?;
    let data = d.lock().unwrap();
    Ok(ok(page(filtered(data.orders.clone(), &query), &query)))
}

async fn get_order(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    admin(&d, Method::GET, &uri, &headers, None)?;
    let data = d.lock().unwrap();
    data.orders
        .iter()
        .find(|o| o["id"] == id.as_str())
        .map(|o| ok(o.clone()))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Order not found"))
}

async fn update_order(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Reply {
    admin(&d, Method::PUT, &uri, &headers, Some(&body))?;
    let mut data = d.lock().unwrap();
    let stored = data.orders.iter_mut().find(|o| o["id"] == id.as_str()).ok_or_else(|| fail(StatusCode::NOT_FOUND, "Order not found"))?;
    merge(stored, &body);
    Ok(ok(stored.clone()))
}

async fn delete_order(State(d): State<Shared>, uri: Uri, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    admin(&d, Method::DELETE, &uri, &headers, None)?;
    let mut data = d.lock().unwrap();
    let before = data.orders.len();
    data.orders.retain(|o| o["id"] != id.as_str());
    if data.orders.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Order not found"));
    }
    Ok(ack("Order deleted"))
}

// --- auth --------------------------------------------------------------------

async fn login(Json(body): Json<Value>) -> Reply {
    if body["username"] == ADMIN_USER && body["password"] == ADMIN_PASSWORD {
        Ok(ok(json!({
            "token": ADMIN_TOKEN,
            "user": { "id": "u1", "username": ADMIN_USER, "role": "admin" }
        })))
    } else {
        Err(fail(StatusCode::UNAUTHORIZED, "Invalid credentials"))
    }
}

async fn logout() -> Json<Value> {
    ack("Logged out")
}

async fn me(State(d): State<Shared>, uri: Uri, headers: HeaderMap) -> Reply {
    admin(&d, Method::GET, &uri, &headers, None)?;
    Ok(ok(json!({ "id": "u1", "username": ADMIN_USER, "role": "admin" })))
}

async fn stats(State(d): State<Shared>, uri: Uri, headers: HeaderMap) -> Reply {
    admin(&d, Method::GET, &uri, &headers, None)?;
    let data = d.lock().unwrap();
    Ok(ok(json!({
        "total_products": data.products.len(),
        "active_products": data.products.iter().filter(|p| p.is_active()).count(),
        "total_orders": data.orders.len(),
        "pending_orders": data.orders.iter().filter(|o| o["status"] == "pending").count(),
        "recent_orders": []
    })))
}
