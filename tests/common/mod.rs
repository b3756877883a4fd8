//! Shared test fixtures for the storefront SDK integration tests.
//!
//! Provides `spawn_backend()`, an in-process axum server playing both the
//! product and inventory services behind `/api`, and `RecordingInventory`, an
//! in-memory [`InventoryService`] that logs every call.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use storefront_sdk::models::{InventoryRecord, Product};
use storefront_sdk::{InventoryService, LocalStorage, Result, StorefrontError};

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn product(id: i64, name: &str, price: f64) -> Product {
    Product {
        id: Some(id),
        sku: Some(format!("SKU-{id:03}")),
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        image_url: None,
        category: None,
    }
}

/// Storage in a fresh temp dir. Keep the `TempDir` alive for the test.
pub fn temp_storage() -> (LocalStorage, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(Some(dir.path().to_path_buf())).unwrap();
    (storage, dir)
}

// ---------------------------------------------------------------------------
// RecordingInventory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get(i64),
    Reserve(i64, u32),
    Release(i64, u32),
}

/// In-memory inventory that records calls and can be told to fail.
#[derive(Default)]
pub struct RecordingInventory {
    pub calls: RefCell<Vec<Call>>,
    pub fail_reserve: RefCell<bool>,
    pub fail_release: RefCell<bool>,
}

impl RecordingInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn set_fail_reserve(&self, fail: bool) {
        *self.fail_reserve.borrow_mut() = fail;
    }

    pub fn set_fail_release(&self, fail: bool) {
        *self.fail_release.borrow_mut() = fail;
    }

    fn rejected() -> StorefrontError {
        StorefrontError::Backend {
            status: 409,
            message: "Insufficient stock".to_string(),
        }
    }
}

impl InventoryService for RecordingInventory {
    fn get(&self, product_id: i64) -> Result<Option<InventoryRecord>> {
        self.calls.borrow_mut().push(Call::Get(product_id));
        Ok(None)
    }

    fn reserve(&self, product_id: i64, quantity: u32) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::Reserve(product_id, quantity));
        if *self.fail_reserve.borrow() {
            return Err(Self::rejected());
        }
        Ok(())
    }

    fn release(&self, product_id: i64, quantity: u32) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::Release(product_id, quantity));
        if *self.fail_release.borrow() {
            return Err(Self::rejected());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct BackendState {
    pub products: BTreeMap<i64, Value>,
    /// product id -> (quantity, reserved)
    pub stock: BTreeMap<i64, (u32, u32)>,
    /// Products whose reserve/release calls answer 503.
    pub offline: HashSet<i64>,
    pub idempotency_keys: Vec<String>,
    next_id: i64,
}

impl BackendState {
    pub fn reserved(&self, product_id: i64) -> u32 {
        self.stock.get(&product_id).map(|s| s.1).unwrap_or(0)
    }
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    /// API base including the `/api` prefix.
    pub base_url: String,
    pub state: Shared,
}

fn seed() -> BackendState {
    let mut state = BackendState::default();
    for (id, name, price, qty) in [
        (1, "Desk Lamp", 24.5, 10),
        (2, "Ceramic Mug", 9.0, 3),
        (3, "Lamp Shade", 12.0, 0),
    ] {
        let p = product(id, name, price);
        state
            .products
            .insert(id, serde_json::to_value(&p).unwrap());
        state.stock.insert(id, (qty, 0));
    }
    state.next_id = 100;
    state
}

/// Start the fake backend on a background thread with its own runtime.
pub fn spawn_backend() -> FakeBackend {
    let state: Shared = Arc::new(Mutex::new(seed()));
    let app = router(state.clone());
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    FakeBackend {
        base_url: format!("http://{addr}/api"),
        state,
    }
}

fn router(state: Shared) -> Router {
    let api = Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/inventory", get(list_inventory))
        .route("/inventory/{id}", get(get_inventory))
        .route("/inventory/{id}/reserve", post(reserve))
        .route("/inventory/{id}/release", post(release));
    Router::new().nest("/api", api).with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[derive(Deserialize)]
struct ListParams {
    page: Option<u32>,
    size: Option<u32>,
    q: Option<String>,
}

async fn list_products(State(state): State<Shared>, Query(params): Query<ListParams>) -> Response {
    let state = state.lock().unwrap();
    let q = params.q.unwrap_or_default().to_lowercase();
    let page = params.page.unwrap_or(0);
    let size = params.size.unwrap_or(10).max(1);
    let matching: Vec<Value> = state
        .products
        .values()
        .filter(|p| {
            q.is_empty()
                || p["name"]
                    .as_str()
                    .map(|n| n.to_lowercase().contains(&q))
                    .unwrap_or(false)
        })
        .cloned()
        .collect();
    let total = matching.len() as u32;
    let content: Vec<Value> = matching
        .into_iter()
        .skip((page * size) as usize)
        .take(size as usize)
        .collect();
    Json(json!({
        "content": content,
        "totalElements": total,
        "totalPages": total.div_ceil(size),
        "number": page,
        "size": size,
    }))
    .into_response()
}

async fn get_product(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match state.products.get(&id) {
        Some(p) => Json(p.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Product not found"),
    }
}

async fn create_product(State(state): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let id = state.next_id;
    state.next_id += 1;
    body["id"] = json!(id);
    state.products.insert(id, body.clone());
    state.stock.insert(id, (0, 0));
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(existing) = state.products.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, "Product not found");
    };
    if let (Some(target), Some(fields)) = (existing.as_object_mut(), patch.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    Json(existing.clone()).into_response()
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    if state.products.remove(&id).is_some() {
        state.stock.remove(&id);
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Product not found")
    }
}

fn record_json(id: i64, (quantity, reserved): (u32, u32)) -> Value {
    json!({
        "productId": id,
        "quantity": quantity,
        "reserved": reserved,
        "available": quantity - reserved,
    })
}

async fn list_inventory(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    let all: Vec<Value> = state
        .stock
        .iter()
        .map(|(id, s)| record_json(*id, *s))
        .collect();
    Json(all).into_response()
}

async fn get_inventory(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match state.stock.get(&id) {
        Some(s) => Json(record_json(id, *s)).into_response(),
        None => error(StatusCode::NOT_FOUND, "Inventory not found"),
    }
}

#[derive(Deserialize)]
struct QuantityBody {
    quantity: u32,
}

async fn reserve(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<QuantityBody>,
) -> Response {
    let mut state = state.lock().unwrap();
    remember_key(&mut state, &headers);
    if state.offline.contains(&id) {
        return error(StatusCode::SERVICE_UNAVAILABLE, "Inventory service unavailable");
    }
    let Some((quantity, reserved)) = state.stock.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, "Inventory not found");
    };
    if *quantity - *reserved < body.quantity {
        return error(StatusCode::CONFLICT, "Insufficient stock");
    }
    *reserved += body.quantity;
    StatusCode::NO_CONTENT.into_response()
}

async fn release(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<QuantityBody>,
) -> Response {
    let mut state = state.lock().unwrap();
    remember_key(&mut state, &headers);
    if state.offline.contains(&id) {
        return error(StatusCode::SERVICE_UNAVAILABLE, "Inventory service unavailable");
    }
    let Some((_, reserved)) = state.stock.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, "Inventory not found");
    };
    if *reserved < body.quantity {
        return error(StatusCode::CONFLICT, "Cannot release more than reserved");
    }
    *reserved -= body.quantity;
    StatusCode::NO_CONTENT.into_response()
}

fn remember_key(state: &mut BackendState, headers: &HeaderMap) {
    if let Some(key) = headers.get("Idempotency-Key").and_then(|v| v.to_str().ok()) {
        state.idempotency_keys.push(key.to_string());
    }
}
