use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;

use crate::error::AppError;
use crate::forward::{self, Upstream};
use crate::state::AppState;

/// GET /api/inventory
pub async fn list_inventory(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let url = state.config.inventory_url("");
    forward::forward_json(&state, Upstream::get(url), &headers).await
}

/// GET /api/inventory/:product_id
pub async fn get_inventory(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let url = state.config.inventory_url(&product_id.to_string());
    forward::forward_json(&state, Upstream::get(url), &headers).await
}

/// POST /api/inventory/:product_id/reserve with `{"quantity": n}`
pub async fn reserve(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let url = state.config.inventory_url(&format!("{product_id}/reserve"));
    forward::forward_no_content(&state, Upstream::with_body(Method::POST, url, body), &headers)
        .await
}

/// POST /api/inventory/:product_id/release with `{"quantity": n}`
pub async fn release(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let url = state.config.inventory_url(&format!("{product_id}/release"));
    forward::forward_no_content(&state, Upstream::with_body(Method::POST, url, body), &headers)
        .await
}
