use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;

use crate::error::AppError;
use crate::forward::{self, Upstream};
use crate::state::AppState;

/// GET /api/products?page=0&size=10&q=lamp
///
/// Relays the query string verbatim to the product service.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut url = state.config.products_url("");
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        url = format!("{url}?{q}");
    }
    forward::forward_json(&state, Upstream::get(url), &headers).await
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let url = state.config.products_url(&id.to_string());
    forward::forward_json(&state, Upstream::get(url), &headers).await
}

/// POST /api/products
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let url = state.config.products_url("");
    forward::forward_json(&state, Upstream::with_body(Method::POST, url, body), &headers).await
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let url = state.config.products_url(&id.to_string());
    forward::forward_json(&state, Upstream::with_body(Method::PUT, url, body), &headers).await
}

/// DELETE /api/products/:id
///
/// 204 on success, whatever the backend put in its body.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let url = state.config.products_url(&id.to_string());
    let upstream = Upstream {
        method: Method::DELETE,
        url,
        body: None,
    };
    forward::forward_no_content(&state, upstream, &headers).await
}
