//! Reissue an incoming request against a backend and shape its reply.

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;
use storefront_sdk::config::IDEMPOTENCY_HEADER;

use crate::error::AppError;
use crate::state::AppState;

/// One upstream call: method, absolute URL, optional JSON body.
pub struct Upstream {
    pub method: Method,
    pub url: String,
    pub body: Option<Bytes>,
}

impl Upstream {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::GET,
            url,
            body: None,
        }
    }

    pub fn with_body(method: Method, url: String, body: Bytes) -> Self {
        Self {
            method,
            url,
            body: Some(body),
        }
    }
}

/// Send `upstream` and return the backend's raw status and body.
async fn send(
    state: &AppState,
    upstream: Upstream,
    headers: &HeaderMap,
) -> Result<(StatusCode, Bytes), AppError> {
    tracing::debug!(method = %upstream.method, url = %upstream.url, "forwarding");

    let mut req = state.http.request(upstream.method, &upstream.url);
    if let Some(body) = upstream.body {
        req = req.header(CONTENT_TYPE, "application/json").body(body);
    }
    if let Some(key) = headers.get(IDEMPOTENCY_HEADER) {
        req = req.header(IDEMPOTENCY_HEADER, key.clone());
    }

    let resp = req.send().await?;
    let status = resp.status();
    let bytes = resp.bytes().await?;
    Ok((status, bytes))
}

/// Forward and relay the backend's JSON body with its status.
///
/// A non-JSON error body is wrapped as `{"error": text}` under the backend's
/// status; a non-JSON success body is a 502.
pub async fn forward_json(
    state: &AppState,
    upstream: Upstream,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let (status, bytes) = send(state, upstream, headers).await?;
    if bytes.is_empty() {
        return Ok(status.into_response());
    }
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(body) => Ok((status, Json(body)).into_response()),
        Err(e) if status.is_success() => {
            Err(AppError::bad_gateway(format!("Invalid JSON from backend: {e}")))
        }
        Err(_) => Err(error_from_body(status, &bytes)),
    }
}

/// Forward an operation whose success carries no content.
///
/// Any backend success becomes `204 No Content`; failures are relayed as in
/// [`forward_json`].
pub async fn forward_no_content(
    state: &AppState,
    upstream: Upstream,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let (status, bytes) = send(state, upstream, headers).await?;
    if status.is_success() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(body) => Ok((status, Json(body)).into_response()),
        Err(_) => Err(error_from_body(status, &bytes)),
    }
}

fn error_from_body(status: StatusCode, bytes: &[u8]) -> AppError {
    let text = String::from_utf8_lossy(bytes).trim().to_string();
    let message = if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Backend request failed")
            .to_string()
    } else {
        text
    };
    AppError::new(status, message)
}
