//! Stateless HTTP proxy in front of the storefront's product and inventory
//! services.
//!
//! Every route reissues the incoming request against the configured backend
//! base URL with the same method, query string and body, then relays the
//! backend's JSON body and status. Transport failures become a 500 with an
//! `{"error": "..."}` body.

pub mod config;
pub mod error;
pub mod forward;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Assemble the `/api` router over shared state.
pub fn app(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route(
            "/products",
            get(routes::products::list_products).post(routes::products::create_product),
        )
        .route(
            "/products/{id}",
            get(routes::products::get_product)
                .put(routes::products::update_product)
                .delete(routes::products::delete_product),
        )
        .route("/inventory", get(routes::inventory::list_inventory))
        .route("/inventory/{product_id}", get(routes::inventory::get_inventory))
        .route(
            "/inventory/{product_id}/reserve",
            post(routes::inventory::reserve),
        )
        .route(
            "/inventory/{product_id}/release",
            post(routes::inventory::release),
        );

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
