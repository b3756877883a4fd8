use std::sync::Arc;

use storefront_proxy::config::ProxyConfig;
use storefront_proxy::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    if config.products_api.is_empty() {
        tracing::warn!("PRODUCTS_API is not set; product requests will fail");
    }
    if config.inventory_api.is_empty() {
        tracing::warn!("INVENTORY_API is not set; inventory requests will fail");
    }

    let addr = config.bind_addr;
    let app = storefront_proxy::app(Arc::new(AppState::new(config)));

    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
