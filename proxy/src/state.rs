use crate::config::ProxyConfig;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    pub config: ProxyConfig,

    /// Async HTTP client used for every upstream request. Holds the
    /// connection pool; no responses are cached.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}
