use std::path::PathBuf;
use std::time::Duration;

/// API base used when neither the builder nor `STOREFRONT_API` supplies one.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Environment variable overriding [`DEFAULT_API_BASE`].
pub const API_BASE_ENV: &str = "STOREFRONT_API";

/// Storage key the cart collection is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Header carrying the client-generated idempotency key on reserve/release.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Resolve the API base URL from the environment, falling back to the default.
pub fn api_base_from_env() -> String {
    std::env::var(API_BASE_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

pub fn default_storage_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("storefront-sdk")
    } else {
        PathBuf::from(".storefront-sdk")
    }
}
