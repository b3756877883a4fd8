//! Storefront SDK for Rust.
//!
//! Provides blocking clients for the storefront's product catalog and
//! inventory services, plus a persisted shopping cart that keeps inventory
//! reservations in step with its contents.
//!
//! # Quick start
//!
//! ```no_run
//! use storefront_sdk::StorefrontClient;
//! use storefront_sdk::api::ListProductsParams;
//!
//! let client = StorefrontClient::builder()
//!     .base_url("http://localhost:3000/api")
//!     .build()
//!     .unwrap();
//!
//! // Browse the catalog
//! let page = client.products().list(&ListProductsParams::default()).unwrap();
//!
//! // Put the first product in the cart, reserving one unit
//! let mut cart = client.cart().unwrap();
//! if let Some(product) = page.content.first() {
//!     cart.add(product, 1).unwrap();
//! }
//! println!("{} items, {:.2} total", cart.total_items(), cart.total_price());
//! ```

pub mod api;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cart;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod transport;

pub use api::{InventoryClient, InventoryService, ListProductsParams, ProductClient};
#[cfg(feature = "async")]
pub use async_client::{AsyncCart, AsyncStorefront};
pub use cart::CartStore;
pub use error::{FieldError, Result, StorefrontError, ValidationErrors};
pub use storage::LocalStorage;
pub use transport::HttpTransport;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// StorefrontClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`StorefrontClient`].
///
/// Use [`StorefrontClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](StorefrontClientBuilder::build).
pub struct StorefrontClientBuilder {
    base_url: Option<String>,
    storage_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Default for StorefrontClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            storage_dir: None,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl StorefrontClientBuilder {
    /// Set the API base URL (e.g. `http://localhost:3000/api`).
    ///
    /// If not set, `STOREFRONT_API` is consulted, then
    /// [`config::DEFAULT_API_BASE`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the directory the cart is persisted in.
    ///
    /// If not set, the platform-appropriate data directory is used
    /// (e.g. `~/.local/share/storefront-sdk` on Linux).
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<StorefrontClient> {
        let base_url = self.base_url.unwrap_or_else(config::api_base_from_env);
        let http = HttpTransport::new(base_url, self.timeout)?;
        Ok(StorefrontClient {
            http,
            storage_dir: self.storage_dir,
        })
    }
}

// ---------------------------------------------------------------------------
// StorefrontClient
// ---------------------------------------------------------------------------

/// The main entry point for the storefront SDK.
///
/// Owns the HTTP transport and hands out cheap per-service clients that share
/// its connection pool.
pub struct StorefrontClient {
    http: HttpTransport,
    storage_dir: Option<PathBuf>,
}

impl StorefrontClient {
    pub fn builder() -> StorefrontClientBuilder {
        StorefrontClientBuilder::default()
    }

    /// Access the product catalog client.
    pub fn products(&self) -> ProductClient {
        ProductClient::new(self.http.clone())
    }

    /// Access the inventory client.
    pub fn inventory(&self) -> InventoryClient {
        InventoryClient::new(self.http.clone())
    }

    /// Open the persisted cart, restoring any previously saved contents.
    ///
    /// Reservations made through the cart go to this client's inventory
    /// service.
    pub fn cart(&self) -> Result<CartStore<InventoryClient>> {
        let storage = LocalStorage::new(self.storage_dir.clone())?;
        Ok(CartStore::new(self.inventory(), storage))
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for StorefrontClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self
            .storage_dir
            .clone()
            .unwrap_or_else(config::default_storage_dir);
        write!(
            f,
            "StorefrontClient(base_url={}, storage_dir={})",
            self.http.base_url(),
            storage.display()
        )
    }
}
