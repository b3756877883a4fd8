//! Async wrappers around [`StorefrontClient`] and [`CartStore`] for use in
//! async runtimes (Tokio, etc.).
//!
//! The SDK speaks blocking HTTP, so every operation is dispatched to Tokio's
//! blocking thread pool via [`tokio::task::spawn_blocking`], keeping the async
//! event loop free while a request is outstanding.
//!
//! # Example
//!
//! ```no_run
//! use storefront_sdk::AsyncStorefront;
//! use storefront_sdk::api::ListProductsParams;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncStorefront::builder().build().await.unwrap();
//!
//!     let page = sdk
//!         .run(|s| s.products().list(&ListProductsParams::default()))
//!         .await
//!         .unwrap();
//!
//!     let cart = sdk.cart().await.unwrap();
//!     if let Some(product) = page.content.into_iter().next() {
//!         cart.add(product, 2).await.unwrap();
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::InventoryClient;
use crate::cart::CartStore;
use crate::config;
use crate::error::{Result, StorefrontError};
use crate::models::{CartItem, Product};
use crate::StorefrontClient;

fn join_error(e: tokio::task::JoinError) -> StorefrontError {
    StorefrontError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncStorefrontBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncStorefront`] instance.
pub struct AsyncStorefrontBuilder {
    base_url: Option<String>,
    storage_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Default for AsyncStorefrontBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            storage_dir: None,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl AsyncStorefrontBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client on the blocking pool; the blocking HTTP client must
    /// not be created on an async worker thread.
    pub async fn build(self) -> Result<AsyncStorefront> {
        tokio::task::spawn_blocking(move || {
            let mut builder = StorefrontClient::builder().timeout(self.timeout);
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(dir) = self.storage_dir {
                builder = builder.storage_dir(dir);
            }
            let client = builder.build()?;
            Ok(AsyncStorefront {
                inner: Arc::new(client),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncStorefront
// ---------------------------------------------------------------------------

/// Async wrapper around [`StorefrontClient`].
///
/// Use [`run()`](Self::run) to execute any sync SDK method. Call
/// [`close()`](Self::close) before dropping inside a runtime so the blocking
/// HTTP client is torn down off the event loop.
///
/// The client is shared without a lock, so concurrent `run()` calls proceed
/// independently.
pub struct AsyncStorefront {
    inner: Arc<StorefrontClient>,
}

impl AsyncStorefront {
    pub fn builder() -> AsyncStorefrontBuilder {
        AsyncStorefrontBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&StorefrontClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&client))
            .await
            .map_err(join_error)?
    }

    /// Open the persisted cart as an [`AsyncCart`].
    pub async fn cart(&self) -> Result<AsyncCart> {
        let store = self.run(|s| s.cart()).await?;
        Ok(AsyncCart {
            inner: Arc::new(Mutex::new(store)),
        })
    }

    /// Close the client, releasing the HTTP connection pool.
    ///
    /// The pool is freed once the last in-flight `run()` has finished with it.
    pub async fn close(self) -> Result<()> {
        let client = self.inner;
        tokio::task::spawn_blocking(move || drop(client))
            .await
            .map_err(join_error)
    }
}

// ---------------------------------------------------------------------------
// AsyncCart
// ---------------------------------------------------------------------------

/// Async wrapper around a [`CartStore`].
///
/// Mutations are serialized by a mutex: a second `add` waits until the first
/// has finished its reservation round-trip.
#[derive(Clone)]
pub struct AsyncCart {
    inner: Arc<Mutex<CartStore<InventoryClient>>>,
}

impl AsyncCart {
    async fn with_store<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut CartStore<InventoryClient>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = store
                .lock()
                .map_err(|_| StorefrontError::InvalidArgument("Cart lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(join_error)?
    }

    pub async fn add(&self, product: Product, quantity: u32) -> Result<()> {
        self.with_store(move |c| c.add(&product, quantity)).await
    }

    pub async fn remove(&self, product_id: i64) -> Result<()> {
        self.with_store(move |c| c.remove(product_id)).await
    }

    pub async fn set_quantity(&self, product_id: i64, quantity: u32) -> Result<()> {
        self.with_store(move |c| c.set_quantity(product_id, quantity))
            .await
    }

    pub async fn clear(&self) -> Result<()> {
        self.with_store(|c| {
            c.clear();
            Ok(())
        })
        .await
    }

    /// Snapshot of the current items.
    pub async fn items(&self) -> Result<Vec<CartItem>> {
        self.with_store(|c| Ok(c.items().to_vec())).await
    }

    pub async fn total_items(&self) -> Result<u64> {
        self.with_store(|c| Ok(c.total_items())).await
    }

    pub async fn total_price(&self) -> Result<f64> {
        self.with_store(|c| Ok(c.total_price())).await
    }

    /// Drop this handle off the event loop. The store and its HTTP client go
    /// away with the last clone.
    pub async fn close(self) -> Result<()> {
        let store = self.inner;
        tokio::task::spawn_blocking(move || drop(store))
            .await
            .map_err(join_error)
    }
}
