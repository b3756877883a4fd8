//! Inventory reads and reservation requests against the `/inventory` endpoints.

use crate::error::Result;
use crate::models::{InventoryRecord, QuantityRequest};
use crate::transport::{self, HttpTransport};

// ---------------------------------------------------------------------------
// InventoryService
// ---------------------------------------------------------------------------

/// The reservation operations the cart depends on.
///
/// Failures are opaque at this layer: rejecting an over-reservation is the
/// inventory service's job, and callers only see that the request failed.
pub trait InventoryService {
    /// Current stock record for a product, or `None` if it has none.
    fn get(&self, product_id: i64) -> Result<Option<InventoryRecord>>;

    /// Hold `quantity` units of `product_id`.
    fn reserve(&self, product_id: i64, quantity: u32) -> Result<()>;

    /// Give back `quantity` previously reserved units of `product_id`.
    fn release(&self, product_id: i64, quantity: u32) -> Result<()>;
}

impl<T: InventoryService + ?Sized> InventoryService for &T {
    fn get(&self, product_id: i64) -> Result<Option<InventoryRecord>> {
        (**self).get(product_id)
    }

    fn reserve(&self, product_id: i64, quantity: u32) -> Result<()> {
        (**self).reserve(product_id, quantity)
    }

    fn release(&self, product_id: i64, quantity: u32) -> Result<()> {
        (**self).release(product_id, quantity)
    }
}

// ---------------------------------------------------------------------------
// InventoryClient
// ---------------------------------------------------------------------------

/// HTTP implementation of [`InventoryService`].
///
/// Each reserve/release call carries a fresh idempotency key so the backend
/// can discard duplicates of the same logical request.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: HttpTransport,
}

impl InventoryClient {
    pub fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    /// Every inventory record the service knows about.
    pub fn list(&self) -> Result<Vec<InventoryRecord>> {
        Ok(self
            .http
            .get_json::<Vec<InventoryRecord>>("inventory", &[])?
            .unwrap_or_default())
    }

    fn post_quantity(&self, product_id: i64, action: &str, quantity: u32) -> Result<()> {
        let body = QuantityRequest::new(quantity)?;
        let key = transport::new_idempotency_key();
        self.http.post_no_content(
            &format!("inventory/{}/{}", product_id, action),
            &body,
            Some(&key),
        )
    }
}

impl InventoryService for InventoryClient {
    fn get(&self, product_id: i64) -> Result<Option<InventoryRecord>> {
        self.http
            .get_json(&format!("inventory/{}", product_id), &[])
    }

    fn reserve(&self, product_id: i64, quantity: u32) -> Result<()> {
        self.post_quantity(product_id, "reserve", quantity)
    }

    fn release(&self, product_id: i64, quantity: u32) -> Result<()> {
        self.post_quantity(product_id, "release", quantity)
    }
}
