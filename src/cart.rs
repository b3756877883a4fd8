//! Client-held shopping cart kept in step with inventory reservations.
//!
//! Every unit of quantity in the cart has a matching reservation request
//! against the inventory service: adding reserves, removing releases, and
//! changing a quantity reserves or releases only the difference. The local
//! collection changes only after the inventory call succeeds, and each change
//! is written through to [`LocalStorage`] under [`config::CART_STORAGE_KEY`].

use crate::api::InventoryService;
use crate::config;
use crate::error::{Result, StorefrontError};
use crate::models::{CartItem, Product};
use crate::storage::LocalStorage;

/// Ordered cart of (product, quantity) pairs, one entry per product id.
pub struct CartStore<I> {
    inventory: I,
    storage: LocalStorage,
    items: Vec<CartItem>,
}

impl<I: InventoryService> CartStore<I> {
    /// Create a store, restoring any cart previously persisted in `storage`.
    ///
    /// A missing entry yields an empty cart. An unreadable entry is logged,
    /// removed, and also yields an empty cart.
    pub fn new(inventory: I, storage: LocalStorage) -> Self {
        let items = load_items(&storage);
        Self {
            inventory,
            storage,
            items,
        }
    }

    // -- Reads -------------------------------------------------------------

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id() == Some(product_id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of unit price times quantity across all items.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    // -- Mutations ---------------------------------------------------------

    /// Reserve `quantity` units of `product` and add them to the cart.
    ///
    /// Merges into the existing item for the same product id, otherwise
    /// appends. If the reservation fails the cart is left untouched and the
    /// error is returned.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<()> {
        let product_id = product.id.ok_or_else(|| {
            StorefrontError::InvalidArgument("Product has no id".to_string())
        })?;
        if quantity == 0 {
            return Err(StorefrontError::InvalidArgument(
                "Quantity must be at least 1".to_string(),
            ));
        }
        let position = self.position(product_id);
        if let Some(idx) = position {
            if self.items[idx].quantity.checked_add(quantity).is_none() {
                return Err(StorefrontError::InvalidArgument(format!(
                    "Quantity for product {} would overflow",
                    product_id
                )));
            }
        }

        self.inventory.reserve(product_id, quantity)?;

        match position {
            Some(idx) => self.items[idx].quantity += quantity,
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity,
            }),
        }
        tracing::debug!(product_id, quantity, "added to cart");
        self.persist();
        Ok(())
    }

    /// Release the item's full quantity and drop it from the cart.
    ///
    /// The item stays in place if the release fails. Removing a product that
    /// is not in the cart does nothing.
    pub fn remove(&mut self, product_id: i64) -> Result<()> {
        let Some(idx) = self.position(product_id) else {
            return Ok(());
        };
        let quantity = self.items[idx].quantity;

        self.inventory.release(product_id, quantity)?;

        self.items.remove(idx);
        tracing::debug!(product_id, quantity, "removed from cart");
        self.persist();
        Ok(())
    }

    /// Change an item's quantity, reserving or releasing only the difference.
    ///
    /// No request is made when the quantity is unchanged. Setting zero
    /// removes the item. Unknown product ids are ignored.
    pub fn set_quantity(&mut self, product_id: i64, new_quantity: u32) -> Result<()> {
        if new_quantity == 0 {
            return self.remove(product_id);
        }
        let Some(idx) = self.position(product_id) else {
            return Ok(());
        };
        let current = self.items[idx].quantity;

        if new_quantity > current {
            self.inventory.reserve(product_id, new_quantity - current)?;
        } else if new_quantity < current {
            self.inventory.release(product_id, current - new_quantity)?;
        } else {
            return Ok(());
        }

        self.items[idx].quantity = new_quantity;
        tracing::debug!(product_id, from = current, to = new_quantity, "cart quantity updated");
        self.persist();
        Ok(())
    }

    /// Release every item and empty the cart.
    ///
    /// Releases are best-effort: failures are logged and otherwise ignored,
    /// and the cart is emptied regardless.
    pub fn clear(&mut self) {
        for item in &self.items {
            let Some(product_id) = item.product_id() else {
                continue;
            };
            if let Err(e) = self.inventory.release(product_id, item.quantity) {
                tracing::warn!(
                    product_id,
                    quantity = item.quantity,
                    error = %e,
                    "failed to release inventory while clearing cart"
                );
            }
        }
        self.items.clear();
        self.persist();
    }

    /// Replace the in-memory cart with whatever storage currently holds.
    pub fn reload(&mut self) {
        self.items = load_items(&self.storage);
    }

    // -- Internals ---------------------------------------------------------

    fn position(&self, product_id: i64) -> Option<usize> {
        self.items
            .iter()
            .position(|i| i.product_id() == Some(product_id))
    }

    /// Write the collection through to storage.
    ///
    /// A failed write is logged; the in-memory cart already matches the
    /// backend's reservations and is kept.
    fn persist(&self) {
        let result = serde_json::to_string(&self.items)
            .map_err(StorefrontError::from)
            .and_then(|json| self.storage.set_item(config::CART_STORAGE_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }
}

/// Read the persisted cart, falling back to empty on absence or corruption.
fn load_items(storage: &LocalStorage) -> Vec<CartItem> {
    let raw = match storage.get_item(config::CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted cart");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<CartItem>>(&raw) {
        Ok(items) => merge_duplicates(items),
        Err(e) => {
            tracing::warn!(error = %e, "corrupt persisted cart -- removing");
            let _ = storage.remove_item(config::CART_STORAGE_KEY);
            Vec::new()
        }
    }
}

/// Drop unusable entries and fold repeated product ids into the first
/// occurrence, summing quantities.
fn merge_duplicates(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 || item.product.id.is_none() {
            continue;
        }
        match merged.iter_mut().find(|m| m.product.id == item.product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => merged.push(item),
        }
    }
    merged
}
