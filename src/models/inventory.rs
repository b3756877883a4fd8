use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationErrors};

// ---------------------------------------------------------------------------
// InventoryRecord — Stock levels owned by the inventory service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub product_id: i64,
    pub quantity: u32,
    pub reserved: u32,
    pub available: u32,
}

impl InventoryRecord {
    /// Whether `available == quantity - reserved` holds for this record.
    pub fn is_consistent(&self) -> bool {
        self.reserved <= self.quantity && self.available == self.quantity - self.reserved
    }

    pub fn in_stock(&self) -> bool {
        self.available > 0
    }
}

// ---------------------------------------------------------------------------
// QuantityRequest — Body of reserve and release calls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRequest {
    pub quantity: u32,
}

impl QuantityRequest {
    pub fn new(quantity: u32) -> Result<Self> {
        let mut errors = ValidationErrors::new();
        if quantity == 0 {
            errors.add("quantity", "Quantity must be at least 1");
        }
        errors.into_result()?;
        Ok(Self { quantity })
    }
}
