use serde::{Deserialize, Serialize};

use super::product::Product;

// ---------------------------------------------------------------------------
// CartItem — Product snapshot plus the quantity held in the cart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn product_id(&self) -> Option<i64> {
        self.product.id
    }

    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}
