pub mod cart;
pub mod inventory;
pub mod product;

pub use cart::*;
pub use inventory::*;
pub use product::*;
