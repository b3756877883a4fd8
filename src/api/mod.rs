//! HTTP clients for the storefront's backend services.
//!
//! Both clients wrap a shared [`HttpTransport`](crate::transport::HttpTransport)
//! and return `Result<T>` with typed models. Lookups of a single entity return
//! `Ok(None)` on 404 rather than an error.

pub mod inventory;
pub mod products;

pub use inventory::{InventoryClient, InventoryService};
pub use products::{ListProductsParams, ProductClient};
