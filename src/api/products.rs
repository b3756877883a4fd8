//! Product catalog CRUD against the `/products` endpoints.

use reqwest::Method;

use crate::config;
use crate::error::Result;
use crate::models::{NewProduct, Page, Product, ProductPatch};
use crate::transport::HttpTransport;

// ---------------------------------------------------------------------------
// ListProductsParams
// ---------------------------------------------------------------------------

/// Parameters for [`ProductClient::list`].
#[derive(Debug, Clone)]
pub struct ListProductsParams {
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
    /// Free-text filter; empty means no filter.
    pub q: String,
}

impl Default for ListProductsParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: config::DEFAULT_PAGE_SIZE,
            q: String::new(),
        }
    }
}

impl ListProductsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("q", self.q.clone()),
        ]
    }
}

// ---------------------------------------------------------------------------
// ProductClient
// ---------------------------------------------------------------------------

/// Pass-through client for the product catalog.
///
/// Create and update bodies are validated before the request is sent; every
/// other business rule is the backend's.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: HttpTransport,
}

impl ProductClient {
    pub fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    /// List one page of products, optionally filtered by `q`.
    pub fn list(&self, params: &ListProductsParams) -> Result<Page<Product>> {
        let page = self
            .http
            .get_json::<Page<Product>>("products", &params.to_query())?;
        Ok(page.unwrap_or_else(|| Page {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: params.page,
            size: params.size,
        }))
    }

    /// Get a single product, or `None` if the catalog has no such id.
    pub fn get(&self, id: i64) -> Result<Option<Product>> {
        self.http.get_json(&format!("products/{}", id), &[])
    }

    pub fn create(&self, product: &NewProduct) -> Result<Product> {
        product.validate()?;
        self.http.send_json(Method::POST, "products", product)
    }

    /// Apply a partial update and return the stored product.
    pub fn update(&self, id: i64, patch: &ProductPatch) -> Result<Product> {
        patch.validate()?;
        self.http
            .send_json(Method::PUT, &format!("products/{}", id), patch)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("products/{}", id))
    }
}
