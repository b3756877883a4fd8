use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ValidationErrors};

// ---------------------------------------------------------------------------
// Product — A catalog entry as returned by the product service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, &self.name);
        check_description(&mut errors, &self.description);
        check_price(&mut errors, self.price);
        check_image_url(&mut errors, self.image_url.as_deref());
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// NewProduct — Create body (product fields minus id)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            sku: None,
            name: name.into(),
            description: description.into(),
            price,
            image_url: None,
            category: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, &self.name);
        check_description(&mut errors, &self.description);
        check_price(&mut errors, self.price);
        check_image_url(&mut errors, self.image_url.as_deref());
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// ProductPatch — Partial update body
// ---------------------------------------------------------------------------

/// Partial update; only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductPatch {
    /// Validate only the fields the patch carries.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if let Some(ref name) = self.name {
            check_name(&mut errors, name);
        }
        if let Some(ref description) = self.description {
            check_description(&mut errors, description);
        }
        if let Some(price) = self.price {
            check_price(&mut errors, price);
        }
        check_image_url(&mut errors, self.image_url.as_deref());
        errors.into_result()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Page — Paginated list envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.number + 1 >= self.total_pages
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

fn check_name(errors: &mut ValidationErrors, name: &str) {
    if name.trim().is_empty() {
        errors.add("name", "Product name is required");
    }
}

fn check_description(errors: &mut ValidationErrors, description: &str) {
    if description.trim().is_empty() {
        errors.add("description", "Description is required");
    }
}

fn check_price(errors: &mut ValidationErrors, price: f64) {
    if !price.is_finite() || price <= 0.0 {
        errors.add("price", "Price must be positive");
    }
}

fn check_image_url(errors: &mut ValidationErrors, image_url: Option<&str>) {
    if let Some(raw) = image_url {
        if Url::parse(raw).is_err() {
            errors.add("imageUrl", "Must be a valid URL");
        }
    }
}
