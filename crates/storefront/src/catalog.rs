//! Product catalog shown on the landing page.
//!
//! Products are display cards: a name, a price as it is printed on the card,
//! and an image. Adding a card to the cart copies those three values into a
//! line item, so the catalog is only consulted at add time.
//!
//! The built-in catalog can be replaced with a JSON file:
//!
//! ```json
//! [{"handle":"blue-shirt","name":"Blue Shirt","price":"$50","image":"/static/images/blue-shirt.svg"}]
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product handle: {0}")]
    DuplicateHandle(String),
}

/// A product card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// URL-safe identifier used by the add-to-cart form.
    pub handle: String,
    pub name: String,
    /// Price text exactly as displayed on the card.
    pub price: String,
    #[serde(default)]
    pub image: String,
}

/// The ordered list of products on sale.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate handles.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateHandle` if two products share a handle.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (i, product) in products.iter().enumerate() {
            if products
                .iter()
                .skip(i + 1)
                .any(|other| other.handle == product.handle)
            {
                return Err(CatalogError::DuplicateHandle(product.handle.clone()));
            }
        }
        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed, or if it
    /// contains duplicate handles.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::new(serde_json::from_str(&raw)?)
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by handle.
    #[must_use]
    pub fn find(&self, handle: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.handle == handle)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let product = |handle: &str, name: &str, price: &str| Product {
            handle: handle.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            image: format!("/static/images/{handle}.svg"),
        };
        Self {
            products: Arc::new(vec![
                product("blue-shirt", "Blue Shirt", "$50"),
                product("denim-jacket", "Denim Jacket", "$89.99"),
                product("canvas-sneakers", "Canvas Sneakers", "$64.00"),
                product("linen-trousers", "Linen Trousers", "$45.50"),
                product("wool-beanie", "Wool Beanie", "$18"),
                product("leather-belt", "Leather Belt", "$32.00"),
            ]),
        }
    }
}
