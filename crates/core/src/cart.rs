//! The cart and its line items.
//!
//! A cart is an ordered list of line items, in the order they were first
//! added. Item names are unique: adding a name that is already present bumps
//! its quantity instead of appending a second row.
//!
//! Carts serialize as a bare JSON array:
//!
//! ```json
//! [{"id":"…","name":"Blue Shirt","price":"$50.00","image":"/static/img/blue.jpg","quantity":2}]
//! ```
//!
//! Blobs written before items carried an `id` still load; a fresh ID is
//! assigned on read.

use serde::{Deserialize, Serialize};

use crate::types::{LineItemId, Price, Quantity};

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable row identity used by edit and remove controls.
    #[serde(default = "LineItemId::generate")]
    pub id: LineItemId,
    /// Display name, unique within a cart.
    pub name: String,
    /// Display-formatted price (e.g. `"$50.00"`).
    pub price: String,
    /// Image URL, possibly empty.
    #[serde(default)]
    pub image: String,
    pub quantity: Quantity,
}

impl LineItem {
    /// The parsed unit price.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::parse(&self.price)
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// An ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all items (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of every line's subtotal.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Add one unit of a product, returning the line's new quantity.
    ///
    /// If an item with exactly this `name` exists its quantity is incremented
    /// and its stored price and image are left alone. Otherwise a new item
    /// with quantity one is appended, with `price` normalized to display form.
    pub fn add_item(&mut self, name: &str, price: &str, image: &str) -> Quantity {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity = item.quantity.incremented();
            return item.quantity;
        }

        self.items.push(LineItem {
            id: LineItemId::generate(),
            name: name.to_string(),
            price: Price::parse(price).to_string(),
            image: image.to_string(),
            quantity: Quantity::ONE,
        });
        Quantity::ONE
    }

    /// Position of the item with the given ID.
    #[must_use]
    pub fn position(&self, id: LineItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Remove the item at `index`. Out-of-range indices are a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove the item with the given ID. Unknown IDs are a no-op.
    pub fn remove(&mut self, id: LineItemId) -> Option<LineItem> {
        self.position(id).and_then(|index| self.remove_at(index))
    }

    /// Set the quantity of the item at `index` from raw input.
    ///
    /// The input is coerced with [`Quantity::parse_lenient`]. Returns the
    /// quantity applied, or `None` if `index` is out of range.
    pub fn set_quantity_at(&mut self, index: usize, raw: &str) -> Option<Quantity> {
        let item = self.items.get_mut(index)?;
        item.quantity = Quantity::parse_lenient(raw);
        Some(item.quantity)
    }

    /// Set the quantity of the item with the given ID from raw input.
    pub fn set_quantity(&mut self, id: LineItemId, raw: &str) -> Option<Quantity> {
        self.position(id)
            .and_then(|index| self.set_quantity_at(index, raw))
    }
}
