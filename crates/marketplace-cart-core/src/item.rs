//! Cart line items.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One product line in the cart.
///
/// While an item is present in a [`CartState`](crate::CartState) its
/// quantity is at least 1. Items that would drop to zero are removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque product identifier, unique within a cart.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Display image reference.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Number of units in the cart.
    pub quantity: u32,
}

impl Item {
    /// Build a cart line from a descriptor with the given quantity.
    pub fn from_new(item: NewItem, quantity: u32) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
            quantity,
        }
    }

    /// The same line with one more unit.
    pub(crate) fn incremented(&self) -> Self {
        Self {
            quantity: self.quantity.saturating_add(1),
            ..self.clone()
        }
    }

    /// The same line with one unit fewer, or `None` once it reaches zero.
    pub(crate) fn decremented(&self) -> Option<Self> {
        match self.quantity.saturating_sub(1) {
            0 => None,
            quantity => Some(Self {
                quantity,
                ..self.clone()
            }),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.id, self.quantity)
    }
}

/// An item descriptor without a quantity, as passed to "add to cart".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl NewItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

impl From<Item> for NewItem {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
        }
    }
}
