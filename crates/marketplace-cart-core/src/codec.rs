//! Persisted payload encoding for a [`CartState`].
//!
//! The cart is stored as a JSON array of line objects:
//!
//! ```json
//! [{"id":"p1","title":"Shirt","image_url":"u","price":10.0,"quantity":3}]
//! ```
//!
//! `decode(encode(state))` reproduces `state` exactly. Decoding also checks
//! the cart invariants, so a payload written by something else cannot
//! smuggle in duplicate ids or zero quantities.
//!
//! JSON has no representation for NaN or infinity, so `encode` refuses a
//! cart holding a non-finite price rather than writing `null`.

use std::collections::HashSet;

use crate::cart::CartState;
use crate::error::{CodecError, Result};
use crate::item::Item;

/// Encode a cart to its text payload.
pub fn encode(state: &CartState) -> Result<String> {
    if let Some(item) = state.iter().find(|item| !item.price.is_finite()) {
        return Err(CodecError::Encode(format!(
            "item {} has non-finite price {}",
            item.id, item.price
        )));
    }

    serde_json::to_string(state).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a text payload into a cart, validating the cart invariants.
pub fn decode(payload: &str) -> Result<CartState> {
    let items: Vec<Item> =
        serde_json::from_str(payload).map_err(|e| CodecError::Decode(e.to_string()))?;

    validate(&items)?;
    Ok(CartState::from_items_unchecked(items))
}

pub(crate) fn validate(items: &[Item]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        if item.id.is_empty() {
            return Err(CodecError::InvalidPayload(format!(
                "item at index {index} has an empty id"
            )));
        }
        if item.quantity == 0 {
            return Err(CodecError::InvalidPayload(format!(
                "item {} has quantity 0",
                item.id
            )));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(CodecError::InvalidPayload(format!(
                "duplicate item id {}",
                item.id
            )));
        }
    }

    Ok(())
}
