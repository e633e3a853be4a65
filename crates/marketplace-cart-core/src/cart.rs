//! Cart state: an ordered, id-unique list of items.
//!
//! Order is insertion order of the first add. Existing lines are updated in
//! place and never moved.

use serde::{Deserialize, Serialize, Serializer};

use crate::codec;
use crate::error::CodecError;
use crate::item::{Item, NewItem};

/// The contents of a cart at a point in time.
///
/// `CartState` is a value: the transition methods return a new state and
/// leave `self` untouched. It serializes as a bare array of items, and
/// deserializing checks the same invariants as [`decode`](crate::codec::decode).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Item>")]
pub struct CartState {
    items: Vec<Item>,
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from items that already satisfy the cart invariants.
    ///
    /// Callers taking items from an untrusted source should go through
    /// [`decode`](crate::codec::decode), which validates them.
    pub(crate) fn from_items_unchecked(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Look up a line by product id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Quantity of the line with this id, if present.
    pub fn quantity_of(&self, id: &str) -> Option<u32> {
        self.get(id).map(|item| item.quantity)
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Add one unit of a product.
    ///
    /// If a line with the same id exists its quantity goes up by one and the
    /// descriptor's other fields are discarded. Otherwise the descriptor is
    /// appended with quantity 1.
    pub fn with_added(&self, new_item: NewItem) -> Self {
        if self.contains(&new_item.id) {
            return self.with_incremented(&new_item.id);
        }

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(Item::from_new(new_item, 1));
        Self { items }
    }

    /// Add one unit to the line with this id. Unknown ids yield an equal state.
    ///
    /// Quantities saturate at `u32::MAX`, so incrementing a line already at
    /// the maximum leaves it unchanged and a following decrement does not
    /// restore it.
    pub fn with_incremented(&self, id: &str) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    item.incremented()
                } else {
                    item.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// Remove one unit from the line with this id.
    ///
    /// A line that reaches zero is dropped from the cart. Unknown ids yield
    /// an equal state.
    pub fn with_decremented(&self, id: &str) -> Self {
        let items = self
            .items
            .iter()
            .filter_map(|item| {
                if item.id == id {
                    item.decremented()
                } else {
                    Some(item.clone())
                }
            })
            .collect();
        Self { items }
    }
}

impl Serialize for CartState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl TryFrom<Vec<Item>> for CartState {
    type Error = CodecError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        codec::validate(&items)?;
        Ok(Self { items })
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
