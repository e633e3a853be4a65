//! Sharing one cart across many call sites.
//!
//! A [`CartProvider`] is constructed once at startup and cloned into every
//! consumer. Consumers call [`CartProvider::cart`]; doing so before a store
//! has been provided is a programming error and fails with
//! [`CartError::NotProvided`].

use std::sync::{Arc, RwLock};

use marketplace_cart_store::KeyValueStore;

use crate::cart::CartStore;
use crate::error::{CartError, Result};

/// A shared slot holding the session's [`CartStore`].
///
/// Clones share the same slot, so a store provided through one clone is
/// visible through all of them.
pub struct CartProvider<S: KeyValueStore> {
    slot: Arc<RwLock<Option<Arc<CartStore<S>>>>>,
}

impl<S: KeyValueStore> CartProvider<S> {
    /// A provider with no cart yet.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// A provider holding `cart`.
    pub fn with_store(cart: Arc<CartStore<S>>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(cart))),
        }
    }

    /// Install the cart, replacing any previously provided one.
    pub fn provide(&self, cart: Arc<CartStore<S>>) {
        let mut slot = match self.slot.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(cart);
    }

    /// The provided cart.
    ///
    /// # Errors
    ///
    /// [`CartError::NotProvided`] when no cart has been provided.
    pub fn cart(&self) -> Result<Arc<CartStore<S>>> {
        let slot = match self.slot.read() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.as_ref().map(Arc::clone).ok_or(CartError::NotProvided)
    }

    /// Whether a cart has been provided.
    pub fn is_provided(&self) -> bool {
        self.cart().is_ok()
    }
}

impl<S: KeyValueStore> Clone for CartProvider<S> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<S: KeyValueStore> Default for CartProvider<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: KeyValueStore> std::fmt::Debug for CartProvider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartProvider")
            .field("provided", &self.is_provided())
            .finish()
    }
}
