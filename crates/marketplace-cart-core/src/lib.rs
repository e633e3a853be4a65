//! # Marketplace Cart Core
//!
//! Pure primitives for the Marketplace Cart: items, cart state transitions,
//! and the persisted payload encoding.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over an ordered list of cart lines.
//!
//! ## Key Types
//!
//! - [`Item`] - One product line in the cart, with a quantity
//! - [`NewItem`] - An item descriptor as handed to "add to cart"
//! - [`CartState`] - The ordered, id-unique sequence of items
//!
//! ## Transitions
//!
//! Every transition on [`CartState`] returns a new value and leaves the
//! receiver untouched:
//!
//! ```rust
//! use marketplace_cart_core::{CartState, NewItem};
//!
//! let empty = CartState::new();
//! let one = empty.with_added(NewItem::new("p1", "Shirt", "u", 10.0));
//! let two = one.with_incremented("p1");
//! assert_eq!(two.quantity_of("p1"), Some(2));
//!
//! let gone = one.with_decremented("p1");
//! assert!(gone.is_empty());
//! ```
//!
//! ## Encoding
//!
//! The cart is persisted as a JSON array. See the [`codec`] module.

pub mod cart;
pub mod codec;
pub mod error;
pub mod item;

pub use cart::CartState;
pub use codec::{decode, encode};
pub use error::{CodecError, Result};
pub use item::{Item, NewItem};
