//! # Marketplace Cart
//!
//! A persistent shopping-cart state container: an in-memory list of cart
//! lines, kept in sync with a key-value store on every change and rehydrated
//! from it on startup.
//!
//! ## Overview
//!
//! - **CartStore**: owns the live cart, applies `add_to_cart`, `increment`
//!   and `decrement`, publishes snapshots, and writes each change through to
//!   storage
//! - **Snapshots**: every change publishes a fresh `Arc<CartState>`, so
//!   observers can detect changes with `Arc::ptr_eq`
//! - **CartProvider**: hands one shared `CartStore` to many call sites
//!
//! ## Usage
//!
//! ```rust,no_run
//! use marketplace_cart::{CartConfig, CartStore, NewItem};
//! use marketplace_cart::store::SqliteStore;
//!
//! async fn example() {
//!     // Open storage
//!     let storage = SqliteStore::open("cart.db").unwrap();
//!
//!     // Create the cart and restore whatever was saved last session
//!     let cart = CartStore::open(storage, CartConfig::default()).await;
//!
//!     // Mutate
//!     cart.add_to_cart(NewItem::new("p1", "Shirt", "https://img/p1.png", 10.0))
//!         .await
//!         .unwrap();
//!     cart.increment("p1").await;
//!
//!     assert_eq!(cart.snapshot().quantity_of("p1"), Some(2));
//! }
//! ```
//!
//! ## Failure policy
//!
//! Storage and encoding failures while persisting a change are logged and
//! swallowed: the in-memory cart stays authoritative and usable. Use
//! [`CartStore::flush`] when the caller needs to know whether the cart
//! reached storage.
//!
//! ## Re-exports
//!
//! - `marketplace_cart::core` - Data model and payload codec
//! - `marketplace_cart::store` - Storage abstraction and SQLite

pub mod cart;
pub mod error;
pub mod provider;

// Re-export component crates
pub use marketplace_cart_core as core;
pub use marketplace_cart_store as store;

// Re-export main types for convenience
pub use cart::{
    CartConfig, CartStore, CartSubscription, DynCartStore, Hydration, Mutation, Persisted,
    DEFAULT_STORAGE_KEY,
};
pub use error::{CartError, Result};
pub use provider::CartProvider;

// Re-export commonly used core types
pub use marketplace_cart_core::{CartState, Item, NewItem};
pub use marketplace_cart_store::KeyValueStore;
