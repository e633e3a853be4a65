//! # Marketplace Cart Store
//!
//! Key-value storage abstraction for the Marketplace Cart. Provides a
//! trait-based interface for persisting the cart payload with SQLite and
//! in-memory implementations.
//!
//! ## Overview
//!
//! The cart only ever needs to read and overwrite a single text payload
//! under a fixed key, so the abstraction is a plain string-to-string store
//! behind the [`KeyValueStore`] trait. The primary implementation is
//! [`SqliteStore`], with [`MemoryStore`] for tests and previews.
//!
//! ## Key Types
//!
//! - [`KeyValueStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use marketplace_cart_store::{KeyValueStore, SqliteStore};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("cart.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     store.set("@GoMarketplace:products", "[]").await.unwrap();
//!     let payload = store.get("@GoMarketplace:products").await.unwrap();
//!     assert_eq!(payload.as_deref(), Some("[]"));
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Last write wins**: `set` fully replaces any previous value for the key
//! - **Absent is not an error**: `get` on a missing key returns `Ok(None)`

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;
