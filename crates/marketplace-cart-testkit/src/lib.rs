//! # Marketplace Cart Testkit
//!
//! Testing utilities for the Marketplace Cart.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Payload vectors**: Known stored payloads with their expected decoding
//! - **Generators**: Proptest strategies for items, operations, and carts
//! - **Fixtures**: A memory-backed cart plus failing and recording stores
//!
//! ## Payload Vectors
//!
//! ```rust
//! use marketplace_cart_testkit::vectors::verify_all_vectors;
//!
//! assert!(verify_all_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use marketplace_cart_testkit::generators::{cart_ops, replay};
//!
//! proptest! {
//!     #[test]
//!     fn quantities_stay_positive(ops in cart_ops(64)) {
//!         let state = replay(&ops);
//!         prop_assert!(state.iter().all(|item| item.quantity >= 1));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use marketplace_cart_testkit::fixtures::{item, TestFixture};
//!
//! let fixture = TestFixture::new().await;
//! fixture.cart.add_to_cart(item("p1")).await?;
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{item, FailingStore, RecordingStore, TestFixture};
pub use generators::{cart_ops, cart_state, new_item, replay, CartOp};
pub use vectors::{all_vectors, verify_all_vectors, PayloadVector};
