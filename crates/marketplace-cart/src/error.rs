//! Error types for the cart.

use marketplace_cart_core::CodecError;
use marketplace_cart_store::StoreError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart was looked up without a store having been provided.
    #[error("cart must be used within a CartProvider")]
    NotProvided,

    /// The item descriptor was rejected before touching the cart.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// The cart store was dropped while a subscriber was waiting.
    #[error("cart store closed")]
    Closed,

    /// Payload encoding error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;
