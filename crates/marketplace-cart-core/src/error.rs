//! Error types for the Marketplace Cart Core.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a cart payload.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encoding error: {0}")]
    Encode(String),

    #[error("decoding error: {0}")]
    Decode(String),

    /// The payload parsed but violates a cart invariant.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
