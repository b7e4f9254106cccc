//! # Error Types
//!
//! Parse errors for the value types in this crate.

use thiserror::Error;

/// Errors raised while decoding identifiers and addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input is not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded bytes have the wrong length.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Input is not a data address URI.
    #[error("Invalid data address URI: {0}")]
    InvalidUri(String),

    /// Type tag is missing or not an unsigned integer.
    #[error("Invalid type tag: {0}")]
    InvalidTypeTag(String),
}
