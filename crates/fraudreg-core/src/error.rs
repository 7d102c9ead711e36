//! # Error Types — Value Decoding
//!
//! Errors raised while turning caller-supplied hex strings into typed
//! Solidity values. All errors carry the offending input so a rejected batch
//! can be traced back to the exact entry.

use thiserror::Error;

/// Error decoding or encoding a registry value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The input contains characters outside `[0-9a-fA-F]`.
    #[error("invalid hex value {value:?}: {reason}")]
    InvalidHex {
        /// The rejected input as supplied.
        value: String,
        /// Decoder message.
        reason: String,
    },

    /// The input decodes to the wrong number of bytes for its type.
    #[error("value {value:?} has {actual} hex digits, expected {expected}")]
    InvalidLength {
        /// The rejected input as supplied.
        value: String,
        /// Expected number of hex digits (without prefix).
        expected: usize,
        /// Actual number of characters after the prefix.
        actual: usize,
    },

    /// A Solidity type tag outside the supported set.
    #[error("unsupported leaf type {0:?}; expected \"address\" or \"bytes32\"")]
    UnknownType(String),
}
