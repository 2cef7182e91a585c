//! # Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! Hashing and encoding are total and have no error type. Only the two
//! fallible inbound paths do: decoding canonical bytes and parsing
//! fixed-length hex identifiers.

use thiserror::Error;

/// Error while decoding the canonical binary encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input ended before a fixed-width field could be read.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes required by the field being read.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },

    /// The leading version byte is not one this decoder understands.
    #[error("unsupported encoding version {0}")]
    UnsupportedVersion(u8),

    /// A type opcode did not match any known variant.
    #[error("unknown opcode {0}")]
    UnknownOpcode(u8),

    /// Threshold policies were nested deeper than the decoder accepts.
    #[error("nesting deeper than {max} levels")]
    NestingTooDeep {
        /// Deepest nesting accepted.
        max: usize,
    },

    /// Bytes remained after a complete value was decoded.
    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),
}

/// Error while parsing a fixed-length hex identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    /// The hex string has the wrong number of characters.
    #[error("expected {expected} hex chars, got {got}")]
    InvalidLength {
        /// Required number of hex characters.
        expected: usize,
        /// Number of characters supplied.
        got: usize,
    },

    /// The string contains a character outside `[0-9a-fA-F]`.
    #[error("invalid hex: {0}")]
    InvalidCharacter(String),
}

impl From<hex::FromHexError> for HexError {
    fn from(err: hex::FromHexError) -> Self {
        HexError::InvalidCharacter(err.to_string())
    }
}
