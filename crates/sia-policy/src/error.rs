//! # Policy Parse Errors
//!
//! Every failure the text parser can report. Parsing stops at the first
//! failure, so the error returned is always the first one encountered.

use sia_core::HexError;
use thiserror::Error;

/// Error parsing the textual policy language.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A numeric token is not an unsigned decimal integer or exceeds the
    /// field's bit width.
    #[error("invalid {bits}-bit integer {token:?}")]
    MalformedInteger {
        /// The offending token.
        token: String,
        /// Bit width of the field being parsed.
        bits: u32,
    },

    /// A public-key token is not exactly 64 hex characters.
    #[error("invalid public key: {0}")]
    MalformedKey(#[from] HexError),

    /// A specific delimiter was expected and something else was found.
    #[error("expected {expected:?}, got {found:?}")]
    UnexpectedDelimiter {
        /// The delimiter the grammar requires here.
        expected: char,
        /// The character actually present.
        found: char,
    },

    /// Input ended where the grammar requires more.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The leading token is not a known policy type.
    #[error("unrecognized policy type {0:?}")]
    UnrecognizedPolicyType(String),

    /// Input remained after a complete policy.
    #[error("trailing bytes: {0:?}")]
    TrailingBytes(String),

    /// A list holds more entries than its one-byte count can express.
    #[error("list longer than {max} entries")]
    ListTooLong {
        /// Most entries a list may hold.
        max: usize,
    },

    /// Thresholds are nested deeper than the parser accepts.
    #[error("nesting deeper than {max} levels")]
    NestingTooDeep {
        /// Deepest nesting accepted.
        max: usize,
    },

    /// Byte input to the text adapter was not UTF-8.
    #[error("policy text is not valid UTF-8")]
    InvalidUtf8,
}
