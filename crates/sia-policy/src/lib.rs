//! # sia-policy: Spend Policies
//!
//! The algebra of conditions under which an output can be spent, and the
//! three ways a policy is identified or transported:
//!
//! - **Address** ([`SpendPolicy::address`]): the 32-byte commitment outputs
//!   are sent to. Domain-separated BLAKE2b-256 over the canonical encoding,
//!   except for legacy unlock conditions, which keep their Merkle root.
//! - **Canonical encoding** ([`sia_core::EncodeTo`]): versioned, opcode-tagged
//!   bytes. Deterministic, so equal policies always hash equally.
//! - **Text** ([`std::fmt::Display`] / [`parse_spend_policy`]): the human
//!   readable form, e.g. `thresh(1,[pk(...),above(100)])`. Display output
//!   always parses back to the same policy.
//!
//! Policies are plain immutable values. Nothing here verifies signatures or
//! evaluates a policy against chain state.

pub mod address;
pub mod error;
pub mod parse;
pub mod policy;
pub mod text;

pub use address::{standard_address, ADDRESS_DOMAIN};
pub use error::ParseError;
pub use parse::parse_spend_policy;
pub use policy::{
    SpendPolicy, UnlockConditions, ENCODING_VERSION, MAX_LIST_LEN, MAX_NESTING_DEPTH,
};
