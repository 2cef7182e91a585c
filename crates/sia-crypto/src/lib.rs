//! # sia-crypto: Key and Merkle Primitives
//!
//! - **`PublicKey`**: the 32-byte ed25519 key referenced by policies. Opaque
//!   bytes with a hex text form; no signing or verification lives here.
//! - **Legacy Merkle accumulator**: the incremental binary Merkle
//!   construction that reproduces historical unlock-conditions addresses.
//!
//! ## Crate Policy
//!
//! - Depends only on `sia-core` internally.
//! - Known-answer vectors for every hash construction; no mocked hashing.

pub mod ed25519;
pub mod merkle;

pub use ed25519::PublicKey;
pub use merkle::{unlock_conditions_root, LegacyAccumulator};
