//! # sia-core: Foundational Types for Spend Policies
//!
//! The leaf of the workspace dependency DAG. Defines the primitives that
//! spend-policy identification is built on:
//!
//! 1. **`Hash256` and `hash_bytes()`.** BLAKE2b with a 256-bit output is the
//!    only hash function in the workspace.
//!
//! 2. **Canonical encoding.** `Encoder`/`Decoder` with the `EncodeTo` and
//!    `DecodeFrom` traits. Digests of structured values are always computed
//!    over these bytes, never over ad-hoc serializations.
//!
//! 3. **Pooled, domain-separated hashing.** `HasherPool::checkout()` yields an
//!    exclusive, freshly reset `Hasher` that returns to the pool on drop.
//!
//! 4. **`Address`.** The opaque 32-byte output of address derivation.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sia-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod hex32;

pub use address::Address;
pub use encoding::{decode_exact, CanonicalBytes, DecodeFrom, Decoder, EncodeTo, Encoder};
pub use error::{DecodeError, HexError};
pub use hash::{hash_bytes, hash_canonical, Hash256, Hasher, HasherPool, PooledHasher};

#[doc(hidden)]
pub use hex as __hex;
#[doc(hidden)]
pub use serde as __serde;
