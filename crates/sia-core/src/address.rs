//! # Address
//!
//! The opaque 32-byte identifier derived from a spend policy. An address
//! has no structure of its own; it is always recomputed from the policy
//! that produced it. The text form is 64 lowercase hex characters, the same
//! as every other 32-byte identifier in the workspace.

use crate::hash::Hash256;

/// An opaque 32-byte address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 32]);

crate::impl_hex32!(Address);

impl From<Hash256> for Address {
    fn from(h: Hash256) -> Self {
        Self(h.0)
    }
}
