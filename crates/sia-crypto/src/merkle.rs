//! # Legacy Unlock-Conditions Merkle Root
//!
//! Reproduces, bit for bit, the Merkle-tree address scheme of the
//! predecessor "unlock conditions" format. The only purpose of this module
//! is to keep historical addresses derivable; the construction must not be
//! changed.
//!
//! ## Algorithm
//!
//! Domain-separated BLAKE2b-256:
//! - `u64` leaf: `H(0x00 || u64_le)` (9 bytes).
//! - Key leaf: `H(0x00 || "ed25519" NUL-padded to 16 || u64_le(32) || key)` (57 bytes).
//! - Node: `H(0x01 || left || right)` (65 bytes).
//!
//! Leaves are appended in order: timelock, each public key, then the
//! required signature count widened to `u64`.
//!
//! The accumulator keeps one subtree root per set bit of the leaf counter.
//! Appending a leaf merges it leftward through every occupied slot, exactly
//! like a binary carry. The root folds the occupied slots from the smallest
//! subtree upward, with the larger (older) subtree on the left. For leaf
//! counts that are not a power of two this differs from a padded balanced
//! tree, and only this construction reproduces the legacy roots.

use sia_core::{hash_bytes, Hash256};

use crate::ed25519::{PublicKey, ED25519_SPECIFIER};

/// Domain prefix for leaf hashes.
pub const LEAF_PREFIX: u8 = 0x00;

/// Domain prefix for internal node hashes.
pub const NODE_PREFIX: u8 = 0x01;

/// Number of subtree slots. One per bit of the `u64` leaf counter; for every
/// leaf count the legacy format could express (at most 255) only the low 8
/// slots are ever touched.
pub const MAX_SUBTREES: usize = 64;

/// Width of the NUL-padded algorithm specifier in a key leaf.
const SPECIFIER_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Leaf and node hashing
// ---------------------------------------------------------------------------

/// Leaf hash of a `u64`: `H(0x00 || u64_le)`.
pub fn u64_leaf(u: u64) -> Hash256 {
    let mut buf = [0u8; 9];
    buf[0] = LEAF_PREFIX;
    buf[1..].copy_from_slice(&u.to_le_bytes());
    hash_bytes(&buf)
}

/// Leaf hash of an ed25519 public key.
pub fn public_key_leaf(pk: &PublicKey) -> Hash256 {
    let key = pk.as_bytes();
    let mut buf = [0u8; 1 + SPECIFIER_LEN + 8 + 32];
    buf[0] = LEAF_PREFIX;
    buf[1..1 + ED25519_SPECIFIER.len()].copy_from_slice(ED25519_SPECIFIER.as_bytes());
    buf[17..25].copy_from_slice(&(key.len() as u64).to_le_bytes());
    buf[25..].copy_from_slice(key);
    hash_bytes(&buf)
}

/// Internal node hash: `H(0x01 || left || right)`.
pub fn node_hash(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut buf = [0u8; 65];
    buf[0] = NODE_PREFIX;
    buf[1..33].copy_from_slice(left.as_bytes());
    buf[33..].copy_from_slice(right.as_bytes());
    hash_bytes(&buf)
}

// ---------------------------------------------------------------------------
// LegacyAccumulator
// ---------------------------------------------------------------------------

/// Incremental Merkle accumulator using O(log n) space.
#[derive(Debug, Clone)]
pub struct LegacyAccumulator {
    /// `trees[i]` holds the root of a complete subtree of `2^i` leaves when
    /// bit `i` of `num_leaves` is set.
    trees: [Hash256; MAX_SUBTREES],
    num_leaves: u64,
}

impl LegacyAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            trees: [Hash256::default(); MAX_SUBTREES],
            num_leaves: 0,
        }
    }

    /// Number of leaves appended so far.
    pub fn num_leaves(&self) -> u64 {
        self.num_leaves
    }

    /// Append a leaf digest.
    pub fn add_leaf(&mut self, mut h: Hash256) {
        let mut i = 0;
        while self.num_leaves & (1 << i) != 0 {
            h = node_hash(&self.trees[i], &h);
            i += 1;
        }
        self.trees[i] = h;
        self.num_leaves += 1;
    }

    /// The tree root, or `None` if no leaves were added.
    pub fn root(&self) -> Option<Hash256> {
        if self.num_leaves == 0 {
            return None;
        }
        let mut i = self.num_leaves.trailing_zeros() as usize;
        let mut root = self.trees[i];
        i += 1;
        while i < MAX_SUBTREES {
            if self.num_leaves & (1 << i) != 0 {
                root = node_hash(&self.trees[i], &root);
            }
            i += 1;
        }
        Some(root)
    }
}

impl Default for LegacyAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Merkle root of a legacy unlock-conditions triple.
///
/// Always has at least two leaves (timelock and signature count), so a
/// root always exists.
pub fn unlock_conditions_root(
    timelock: u64,
    public_keys: &[PublicKey],
    signatures_required: u8,
) -> Hash256 {
    let mut acc = LegacyAccumulator::new();
    acc.add_leaf(u64_leaf(timelock));
    for pk in public_keys {
        acc.add_leaf(public_key_leaf(pk));
    }
    acc.add_leaf(u64_leaf(u64::from(signatures_required)));
    // Non-empty by construction.
    acc.root().unwrap_or_default()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Distinct key lists of the same length give distinct roots.
        #[test]
        fn root_depends_on_key_order(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            prop_assume!(a != b);
            let ka = PublicKey(a);
            let kb = PublicKey(b);
            prop_assert_ne!(
                unlock_conditions_root(0, &[ka, kb], 1),
                unlock_conditions_root(0, &[kb, ka], 1)
            );
        }

        /// Every field feeds the root.
        #[test]
        fn root_depends_on_timelock_and_sigs(t in any::<u64>(), s in any::<u8>()) {
            let base = unlock_conditions_root(t, &[], s);
            prop_assert_ne!(base, unlock_conditions_root(t.wrapping_add(1), &[], s));
            prop_assert_ne!(base, unlock_conditions_root(t, &[], s.wrapping_add(1)));
        }
    }
}
