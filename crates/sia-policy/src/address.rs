//! # Address Derivation
//!
//! An address is the 32-byte commitment to a policy that outputs are sent
//! to. Modern policies hash a domain separator followed by their canonical
//! encoding:
//!
//! ```text
//! address = BLAKE2b-256( u64le(len) || "sia/address" || version || body )
//! ```
//!
//! The legacy unlock-conditions variant instead uses its Merkle root, so
//! that addresses derived under the predecessor format keep resolving.

use sia_core::{Address, HasherPool};
use sia_crypto::PublicKey;

use crate::policy::SpendPolicy;

/// Domain separator prefixed to every modern policy's address preimage.
pub const ADDRESS_DOMAIN: &str = "sia/address";

impl SpendPolicy {
    /// Derive the address of this policy using the process-wide hasher pool.
    pub fn address(&self) -> Address {
        self.address_with(HasherPool::global())
    }

    /// Derive the address of this policy with a hasher from `pool`.
    ///
    /// The result does not depend on which pool is used or on what the
    /// pooled hasher held before checkout.
    pub fn address_with(&self, pool: &HasherPool) -> Address {
        if let SpendPolicy::UnlockConditions(uc) = self {
            tracing::trace!(keys = uc.public_keys.len(), "legacy unlock conditions address");
            return Address::from(uc.root());
        }
        let mut h = pool.checkout();
        h.write_domain(ADDRESS_DOMAIN);
        h.write(self);
        Address::from(h.sum())
    }
}

/// The address of a single-key policy, `pk(key)`.
pub fn standard_address(key: PublicKey) -> Address {
    SpendPolicy::public_key(key).address()
}
