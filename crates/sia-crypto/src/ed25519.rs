//! # Ed25519 Public Keys
//!
//! The 32-byte public key carried by `pk(...)` policies and by legacy
//! unlock conditions. Keys are opaque byte strings at this layer: nothing
//! here checks that the bytes decode to a curve point, because spend
//! policies identify keys, they do not verify signatures.
//!
//! ## Serde
//!
//! Public keys serialize and deserialize as 64-character hex strings.

/// Algorithm specifier used when a key is hashed as a legacy Merkle leaf.
pub const ED25519_SPECIFIER: &str = "ed25519";

/// An Ed25519 public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PublicKey(pub [u8; 32]);

sia_core::impl_hex32!(PublicKey);

#[cfg(test)]
mod tests {
    use super::*;
    use sia_core::{decode_exact, CanonicalBytes, HexError};

    #[test]
    fn test_hex_roundtrip() {
        let pk = PublicKey([0x11; 32]);
        let hex = pk.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(PublicKey::from_hex(&hex).unwrap(), pk);
    }

    #[test]
    fn test_from_hex_wrong_length() {
        assert_eq!(
            PublicKey::from_hex("aabb"),
            Err(HexError::InvalidLength {
                expected: 64,
                got: 4
            })
        );
    }

    #[test]
    fn test_debug_shows_prefix_only() {
        let pk = PublicKey([0xcd; 32]);
        assert_eq!(format!("{pk:?}"), "PublicKey(cdcdcdcd...)");
    }

    #[test]
    fn test_serde_hex_string() {
        let pk = PublicKey([0x01; 32]);
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn test_canonical_encoding_is_raw_bytes() {
        let pk = PublicKey([0x42; 32]);
        let cb = CanonicalBytes::new(&pk);
        assert_eq!(cb.as_bytes(), &[0x42; 32]);
        let back: PublicKey = decode_exact(cb.as_bytes()).unwrap();
        assert_eq!(back, pk);
    }
}
