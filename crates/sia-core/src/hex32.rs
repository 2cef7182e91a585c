//! # Fixed-Length Hex Identifiers
//!
//! Every 32-byte value in the workspace (digests, addresses, public keys)
//! shares one text form: exactly 64 hex characters, rendered lowercase.
//! [`impl_hex32!`](crate::impl_hex32) stamps out the accessors, `Display`,
//! `FromStr`, serde and canonical-encoding impls for such a newtype so the
//! rules cannot drift between types.

use crate::error::HexError;

/// Number of hex characters in the text form of a 32-byte value.
pub const HEX32_LEN: usize = 64;

/// Decode exactly 64 hex characters (either case) into 32 bytes.
pub fn decode_hex32(s: &str) -> Result<[u8; 32], HexError> {
    if s.len() != HEX32_LEN {
        return Err(HexError::InvalidLength {
            expected: HEX32_LEN,
            got: s.len(),
        });
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(s, &mut out)?;
    Ok(out)
}

/// Short prefix used by `Debug` impls so logs never carry full values.
pub fn hex_prefix(bytes: &[u8; 32]) -> String {
    hex::encode(&bytes[..4])
}

/// Implement the shared 32-byte newtype surface for `$name(pub [u8; 32])`.
#[macro_export]
macro_rules! impl_hex32 {
    ($name:ident) => {
        impl $name {
            /// Wrap raw bytes.
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// The raw 32 bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Render as 64 lowercase hex characters.
            pub fn to_hex(&self) -> String {
                $crate::__hex::encode(self.0)
            }

            /// Parse from exactly 64 hex characters (either case).
            pub fn from_hex(s: &str) -> Result<Self, $crate::error::HexError> {
                $crate::hex32::decode_hex32(s).map(Self)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(
                    f,
                    concat!(stringify!($name), "({}...)"),
                    $crate::hex32::hex_prefix(&self.0)
                )
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::HexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S: $crate::__serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D: $crate::__serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let s = <String as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(<D::Error as $crate::__serde::de::Error>::custom)
            }
        }

        impl $crate::encoding::EncodeTo for $name {
            fn encode_to(&self, e: &mut $crate::encoding::Encoder) {
                e.write_bytes(&self.0);
            }
        }

        impl $crate::encoding::DecodeFrom for $name {
            fn decode_from(
                d: &mut $crate::encoding::Decoder<'_>,
            ) -> Result<Self, $crate::error::DecodeError> {
                d.read_array::<32>().map(Self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_accepts_both_cases() {
        let lower = decode_hex32(&"ab".repeat(32)).unwrap();
        let upper = decode_hex32(&"AB".repeat(32)).unwrap();
        assert_eq!(lower, [0xab; 32]);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_decode_wrong_length() {
        assert_eq!(
            decode_hex32("00"),
            Err(HexError::InvalidLength {
                expected: 64,
                got: 2
            })
        );
    }

    #[test]
    fn test_decode_non_hex() {
        let s = format!("{}zz", "0".repeat(62));
        assert!(matches!(
            decode_hex32(&s),
            Err(HexError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_hex_prefix() {
        assert_eq!(hex_prefix(&[0xde; 32]), "dededede");
    }
}
