//! # Policy Text Form and Adapters
//!
//! `Display` writes the canonical text form: no whitespace, lowercase hex,
//! empty lists as `[]`. It is the exact inverse of the parser.
//!
//! The byte adapters mirror the legacy marshaling rules:
//! - Text: the canonical string as UTF-8 bytes.
//! - JSON: the canonical string wrapped in `"`. Decoding strips one leading
//!   and one trailing `"` and hands the rest to the parser unchanged, with
//!   no unescaping. The grammar contains no characters that JSON escapes,
//!   so this is lossless for every well-formed policy.
//!
//! The serde impls go through a proper string value instead, so embedding
//! a policy in any serde format gets that format's own quoting rules.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;
use crate::parse::parse_spend_policy;
use crate::policy::SpendPolicy;

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        item(f, v)?;
    }
    f.write_str("]")
}

impl fmt::Display for SpendPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpendPolicy::Above(height) => write!(f, "above({height})"),
            SpendPolicy::PublicKey(pk) => write!(f, "pk({pk})"),
            SpendPolicy::Threshold { n, of } => {
                write!(f, "thresh({n},")?;
                write_list(f, of, |f, p| fmt::Display::fmt(p, f))?;
                f.write_str(")")
            }
            SpendPolicy::UnlockConditions(uc) => {
                write!(f, "uc({},", uc.timelock)?;
                write_list(f, &uc.public_keys, |f, pk| fmt::Display::fmt(pk, f))?;
                write!(f, ",{})", uc.signatures_required)
            }
        }
    }
}

impl SpendPolicy {
    /// The canonical text form as bytes.
    pub fn to_text_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parse the text form from bytes.
    pub fn from_text_bytes(b: &[u8]) -> Result<Self, ParseError> {
        let s = std::str::from_utf8(b).map_err(|_| ParseError::InvalidUtf8)?;
        parse_spend_policy(s)
    }

    /// The canonical text form as a JSON string literal.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        format!("\"{self}\"").into_bytes()
    }

    /// Parse a JSON string literal holding the text form.
    ///
    /// Strips one surrounding quote on each side, if present; does not
    /// unescape.
    pub fn from_json_bytes(b: &[u8]) -> Result<Self, ParseError> {
        let b = b.strip_prefix(b"\"").unwrap_or(b);
        let b = b.strip_suffix(b"\"").unwrap_or(b);
        Self::from_text_bytes(b)
    }
}

impl Serialize for SpendPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpendPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_spend_policy(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::UnlockConditions;
    use sia_crypto::PublicKey;

    #[test]
    fn test_display_each_variant() {
        assert_eq!(SpendPolicy::above(42).to_string(), "above(42)");
        assert_eq!(
            SpendPolicy::public_key(PublicKey([0xab; 32])).to_string(),
            format!("pk({})", "ab".repeat(32))
        );
        assert_eq!(SpendPolicy::anyone_can_spend().to_string(), "thresh(0,[])");
        assert_eq!(
            SpendPolicy::threshold(1, vec![SpendPolicy::above(1), SpendPolicy::above(2)])
                .to_string(),
            "thresh(1,[above(1),above(2)])"
        );
        assert_eq!(
            SpendPolicy::unlock_conditions(UnlockConditions {
                timelock: 3,
                public_keys: vec![PublicKey([1; 32]), PublicKey([2; 32])],
                signatures_required: 2,
            })
            .to_string(),
            format!("uc(3,[{},{}],2)", "01".repeat(32), "02".repeat(32))
        );
        assert_eq!(
            SpendPolicy::unlock_conditions(UnlockConditions::default()).to_string(),
            "uc(0,[],0)"
        );
    }

    #[test]
    fn test_text_bytes_roundtrip() {
        let p = SpendPolicy::threshold(1, vec![SpendPolicy::above(9)]);
        assert_eq!(SpendPolicy::from_text_bytes(&p.to_text_bytes()).unwrap(), p);
    }

    #[test]
    fn test_text_bytes_invalid_utf8() {
        assert_eq!(
            SpendPolicy::from_text_bytes(&[0xff, 0xfe]),
            Err(ParseError::InvalidUtf8)
        );
    }

    #[test]
    fn test_json_bytes_wraps_in_quotes() {
        assert_eq!(SpendPolicy::above(5).to_json_bytes(), b"\"above(5)\"");
    }

    #[test]
    fn test_json_bytes_strips_one_layer() {
        assert_eq!(
            SpendPolicy::from_json_bytes(b"\"above(5)\"").unwrap(),
            SpendPolicy::above(5)
        );
        // Unquoted input is accepted as-is.
        assert_eq!(
            SpendPolicy::from_json_bytes(b"above(5)").unwrap(),
            SpendPolicy::above(5)
        );
        // A second layer of quotes reaches the parser.
        assert!(SpendPolicy::from_json_bytes(b"\"\"above(5)\"\"").is_err());
    }

    #[test]
    fn test_serde_embeds_as_string() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Output {
            value: u64,
            policy: SpendPolicy,
        }
        let out = Output {
            value: 10,
            policy: SpendPolicy::threshold(0, vec![SpendPolicy::above(1)]),
        };
        let json = serde_json::to_string(&out).unwrap();
        assert_eq!(json, r#"{"value":10,"policy":"thresh(0,[above(1)])"}"#);
        let back: Output = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);
    }

    #[test]
    fn test_serde_rejects_oversized_and_overnested() {
        let list = vec!["above(1)"; crate::policy::MAX_LIST_LEN + 1].join(",");
        let json = format!("\"thresh(1,[{list}])\"");
        let err = serde_json::from_str::<SpendPolicy>(&json).unwrap_err();
        assert!(err.to_string().contains("list longer than"), "{err}");

        let deep = "thresh(1,[".repeat(10_000);
        let err = serde_json::from_str::<SpendPolicy>(&format!("\"{deep}\"")).unwrap_err();
        assert!(err.to_string().contains("nesting deeper than"), "{err}");
    }

    #[test]
    fn test_serde_rejects_malformed_policy() {
        let result: Result<SpendPolicy, _> = serde_json::from_str("\"above(5)xyz\"");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("trailing bytes"), "{err}");
    }
}
