//! # Policy Text Parser
//!
//! Recursive-descent parser for the policy language written by the
//! `Display` impl:
//!
//! ```text
//! above(<height>)
//! pk(<64 hex chars>)
//! thresh(<n>,[<policy>,...])
//! uc(<timelock>,[<hex key>,...],<sigs>)
//! ```
//!
//! A token is the text before the next `(`, `)`, `,`, `[` or `]`, with
//! surrounding whitespace removed. Whitespace is therefore allowed around
//! delimiters but never inside a token. Every step returns `Result`, and
//! the first failure aborts the whole parse, so only the first error is
//! ever reported and no partially built policy escapes.
//!
//! Lists hold at most [`MAX_LIST_LEN`] entries and thresholds nest at most
//! [`MAX_NESTING_DEPTH`] deep. Both limits are checked before the offending
//! input is descended into, so hostile text fails fast with an error.

use sia_core::hex32::decode_hex32;
use sia_crypto::PublicKey;

use crate::error::ParseError;
use crate::policy::{SpendPolicy, UnlockConditions, MAX_LIST_LEN, MAX_NESTING_DEPTH};

const DELIMITERS: [char; 5] = ['(', ')', ',', '[', ']'];

/// Parse a spend policy from its text form.
pub fn parse_spend_policy(s: &str) -> Result<SpendPolicy, ParseError> {
    let mut parser = Parser { s, depth: 0 };
    let result = parser.policy().and_then(|p| {
        let rest = parser.s.trim();
        if rest.is_empty() {
            Ok(p)
        } else {
            Err(ParseError::TrailingBytes(rest.to_string()))
        }
    });
    if let Err(ref e) = result {
        tracing::debug!(error = %e, "spend policy parse failed");
    }
    result
}

struct Parser<'a> {
    s: &'a str,
    /// Thresholds enclosing the current position.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Take the text before the next delimiter. Returns an empty token,
    /// consuming nothing, when no delimiter remains.
    fn next_token(&mut self) -> &'a str {
        self.s = self.s.trim();
        match self.s.find(&DELIMITERS[..]) {
            Some(i) => {
                let (token, rest) = self.s.split_at(i);
                self.s = rest;
                token.trim()
            }
            None => "",
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.s = self.s.trim_start();
        self.s.chars().next()
    }

    fn consume(&mut self, expected: char) -> Result<(), ParseError> {
        self.s = self.s.trim();
        match self.s.chars().next() {
            None => Err(ParseError::UnexpectedEof),
            Some(c) if c == expected => {
                self.s = &self.s[c.len_utf8()..];
                Ok(())
            }
            Some(found) => Err(ParseError::UnexpectedDelimiter { expected, found }),
        }
    }

    fn uint(&mut self, bits: u32) -> Result<u64, ParseError> {
        let token = self.next_token();
        let malformed = || ParseError::MalformedInteger {
            token: token.to_string(),
            bits,
        };
        // `str::parse` would also accept a leading '+'.
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let v: u64 = token.parse().map_err(|_| malformed())?;
        if bits < 64 && v >> bits != 0 {
            return Err(malformed());
        }
        Ok(v)
    }

    fn u64(&mut self) -> Result<u64, ParseError> {
        self.uint(64)
    }

    fn u8(&mut self) -> Result<u8, ParseError> {
        // `uint(8)` guarantees the value fits.
        self.uint(8).map(|v| v as u8)
    }

    fn public_key(&mut self) -> Result<PublicKey, ParseError> {
        let token = self.next_token();
        Ok(PublicKey(decode_hex32(token)?))
    }

    /// `[item,item,...]`
    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.consume('[')?;
        let mut out = Vec::new();
        while self.peek() != Some(']') {
            if out.len() == MAX_LIST_LEN {
                return Err(ParseError::ListTooLong { max: MAX_LIST_LEN });
            }
            out.push(item(self)?);
            if self.peek() != Some(']') {
                self.consume(',')?;
            }
        }
        self.consume(']')?;
        Ok(out)
    }

    fn policy(&mut self) -> Result<SpendPolicy, ParseError> {
        let typ = self.next_token();
        self.consume('(')?;
        let policy = match typ {
            "above" => SpendPolicy::Above(self.u64()?),
            "pk" => SpendPolicy::PublicKey(self.public_key()?),
            "thresh" => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        max: MAX_NESTING_DEPTH,
                    });
                }
                let n = self.u8()?;
                self.consume(',')?;
                self.depth += 1;
                let of = self.list(Self::policy)?;
                self.depth -= 1;
                SpendPolicy::Threshold { n, of }
            }
            "uc" => {
                let timelock = self.u64()?;
                self.consume(',')?;
                let public_keys = self.list(Self::public_key)?;
                self.consume(',')?;
                let signatures_required = self.u8()?;
                SpendPolicy::UnlockConditions(UnlockConditions {
                    timelock,
                    public_keys,
                    signatures_required,
                })
            }
            other => return Err(ParseError::UnrecognizedPolicyType(other.to_string())),
        };
        self.consume(')')?;
        Ok(policy)
    }
}

impl std::str::FromStr for SpendPolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_spend_policy(s)
    }
}
