//! # Spend Policy Algebra
//!
//! [`SpendPolicy`] is a closed enum over the four ways an output can be
//! locked. Every capability (address derivation, text form, canonical
//! encoding) is an exhaustive `match` over it, so adding a variant forces
//! every consumer to handle it.
//!
//! Policies have no identity beyond their structure: two policies with the
//! same shape are the same policy. They are immutable once built and carry
//! no shared state.
//!
//! ## Canonical Binary Encoding
//!
//! ```text
//! policy := version(u8 = 1) body
//! body   := 0x01 u64(height)                                    above
//!         | 0x02 key[32]                                        pk
//!         | 0x03 u8(n) u8(count) body*count                     thresh
//!         | 0x04 u64(timelock) u8(count) key[32]*count u8(sigs) uc
//! ```
//!
//! Sequence counts are a single byte, as in the historical wire format, so
//! no list may hold more than [`MAX_LIST_LEN`] entries. Threshold nesting is
//! capped at [`MAX_NESTING_DEPTH`] levels on every inbound path (text and
//! binary), which keeps the recursive parse, display, encode and drop of
//! any accepted policy well within a thread's stack.

use sia_core::{DecodeError, DecodeFrom, Decoder, EncodeTo, Encoder, Hash256};
use sia_crypto::{unlock_conditions_root, PublicKey};

/// Version byte prefixed to every top-level policy encoding.
pub const ENCODING_VERSION: u8 = 1;

/// Most entries a threshold or unlock-conditions list can hold.
pub const MAX_LIST_LEN: usize = u8::MAX as usize;

/// Deepest chain of nested thresholds the parser and decoder accept.
pub const MAX_NESTING_DEPTH: usize = 128;

const OP_ABOVE: u8 = 1;
const OP_PUBLIC_KEY: u8 = 2;
const OP_THRESHOLD: u8 = 3;
const OP_UNLOCK_CONDITIONS: u8 = 4;

/// The conditions under which an output may be spent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpendPolicy {
    /// Spendable at or above the given block height.
    Above(u64),

    /// Spendable with a signature from the given key.
    PublicKey(PublicKey),

    /// Spendable when at least `n` of the sub-policies are satisfied.
    ///
    /// `n` is not checked against `of.len()`; an unsatisfiable threshold is
    /// a legal value. The order of `of` is part of the policy's identity.
    Threshold {
        /// Required number of satisfied sub-policies.
        n: u8,
        /// Sub-policies, in order.
        of: Vec<SpendPolicy>,
    },

    /// A predecessor-format policy, kept only so historical addresses stay
    /// derivable. New policies should never use it.
    UnlockConditions(UnlockConditions),
}

/// The legacy unlock-conditions triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnlockConditions {
    /// Block height before which the output cannot be spent.
    pub timelock: u64,
    /// Keys eligible to sign, in order.
    pub public_keys: Vec<PublicKey>,
    /// Number of signatures required.
    pub signatures_required: u8,
}

impl UnlockConditions {
    /// The legacy Merkle root, which is also the address of these conditions.
    pub fn root(&self) -> Hash256 {
        unlock_conditions_root(self.timelock, &self.public_keys, self.signatures_required)
    }
}

impl SpendPolicy {
    /// Require a minimum block height.
    pub fn above(height: u64) -> Self {
        SpendPolicy::Above(height)
    }

    /// Require a signature from `key`.
    pub fn public_key(key: PublicKey) -> Self {
        SpendPolicy::PublicKey(key)
    }

    /// Require `n` of the given sub-policies.
    pub fn threshold(n: u8, of: Vec<SpendPolicy>) -> Self {
        SpendPolicy::Threshold { n, of }
    }

    /// The policy with no requirements: `thresh(0,[])`.
    pub fn anyone_can_spend() -> Self {
        SpendPolicy::threshold(0, Vec::new())
    }

    /// Wrap legacy unlock conditions.
    pub fn unlock_conditions(uc: UnlockConditions) -> Self {
        SpendPolicy::UnlockConditions(uc)
    }

    /// Lists longer than [`MAX_LIST_LEN`] have no encoding. Parsed and
    /// decoded policies never hold one; values built directly must not.
    fn encode_body(&self, e: &mut Encoder) {
        match self {
            SpendPolicy::Above(height) => {
                e.write_u8(OP_ABOVE);
                e.write_u64(*height);
            }
            SpendPolicy::PublicKey(pk) => {
                e.write_u8(OP_PUBLIC_KEY);
                e.write(pk);
            }
            SpendPolicy::Threshold { n, of } => {
                debug_assert!(of.len() <= MAX_LIST_LEN);
                e.write_u8(OP_THRESHOLD);
                e.write_u8(*n);
                e.write_u8(of.len() as u8);
                for sub in of {
                    sub.encode_body(e);
                }
            }
            SpendPolicy::UnlockConditions(uc) => {
                debug_assert!(uc.public_keys.len() <= MAX_LIST_LEN);
                e.write_u8(OP_UNLOCK_CONDITIONS);
                e.write_u64(uc.timelock);
                e.write_u8(uc.public_keys.len() as u8);
                for pk in &uc.public_keys {
                    e.write(pk);
                }
                e.write_u8(uc.signatures_required);
            }
        }
    }

    /// `depth` counts the thresholds enclosing this body.
    fn decode_body(d: &mut Decoder<'_>, depth: usize) -> Result<Self, DecodeError> {
        match d.read_u8()? {
            OP_ABOVE => Ok(SpendPolicy::Above(d.read_u64()?)),
            OP_PUBLIC_KEY => Ok(SpendPolicy::PublicKey(d.read()?)),
            OP_THRESHOLD => {
                if depth >= MAX_NESTING_DEPTH {
                    return Err(DecodeError::NestingTooDeep {
                        max: MAX_NESTING_DEPTH,
                    });
                }
                let n = d.read_u8()?;
                let count = d.read_u8()?;
                let of = (0..count)
                    .map(|_| Self::decode_body(d, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SpendPolicy::Threshold { n, of })
            }
            OP_UNLOCK_CONDITIONS => {
                let timelock = d.read_u64()?;
                let count = d.read_u8()?;
                let public_keys = (0..count)
                    .map(|_| d.read::<PublicKey>())
                    .collect::<Result<Vec<_>, _>>()?;
                let signatures_required = d.read_u8()?;
                Ok(SpendPolicy::UnlockConditions(UnlockConditions {
                    timelock,
                    public_keys,
                    signatures_required,
                }))
            }
            op => Err(DecodeError::UnknownOpcode(op)),
        }
    }
}

impl EncodeTo for SpendPolicy {
    fn encode_to(&self, e: &mut Encoder) {
        e.write_u8(ENCODING_VERSION);
        self.encode_body(e);
    }
}

impl DecodeFrom for SpendPolicy {
    fn decode_from(d: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match d.read_u8()? {
            ENCODING_VERSION => Self::decode_body(d, 0),
            v => Err(DecodeError::UnsupportedVersion(v)),
        }
    }
}
