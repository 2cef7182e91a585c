//! # BLAKE2b-256 Digests and Pooled Hashers
//!
//! Defines [`Hash256`], the 32-byte digest type, and [`Hasher`], the
//! domain-separated hasher that every address derivation runs through.
//!
//! A [`Hasher`] owns a canonical [`Encoder`]; callers write a domain string
//! and an encoded value into it, then take the BLAKE2b-256 digest of exactly
//! those bytes. [`HasherPool`] hands out reset hashers and takes them back
//! when the [`PooledHasher`] guard drops, so no two callers share an instance
//! and no state leaks from one digest into the next.

use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use parking_lot::Mutex;

use crate::encoding::{CanonicalBytes, EncodeTo, Encoder};

pub(crate) type Blake2b256 = Blake2b<U32>;

/// A 32-byte BLAKE2b-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

crate::impl_hex32!(Hash256);

/// BLAKE2b-256 of raw bytes.
pub fn hash_bytes(b: &[u8]) -> Hash256 {
    let digest = Blake2b256::digest(b);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash256(out)
}

/// BLAKE2b-256 of canonical bytes.
pub fn hash_canonical(data: &CanonicalBytes) -> Hash256 {
    hash_bytes(data.as_bytes())
}

// ---------------------------------------------------------------------------
// Hasher
// ---------------------------------------------------------------------------

/// Domain-separated hasher over the canonical encoding.
///
/// Write with [`Hasher::write_domain`] and [`Hasher::write`] (or through the
/// exposed encoder), then call [`Hasher::sum`]. Input is absorbed into the
/// BLAKE2b state as it is written; no preimage is buffered.
#[derive(Debug)]
pub struct Hasher {
    encoder: Encoder,
}

impl Hasher {
    /// Create a fresh hasher.
    pub fn new() -> Self {
        Self {
            encoder: Encoder::hashing(),
        }
    }

    /// Clear all written input.
    pub fn reset(&mut self) {
        self.encoder.reset();
    }

    /// Write a domain-separation string (length-prefixed, like any string).
    pub fn write_domain(&mut self, domain: &str) {
        self.encoder.write_str(domain);
    }

    /// Write the canonical encoding of a value.
    pub fn write<T: EncodeTo + ?Sized>(&mut self, v: &T) {
        v.encode_to(&mut self.encoder);
    }

    /// Direct access to the underlying encoder.
    pub fn encoder(&mut self) -> &mut Encoder {
        &mut self.encoder
    }

    /// Digest of everything written since the last reset.
    pub fn sum(&self) -> Hash256 {
        self.encoder.digest()
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// Default number of idle hashers retained by a pool.
pub const DEFAULT_MAX_IDLE: usize = 64;

/// A pool of reusable [`Hasher`]s.
///
/// `checkout` is the only way to obtain a pooled hasher and always resets
/// it before handing it out. The guard puts it back when dropped.
#[derive(Debug)]
pub struct HasherPool {
    idle: Mutex<Vec<Hasher>>,
    max_idle: usize,
}

impl HasherPool {
    /// Create an empty pool retaining up to [`DEFAULT_MAX_IDLE`] hashers.
    pub fn new() -> Self {
        Self::with_max_idle(DEFAULT_MAX_IDLE)
    }

    /// Create an empty pool retaining at most `max_idle` idle hashers.
    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// The process-wide pool.
    pub fn global() -> &'static HasherPool {
        static POOL: OnceLock<HasherPool> = OnceLock::new();
        POOL.get_or_init(HasherPool::new)
    }

    /// Take a reset hasher for exclusive use.
    pub fn checkout(&self) -> PooledHasher<'_> {
        let mut hasher = self.idle.lock().pop().unwrap_or_default();
        hasher.reset();
        PooledHasher { pool: self, hasher }
    }

    /// Number of hashers currently idle in the pool.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    fn put(&self, hasher: Hasher) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(hasher);
        }
    }
}

impl Default for HasherPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A hasher checked out of a [`HasherPool`]; returned to the pool on drop.
#[derive(Debug)]
pub struct PooledHasher<'a> {
    pool: &'a HasherPool,
    hasher: Hasher,
}

impl Deref for PooledHasher<'_> {
    type Target = Hasher;

    fn deref(&self) -> &Hasher {
        &self.hasher
    }
}

impl DerefMut for PooledHasher<'_> {
    fn deref_mut(&mut self) -> &mut Hasher {
        &mut self.hasher
    }
}

impl Drop for PooledHasher<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.hasher));
    }
}
