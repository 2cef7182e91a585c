//! # Canonical Binary Encoding
//!
//! The byte-oriented writer and reader that every digest in the workspace
//! is computed over. The format is fixed and versionless at this layer:
//!
//! - Integers are fixed-width little-endian.
//! - Raw byte spans (keys, digests) are written without a prefix.
//! - Strings and variable-length sequences carry a `u64` little-endian
//!   length prefix.
//!
//! Types opt into the format by implementing [`EncodeTo`] and
//! [`DecodeFrom`]. Two implementations that produce the same logical value
//! must produce the same bytes, because addresses are hashes of these bytes.
//!
//! ## Security Invariant
//!
//! [`CanonicalBytes`] has a private inner field and is only produced by
//! running a value through an [`Encoder`]. Functions that hash "the encoding
//! of a value" accept `&CanonicalBytes` or an `&impl EncodeTo`, never ad-hoc
//! byte slices assembled by the caller.

use std::fmt;

use blake2::Digest;

use crate::error::DecodeError;
use crate::hash::{hash_bytes, Blake2b256, Hash256};

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// A type with a canonical binary encoding.
pub trait EncodeTo {
    /// Append the canonical encoding of `self` to the encoder.
    fn encode_to(&self, e: &mut Encoder);
}

/// Append-only writer for the canonical binary format.
///
/// An encoder either collects its output into a buffer or, when created
/// for a [`Hasher`](crate::Hasher), feeds every write straight into a
/// BLAKE2b-256 state and keeps no bytes at all. The buffer is retained
/// across [`Encoder::reset`] so that a reused encoder amortises its
/// allocation over many uses.
#[derive(Clone)]
pub struct Encoder {
    sink: Sink,
}

#[derive(Clone)]
enum Sink {
    Buffer(Vec<u8>),
    Digest { state: Blake2b256, written: usize },
}

impl Encoder {
    /// Create an empty buffering encoder.
    pub fn new() -> Self {
        Self {
            sink: Sink::Buffer(Vec::new()),
        }
    }

    /// Create an encoder that hashes its input as it arrives.
    pub(crate) fn hashing() -> Self {
        Self {
            sink: Sink::Digest {
                state: Blake2b256::new(),
                written: 0,
            },
        }
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    /// Write a `u64` as 8 little-endian bytes.
    pub fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    /// Write raw bytes with no length prefix.
    pub fn write_bytes(&mut self, b: &[u8]) {
        match &mut self.sink {
            Sink::Buffer(buf) => buf.extend_from_slice(b),
            Sink::Digest { state, written } => {
                Digest::update(state, b);
                *written += b.len();
            }
        }
    }

    /// Write a sequence length prefix.
    pub fn write_prefix(&mut self, len: usize) {
        self.write_u64(len as u64);
    }

    /// Write a UTF-8 string as a length prefix followed by its bytes.
    pub fn write_str(&mut self, s: &str) {
        self.write_prefix(s.len());
        self.write_bytes(s.as_bytes());
    }

    /// Encode any [`EncodeTo`] value in place.
    pub fn write<T: EncodeTo + ?Sized>(&mut self, v: &T) {
        v.encode_to(self);
    }

    /// The bytes written so far. Empty for a hashing encoder, which
    /// retains nothing.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.sink {
            Sink::Buffer(buf) => buf,
            Sink::Digest { .. } => &[],
        }
    }

    /// Number of bytes written since the last reset.
    pub fn len(&self) -> usize {
        match &self.sink {
            Sink::Buffer(buf) => buf.len(),
            Sink::Digest { written, .. } => *written,
        }
    }

    /// Returns true if nothing has been written since the last reset.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard all written input.
    pub fn reset(&mut self) {
        match &mut self.sink {
            Sink::Buffer(buf) => buf.clear(),
            Sink::Digest { state, written } => {
                Digest::reset(state);
                *written = 0;
            }
        }
    }

    /// BLAKE2b-256 of everything written since the last reset.
    pub(crate) fn digest(&self) -> Hash256 {
        match &self.sink {
            Sink::Buffer(buf) => hash_bytes(buf),
            Sink::Digest { state, .. } => {
                let mut out = [0u8; 32];
                out.copy_from_slice(&state.clone().finalize());
                Hash256(out)
            }
        }
    }

    /// Finish encoding and take the bytes. A hashing encoder yields empty
    /// bytes.
    pub fn finish(self) -> CanonicalBytes {
        match self.sink {
            Sink::Buffer(buf) => CanonicalBytes(buf),
            Sink::Digest { .. } => CanonicalBytes(Vec::new()),
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.sink {
            Sink::Buffer(_) => "buffer",
            Sink::Digest { .. } => "blake2b-256",
        };
        f.debug_struct("Encoder")
            .field("sink", &kind)
            .field("len", &self.len())
            .finish()
    }
}

impl EncodeTo for u8 {
    fn encode_to(&self, e: &mut Encoder) {
        e.write_u8(*self);
    }
}

impl EncodeTo for u64 {
    fn encode_to(&self, e: &mut Encoder) {
        e.write_u64(*self);
    }
}

impl EncodeTo for str {
    fn encode_to(&self, e: &mut Encoder) {
        e.write_str(self);
    }
}

/// Bytes produced exclusively by the canonical [`Encoder`].
///
/// # Invariants
///
/// - Only constructed through [`CanonicalBytes::new`] or [`Encoder::finish`].
/// - The inner `Vec<u8>` is private and cannot be mutated after encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonically encode a value.
    pub fn new<T: EncodeTo + ?Sized>(v: &T) -> Self {
        let mut e = Encoder::new();
        v.encode_to(&mut e);
        e.finish()
    }

    /// Access the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the encoding.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the encoding as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A type that can be read back from its canonical binary encoding.
pub trait DecodeFrom: Sized {
    /// Read one value from the decoder, advancing past it.
    fn decode_from(d: &mut Decoder<'_>) -> Result<Self, DecodeError>;
}

/// Cursor over a canonically encoded byte slice.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    buf: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Start decoding at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Consume exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.buf.len() < n {
            return Err(DecodeError::UnexpectedEof {
                needed: n,
                remaining: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    /// Consume a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Decode any [`DecodeFrom`] value.
    pub fn read<T: DecodeFrom>(&mut self) -> Result<T, DecodeError> {
        T::decode_from(self)
    }

    /// Assert that the whole input was consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes(self.buf.len()))
        }
    }
}

impl DecodeFrom for u8 {
    fn decode_from(d: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        d.read_u8()
    }
}

impl DecodeFrom for u64 {
    fn decode_from(d: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        d.read_u64()
    }
}

/// Decode a value that must occupy the entire input.
pub fn decode_exact<T: DecodeFrom>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut d = Decoder::new(bytes);
    let v = T::decode_from(&mut d)?;
    d.finish()?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_little_endian() {
        let mut e = Encoder::new();
        e.write_u8(0xab);
        e.write_u64(0x0102_0304_0506_0708);
        assert_eq!(
            e.as_bytes(),
            &[0xab, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let cb = CanonicalBytes::new("sia/address");
        assert_eq!(cb.len(), 8 + 11);
        assert_eq!(&cb.as_bytes()[..8], &11u64.to_le_bytes());
        assert_eq!(&cb.as_bytes()[8..], b"sia/address");
    }

    #[test]
    fn test_reset_keeps_nothing() {
        let mut e = Encoder::new();
        e.write_str("stale");
        e.reset();
        assert!(e.is_empty());
        e.write_u8(7);
        assert_eq!(e.as_bytes(), &[7]);
    }

    #[test]
    fn test_decoder_reads_back_fields() {
        let mut e = Encoder::new();
        e.write_u8(3);
        e.write_u64(u64::MAX);
        e.write_bytes(&[9; 4]);
        let cb = e.finish();

        let mut d = Decoder::new(cb.as_bytes());
        assert_eq!(d.read_u8().unwrap(), 3);
        assert_eq!(d.read_u64().unwrap(), u64::MAX);
        assert_eq!(d.read_array::<4>().unwrap(), [9; 4]);
        d.finish().unwrap();
    }

    #[test]
    fn test_decoder_truncated() {
        let mut d = Decoder::new(&[1, 2, 3]);
        assert_eq!(
            d.read_u64(),
            Err(DecodeError::UnexpectedEof {
                needed: 8,
                remaining: 3
            })
        );
    }

    #[test]
    fn test_decode_exact_rejects_trailing() {
        let result: Result<u8, _> = decode_exact(&[1, 2]);
        assert_eq!(result, Err(DecodeError::TrailingBytes(1)));
        let ok: u64 = decode_exact(&42u64.to_le_bytes()).unwrap();
        assert_eq!(ok, 42);
    }

    #[test]
    fn test_hashing_encoder_retains_nothing() {
        let mut e = Encoder::hashing();
        e.write_str("sia/address");
        e.write_bytes(&[0; 1024]);
        assert!(e.as_bytes().is_empty());
        assert_eq!(e.len(), 8 + 11 + 1024);

        let mut buffered = Encoder::new();
        buffered.write_str("sia/address");
        buffered.write_bytes(&[0; 1024]);
        assert_eq!(e.digest(), buffered.digest());
    }

    #[test]
    fn test_hashing_encoder_reset() {
        let mut e = Encoder::hashing();
        e.write_u64(99);
        e.reset();
        assert!(e.is_empty());
        assert_eq!(e.digest(), hash_bytes(b""));
    }
}
