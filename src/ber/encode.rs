//! BER encoding.
//!
//! Uses a reverse buffer approach: writes from end backwards to avoid
//! needing to pre-calculate lengths.

use super::length::encode_length;
use super::tag::BerType;
use crate::oid::Oid;
use bytes::Bytes;
use num_bigint::BigInt;

/// Buffer for BER encoding that writes backwards.
///
/// This approach avoids needing to pre-calculate content lengths:
/// we write the content first, then prepend the length and tag.
/// Constructed values must therefore push their children last-to-first.
pub struct EncodeBuf {
    buf: Vec<u8>,
}

impl EncodeBuf {
    /// Create a new encode buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Create a new encode buffer with specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Prepend bytes that are given in forward order.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend(bytes.iter().rev());
    }

    /// Prepend a BER length encoding.
    pub fn push_length(&mut self, len: usize) {
        let encoded = encode_length(len);
        self.push_bytes(&encoded);
    }

    /// Prepend a tag byte.
    pub fn push_tag(&mut self, tag: BerType) {
        self.buf.push(tag.byte());
    }

    /// Get the current length of encoded data.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Encode a constructed type (SEQUENCE, PDU).
    ///
    /// Calls the closure to encode contents, then wraps with length and tag.
    pub fn push_constructed<F>(&mut self, tag: BerType, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let start_len = self.len();
        f(self);
        let content_len = self.len() - start_len;
        self.push_length(content_len);
        self.push_tag(tag);
    }

    /// Encode a SEQUENCE.
    pub fn push_sequence<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.push_constructed(BerType::Sequence, f);
    }

    /// Encode a primitive TLV whose content is given verbatim.
    pub fn push_primitive(&mut self, tag: BerType, content: &[u8]) {
        self.push_bytes(content);
        self.push_length(content.len());
        self.push_tag(tag);
    }

    /// Encode an arbitrary-precision integer in minimal two's-complement form.
    pub fn push_big_integer(&mut self, tag: BerType, value: &BigInt) {
        // to_signed_bytes_be is already minimal and yields [0] for zero
        let content = value.to_signed_bytes_be();
        self.push_primitive(tag, &content);
    }

    /// Encode a non-negative integer with a specific tag.
    pub fn push_unsigned(&mut self, tag: BerType, value: u64) {
        let (arr, len) = encode_unsigned_stack(value);
        // Valid bytes are at the end of the array
        self.push_primitive(tag, &arr[9 - len..]);
    }

    /// Encode a NULL.
    pub fn push_null(&mut self) {
        self.push_length(0);
        self.push_tag(BerType::Null);
    }

    /// Encode an OBJECT IDENTIFIER.
    pub fn push_oid(&mut self, oid: &Oid) {
        let ber = oid.to_ber_smallvec();
        self.push_primitive(BerType::ObjectIdentifier, &ber);
    }

    /// Finalize and return the encoded bytes.
    ///
    /// The buffer is reversed to produce the correct order.
    pub fn finish(mut self) -> Bytes {
        self.buf.reverse();
        Bytes::from(self.buf)
    }

    /// Finalize and return as `Vec<u8>`.
    pub fn finish_vec(mut self) -> Vec<u8> {
        self.buf.reverse();
        self.buf
    }
}

impl Default for EncodeBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode an unsigned 64-bit integer in minimal two's-complement form.
///
/// Returns a stack-allocated array and the number of valid bytes.
/// The valid bytes are at the END of the array.
#[inline]
fn encode_unsigned_stack(value: u64) -> ([u8; 9], usize) {
    let mut result = [0u8; 9];
    result[1..].copy_from_slice(&value.to_be_bytes());

    if value == 0 {
        return (result, 1);
    }

    // Skip leading zeros, but keep a 0x00 prefix if MSB is set (sign bit)
    let mut start = 1;
    while start < 8 && result[start] == 0 {
        start += 1;
    }
    if result[start] & 0x80 != 0 {
        start -= 1;
    }

    (result, 9 - start)
}
