//! Tag-length-value triple produced while parsing.

use super::tag::BerType;
use bytes::Bytes;

/// One undecoded TLV.
///
/// Only an intermediate artifact of decoding: the value bytes are a zero-copy
/// slice of the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    /// Registered tag of the TLV.
    pub tag: BerType,
    /// Declared content length.
    pub length: usize,
    /// Content bytes (`length` of them).
    pub value: Bytes,
    /// Absolute offset of the first content byte in the original input.
    pub offset: usize,
}

impl Tlv {
    /// Build a TLV from content bytes located at offset 0.
    pub fn new(tag: BerType, value: impl Into<Bytes>) -> Self {
        let value = value.into();
        Self {
            tag,
            length: value.len(),
            value,
            offset: 0,
        }
    }
}
