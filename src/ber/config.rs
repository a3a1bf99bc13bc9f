//! Decoder limits.

use super::length::MAX_LENGTH;

/// Default maximum nesting of constructed values.
///
/// A community message nests four levels deep (message, PDU, binding list,
/// binding), so this leaves generous room for nested sequences in values.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Limits applied while decoding untrusted bytes.
///
/// # Example
///
/// ```
/// use snmp_ber::ber::{DecodeConfig, Decoder};
///
/// let config = DecodeConfig::default().max_length(1500).max_depth(8);
/// let decoder = Decoder::with_config(bytes::Bytes::from_static(&[0x05, 0x00]), config);
/// assert_eq!(decoder.remaining(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Largest declared TLV length accepted.
    pub max_length: usize,
    /// Deepest nesting of constructed values accepted.
    pub max_depth: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_length: MAX_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeConfig {
    /// Set the largest declared length accepted.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set the deepest nesting accepted.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
