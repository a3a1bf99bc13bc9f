//! BER decoding.
//!
//! Zero-copy decoding using `Bytes` to avoid allocations.

use super::config::DecodeConfig;
use super::length::decode_length;
use super::tag::BerType;
use super::tlv::Tlv;
use crate::error::{DecodeErrorKind, Error, Result};
use bytes::Bytes;

/// BER decoder that reads from a byte buffer.
///
/// Offsets in errors are absolute positions in the buffer the outermost
/// decoder was created from, including inside nested sub-decoders.
pub struct Decoder {
    data: Bytes,
    offset: usize,
    base: usize,
    depth: usize,
    config: DecodeConfig,
}

impl Decoder {
    /// Create a new decoder from bytes.
    pub fn new(data: Bytes) -> Self {
        Self::with_config(data, DecodeConfig::default())
    }

    /// Create a decoder with explicit limits.
    pub fn with_config(data: Bytes, config: DecodeConfig) -> Self {
        Self {
            data,
            offset: 0,
            base: 0,
            depth: 0,
            config,
        }
    }

    /// Create a decoder from a byte slice (copies the data).
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Get the current absolute offset.
    pub fn offset(&self) -> usize {
        self.base + self.offset
    }

    /// Current nesting depth (0 for the outermost decoder).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Limits this decoder enforces.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Check if we've reached the end.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Peek at the next byte without consuming it.
    pub fn peek_byte(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Peek at the next tag without consuming it.
    ///
    /// Returns `None` at end of input or when the byte is unregistered.
    pub fn peek_tag(&self) -> Option<BerType> {
        self.peek_byte().and_then(BerType::from_byte)
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let Some(byte) = self.peek_byte() else {
            tracing::debug!(
                target: "snmp_ber::ber",
                {
                    snmp.offset = self.offset()
                },
                "truncated data: unexpected end of input"
            );
            return Err(Error::Truncated {
                offset: self.offset(),
                needed: 1,
                available: 0,
            });
        };
        self.offset += 1;
        Ok(byte)
    }

    /// Read a tag byte and map it through the registry.
    pub fn read_tag(&mut self) -> Result<BerType> {
        let at = self.offset();
        let byte = self.read_byte()?;
        BerType::from_byte(byte).ok_or_else(|| {
            tracing::debug!(
                target: "snmp_ber::ber",
                {
                    snmp.offset = at,
                    tag = byte
                },
                "unknown tag"
            );
            Error::UnknownTag {
                offset: at,
                tag: byte,
            }
        })
    }

    /// Read a length, enforcing the configured maximum.
    pub fn read_length(&mut self) -> Result<usize> {
        let at = self.offset();
        let (len, consumed) = decode_length(&self.data[self.offset..], at)?;
        if len > self.config.max_length {
            let kind = DecodeErrorKind::LengthExceedsMax {
                length: len,
                max: self.config.max_length,
            };
            tracing::debug!(
                target: "snmp_ber::ber",
                {
                    snmp.offset = at,
                    kind = %kind
                },
                "length exceeds maximum"
            );
            return Err(Error::decode(at, kind));
        }
        self.offset += consumed;
        Ok(len)
    }

    /// Read raw bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        let available = self.remaining();
        if len > available {
            tracing::debug!(
                target: "snmp_ber::ber",
                {
                    snmp.offset = self.offset(),
                    needed = len,
                    available
                },
                "insufficient data"
            );
            return Err(Error::Truncated {
                offset: self.offset(),
                needed: len,
                available,
            });
        }
        let bytes = self.data.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(bytes)
    }

    /// Read one complete tag-length-value triple.
    pub fn read_tlv(&mut self) -> Result<Tlv> {
        let tag = self.read_tag()?;
        let length = self.read_length()?;
        let offset = self.offset();
        let value = self.read_bytes(length)?;
        Ok(Tlv {
            tag,
            length,
            value,
            offset,
        })
    }

    /// Read and expect a specific tag, returning the content length.
    pub fn expect_tag(&mut self, expected: BerType) -> Result<usize> {
        let at = self.offset();
        let tag = self.read_tag()?;
        if tag != expected {
            let kind = DecodeErrorKind::UnexpectedTag {
                expected: expected.byte(),
                actual: tag.byte(),
            };
            tracing::debug!(
                target: "snmp_ber::ber",
                {
                    snmp.offset = at,
                    kind = %kind
                },
                "unexpected tag"
            );
            return Err(Error::decode(at, kind));
        }
        self.read_length()
    }

    /// Create a decoder over the content of a constructed TLV.
    ///
    /// The child shares this decoder's limits and sits one level deeper.
    pub fn enter(&self, tlv: &Tlv) -> Result<Decoder> {
        let depth = self.depth + 1;
        if depth > self.config.max_depth {
            let kind = DecodeErrorKind::NestingTooDeep {
                max: self.config.max_depth,
            };
            tracing::debug!(
                target: "snmp_ber::ber",
                {
                    snmp.offset = tlv.offset,
                    kind = %kind
                },
                "nesting too deep"
            );
            return Err(Error::decode(tlv.offset, kind));
        }
        Ok(Decoder {
            data: tlv.value.clone(),
            offset: 0,
            base: tlv.offset,
            depth,
            config: self.config,
        })
    }

    /// Fail if any bytes remain unread.
    pub fn finish(&self) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let kind = DecodeErrorKind::TrailingData {
            remaining: self.remaining(),
        };
        tracing::debug!(
            target: "snmp_ber::ber",
            {
                snmp.offset = self.offset(),
                kind = %kind
            },
            "trailing data"
        );
        Err(Error::decode(self.offset(), kind))
    }

    /// Get remaining data as a slice.
    pub fn remaining_slice(&self) -> &[u8] {
        &self.data[self.offset..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_tlv() {
        let mut dec = Decoder::from_slice(&[0x04, 0x05, b'h', b'e', b'l', b'l', b'o']);
        let tlv = dec.read_tlv().unwrap();
        assert_eq!(tlv.tag, BerType::OctetString);
        assert_eq!(tlv.length, 5);
        assert_eq!(&tlv.value[..], b"hello");
        assert_eq!(tlv.offset, 2);
        assert!(dec.is_empty());
    }

    #[test]
    fn test_unknown_tag_reports_offset() {
        let mut dec = Decoder::from_slice(&[0x05, 0x00, 0x1F, 0x00]);
        dec.read_tlv().unwrap();
        let err = dec.read_tlv().unwrap_err();
        assert!(matches!(err, Error::UnknownTag { offset: 2, tag: 0x1F }));
    }

    #[test]
    fn test_read_bytes_rejects_oversized_length() {
        let mut dec = Decoder::from_slice(&[0x01, 0x02, 0x03]);
        assert!(matches!(
            dec.read_bytes(100),
            Err(Error::Truncated {
                needed: 100,
                available: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_tlv_overflowing_buffer() {
        // OCTET STRING claiming 256 bytes with only 3 present
        let mut dec = Decoder::from_slice(&[0x04, 0x82, 0x01, 0x00, 0xAA, 0xBB, 0xCC]);
        assert!(matches!(dec.read_tlv(), Err(Error::Truncated { .. })));
    }

    #[test]
    fn test_max_length_enforced() {
        let config = DecodeConfig::default().max_length(4);
        let data = Bytes::from_static(&[0x04, 0x05, 1, 2, 3, 4, 5]);
        let mut dec = Decoder::with_config(data, config);
        assert!(matches!(
            dec.read_tlv(),
            Err(Error::Decode {
                kind: DecodeErrorKind::LengthExceedsMax { length: 5, max: 4 },
                ..
            })
        ));
    }

    #[test]
    fn test_enter_tracks_depth_and_offsets() {
        let mut dec = Decoder::from_slice(&[0x30, 0x03, 0x02, 0x01, 0x07]);
        let tlv = dec.read_tlv().unwrap();
        let mut inner = dec.enter(&tlv).unwrap();
        assert_eq!(inner.depth(), 1);
        assert_eq!(inner.offset(), 2);
        let child = inner.read_tlv().unwrap();
        assert_eq!(child.offset, 4);
        assert!(inner.finish().is_ok());
    }

    #[test]
    fn test_enter_rejects_excess_depth() {
        let config = DecodeConfig::default().max_depth(0);
        let mut dec = Decoder::with_config(Bytes::from_static(&[0x30, 0x00]), config);
        let tlv = dec.read_tlv().unwrap();
        assert!(matches!(
            dec.enter(&tlv),
            Err(Error::Decode {
                kind: DecodeErrorKind::NestingTooDeep { max: 0 },
                ..
            })
        ));
    }

    #[test]
    fn test_expect_tag() {
        let mut dec = Decoder::from_slice(&[0x02, 0x01, 0x00]);
        assert!(matches!(
            dec.expect_tag(BerType::OctetString),
            Err(Error::Decode {
                kind: DecodeErrorKind::UnexpectedTag {
                    expected: 0x04,
                    actual: 0x02
                },
                ..
            })
        ));
    }

    #[test]
    fn test_finish_reports_trailing() {
        let mut dec = Decoder::from_slice(&[0x05, 0x00, 0xFF]);
        dec.read_tlv().unwrap();
        assert!(matches!(
            dec.finish(),
            Err(Error::Decode {
                kind: DecodeErrorKind::TrailingData { remaining: 1 },
                ..
            })
        ));
    }
}
