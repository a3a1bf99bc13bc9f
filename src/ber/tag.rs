//! BER tag registry for SNMP.
//!
//! Tag encoding follows X.690 Section 8.1.2:
//! - Bits 7-6: Class (00=Universal, 01=Application, 10=Context-specific, 11=Private)
//! - Bit 5: Primitive (0) or Constructed (1)
//! - Bits 4-0: Tag number (0-30, or 31 for long form)
//!
//! Every supported tag is a [`BerType`] variant. The byte to tag direction goes
//! through a 256-entry table computed at compile time, so lookups never lock
//! and never depend on registration order.

use crate::error::{Error, Result};

/// Tag class bits (bits 7-6)
pub mod class {
    pub const UNIVERSAL: u8 = 0x00;
    pub const APPLICATION: u8 = 0x40;
    pub const CONTEXT_SPECIFIC: u8 = 0x80;
}

/// Constructed bit (bit 5)
pub const CONSTRUCTED: u8 = 0x20;

/// Supported ASN.1 / SNMP wire types.
///
/// The discriminant is the one-byte identifier written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BerType {
    /// Internal placeholder for raw, undecoded bytes. Never produced by a
    /// regular encoder.
    Unknown = 0x00,
    Integer = 0x02,
    BitString = 0x03,
    OctetString = 0x04,
    Null = 0x05,
    ObjectIdentifier = 0x06,
    Sequence = class::UNIVERSAL | CONSTRUCTED | 0x10, // 0x30
    IpAddress = class::APPLICATION,                   // 0x40
    Counter32 = class::APPLICATION | 0x01,
    Gauge32 = class::APPLICATION | 0x02,
    TimeTicks = class::APPLICATION | 0x03,
    Opaque = class::APPLICATION | 0x04,
    NsapAddress = class::APPLICATION | 0x05,
    Counter64 = class::APPLICATION | 0x06,
    UInteger32 = class::APPLICATION | 0x07,
    GetRequest = class::CONTEXT_SPECIFIC | CONSTRUCTED, // 0xA0
    GetNextRequest = class::CONTEXT_SPECIFIC | CONSTRUCTED | 0x01,
    Response = class::CONTEXT_SPECIFIC | CONSTRUCTED | 0x02,
    SetRequest = class::CONTEXT_SPECIFIC | CONSTRUCTED | 0x03,
    Trap = class::CONTEXT_SPECIFIC | CONSTRUCTED | 0x04,
    GetBulkRequest = class::CONTEXT_SPECIFIC | CONSTRUCTED | 0x05,
    InformRequest = class::CONTEXT_SPECIFIC | CONSTRUCTED | 0x06,
    V2Trap = class::CONTEXT_SPECIFIC | CONSTRUCTED | 0x07, // 0xA7
}

/// Every registered tag, in wire-byte order.
pub const ALL_TYPES: [BerType; 23] = [
    BerType::Unknown,
    BerType::Integer,
    BerType::BitString,
    BerType::OctetString,
    BerType::Null,
    BerType::ObjectIdentifier,
    BerType::Sequence,
    BerType::IpAddress,
    BerType::Counter32,
    BerType::Gauge32,
    BerType::TimeTicks,
    BerType::Opaque,
    BerType::NsapAddress,
    BerType::Counter64,
    BerType::UInteger32,
    BerType::GetRequest,
    BerType::GetNextRequest,
    BerType::Response,
    BerType::SetRequest,
    BerType::Trap,
    BerType::GetBulkRequest,
    BerType::InformRequest,
    BerType::V2Trap,
];

const fn build_registry() -> [Option<BerType>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < ALL_TYPES.len() {
        table[ALL_TYPES[i] as usize] = Some(ALL_TYPES[i]);
        i += 1;
    }
    table
}

static REGISTRY: [Option<BerType>; 256] = build_registry();

impl BerType {
    /// Look up the tag for a wire byte.
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Self> {
        REGISTRY[byte as usize]
    }

    /// The wire byte for this tag.
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Whether the constructed bit is set.
    #[inline]
    pub const fn is_constructed(self) -> bool {
        is_constructed(self as u8)
    }

    /// Whether this is one of the eight PDU tags.
    pub const fn is_pdu(self) -> bool {
        tag_class(self as u8) == class::CONTEXT_SPECIFIC && self.is_constructed()
    }

    /// Whether values of this tag are arbitrary-precision or wrapping integers.
    pub const fn is_integer_family(self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::Counter32
                | Self::Gauge32
                | Self::TimeTicks
                | Self::Counter64
                | Self::UInteger32
        )
    }

    /// ASN.1 / SMI name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Integer => "INTEGER",
            Self::BitString => "BIT STRING",
            Self::OctetString => "OCTET STRING",
            Self::Null => "NULL",
            Self::ObjectIdentifier => "OBJECT IDENTIFIER",
            Self::Sequence => "SEQUENCE",
            Self::IpAddress => "IpAddress",
            Self::Counter32 => "Counter32",
            Self::Gauge32 => "Gauge32",
            Self::TimeTicks => "TimeTicks",
            Self::Opaque => "Opaque",
            Self::NsapAddress => "NsapAddress",
            Self::Counter64 => "Counter64",
            Self::UInteger32 => "UInteger32",
            Self::GetRequest => "GetRequest",
            Self::GetNextRequest => "GetNextRequest",
            Self::Response => "Response",
            Self::SetRequest => "SetRequest",
            Self::Trap => "Trap",
            Self::GetBulkRequest => "GetBulkRequest",
            Self::InformRequest => "InformRequest",
            Self::V2Trap => "V2Trap",
        }
    }
}

impl std::fmt::Display for BerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for BerType {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        byte_to_tag(byte)
    }
}

impl From<BerType> for u8 {
    fn from(tag: BerType) -> u8 {
        tag.byte()
    }
}

/// Map a wire byte to its tag.
///
/// Unregistered bytes fail with [`Error::UnknownTag`] at offset 0; decoders
/// report the real offset themselves.
pub fn byte_to_tag(byte: u8) -> Result<BerType> {
    BerType::from_byte(byte).ok_or(Error::UnknownTag {
        offset: 0,
        tag: byte,
    })
}

/// Map a tag to its wire byte. Never fails.
#[inline]
pub const fn tag_to_byte(tag: BerType) -> u8 {
    tag.byte()
}

/// Check if a tag byte indicates a constructed type
#[inline]
pub const fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTED != 0
}

/// Get the class of a tag byte
#[inline]
pub const fn tag_class(tag: u8) -> u8 {
    tag & 0xC0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_bijection() {
        for t in ALL_TYPES {
            assert_eq!(byte_to_tag(tag_to_byte(t)).unwrap(), t);
        }
        let registered = (0..=255u8)
            .filter(|b| BerType::from_byte(*b).is_some())
            .count();
        assert_eq!(registered, ALL_TYPES.len());
    }

    #[test]
    fn test_wire_bytes() {
        assert_eq!(BerType::Integer.byte(), 0x02);
        assert_eq!(BerType::Sequence.byte(), 0x30);
        assert_eq!(BerType::IpAddress.byte(), 0x40);
        assert_eq!(BerType::NsapAddress.byte(), 0x45);
        assert_eq!(BerType::UInteger32.byte(), 0x47);
        assert_eq!(BerType::GetRequest.byte(), 0xA0);
        assert_eq!(BerType::GetBulkRequest.byte(), 0xA5);
        assert_eq!(BerType::V2Trap.byte(), 0xA7);
    }

    #[test]
    fn test_unregistered_byte() {
        assert!(matches!(
            byte_to_tag(0x01),
            Err(Error::UnknownTag { tag: 0x01, .. })
        ));
        assert!(matches!(
            byte_to_tag(0xA8),
            Err(Error::UnknownTag { tag: 0xA8, .. })
        ));
        assert!(BerType::try_from(0x48).is_err());
    }

    #[test]
    fn test_classification() {
        assert!(BerType::Sequence.is_constructed());
        assert!(!BerType::Sequence.is_pdu());
        assert!(BerType::Trap.is_pdu());
        assert!(!BerType::OctetString.is_constructed());
        assert!(BerType::TimeTicks.is_integer_family());
        assert!(!BerType::IpAddress.is_integer_family());
    }
}
