//! SNMP value types.
//!
//! [`SnmpObject`] is a closed enum with one variant per wire type (PDU
//! variants are grouped by shape). Decoding dispatches on the tag registry;
//! encoding is an exhaustive `match`.

mod integer;
mod octets;
mod sequence;

pub use integer::*;
pub use octets::*;
pub use sequence::*;

use std::fmt;

use bytes::Bytes;
use num_bigint::BigInt;

use crate::ber::{BerType, DecodeConfig, Decoder, EncodeBuf, Tlv};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::format::hex;
use crate::oid::Oid;
use crate::pdu::{self, BulkPdu, NotificationPdu, Pdu, TrapPdu};
use crate::varbind::VarBind;

/// Raw bytes held under the internal placeholder tag (0x00).
///
/// Never produced by encoding a typed value; it only carries content that was
/// read with the placeholder tag so it can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UnknownObject {
    data: Bytes,
}

impl UnknownObject {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_primitive(BerType::Unknown, &self.data);
    }
}

impl fmt::Display for UnknownObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_spaced_upper(&self.data))
    }
}

/// Any value that can appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpObject {
    Integer(Integer),
    Counter32(Counter32),
    Gauge32(Gauge32),
    UInteger32(UInteger32),
    TimeTicks(TimeTicks),
    Counter64(Counter64),
    OctetString(OctetString),
    Opaque(Opaque),
    BitString(BitString),
    IpAddress(IpAddress),
    NsapAddress(NsapAddress),
    ObjectIdentifier(Oid),
    Null,
    Sequence(Sequence),
    Unknown(UnknownObject),
    /// GetRequest, GetNextRequest, Response or SetRequest.
    Pdu(Pdu),
    /// GetBulkRequest.
    BulkPdu(BulkPdu),
    /// SNMPv1 Trap.
    TrapPdu(TrapPdu),
    /// InformRequest or SNMPv2 Trap.
    Notification(NotificationPdu),
}

impl SnmpObject {
    /// The wire tag of this value.
    pub fn tag(&self) -> BerType {
        match self {
            Self::Integer(_) => BerType::Integer,
            Self::Counter32(v) => v.tag(),
            Self::Gauge32(v) => v.tag(),
            Self::UInteger32(v) => v.tag(),
            Self::TimeTicks(v) => v.tag(),
            Self::Counter64(v) => v.tag(),
            Self::OctetString(_) => BerType::OctetString,
            Self::Opaque(_) => BerType::Opaque,
            Self::BitString(_) => BerType::BitString,
            Self::IpAddress(_) => BerType::IpAddress,
            Self::NsapAddress(_) => BerType::NsapAddress,
            Self::ObjectIdentifier(_) => BerType::ObjectIdentifier,
            Self::Null => BerType::Null,
            Self::Sequence(_) => BerType::Sequence,
            Self::Unknown(_) => BerType::Unknown,
            Self::Pdu(p) => p.pdu_type().tag(),
            Self::BulkPdu(_) => BerType::GetBulkRequest,
            Self::TrapPdu(_) => BerType::Trap,
            Self::Notification(n) => n.pdu_type().tag(),
        }
    }

    /// Whether this is INTEGER or one of the wrapping integer types.
    pub fn is_integer_family(&self) -> bool {
        self.tag().is_integer_family()
    }

    /// Whether this is one of the PDU variants.
    pub fn is_pdu(&self) -> bool {
        self.tag().is_pdu()
    }

    /// The numeric value of an integer-family variant.
    pub fn as_big_int(&self) -> Option<BigInt> {
        match self {
            Self::Integer(v) => Some(v.value().clone()),
            Self::Counter32(v) => Some(v.big_value()),
            Self::Gauge32(v) => Some(v.big_value()),
            Self::UInteger32(v) => Some(v.big_value()),
            Self::TimeTicks(v) => Some(v.big_value()),
            Self::Counter64(v) => Some(v.big_value()),
            _ => None,
        }
    }

    /// The content of an octet-string-family variant.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::OctetString(v) => Some(v.value()),
            Self::Opaque(v) => Some(v.value()),
            Self::BitString(v) => Some(v.value()),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Self::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Human-readable rendering; same as `Display`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Append this value's TLV to a reverse encode buffer.
    ///
    /// OIDs are written as given; call [`validate`](Self::validate) first
    /// unless they are known to be valid.
    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        match self {
            Self::Integer(v) => v.encode_into(buf),
            Self::Counter32(v) => v.encode_into(buf),
            Self::Gauge32(v) => v.encode_into(buf),
            Self::UInteger32(v) => v.encode_into(buf),
            Self::TimeTicks(v) => v.encode_into(buf),
            Self::Counter64(v) => v.encode_into(buf),
            Self::OctetString(v) => v.encode_into(buf),
            Self::Opaque(v) => v.encode_into(buf),
            Self::BitString(v) => v.encode_into(buf),
            Self::IpAddress(v) => v.encode_into(buf),
            Self::NsapAddress(v) => v.encode_into(buf),
            Self::ObjectIdentifier(oid) => buf.push_oid(oid),
            Self::Null => buf.push_null(),
            Self::Sequence(seq) => seq.encode_into(buf),
            Self::Unknown(v) => v.encode_into(buf),
            Self::Pdu(p) => p.encode_into(buf),
            Self::BulkPdu(p) => p.encode_into(buf),
            Self::TrapPdu(p) => p.encode_into(buf),
            Self::Notification(p) => p.encode_into(buf),
        }
    }

    /// Check every OID this value carries, including those nested in
    /// sequences and PDU bindings, with [`Oid::validate`].
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::ObjectIdentifier(oid) => oid.validate(),
            Self::Sequence(seq) => seq.iter().try_for_each(Self::validate),
            Self::Pdu(p) => p.varbinds.iter().try_for_each(VarBind::validate),
            Self::BulkPdu(p) => p.varbinds.iter().try_for_each(VarBind::validate),
            Self::TrapPdu(p) => {
                p.enterprise.validate()?;
                p.varbinds.iter().try_for_each(VarBind::validate)
            }
            Self::Notification(p) => {
                p.trap_oid().validate()?;
                p.varbinds.iter().try_for_each(VarBind::validate)
            }
            _ => Ok(()),
        }
    }

    /// Encode to wire bytes.
    ///
    /// Fails with [`Error::InvalidOid`] when a carried OID would not decode
    /// back to itself. [`encode_into`](Self::encode_into) skips that check.
    pub fn encode(&self) -> Result<Bytes> {
        self.validate().inspect_err(|e| {
            tracing::debug!(target: "snmp_ber::ber", error = %e, "refusing to encode");
        })?;
        let mut buf = EncodeBuf::new();
        self.encode_into(&mut buf);
        Ok(buf.finish())
    }

    /// Decode exactly one value from `data`.
    ///
    /// Bytes left over after the value are an error.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with_config(Bytes::copy_from_slice(data), DecodeConfig::default())
    }

    /// Decode exactly one value from shared bytes without copying.
    pub fn decode_bytes(data: Bytes) -> Result<Self> {
        Self::decode_with_config(data, DecodeConfig::default())
    }

    /// Decode exactly one value under explicit limits.
    pub fn decode_with_config(data: Bytes, config: DecodeConfig) -> Result<Self> {
        let mut decoder = Decoder::with_config(data, config);
        let value = Self::decode_from(&mut decoder)?;
        decoder.finish()?;
        Ok(value)
    }

    /// Decode the next value from a decoder, leaving the rest unread.
    pub fn decode_from(decoder: &mut Decoder) -> Result<Self> {
        let tlv = decoder.read_tlv()?;
        Self::decode_tlv(decoder, &tlv)
    }

    /// Build a value from an already-split TLV.
    ///
    /// Nested content is decoded with the default limits, counting depth
    /// from this TLV.
    pub fn from_tlv(tlv: Tlv) -> Result<Self> {
        let root = Decoder::new(Bytes::new());
        Self::decode_tlv(&root, &tlv)
    }

    fn decode_tlv(parent: &Decoder, tlv: &Tlv) -> Result<Self> {
        let content = &tlv.value[..];
        let offset = tlv.offset;
        let value = match tlv.tag {
            BerType::Unknown => Self::Unknown(UnknownObject::new(tlv.value.clone())),
            BerType::Integer => Self::Integer(Integer::from_content(content, offset)?),
            BerType::Counter32 => Self::Counter32(Counter32::from_content(content, offset)?),
            BerType::Gauge32 => Self::Gauge32(Gauge32::from_content(content, offset)?),
            BerType::UInteger32 => Self::UInteger32(UInteger32::from_content(content, offset)?),
            BerType::TimeTicks => Self::TimeTicks(TimeTicks::from_content(content, offset)?),
            BerType::Counter64 => Self::Counter64(Counter64::from_content(content, offset)?),
            BerType::OctetString => Self::OctetString(OctetString::new(tlv.value.clone())),
            BerType::Opaque => Self::Opaque(Opaque::new(tlv.value.clone())),
            BerType::BitString => Self::BitString(BitString::new(tlv.value.clone())),
            BerType::IpAddress => Self::IpAddress(
                IpAddress::from_bytes(content).inspect_err(|e| log_invalid_content(offset, e))?,
            ),
            BerType::NsapAddress => Self::NsapAddress(
                NsapAddress::from_bytes(content).inspect_err(|e| log_invalid_content(offset, e))?,
            ),
            BerType::ObjectIdentifier => Self::ObjectIdentifier(
                Oid::from_ber(content, offset).inspect_err(|e| log_invalid_content(offset, e))?,
            ),
            BerType::Null => {
                if !content.is_empty() {
                    tracing::debug!(
                        target: "snmp_ber::ber",
                        {
                            snmp.offset = offset,
                            length = content.len()
                        },
                        "NULL with non-zero length"
                    );
                    return Err(Error::decode(offset, DecodeErrorKind::InvalidNull));
                }
                Self::Null
            }
            BerType::Sequence => Self::Sequence(Sequence::decode_content(parent, tlv)?),
            BerType::GetRequest
            | BerType::GetNextRequest
            | BerType::Response
            | BerType::SetRequest
            | BerType::Trap
            | BerType::GetBulkRequest
            | BerType::InformRequest
            | BerType::V2Trap => {
                let body = Sequence::decode_content(parent, tlv)?;
                pdu::from_sequence(tlv.tag, body)?
            }
        };
        Ok(value)
    }
}

fn log_invalid_content(offset: usize, err: &Error) {
    tracing::debug!(
        target: "snmp_ber::ber",
        {
            snmp.offset = offset,
            error = %err
        },
        "invalid content"
    );
}

impl fmt::Display for SnmpObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Counter32(v) => write!(f, "{}", v),
            Self::Gauge32(v) => write!(f, "{}", v),
            Self::UInteger32(v) => write!(f, "{}", v),
            Self::TimeTicks(v) => write!(f, "{}", v),
            Self::Counter64(v) => write!(f, "{}", v),
            Self::OctetString(v) => write!(f, "{}", v),
            Self::Opaque(v) => write!(f, "{}", v),
            Self::BitString(v) => write!(f, "{}", v),
            Self::IpAddress(v) => write!(f, "{}", v),
            Self::NsapAddress(v) => write!(f, "{}", v),
            Self::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Self::Null => f.write_str("NULL"),
            Self::Sequence(seq) => write!(f, "{}", seq),
            Self::Unknown(v) => write!(f, "{}", v),
            Self::Pdu(p) => write!(f, "{}", p),
            Self::BulkPdu(p) => write!(f, "{}", p),
            Self::TrapPdu(p) => write!(f, "{}", p),
            Self::Notification(p) => write!(f, "{}", p),
        }
    }
}

macro_rules! object_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for SnmpObject {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        })*
    };
}

object_from!(
    Integer => Integer,
    Counter32 => Counter32,
    Gauge32 => Gauge32,
    UInteger32 => UInteger32,
    TimeTicks => TimeTicks,
    Counter64 => Counter64,
    OctetString => OctetString,
    Opaque => Opaque,
    BitString => BitString,
    IpAddress => IpAddress,
    NsapAddress => NsapAddress,
    Oid => ObjectIdentifier,
    Sequence => Sequence,
    UnknownObject => Unknown,
    Pdu => Pdu,
    BulkPdu => BulkPdu,
    TrapPdu => TrapPdu,
    NotificationPdu => Notification,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    fn roundtrip(value: SnmpObject) {
        let bytes = value.encode().unwrap();
        assert_eq!(SnmpObject::decode(&bytes).unwrap(), value, "{:02X?}", &bytes[..]);
    }

    #[test]
    fn test_roundtrip_every_primitive() {
        roundtrip(Integer::new(0).into());
        roundtrip(Integer::new(i64::MIN).into());
        roundtrip(Counter32::new(u32::MAX).into());
        roundtrip(Gauge32::new(1).into());
        roundtrip(UInteger32::new(128).into());
        roundtrip(TimeTicks::new(123_456).into());
        roundtrip(Counter64::new(u64::MAX).into());
        roundtrip(OctetString::from("hello").into());
        roundtrip(OctetString::default().into());
        roundtrip(Opaque::from(vec![0x9f, 0x78, 0x04]).into());
        roundtrip(BitString::from(vec![0x00]).into());
        roundtrip(IpAddress::new([192, 0, 2, 1]).into());
        roundtrip(NsapAddress::new([1, 2, 3, 4, 5, 6]).into());
        roundtrip(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0).into());
        roundtrip(SnmpObject::Null);
        roundtrip(UnknownObject::new(vec![0xDE, 0xAD]).into());
    }

    #[test]
    fn test_decode_is_exact() {
        assert!(matches!(
            SnmpObject::decode(&[0x05, 0x00, 0x05, 0x00]),
            Err(Error::Decode {
                offset: 2,
                kind: DecodeErrorKind::TrailingData { remaining: 2 }
            })
        ));
        assert!(matches!(
            SnmpObject::decode(&[]),
            Err(Error::Truncated { offset: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!(
            SnmpObject::decode(&[0x01, 0x01, 0xFF]),
            Err(Error::UnknownTag { offset: 0, tag: 0x01 })
        ));
    }

    #[test]
    fn test_fixed_length_on_decode() {
        assert!(matches!(
            SnmpObject::decode(&[0x40, 0x03, 1, 2, 3]),
            Err(Error::BadValue {
                type_name: "IpAddress",
                ..
            })
        ));
        assert!(matches!(
            SnmpObject::decode(&[0x45, 0x04, 1, 2, 3, 4]),
            Err(Error::BadValue {
                type_name: "NsapAddress",
                ..
            })
        ));
    }

    #[test]
    fn test_null_with_content_rejected() {
        assert!(matches!(
            SnmpObject::decode(&[0x05, 0x01, 0x00]),
            Err(Error::Decode {
                kind: DecodeErrorKind::InvalidNull,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_wraps_counters() {
        // Counter32 carrying -1 on the wire
        let v = SnmpObject::decode(&[0x41, 0x01, 0xFF]).unwrap();
        assert_eq!(v, Counter32::new(u32::MAX).into());
    }

    #[test]
    fn test_nesting_limit() {
        let mut data = vec![0x05, 0x00];
        for _ in 0..4 {
            let mut wrapped = vec![0x30, data.len() as u8];
            wrapped.extend_from_slice(&data);
            data = wrapped;
        }
        let config = DecodeConfig::default().max_depth(3);
        assert!(matches!(
            SnmpObject::decode_with_config(Bytes::from(data.clone()), config),
            Err(Error::Decode {
                kind: DecodeErrorKind::NestingTooDeep { max: 3 },
                ..
            })
        ));
        let config = DecodeConfig::default().max_depth(4);
        assert!(SnmpObject::decode_with_config(Bytes::from(data), config).is_ok());
    }

    #[test]
    fn test_from_tlv() {
        let tlv = Tlv::new(BerType::Gauge32, vec![0x2A]);
        assert_eq!(SnmpObject::from_tlv(tlv).unwrap(), Gauge32::new(42).into());
    }

    #[test]
    fn test_classification() {
        assert!(SnmpObject::from(TimeTicks::new(1)).is_integer_family());
        assert!(!SnmpObject::from(OctetString::from("1")).is_integer_family());
        assert_eq!(
            SnmpObject::from(Counter64::new(5)).as_big_int(),
            Some(BigInt::from(5))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SnmpObject::Null.to_display_string(), "NULL");
        assert_eq!(SnmpObject::from(oid!(1, 3, 6)).to_string(), "1.3.6");
        assert_eq!(SnmpObject::from(IpAddress::new([1, 2, 3, 4])).to_string(), "1.2.3.4");
        assert_eq!(SnmpObject::from(UnknownObject::new(vec![0xAB])).to_string(), "AB");
    }

    #[test]
    fn test_encode_refuses_oids_that_would_change() {
        let first_arc_3 = oid!(3, 0);
        let single_arc = oid!(1);
        let wide_second_arc = oid!(1, 40);
        let too_long = Oid::new(std::iter::once(1).chain(std::iter::repeat_n(3, 199)));

        for oid in [first_arc_3, single_arc, wide_second_arc, too_long] {
            let value = SnmpObject::ObjectIdentifier(oid.clone());
            assert!(
                matches!(value.encode(), Err(Error::InvalidOid { .. })),
                "{} encoded",
                oid
            );
        }
    }

    #[test]
    fn test_encode_checks_nested_oids() {
        let bad = oid!(7, 1);
        let seq: Sequence = vec![Integer::new(1).into(), bad.clone().into()].into();
        assert!(SnmpObject::from(seq).encode().is_err());

        let set = Pdu::set_request(1, vec![VarBind::new(oid!(1, 3, 6, 1), bad.clone())]);
        assert!(SnmpObject::from(set).encode().is_err());

        let get = Pdu::get_request(1, &[bad.clone()]);
        assert!(SnmpObject::from(get).encode().is_err());

        let trap = TrapPdu::new(bad, [10, 0, 0, 1], pdu::GenericTrap::ColdStart, 0, 0, vec![]);
        assert!(SnmpObject::from(trap).encode().is_err());
    }
}
