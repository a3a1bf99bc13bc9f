//! Community-based SNMP message format (v1/v2c).
//!
//! V1 and V2c messages share the same structure:
//! `SEQUENCE { version INTEGER, community OCTET STRING, pdu PDU }`
//!
//! The only difference is the version number (0 for v1, 1 for v2c).

use bytes::Bytes;

use crate::ber::{BerType, DecodeConfig, Decoder, EncodeBuf};
use crate::error::{DecodeErrorKind, Error, PduErrorKind, Result};
use crate::pdu::{BulkPdu, NotificationPdu, Pdu, TrapPdu, validate};
use crate::value::{Integer, OctetString, SnmpObject};
use crate::version::Version;

/// Community-based SNMP message (v1/v2c).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityMessage {
    /// SNMP version (V1 or V2c)
    pub version: Version,
    /// Community string
    pub community: OctetString,
    /// Protocol data unit; always one of the PDU variants
    pdu: SnmpObject,
}

impl CommunityMessage {
    /// Create a message around any PDU variant.
    ///
    /// Non-PDU values fail with `MalformedPdu(NotAPdu)`.
    pub fn new(
        version: Version,
        community: impl Into<OctetString>,
        pdu: impl Into<SnmpObject>,
    ) -> Result<Self> {
        let pdu = pdu.into();
        if !pdu.is_pdu() {
            return Err(validate::fail(pdu.tag(), PduErrorKind::NotAPdu(pdu.tag())));
        }
        Ok(Self {
            version,
            community: community.into(),
            pdu,
        })
    }

    /// Create a V2c message carrying a request/response PDU.
    pub fn v2c(community: impl Into<OctetString>, pdu: Pdu) -> Self {
        Self {
            version: Version::V2c,
            community: community.into(),
            pdu: pdu.into(),
        }
    }

    /// Create a V1 message carrying a request/response PDU.
    pub fn v1(community: impl Into<OctetString>, pdu: Pdu) -> Self {
        Self {
            version: Version::V1,
            community: community.into(),
            pdu: pdu.into(),
        }
    }

    /// Create a V2c GETBULK message.
    pub fn bulk(community: impl Into<OctetString>, pdu: BulkPdu) -> Self {
        Self {
            version: Version::V2c,
            community: community.into(),
            pdu: pdu.into(),
        }
    }

    /// Create a V1 trap message.
    pub fn trap(community: impl Into<OctetString>, pdu: TrapPdu) -> Self {
        Self {
            version: Version::V1,
            community: community.into(),
            pdu: pdu.into(),
        }
    }

    /// Create a V2c notification message.
    pub fn notification(community: impl Into<OctetString>, pdu: NotificationPdu) -> Self {
        Self {
            version: Version::V2c,
            community: community.into(),
            pdu: pdu.into(),
        }
    }

    pub fn pdu(&self) -> &SnmpObject {
        &self.pdu
    }

    /// Consume and return the PDU.
    pub fn into_pdu(self) -> SnmpObject {
        self.pdu
    }

    /// Request ID of the carried PDU. SNMPv1 traps have none.
    pub fn request_id(&self) -> Option<i64> {
        match &self.pdu {
            SnmpObject::Pdu(p) => Some(p.request_id_i64()),
            SnmpObject::BulkPdu(p) => Some(p.request_id_i64()),
            SnmpObject::Notification(p) => Some(p.request_id_i64()),
            _ => None,
        }
    }

    /// Encode to BER.
    ///
    /// Fails when an OID in the PDU would not decode back to itself.
    pub fn encode(&self) -> Result<Bytes> {
        self.pdu.validate()?;
        let mut buf = EncodeBuf::new();

        buf.push_sequence(|buf| {
            self.pdu.encode_into(buf);
            self.community.encode_into(buf);
            Integer::new(self.version.as_i64()).encode_into(buf);
        });

        Ok(buf.finish())
    }

    /// Decode from BER.
    pub fn decode(data: Bytes) -> Result<Self> {
        Self::decode_with_config(data, DecodeConfig::default())
    }

    /// Decode from BER under explicit limits.
    ///
    /// The outer SEQUENCE must hold exactly the three fields and nothing may
    /// follow it.
    pub fn decode_with_config(data: Bytes, config: DecodeConfig) -> Result<Self> {
        let mut decoder = Decoder::with_config(data, config);

        let at = decoder.offset();
        let tlv = decoder.read_tlv()?;
        if tlv.tag != BerType::Sequence {
            return Err(unexpected(at, BerType::Sequence, tlv.tag));
        }
        let mut seq = decoder.enter(&tlv)?;

        let at = seq.offset();
        let version = match SnmpObject::decode_from(&mut seq)? {
            SnmpObject::Integer(v) => v,
            other => return Err(unexpected(at, BerType::Integer, other.tag())),
        };
        let version = version
            .to_i64()
            .and_then(Version::from_i64)
            .ok_or_else(|| {
                let kind = DecodeErrorKind::UnknownVersion(version.to_i64().unwrap_or(i64::MAX));
                tracing::debug!(
                    target: "snmp_ber::ber",
                    {
                        snmp.offset = at,
                        kind = %kind
                    },
                    "decode error"
                );
                Error::decode(at, kind)
            })?;

        let at = seq.offset();
        let community = match SnmpObject::decode_from(&mut seq)? {
            SnmpObject::OctetString(s) => s,
            other => return Err(unexpected(at, BerType::OctetString, other.tag())),
        };

        let pdu = SnmpObject::decode_from(&mut seq)?;
        if !pdu.is_pdu() {
            return Err(validate::fail(pdu.tag(), PduErrorKind::NotAPdu(pdu.tag())));
        }

        seq.finish()?;
        decoder.finish()?;

        Ok(Self {
            version,
            community,
            pdu,
        })
    }
}

fn unexpected(offset: usize, expected: BerType, actual: BerType) -> Error {
    let kind = DecodeErrorKind::UnexpectedTag {
        expected: expected.byte(),
        actual: actual.byte(),
    };
    tracing::debug!(
        target: "snmp_ber::ber",
        {
            snmp.offset = offset,
            kind = %kind
        },
        "decode error"
    );
    Error::decode(offset, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OidErrorKind;
    use crate::oid;
    use crate::pdu::GenericTrap;
    use crate::value::TimeTicks;

    #[test]
    fn test_v2c_get_wire_form() {
        let msg = CommunityMessage::v2c("public", Pdu::get_request(1, &[oid!(1, 3, 6, 1)]));
        let bytes = msg.encode().unwrap();
        assert_eq!(
            &bytes[..],
            &[
                0x30, 0x21, // message
                0x02, 0x01, 0x01, // version v2c
                0x04, 0x06, b'p', b'u', b'b', b'l', b'i', b'c', // community
                0xA0, 0x14, 0x02, 0x01, 0x01, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x09, 0x30,
                0x07, 0x06, 0x03, 0x2B, 0x06, 0x01, 0x05, 0x00,
            ]
        );
        let decoded = CommunityMessage::decode(bytes).unwrap();
        assert_eq!(decoded, msg);
        assert_eq!(decoded.request_id(), Some(1));
    }

    #[test]
    fn test_trap_message_has_no_request_id() {
        let enterprise = oid!(1, 3, 6, 1, 4, 1, 1);
        let trap = TrapPdu::new(enterprise, [127, 0, 0, 1], GenericTrap::ColdStart, 0, 0, vec![]);
        let msg = CommunityMessage::trap("public", trap);
        let decoded = CommunityMessage::decode(msg.encode().unwrap()).unwrap();
        assert_eq!(decoded.version, Version::V1);
        assert_eq!(decoded.request_id(), None);
    }

    #[test]
    fn test_unknown_version() {
        let request = CommunityMessage::v2c("c", Pdu::get_request(1, &[]));
        let mut msg = request.encode().unwrap().to_vec();
        msg[4] = 0x03;
        assert!(matches!(
            CommunityMessage::decode(Bytes::from(msg)),
            Err(Error::Decode {
                offset: 2,
                kind: DecodeErrorKind::UnknownVersion(3)
            })
        ));
    }

    #[test]
    fn test_non_pdu_third_element() {
        // SEQUENCE { 1, "c", NULL }
        let data: &'static [u8] = &[0x30, 0x08, 0x02, 0x01, 0x01, 0x04, 0x01, b'c', 0x05, 0x00];
        assert!(matches!(
            CommunityMessage::decode(Bytes::from_static(data)),
            Err(Error::MalformedPdu {
                kind: PduErrorKind::NotAPdu(BerType::Null),
                ..
            })
        ));
    }

    #[test]
    fn test_extra_element_rejected() {
        let mut content = CommunityMessage::v2c("c", Pdu::get_request(1, &[]))
            .encode()
            .unwrap()
            .slice(2..)
            .to_vec();
        content.extend_from_slice(&[0x05, 0x00]);
        let mut data = vec![0x30, content.len() as u8];
        data.extend(content);
        assert!(matches!(
            CommunityMessage::decode(Bytes::from(data)),
            Err(Error::Decode {
                kind: DecodeErrorKind::TrailingData { remaining: 2 },
                ..
            })
        ));
    }

    #[test]
    fn test_new_rejects_plain_values() {
        assert!(CommunityMessage::new(Version::V2c, "c", TimeTicks::new(1)).is_err());
        let trap_oid = oid!(1, 3, 6, 1, 4, 1, 1);
        let inform = NotificationPdu::inform(5, TimeTicks::new(1), trap_oid, vec![]);
        let msg = CommunityMessage::new(Version::V2c, "c", inform).unwrap();
        assert_eq!(msg.request_id(), Some(5));
    }

    #[test]
    fn test_encode_rejects_invalid_binding_oid() {
        let pdu = Pdu::get_request(1, &[oid!(3, 0)]);
        assert!(matches!(
            CommunityMessage::v2c("c", pdu).encode(),
            Err(Error::InvalidOid {
                kind: OidErrorKind::InvalidFirstArc(3),
                ..
            })
        ));
    }
}
