//! SNMPv2 notifications: InformRequest and SNMPv2-Trap.
//!
//! Both share the request PDU layout, but their first two bindings are fixed
//! by RFC 3416 Section 4.2.6: `sysUpTime.0` carrying TimeTicks, then
//! `snmpTrapOID.0` carrying an OBJECT IDENTIFIER.

use std::fmt;

use crate::ber::EncodeBuf;
use crate::error::{ErrorStatus, PduErrorKind, Result};
use crate::oid::Oid;
use crate::value::{Integer, Sequence, SnmpObject, TimeTicks};
use crate::varbind::VarBind;

use super::request::{fmt_varbinds, saturating_i64};
use super::{PduType, validate};

/// sysUpTime.0 (1.3.6.1.2.1.1.3.0)
pub fn sys_uptime_oid() -> Oid {
    crate::oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}

/// snmpTrapOID.0 (1.3.6.1.6.3.1.1.4.1.0)
pub fn snmp_trap_oid() -> Oid {
    crate::oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0)
}

/// InformRequest or SNMPv2-Trap PDU.
///
/// The two leading bindings are held as typed fields, so [`sys_uptime`] and
/// [`trap_oid`] read them without re-checking; `varbinds` holds only the
/// bindings after them.
///
/// [`sys_uptime`]: NotificationPdu::sys_uptime
/// [`trap_oid`]: NotificationPdu::trap_oid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPdu {
    pdu_type: PduType,
    pub request_id: Integer,
    pub error_status: Integer,
    pub error_index: Integer,
    sys_uptime: TimeTicks,
    trap_oid: Oid,
    /// Bindings following sysUpTime.0 and snmpTrapOID.0
    pub varbinds: Vec<VarBind>,
}

impl NotificationPdu {
    fn build(
        pdu_type: PduType,
        request_id: i32,
        sys_uptime: TimeTicks,
        trap_oid: Oid,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self {
            pdu_type,
            request_id: Integer::new(request_id),
            error_status: Integer::new(0),
            error_index: Integer::new(0),
            sys_uptime,
            trap_oid,
            varbinds,
        }
    }

    /// Create an SNMPv2-Trap.
    pub fn v2_trap(
        request_id: i32,
        sys_uptime: TimeTicks,
        trap_oid: Oid,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self::build(PduType::V2Trap, request_id, sys_uptime, trap_oid, varbinds)
    }

    /// Create an InformRequest.
    pub fn inform(
        request_id: i32,
        sys_uptime: TimeTicks,
        trap_oid: Oid,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self::build(PduType::InformRequest, request_id, sys_uptime, trap_oid, varbinds)
    }

    pub fn pdu_type(&self) -> PduType {
        self.pdu_type
    }

    pub fn request_id_i64(&self) -> i64 {
        saturating_i64(&self.request_id)
    }

    pub fn error_status(&self) -> ErrorStatus {
        ErrorStatus::from_i64(saturating_i64(&self.error_status))
    }

    /// Value of the sysUpTime.0 binding.
    pub fn sys_uptime(&self) -> TimeTicks {
        self.sys_uptime
    }

    /// Value of the snmpTrapOID.0 binding.
    pub fn trap_oid(&self) -> &Oid {
        &self.trap_oid
    }

    /// All bindings in wire order, the two fixed ones included.
    pub fn all_varbinds(&self) -> Vec<VarBind> {
        let mut all = Vec::with_capacity(self.varbinds.len() + 2);
        all.push(VarBind::new(sys_uptime_oid(), self.sys_uptime));
        all.push(VarBind::new(snmp_trap_oid(), self.trap_oid.clone()));
        all.extend(self.varbinds.iter().cloned());
        all
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_constructed(self.pdu_type.tag(), |buf| {
            buf.push_sequence(|buf| {
                for vb in self.varbinds.iter().rev() {
                    vb.encode_into(buf);
                }
                VarBind::new(snmp_trap_oid(), self.trap_oid.clone()).encode_into(buf);
                VarBind::new(sys_uptime_oid(), self.sys_uptime).encode_into(buf);
            });
            self.error_index.encode_into(buf);
            self.error_status.encode_into(buf);
            self.request_id.encode_into(buf);
        });
    }

    /// Decode an InformRequest or SNMPv2-Trap from wire bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        match SnmpObject::decode(data)? {
            SnmpObject::Notification(pdu) => Ok(pdu),
            other => Err(validate::fail(other.tag(), PduErrorKind::NotAPdu(other.tag()))),
        }
    }

    pub(crate) fn from_body(pdu_type: PduType, body: Sequence) -> Result<Self> {
        let tag = pdu_type.tag();
        let [id, status, index, list] = validate::fields::<4>(tag, body)?;
        let request_id = validate::integer_at(tag, 0, id)?;
        let error_status = validate::integer_at(tag, 1, status)?;
        let error_index = validate::integer_at(tag, 2, index)?;
        let list = validate::sequence_at(tag, 3, list)?;
        let mut bindings = validate::bindings(tag, list)?.into_iter();

        let sys_uptime = match bindings.next() {
            Some(VarBind {
                oid,
                value: SnmpObject::TimeTicks(ticks),
            }) if oid == sys_uptime_oid() => ticks,
            _ => return Err(validate::fail(tag, PduErrorKind::MissingSysUpTime)),
        };
        let trap_oid = match bindings.next() {
            Some(VarBind {
                oid,
                value: SnmpObject::ObjectIdentifier(trap_oid),
            }) if oid == snmp_trap_oid() => trap_oid,
            _ => return Err(validate::fail(tag, PduErrorKind::MissingTrapOid)),
        };

        Ok(Self {
            pdu_type,
            request_id,
            error_status,
            error_index,
            sys_uptime,
            trap_oid,
            varbinds: bindings.collect(),
        })
    }
}

impl fmt::Display for NotificationPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(request-id={}, sysUpTime={}, snmpTrapOID={}, ",
            self.pdu_type, self.request_id, self.sys_uptime, self.trap_oid
        )?;
        fmt_varbinds(f, &self.varbinds)?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ber::BerType;
    use crate::error::Error;
    use crate::oid;
    use crate::value::OctetString;

    fn link_down() -> NotificationPdu {
        NotificationPdu::v2_trap(
            11,
            TimeTicks::new(360_000),
            oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 3),
            vec![VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 2), Integer::new(2))],
        )
    }

    fn encode(pdu: &NotificationPdu) -> bytes::Bytes {
        let mut buf = EncodeBuf::new();
        pdu.encode_into(&mut buf);
        buf.finish()
    }

    #[test]
    fn test_roundtrip_and_accessors() {
        let trap = link_down();
        let decoded = NotificationPdu::decode(&encode(&trap)).unwrap();
        assert_eq!(decoded, trap);
        assert_eq!(decoded.sys_uptime().value(), 360_000);
        assert_eq!(decoded.trap_oid(), &oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 3));
        assert_eq!(decoded.varbinds.len(), 1);
        assert_eq!(decoded.all_varbinds().len(), 3);
    }

    #[test]
    fn test_inform_tag() {
        let trap_oid = oid!(1, 3, 6, 1, 4, 1, 1);
        let inform = NotificationPdu::inform(3, TimeTicks::new(1), trap_oid, vec![]);
        let bytes = encode(&inform);
        assert_eq!(bytes[0], 0xA6);
        assert_eq!(NotificationPdu::decode(&bytes).unwrap().pdu_type(), PduType::InformRequest);
    }

    fn body(bindings: Vec<VarBind>) -> Sequence {
        let list: Sequence = bindings
            .into_iter()
            .map(|vb| SnmpObject::Sequence(vb.into()))
            .collect();
        vec![
            Integer::new(1).into(),
            Integer::new(0).into(),
            Integer::new(0).into(),
            list.into(),
        ]
        .into()
    }

    #[test]
    fn test_missing_sys_uptime() {
        let err = NotificationPdu::from_body(PduType::V2Trap, body(vec![])).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedPdu {
                pdu: BerType::V2Trap,
                kind: PduErrorKind::MissingSysUpTime
            }
        ));

        // Right name, wrong kind
        let wrong = vec![VarBind::new(sys_uptime_oid(), Integer::new(5))];
        assert!(NotificationPdu::from_body(PduType::V2Trap, body(wrong)).is_err());
    }

    #[test]
    fn test_missing_trap_oid() {
        let bindings = vec![
            VarBind::new(sys_uptime_oid(), TimeTicks::new(5)),
            VarBind::new(snmp_trap_oid(), OctetString::from("linkDown")),
        ];
        assert!(matches!(
            NotificationPdu::from_body(PduType::InformRequest, body(bindings)),
            Err(Error::MalformedPdu {
                kind: PduErrorKind::MissingTrapOid,
                ..
            })
        ));
    }
}
