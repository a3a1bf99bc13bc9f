//! SNMP Protocol Data Units (PDUs).
//!
//! Every PDU is decoded first as a generic [`Sequence`] under its tag, then
//! checked by one structural validator: element count, the kind of each
//! positional element, and the shape of every variable binding. A PDU that
//! fails any check is a [`MalformedPdu`](crate::Error::MalformedPdu) error;
//! nothing is returned for it.

mod notification;
mod request;
mod trap;
pub(crate) mod validate;

pub use notification::{NotificationPdu, snmp_trap_oid, sys_uptime_oid};
pub use request::{BulkPdu, Pdu};
pub use trap::{GenericTrap, TrapPdu};

use crate::ber::BerType;
use crate::error::{PduErrorKind, Result};
use crate::value::{Sequence, SnmpObject};

/// PDU type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PduType {
    GetRequest,
    GetNextRequest,
    Response,
    SetRequest,
    Trap,
    GetBulkRequest,
    InformRequest,
    V2Trap,
}

impl PduType {
    /// Map a registry tag to its PDU type.
    pub fn from_tag(tag: BerType) -> Option<Self> {
        match tag {
            BerType::GetRequest => Some(Self::GetRequest),
            BerType::GetNextRequest => Some(Self::GetNextRequest),
            BerType::Response => Some(Self::Response),
            BerType::SetRequest => Some(Self::SetRequest),
            BerType::Trap => Some(Self::Trap),
            BerType::GetBulkRequest => Some(Self::GetBulkRequest),
            BerType::InformRequest => Some(Self::InformRequest),
            BerType::V2Trap => Some(Self::V2Trap),
            _ => None,
        }
    }

    /// Get the registry tag.
    pub fn tag(self) -> BerType {
        match self {
            Self::GetRequest => BerType::GetRequest,
            Self::GetNextRequest => BerType::GetNextRequest,
            Self::Response => BerType::Response,
            Self::SetRequest => BerType::SetRequest,
            Self::Trap => BerType::Trap,
            Self::GetBulkRequest => BerType::GetBulkRequest,
            Self::InformRequest => BerType::InformRequest,
            Self::V2Trap => BerType::V2Trap,
        }
    }

    /// Whether a PDU of this type expects a Response.
    pub fn is_confirmed(self) -> bool {
        matches!(
            self,
            Self::GetRequest
                | Self::GetNextRequest
                | Self::SetRequest
                | Self::GetBulkRequest
                | Self::InformRequest
        )
    }
}

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag().name())
    }
}

/// Validate a decoded PDU body and build the typed PDU for `tag`.
pub(crate) fn from_sequence(tag: BerType, body: Sequence) -> Result<SnmpObject> {
    let Some(pdu_type) = PduType::from_tag(tag) else {
        return Err(validate::fail(tag, PduErrorKind::NotAPdu(tag)));
    };
    Ok(match pdu_type {
        PduType::GetRequest | PduType::GetNextRequest | PduType::Response | PduType::SetRequest => {
            Pdu::from_body(pdu_type, body)?.into()
        }
        PduType::GetBulkRequest => BulkPdu::from_body(body)?.into(),
        PduType::Trap => TrapPdu::from_body(body)?.into(),
        PduType::InformRequest | PduType::V2Trap => {
            NotificationPdu::from_body(pdu_type, body)?.into()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ber::ALL_TYPES;
    use crate::error::Error;

    #[test]
    fn test_pdu_type_tags() {
        let pdu_tags: Vec<_> = ALL_TYPES.iter().filter(|t| t.is_pdu()).collect();
        assert_eq!(pdu_tags.len(), 8);
        for tag in pdu_tags {
            assert_eq!(PduType::from_tag(*tag).unwrap().tag(), *tag);
        }
        assert_eq!(PduType::from_tag(BerType::Sequence), None);
        assert_eq!(PduType::V2Trap.to_string(), "V2Trap");
    }

    #[test]
    fn test_from_sequence_rejects_non_pdu_tag() {
        assert!(matches!(
            from_sequence(BerType::Sequence, Sequence::new()),
            Err(Error::MalformedPdu {
                kind: PduErrorKind::NotAPdu(BerType::Sequence),
                ..
            })
        ));
    }
}
