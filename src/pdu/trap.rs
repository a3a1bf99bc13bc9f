//! SNMPv1 Trap PDU (RFC 1157 Section 4.1.6).

use std::fmt;

use num_traits::ToPrimitive;

use crate::ber::{BerType, EncodeBuf};
use crate::error::{PduErrorKind, Result};
use crate::oid::Oid;
use crate::value::{Integer, IpAddress, Sequence, SnmpObject, TimeTicks};
use crate::varbind::{VarBind, encode_varbind_list};

use super::request::fmt_varbinds;
use super::validate;

/// SNMPv1 generic trap types (RFC 1157 Section 4.1.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum GenericTrap {
    /// coldStart(0) - agent is reinitializing, config may change
    ColdStart = 0,
    /// warmStart(1) - agent is reinitializing, config unchanged
    WarmStart = 1,
    /// linkDown(2) - communication link failure
    LinkDown = 2,
    /// linkUp(3) - communication link came up
    LinkUp = 3,
    /// authenticationFailure(4) - improperly authenticated message received
    AuthenticationFailure = 4,
    /// egpNeighborLoss(5) - EGP peer marked down
    EgpNeighborLoss = 5,
    /// enterpriseSpecific(6) - vendor-specific trap, see specific_trap field
    EnterpriseSpecific = 6,
}

impl GenericTrap {
    /// Create from integer value.
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::ColdStart),
            1 => Some(Self::WarmStart),
            2 => Some(Self::LinkDown),
            3 => Some(Self::LinkUp),
            4 => Some(Self::AuthenticationFailure),
            5 => Some(Self::EgpNeighborLoss),
            6 => Some(Self::EnterpriseSpecific),
            _ => None,
        }
    }

    /// Get the integer value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// SNMPv1 Trap PDU.
///
/// Wire layout: `[enterprise, agent-addr, generic-trap, specific-trap,
/// time-stamp, bindings]`. Unlike the other PDUs it carries no request id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapPdu {
    /// Enterprise OID (sysObjectID of the entity generating the trap)
    pub enterprise: Oid,
    /// Agent address
    pub agent_addr: IpAddress,
    /// Generic trap type
    pub generic_trap: Integer,
    /// Specific trap code (meaningful when generic_trap is enterpriseSpecific)
    pub specific_trap: Integer,
    /// Time since the agent was last (re)initialized
    pub time_stamp: TimeTicks,
    /// Variable bindings
    pub varbinds: Vec<VarBind>,
}

impl TrapPdu {
    pub fn new(
        enterprise: Oid,
        agent_addr: impl Into<IpAddress>,
        generic_trap: GenericTrap,
        specific_trap: i32,
        time_stamp: u32,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self {
            enterprise,
            agent_addr: agent_addr.into(),
            generic_trap: Integer::new(generic_trap.as_i32()),
            specific_trap: Integer::new(specific_trap),
            time_stamp: TimeTicks::new(time_stamp),
            varbinds,
        }
    }

    /// Get the generic trap type as an enum.
    pub fn generic(&self) -> Option<GenericTrap> {
        self.generic_trap
            .value()
            .to_i32()
            .and_then(GenericTrap::from_i32)
    }

    /// Check if this is an enterprise-specific trap.
    pub fn is_enterprise_specific(&self) -> bool {
        self.generic() == Some(GenericTrap::EnterpriseSpecific)
    }

    /// Convert to the SNMPv2 snmpTrapOID.0 value (RFC 3584 Section 3).
    ///
    /// - Generic traps 0-5 map to `snmpTraps.{generic_trap + 1}`
    ///   (1.3.6.1.6.3.1.1.5.{1-6}).
    /// - Enterprise-specific traps map to `enterprise.0.specific_trap`.
    ///
    /// Returns `None` when the generic trap is out of range or the specific
    /// trap does not fit an arc.
    ///
    /// ```
    /// use snmp_ber::oid;
    /// use snmp_ber::pdu::{GenericTrap, TrapPdu};
    ///
    /// let enterprise = oid!(1, 3, 6, 1, 4, 1, 9999);
    /// let addr = [192, 168, 1, 1];
    /// let trap = TrapPdu::new(enterprise.clone(), addr, GenericTrap::LinkDown, 0, 12345, vec![]);
    /// assert_eq!(trap.v2_trap_oid(), Some(oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 3)));
    ///
    /// let specific = GenericTrap::EnterpriseSpecific;
    /// let trap = TrapPdu::new(enterprise, addr, specific, 42, 12345, vec![]);
    /// assert_eq!(trap.v2_trap_oid(), Some(oid!(1, 3, 6, 1, 4, 1, 9999, 0, 42)));
    /// ```
    pub fn v2_trap_oid(&self) -> Option<Oid> {
        match self.generic()? {
            GenericTrap::EnterpriseSpecific => {
                let specific = self.specific_trap.value().to_u32()?;
                Some(self.enterprise.child(0).child(specific))
            }
            generic => {
                // snmpTraps = 1.3.6.1.6.3.1.1.5
                let arc = generic.as_i32() as u32 + 1;
                Some(crate::oid!(1, 3, 6, 1, 6, 3, 1, 1, 5).child(arc))
            }
        }
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_constructed(BerType::Trap, |buf| {
            encode_varbind_list(buf, &self.varbinds);
            self.time_stamp.encode_into(buf);
            self.specific_trap.encode_into(buf);
            self.generic_trap.encode_into(buf);
            self.agent_addr.encode_into(buf);
            buf.push_oid(&self.enterprise);
        });
    }

    /// Decode an SNMPv1 Trap PDU from wire bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        match SnmpObject::decode(data)? {
            SnmpObject::TrapPdu(pdu) => Ok(pdu),
            other => Err(validate::fail(other.tag(), PduErrorKind::NotAPdu(other.tag()))),
        }
    }

    pub(crate) fn from_body(body: Sequence) -> Result<Self> {
        let tag = BerType::Trap;
        let [enterprise, agent_addr, generic, specific, time_stamp, list] =
            validate::fields::<6>(tag, body)?;
        Ok(Self {
            enterprise: validate::oid_at(tag, 0, enterprise)?,
            agent_addr: validate::ip_address_at(tag, 1, agent_addr)?,
            generic_trap: validate::integer_at(tag, 2, generic)?,
            specific_trap: validate::integer_at(tag, 3, specific)?,
            time_stamp: validate::time_ticks_at(tag, 4, time_stamp)?,
            varbinds: validate::bindings(tag, validate::sequence_at(tag, 5, list)?)?,
        })
    }
}

impl fmt::Display for TrapPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trap(enterprise={}, agent-addr={}, generic-trap={}, specific-trap={}, time-stamp={}, ",
            self.enterprise, self.agent_addr, self.generic_trap, self.specific_trap, self.time_stamp
        )?;
        fmt_varbinds(f, &self.varbinds)?;
        f.write_str(")")
    }
}
