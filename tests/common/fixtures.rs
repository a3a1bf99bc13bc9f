//! Common test fixtures and constants.

use snmp_ber::format::hex;
use snmp_ber::{Oid, oid};

// =============================================================================
// Standard system MIB OIDs (1.3.6.1.2.1.1.*)
// =============================================================================

pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}
pub fn sys_object_id() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 2, 0)
}
pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}
pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)
}

/// ifInOctets.1
pub fn if_in_octets_1() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 10, 1)
}

/// linkDown notification
pub fn link_down() -> Oid {
    oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 3)
}

/// Nonexistent OID, answered with noSuchName by the test agent
pub fn nonexistent_oid() -> Oid {
    oid!(1, 3, 6, 1, 99, 99, 99, 0)
}

// =============================================================================
// Agent values
// =============================================================================

pub const COMMUNITY: &str = "public";
pub const SYS_DESCR: &str = "snmp-ber test agent";
pub const SYS_NAME: &str = "agent-1";
pub const SYS_UPTIME: u32 = 123_456;

// =============================================================================
// Helpers
// =============================================================================

/// Decode a hex string with optional whitespace.
pub fn bytes(s: &str) -> Vec<u8> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&cleaned).unwrap()
}
