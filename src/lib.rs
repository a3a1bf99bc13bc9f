//! # snmp-ber
//!
//! BER codec and typed object model for SNMPv1/v2c messages.
//!
//! ## Features
//!
//! - Closed [`SnmpObject`] enum covering every SNMP wire type
//! - Zero-copy decoding over [`bytes::Bytes`]
//! - Arbitrary-precision INTEGER, wrapping counters and gauges
//! - Structurally validated PDUs: malformed input is an error, never a
//!   partial value
//! - Community message framing and a small UDP exerciser
//!
//! ## Quick Start
//!
//! ```
//! use snmp_ber::{CommunityMessage, Pdu, SnmpObject, oid};
//!
//! let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
//! let request = CommunityMessage::v2c("public", Pdu::get_request(1, &[sys_descr]));
//! let bytes = request.encode().unwrap();
//!
//! let decoded = CommunityMessage::decode(bytes).unwrap();
//! assert_eq!(decoded.request_id(), Some(1));
//! assert!(matches!(decoded.pdu(), SnmpObject::Pdu(_)));
//! ```

// The Error enum carries diagnostics inline.
#![allow(clippy::result_large_err)]

pub mod ber;
pub mod error;
pub mod format;
pub mod message;
pub mod oid;
pub mod pdu;
pub mod prelude;
pub mod transport;
pub mod value;
pub mod varbind;
pub mod version;

pub(crate) mod util;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use ber::{BerType, DecodeConfig};
pub use error::{
    BadValueKind, DecodeErrorKind, Error, ErrorStatus, OidErrorKind, PduErrorKind, Result,
};
pub use message::CommunityMessage;
pub use oid::Oid;
pub use pdu::{BulkPdu, GenericTrap, NotificationPdu, Pdu, PduType, TrapPdu};
pub use transport::{Transport, TransportConfig, UdpTransport, exchange};
pub use value::{
    BitString, Counter32, Counter64, Gauge32, Integer, IpAddress, NsapAddress, OctetString,
    Opaque, Sequence, SnmpObject, TimeTicks, UInteger32, UnknownObject,
};
pub use varbind::VarBind;
pub use version::Version;

/// Testing utilities exposed via the `testing` feature.
#[cfg(feature = "testing")]
pub mod testing {
    pub use crate::format::hex::{
        DecodeError as HexDecodeError, decode as decode_hex, encode as encode_hex,
    };
}
