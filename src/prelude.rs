//! Prelude module for convenient imports.
//!
//! ```
//! use snmp_ber::prelude::*;
//!
//! let vb = VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), TimeTicks::new(100));
//! let bytes = SnmpObject::from(vb.to_sequence()).encode().unwrap();
//! assert_eq!(SnmpObject::decode(&bytes).unwrap().tag(), BerType::Sequence);
//! ```

pub use crate::ber::BerType;
pub use crate::error::{Error, Result};
pub use crate::message::CommunityMessage;
pub use crate::oid::Oid;
pub use crate::pdu::{BulkPdu, NotificationPdu, Pdu, TrapPdu};
pub use crate::value::{
    Counter32, Counter64, Gauge32, Integer, IpAddress, OctetString, Sequence, SnmpObject,
    TimeTicks,
};
pub use crate::varbind::VarBind;
pub use crate::version::Version;

#[doc(no_inline)]
pub use crate::oid;
