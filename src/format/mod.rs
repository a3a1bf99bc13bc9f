//! Formatting utilities for SNMP values.
//!
//! ## Hex Encoding
//!
//! ```
//! use snmp_ber::format::hex;
//!
//! assert_eq!(hex::encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
//! assert_eq!(hex::encode_spaced_upper(&[0x01, 0x02]), "01 02");
//!
//! // Lazy formatting for logging
//! let data = [0x00, 0xff];
//! assert_eq!(hex::Bytes(&data).to_string(), "00ff");
//! ```
//!
//! ## Printable Octet Strings
//!
//! [`printable`] decides whether an OCTET STRING is shown as text or as hex.

pub mod hex;
pub mod printable;
