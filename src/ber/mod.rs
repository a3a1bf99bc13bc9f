//! BER (Basic Encoding Rules) codec for SNMP.
//!
//! This module provides encoding and decoding of BER-encoded data as used in SNMP.
//! Parsing is strict: indefinite lengths, unregistered tags and truncated
//! content all fail the enclosing structure.

mod config;
mod decode;
mod encode;
mod length;
pub mod tag;
mod tlv;

pub use config::*;
pub use decode::*;
pub use encode::*;
pub use length::*;
pub use tag::*;
pub use tlv::*;
