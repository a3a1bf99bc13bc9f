//! CLI support for `snmp-ber-decode`.
//!
//! Argument parsing, hex input handling and tree rendering.
//!
//! This module is only available with the `cli` feature.

pub mod args;
pub mod output;
