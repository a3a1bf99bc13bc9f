//! snmp-ber-decode: Decode BER-encoded SNMP data from hex.
//!
//! Part of the snmp-ber CLI utilities.

use std::io::Read;
use std::process::ExitCode;

use bytes::Bytes;
use clap::Parser;
use snmp_ber::cli::args::{OutputArgs, parse_hex_input};
use snmp_ber::cli::output::Report;

/// Decode a BER value or SNMP message and print its structure.
#[derive(Debug, Parser)]
#[command(name = "snmp-ber-decode", version, about)]
struct Args {
    #[command(flatten)]
    output: OutputArgs,

    /// Decode as a community message (version, community, PDU).
    #[arg(short = 'm', long = "message")]
    message: bool,

    /// Hex bytes to decode. Read from stdin when omitted.
    #[arg(value_name = "HEX")]
    hex: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    args.output.init_tracing();

    let input = match args.hex {
        Some(hex) => hex,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    let data = match parse_hex_input(&input) {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(snmp.bytes = data.len(), "decoding input");

    let report = match Report::build(data, args.message) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = report.write(args.output.format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
