//! Command-line arguments and input handling.

use clap::{Parser, ValueEnum};

use crate::format::hex;

/// Output format for the decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented tree, one TLV per line.
    #[default]
    Text,
    /// JSON tree for scripting.
    Json,
}

/// Output control arguments.
#[derive(Debug, Parser)]
pub struct OutputArgs {
    /// Output format: text or json.
    #[arg(short = 'f', long = "format", default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging (snmp_ber=debug).
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl OutputArgs {
    /// Install a stderr subscriber. `RUST_LOG` overrides the flag.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let default = if self.verbose {
            "snmp_ber=debug"
        } else {
            "snmp_ber=warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Parse hex input, ignoring whitespace and `:` separators.
///
/// Accepts `3005020101` as well as `30 05 02 01 01` or `30:05:02:01:01`.
pub fn parse_hex_input(input: &str) -> Result<Vec<u8>, hex::DecodeError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(&cleaned)
}
