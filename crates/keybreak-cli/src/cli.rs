//! Command-line interface definitions and parsing

use clap::Parser;
use keybreak_core::{CIPHERTEXT_LEN, DEFAULT_CIPHERTEXT};

use crate::error::{CliError, Result};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ciphertext to attack, as 64 hex characters (defaults to the shipped
    /// challenge ciphertext)
    #[arg(short = 'c', long)]
    pub ciphertext: Option<String>,

    /// Emit per-round reports as JSON lines instead of text
    #[arg(long)]
    pub json: bool,

    /// In-flight rounds per pipeline stage
    #[arg(long, default_value_t = 1)]
    pub stage_depth: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The ciphertext to run against, decoded and length-checked.
    pub fn ciphertext_bytes(&self) -> Result<[u8; CIPHERTEXT_LEN]> {
        let Some(hex_text) = &self.ciphertext else {
            return Ok(DEFAULT_CIPHERTEXT);
        };
        let bytes = hex::decode(hex_text)?;
        bytes.try_into().map_err(|bytes: Vec<u8>| {
            CliError::Config(format!(
                "ciphertext must be {} bytes, got {}",
                CIPHERTEXT_LEN,
                bytes.len()
            ))
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(ciphertext: Option<&str>) -> Cli {
        Cli {
            ciphertext: ciphertext.map(str::to_string),
            json: false,
            stage_depth: 1,
            verbose: false,
        }
    }

    #[test]
    fn absent_ciphertext_falls_back_to_the_default() {
        assert_eq!(cli(None).ciphertext_bytes().unwrap(), DEFAULT_CIPHERTEXT);
    }

    #[test]
    fn hex_ciphertext_round_trips() {
        let encoded = hex::encode(DEFAULT_CIPHERTEXT);
        assert_eq!(
            cli(Some(&encoded)).ciphertext_bytes().unwrap(),
            DEFAULT_CIPHERTEXT
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = cli(Some("deadbeef")).ciphertext_bytes().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn non_hex_input_is_rejected() {
        let err = cli(Some("zz")).ciphertext_bytes().unwrap_err();
        assert!(matches!(err, CliError::HexDecoding(_)));
    }
}
