//! JSON-lines presentation sink

use async_trait::async_trait;
use keybreak_core::{KeyReport, KeybreakError};
use keybreak_runtime::PresentationSink;
use serde::Serialize;

/// Serialized form of one per-round report.
#[derive(Debug, Serialize)]
struct JsonReport {
    key: u8,
    prev_prime: u8,
    text: String,
    plaintext_hex: String,
    first_check: bool,
    second_check: bool,
    accepted: bool,
}

impl JsonReport {
    fn from_report(report: &KeyReport) -> Self {
        Self {
            key: report.key,
            prev_prime: report.prev_prime,
            text: report.printable_text(),
            plaintext_hex: report.hex_dump(),
            first_check: report.first_check,
            second_check: report.second_check,
            accepted: report.passed(),
        }
    }
}

/// Prints one JSON object per round to stdout.
#[derive(Debug, Default)]
pub struct JsonSink;

#[async_trait]
impl PresentationSink for JsonSink {
    async fn present(&self, report: &KeyReport) -> keybreak_core::Result<()> {
        let line = serde_json::to_string(&JsonReport::from_report(report))
            .map_err(|err| KeybreakError::sink_error(err.to_string()))?;
        println!("{line}");
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
