//! Pipeline configuration
//!
//! The ciphertext is configuration, not computed input: it is fixed for the
//! lifetime of a pipeline run and supplied at startup.

use serde::{Deserialize, Serialize};

/// Length of the fixed ciphertext and of every decoded plaintext.
pub const CIPHERTEXT_LEN: usize = 32;

/// The challenge ciphertext the search was built around; the CLI default.
pub const DEFAULT_CIPHERTEXT: [u8; CIPHERTEXT_LEN] = [
    0x67, 0x52, 0x89, 0x4a, 0x8b, 0x4e, 0x8a, 0x09, 0x86, 0x4f, 0x37, 0x3c, 0x80, 0x55, 0x80,
    0x4c, 0x86, 0x57, 0x37, 0x3f, 0x78, 0x55, 0x83, 0x4e, 0x90, 0x09, 0x48, 0x22, 0x50, 0x22,
    0x22, 0x04,
];

// ----------------------------------------------------------------------------
// Slot Configuration
// ----------------------------------------------------------------------------

/// Buffer depth of the stage channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotConfig {
    /// In-flight rounds per pipeline stage. Depth 1 reproduces the
    /// single-item slot handshake the pipeline was designed around; deeper
    /// slots only let stages run further ahead before blocking.
    pub stage_depth: usize,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self { stage_depth: 1 }
    }
}

// ----------------------------------------------------------------------------
// Pipeline Configuration
// ----------------------------------------------------------------------------

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// The fixed ciphertext every candidate key is tried against.
    pub ciphertext: [u8; CIPHERTEXT_LEN],
    /// Stage channel depths.
    pub slots: SlotConfig,
}

impl PipelineConfig {
    pub fn new(ciphertext: [u8; CIPHERTEXT_LEN]) -> Self {
        Self {
            ciphertext,
            slots: SlotConfig::default(),
        }
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> core::result::Result<(), String> {
        if self.slots.stage_depth == 0 {
            return Err("stage_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CIPHERTEXT)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
