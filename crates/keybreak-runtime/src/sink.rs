//! Presentation sinks
//!
//! The reporter hands every round's report to a [`PresentationSink`]. The
//! pipeline is generic over the sink so the CLI can print to the console
//! while tests capture reports in memory.

use async_trait::async_trait;
use keybreak_core::{KeyReport, KeybreakError, Result};
use std::sync::{Arc, Mutex};

// ----------------------------------------------------------------------------
// Sink Trait
// ----------------------------------------------------------------------------

/// Destination for per-round reports.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    async fn present(&self, report: &KeyReport) -> Result<()>;
}

// ----------------------------------------------------------------------------
// Sink Implementations
// ----------------------------------------------------------------------------

/// Prints each report to stdout in the standard multi-line format.
#[derive(Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl PresentationSink for ConsoleSink {
    async fn present(&self, report: &KeyReport) -> Result<()> {
        println!("{report}\n");
        Ok(())
    }
}

/// Discards every report.
#[derive(Debug, Default)]
pub struct NullSink;

#[async_trait]
impl PresentationSink for NullSink {
    async fn present(&self, _report: &KeyReport) -> Result<()> {
        Ok(())
    }
}

/// Collects reports in memory, in presentation order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    reports: Arc<Mutex<Vec<KeyReport>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every report presented so far.
    pub fn reports(&self) -> Vec<KeyReport> {
        match self.reports.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl PresentationSink for MemorySink {
    async fn present(&self, report: &KeyReport) -> Result<()> {
        let mut reports = self
            .reports
            .lock()
            .map_err(|_| KeybreakError::sink_error("memory sink lock poisoned"))?;
        reports.push(report.clone());
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
