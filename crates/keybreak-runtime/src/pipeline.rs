//! Pipeline assembly and supervision
//!
//! Wires the seven stage tasks together, runs the search to its terminal
//! outcome, then shuts the remaining tasks down and reaps them.

use keybreak_core::{CheckKind, KeybreakError, PipelineConfig, Result, SearchOutcome};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::rendezvous::rendezvous_pair;
use crate::shutdown::shutdown_channel;
use crate::sink::PresentationSink;
use crate::slots::{
    create_candidate_slot, create_decoded_slot, create_outcome_slot, create_verdict_slot,
    create_verified_slot,
};
use crate::tasks::{
    CheckTask, CollectTask, DecipherTask, GeneratorTask, ReporterTask, ValidatorTask,
};

// ----------------------------------------------------------------------------
// Pipeline
// ----------------------------------------------------------------------------

/// The assembled key-search pipeline.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the search to completion, presenting every round on `sink`.
    ///
    /// Returns the terminal outcome: the accepted key's report, or the round
    /// count when the prime windows run out first.
    pub async fn run<S>(self, sink: S) -> Result<SearchOutcome>
    where
        S: PresentationSink + Send + 'static,
    {
        self.config
            .validate()
            .map_err(KeybreakError::config_error)?;
        info!(
            "Pipeline starting (stage depth {})",
            self.config.slots.stage_depth
        );

        let slots = &self.config.slots;
        let (candidate_tx, candidate_rx) = create_candidate_slot(slots);
        let (first_decoded_tx, first_decoded_rx) = create_decoded_slot(slots);
        let (second_decoded_tx, second_decoded_rx) = create_decoded_slot(slots);
        let (first_verdict_tx, first_verdict_rx) = create_verdict_slot(slots);
        let (second_verdict_tx, second_verdict_rx) = create_verdict_slot(slots);
        let (reporter_tx, reporter_rx) = create_verified_slot(slots);
        let (validator_tx, validator_rx) = create_verified_slot(slots);
        let (outcome_tx, mut outcome_rx) = create_outcome_slot();
        let (shutdown_handle, generator_token) = shutdown_channel();
        let (reporter_rv, validator_rv) = rendezvous_pair();

        let tasks: Vec<(&'static str, JoinHandle<Result<()>>)> = vec![
            (
                "generator",
                tokio::spawn(GeneratorTask::new(candidate_tx, generator_token).run()),
            ),
            (
                "decipherer",
                tokio::spawn(
                    DecipherTask::new(
                        self.config.ciphertext,
                        candidate_rx,
                        first_decoded_tx,
                        second_decoded_tx,
                        shutdown_handle.token(),
                    )
                    .run(),
                ),
            ),
            (
                "first-digit checker",
                tokio::spawn(
                    CheckTask::new(
                        CheckKind::FirstDigit,
                        first_decoded_rx,
                        first_verdict_tx,
                        shutdown_handle.token(),
                    )
                    .run(),
                ),
            ),
            (
                "second-digit checker",
                tokio::spawn(
                    CheckTask::new(
                        CheckKind::SecondDigit,
                        second_decoded_rx,
                        second_verdict_tx,
                        shutdown_handle.token(),
                    )
                    .run(),
                ),
            ),
            (
                "collector",
                tokio::spawn(
                    CollectTask::new(
                        first_verdict_rx,
                        second_verdict_rx,
                        reporter_tx,
                        validator_tx,
                        shutdown_handle.token(),
                    )
                    .run(),
                ),
            ),
            (
                "reporter",
                tokio::spawn(
                    ReporterTask::new(reporter_rx, reporter_rv, sink, shutdown_handle.token())
                        .run(),
                ),
            ),
            (
                "validator",
                tokio::spawn(
                    ValidatorTask::new(
                        validator_rx,
                        validator_rv,
                        outcome_tx,
                        shutdown_handle.token(),
                    )
                    .run(),
                ),
            ),
        ];

        let outcome = outcome_rx
            .recv()
            .await
            .ok_or_else(|| KeybreakError::channel_error("validator exited without an outcome"))?;

        shutdown_handle.shutdown();
        for (name, handle) in tasks {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => error!("{} task failed: {}", name, err),
                Err(err) => error!("{} task panicked: {}", name, err),
            }
        }

        match &outcome {
            SearchOutcome::KeyFound { report } => {
                info!("Pipeline finished: key {} accepted", report.key)
            }
            SearchOutcome::Exhausted { rounds } => {
                info!("Pipeline finished: exhausted after {} rounds", rounds)
            }
        }
        Ok(outcome)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;
    use keybreak_core::SlotConfig;

    #[tokio::test]
    async fn invalid_config_is_rejected_before_spawning() {
        let mut config = PipelineConfig::default();
        config.slots = SlotConfig { stage_depth: 0 };
        let err = Pipeline::new(config).run(NullSink).await.unwrap_err();
        assert!(matches!(err, KeybreakError::Configuration { .. }));
    }
}
