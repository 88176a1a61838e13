//! Pipeline tasks
//!
//! Seven cooperating tasks, one per pipeline stage. Each owns its channel
//! endpoints, runs a `select!` loop racing its blocking operation against
//! the shutdown token, and treats a closed channel as the upstream stage
//! having finished. Termination therefore cascades: the generator drops its
//! sender once the prime windows run out, and every downstream stage drains
//! what is in flight before exiting, so the validator sees every generated
//! round exactly once.

use keybreak_core::{
    cipher, CheckKind, DecodedRound, KeyReport, PrimeOracle, Result, SearchOutcome, Verdict,
    VerifiedRound, CIPHERTEXT_LEN,
};
use tracing::{debug, error, info};

use crate::rendezvous::Rendezvous;
use crate::shutdown::ShutdownToken;
use crate::sink::PresentationSink;
use crate::slots::{
    CandidateReceiver, CandidateSender, DecodedReceiver, DecodedSender, OutcomeSender,
    VerdictReceiver, VerdictSender, VerifiedReceiver, VerifiedSender,
};

// ----------------------------------------------------------------------------
// Generator Task
// ----------------------------------------------------------------------------

/// Walks the sliding prime window and emits one candidate per round.
///
/// On oracle exhaustion the task simply stops and drops its sender; the
/// closure propagates down the pipeline and the validator, not the
/// generator, publishes the terminal outcome once every in-flight round has
/// drained.
pub struct GeneratorTask {
    oracle: PrimeOracle,
    candidates: CandidateSender,
    shutdown: ShutdownToken,
}

impl GeneratorTask {
    pub fn new(candidates: CandidateSender, shutdown: ShutdownToken) -> Self {
        Self {
            oracle: PrimeOracle::new(),
            candidates,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("Generator task starting");

        let mut round = 0usize;
        loop {
            let (prev_prime, key) = match self.oracle.window(round) {
                Ok(window) => window,
                Err(err) => {
                    info!("Prime windows exhausted after {} rounds: {}", round, err);
                    break;
                }
            };
            debug!("Round {}: candidate window ({}, {})", round, prev_prime, key);

            let candidate = keybreak_core::Candidate { key, prev_prime };
            tokio::select! {
                result = self.candidates.send(candidate) => {
                    if result.is_err() {
                        debug!("Candidate slot closed, generator exiting");
                        break;
                    }
                }
                _ = self.shutdown.wait() => break,
            }
            round += 1;
        }

        info!("Generator task stopped");
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Decipher Task
// ----------------------------------------------------------------------------

/// Decodes the ciphertext under each candidate key and fans the decoded
/// round out to both checkers.
///
/// Holding one sender per checker is what enforces the dual-consumer
/// barrier: neither checker can miss a round, and neither can observe a
/// round the other will never see outside of shutdown.
pub struct DecipherTask {
    ciphertext: [u8; CIPHERTEXT_LEN],
    candidates: CandidateReceiver,
    first_checker: DecodedSender,
    second_checker: DecodedSender,
    shutdown: ShutdownToken,
}

impl DecipherTask {
    pub fn new(
        ciphertext: [u8; CIPHERTEXT_LEN],
        candidates: CandidateReceiver,
        first_checker: DecodedSender,
        second_checker: DecodedSender,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            ciphertext,
            candidates,
            first_checker,
            second_checker,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("Decipher task starting");

        loop {
            let candidate = tokio::select! {
                received = self.candidates.recv() => match received {
                    Some(candidate) => candidate,
                    None => break,
                },
                _ = self.shutdown.wait() => break,
            };

            let round = DecodedRound {
                candidate,
                plaintext: cipher::decode(&self.ciphertext, candidate.key),
            };
            debug!("Decoded round for key {}", candidate.key);

            let first_checker = &self.first_checker;
            let second_checker = &self.second_checker;
            tokio::select! {
                delivered = async {
                    first_checker.send(round).await.is_ok()
                        && second_checker.send(round).await.is_ok()
                } => {
                    if !delivered {
                        debug!("Checker slot closed, decipherer exiting");
                        break;
                    }
                }
                _ = self.shutdown.wait() => break,
            }
        }

        info!("Decipher task stopped");
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Check Task
// ----------------------------------------------------------------------------

/// Evaluates one of the two check digits for every round and publishes its
/// owned verdict half. Two instances run side by side, one per digit.
pub struct CheckTask {
    kind: CheckKind,
    rounds: DecodedReceiver,
    verdicts: VerdictSender,
    shutdown: ShutdownToken,
}

impl CheckTask {
    pub fn new(
        kind: CheckKind,
        rounds: DecodedReceiver,
        verdicts: VerdictSender,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            kind,
            rounds,
            verdicts,
            shutdown,
        }
    }

    fn evaluate(&self, round: &DecodedRound) -> bool {
        match self.kind {
            CheckKind::FirstDigit => cipher::first_digit_check(&round.plaintext, round.candidate.key),
            CheckKind::SecondDigit => cipher::second_digit_check(
                &round.plaintext,
                round.candidate.key,
                round.candidate.prev_prime,
            ),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("Check task ({}) starting", self.kind);

        loop {
            let round = tokio::select! {
                received = self.rounds.recv() => match received {
                    Some(round) => round,
                    None => break,
                },
                _ = self.shutdown.wait() => break,
            };

            let passed = self.evaluate(&round);
            debug!(
                "Key {}: {} check {}",
                round.candidate.key,
                self.kind,
                if passed { "passed" } else { "failed" }
            );

            let verdict = Verdict {
                round,
                kind: self.kind,
                passed,
            };
            tokio::select! {
                result = self.verdicts.send(verdict) => {
                    if result.is_err() {
                        break;
                    }
                }
                _ = self.shutdown.wait() => break,
            }
        }

        info!("Check task ({}) stopped", self.kind);
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Collect Task
// ----------------------------------------------------------------------------

/// Joins the two verdict halves of each round and fans the merged round out
/// to the reporter and the validator.
///
/// The join is a barrier: the merged round exists only after both checkers
/// have finished, so neither terminal task can observe a half-checked round.
pub struct CollectTask {
    first_verdicts: VerdictReceiver,
    second_verdicts: VerdictReceiver,
    reporter: VerifiedSender,
    validator: VerifiedSender,
    shutdown: ShutdownToken,
}

impl CollectTask {
    pub fn new(
        first_verdicts: VerdictReceiver,
        second_verdicts: VerdictReceiver,
        reporter: VerifiedSender,
        validator: VerifiedSender,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            first_verdicts,
            second_verdicts,
            reporter,
            validator,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("Collect task starting");

        loop {
            let first_verdicts = &mut self.first_verdicts;
            let second_verdicts = &mut self.second_verdicts;
            let halves = tokio::select! {
                received = async {
                    tokio::join!(first_verdicts.recv(), second_verdicts.recv())
                } => received,
                _ = self.shutdown.wait() => break,
            };
            let (first, second) = match halves {
                (Some(first), Some(second)) => (first, second),
                _ => break,
            };

            let merged = VerifiedRound::merge(first, second);
            debug!(
                "Key {}: verdicts merged (first {}, second {})",
                merged.candidate.key, merged.first_check, merged.second_check
            );

            let reporter = &self.reporter;
            let validator = &self.validator;
            tokio::select! {
                delivered = async {
                    reporter.send(merged).await.is_ok()
                        && validator.send(merged).await.is_ok()
                } => {
                    if !delivered {
                        debug!("Terminal slot closed, collector exiting");
                        break;
                    }
                }
                _ = self.shutdown.wait() => break,
            }
        }

        info!("Collect task stopped");
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Reporter Task
// ----------------------------------------------------------------------------

/// Presents every verified round on the sink, then meets the validator at
/// the rendezvous. The validator's halt flag arrives in the same exchange,
/// so an accepted key stops the reporter before it can present a buffered
/// later round.
pub struct ReporterTask<S: PresentationSink> {
    rounds: VerifiedReceiver,
    rendezvous: Rendezvous,
    sink: S,
    shutdown: ShutdownToken,
}

impl<S: PresentationSink> ReporterTask<S> {
    pub fn new(
        rounds: VerifiedReceiver,
        rendezvous: Rendezvous,
        sink: S,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            rounds,
            rendezvous,
            sink,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("Reporter task starting");

        loop {
            let round = tokio::select! {
                received = self.rounds.recv() => match received {
                    Some(round) => round,
                    None => break,
                },
                _ = self.shutdown.wait() => break,
            };

            let report = KeyReport::from_round(&round);
            if let Err(err) = self.sink.present(&report).await {
                error!("Failed to present report for key {}: {}", report.key, err);
            }

            // Finish the round with the validator; a true flag back means
            // the search ended on this round.
            match self.rendezvous.arrive(false).await {
                Ok(true) => {
                    debug!("Validator accepted key {}, reporter halting", report.key);
                    break;
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }

        info!("Reporter task stopped");
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Validator Task
// ----------------------------------------------------------------------------

/// Decides the fate of every verified round and publishes the terminal
/// outcome.
///
/// The rendezvous with the reporter precedes the decision taking effect, so
/// `KeyFound` can only be published after the winning report has been
/// presented. When the verified slot closes instead, every generated round
/// has been seen and the search is exhausted.
pub struct ValidatorTask {
    rounds: VerifiedReceiver,
    rendezvous: Rendezvous,
    outcome: OutcomeSender,
    shutdown: ShutdownToken,
}

impl ValidatorTask {
    pub fn new(
        rounds: VerifiedReceiver,
        rendezvous: Rendezvous,
        outcome: OutcomeSender,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            rounds,
            rendezvous,
            outcome,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("Validator task starting");

        let mut rounds_seen = 0usize;
        loop {
            let round = tokio::select! {
                received = self.rounds.recv() => match received {
                    Some(round) => round,
                    None => {
                        info!("Search exhausted after {} rounds", rounds_seen);
                        let _ = self.outcome.send(SearchOutcome::Exhausted { rounds: rounds_seen }).await;
                        break;
                    }
                },
                _ = self.shutdown.wait() => break,
            };
            rounds_seen += 1;

            let accepted = round.is_valid();
            if self.rendezvous.arrive(accepted).await.is_err() {
                debug!("Reporter gone, validator exiting");
                break;
            }

            if accepted {
                let report = KeyReport::from_round(&round);
                info!("Key {} accepted after {} rounds", report.key, rounds_seen);
                let _ = self
                    .outcome
                    .send(SearchOutcome::KeyFound { report })
                    .await;
                break;
            }
            debug!("Key {} rejected", round.candidate.key);
        }

        info!("Validator task stopped");
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
