//! Stage slots
//!
//! Typed bounded channels between pipeline stages. Each slot is a
//! single-item mailbox: a send is the "produce" side, a recv the "consume"
//! side, and the bounded buffer provides the backpressure. At the default
//! depth of 1 a producer cannot run ahead of its consumer by more than one
//! round.

use keybreak_core::{Candidate, DecodedRound, SearchOutcome, SlotConfig, Verdict, VerifiedRound};
use tokio::sync::mpsc;

// ----------------------------------------------------------------------------
// Slot Endpoint Types
// ----------------------------------------------------------------------------

pub type CandidateSender = mpsc::Sender<Candidate>;
pub type CandidateReceiver = mpsc::Receiver<Candidate>;
pub type DecodedSender = mpsc::Sender<DecodedRound>;
pub type DecodedReceiver = mpsc::Receiver<DecodedRound>;
pub type VerdictSender = mpsc::Sender<Verdict>;
pub type VerdictReceiver = mpsc::Receiver<Verdict>;
pub type VerifiedSender = mpsc::Sender<VerifiedRound>;
pub type VerifiedReceiver = mpsc::Receiver<VerifiedRound>;
pub type OutcomeSender = mpsc::Sender<SearchOutcome>;
pub type OutcomeReceiver = mpsc::Receiver<SearchOutcome>;

// ----------------------------------------------------------------------------
// Slot Creation Utilities
// ----------------------------------------------------------------------------

/// Create the candidate slot (Generator → Decipherer)
pub fn create_candidate_slot(config: &SlotConfig) -> (CandidateSender, CandidateReceiver) {
    mpsc::channel(config.stage_depth)
}

/// Create one decoded-round slot (Decipherer → a checker). The decipherer
/// holds one sender per checker, so each checker receives its own copy of
/// every round.
pub fn create_decoded_slot(config: &SlotConfig) -> (DecodedSender, DecodedReceiver) {
    mpsc::channel(config.stage_depth)
}

/// Create one verdict slot (a checker → Collector)
pub fn create_verdict_slot(config: &SlotConfig) -> (VerdictSender, VerdictReceiver) {
    mpsc::channel(config.stage_depth)
}

/// Create one verified-round slot (Collector → Reporter or Validator)
pub fn create_verified_slot(config: &SlotConfig) -> (VerifiedSender, VerifiedReceiver) {
    mpsc::channel(config.stage_depth)
}

/// Create the outcome slot (Validator → pipeline supervisor). The validator
/// publishes at most one terminal outcome, so the depth is fixed.
pub fn create_outcome_slot() -> (OutcomeSender, OutcomeReceiver) {
    mpsc::channel(1)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn candidate_slot_transfers_ownership() {
        let config = SlotConfig::default();
        let (sender, mut receiver) = create_candidate_slot(&config);

        sender
            .send(Candidate {
                key: 23,
                prev_prime: 19,
            })
            .await
            .unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.key, 23);
        assert_eq!(received.prev_prime, 19);
    }

    #[tokio::test]
    async fn default_slot_blocks_second_send() {
        let config = SlotConfig::default();
        let (sender, _receiver) = create_candidate_slot(&config);

        sender
            .try_send(Candidate {
                key: 3,
                prev_prime: 2,
            })
            .unwrap();
        let second = sender.try_send(Candidate {
            key: 5,
            prev_prime: 3,
        });
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn deeper_slots_buffer_more_rounds() {
        let config = SlotConfig { stage_depth: 4 };
        let (sender, _receiver) = create_candidate_slot(&config);

        for (key, prev_prime) in [(3, 2), (5, 3), (7, 5), (11, 7)] {
            sender.try_send(Candidate { key, prev_prime }).unwrap();
        }
        assert!(sender
            .try_send(Candidate {
                key: 13,
                prev_prime: 11,
            })
            .is_err());
    }
}
