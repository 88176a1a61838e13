//! Round state moved between pipeline stages
//!
//! One round is a single candidate key's pass through the whole pipeline.
//! Each stage hands the next one an owned value; a populated field is simply
//! present, so no companion "has been written" flags are needed.

use crate::config::CIPHERTEXT_LEN;
use core::fmt;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Stage Payloads
// ----------------------------------------------------------------------------

/// Candidate key material produced by the generator (Generated stage).
///
/// `prev_prime` and `key` are consecutive primes: round `i` carries
/// `(prime(i), prime(i + 1))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub key: u8,
    pub prev_prime: u8,
}

/// A candidate together with its decode output (Deciphered stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedRound {
    pub candidate: Candidate,
    pub plaintext: [u8; CIPHERTEXT_LEN],
}

/// Which of the two check digits a verdict covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Penultimate plaintext byte against the half key.
    FirstDigit,
    /// Final plaintext byte against the squared-key quotient.
    SecondDigit,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::FirstDigit => write!(f, "first digit"),
            CheckKind::SecondDigit => write!(f, "second digit"),
        }
    }
}

/// One checker's owned half of the Verified stage.
#[derive(Debug, Clone, Copy)]
pub struct Verdict {
    pub round: DecodedRound,
    pub kind: CheckKind,
    pub passed: bool,
}

/// The merged Verified payload, fanned out to reporter and validator.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedRound {
    pub candidate: Candidate,
    pub plaintext: [u8; CIPHERTEXT_LEN],
    pub first_check: bool,
    pub second_check: bool,
}

impl VerifiedRound {
    /// Merge the two disjoint verdict halves published by the checkers.
    ///
    /// Both halves descend from the same deciphered round, so the shared
    /// fields are taken from the first without comparison; the debug
    /// assertions pin that wiring down in tests.
    pub fn merge(first: Verdict, second: Verdict) -> Self {
        debug_assert_eq!(first.kind, CheckKind::FirstDigit);
        debug_assert_eq!(second.kind, CheckKind::SecondDigit);
        debug_assert_eq!(first.round.candidate, second.round.candidate);
        Self {
            candidate: first.round.candidate,
            plaintext: first.round.plaintext,
            first_check: first.passed,
            second_check: second.passed,
        }
    }

    /// A round is valid only when both check digits verified.
    pub fn is_valid(&self) -> bool {
        self.first_check && self.second_check
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn round(key: u8) -> DecodedRound {
        DecodedRound {
            candidate: Candidate {
                key,
                prev_prime: 19,
            },
            plaintext: [key; CIPHERTEXT_LEN],
        }
    }

    #[test]
    fn merge_keeps_each_checkers_own_result() {
        let merged = VerifiedRound::merge(
            Verdict {
                round: round(23),
                kind: CheckKind::FirstDigit,
                passed: true,
            },
            Verdict {
                round: round(23),
                kind: CheckKind::SecondDigit,
                passed: false,
            },
        );
        assert_eq!(merged.candidate.key, 23);
        assert!(merged.first_check);
        assert!(!merged.second_check);
        assert!(!merged.is_valid());
    }

    #[test]
    fn round_is_valid_only_when_both_digits_pass() {
        let merged = VerifiedRound::merge(
            Verdict {
                round: round(23),
                kind: CheckKind::FirstDigit,
                passed: true,
            },
            Verdict {
                round: round(23),
                kind: CheckKind::SecondDigit,
                passed: true,
            },
        );
        assert!(merged.is_valid());
    }
}
