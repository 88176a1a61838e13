//! Round reports and the terminal search outcome
//!
//! A [`KeyReport`] is the presentation payload handed to the external sink
//! for every round: the candidate window, the decoded bytes, and both
//! check-digit results, with the standard text renderings (printable filter
//! over the message bytes, full hex dump, pass/fail lines).

use crate::config::CIPHERTEXT_LEN;
use crate::round::VerifiedRound;
use core::fmt;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Key Report
// ----------------------------------------------------------------------------

/// Presentation payload for one verified round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyReport {
    pub key: u8,
    pub prev_prime: u8,
    pub plaintext: [u8; CIPHERTEXT_LEN],
    pub first_check: bool,
    pub second_check: bool,
}

impl KeyReport {
    pub fn from_round(round: &VerifiedRound) -> Self {
        Self {
            key: round.candidate.key,
            prev_prime: round.candidate.prev_prime,
            plaintext: round.plaintext,
            first_check: round.first_check,
            second_check: round.second_check,
        }
    }

    /// Both check digits verified.
    pub fn passed(&self) -> bool {
        self.first_check && self.second_check
    }

    /// The message portion of the plaintext (everything before the two check
    /// digits) with non-printable bytes rendered as '.'.
    pub fn printable_text(&self) -> String {
        self.plaintext[..CIPHERTEXT_LEN - 2]
            .iter()
            .map(|&b| {
                if (0x20..0x7f).contains(&b) {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }

    /// Full plaintext as lowercase hex.
    pub fn hex_dump(&self) -> String {
        hex::encode(self.plaintext)
    }
}

fn pass_fail(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

impl fmt::Display for KeyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "key:    {} (0x{:02x})", self.key, self.key)?;
        writeln!(f, "window: ({}, {})", self.prev_prime, self.key)?;
        writeln!(f, "text:   {}", self.printable_text())?;
        writeln!(f, "hex:    {}", self.hex_dump())?;
        writeln!(f, "first check digit:  {}", pass_fail(self.first_check))?;
        write!(f, "second check digit: {}", pass_fail(self.second_check))
    }
}

// ----------------------------------------------------------------------------
// Search Outcome
// ----------------------------------------------------------------------------

/// Terminal result of a pipeline run, observable by the surrounding process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A candidate passed both check digits. Its report was already
    /// presented on the sink before this outcome was published.
    KeyFound { report: KeyReport },
    /// Every reachable prime window was tried without an accepted key.
    Exhausted { rounds: usize },
}

impl SearchOutcome {
    /// The accepted key, if any.
    pub fn key(&self) -> Option<u8> {
        match self {
            SearchOutcome::KeyFound { report } => Some(report.key),
            SearchOutcome::Exhausted { .. } => None,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher;
    use crate::config::DEFAULT_CIPHERTEXT;
    use crate::round::Candidate;

    fn fixture_report() -> KeyReport {
        let plaintext = cipher::decode(&DEFAULT_CIPHERTEXT, 23);
        KeyReport::from_round(&VerifiedRound {
            candidate: Candidate {
                key: 23,
                prev_prime: 19,
            },
            plaintext,
            first_check: true,
            second_check: true,
        })
    }

    #[test]
    fn printable_text_filters_check_digits_and_controls() {
        let report = fixture_report();
        assert_eq!(report.printable_text(), "Pirates of Silicon Valley 1999");
        assert_eq!(report.printable_text().len(), CIPHERTEXT_LEN - 2);
    }

    #[test]
    fn non_printable_bytes_render_as_dots() {
        let mut report = fixture_report();
        report.plaintext[0] = 0x07;
        report.plaintext[5] = 0xFF;
        let text = report.printable_text();
        assert!(text.starts_with('.'));
        assert_eq!(text.as_bytes()[5], b'.');
    }

    #[test]
    fn display_carries_key_text_hex_and_verdicts() {
        let rendered = fixture_report().to_string();
        assert!(rendered.contains("23 (0x17)"));
        assert!(rendered.contains("window: (19, 23)"));
        assert!(rendered.contains("Pirates of Silicon Valley 1999"));
        assert!(rendered.contains(&hex::encode(cipher::decode(&DEFAULT_CIPHERTEXT, 23))));
        assert!(rendered.contains("first check digit:  PASS"));
        assert!(rendered.contains("second check digit: PASS"));
    }

    #[test]
    fn failed_checks_render_as_fail() {
        let mut report = fixture_report();
        report.second_check = false;
        assert!(!report.passed());
        assert!(report.to_string().contains("second check digit: FAIL"));
    }

    #[test]
    fn outcome_key_accessor() {
        let found = SearchOutcome::KeyFound {
            report: fixture_report(),
        };
        assert_eq!(found.key(), Some(23));
        assert_eq!(SearchOutcome::Exhausted { rounds: 53 }.key(), None);
    }
}
