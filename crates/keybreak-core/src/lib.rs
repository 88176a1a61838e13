//! Keybreak Core Domain
//!
//! This crate provides the pure, synchronous half of the keybreak key search:
//! the memoized prime oracle, the reversible additive stream cipher, the two
//! check-digit predicates, and the report/outcome types presented to the
//! outside world. Everything here is deterministic and free of I/O; the
//! concurrent pipeline that drives these functions lives in
//! `keybreak-runtime`.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod cipher;
pub mod config;
pub mod errors;
pub mod primes;
pub mod report;
pub mod round;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use config::{PipelineConfig, SlotConfig, CIPHERTEXT_LEN, DEFAULT_CIPHERTEXT};
pub use errors::{KeybreakError, Result};
pub use primes::{PrimeOracle, PRIME_TABLE_CAPACITY};
pub use report::{KeyReport, SearchOutcome};
pub use round::{Candidate, CheckKind, DecodedRound, Verdict, VerifiedRound};
