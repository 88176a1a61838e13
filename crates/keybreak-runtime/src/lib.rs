//! Keybreak Pipeline Runtime
//!
//! Drives the key search as a set of cooperating tokio tasks exchanging
//! owned round state through capacity-1 channels:
//!
//! ```text
//! Generator → Decipherer → {FirstDigit, SecondDigit checkers}
//!           → Collector  → {Reporter, Validator}
//! ```
//!
//! The decipherer fans each round out to both checkers, the collector merges
//! their disjoint verdict halves, and the reporter/validator pair finish
//! every round through a two-party rendezvous so a key can only be accepted
//! after its report has been presented. Cancellation is cooperative: every
//! task races its blocking receive against a shared shutdown token.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod pipeline;
pub mod rendezvous;
pub mod shutdown;
pub mod sink;
pub mod slots;
pub mod tasks;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use pipeline::Pipeline;
pub use rendezvous::{rendezvous_pair, Rendezvous};
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownToken};
pub use sink::{ConsoleSink, MemorySink, NullSink, PresentationSink};
