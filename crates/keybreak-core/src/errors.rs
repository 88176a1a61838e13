//! Error types for the keybreak pipeline
//!
//! The search has exactly one fatal domain error: the prime oracle running
//! out of single-byte primes before a key is accepted. The remaining
//! variants cover wiring and configuration faults in the surrounding
//! runtime; the cipher and check-digit functions themselves are total and
//! cannot fail.

use thiserror::Error;

// ----------------------------------------------------------------------------
// Error Types
// ----------------------------------------------------------------------------

/// Core error types for the keybreak pipeline
#[derive(Debug, Error)]
pub enum KeybreakError {
    /// The prime oracle cannot produce the requested prime. Fatal and not
    /// retried: the search terminates with no key found.
    #[error("prime search exhausted at index {index} (table capacity {capacity})")]
    PrimeSearchExhausted { index: usize, capacity: usize },

    /// Channel communication error (internal to the pipeline wiring)
    #[error("channel error: {message}")]
    Channel { message: String },

    /// Configuration error
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// Presentation sink error
    #[error("presentation sink error: {message}")]
    Sink { message: String },
}

// ----------------------------------------------------------------------------
// Convenience Error Constructors
// ----------------------------------------------------------------------------

impl KeybreakError {
    /// Create a channel error with a message
    pub fn channel_error<T: Into<String>>(message: T) -> Self {
        KeybreakError::Channel {
            message: message.into(),
        }
    }

    /// Create a configuration error with a reason
    pub fn config_error<T: Into<String>>(reason: T) -> Self {
        KeybreakError::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a presentation sink error with a message
    pub fn sink_error<T: Into<String>>(message: T) -> Self {
        KeybreakError::Sink {
            message: message.into(),
        }
    }
}

// ----------------------------------------------------------------------------
// Type Aliases
// ----------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, KeybreakError>;
