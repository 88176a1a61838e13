//! Error handling for the keybreak CLI

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Keybreak core error: {0}")]
    Core(#[from] keybreak_core::KeybreakError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hex decoding error: {0}")]
    HexDecoding(#[from] hex::FromHexError),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use keybreak_core::KeybreakError;

    #[test]
    fn core_errors_convert_and_keep_their_message() {
        let err = CliError::from(KeybreakError::channel_error("validator gone"));
        assert!(matches!(err, CliError::Core(_)));
        assert!(err.to_string().contains("validator gone"));
    }

    #[test]
    fn hex_errors_convert() {
        let err = CliError::from(hex::decode("zz").unwrap_err());
        assert!(matches!(err, CliError::HexDecoding(_)));
    }
}
