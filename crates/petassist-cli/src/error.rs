//! CLI-specific error types and mappings.
//!
//! Maps assistant failures and settings problems to exit codes and
//! user-facing messages.

use petassist_core::{AssistFailure, ImageInputError, LanguageTagError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The capability cannot be served by this backend.
    #[error("{0}")]
    Unavailable(String),

    /// A retryable assistant failure.
    #[error("{0}")]
    Temporary(String),

    /// Any other assistant failure.
    #[error("{0}")]
    Assist(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Assist(_) => 1,
            Self::Arguments(_) => 2,   // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,         // EX_IOERR
            Self::Temporary(_) => 75,  // EX_TEMPFAIL
            Self::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<AssistFailure> for CliError {
    fn from(failure: AssistFailure) -> Self {
        let message = format!("{} ({failure})", failure.user_message());
        match failure {
            AssistFailure::CapabilityUnavailable { .. } => Self::Unavailable(message),
            f if f.is_retryable() => Self::Temporary(message),
            _ => Self::Assist(message),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<LanguageTagError> for CliError {
    fn from(err: LanguageTagError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<ImageInputError> for CliError {
    fn from(err: ImageInputError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
