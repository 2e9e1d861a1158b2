//! Error types for the command line layer.
//!
//! Packaging failures come from [`crate::bundler::Error`]; this module wraps
//! them together with argument and IO errors raised by the commands.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Packaging errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as E;
        match self {
            Self::Bundler(E::IncompleteManifest) => {
                vec!["Run `kodegen_bundler_msi set-guid` to assign identifiers".to_string()]
            }
            Self::Bundler(E::CommandFailed { .. }) | Self::Bundler(E::NotFound(_)) => vec![
                "Run `kodegen_bundler_msi check-env` to verify the WiX and chocolatey tools"
                    .to_string(),
            ],
            _ => vec![],
        }
    }
}
