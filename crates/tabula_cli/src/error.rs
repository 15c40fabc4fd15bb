//! CLI error types.

use tabula_core::types::PricingError;
use thiserror::Error;

/// Errors surfaced by the `tabula` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Input or output file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid command line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid CLI configuration (file or environment).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pricing failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Raw vector export failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
