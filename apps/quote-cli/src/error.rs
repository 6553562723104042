//! Error types for granimar-quote.

use granimar_core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid value in {var}: {source}")]
    ConfigEnv {
        var: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Process exit code: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
