//! # Errors
//!
//! Everything that can fail in the binary, with process exit statuses.

use crate::config::ConfigError;
use freedom_core::{ClassificationError, CollectionError, ErrorStatus};
use std::time::Duration;
use thiserror::Error;

/// Everything that can fail in the binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The collector did not finish in time.
    #[error("Collection timed out after {0:?}")]
    Timeout(Duration),

    /// The blocking collection worker panicked or was cancelled.
    #[error("Collection worker failed: {0}")]
    Worker(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ErrorStatus for CliError {
    fn status_code(&self) -> i32 {
        match self {
            CliError::Collection(e) => e.status_code(),
            CliError::Classification(e) => e.status_code(),
            CliError::Config(e) => e.status_code(),
            CliError::Timeout(_) => 5,
            CliError::Worker(_) => 6,
            CliError::Io(_) => 7,
            CliError::Serialization(_) => 8,
        }
    }
}
