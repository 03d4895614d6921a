//! CLI error types.

use adapter_manifest::ManifestError;
use sampler_core::SelectionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort an `rla-select` run.
#[derive(Error, Debug)]
pub enum CliError {
    /// Bad or missing configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The manifest could not be loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Sampling or resolution failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Rendering the output failed.
    #[error("Output error: {0}")]
    Output(String),

    /// Writing to stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Output(err.to_string())
    }
}
