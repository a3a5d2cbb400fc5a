//! Error types for Rungs operations.
//!
//! Layout itself never fails: anomalies such as missing placeholders or
//! ports are logged and skipped. Errors only come from the outer edges,
//! reading configuration and writing exported documents.

use std::io;

use thiserror::Error;

/// The main error type for Rungs operations.
#[derive(Debug, Error)]
pub enum RungsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<toml::de::Error> for RungsError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(error.to_string())
    }
}
