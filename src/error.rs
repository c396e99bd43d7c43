//! Error types for Mathvox
//!
//! Uses `thiserror` for library errors. Only configuration and engine-setup
//! errors are fatal to the process; per-expression errors are isolated by
//! the conversion loop.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Mathvox operations
pub type MathvoxResult<T> = Result<T, MathvoxError>;

/// Main error type for Mathvox operations
#[derive(Error, Debug)]
pub enum MathvoxError {
    /// Bad or missing configuration value (fatal)
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Config file exists but cannot be parsed (fatal)
    #[error("invalid config file {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Requested locale missing from embedded and filesystem sources
    #[error("no locale data found for '{locale}'")]
    LocaleNotFound { locale: String },

    /// Embedded-asset extraction could not produce a usable directory
    #[error("asset extraction failed: {message}")]
    Extraction { message: String },

    /// A single input could not be converted (non-fatal in batch mode)
    #[error("cannot convert '{input}': {message}")]
    Conversion { input: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed locale data or manifest
    #[error("malformed locale data: {0}")]
    MalformedData(#[from] serde_json::Error),
}

impl MathvoxError {
    /// Per-expression errors are reported and skipped; everything else
    /// aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            MathvoxError::Conversion { .. } | MathvoxError::LocaleNotFound { .. }
        )
    }
}
