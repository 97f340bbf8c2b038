//! Error types for Folio.
//!
//! Library crates use [`FolioError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Folio operations.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (invalid payload shape, unusable input, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// JSON serialization of an export payload failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The lint target does not exist or contains no files.
    #[error("No files found at {}", path.display())]
    NothingToScan { path: PathBuf },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FolioError>;

impl FolioError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
