//! Error types for the xembed-core library.
//!
//! This module provides error handling using the `thiserror` crate,
//! with detailed error variants for different failure modes.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for xembed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all xembed operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The emitter was handed a name that is not a valid C identifier
    #[error("'{name}' is not a valid C identifier (run it through the sanitizer first)")]
    InvalidIdentifier {
        /// The offending name
        name: String,
    },

    /// Row width would make the formatter loop forever or divide by zero
    #[error("invalid row width {width}: must be at least 1 byte per row")]
    InvalidRowWidth {
        /// The rejected width
        width: usize,
    },

    /// The external text-generation collaborator failed
    #[error("assistant request failed: {0}")]
    Assist(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new invalid identifier error
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    /// Creates a new invalid row width error
    pub fn invalid_row_width(width: usize) -> Self {
        Self::InvalidRowWidth { width }
    }

    /// Creates a new assistant error
    pub fn assist(msg: impl Into<String>) -> Self {
        Self::Assist(msg.into())
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if the error indicates a caller bug rather than an
    /// environmental failure
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier { .. } | Self::InvalidRowWidth { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_identifier("2-bad name");
        assert!(err.to_string().contains("not a valid C identifier"));
        assert!(err.to_string().contains("2-bad name"));

        let err = Error::invalid_row_width(0);
        assert!(err.to_string().contains("invalid row width 0"));
    }

    #[test]
    fn test_is_precondition() {
        assert!(Error::invalid_identifier("x y").is_precondition());
        assert!(Error::invalid_row_width(0).is_precondition());
        assert!(!Error::assist("timeout").is_precondition());
    }
}
