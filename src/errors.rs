/*!
 * Error types for the framelate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by a document collaborator
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document could not be opened or read
    #[error("Failed to open document {path}: {message}")]
    Open {
        /// Document location
        path: String,
        /// Underlying failure
        message: String,
    },

    /// The document was readable but its structure is invalid
    #[error("Malformed document {path}: {message}")]
    Parse {
        /// Document location
        path: String,
        /// Underlying failure
        message: String,
    },

    /// A unit index does not exist in the live document
    #[error("Text unit {index} does not exist (document has {count} units)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of units in the document
        count: usize,
    },

    /// The requested font is not known to the document
    #[error("Font '{0}' is not available in this document")]
    FontUnavailable(String),

    /// Persisting the document failed
    #[error("Failed to save document {path}: {message}")]
    Save {
        /// Document location
        path: String,
        /// Underlying failure
        message: String,
    },
}

/// Errors that can occur when reading or writing an exchange file
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// File system failure
    #[error("Exchange file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contained no usable translation rows
    #[error("No valid translations found in exchange file")]
    NoTranslations,

    /// The file is not valid CSV or not valid UTF-8
    #[error("Malformed exchange file: {0}")]
    Malformed(String),

    /// A keyed exchange row has no parseable position column
    #[error("Row {row} has no valid position key")]
    MissingPositionKey {
        /// 1-based row number in the file
        row: usize,
    },
}

impl From<csv::Error> for ExchangeError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            match error.into_kind() {
                csv::ErrorKind::Io(io) => Self::Io(io),
                other => Self::Malformed(format!("{:?}", other)),
            }
        } else {
            Self::Malformed(error.to_string())
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the document collaborator
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from the exchange codec
    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
