//! Error types for the tabular view engine.
//!
//! Interactive operations (searching, sorting, paging, selecting) never fail;
//! they degrade instead. Errors only come out of construction and
//! configuration: building a schema, choosing a page size, loading settings.

use std::path::PathBuf;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a table view.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema names no key field.
    #[error("Table schema must name a key field")]
    EmptyKeyField,

    /// A column has an empty key.
    #[error("Column at position {index} has an empty key")]
    EmptyColumnKey { index: usize },

    /// Two columns share a key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },

    /// Page size must be at least one.
    #[error("Invalid page size {size}: must be at least 1")]
    InvalidPageSize { size: usize },

    /// Configuration could not be parsed.
    #[error("Invalid table configuration: {message}")]
    Config { message: String },

    /// Configuration file could not be read.
    #[error("Failed to read table configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a duplicate column error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.message())
    }
}
