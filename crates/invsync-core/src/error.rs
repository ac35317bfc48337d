//! Error types for the inventory canonicalization system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for inventory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the inventory canonicalization system
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed filter expression; fatal to the fetch call that supplied it
    #[error("filter syntax error: {0}")]
    FilterSyntax(String),

    /// An enrichment sub-query expected exactly one match and got zero or many
    #[error("sub-query join for ({hostname}, {name}) matched {matches} rows, expected 1")]
    SubQueryJoin {
        /// Device hostname of the joined row
        hostname: String,
        /// Interface name of the joined row
        name: String,
        /// Number of rows the sub-query returned
        matches: usize,
    },

    /// A raw row failed the canonicalization rules; carries the offending row
    #[error("canonicalization error: {message}")]
    Canonicalization {
        /// What went wrong with the row
        message: String,
        /// The raw row that failed to transform
        record: serde_json::Value,
    },

    /// A dependent collection was read before the orchestrator populated it.
    /// Always an ordering defect, never a data error.
    #[error("cross-collection cache miss: {0} not populated before use")]
    CacheMiss(&'static str),

    /// Transport/API failures surfaced by the external inventory client
    #[error("inventory client error: {0}")]
    Client(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a filter syntax error
    pub fn filter_syntax(msg: impl Into<String>) -> Self {
        Self::FilterSyntax(msg.into())
    }

    /// Create a sub-query join error
    pub fn subquery_join(
        hostname: impl Into<String>,
        name: impl Into<String>,
        matches: usize,
    ) -> Self {
        Self::SubQueryJoin {
            hostname: hostname.into(),
            name: name.into(),
            matches,
        }
    }

    /// Create a canonicalization error carrying the offending raw row
    pub fn canonicalization(msg: impl Into<String>, record: serde_json::Value) -> Self {
        Self::Canonicalization {
            message: msg.into(),
            record,
        }
    }

    /// Create a client error
    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for row-level data errors that the default cycle policy skips
    /// rather than aborts on
    pub fn is_row_error(&self) -> bool {
        matches!(self, Self::Canonicalization { .. })
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
