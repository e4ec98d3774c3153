//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Extraction itself is total: a document that matches nothing produces a
//! record full of defaults. The only fallible step is turning selector
//! strings (usually from a site profile) into compiled queries.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A selector string is not valid CSS selector syntax.
    #[display("invalid selector: {_0}")]
    InvalidSelector(#[error(not(source))] String),
    /// A schema is structurally unusable (e.g. duplicate field names).
    #[display("invalid schema: {_0}")]
    InvalidSchema(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Selectors and schemas are static data; they're either valid or not.
        false
    }
}
