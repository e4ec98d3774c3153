//! Pipeline Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Every kind is a terminal outcome for one pipeline invocation. A missing
//! *optional* field is never an error; it's a default value in the record.

use derive_more::{Display, Error};

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, timeout or non-2xx response. No retry is attempted.
    #[display("failed to fetch {url}")]
    FetchFailed {
        url: String,
        /// HTTP status, when a response arrived at all.
        status: Option<u16>,
    },
    /// The page was fetched but its identifying content (the title) is absent.
    #[display("{_0} not found")]
    NotFound(#[error(not(source))] &'static str),
    /// The caller's parameters can't be turned into a page URL.
    #[display("malformed input: {_0}")]
    MalformedInput(#[error(not(source))] String),
    /// A URL template failed to compile or render.
    #[display("invalid URL template for {_0}")]
    Template(#[error(not(source))] String),
    /// The site profile's selector schemas are unusable.
    #[display("invalid selector schema")]
    Schema,
    /// The HTTP client couldn't be set up; nothing was fetched.
    #[display("failed to build HTTP client")]
    Client,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Only a hint for callers; the pipeline itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }

    /// The HTTP status an API layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::MalformedInput(_) => 400,
            Self::FetchFailed { .. } => 502,
            Self::Template(_) | Self::Schema | Self::Client => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::NotFound("comic"), 404, false)]
    #[case(ErrorKind::MalformedInput("page".to_string()), 400, false)]
    #[case(ErrorKind::FetchFailed { url: "https://a.test/".to_string(), status: Some(503) }, 502, true)]
    #[case(ErrorKind::Template("search".to_string()), 500, false)]
    #[case(ErrorKind::Schema, 500, false)]
    #[case(ErrorKind::Client, 500, false)]
    fn test_outcome_mapping(#[case] kind: ErrorKind, #[case] status: u16, #[case] retryable: bool) {
        assert_eq!(kind.http_status(), status);
        assert_eq!(kind.is_retryable(), retryable);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ErrorKind::NotFound("comic").to_string(), "comic not found");
    }
}
