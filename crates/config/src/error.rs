use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configuration source couldn't be read or didn't match the schema.
    #[display("failed to load configuration")]
    Load,
    #[display("unknown site profile: {_0}")]
    UnknownSite(#[error(not(source))] String),
    /// Loaded fine, but describes something unusable.
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] String),
}

impl ErrorKind {
    /// Configuration problems need a human to fix them.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
