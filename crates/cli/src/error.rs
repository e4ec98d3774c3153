use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("failed to initialize logging")]
    Logging,
    #[display("configuration error")]
    Config,
    #[display("invalid arguments")]
    Arguments,
    #[display("could not read {_0}")]
    Input(#[error(not(source))] String),
    #[display("extraction failed")]
    Pipeline,
    #[display("could not write output")]
    Output,
}
