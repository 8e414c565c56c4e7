//! Crate-level error type and `Result` alias.
//! Every operation validates its inputs up front and reports problems as
//! `Error::InvalidInput`; failures of the resize primitive surface as `Error::Resize`.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {arg}: {reason}")]
    InvalidInput { arg: &'static str, reason: String },

    #[error("Resize error: {0}")]
    Resize(String),
}

impl Error {
    pub fn invalid<S: Into<String>>(arg: &'static str, reason: S) -> Self {
        Error::InvalidInput {
            arg,
            reason: reason.into(),
        }
    }

    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }
}
