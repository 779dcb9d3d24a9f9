use crate::symbolic::errors::{EvalError, ParseError};
use thiserror::Error;

/// Failure of one calculator request. Always recovered inside the request and shown
/// to the caller as `"Error: <message>"`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// the canonical expression could not be parsed
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// parsed, but a required value is undefined or not finite
    #[error("{0}")]
    Evaluation(String),
    /// outside of what the calculator can do
    #[error("{0}")]
    Unsupported(String),
}

impl From<EvalError> for CalcError {
    fn from(err: EvalError) -> Self {
        CalcError::Evaluation(err.to_string())
    }
}
