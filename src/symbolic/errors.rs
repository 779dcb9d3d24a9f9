use thiserror::Error;

/// Failures of turning calculator notation into an [`Expr`](super::symbolic_engine::Expr).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Unbalanced brackets in \"{0}\"")]
    UnbalancedBrackets(String),
    #[error("Undefined function {0}")]
    UndefinedFunction(String),
    #[error("Invalid number \"{0}\"")]
    InvalidNumber(String),
    #[error("Invalid expression format \"{0}\"")]
    InvalidFormat(String),
}

/// Failures of numerical evaluation. Non-finite results are values, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Undefined symbol {0}")]
    UndefinedSymbol(String),
}
