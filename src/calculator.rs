/// ________________________________________________________________________________________________________________________________
/// # Calculator
/// LaTeX-like input in, result string out.
/// 1) the normalizer rewrites LaTeX macros to calculator notation
/// 2) the dispatcher picks the requested operation (evaluate, derivative, simplify, expand,
///    factor, solve, limit) and runs it on an algebra backend
/// 3) numbers are formatted, symbolic results rendered as LaTeX
///# Example
/// ```
/// use latex_calc::calculator::evaluate;
/// assert_eq!(evaluate("\\sqrt{16}"), "4");
/// assert_eq!(evaluate("solve(x^2-4x+4, x)"), "2");
/// assert_eq!(evaluate("\\frac{d}{dx}\\left(x^{3}\\right)"), "3\\cdot x^{2}");
/// assert_eq!(evaluate("limit(1/x, x \\to \\infty)"), "0.000000");
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod dispatcher;
pub mod normalizer;
/// degree <= 2 equations through derivatives at zero
pub mod solver;
/// independent of the rest: compares a user's answer with the stored one
///# Example
/// ```
/// use latex_calc::calculator::is_equivalent;
/// assert!(is_equivalent("π", "3.14159"));
/// assert!(is_equivalent("Converge", "converge"));
/// ```
pub mod answer_judge;
pub mod config;
pub mod errors;
pub mod number_format;
pub mod trace;

#[cfg(test)]
mod calculator_tests;

pub use answer_judge::is_equivalent;
pub use dispatcher::{Calculator, OperationRequest, classify, evaluate};
