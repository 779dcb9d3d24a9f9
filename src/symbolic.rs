#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// failures of parsing and evaluation
pub mod errors;
/// a module turns a String expression in calculator notation into a symbolic expression
///
///# Example
/// ```
/// use latex_calc::symbolic::symbolic_engine::Expr;
/// let input = "x^2 + 2*x*y + y^2";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert!(parsed_expression.contains_variable("y"));
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) turns a String expression into a symbolic expression
/// 2) differentiates, simplifies, expands and evaluates it
/// 3) renders the result as LaTeX
///# Example#
/// ```
/// use latex_calc::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("sin(x)*x").unwrap();
/// // differentiate with respect to x and simplify
/// let df_dx = f.diff("x").simplify();
/// println!("df_dx = {}", df_dx.to_latex());
/// // evaluate the derivative at x = 0
/// let value = df_dx.eval_at("x", 0.0).unwrap();
/// assert_eq!(value, 0.0);
/// ```
/// Example2#
/// ```
/// use latex_calc::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("(x-2)*(x-3)").unwrap();
/// assert_eq!(f.expand().to_latex(), "x^{2}-5\\cdot x+6");
/// let g = Expr::parse_expression("x + 1/x").unwrap();
/// assert_eq!(g.rationalize().to_latex(), "\\frac{x^{2}+1}{x}");
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
pub mod symbolic_expand;
pub mod symbolic_latex;
pub mod symbolic_simplify;
/// the seam between the calculator and the algebra engine
pub mod symbolic_traits;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions mainly for bracket parsing and proceeding
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
