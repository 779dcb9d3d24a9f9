// SYMBOLIC TRAITS //////////////////////////////////////////////////////////////////
// The calculator talks to the algebra engine only through AlgebraBackend.
// NativeBackend wraps the Expr engine of this crate, add other engines here as needed

use crate::symbolic::errors::{EvalError, ParseError};
use crate::symbolic::symbolic_engine::Expr;
use std::collections::HashMap;

/// Capabilities the calculator needs from a symbolic algebra engine.
pub trait AlgebraBackend {
    /// Expression tree of the engine.
    type Tree: Clone + std::fmt::Debug;

    /// Parses calculator notation (`x^2 + sin(x)`, explicit `*`).
    fn parse(&self, text: &str) -> Result<Self::Tree, ParseError>;
    /// Numerical value with the variables bound by `scope`. Non-finite values are not errors.
    fn evaluate(&self, tree: &Self::Tree, scope: &HashMap<String, f64>) -> Result<f64, EvalError>;
    fn derivative(&self, tree: &Self::Tree, variable: &str) -> Self::Tree;
    fn simplify(&self, tree: &Self::Tree) -> Self::Tree;
    fn expand(&self, tree: &Self::Tree) -> Self::Tree;
    /// Single fraction with expanded numerator and denominator.
    fn rationalize(&self, tree: &Self::Tree) -> Self::Tree;
    /// LaTeX rendering.
    fn to_display(&self, tree: &Self::Tree) -> String;
}

///////////////// IMPLEMENTATION OF THE TRAIT FOR THE NATIVE ENGINE /////////////////////////
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeBackend;

impl AlgebraBackend for NativeBackend {
    type Tree = Expr;

    fn parse(&self, text: &str) -> Result<Expr, ParseError> {
        Expr::parse_expression(text)
    }
    fn evaluate(&self, tree: &Expr, scope: &HashMap<String, f64>) -> Result<f64, EvalError> {
        tree.eval(scope)
    }
    fn derivative(&self, tree: &Expr, variable: &str) -> Expr {
        tree.diff(variable)
    }
    fn simplify(&self, tree: &Expr) -> Expr {
        tree.simplify()
    }
    fn expand(&self, tree: &Expr) -> Expr {
        tree.expand()
    }
    fn rationalize(&self, tree: &Expr) -> Expr {
        tree.rationalize()
    }
    fn to_display(&self, tree: &Expr) -> String {
        tree.to_latex()
    }
}

/// a borrowed backend works wherever an owned one does
impl<T: AlgebraBackend + ?Sized> AlgebraBackend for &T {
    type Tree = T::Tree;

    fn parse(&self, text: &str) -> Result<Self::Tree, ParseError> {
        (**self).parse(text)
    }
    fn evaluate(&self, tree: &Self::Tree, scope: &HashMap<String, f64>) -> Result<f64, EvalError> {
        (**self).evaluate(tree, scope)
    }
    fn derivative(&self, tree: &Self::Tree, variable: &str) -> Self::Tree {
        (**self).derivative(tree, variable)
    }
    fn simplify(&self, tree: &Self::Tree) -> Self::Tree {
        (**self).simplify(tree)
    }
    fn expand(&self, tree: &Self::Tree) -> Self::Tree {
        (**self).expand(tree)
    }
    fn rationalize(&self, tree: &Self::Tree) -> Self::Tree {
        (**self).rationalize(tree)
    }
    fn to_display(&self, tree: &Self::Tree) -> String {
        (**self).to_display(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_backend_round() {
        let backend = NativeBackend;
        let tree = backend.parse("x^3").unwrap();
        let derivative = backend.simplify(&backend.derivative(&tree, "x"));
        assert_eq!(backend.to_display(&derivative), "3\\cdot x^{2}");

        let mut scope = HashMap::new();
        scope.insert("x".to_string(), 2.0);
        assert_eq!(backend.evaluate(&derivative, &scope), Ok(12.0));
    }

    #[test]
    fn test_native_backend_reports_errors() {
        let backend = NativeBackend;
        assert!(backend.parse("foo(x)").is_err());
        let tree = backend.parse("y+1").unwrap();
        assert_eq!(
            backend.evaluate(&tree, &HashMap::new()),
            Err(EvalError::UndefinedSymbol("y".to_string()))
        );
    }
}
