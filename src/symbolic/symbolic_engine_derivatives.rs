//! # Symbolic Engine Derivatives Module
//!
//! Extends the symbolic engine with analytical differentiation and numerical evaluation.
//!
//! ## Key Methods
//!
//! ### Differentiation
//! - `diff(var: &str)` - Analytical derivative
//!
//! ### Function evaluation
//! - `eval()` - Direct evaluation against a scope of variable values
//! - `eval_constant()` - Evaluation of an expression without free variables
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Differentiation Rules**: product rule, quotient rule, chain rule, and three
//!    flavours of the power rule depending on where the variable occurs
//! 2. **Named constants**: `pi`, `e`, `hbar`, `Infinity` are variables for differentiation
//!    (their derivative is zero) and constants for evaluation
//! 3. **IEEE semantics**: division by zero and domain errors produce infinities or NaN, the
//!    caller decides whether a non-finite value is acceptable

use crate::symbolic::errors::EvalError;
use crate::symbolic::symbolic_engine::{Expr, HBAR};
use std::collections::HashMap;
use std::f64::consts::{E, LN_10, PI};

/// Value of a named constant, `None` for ordinary variables.
pub fn named_constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "π" => Some(PI),
        "e" => Some(E),
        "hbar" => Some(HBAR),
        "Infinity" => Some(f64::INFINITY),
        _ => None,
    }
}

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements the standard differentiation rules:
    /// - Power rule: d/dx(u^n) = n*u^(n-1)*u' when n does not depend on x
    /// - Exponential rule: d/dx(a^v) = a^v*ln(a)*v' when a does not depend on x
    /// - General rule: d/dx(u^v) = u^v*(v'*ln(u) + v*u'/u)
    /// - Product rule, quotient rule, chain rule for every function
    ///
    /// The result is not simplified.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x"); // 2*x^(2-1)*1
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)), lhs.clone())),
                )),
                Box::new(Expr::Pow(rhs.clone(), Box::new(Expr::Const(2.0)))),
            ),
            Expr::Pow(base, exp) => {
                if !exp.contains_variable(var) {
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            exp.clone(),
                            Box::new(Expr::Pow(
                                base.clone(),
                                Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                            )),
                        )),
                        Box::new(base.diff(var)),
                    )
                } else if !base.contains_variable(var) {
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            Box::new(self.clone()),
                            Box::new(Expr::Ln(base.clone())),
                        )),
                        Box::new(exp.diff(var)),
                    )
                } else {
                    // u^v * (v' ln u + v u' / u)
                    Expr::Mul(
                        Box::new(self.clone()),
                        Box::new(Expr::Add(
                            Box::new(Expr::Mul(
                                Box::new(exp.diff(var)),
                                Box::new(Expr::Ln(base.clone())),
                            )),
                            Box::new(Expr::Div(
                                Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)))),
                                base.clone(),
                            )),
                        )),
                    )
                }
            }
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)), expr.clone()),
            Expr::Log10(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Mul(expr.clone(), Box::new(Expr::Const(LN_10)))),
            ),
            Expr::Sqrt(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(2.0)),
                    Box::new(Expr::Sqrt(expr.clone())),
                )),
            ),
            Expr::Abs(expr) => Expr::Mul(
                Box::new(Expr::Div(expr.clone(), Box::new(Expr::Abs(expr.clone())))),
                Box::new(expr.diff(var)),
            ),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::tg(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::cos(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::ctg(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::sin(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::arcsin(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Sqrt(Box::new(Expr::Sub(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )))),
            ),
            Expr::arccos(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Sqrt(Box::new(Expr::Sub(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )))),
            ),
            Expr::arctg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
            Expr::arcctg(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
        }
    } // end of diff

    /// EVALUATION

    /// Evaluates the expression numerically.
    ///
    /// Variables are looked up in `scope` first, then among the named constants.
    /// Returns `EvalError::UndefinedSymbol` for any other identifier.
    pub fn eval(&self, scope: &HashMap<String, f64>) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Var(name) => match scope.get(name) {
                Some(value) => *value,
                None => named_constant(name)
                    .ok_or_else(|| EvalError::UndefinedSymbol(name.clone()))?,
            },
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval(scope)? + rhs.eval(scope)?,
            Expr::Sub(lhs, rhs) => lhs.eval(scope)? - rhs.eval(scope)?,
            Expr::Mul(lhs, rhs) => lhs.eval(scope)? * rhs.eval(scope)?,
            Expr::Div(lhs, rhs) => lhs.eval(scope)? / rhs.eval(scope)?,
            Expr::Pow(base, exp) => base.eval(scope)?.powf(exp.eval(scope)?),
            Expr::Exp(expr) => expr.eval(scope)?.exp(),
            Expr::Ln(expr) => expr.eval(scope)?.ln(),
            Expr::Log10(expr) => expr.eval(scope)?.log10(),
            Expr::Sqrt(expr) => expr.eval(scope)?.sqrt(),
            Expr::Abs(expr) => expr.eval(scope)?.abs(),
            Expr::sin(expr) => expr.eval(scope)?.sin(),
            Expr::cos(expr) => expr.eval(scope)?.cos(),
            Expr::tg(expr) => expr.eval(scope)?.tan(),
            Expr::ctg(expr) => 1.0 / expr.eval(scope)?.tan(),
            Expr::arcsin(expr) => expr.eval(scope)?.asin(),
            Expr::arccos(expr) => expr.eval(scope)?.acos(),
            Expr::arctg(expr) => expr.eval(scope)?.atan(),
            Expr::arcctg(expr) => (1.0 / expr.eval(scope)?).atan(),
        };
        Ok(value)
    }

    /// Evaluates an expression that has no free variables.
    pub fn eval_constant(&self) -> Result<f64, EvalError> {
        self.eval(&HashMap::new())
    }

    /// Evaluates with a single variable bound to `value`.
    pub fn eval_at(&self, var: &str, value: f64) -> Result<f64, EvalError> {
        let mut scope = HashMap::new();
        scope.insert(var.to_string(), value);
        self.eval(&scope)
    }
}
