//! # Symbolic Engine Module
//!
//! Core expression tree of the calculator's algebra backend. Everything the calculator
//! hands to the backend (parse, evaluate, differentiate, simplify, expand, rationalize,
//! render) is expressed over the [`Expr`] enum defined here.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - symbolic variables like "x", also the named constants
//!   `pi`, `e`, `hbar` and `Infinity`, which are resolved only at evaluation time
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `Log10`, `Sqrt`, `Abs`, `sin`, `cos`, ... - unary functions
//!
//! ### Key Methods
//! - `contains_variable()` - occurrence check
//! - `map_unary()` / `unary_arg()` - uniform access to the function variants
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Expression Tree**: Uses Box<Expr> for nested expressions
//! 2. **Operator Overloading**: `x + y * z` builds the tree directly
//! 3. **Non-standard Function Names**: mathematical notation (tg, ctg, arctg) for the
//!    trigonometric family, the parser accepts both spellings

#![allow(non_camel_case_types)]

use std::fmt;

/// Reduced Planck constant in J*s, the value the `\hbar` macro evaluates to.
pub const HBAR: f64 = 1.054571817e-34;

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust, ignore
/// use latex_calc::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable or named constant
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x), also spelled log(x)
    Ln(Box<Expr>),
    /// Decimal logarithm: log10(x)
    Log10(Box<Expr>),
    /// Square root: sqrt(x)
    Sqrt(Box<Expr>),
    /// Absolute value: abs(x)
    Abs(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function: tan(x)
    tg(Box<Expr>),
    /// Cotangent function: cot(x)
    ctg(Box<Expr>),
    /// Arcsine function: arcsin(x)
    arcsin(Box<Expr>),
    /// Arccosine function: arccos(x)
    arccos(Box<Expr>),
    /// Arctangent function: arctan(x)
    arctg(Box<Expr>),
    /// Arccotangent function: arccot(x)
    arcctg(Box<Expr>),
}

/// Plain calculator notation, fully parenthesised so the output parses back unchanged.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => {
                if *val < 0.0 {
                    write!(f, "({})", val)
                } else {
                    write!(f, "{}", val)
                }
            }
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            _ => match self.unary_arg() {
                Some((name, arg)) => write!(f, "{}({})", name, arg),
                None => Ok(()),
            },
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Shorthand for `Expr::Var(name.to_string())`.
    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// Name and argument of a unary function variant, `None` for leaves and binary operations.
    pub fn unary_arg(&self) -> Option<(&'static str, &Expr)> {
        match self {
            Expr::Exp(arg) => Some(("exp", arg)),
            Expr::Ln(arg) => Some(("ln", arg)),
            Expr::Log10(arg) => Some(("log10", arg)),
            Expr::Sqrt(arg) => Some(("sqrt", arg)),
            Expr::Abs(arg) => Some(("abs", arg)),
            Expr::sin(arg) => Some(("sin", arg)),
            Expr::cos(arg) => Some(("cos", arg)),
            Expr::tg(arg) => Some(("tan", arg)),
            Expr::ctg(arg) => Some(("cot", arg)),
            Expr::arcsin(arg) => Some(("arcsin", arg)),
            Expr::arccos(arg) => Some(("arccos", arg)),
            Expr::arctg(arg) => Some(("arctan", arg)),
            Expr::arcctg(arg) => Some(("arccot", arg)),
            _ => None,
        }
    }

    /// Rebuilds the same unary function around a new argument.
    ///
    /// For non-unary variants the expression is returned unchanged.
    pub fn map_unary(&self, new_arg: Expr) -> Expr {
        let arg = Box::new(new_arg);
        match self {
            Expr::Exp(_) => Expr::Exp(arg),
            Expr::Ln(_) => Expr::Ln(arg),
            Expr::Log10(_) => Expr::Log10(arg),
            Expr::Sqrt(_) => Expr::Sqrt(arg),
            Expr::Abs(_) => Expr::Abs(arg),
            Expr::sin(_) => Expr::sin(arg),
            Expr::cos(_) => Expr::cos(arg),
            Expr::tg(_) => Expr::tg(arg),
            Expr::ctg(_) => Expr::ctg(arg),
            Expr::arcsin(_) => Expr::arcsin(arg),
            Expr::arccos(_) => Expr::arccos(arg),
            Expr::arctg(_) => Expr::arctg(arg),
            Expr::arcctg(_) => Expr::arcctg(arg),
            _ => self.clone(),
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            _ => self
                .unary_arg()
                .is_some_and(|(_, arg)| arg.contains_variable(var_name)),
        }
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Checks if expression is exactly one (constant 1.0).
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 1.0)
    }
}
