//! # Symbolic Expression Simplification Module
//!
//! Algebraic simplification of symbolic expressions, from constant folding to like-term
//! collection.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: arithmetic on numerical constants, and unary functions of
//!    constants when the result is an exact integer (`sqrt(16)` -> `4`, `sin(0)` -> `0`)
//! 2. **Algebraic Identities**: `x + 0 = x`, `x * 1 = x`, `x * 0 = 0`, `x^0 = 1`, `x - x = 0`
//! 3. **Product Collection**: constants of a product are multiplied together and equal bases
//!    have their exponents added: `2 * x * 3 * x` -> `6 * x^2`
//! 4. **Sum Collection**: terms with the same monomial part are merged: `3x + 2x` -> `5x`.
//!    Factors that are not variables (like `sin(x)`) take part as opaque atoms
//!
//! Sums are rebuilt in descending total degree, constant term last.

use crate::symbolic::symbolic_engine::Expr;
use std::collections::BTreeMap;

const INTEGER_SNAP: f64 = 1e-10;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Comprehensive algebraic simplification using mathematical identities.
    ///
    /// ## Simplification Rules Applied
    ///
    /// ### Additive Identities
    /// - `x + 0 = x` and `0 + x = x`
    /// - `x - 0 = x`, `0 - x = -x`
    /// - `x - x = 0`
    ///
    /// ### Multiplicative Identities
    /// - `x * 1 = x` and `1 * x = x`
    /// - `x * 0 = 0` and `0 * x = 0`
    ///
    /// ### Power Rules
    /// - `x^0 = 1`, `x^1 = x`, `1^x = 1`
    /// - `x^a * x^b = x^(a+b)` through product collection
    /// - `(x^a)^n = x^(a*n)` for integer `n`
    ///
    /// ### Division Rules
    /// - `0 / x = 0`, `x / 1 = x`, `x / x = 1`
    /// - `x^a / x^b = x^(a-b)`
    /// - `(c1 * x) / c2 = (c1/c2) * x`
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) => self.clone(),
            Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b), // (a) + (b) = (a + b)
                    _ if lhs.is_zero() => rhs,                              // 0 + x = x
                    _ if rhs.is_zero() => lhs,                              // x + 0 = x
                    _ => {
                        let expr = Expr::Add(Box::new(lhs), Box::new(rhs));
                        Self::simplify_polynomial(&expr).unwrap_or(expr)
                    }
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b), // (a) - (b) = (a - b)
                    _ if rhs.is_zero() => lhs,                              // x - 0 = x
                    _ if lhs == rhs => Expr::Const(0.0),                    // x - x = 0
                    _ if lhs.is_zero() => {
                        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(rhs)).simplify_()
                    }
                    _ => {
                        let expr = Expr::Sub(Box::new(lhs), Box::new(rhs));
                        Self::simplify_polynomial(&expr).unwrap_or(expr)
                    }
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b), // (a) * (b) = (a * b)
                    _ if lhs.is_zero() || rhs.is_zero() => Expr::Const(0.0), // 0 * x = 0
                    _ if lhs.is_one() => rhs,                               // 1 * x = x
                    _ if rhs.is_one() => lhs,                               // x * 1 = x
                    // c * (a + b) = c*a + c*b, keeps sums flat for term collection
                    (Expr::Const(_), Expr::Add(_, _) | Expr::Sub(_, _)) => {
                        let expr = Expr::Mul(Box::new(lhs), Box::new(rhs));
                        Self::simplify_polynomial(&expr).unwrap_or(expr)
                    }
                    _ => Self::simplify_product(&Expr::Mul(Box::new(lhs), Box::new(rhs))),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b), // (a) / (b)
                    (Expr::Const(_), Expr::Const(_)) => Expr::Div(Box::new(lhs), Box::new(rhs)),
                    _ if lhs.is_zero() => Expr::Const(0.0), // 0 / x = 0
                    _ if rhs.is_one() => lhs,               // x / 1 = x
                    _ if lhs == rhs => Expr::Const(1.0),    // x / x = 1
                    // (c1 * expr) / c2 = (c1/c2) * expr
                    (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(c)) if *c != 0.0 => {
                        match (inner_lhs.as_ref(), inner_rhs.as_ref()) {
                            (Expr::Const(c1), _) => {
                                Expr::Mul(Box::new(Expr::Const(c1 / c)), inner_rhs.clone())
                                    .simplify_()
                            }
                            _ => Expr::Div(Box::new(lhs.clone()), Box::new(rhs.clone())),
                        }
                    }
                    // expr / c = (1/c) * expr for a plain variable or power
                    (Expr::Var(_) | Expr::Pow(_, _), Expr::Const(c)) if *c != 0.0 => {
                        Expr::Mul(Box::new(Expr::Const(1.0 / c)), Box::new(lhs.clone())).simplify_()
                    }
                    _ => {
                        // x^a / x^b = x^(a-b)
                        let (base1, exp1) = split_power(&lhs);
                        let (base2, exp2) = split_power(&rhs);
                        if base1 == base2 && !matches!(base1, Expr::Const(_)) {
                            let new_exp = Expr::Sub(Box::new(exp1), Box::new(exp2)).simplify_();
                            Expr::Pow(Box::new(base1), Box::new(new_exp)).simplify_()
                        } else {
                            Expr::Div(Box::new(lhs), Box::new(rhs))
                        }
                    }
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)), // (a) ^ (b) = (a ^ b)
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(1.0),       // x ^ 0 = 1
                    (_, Expr::Const(b)) if *b == 1.0 => base,                   // x ^ 1 = x
                    (Expr::Const(a), _) if *a == 1.0 => Expr::Const(1.0),       // 1 ^ x = 1
                    // (x^a)^n = x^(a*n) for integer n
                    (Expr::Pow(inner_base, inner_exp), Expr::Const(n)) if n.fract() == 0.0 => {
                        let new_exp = Expr::Mul(inner_exp.clone(), Box::new(exp.clone())).simplify_();
                        Expr::Pow(inner_base.clone(), Box::new(new_exp)).simplify_()
                    }
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            _ => match self.unary_arg() {
                Some((_, arg)) => {
                    let arg = arg.simplify_();
                    let rebuilt = self.map_unary(arg);
                    if let Some((_, Expr::Const(_))) = rebuilt.unary_arg() {
                        // fold only when the value is an exact integer, sqrt(2) stays symbolic
                        if let Ok(value) = rebuilt.eval_constant() {
                            if value.is_finite() && (value - value.round()).abs() < INTEGER_SNAP {
                                return Expr::Const(value.round() + 0.0);
                            }
                        }
                    }
                    rebuilt
                }
                None => self.clone(),
            },
        }
    }

    /// Collect like terms of a sum.
    ///
    /// ## Algorithm Overview
    ///
    /// 1. **Flattening**: nested Add/Sub and constant multiples of sums become a flat term list
    /// 2. **Monomial Extraction**: each term becomes coefficient * monomial
    /// 3. **Grouping**: coefficients of equal monomials are summed, zero terms dropped
    /// 4. **Reconstruction**: terms are ordered by descending degree and rebuilt, negative
    ///    coefficients turning into subtraction
    ///
    /// ## Examples
    ///
    /// - `3x + 2x` → `5x`
    /// - `x^2 + 2x^2 - x^2` → `2x^2`
    /// - `(a + b) + (-1) * (a + b)` → `0`
    /// - `2 sin(x) + sin(x)` → `3 sin(x)`
    ///
    /// # Returns
    /// * `Some(simplified_expr)` - the rebuilt sum
    /// * `None` - if the expression does not flatten into at least two terms
    fn simplify_polynomial(expr: &Expr) -> Option<Expr> {
        let mut terms = Vec::new();
        flatten_add(expr, 1.0, &mut terms);
        if terms.len() < 2 {
            return None;
        }

        let mut atoms: BTreeMap<String, Expr> = BTreeMap::new();
        let mut collected: Vec<(MonomialKey, f64)> = Vec::new();
        for term in &terms {
            let (monomial, coeff) = extract_monomial(term, &mut atoms);
            match collected.iter_mut().find(|(m, _)| *m == monomial) {
                Some((_, total)) => *total += coeff,
                None => collected.push((monomial, coeff)),
            }
        }
        collected.retain(|(_, coeff)| *coeff != 0.0);
        // stable sort keeps first-appearance order inside one degree
        collected.sort_by(|(a, _), (b, _)| b.degree().cmp(&a.degree()));

        let mut result: Option<Expr> = None;
        for (monomial, coeff) in collected {
            result = Some(match result {
                None => Self::build_monomial_term(&monomial, coeff, &atoms),
                Some(acc) if coeff < 0.0 => Expr::Sub(
                    Box::new(acc),
                    Box::new(Self::build_monomial_term(&monomial, -coeff, &atoms)),
                ),
                Some(acc) => Expr::Add(
                    Box::new(acc),
                    Box::new(Self::build_monomial_term(&monomial, coeff, &atoms)),
                ),
            });
        }
        Some(result.unwrap_or(Expr::Const(0.0)))
    }

    /// Collect the factors of a product: constants are multiplied, exponents of equal
    /// bases are added. `2 * x * 3 * x^2` → `6 * x^3`.
    fn simplify_product(expr: &Expr) -> Expr {
        let mut factors = Vec::new();
        flatten_mul(expr, &mut factors);

        let mut coeff = 1.0;
        let mut bases: Vec<(Expr, Expr)> = Vec::new();
        for factor in factors {
            if let Expr::Const(c) = factor {
                coeff *= c;
                continue;
            }
            let (base, exp) = split_power(&factor);
            match bases.iter_mut().find(|(b, _)| *b == base) {
                Some((_, total)) => {
                    *total = Expr::Add(Box::new(total.clone()), Box::new(exp)).simplify_()
                }
                None => bases.push((base, exp)),
            }
        }
        if coeff == 0.0 {
            return Expr::Const(0.0);
        }

        let mut result: Vec<Expr> = Vec::new();
        if coeff != 1.0 || bases.is_empty() {
            result.push(Expr::Const(coeff));
        }
        for (base, exp) in bases {
            if exp.is_zero() {
                continue;
            }
            if exp.is_one() {
                result.push(base);
            } else {
                result.push(Expr::Pow(Box::new(base), Box::new(exp)));
            }
        }
        result
            .into_iter()
            .reduce(|a, b| Expr::Mul(Box::new(a), Box::new(b)))
            .unwrap_or(Expr::Const(1.0))
    }

    /// Build a term from monomial key and coefficient.
    ///
    /// - `monomial: {}, coeff: 5.0` → `Const(5.0)`
    /// - `monomial: {"x": 1}, coeff: 3.0` → `3.0 * x`
    /// - `monomial: {"x": 2}, coeff: 1.0` → `x^2`
    /// - `monomial: {"x": 1}, coeff: -1.0` → `-1 * x`
    fn build_monomial_term(monomial: &MonomialKey, coeff: f64, atoms: &BTreeMap<String, Expr>) -> Expr {
        if monomial.0.is_empty() {
            return Expr::Const(coeff);
        }

        let mut factors = Vec::new();
        if coeff != 1.0 {
            factors.push(Expr::Const(coeff));
        }
        for (key, exp) in &monomial.0 {
            let atom = atoms.get(key).cloned().unwrap_or_else(|| Expr::Var(key.clone()));
            if *exp == 1 {
                factors.push(atom);
            } else {
                factors.push(Expr::Pow(Box::new(atom), Box::new(Expr::Const(*exp as f64))));
            }
        }
        factors
            .into_iter()
            .reduce(|a, b| Expr::Mul(Box::new(a), Box::new(b)))
            .unwrap_or(Expr::Const(1.0))
    }

    /// Public interface for expression simplification.
    pub fn simplify(&self) -> Expr {
        self.simplify_()
    }
}

/// Represents the variable part of a polynomial term (monomial).
///
/// Maps an atom (a variable name, or the printed form of an opaque factor such as
/// `sin(x)`) to its integer exponent. `BTreeMap` keeps `x*y` and `y*x` equal.
///
/// - `x^2` → `MonomialKey({"x": 2})`
/// - `x*y^3` → `MonomialKey({"x": 1, "y": 3})`
/// - `5` (constant) → `MonomialKey({})`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonomialKey(pub BTreeMap<String, i32>);

impl MonomialKey {
    /// total degree, the sum of all exponents
    pub fn degree(&self) -> i32 {
        self.0.values().sum()
    }
}

/// Splits `b^e` into `(b, e)`; anything else is `(expr, 1)`.
fn split_power(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Pow(base, exp) => ((**base).clone(), (**exp).clone()),
        _ => (expr.clone(), Expr::Const(1.0)),
    }
}

/// Flatten nested Add/Sub expressions into a list of terms, distributing constant factors.
///
/// - `a + b` → `[a, b]`
/// - `a - b` → `[a, -1*b]`
/// - `-1 * (x + y)` → `[-1*x, -1*y]`
/// - `2 * (x - 1)` → `[2*x, -2]`
fn flatten_add(expr: &Expr, factor: f64, out: &mut Vec<Expr>) {
    match expr {
        Expr::Add(a, b) => {
            flatten_add(a, factor, out);
            flatten_add(b, factor, out);
        }
        Expr::Sub(a, b) => {
            flatten_add(a, factor, out);
            flatten_add(b, -factor, out);
        }
        Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(c), inner @ (Expr::Add(_, _) | Expr::Sub(_, _)))
            | (inner @ (Expr::Add(_, _) | Expr::Sub(_, _)), Expr::Const(c)) => {
                flatten_add(inner, factor * c, out)
            }
            _ => out.push(scaled(expr, factor)),
        },
        Expr::Const(c) => out.push(Expr::Const(c * factor)),
        _ => out.push(scaled(expr, factor)),
    }
}

fn scaled(expr: &Expr, factor: f64) -> Expr {
    if factor == 1.0 {
        expr.clone()
    } else {
        Expr::Mul(Box::new(Expr::Const(factor)), Box::new(expr.clone()))
    }
}

/// Flatten nested multiplication expressions into a list of factors.
///
/// - `(a * b) * c` → `[a, b, c]`
fn flatten_mul(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Mul(a, b) => {
            flatten_mul(a, out);
            flatten_mul(b, out);
        }
        _ => out.push(expr.clone()),
    }
}

/// Extract coefficient and monomial of a term. Factors that are not variables or
/// positive integer powers are recorded in `atoms` under their printed form.
fn extract_monomial(expr: &Expr, atoms: &mut BTreeMap<String, Expr>) -> (MonomialKey, f64) {
    let mut factors = Vec::new();
    flatten_mul(expr, &mut factors);

    let mut coeff = 1.0;
    let mut map = BTreeMap::new();
    for factor in factors {
        let (atom, exponent) = match &factor {
            Expr::Const(c) => {
                coeff *= c;
                continue;
            }
            Expr::Pow(base, exp) => match exp.as_ref() {
                Expr::Const(n)
                    if n.fract() == 0.0 && *n > 0.0 && !matches!(base.as_ref(), Expr::Const(_)) =>
                {
                    ((**base).clone(), *n as i32)
                }
                _ => (factor.clone(), 1),
            },
            _ => (factor.clone(), 1),
        };
        let key = atom.to_string();
        atoms.entry(key.clone()).or_insert(atom);
        *map.entry(key).or_insert(0) += exponent;
    }
    (MonomialKey(map), coeff)
}
