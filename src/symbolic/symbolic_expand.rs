//! # Expansion and Rationalization
//!
//! - `expand()` multiplies out products of sums and integer powers of sums, then collects
//!   like terms: `(x+1)^2` → `x^2 + 2x + 1`
//! - `rationalize()` brings the expression to a single fraction with expanded numerator
//!   and denominator: `x + 1/x` → `(x^2 + 1)/x`
//!
//! Powers of sums are multiplied out only up to [`MAX_EXPANDED_POWER`], higher powers are
//! kept as they are.

use crate::symbolic::symbolic_engine::Expr;

/// highest integer exponent of a sum that `expand` multiplies out
pub const MAX_EXPANDED_POWER: f64 = 16.0;

impl Expr {
    /// Distributes products over sums and collects like terms.
    pub fn expand(&self) -> Expr {
        expanded_terms(self)
            .into_iter()
            .reduce(|a, b| Expr::Add(Box::new(a), Box::new(b)))
            .unwrap_or(Expr::Const(0.0))
            .simplify()
    }

    /// Rewrites the expression as `numerator / denominator` with both parts expanded.
    /// A denominator of 1 is dropped.
    pub fn rationalize(&self) -> Expr {
        let (num, den) = to_fraction(&self.simplify());
        let num = num.expand();
        let den = den.expand();
        match den {
            Expr::Const(c) if c == 1.0 => num,
            Expr::Const(c) if c != 0.0 => Expr::Div(Box::new(num), Box::new(Expr::Const(c))).expand(),
            _ => Expr::Div(Box::new(num), Box::new(den)),
        }
    }
}

/// The expression as a list of terms whose sum it equals, with no product of sums left.
fn expanded_terms(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Add(lhs, rhs) => {
            let mut terms = expanded_terms(lhs);
            terms.extend(expanded_terms(rhs));
            terms
        }
        Expr::Sub(lhs, rhs) => {
            let mut terms = expanded_terms(lhs);
            terms.extend(
                expanded_terms(rhs)
                    .into_iter()
                    .map(|t| Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(t))),
            );
            terms
        }
        Expr::Mul(lhs, rhs) => cross_product(&expanded_terms(lhs), &expanded_terms(rhs)),
        Expr::Div(lhs, rhs) => {
            let den = rhs.expand();
            expanded_terms(lhs)
                .into_iter()
                .map(|t| Expr::Div(Box::new(t), Box::new(den.clone())))
                .collect()
        }
        Expr::Pow(base, exp) => match exp.as_ref() {
            Expr::Const(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= MAX_EXPANDED_POWER => {
                let base_terms = expanded_terms(base);
                if base_terms.len() < 2 {
                    return vec![Expr::Pow(Box::new(base.expand()), exp.clone())];
                }
                let mut acc = vec![Expr::Const(1.0)];
                for _ in 0..(*n as usize) {
                    // collect after every step so the term count stays small
                    acc = expanded_terms(&sum_of(cross_product(&acc, &base_terms)).simplify());
                }
                acc
            }
            _ => vec![Expr::Pow(Box::new(base.expand()), Box::new(exp.expand()))],
        },
        _ => match expr.unary_arg() {
            Some((_, arg)) => vec![expr.map_unary(arg.expand())],
            None => vec![expr.clone()],
        },
    }
}

fn cross_product(left: &[Expr], right: &[Expr]) -> Vec<Expr> {
    let mut terms = Vec::with_capacity(left.len() * right.len());
    for a in left {
        for b in right {
            terms.push(Expr::Mul(Box::new(a.clone()), Box::new(b.clone())));
        }
    }
    terms
}

fn sum_of(terms: Vec<Expr>) -> Expr {
    terms
        .into_iter()
        .reduce(|a, b| Expr::Add(Box::new(a), Box::new(b)))
        .unwrap_or(Expr::Const(0.0))
}

fn mul(a: Expr, b: Expr) -> Expr {
    if a.is_one() {
        b
    } else if b.is_one() {
        a
    } else {
        Expr::Mul(Box::new(a), Box::new(b))
    }
}

/// Splits an expression into (numerator, denominator).
fn to_fraction(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) => {
            let (n1, d1) = to_fraction(lhs);
            let (n2, d2) = to_fraction(rhs);
            let combine = |a: Expr, b: Expr| match expr {
                Expr::Add(_, _) => Expr::Add(Box::new(a), Box::new(b)),
                _ => Expr::Sub(Box::new(a), Box::new(b)),
            };
            if d1 == d2 {
                (combine(n1, n2), d1)
            } else {
                (
                    combine(mul(n1, d2.clone()), mul(n2, d1.clone())),
                    mul(d1, d2),
                )
            }
        }
        Expr::Mul(lhs, rhs) => {
            let (n1, d1) = to_fraction(lhs);
            let (n2, d2) = to_fraction(rhs);
            (mul(n1, n2), mul(d1, d2))
        }
        Expr::Div(lhs, rhs) => {
            let (n1, d1) = to_fraction(lhs);
            let (n2, d2) = to_fraction(rhs);
            (mul(n1, d2), mul(d1, n2))
        }
        Expr::Pow(base, exp) => match exp.as_ref() {
            Expr::Const(k) if k.fract() == 0.0 => {
                let (nb, db) = to_fraction(base);
                let power = |e: Expr, k: f64| {
                    if k == 1.0 || e.is_one() {
                        e
                    } else {
                        Expr::Pow(Box::new(e), Box::new(Expr::Const(k)))
                    }
                };
                if *k >= 0.0 {
                    (power(nb, *k), power(db, *k))
                } else {
                    (power(db, -k), power(nb, -k))
                }
            }
            _ => (expr.clone(), Expr::Const(1.0)),
        },
        _ => (expr.clone(), Expr::Const(1.0)),
    }
}
