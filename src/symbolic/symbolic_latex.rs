//! LaTeX rendering of symbolic expressions.
//!
//! Parentheses are emitted only where operator precedence needs them, as `\left( \right)`
//! pairs. Fractions use `\frac`, roots `\sqrt`, products `\cdot`.

use crate::symbolic::symbolic_engine::Expr;

// binding strength of the outermost operator
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_POWER: u8 = 3;
const PREC_ATOM: u8 = 4;

/// Constant with at most six decimals, trailing zeros trimmed.
pub fn latex_number(value: f64) -> String {
    if value.is_nan() {
        return "\\mathrm{NaN}".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "\\infty" } else { "-\\infty" }.to_string();
    }
    if (value - value.round()).abs() < 1e-10 {
        return format!("{:.0}", value.round() + 0.0);
    }
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" { "0".to_string() } else { trimmed.to_string() }
}

fn latex_variable(name: &str) -> String {
    match name {
        "pi" | "π" => "\\pi".to_string(),
        "hbar" => "\\hbar".to_string(),
        "Infinity" => "\\infty".to_string(),
        _ if name.chars().count() == 1 => name.to_string(),
        _ => format!("\\mathrm{{{}}}", name),
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(_, _) | Expr::Sub(_, _) => PREC_SUM,
        Expr::Mul(_, _) => PREC_PRODUCT,
        Expr::Const(c) if *c < 0.0 => PREC_PRODUCT,
        Expr::Pow(_, _) => PREC_POWER,
        _ => PREC_ATOM,
    }
}

fn paren(s: String) -> String {
    format!("\\left({}\\right)", s)
}

/// Renders `expr`, wrapped in parentheses when it binds looser than `min_prec`.
fn wrapped(expr: &Expr, min_prec: u8) -> String {
    let inner = expr.to_latex();
    if precedence(expr) < min_prec { paren(inner) } else { inner }
}

/// `-c * rest` or a negative constant, split into its positive counterpart for `a - b` output.
fn negated(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Const(c) if *c < 0.0 => Some(Expr::Const(-c)),
        Expr::Mul(lhs, rhs) => match lhs.as_ref() {
            Expr::Const(c) if *c == -1.0 => Some((**rhs).clone()),
            Expr::Const(c) if *c < 0.0 => Some(Expr::Mul(Box::new(Expr::Const(-c)), rhs.clone())),
            _ => None,
        },
        _ => None,
    }
}

impl Expr {
    /// LaTeX source for the expression.
    pub fn to_latex(&self) -> String {
        match self {
            Expr::Var(name) => latex_variable(name),
            Expr::Const(c) => latex_number(*c),
            Expr::Add(lhs, rhs) => match negated(rhs) {
                Some(positive) => format!("{}-{}", lhs.to_latex(), wrapped(&positive, PREC_PRODUCT)),
                None => format!("{}+{}", lhs.to_latex(), rhs.to_latex()),
            },
            Expr::Sub(lhs, rhs) => format!("{}-{}", lhs.to_latex(), wrapped(rhs, PREC_PRODUCT)),
            Expr::Mul(lhs, rhs) => {
                if let Expr::Const(c) = lhs.as_ref() {
                    if *c == -1.0 {
                        return format!("-{}", wrapped(rhs, PREC_PRODUCT));
                    }
                }
                format!(
                    "{}\\cdot {}",
                    wrapped(lhs, PREC_PRODUCT),
                    wrapped(rhs, PREC_POWER)
                )
            }
            Expr::Div(lhs, rhs) => format!("\\frac{{{}}}{{{}}}", lhs.to_latex(), rhs.to_latex()),
            Expr::Pow(base, exp) => {
                format!("{}^{{{}}}", wrapped(base, PREC_ATOM), exp.to_latex())
            }
            Expr::Sqrt(arg) => format!("\\sqrt{{{}}}", arg.to_latex()),
            Expr::Abs(arg) => format!("\\left|{}\\right|", arg.to_latex()),
            _ => match self.unary_arg() {
                Some((name, arg)) => {
                    let command = match name {
                        "log10" => "\\log_{10}".to_string(),
                        "arccot" => "\\operatorname{arccot}".to_string(),
                        other => format!("\\{}", other),
                    };
                    format!("{}{}", command, paren(arg.to_latex()))
                }
                None => String::new(),
            },
        }
    }
}
