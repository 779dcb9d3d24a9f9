//! Decides whether a user's answer matches the stored correct answer.
//!
//! Both sides are read as numbers when possible and compared within
//! [`ANSWER_TOLERANCE`]. Anything else is compared as text, ignoring case, whitespace
//! and the characters `( ) < >`.

use log::debug;
use std::f64;

/// absolute difference under which two numeric answers are equal
pub const ANSWER_TOLERANCE: f64 = 0.001;

const EULER: &str = "(2.718281828459045)";

/// Plain float. Spellings of infinity and NaN are not accepted.
fn plain_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Arithmetic through `meval` with `pi` and `e` bound.
fn evaluate_arithmetic(expr: &str) -> Option<f64> {
    let parsed = expr.parse::<meval::Expr>().ok()?;
    let mut ctx = meval::Context::new();
    ctx.var("pi", f64::consts::PI);
    ctx.var("e", f64::consts::E);
    parsed.eval_with_context(ctx).ok()
}

/// Numeric reading of an answer, `None` when it is not a number.
pub fn numeric_value(text: &str) -> Option<f64> {
    if let Some(value) = plain_float(text) {
        return Some(value);
    }
    if let Some((numerator, denominator)) = text.split_once('/') {
        if let (Some(n), Some(d)) = (plain_float(numerator), plain_float(denominator)) {
            let value = n / d;
            return value.is_finite().then_some(value);
        }
    }
    // every letter e is read as Euler's number, words containing an e stop being numbers
    let substituted = text
        .replace('π', "pi")
        .replace('√', "sqrt")
        .replace('e', EULER);
    evaluate_arithmetic(&substituted).filter(|v| v.is_finite())
}

/// lowercase, without whitespace and `( ) < >`
fn normalized_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '<' | '>'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// true when the answers are numerically within tolerance, or equal as normalised text
pub fn is_equivalent(user_answer: &str, correct_answer: &str) -> bool {
    let user = user_answer.trim();
    let correct = correct_answer.trim();
    match (numeric_value(user), numeric_value(correct)) {
        (Some(u), Some(c)) => {
            debug!("numeric answers {} and {}", u, c);
            (u - c).abs() < ANSWER_TOLERANCE
        }
        _ => normalized_text(user) == normalized_text(correct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_numbers() {
        assert!(is_equivalent("4", "4.0"));
        assert!(is_equivalent("-3.4", "-3.4000"));
        assert!(is_equivalent(" 2 ", "2"));
        assert!(!is_equivalent("4", "4.01"));
    }

    #[test]
    fn test_pi_within_tolerance() {
        assert!(is_equivalent("π", "3.14159"));
        assert!(!is_equivalent("π", "3.15"));
    }

    #[test]
    fn test_fractions_and_expressions() {
        assert!(is_equivalent("1/3", "0.3333"));
        assert!(is_equivalent("√(2)", "1.41421"));
        assert!(is_equivalent("2^10", "1024"));
        assert!(is_equivalent("e", "2.71828"));
    }

    #[test]
    fn test_text_answers() {
        assert!(is_equivalent("Converge", "converge"));
        assert!(is_equivalent("(a, b)", "a,b"));
        assert!(is_equivalent("<1, 2, x>", "1,2,X"));
        assert!(!is_equivalent("diverge", "converge"));
    }

    #[test]
    fn test_letter_e_is_eulers_number() {
        // kept for compatibility with answers graded so far
        let value = numeric_value("2*e").unwrap();
        assert_relative_eq!(value, 2.0 * f64::consts::E);
    }

    #[test]
    fn test_non_finite_is_not_a_number() {
        assert_eq!(numeric_value("inf"), None);
        assert_eq!(numeric_value("NaN"), None);
        assert_eq!(numeric_value("1/0"), None);
        // falls back to text comparison
        assert!(is_equivalent("1/0", "1/0"));
    }
}
