//! Real roots of equations of degree at most two.
//!
//! The coefficients are read off the Taylor expansion at zero: for
//! `f(x) = a x^2 + b x + c` we have `c = f(0)`, `b = f'(0)`, `a = f''(0) / 2`.
//! No symbolic factoring is needed, but the result is only meaningful for genuine
//! polynomials of degree <= 2. A non-zero third derivative at zero is reported as an error.

use crate::calculator::errors::CalcError;
use crate::calculator::number_format::format_number;
use crate::calculator::trace::TraceHook;
use crate::symbolic::symbolic_traits::AlgebraBackend;
use std::collections::HashMap;

/// coefficient and root classification threshold
pub const TOLERANCE: f64 = 1e-10;

/// Moves the right side of an equation to the left: `lhs = rhs` → `lhs - (rhs)`.
pub fn as_zero_form(expression: &str) -> String {
    match expression.split_once('=') {
        Some((lhs, rhs)) => format!("{} - ({})", lhs.trim(), rhs.trim()),
        None => expression.to_string(),
    }
}

/// Solves `expression = 0` (or the equation `lhs = rhs`) for `variable`.
pub fn solve<B: AlgebraBackend>(
    backend: &B,
    expression: &str,
    variable: &str,
    trace: Option<&dyn TraceHook>,
) -> Result<String, CalcError> {
    let text = as_zero_form(expression);
    let tree = backend.simplify(&backend.parse(&text)?);

    let mut at_zero = HashMap::new();
    at_zero.insert(variable.to_string(), 0.0);

    let c = backend.evaluate(&tree, &at_zero)?;
    if !c.is_finite() {
        return Err(CalcError::Evaluation(
            "division by zero or undefined values".to_string(),
        ));
    }

    let first = backend.simplify(&backend.derivative(&tree, variable));
    let b = backend.evaluate(&first, &at_zero)?;
    if !b.is_finite() {
        return Err(transcendental());
    }

    // a failed evaluation of f''(0) counts as 0, a non-finite one is not polynomial
    let second = backend.simplify(&backend.derivative(&first, variable));
    let a2 = match backend.evaluate(&second, &at_zero) {
        Ok(value) if value.is_finite() => value,
        Ok(_) => return Err(transcendental()),
        Err(_) => 0.0,
    };

    let third = backend.simplify(&backend.derivative(&second, variable));
    if let Ok(d3) = backend.evaluate(&third, &at_zero) {
        if !d3.is_finite() {
            return Err(transcendental());
        }
        if d3.abs() > TOLERANCE {
            return Err(CalcError::Unsupported(
                "equations of degree higher than 2 are not supported".to_string(),
            ));
        }
    }

    if let Some(hook) = trace {
        hook.trace(
            "solve.coefficients",
            &format!("f''(0) = {}, f'(0) = {}, f(0) = {}", a2, b, c),
        );
    }
    Ok(classify_roots(a2, b, c))
}

fn transcendental() -> CalcError {
    CalcError::Unsupported(
        "transcendental equation: terms like sqrt, log or trigonometric functions \
         cannot be solved by coefficient extraction"
            .to_string(),
    )
}

/// Roots of `a2/2 x^2 + b x + c = 0` as the result string.
pub fn classify_roots(a2: f64, b: f64, c: f64) -> String {
    if a2.abs() > TOLERANCE {
        let a = a2 / 2.0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return "No real solutions".to_string();
        }
        let sqrt_d = discriminant.sqrt();
        let root1 = (-b + sqrt_d) / (2.0 * a);
        let root2 = (-b - sqrt_d) / (2.0 * a);
        if (root1 - root2).abs() < TOLERANCE {
            format_number(root1)
        } else {
            format!("{}, {}", format_number(root1), format_number(root2))
        }
    } else if b.abs() > TOLERANCE {
        let root = -c / b;
        if root.is_finite() {
            format_number(root)
        } else {
            "No solution (division by zero)".to_string()
        }
    } else if c.abs() < TOLERANCE {
        "All real numbers".to_string()
    } else {
        "No solution".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::trace::tests::RecordingTrace;
    use crate::symbolic::symbolic_traits::NativeBackend;

    fn solve_native(expression: &str) -> Result<String, CalcError> {
        solve(&NativeBackend, expression, "x", None)
    }

    fn roots(result: &str) -> Vec<f64> {
        let mut values: Vec<f64> = result
            .split(", ")
            .map(|s| s.parse::<f64>().unwrap())
            .collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values
    }

    #[test]
    fn test_zero_form() {
        assert_eq!(as_zero_form("x^2 = 4"), "x^2 - (4)");
        assert_eq!(as_zero_form("x+1"), "x+1");
    }

    #[test]
    fn test_quadratic_two_roots() {
        let result = solve_native("x^2-5*x+6").unwrap();
        assert_eq!(roots(&result), vec![2.0, 3.0]);
    }

    #[test]
    fn test_quadratic_double_root_collapses() {
        assert_eq!(solve_native("x^2-4*x+4").unwrap(), "2");
    }

    #[test]
    fn test_quadratic_no_real_roots() {
        assert_eq!(solve_native("x^2+1").unwrap(), "No real solutions");
    }

    #[test]
    fn test_quadratic_irrational_roots() {
        let result = solve_native("x^2-2").unwrap();
        assert_eq!(result, "1.414214, -1.414214");
    }

    #[test]
    fn test_equation_sides() {
        let result = solve_native("x^2 = 2*x + 3").unwrap();
        assert_eq!(roots(&result), vec![-1.0, 3.0]);
    }

    #[test]
    fn test_linear() {
        assert_eq!(solve_native("2*x+4").unwrap(), "-2");
        assert_eq!(solve_native("3*x").unwrap(), "0");
    }

    #[test]
    fn test_constant_equations() {
        assert_eq!(solve_native("0*x+0").unwrap(), "All real numbers");
        assert_eq!(solve_native("0*x+5").unwrap(), "No solution");
    }

    #[test]
    fn test_other_variable() {
        assert_eq!(solve(&NativeBackend, "2*t-1", "t", None).unwrap(), "0.500000");
    }

    #[test]
    fn test_division_by_zero_at_origin() {
        assert_eq!(
            solve_native("1/x"),
            Err(CalcError::Evaluation(
                "division by zero or undefined values".to_string()
            ))
        );
    }

    #[test]
    fn test_transcendental_detected() {
        assert!(matches!(solve_native("sqrt(x) - 2"), Err(CalcError::Unsupported(_))));
        assert!(matches!(solve_native("sin(x)"), Err(CalcError::Unsupported(_))));
    }

    #[test]
    fn test_cubic_detected() {
        assert!(matches!(solve_native("x^3-1"), Err(CalcError::Unsupported(_))));
    }

    #[test]
    fn test_fractional_powers_detected() {
        // f''(0) is infinite for x^1.5, f'''(0) for x^2.5
        assert_eq!(solve_native("x^1.5"), Err(transcendental()));
        assert_eq!(solve_native("x^2.5"), Err(transcendental()));
    }

    #[test]
    fn test_quartic_with_vanishing_third_derivative_is_not_detected() {
        // only f'''(0) is checked, so x^4 + x is solved as the linear x = 0
        assert_eq!(solve_native("x^4+x").unwrap(), "0");
    }

    #[test]
    fn test_parse_error_propagates() {
        assert!(matches!(solve_native("x^2 +"), Err(CalcError::Parse(_))));
    }

    #[test]
    fn test_coefficients_traced() {
        let recorder = RecordingTrace::default();
        solve(&NativeBackend, "x^2-5*x+6", "x", Some(&recorder)).unwrap();
        let steps = recorder.steps.borrow();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].0, "solve.coefficients");
        assert_eq!(steps[0].1, "f''(0) = 2, f'(0) = -5, f(0) = 6");
    }

    #[test]
    fn test_classify_roots_directly() {
        assert_eq!(classify_roots(2.0, -5.0, 6.0), "3, 2");
        assert_eq!(classify_roots(0.0, 0.0, 1e-12), "All real numbers");
    }
}
