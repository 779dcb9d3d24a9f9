use crate::calculator::config::CalculatorConfig;
use crate::calculator::dispatcher::{
    Calculator, INDETERMINATE_LIMIT, OperationRequest, classify, evaluate, parse_limit_target,
};
use crate::calculator::errors::CalcError;
use crate::calculator::normalizer::normalize;
use crate::calculator::trace::tests::RecordingTrace;
use crate::symbolic::errors::{EvalError, ParseError};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_traits::{AlgebraBackend, NativeBackend};
use std::cell::Cell;
use std::collections::HashMap;
//___________________________________TESTS____________________________________

mod tests {
    use super::*;

    fn sorted_roots(result: &str) -> Vec<f64> {
        let mut roots: Vec<f64> = result.split(", ").map(|r| r.parse().unwrap()).collect();
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        roots
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(evaluate("2+2"), "4");
        assert_eq!(evaluate("\\sqrt{16}"), "4");
        assert_eq!(evaluate("2\\pi"), "6.283185");
        assert_eq!(evaluate("\\frac{1}{3}"), "0.333333");
        assert_eq!(evaluate("\\left|-3\\right|"), "3");
        assert_eq!(evaluate("2^{10}"), "1024");
        assert_eq!(evaluate("3(2+1)"), "9");
    }

    #[test]
    fn test_adjacent_operands_multiply() {
        assert_eq!(evaluate("2\\left(3+1\\right)"), "8");
        assert_eq!(evaluate("\\left(1+1\\right)\\sin\\left(0\\right)"), "0");
        assert_eq!(evaluate("\\frac{1}{2}\\sin(0)"), "0");
        assert_eq!(evaluate("\\left(2+1\\right)\\left(1+1\\right)"), "6");
        // parsed as pi*r, so only r is missing
        assert_eq!(evaluate("\\pi r"), "Error: Undefined symbol r");
        let derivative = evaluate("derivative((x+1)\\sin(x))");
        assert!(!derivative.starts_with("Error"), "{}", derivative);
        assert!(derivative.contains("\\cos"), "{}", derivative);
    }

    #[test]
    fn test_evaluate_non_finite() {
        assert_eq!(evaluate("1/0"), "Infinity");
        assert_eq!(evaluate("-1/0"), "-Infinity");
    }

    #[test]
    fn test_solve_quadratic() {
        let result = evaluate("solve(x^2-5x+6, x)");
        assert_eq!(sorted_roots(&result), vec![2.0, 3.0]);
        assert_eq!(evaluate("solve(x^2-4x+4, x)"), "2");
        assert_eq!(evaluate("solve(x^2+4, x)"), "No real solutions");
    }

    #[test]
    fn test_solve_linear_and_constant() {
        assert_eq!(evaluate("solve(2x+4, x)"), "-2");
        assert_eq!(evaluate("solve(0x+0, x)"), "All real numbers");
        assert_eq!(evaluate("solve(0x+5, x)"), "No solution");
    }

    #[test]
    fn test_solve_errors() {
        assert!(evaluate("solve(x^3-x, x)").starts_with("Error: equations of degree higher than 2"));
        assert!(evaluate("solve(\\ln(x), x)").starts_with("Error: division by zero"));
        assert!(evaluate("solve(\\sqrt{x}-1, x)").starts_with("Error: transcendental"));
    }

    #[test]
    fn test_solve_fractional_powers() {
        assert!(evaluate("solve(x^{1.5}, x)").starts_with("Error: transcendental"));
        assert!(evaluate("solve(x^{2.5}, x)").starts_with("Error: transcendental"));
    }

    #[test]
    fn test_solve_degree_guard_checks_origin_only() {
        // f'''(0) = 0 for x^4 + x, so the quartic is solved from its linear part
        assert_eq!(evaluate("solve(x^4+x, x)"), "0");
    }

    #[test]
    fn test_limit() {
        assert_eq!(evaluate("limit(1/x, x -> inf)"), "0.000000");
        assert_eq!(evaluate("limit(1/x, x \\to \\infty)"), "0.000000");
        assert_eq!(evaluate("limit(x^2+1, x -> 2)"), "5.000000");
        assert_eq!(evaluate("limit(-1/x, x -> Infinity)"), "0.000000");
    }

    #[test]
    fn test_limit_retries_after_simplification() {
        assert_eq!(evaluate("limit(x/x, x -> 0)"), "1.000000");
    }

    #[test]
    fn test_limit_indeterminate() {
        assert_eq!(
            evaluate("limit((x^2-1)/(x-1), x -> 1)"),
            format!("Error: {}", INDETERMINATE_LIMIT)
        );
        assert_eq!(
            evaluate("limit(x, x -> inf)"),
            format!("Error: {}", INDETERMINATE_LIMIT)
        );
    }

    #[test]
    fn test_limit_target_grammar() {
        assert_eq!(parse_limit_target("inf"), Ok(f64::INFINITY));
        assert_eq!(parse_limit_target("Infinity"), Ok(f64::INFINITY));
        assert_eq!(parse_limit_target("-inf"), Ok(f64::NEG_INFINITY));
        assert_eq!(parse_limit_target(" 2.5 "), Ok(2.5));
        assert!(matches!(parse_limit_target("NaN"), Err(CalcError::Unsupported(_))));
        assert_eq!(
            evaluate("limit(1/x, x -> abc)"),
            "Error: Unsupported limit target abc"
        );
    }

    #[test]
    fn test_derivative_forms() {
        assert_eq!(evaluate("\\frac{d}{dx}\\left(x^{3}\\right)"), "3\\cdot x^{2}");
        assert_eq!(evaluate("d/dx(x^2)"), "2\\cdot x");
        assert_eq!(evaluate("derivative(x^2, x)"), "2\\cdot x");
        assert_eq!(evaluate("derivative(x^2*y, y)"), "x^{2}");
        assert_eq!(evaluate("derivative(\\sin(x))"), "\\cos\\left(x\\right)");
    }

    #[test]
    fn test_symbolic_operations() {
        assert_eq!(evaluate("simplify(2x+3x)"), "5\\cdot x");
        assert_eq!(evaluate("expand((x+1)^2)"), "x^{2}+2\\cdot x+1");
        assert_eq!(evaluate("factor(x+1/x)"), "\\frac{x^{2}+1}{x}");
    }

    #[test]
    fn test_symbolic_number_results_use_number_format() {
        assert_eq!(evaluate("simplify(0.5)"), "0.500000");
        assert_eq!(evaluate("simplify(1/4)"), "0.250000");
        assert_eq!(evaluate("simplify(2+2)"), "4");
        assert_eq!(evaluate("derivative(3x)"), "3");
        assert_eq!(evaluate("derivative(x^2)"), "2\\cdot x");
    }

    #[test]
    fn test_errors_become_strings() {
        assert_eq!(evaluate("x+1"), "Error: Undefined symbol x");
        assert_eq!(evaluate("\\int(x)"), "Error: Undefined function integrate");
        assert_eq!(evaluate(""), "Error: Empty expression");
        assert!(evaluate("simplify((x+1)").starts_with("Error: "));
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify("solve(x^2-1, x)", "x"),
            OperationRequest::Solve {
                expression: "x^2-1".to_string(),
                variable: "x".to_string()
            }
        );
        assert_eq!(
            classify("limit(sin(x)/x, x -> 0)", "x"),
            OperationRequest::Limit {
                expression: "sin(x)/x".to_string(),
                variable: "x".to_string(),
                target: "0".to_string()
            }
        );
        assert_eq!(
            classify("derivative(t^3)", "t"),
            OperationRequest::Derivative {
                expression: "t^3".to_string(),
                variable: "t".to_string()
            }
        );
        assert_eq!(
            classify("(d)/(dy)*(y^2)", "x"),
            OperationRequest::Derivative {
                expression: "y^2".to_string(),
                variable: "y".to_string()
            }
        );
        assert_eq!(
            classify("2*(x+1)", "x"),
            OperationRequest::Evaluate { expression: "2*(x+1)".to_string() }
        );
        assert_eq!(classify("factor(x)", "x").to_string(), "factor");
    }

    #[test]
    fn test_normalizer_idempotent() {
        for input in ["2x+2", "(x+1)(x-1)", "solve(x^2-5x+6, x)", "3(x)y", "limit(1/x, x -> inf)"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_config_default_variable() {
        let config = CalculatorConfig::from_toml_str("default_derivative_variable = \"t\"").unwrap();
        let calculator = Calculator::from_config(NativeBackend, &config);
        assert_eq!(calculator.evaluate("derivative(t^2)"), "2\\cdot t");
    }

    #[test]
    fn test_trace_hook_receives_steps() {
        let recorder = RecordingTrace::default();
        let calculator = Calculator::new(NativeBackend).with_trace(&recorder);
        assert_eq!(calculator.evaluate("2x"), "Error: Undefined symbol x");
        let steps = recorder.steps.borrow();
        assert_eq!(steps[0], ("normalized".to_string(), "2*x".to_string()));
        assert_eq!(steps[1], ("evaluate".to_string(), "2*x".to_string()));
    }

    /// native engine that counts how often it is asked to differentiate
    #[derive(Default)]
    struct CountingBackend {
        derivatives: Cell<usize>,
    }

    impl AlgebraBackend for CountingBackend {
        type Tree = Expr;

        fn parse(&self, text: &str) -> Result<Expr, ParseError> {
            NativeBackend.parse(text)
        }
        fn evaluate(&self, tree: &Expr, scope: &HashMap<String, f64>) -> Result<f64, EvalError> {
            NativeBackend.evaluate(tree, scope)
        }
        fn derivative(&self, tree: &Expr, variable: &str) -> Expr {
            self.derivatives.set(self.derivatives.get() + 1);
            NativeBackend.derivative(tree, variable)
        }
        fn simplify(&self, tree: &Expr) -> Expr {
            NativeBackend.simplify(tree)
        }
        fn expand(&self, tree: &Expr) -> Expr {
            NativeBackend.expand(tree)
        }
        fn rationalize(&self, tree: &Expr) -> Expr {
            NativeBackend.rationalize(tree)
        }
        fn to_display(&self, tree: &Expr) -> String {
            NativeBackend.to_display(tree)
        }
    }

    #[test]
    fn test_backend_is_substitutable() {
        let backend = CountingBackend::default();
        let calculator = Calculator::new(&backend);
        assert_eq!(calculator.evaluate("solve(x^2-1, x)"), "1, -1");
        // first, second and third derivative
        assert_eq!(backend.derivatives.get(), 3);
    }
}
