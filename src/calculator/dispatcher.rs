//! Picks the operation a normalised input asks for and runs it on the algebra backend.
//!
//! Classification is a table of anchored patterns over the leading keyword; plain
//! arithmetic falls through to `Evaluate`. Every request ends in a string, failures
//! become `"Error: <message>"`.

use crate::calculator::config::CalculatorConfig;
use crate::calculator::errors::CalcError;
use crate::calculator::normalizer::normalize;
use crate::calculator::number_format::{format_fixed6, format_number};
use crate::calculator::solver;
use crate::calculator::trace::TraceHook;
use crate::symbolic::symbolic_traits::{AlgebraBackend, NativeBackend};
use log::{info, warn};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use strum_macros::Display;

pub const INDETERMINATE_LIMIT: &str =
    "Indeterminate form: this limit requires L'Hôpital's rule, which is not supported";

static RE_DERIVATIVE_FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?d\)?/\(?d([a-zA-Z])\)?\*?\((.+)\)$").expect("valid regex literal")
});
static RE_DERIVATIVE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^derivative\((.+?)(?:,\s*([a-zA-Z]\w*))?\)$").expect("valid regex literal")
});
static RE_SIMPLIFY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^simplify\((.+)\)$").expect("valid regex literal"));
static RE_EXPAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^expand\((.+)\)$").expect("valid regex literal"));
static RE_FACTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^factor\((.+)\)$").expect("valid regex literal"));
static RE_SOLVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^solve\((.+),\s*([a-zA-Z]\w*)\)$").expect("valid regex literal")
});
static RE_LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^limit\((.+),\s*([a-zA-Z]\w*)\s*->\s*(.+)\)$").expect("valid regex literal")
});

/// What the user asked for, with the arguments pulled out of the input.
#[derive(Debug, Clone, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum OperationRequest {
    Evaluate { expression: String },
    Derivative { expression: String, variable: String },
    Simplify { expression: String },
    Expand { expression: String },
    Factor { expression: String },
    Solve { expression: String, variable: String },
    Limit { expression: String, variable: String, target: String },
}

impl OperationRequest {
    pub fn expression(&self) -> &str {
        match self {
            OperationRequest::Evaluate { expression }
            | OperationRequest::Derivative { expression, .. }
            | OperationRequest::Simplify { expression }
            | OperationRequest::Expand { expression }
            | OperationRequest::Factor { expression }
            | OperationRequest::Solve { expression, .. }
            | OperationRequest::Limit { expression, .. } => expression,
        }
    }
}

/// Classifies a normalised input. The first matching pattern wins, `Evaluate` is the
/// fallback. `derivative(expr)` without a variable uses `default_variable`.
pub fn classify(canonical: &str, default_variable: &str) -> OperationRequest {
    let text = canonical.trim();
    let group = |caps: &regex::Captures, i: usize| {
        caps.get(i).map_or(String::new(), |m| m.as_str().trim().to_string())
    };

    if let Some(caps) = RE_DERIVATIVE_FRACTION.captures(text) {
        return OperationRequest::Derivative {
            expression: group(&caps, 2),
            variable: group(&caps, 1),
        };
    }
    if let Some(caps) = RE_DERIVATIVE_CALL.captures(text) {
        let variable = caps
            .get(2)
            .map_or(default_variable.to_string(), |m| m.as_str().to_string());
        return OperationRequest::Derivative {
            expression: group(&caps, 1),
            variable,
        };
    }
    if let Some(caps) = RE_SIMPLIFY.captures(text) {
        return OperationRequest::Simplify { expression: group(&caps, 1) };
    }
    if let Some(caps) = RE_EXPAND.captures(text) {
        return OperationRequest::Expand { expression: group(&caps, 1) };
    }
    if let Some(caps) = RE_FACTOR.captures(text) {
        return OperationRequest::Factor { expression: group(&caps, 1) };
    }
    if let Some(caps) = RE_SOLVE.captures(text) {
        return OperationRequest::Solve {
            expression: group(&caps, 1),
            variable: group(&caps, 2),
        };
    }
    if let Some(caps) = RE_LIMIT.captures(text) {
        return OperationRequest::Limit {
            expression: group(&caps, 1),
            variable: group(&caps, 2),
            target: group(&caps, 3),
        };
    }
    OperationRequest::Evaluate { expression: text.to_string() }
}

/// Limit target: `inf`, `infinity` (optionally signed, any case) or a finite float.
pub fn parse_limit_target(target: &str) -> Result<f64, CalcError> {
    let target = target.trim();
    match target.to_lowercase().as_str() {
        "inf" | "infinity" | "+inf" | "+infinity" => Ok(f64::INFINITY),
        "-inf" | "-infinity" => Ok(f64::NEG_INFINITY),
        other => other
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CalcError::Unsupported(format!("Unsupported limit target {}", target))),
    }
}

/// Normalises, classifies and runs requests on an algebra backend.
pub struct Calculator<'a, B: AlgebraBackend> {
    backend: B,
    default_variable: String,
    trace: Option<&'a dyn TraceHook>,
}

impl<'a, B: AlgebraBackend> Calculator<'a, B> {
    pub fn new(backend: B) -> Self {
        Calculator {
            backend,
            default_variable: "x".to_string(),
            trace: None,
        }
    }

    pub fn from_config(backend: B, config: &CalculatorConfig) -> Self {
        Self::new(backend).with_default_variable(&config.default_derivative_variable)
    }

    pub fn with_default_variable(mut self, variable: &str) -> Self {
        self.default_variable = variable.to_string();
        self
    }

    pub fn with_trace(mut self, hook: &'a dyn TraceHook) -> Self {
        self.trace = Some(hook);
        self
    }

    fn trace(&self, stage: &str, detail: &str) {
        if let Some(hook) = self.trace {
            hook.trace(stage, detail);
        }
    }

    /// Result string for a raw LaTeX-like input. Never fails.
    pub fn evaluate(&self, raw: &str) -> String {
        let canonical = normalize(raw);
        self.trace("normalized", &canonical);
        let request = classify(&canonical, &self.default_variable);
        self.trace(&request.to_string(), request.expression());
        match self.run(&request) {
            Ok(result) => {
                info!("{} of {} -> {}", request, request.expression(), result);
                result
            }
            Err(err) => {
                warn!("{} of {} failed: {}", request, request.expression(), err);
                format!("Error: {}", err)
            }
        }
    }

    /// Runs one classified request.
    pub fn run(&self, request: &OperationRequest) -> Result<String, CalcError> {
        let backend = &self.backend;
        match request {
            OperationRequest::Evaluate { expression } => {
                let tree = backend.parse(expression)?;
                let value = backend.evaluate(&tree, &HashMap::new())?;
                Ok(format_number(value))
            }
            OperationRequest::Derivative { expression, variable } => {
                let tree = backend.parse(expression)?;
                let derivative = backend.simplify(&backend.derivative(&tree, variable));
                Ok(self.display(&derivative))
            }
            OperationRequest::Simplify { expression } => {
                let tree = backend.parse(expression)?;
                Ok(self.display(&backend.simplify(&tree)))
            }
            OperationRequest::Expand { expression } => {
                let tree = backend.parse(expression)?;
                Ok(self.display(&backend.expand(&tree)))
            }
            OperationRequest::Factor { expression } => {
                let tree = backend.parse(expression)?;
                Ok(self.display(&backend.rationalize(&tree)))
            }
            OperationRequest::Solve { expression, variable } => {
                solver::solve(backend, expression, variable, self.trace)
            }
            OperationRequest::Limit { expression, variable, target } => {
                self.limit(expression, variable, target)
            }
        }
    }

    /// LaTeX of a symbolic result. A result that is a bare number is formatted the way
    /// `Evaluate` formats it.
    fn display(&self, tree: &B::Tree) -> String {
        let latex = self.backend.to_display(tree);
        match latex.parse::<f64>() {
            Ok(value) if value.is_finite() => format_number(value),
            _ => latex,
        }
    }

    /// Direct substitution of the target. A non-finite value gets one more try after
    /// symbolic simplification (`x/x` at 0), otherwise the form is indeterminate.
    fn limit(&self, expression: &str, variable: &str, target: &str) -> Result<String, CalcError> {
        let point = parse_limit_target(target)?;
        let tree = self.backend.parse(expression)?;
        let mut scope = HashMap::new();
        scope.insert(variable.to_string(), point);

        let value = self.backend.evaluate(&tree, &scope)?;
        if value.is_finite() {
            return Ok(format_fixed6(value));
        }
        self.trace("limit.retry", &format!("{} at {} = {}", variable, point, value));
        let simplified = self.backend.simplify(&tree);
        let value = self.backend.evaluate(&simplified, &scope)?;
        if value.is_finite() {
            Ok(format_fixed6(value))
        } else {
            Err(CalcError::Unsupported(INDETERMINATE_LIMIT.to_string()))
        }
    }
}

/// [`Calculator::evaluate`] on the native backend with default settings.
pub fn evaluate(raw: &str) -> String {
    Calculator::new(NativeBackend).evaluate(raw)
}
