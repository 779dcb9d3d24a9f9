use log::debug;

/// Receives intermediate steps of a request (normalised text, chosen operation,
/// extracted coefficients). Passed in by the caller, the calculator keeps no global
/// logging state of its own.
pub trait TraceHook {
    fn trace(&self, stage: &str, detail: &str);
}

/// Forwards every step to `log::debug!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

impl TraceHook for LogTrace {
    fn trace(&self, stage: &str, detail: &str) {
        debug!("{}: {}", stage, detail);
    }
}
