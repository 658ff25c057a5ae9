/// Call depth limit used when none is configured.
///
/// Call depth limit used when none is configured.
///
/// The evaluator grows its stack on demand, so this bounds memory use and
/// runaway recursion, not the host thread's stack size.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Runtime limits for an interpreter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of nested user-function calls. Exceeding it raises a
    /// stack overflow runtime error.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH }
    }
}

impl Config {
    #[must_use]
    pub const fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}
