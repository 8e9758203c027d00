//! Evaluator configuration.

use serde::{Deserialize, Serialize};

/// Reduction ceiling applied by [`EvalConfig::default`].
pub const DEFAULT_MAX_REDUCTIONS: u64 = 10_000_000;

/// Evaluation policy.
///
/// Missing fields take their default values when deserializing, so
/// `{"memoize": false}` is a complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Force each deferred argument at most once.
    pub memoize: bool,
    /// Abort once more than this many applications have been performed.
    pub max_reductions: Option<u64>,
    /// Record every evaluation step.
    pub trace: bool,
}

impl EvalConfig {
    /// Memoizing evaluation with no reduction ceiling.
    pub fn unlimited() -> Self {
        Self {
            max_reductions: None,
            ..Self::default()
        }
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_max_reductions(mut self, max_reductions: Option<u64>) -> Self {
        self.max_reductions = max_reductions;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            max_reductions: Some(DEFAULT_MAX_REDUCTIONS),
            trace: false,
        }
    }
}
