//! Structured JSON summary of an evaluation.

use icfp_eval::Value;
use icfp_types::{ErrorCategory, ErrorCode};
use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// The outcome of [`crate::evaluate_to_report`].
///
/// Exactly one of `value` and `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<ValueReport>,
    /// Applications performed, up to the failure if there was one.
    pub reductions: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<ErrorReport>,
}

/// A result value, tagged with its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueReport {
    /// `bool`, `int`, `string` or `closure`.
    pub kind: String,
    /// Integers in decimal, strings verbatim.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
}

impl EvalReport {
    pub(crate) fn success(value: &Value, reductions: u64) -> Self {
        Self {
            success: true,
            value: Some(ValueReport::from(value)),
            reductions,
            error: None,
        }
    }

    pub(crate) fn failure(error: &PipelineError, reductions: u64) -> Self {
        Self {
            success: false,
            value: None,
            reductions,
            error: Some(ErrorReport {
                code: error.code(),
                category: error.category(),
                message: error.to_string(),
            }),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl From<&Value> for ValueReport {
    fn from(value: &Value) -> Self {
        Self {
            kind: value.type_name().to_string(),
            text: value.to_string(),
        }
    }
}
