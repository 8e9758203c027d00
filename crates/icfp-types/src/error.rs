use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Codec,
    Parse,
    Eval,
    Codegen,
}

/// Numeric error code (E100–E499).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Codec errors (E100–E199) ──
    pub const INVALID_CHARACTER: Self = Self(100);
    pub const EMPTY_BODY: Self = Self(101);
    pub const NEGATIVE_INTEGER: Self = Self(102);

    // ── Parse errors (E200–E299) ──
    pub const EMPTY_PROGRAM: Self = Self(200);
    pub const UNKNOWN_INDICATOR: Self = Self(201);
    pub const UNKNOWN_OPERATOR: Self = Self(202);
    pub const INVALID_BODY: Self = Self(203);
    pub const TRAILING_TOKENS: Self = Self(204);

    // ── Eval errors (E300–E399) ──
    pub const UNBOUND_VARIABLE: Self = Self(300);
    pub const TYPE_MISMATCH: Self = Self(301);
    pub const SLICE_OUT_OF_RANGE: Self = Self(302);
    pub const REDUCTION_BUDGET_EXCEEDED: Self = Self(303);
    pub const EXPECTED_CLOSURE: Self = Self(304);
    pub const DIVISION_BY_ZERO: Self = Self(305);

    // ── Codegen errors (E400–E499) ──
    pub const UNSUPPORTED: Self = Self(400);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Codec,
            200..=299 => ErrorCategory::Parse,
            300..=399 => ErrorCategory::Eval,
            _ => ErrorCategory::Codegen,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec => write!(f, "codec"),
            Self::Parse => write!(f, "parse"),
            Self::Eval => write!(f, "eval"),
            Self::Codegen => write!(f, "codegen"),
        }
    }
}
