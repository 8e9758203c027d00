//! Runtime error types for the ICFP evaluator.

use icfp_types::{CodecError, ErrorCode, VarId};
use num_bigint::BigInt;
use thiserror::Error;

/// Evaluation error. Every failure is returned to the caller; nothing is
/// downgraded to a default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable that is not bound in the current environment.
    #[error("unbound variable {0}")]
    UnboundVariable(VarId),

    /// An operand of the wrong type.
    #[error("type mismatch in '{operator}': expected {expected}, found {found}")]
    TypeMismatch {
        operator: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// `T` / `D` with a count outside `0..=len`.
    #[error("cannot take or drop {count} characters from a string of length {length}")]
    SliceOutOfRange { count: BigInt, length: usize },

    /// More applications than the configured ceiling.
    #[error("reduction budget of {limit} exceeded")]
    ReductionBudgetExceeded { limit: u64 },

    /// The left side of an application is not a closure.
    #[error("expected a closure to apply, found {found}")]
    ExpectedClosure { found: &'static str },

    /// `/` or `%` with a zero divisor.
    #[error("division by zero in '{operator}'")]
    DivisionByZero { operator: &'static str },

    /// String/integer conversion failed (`U#`, `U$`).
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl EvalError {
    /// The structured error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnboundVariable(_) => ErrorCode::UNBOUND_VARIABLE,
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::SliceOutOfRange { .. } => ErrorCode::SLICE_OUT_OF_RANGE,
            Self::ReductionBudgetExceeded { .. } => ErrorCode::REDUCTION_BUDGET_EXCEEDED,
            Self::ExpectedClosure { .. } => ErrorCode::EXPECTED_CLOSURE,
            Self::DivisionByZero { .. } => ErrorCode::DIVISION_BY_ZERO,
            Self::Codec(e) => e.code(),
        }
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
