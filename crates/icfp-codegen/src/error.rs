//! Codegen error types.

use icfp_types::{CodecError, ErrorCode};
use thiserror::Error;

/// Errors that can occur while rendering wire tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A value with no token form, such as a closure.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// A literal that cannot be encoded as a token body.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl CodegenError {
    /// The structured error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unsupported(_) => ErrorCode::UNSUPPORTED,
            Self::Codec(e) => e.code(),
        }
    }
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
