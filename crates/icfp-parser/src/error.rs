//! Parse error types.

use icfp_types::{CodecError, ErrorCode};
use thiserror::Error;

/// Errors that can occur while parsing a token stream.
///
/// Every variant carries the zero-based position of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The stream ran out while an expression was still expected.
    #[error("unexpected end of program at token {position}")]
    Empty { position: usize },

    /// The first character of a token is not a known indicator.
    #[error("unknown indicator {indicator:?} in token {token:?} at position {position}")]
    UnknownIndicator {
        indicator: char,
        token: String,
        position: usize,
    },

    /// A `U` or `B` token names an operator that does not exist.
    #[error("unknown operator {symbol:?} in token {token:?} at position {position}")]
    UnknownOperator {
        symbol: String,
        token: String,
        position: usize,
    },

    /// An integer, string or variable body failed to decode.
    #[error("invalid body in token {token:?} at position {position}: {source}")]
    InvalidBody {
        token: String,
        position: usize,
        #[source]
        source: CodecError,
    },

    /// A variable number that does not fit in 64 bits.
    #[error("variable number in token {token:?} at position {position} is out of range")]
    VarIdOutOfRange { token: String, position: usize },

    /// Tokens left over after a complete program.
    #[error("{count} trailing token(s) after the program, starting at position {position}")]
    TrailingTokens { position: usize, count: usize },
}

impl ParseError {
    /// The structured error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Empty { .. } => ErrorCode::EMPTY_PROGRAM,
            Self::UnknownIndicator { .. } => ErrorCode::UNKNOWN_INDICATOR,
            Self::UnknownOperator { .. } => ErrorCode::UNKNOWN_OPERATOR,
            Self::InvalidBody { .. } | Self::VarIdOutOfRange { .. } => ErrorCode::INVALID_BODY,
            Self::TrailingTokens { .. } => ErrorCode::TRAILING_TOKENS,
        }
    }

    /// Zero-based position of the token this error refers to.
    pub fn position(&self) -> usize {
        match self {
            Self::Empty { position }
            | Self::UnknownIndicator { position, .. }
            | Self::UnknownOperator { position, .. }
            | Self::InvalidBody { position, .. }
            | Self::VarIdOutOfRange { position, .. }
            | Self::TrailingTokens { position, .. } => *position,
        }
    }
}

/// Parse result type alias.
pub type ParseResult<T> = Result<T, ParseError>;
