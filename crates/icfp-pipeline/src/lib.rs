//! ICFP pipeline: the two operations the transport layer consumes.
//!
//! ```text
//! outbound:  command → encode → S<body>
//! inbound:   tokens → Lexer → Parser → Evaluator → Value
//! ```
//!
//! [`evaluate_to_report`] runs the inbound direction and returns a
//! serializable [`EvalReport`] instead of a `Result`.

mod report;

use icfp_codegen::{value_to_tokens, CodegenResult};
use icfp_eval::{Env, EvalConfig, EvalError, Evaluation, Evaluator, Value};
use icfp_parser::ParseError;
use icfp_types::{codec, CodecResult, ErrorCategory, ErrorCode};
use std::rc::Rc;
use thiserror::Error;

pub use report::{ErrorReport, EvalReport, ValueReport};

/// Failure of [`decode_and_evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl PipelineError {
    /// The structured error code of the underlying error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(e) => e.code(),
            Self::Eval(e) => e.code(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }
}

/// Pipeline result type alias.
pub type PipelineResult<T> = Result<T, PipelineError>;

// ══════════════════════════════════════════════════════════════════════════════
// Outbound
// ══════════════════════════════════════════════════════════════════════════════

/// Encode a plain-text command as a single string token.
///
/// `encode("get index")` is `"S'%4}).$%8"`.
pub fn encode(command: &str) -> CodecResult<String> {
    Ok(format!("S{}", codec::encode_string(command)?))
}

/// Encode a literal value as wire tokens.
pub fn encode_value(value: &Value) -> CodegenResult<String> {
    value_to_tokens(value)
}

// ══════════════════════════════════════════════════════════════════════════════
// Inbound
// ══════════════════════════════════════════════════════════════════════════════

/// Decode and evaluate a complete program with the default configuration.
pub fn decode_and_evaluate(source: &str) -> PipelineResult<Value> {
    decode_and_evaluate_with(source, &EvalConfig::default()).map(|result| result.value)
}

/// Decode and evaluate a complete program.
///
/// Tokens left over after the first complete expression are rejected.
pub fn decode_and_evaluate_with(source: &str, config: &EvalConfig) -> PipelineResult<Evaluation> {
    let expr = icfp_parser::parse(source)?;
    Ok(icfp_eval::evaluate(expr, *config)?)
}

/// Decode and evaluate, summarizing the outcome as an [`EvalReport`].
///
/// A failed evaluation still reports the applications performed before the
/// error; a parse failure reports none.
pub fn evaluate_to_report(source: &str, config: &EvalConfig) -> EvalReport {
    let expr = match icfp_parser::parse(source) {
        Ok(expr) => expr,
        Err(e) => return EvalReport::failure(&PipelineError::from(e), 0),
    };
    let mut evaluator = Evaluator::new(*config);
    match evaluator.eval(Rc::new(expr), Env::new()) {
        Ok(value) => EvalReport::success(&value, evaluator.reductions()),
        Err(e) => EvalReport::failure(&PipelineError::from(e), evaluator.reductions()),
    }
}
