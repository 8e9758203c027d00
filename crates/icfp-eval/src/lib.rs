//! ICFP call-by-need evaluator.
//!
//! Evaluates a parsed [`icfp_types::Expr`] in an initially empty environment.
//! Arguments of `B$` are bound as thunks and forced on first reference;
//! `B!` evaluates its argument before binding. Every application counts
//! as one reduction, and an optional ceiling on reductions stops divergent
//! programs.
//!
//! ```ignore
//! let expr = icfp_parser::parse("B$ L# B+ v# v# I$")?;
//! let result = icfp_eval::evaluate(expr, EvalConfig::default())?;
//! assert_eq!(result.value, Value::from(4i64));
//! assert_eq!(result.reductions, 1);
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod value;

pub use config::{EvalConfig, DEFAULT_MAX_REDUCTIONS};
pub use env::{Env, Thunk, ThunkRef};
pub use error::{EvalError, EvalResult};
pub use evaluator::{div_toward_zero, evaluate, mod_toward_zero, Evaluation, Evaluator};
pub use value::{Closure, Value};
