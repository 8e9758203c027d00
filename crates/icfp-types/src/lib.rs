//! Shared types for the ICFP wire language.
//!
//! This crate defines the AST node types, the base-94 codec used for
//! integer and string bodies, and the structured error codes shared by
//! every pipeline stage.

mod error;
pub mod ast;
pub mod codec;

pub use ast::{BinOp, Expr, UnaryOp, VarId};
pub use codec::{CodecError, CodecResult};
pub use error::{ErrorCategory, ErrorCode};
