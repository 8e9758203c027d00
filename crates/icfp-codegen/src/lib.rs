//! ICFP code generator: renders expressions and values as wire tokens.
//!
//! # Serializer
//!
//! [`expr_to_tokens`] writes one token per node in prefix order, the order
//! the parser consumes them. [`value_to_tokens`] renders literal results.
//!
//! # Builder
//!
//! [`Builder`] constructs outgoing programs from Rust code: literals,
//! operators, multi-argument application, curried lambdas with fresh
//! variable ids, and the fixed-point combinator used to express recursion.

pub mod builder;
pub mod error;
pub mod serializer;

pub use builder::Builder;
pub use error::{CodegenError, CodegenResult};
pub use serializer::{expr_to_tokens, value_to_tokens};
