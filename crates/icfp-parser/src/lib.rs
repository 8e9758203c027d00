//! ICFP parser: converts a token stream into an AST.

mod error;
mod parse_expr;
mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::{decode_token, parse, Parser};
