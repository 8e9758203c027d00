//! ICFP lexer: splits wire text into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Indicator, Token};
