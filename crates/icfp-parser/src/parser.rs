//! Core parser infrastructure: token cursor and public entry points.

use icfp_lexer::{tokenize, Token};
use icfp_types::Expr;

use crate::error::{ParseError, ParseResult};

/// The ICFP parser.
///
/// Consumes tokens from the front of the stream. Each token's indicator
/// decides how many sub-expressions are parsed after it; there are no
/// delimiters.
pub struct Parser<'src> {
    /// The token stream.
    tokens: Vec<Token<'src>>,
    /// Current index into `tokens`.
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Create a new parser from a token stream.
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Tokenize `source` and create a parser over it.
    pub fn from_source(source: &'src str) -> Self {
        Self::new(tokenize(source))
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Advance the cursor by one and return the consumed token, or
    /// [`ParseError::Empty`] if the stream is exhausted.
    pub(crate) fn advance(&mut self) -> ParseResult<Token<'src>> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or(ParseError::Empty { position: self.pos })?;
        self.pos += 1;
        Ok(token)
    }

    /// Returns `true` if every token has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Index of the next token to be consumed.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the whole stream as one expression, rejecting leftover tokens.
    pub fn parse_program(mut self) -> ParseResult<Expr> {
        let expr = self.parse_expr()?;
        if !self.at_end() {
            return Err(ParseError::TrailingTokens {
                position: self.pos,
                count: self.remaining(),
            });
        }
        Ok(expr)
    }
}

/// Tokenize and parse a complete program.
pub fn parse(source: &str) -> ParseResult<Expr> {
    Parser::from_source(source).parse_program()
}

/// Decode a single self-contained token such as `I/6` or `S9%3`.
///
/// The text is taken as one token even if it contains whitespace.
pub fn decode_token(text: &str) -> ParseResult<Expr> {
    if text.is_empty() {
        return Err(ParseError::Empty { position: 0 });
    }
    Parser::new(vec![Token::new(text, 0)]).parse_program()
}
