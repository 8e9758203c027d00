//! Core ICFP lexer: splits source text into whitespace-delimited tokens.
//!
//! Tokens keep their text verbatim; no nesting is inferred here. Arity is
//! decided later by the parser from each token's indicator.

use crate::token::Token;

/// The ICFP lexer.
pub struct Lexer<'src> {
    /// The full source text.
    source: &'src str,
    /// Current byte offset into `source`.
    pos: usize,
    /// Number of tokens produced so far.
    count: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer over the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            count: 0,
        }
    }

    /// Lex the entire source into a token vector.
    pub fn lex(self) -> Vec<Token<'src>> {
        self.collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Skip any run of whitespace, including newlines.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Scan one token starting at the current (non-whitespace) position.
    fn scan_token(&mut self) -> Token<'src> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                break;
            }
            self.advance();
        }
        let token = Token::new(&self.source[start..self.pos], self.count);
        self.count += 1;
        token
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        self.skip_whitespace();
        if self.pos >= self.source.len() {
            return None;
        }
        Some(self.scan_token())
    }
}

/// Split `source` into tokens.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).lex()
}
