//! Token types for the ICFP lexer.
//!
//! A [`Token`] is one whitespace-delimited slice of the source. Its first
//! character is the indicator; the rest is the body, kept verbatim.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// Indicator
// ─────────────────────────────────────────────────────────────────────

/// The first character of a token, which decides what the token means and
/// how many sub-expressions follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// `T`
    True,
    /// `F`
    False,
    /// `I`
    Int,
    /// `S`
    Str,
    /// `U`
    Unary,
    /// `B`
    Binary,
    /// `?`
    If,
    /// `L`
    Lambda,
    /// `v`
    Var,
}

impl Indicator {
    /// Classify an indicator character. Returns `None` for unknown ones.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'T' => Some(Indicator::True),
            'F' => Some(Indicator::False),
            'I' => Some(Indicator::Int),
            'S' => Some(Indicator::Str),
            'U' => Some(Indicator::Unary),
            'B' => Some(Indicator::Binary),
            '?' => Some(Indicator::If),
            'L' => Some(Indicator::Lambda),
            'v' => Some(Indicator::Var),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Indicator::True => 'T',
            Indicator::False => 'F',
            Indicator::Int => 'I',
            Indicator::Str => 'S',
            Indicator::Unary => 'U',
            Indicator::Binary => 'B',
            Indicator::If => '?',
            Indicator::Lambda => 'L',
            Indicator::Var => 'v',
        }
    }

    /// Number of sub-expressions that follow a token with this indicator.
    pub fn arity(&self) -> usize {
        match self {
            Indicator::True
            | Indicator::False
            | Indicator::Int
            | Indicator::Str
            | Indicator::Var => 0,
            Indicator::Unary | Indicator::Lambda => 1,
            Indicator::Binary => 2,
            Indicator::If => 3,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The token text, exactly as it appears in the source.
    pub text: &'src str,
    /// Zero-based position of this token in the stream.
    pub index: usize,
}

impl<'src> Token<'src> {
    /// Create a new token. `text` must be non-empty.
    pub fn new(text: &'src str, index: usize) -> Self {
        Self { text, index }
    }

    /// The raw indicator character.
    pub fn indicator_char(&self) -> char {
        self.text.chars().next().unwrap_or_default()
    }

    /// The classified indicator, if it is a known one.
    pub fn indicator(&self) -> Option<Indicator> {
        Indicator::from_char(self.indicator_char())
    }

    /// Everything after the indicator character.
    pub fn body(&self) -> &'src str {
        let skip = self.text.chars().next().map_or(0, char::len_utf8);
        &self.text[skip..]
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
