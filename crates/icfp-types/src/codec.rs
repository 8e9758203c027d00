//! Base-94 codec for token bodies.
//!
//! Every body character is printable ASCII in `'!'..='~'`. Integer bodies
//! read those characters as big-endian base-94 digits (`'!'` is zero);
//! string bodies map each character through [`CHARSET`].
//!
//! All tables are compile-time constants; the functions here are pure.

use num_bigint::{BigInt, Sign};
use thiserror::Error;

use crate::ErrorCode;

/// Numeral base of integer bodies.
pub const BASE: u32 = 94;

/// Ordinal of the zero digit (`'!'`).
pub const OFFSET: u8 = 33;

/// The string charset, indexed by `wire byte - OFFSET`.
pub const CHARSET: &[u8; 94] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`|~ \n";

/// Inverse of [`CHARSET`]: maps an ASCII character to its wire byte, or 0.
const ENCODE_TABLE: [u8; 128] = build_encode_table();

const fn build_encode_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        table[CHARSET[i] as usize] = OFFSET + i as u8;
        i += 1;
    }
    table
}

/// Errors produced while encoding or decoding token bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A character outside the wire alphabet or the string charset.
    #[error("character {ch:?} is not in the alphabet")]
    InvalidCharacter { ch: char },

    /// An integer body with no digits.
    #[error("integer body is empty")]
    EmptyBody,

    /// Integer bodies only represent non-negative values.
    #[error("cannot encode negative integer {0}")]
    NegativeInteger(BigInt),
}

impl CodecError {
    /// The structured error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCharacter { .. } => ErrorCode::INVALID_CHARACTER,
            Self::EmptyBody => ErrorCode::EMPTY_BODY,
            Self::NegativeInteger(_) => ErrorCode::NEGATIVE_INTEGER,
        }
    }
}

/// Codec result type alias.
pub type CodecResult<T> = Result<T, CodecError>;

/// Convert one wire character to its digit value (`0..94`).
pub fn decode_digit(ch: char) -> CodecResult<u8> {
    match ch {
        '!'..='~' => Ok(ch as u8 - OFFSET),
        _ => Err(CodecError::InvalidCharacter { ch }),
    }
}

/// Decode an integer body. An empty body is rejected.
pub fn decode_int(body: &str) -> CodecResult<BigInt> {
    if body.is_empty() {
        return Err(CodecError::EmptyBody);
    }
    decode_digits(body)
}

/// Decode a digit sequence; the empty sequence folds to zero.
///
/// This is the behavior of the string-to-int operator, which reinterprets
/// arbitrary (possibly empty) strings as integer bodies.
pub fn decode_digits(body: &str) -> CodecResult<BigInt> {
    let digits = body
        .chars()
        .map(decode_digit)
        .collect::<CodecResult<Vec<u8>>>()?;
    if digits.is_empty() {
        return Ok(BigInt::default());
    }
    // Every digit is below BASE, so the conversion cannot fail.
    Ok(BigInt::from_radix_be(Sign::Plus, &digits, BASE).unwrap_or_default())
}

/// Encode a non-negative integer as a body. Zero encodes as `"!"`.
pub fn encode_int(n: &BigInt) -> CodecResult<String> {
    if n.sign() == Sign::Minus {
        return Err(CodecError::NegativeInteger(n.clone()));
    }
    Ok(n.magnitude()
        .to_radix_be(BASE)
        .into_iter()
        .map(|d| (d + OFFSET) as char)
        .collect())
}

/// Decode a string body through the charset table.
pub fn decode_string(body: &str) -> CodecResult<String> {
    body.chars()
        .map(|ch| decode_digit(ch).map(|d| CHARSET[d as usize] as char))
        .collect()
}

/// Encode a string as a body. Characters outside the charset are rejected.
pub fn encode_string(s: &str) -> CodecResult<String> {
    s.chars()
        .map(|ch| {
            let wire = if ch.is_ascii() {
                ENCODE_TABLE[ch as usize]
            } else {
                0
            };
            if wire == 0 {
                Err(CodecError::InvalidCharacter { ch })
            } else {
                Ok(wire as char)
            }
        })
        .collect()
}
