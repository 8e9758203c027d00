//! Expression parsing.
//!
//! | indicator | sub-expressions | node |
//! |---|---|---|
//! | `T` / `F` | 0 | boolean literal |
//! | `I` | 0 | integer literal |
//! | `S` | 0 | string literal |
//! | `U` | 1 | unary operator |
//! | `B` | 2 | binary operator |
//! | `?` | 3 | if / then / else |
//! | `L` | 1 | lambda |
//! | `v` | 0 | variable |

use icfp_lexer::{Indicator, Token};
use icfp_types::{codec, BinOp, Expr, UnaryOp, VarId};
use num_traits::ToPrimitive;

use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;

/// An operator token whose operands are still being parsed.
///
/// Each variant records the operands collected so far, so parsing never
/// recurses on the native stack regardless of nesting depth.
enum Pending {
    Unary(UnaryOp),
    BinaryLeft(BinOp),
    BinaryRight(BinOp, Expr),
    IfCondition,
    IfThen(Expr),
    IfElse(Expr, Expr),
    Lambda(VarId),
}

enum Reduced {
    Complete(Expr),
    Partial(Pending),
}

impl Pending {
    /// Feed the next completed operand.
    fn accept(self, operand: Expr) -> Reduced {
        match self {
            Pending::Unary(op) => Reduced::Complete(Expr::unary(op, operand)),
            Pending::BinaryLeft(op) => Reduced::Partial(Pending::BinaryRight(op, operand)),
            Pending::BinaryRight(op, left) => Reduced::Complete(Expr::binary(op, left, operand)),
            Pending::IfCondition => Reduced::Partial(Pending::IfThen(operand)),
            Pending::IfThen(condition) => Reduced::Partial(Pending::IfElse(condition, operand)),
            Pending::IfElse(condition, then_branch) => {
                Reduced::Complete(Expr::if_then_else(condition, then_branch, operand))
            }
            Pending::Lambda(param) => Reduced::Complete(Expr::Lambda {
                param,
                body: operand.into(),
            }),
        }
    }
}

enum Head {
    Leaf(Expr),
    Open(Pending),
}

impl<'src> Parser<'src> {
    /// Parse one expression starting at the current token.
    ///
    /// Tokens after the expression are left in place; use
    /// [`Parser::parse_program`] for whole-program semantics.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut pending: Vec<Pending> = Vec::new();
        loop {
            let token = self.advance()?;
            let mut expr = match self.parse_head(&token)? {
                Head::Leaf(expr) => expr,
                Head::Open(frame) => {
                    pending.push(frame);
                    continue;
                }
            };
            loop {
                let frame = match pending.pop() {
                    Some(frame) => frame,
                    None => return Ok(expr),
                };
                match frame.accept(expr) {
                    Reduced::Complete(done) => expr = done,
                    Reduced::Partial(frame) => {
                        pending.push(frame);
                        break;
                    }
                }
            }
        }
    }

    /// Classify one token. Operator symbols and lambda parameters are
    /// validated here, before any operand is read.
    fn parse_head(&self, token: &Token<'src>) -> ParseResult<Head> {
        let indicator = token
            .indicator()
            .ok_or_else(|| ParseError::UnknownIndicator {
                indicator: token.indicator_char(),
                token: token.text.to_string(),
                position: token.index,
            })?;

        let head = match indicator {
            Indicator::True => Head::Leaf(Expr::Bool(true)),
            Indicator::False => Head::Leaf(Expr::Bool(false)),
            Indicator::Int => {
                let n = codec::decode_int(token.body()).map_err(|e| invalid_body(token, e))?;
                Head::Leaf(Expr::Int(n))
            }
            Indicator::Str => {
                let s = codec::decode_string(token.body()).map_err(|e| invalid_body(token, e))?;
                Head::Leaf(Expr::Str(s))
            }
            Indicator::Var => Head::Leaf(Expr::Var(self.var_id(token)?)),
            Indicator::Unary => {
                let op = UnaryOp::from_symbol(token.body()).ok_or_else(|| unknown_operator(token))?;
                Head::Open(Pending::Unary(op))
            }
            Indicator::Binary => {
                let op = BinOp::from_symbol(token.body()).ok_or_else(|| unknown_operator(token))?;
                Head::Open(Pending::BinaryLeft(op))
            }
            Indicator::If => Head::Open(Pending::IfCondition),
            Indicator::Lambda => Head::Open(Pending::Lambda(self.var_id(token)?)),
        };
        Ok(head)
    }

    /// Decode the body of an `L` or `v` token as a variable number.
    fn var_id(&self, token: &Token<'src>) -> ParseResult<VarId> {
        let n = codec::decode_int(token.body()).map_err(|e| invalid_body(token, e))?;
        n.to_u64()
            .map(VarId)
            .ok_or_else(|| ParseError::VarIdOutOfRange {
                token: token.text.to_string(),
                position: token.index,
            })
    }
}

fn invalid_body(token: &Token<'_>, source: codec::CodecError) -> ParseError {
    ParseError::InvalidBody {
        token: token.text.to_string(),
        position: token.index,
        source,
    }
}

fn unknown_operator(token: &Token<'_>) -> ParseError {
    ParseError::UnknownOperator {
        symbol: token.body().to_string(),
        token: token.text.to_string(),
        position: token.index,
    }
}
