//! Wire token serializer.
//!
//! Renders expressions in prefix order, one token per node, joined by single
//! spaces. The output is consumed by the parser in exactly the order it is
//! written, so `parse(expr_to_tokens(e)) == e` for every expression whose
//! literals are encodable.

use icfp_eval::Value;
use icfp_types::{codec, Expr};
use num_bigint::BigInt;
use num_traits::Signed;

use crate::error::{CodegenError, CodegenResult};

// ══════════════════════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════════════════════

/// Render an expression as a wire token stream.
pub fn expr_to_tokens(expr: &Expr) -> CodegenResult<String> {
    let mut serializer = Serializer::default();
    serializer.expr(expr)?;
    Ok(serializer.finish())
}

/// Render a literal value as a wire token stream.
///
/// Closures have no token form and are rejected.
pub fn value_to_tokens(value: &Value) -> CodegenResult<String> {
    let mut serializer = Serializer::default();
    match value {
        Value::Bool(b) => serializer.bool(*b),
        Value::Int(n) => serializer.int(n)?,
        Value::Str(s) => serializer.string(s)?,
        Value::Closure(closure) => {
            return Err(CodegenError::Unsupported(format!(
                "closure over {} has no token form",
                closure.param
            )))
        }
    }
    Ok(serializer.finish())
}

// ══════════════════════════════════════════════════════════════════════════════
// Serializer
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Serializer {
    tokens: Vec<String>,
}

impl Serializer {
    fn finish(self) -> String {
        self.tokens.join(" ")
    }

    /// Walk the tree with an explicit stack; children are pushed in reverse
    /// so they pop in source order.
    fn expr(&mut self, root: &Expr) -> CodegenResult<()> {
        let mut pending = vec![root];
        while let Some(expr) = pending.pop() {
            match expr {
                Expr::Bool(b) => self.bool(*b),
                Expr::Int(n) => self.int(n)?,
                Expr::Str(s) => self.string(s)?,
                Expr::Var(id) => self.tokens.push(format!("v{}", encode_id(id.0)?)),
                Expr::Unary { op, operand } => {
                    self.tokens.push(format!("U{}", op.as_str()));
                    pending.push(operand);
                }
                Expr::Binary { op, left, right } => {
                    self.tokens.push(format!("B{}", op.as_str()));
                    pending.push(right);
                    pending.push(left);
                }
                Expr::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    self.tokens.push("?".to_string());
                    pending.push(else_branch);
                    pending.push(then_branch);
                    pending.push(condition);
                }
                Expr::Lambda { param, body } => {
                    self.tokens.push(format!("L{}", encode_id(param.0)?));
                    pending.push(body);
                }
            }
        }
        Ok(())
    }

    fn bool(&mut self, b: bool) {
        self.tokens.push(if b { "T" } else { "F" }.to_string());
    }

    /// Negative integers have no literal form; they render as a negation.
    fn int(&mut self, n: &BigInt) -> CodegenResult<()> {
        if n.is_negative() {
            self.tokens.push("U-".to_string());
        }
        self.tokens.push(format!("I{}", codec::encode_int(&n.abs())?));
        Ok(())
    }

    fn string(&mut self, s: &str) -> CodegenResult<()> {
        self.tokens.push(format!("S{}", codec::encode_string(s)?));
        Ok(())
    }
}

fn encode_id(id: u64) -> CodegenResult<String> {
    Ok(codec::encode_int(&BigInt::from(id))?)
}
