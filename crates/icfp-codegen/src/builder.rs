//! Programmatic construction of outgoing programs.
//!
//! [`Builder`] owns the fresh-variable counter. Lambda parameters are
//! allocated stack-wise: a lambda takes the next free ids while its body is
//! built and releases them afterwards, so sibling lambdas reuse the same ids.
//! Every lambda masks outer bindings of its own parameter, so reuse is safe.
//!
//! ```ignore
//! let mut b = Builder::new();
//! let fib = b.lambda(2, |_, v| {
//!     let (rec, n) = (&v[0], &v[1]);
//!     Builder::if_then_else(
//!         Builder::lt(n.clone(), Builder::int(2)),
//!         Builder::int(1),
//!         Builder::add(
//!             Builder::apply(rec.clone(), [Builder::sub(n.clone(), Builder::int(1))]),
//!             Builder::apply(rec.clone(), [Builder::sub(n.clone(), Builder::int(2))]),
//!         ),
//!     )
//! });
//! let y = b.y_combinator();
//! let program = Builder::apply(y, [fib, Builder::int(6)]);
//! ```

use icfp_types::{BinOp, Expr, UnaryOp};
use num_bigint::BigInt;

/// Expression builder with a fresh-variable counter.
#[derive(Debug, Default)]
pub struct Builder {
    next_var: u64,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variable ids currently in use.
    pub fn depth(&self) -> u64 {
        self.next_var
    }

    /// A curried lambda of `arity` parameters.
    ///
    /// `body` receives the builder and one variable reference per parameter,
    /// outermost first.
    pub fn lambda<F>(&mut self, arity: usize, body: F) -> Expr
    where
        F: FnOnce(&mut Builder, &[Expr]) -> Expr,
    {
        let first = self.next_var;
        let params: Vec<u64> = (first..first + arity as u64).collect();
        self.next_var += arity as u64;
        let vars: Vec<Expr> = params.iter().map(|&id| Expr::var(id)).collect();
        let body = body(self, &vars);
        self.next_var = first;
        params
            .into_iter()
            .rev()
            .fold(body, |body, param| Expr::lambda(param, body))
    }

    /// The fixed-point combinator `λf. (λg. g g) (λx. f (x x))`.
    pub fn y_combinator(&mut self) -> Expr {
        self.lambda(1, |b, f| {
            let f = f[0].clone();
            let self_apply = b.lambda(1, |_, g| Builder::apply(g[0].clone(), [g[0].clone()]));
            let step = b.lambda(1, |_, x| {
                let xx = Builder::apply(x[0].clone(), [x[0].clone()]);
                Builder::apply(f.clone(), [xx])
            });
            Builder::apply(self_apply, [step])
        })
    }

    // ── Literals ─────────────────────────────────────────────────────────

    pub fn int(n: impl Into<BigInt>) -> Expr {
        Expr::int(n)
    }

    pub fn string(s: impl Into<String>) -> Expr {
        Expr::string(s)
    }

    pub fn bool(b: bool) -> Expr {
        Expr::Bool(b)
    }

    pub fn var(id: u64) -> Expr {
        Expr::var(id)
    }

    // ── Application ──────────────────────────────────────────────────────

    /// `f a b c` as `B$ B$ B$ f a b c`.
    pub fn apply(function: Expr, args: impl IntoIterator<Item = Expr>) -> Expr {
        args.into_iter().fold(function, |f, arg| Expr::apply(f, arg))
    }

    /// Like [`Builder::apply`], with every argument evaluated before binding.
    pub fn apply_eager(function: Expr, args: impl IntoIterator<Item = Expr>) -> Expr {
        args.into_iter()
            .fold(function, |f, arg| Expr::binary(BinOp::ApplyEager, f, arg))
    }

    pub fn if_then_else(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
        Expr::if_then_else(condition, then_branch, else_branch)
    }

    // ── Operators ────────────────────────────────────────────────────────

    pub fn neg(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::Neg, operand)
    }

    pub fn not(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::Not, operand)
    }

    pub fn str_to_int(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::StrToInt, operand)
    }

    pub fn int_to_str(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::IntToStr, operand)
    }

    pub fn add(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Div, left, right)
    }

    pub fn rem(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Mod, left, right)
    }

    pub fn lt(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Less, left, right)
    }

    pub fn gt(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Greater, left, right)
    }

    pub fn eq(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Eq, left, right)
    }

    pub fn or(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Or, left, right)
    }

    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::And, left, right)
    }

    pub fn concat(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Concat, left, right)
    }

    /// The first `count` characters of `s`.
    pub fn take(count: Expr, s: Expr) -> Expr {
        Expr::binary(BinOp::Take, count, s)
    }

    /// `s` without its first `count` characters.
    pub fn drop(count: Expr, s: Expr) -> Expr {
        Expr::binary(BinOp::Drop, count, s)
    }
}
