//! Call-by-need evaluator.
//!
//! Evaluation runs on an explicit continuation stack instead of the native
//! call stack, so recursion depth is bounded by heap memory. The machine
//! alternates between two states: evaluating a node in an environment, and
//! returning a value to the innermost pending continuation. Applications in
//! tail position replace the current state without pushing a continuation.

use crate::config::EvalConfig;
use crate::env::{Env, Thunk, ThunkRef};
use crate::error::{EvalError, EvalResult};
use crate::value::{Closure, Value};
use icfp_types::{codec, BinOp, Expr, UnaryOp};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use std::rc::Rc;

/// Work remaining after the current sub-expression produces a value.
enum Continuation {
    /// Apply a unary operator to the value.
    Unary(UnaryOp),
    /// The value is the left operand; evaluate `right` next.
    BinaryLeft {
        op: BinOp,
        right: Rc<Expr>,
        env: Env,
    },
    /// The value is the right operand.
    BinaryRight { op: BinOp, left: Value },
    /// The value is an `if` condition.
    Branch {
        then_branch: Rc<Expr>,
        else_branch: Rc<Expr>,
        env: Env,
    },
    /// The value is a function; bind `argument` unevaluated.
    Apply { argument: Rc<Expr>, env: Env },
    /// The value is a function; evaluate `argument` before binding.
    ApplyEager { argument: Rc<Expr>, env: Env },
    /// The value is an evaluated argument for `closure`.
    Bind { closure: Rc<Closure> },
    /// The value is the result of forcing this thunk.
    Update(ThunkRef),
}

/// Machine state.
enum Step {
    Eval(Rc<Expr>, Env),
    Return(Value),
}

/// The outcome of a complete evaluation.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub value: Value,
    /// Lazy and eager applications performed.
    pub reductions: u64,
    /// One line per evaluation step, when tracing is enabled.
    pub trace: Vec<String>,
}

/// Walks expression trees and produces values.
///
/// Holds the policy and the reduction counter. The counter accumulates
/// across calls to [`Evaluator::eval`].
pub struct Evaluator {
    config: EvalConfig,
    reductions: u64,
    trace: Vec<String>,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self {
            config,
            reductions: 0,
            trace: Vec::new(),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Applications performed so far.
    pub fn reductions(&self) -> u64 {
        self.reductions
    }

    /// Captured trace lines (empty unless tracing is enabled).
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// Evaluate a program in the empty environment.
    pub fn evaluate(mut self, expr: Expr) -> EvalResult<Evaluation> {
        let value = self.eval(Rc::new(expr), Env::new())?;
        Ok(Evaluation {
            value,
            reductions: self.reductions,
            trace: self.trace,
        })
    }

    /// Count one application. Refuses the application that would pass the
    /// ceiling, so the counter never exceeds it.
    fn tick(&mut self) -> EvalResult<()> {
        match self.config.max_reductions {
            Some(limit) if self.reductions >= limit => {
                Err(EvalError::ReductionBudgetExceeded { limit })
            }
            _ => {
                self.reductions += 1;
                Ok(())
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Machine loop
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate `expr` in `env` to a value.
    pub fn eval(&mut self, expr: Rc<Expr>, env: Env) -> EvalResult<Value> {
        let mut stack: Vec<Continuation> = Vec::new();
        let mut step = Step::Eval(expr, env);
        loop {
            step = match step {
                Step::Eval(expr, env) => self.eval_node(expr, env, &mut stack)?,
                Step::Return(value) => match stack.pop() {
                    None => return Ok(value),
                    Some(continuation) => self.resume(continuation, value, &mut stack)?,
                },
            };
        }
    }

    fn eval_node(
        &mut self,
        expr: Rc<Expr>,
        env: Env,
        stack: &mut Vec<Continuation>,
    ) -> EvalResult<Step> {
        if self.config.trace {
            self.trace.push(format!("[{}] {}", env.depth(), expr));
        }
        match &*expr {
            Expr::Bool(b) => Ok(Step::Return(Value::Bool(*b))),
            Expr::Int(n) => Ok(Step::Return(Value::Int(n.clone()))),
            Expr::Str(s) => Ok(Step::Return(Value::Str(s.clone()))),

            Expr::Var(id) => {
                let thunk = env.lookup(*id).ok_or(EvalError::UnboundVariable(*id))?;
                self.force(thunk, stack)
            }

            // The closure must not see an outer binding of its own parameter.
            Expr::Lambda { param, body } => Ok(Step::Return(Value::Closure(Rc::new(Closure {
                param: *param,
                body: body.clone(),
                env: env.without(*param),
            })))),

            Expr::Unary { op, operand } => {
                stack.push(Continuation::Unary(*op));
                Ok(Step::Eval(operand.clone(), env))
            }

            Expr::Binary { op, left, right } => {
                let continuation = match op {
                    BinOp::Apply => Continuation::Apply {
                        argument: right.clone(),
                        env: env.clone(),
                    },
                    BinOp::ApplyEager => Continuation::ApplyEager {
                        argument: right.clone(),
                        env: env.clone(),
                    },
                    _ => Continuation::BinaryLeft {
                        op: *op,
                        right: right.clone(),
                        env: env.clone(),
                    },
                };
                stack.push(continuation);
                Ok(Step::Eval(left.clone(), env))
            }

            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                stack.push(Continuation::Branch {
                    then_branch: then_branch.clone(),
                    else_branch: else_branch.clone(),
                    env: env.clone(),
                });
                Ok(Step::Eval(condition.clone(), env))
            }
        }
    }

    /// Produce the value of a bound variable.
    ///
    /// An unevaluated thunk is evaluated in its own captured environment;
    /// with memoization on, the result is written back by an `Update`.
    fn force(&mut self, thunk: ThunkRef, stack: &mut Vec<Continuation>) -> EvalResult<Step> {
        let (expr, env) = {
            let state = thunk.borrow();
            match &*state {
                Thunk::Forced(value) => return Ok(Step::Return(value.clone())),
                Thunk::Unevaluated { expr, env } => (expr.clone(), env.clone()),
            }
        };
        if self.config.memoize {
            stack.push(Continuation::Update(thunk));
        }
        Ok(Step::Eval(expr, env))
    }

    fn resume(
        &mut self,
        continuation: Continuation,
        value: Value,
        stack: &mut Vec<Continuation>,
    ) -> EvalResult<Step> {
        match continuation {
            Continuation::Unary(op) => eval_unary(op, value).map(Step::Return),

            Continuation::BinaryLeft { op, right, env } => {
                stack.push(Continuation::BinaryRight { op, left: value });
                Ok(Step::Eval(right, env))
            }
            Continuation::BinaryRight { op, left } => {
                eval_binary(op, left, value).map(Step::Return)
            }

            Continuation::Branch {
                then_branch,
                else_branch,
                env,
            } => match value {
                Value::Bool(true) => Ok(Step::Eval(then_branch, env)),
                Value::Bool(false) => Ok(Step::Eval(else_branch, env)),
                other => Err(mismatch("?", "bool", &other)),
            },

            Continuation::Apply { argument, env } => {
                let closure = expect_closure(value)?;
                self.enter(&closure, Thunk::unevaluated(argument, env))
            }
            Continuation::ApplyEager { argument, env } => {
                let closure = expect_closure(value)?;
                stack.push(Continuation::Bind { closure });
                Ok(Step::Eval(argument, env))
            }
            Continuation::Bind { closure } => self.enter(&closure, Thunk::forced(value)),

            Continuation::Update(thunk) => {
                *thunk.borrow_mut() = Thunk::Forced(value.clone());
                Ok(Step::Return(value))
            }
        }
    }

    /// Evaluate a closure body with its parameter bound to `argument`.
    fn enter(&mut self, closure: &Closure, argument: ThunkRef) -> EvalResult<Step> {
        self.tick()?;
        let env = closure.env.bind(closure.param, argument);
        Ok(Step::Eval(closure.body.clone(), env))
    }
}

/// Evaluate a program in the empty environment with the given policy.
pub fn evaluate(expr: Expr, config: EvalConfig) -> EvalResult<Evaluation> {
    Evaluator::new(config).evaluate(expr)
}

// ══════════════════════════════════════════════════════════════════════════
// Primitive operators
// ══════════════════════════════════════════════════════════════════════════

fn mismatch(operator: &'static str, expected: &'static str, found: &Value) -> EvalError {
    EvalError::TypeMismatch {
        operator,
        expected,
        found: found.type_name(),
    }
}

fn expect_closure(value: Value) -> EvalResult<Rc<Closure>> {
    match value {
        Value::Closure(closure) => Ok(closure),
        other => Err(EvalError::ExpectedClosure {
            found: other.type_name(),
        }),
    }
}

fn eval_unary(op: UnaryOp, operand: Value) -> EvalResult<Value> {
    let symbol = op.as_str();
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(-n)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        // Read the string as if it were its own wire body.
        (UnaryOp::StrToInt, Value::Str(s)) => {
            let body = codec::encode_string(&s)?;
            Ok(Value::Int(codec::decode_digits(&body)?))
        }
        (UnaryOp::IntToStr, Value::Int(n)) => {
            let body = codec::encode_int(&n)?;
            Ok(Value::Str(codec::decode_string(&body)?))
        }
        (UnaryOp::Neg, other) => Err(mismatch(symbol, "int", &other)),
        (UnaryOp::Not, other) => Err(mismatch(symbol, "bool", &other)),
        (UnaryOp::StrToInt, other) => Err(mismatch(symbol, "string", &other)),
        (UnaryOp::IntToStr, other) => Err(mismatch(symbol, "int", &other)),
    }
}

fn eval_binary(op: BinOp, left: Value, right: Value) -> EvalResult<Value> {
    let symbol = op.as_str();
    match op {
        BinOp::Add => eval_arith(symbol, left, right, |a, b| Ok(a + b)),
        BinOp::Sub => eval_arith(symbol, left, right, |a, b| Ok(a - b)),
        BinOp::Mul => eval_arith(symbol, left, right, |a, b| Ok(a * b)),
        BinOp::Div => eval_arith(symbol, left, right, |a, b| div_toward_zero(&a, &b)),
        BinOp::Mod => eval_arith(symbol, left, right, |a, b| mod_toward_zero(&a, &b)),
        BinOp::Less => eval_comparison(symbol, left, right, |a, b| a < b),
        BinOp::Greater => eval_comparison(symbol, left, right, |a, b| a > b),
        BinOp::Eq => eval_equality(left, right),
        BinOp::Or => eval_logic(symbol, left, right, |a, b| a || b),
        BinOp::And => eval_logic(symbol, left, right, |a, b| a && b),
        BinOp::Concat => match (left, right) {
            (Value::Str(mut a), Value::Str(b)) => {
                a.push_str(&b);
                Ok(Value::Str(a))
            }
            (Value::Str(_), other) | (other, _) => Err(mismatch(symbol, "string", &other)),
        },
        BinOp::Take | BinOp::Drop => eval_slice(op, left, right),
        BinOp::Apply | BinOp::ApplyEager => {
            unreachable!("applications are handled by the machine")
        }
    }
}

fn eval_arith(
    symbol: &'static str,
    left: Value,
    right: Value,
    op: impl FnOnce(BigInt, BigInt) -> EvalResult<BigInt>,
) -> EvalResult<Value> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => op(a, b).map(Value::Int),
        (Value::Int(_), other) | (other, _) => Err(mismatch(symbol, "int", &other)),
    }
}

fn eval_comparison(
    symbol: &'static str,
    left: Value,
    right: Value,
    op: fn(&BigInt, &BigInt) -> bool,
) -> EvalResult<Value> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(op(a, b))),
        (Value::Int(_), other) | (other, _) => Err(mismatch(symbol, "int", other)),
    }
}

fn eval_logic(
    symbol: &'static str,
    left: Value,
    right: Value,
    op: fn(bool, bool) -> bool,
) -> EvalResult<Value> {
    match (&left, &right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(op(*a, *b))),
        (Value::Bool(_), other) | (other, _) => Err(mismatch(symbol, "bool", other)),
    }
}

/// `=` checks each operand on its own; operands of different types are
/// simply unequal.
fn eval_equality(left: Value, right: Value) -> EvalResult<Value> {
    for operand in [&left, &right] {
        if let Value::Closure(_) = operand {
            return Err(mismatch("=", "int, bool or string", operand));
        }
    }
    Ok(Value::Bool(left == right))
}

/// `T` keeps the first `n` characters, `D` drops them.
fn eval_slice(op: BinOp, left: Value, right: Value) -> EvalResult<Value> {
    let symbol = op.as_str();
    let (count, s) = match (left, right) {
        (Value::Int(count), Value::Str(s)) => (count, s),
        (Value::Int(_), other) => return Err(mismatch(symbol, "string", &other)),
        (other, _) => return Err(mismatch(symbol, "int", &other)),
    };
    let length = s.chars().count();
    let n = count
        .to_usize()
        .filter(|&n| n <= length)
        .ok_or_else(|| EvalError::SliceOutOfRange {
            count: count.clone(),
            length,
        })?;
    let split = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    let result = if op == BinOp::Take {
        &s[..split]
    } else {
        &s[split..]
    };
    Ok(Value::Str(result.to_string()))
}

/// Integer division rounding toward zero: `-7 / 2 == -3`.
pub fn div_toward_zero(a: &BigInt, b: &BigInt) -> EvalResult<BigInt> {
    if b.is_zero() {
        return Err(EvalError::DivisionByZero { operator: "/" });
    }
    Ok(a.div_rem(b).0)
}

/// Remainder of [`div_toward_zero`]; takes the sign of the dividend:
/// `-7 % 2 == -1`, `7 % -2 == 1`.
pub fn mod_toward_zero(a: &BigInt, b: &BigInt) -> EvalResult<BigInt> {
    if b.is_zero() {
        return Err(EvalError::DivisionByZero { operator: "%" });
    }
    Ok(a.div_rem(b).1)
}
