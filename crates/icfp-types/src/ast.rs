//! AST node types for the ICFP wire language.
//!
//! Nodes are immutable once built. Children are reference-counted so that
//! closures and deferred arguments can hold on to sub-trees without copying.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// A variable number, decoded from a lambda or variable token body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(pub u64);

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // ── Literals ──
    /// `T` / `F`
    Bool(bool),
    /// `I<digits>`
    Int(BigInt),
    /// `S<body>`, already translated to the string charset
    Str(String),

    /// `v<id>`
    Var(VarId),
    /// `U<op> operand`
    Unary { op: UnaryOp, operand: Rc<Expr> },
    /// `B<op> left right`
    Binary {
        op: BinOp,
        left: Rc<Expr>,
        right: Rc<Expr>,
    },
    /// `? condition then else`
    If {
        condition: Rc<Expr>,
        then_branch: Rc<Expr>,
        else_branch: Rc<Expr>,
    },
    /// `L<id> body`
    Lambda { param: VarId, body: Rc<Expr> },
}

impl Expr {
    pub fn int(n: impl Into<BigInt>) -> Self {
        Expr::Int(n.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Str(s.into())
    }

    pub fn var(id: u64) -> Self {
        Expr::Var(VarId(id))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Rc::new(operand),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Rc::new(left),
            right: Rc::new(right),
        }
    }

    pub fn if_then_else(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::If {
            condition: Rc::new(condition),
            then_branch: Rc::new(then_branch),
            else_branch: Rc::new(else_branch),
        }
    }

    pub fn lambda(param: u64, body: Expr) -> Self {
        Expr::Lambda {
            param: VarId(param),
            body: Rc::new(body),
        }
    }

    /// Lazy application `B$ function argument`.
    pub fn apply(function: Expr, argument: Expr) -> Self {
        Expr::binary(BinOp::Apply, function, argument)
    }

    /// Literals and variables; nodes without children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Expr::Bool(_) | Expr::Int(_) | Expr::Str(_) | Expr::Var(_)
        )
    }

    /// Number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            count += 1;
            match expr {
                Expr::Bool(_) | Expr::Int(_) | Expr::Str(_) | Expr::Var(_) => {}
                Expr::Unary { operand, .. } => pending.push(operand),
                Expr::Binary { left, right, .. } => {
                    pending.push(left);
                    pending.push(right);
                }
                Expr::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    pending.push(condition);
                    pending.push(then_branch);
                    pending.push(else_branch);
                }
                Expr::Lambda { body, .. } => pending.push(body),
            }
        }
        count
    }
}

// Tear down uniquely owned sub-trees through a worklist so that dropping a
// deeply nested program does not recurse once per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut filler = None;
        let mut pending = Vec::new();
        detach_children(self, &mut filler, &mut pending);
        while let Some(mut child) = pending.pop() {
            if let Some(node) = Rc::get_mut(&mut child) {
                detach_children(node, &mut filler, &mut pending);
            }
        }
    }
}

/// Move every uniquely owned composite child of `expr` onto `pending`,
/// leaving a shared leaf in its place.
fn detach_children(expr: &mut Expr, filler: &mut Option<Rc<Expr>>, pending: &mut Vec<Rc<Expr>>) {
    let mut detach = |slot: &mut Rc<Expr>| {
        if slot.is_leaf() || Rc::get_mut(slot).is_none() {
            return;
        }
        let leaf = filler.get_or_insert_with(|| Rc::new(Expr::Bool(false))).clone();
        pending.push(std::mem::replace(slot, leaf));
    };
    match expr {
        Expr::Bool(_) | Expr::Int(_) | Expr::Str(_) | Expr::Var(_) => {}
        Expr::Unary { operand, .. } => detach(operand),
        Expr::Binary { left, right, .. } => {
            detach(left);
            detach(right);
        }
        Expr::If {
            condition,
            then_branch,
            else_branch,
        } => {
            detach(condition);
            detach(then_branch);
            detach(else_branch);
        }
        Expr::Lambda { body, .. } => detach(body),
    }
}

/// S-expression rendering, used for traces and debugging.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Node(&'a Expr),
            Text(&'static str),
        }

        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            let expr = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(expr) => expr,
            };
            match expr {
                Expr::Bool(b) => write!(f, "{b}")?,
                Expr::Int(n) => write!(f, "{n}")?,
                Expr::Str(s) => write!(f, "{s:?}")?,
                Expr::Var(id) => write!(f, "{id}")?,
                Expr::Unary { op, operand } => {
                    write!(f, "({} ", op.as_str())?;
                    pending.extend([Piece::Text(")"), Piece::Node(operand)]);
                }
                Expr::Binary { op, left, right } => {
                    write!(f, "({} ", op.as_str())?;
                    pending.extend([
                        Piece::Text(")"),
                        Piece::Node(right),
                        Piece::Text(" "),
                        Piece::Node(left),
                    ]);
                }
                Expr::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    f.write_str("(? ")?;
                    pending.extend([
                        Piece::Text(")"),
                        Piece::Node(else_branch),
                        Piece::Text(" "),
                        Piece::Node(then_branch),
                        Piece::Text(" "),
                        Piece::Node(condition),
                    ]);
                }
                Expr::Lambda { param, body } => {
                    write!(f, "(λ {param} ")?;
                    pending.extend([Piece::Text(")"), Piece::Node(body)]);
                }
            }
        }
        Ok(())
    }
}

// ── Unary Operators ───────────────────────────────────────────────────────────

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `U-` integer negation
    Neg,
    /// `U!` boolean not
    Not,
    /// `U#` string to int
    StrToInt,
    /// `U$` int to string
    IntToStr,
}

impl UnaryOp {
    /// Parse the operator symbol that follows the `U` indicator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(UnaryOp::Neg),
            "!" => Some(UnaryOp::Not),
            "#" => Some(UnaryOp::StrToInt),
            "$" => Some(UnaryOp::IntToStr),
            _ => None,
        }
    }

    /// Returns the operator symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::StrToInt => "#",
            UnaryOp::IntToStr => "$",
        }
    }
}

// ── Binary Operators ──────────────────────────────────────────────────────────

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    /// Truncating division
    Div,
    /// Truncating remainder
    Mod,
    // Comparison
    Less,
    Greater,
    Eq,
    // Logical
    Or,
    And,
    // Strings
    Concat,
    Take,
    Drop,
    // Application
    /// `B$`: argument bound unevaluated
    Apply,
    /// `B!`: argument evaluated before binding
    ApplyEager,
}

impl BinOp {
    /// Parse the operator symbol that follows the `B` indicator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            "%" => Some(BinOp::Mod),
            "<" => Some(BinOp::Less),
            ">" => Some(BinOp::Greater),
            "=" => Some(BinOp::Eq),
            "|" => Some(BinOp::Or),
            "&" => Some(BinOp::And),
            "." => Some(BinOp::Concat),
            "T" => Some(BinOp::Take),
            "D" => Some(BinOp::Drop),
            "$" => Some(BinOp::Apply),
            "!" => Some(BinOp::ApplyEager),
            _ => None,
        }
    }

    /// Returns the operator symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::Eq => "=",
            BinOp::Or => "|",
            BinOp::And => "&",
            BinOp::Concat => ".",
            BinOp::Take => "T",
            BinOp::Drop => "D",
            BinOp::Apply => "$",
            BinOp::ApplyEager => "!",
        }
    }

    /// `true` for the two application operators.
    pub fn is_application(&self) -> bool {
        matches!(self, BinOp::Apply | BinOp::ApplyEager)
    }
}
