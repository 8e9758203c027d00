//! Persistent variable environment for the ICFP evaluator.
//!
//! An environment is a chain of reference-counted frames, each holding one
//! binding and a link to its parent. Extending an environment allocates a
//! single frame and never copies or mutates the parent, so closures can
//! share their captured chain freely.

use crate::value::Value;
use icfp_types::{Expr, VarId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A deferred computation bound to a variable.
///
/// Transitions from `Unevaluated` to `Forced` at most once.
#[derive(Debug, Clone)]
pub enum Thunk {
    /// An argument expression and the environment it must be evaluated in.
    Unevaluated { expr: Rc<Expr>, env: Env },
    /// A computed value.
    Forced(Value),
}

/// Shared handle to a thunk. Every environment that binds the same argument
/// sees the same memoized value.
pub type ThunkRef = Rc<RefCell<Thunk>>;

impl Thunk {
    pub fn unevaluated(expr: Rc<Expr>, env: Env) -> ThunkRef {
        Rc::new(RefCell::new(Thunk::Unevaluated { expr, env }))
    }

    pub fn forced(value: Value) -> ThunkRef {
        Rc::new(RefCell::new(Thunk::Forced(value)))
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, Thunk::Forced(_))
    }
}

enum Binding {
    Bound(ThunkRef),
    /// Masks every outer binding of the frame's variable.
    Hidden,
}

struct Frame {
    var: VarId,
    binding: Binding,
    parent: Env,
}

/// An immutable environment. Cloning is O(1).
#[derive(Clone, Default)]
pub struct Env {
    head: Option<Rc<Frame>>,
}

impl Env {
    /// The empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// A new environment with `var` bound to `thunk`, shadowing any outer
    /// binding of the same variable.
    pub fn bind(&self, var: VarId, thunk: ThunkRef) -> Env {
        self.push(var, Binding::Bound(thunk))
    }

    /// A new environment in which `var` is unbound.
    pub fn without(&self, var: VarId) -> Env {
        if self.is_empty() {
            return Env::new();
        }
        self.push(var, Binding::Hidden)
    }

    fn push(&self, var: VarId, binding: Binding) -> Env {
        Env {
            head: Some(Rc::new(Frame {
                var,
                binding,
                parent: self.clone(),
            })),
        }
    }

    /// Find the innermost binding of `var`.
    pub fn lookup(&self, var: VarId) -> Option<ThunkRef> {
        let mut cursor = self.head.as_ref();
        while let Some(frame) = cursor {
            if frame.var == var {
                return match &frame.binding {
                    Binding::Bound(thunk) => Some(thunk.clone()),
                    Binding::Hidden => None,
                };
            }
            cursor = frame.parent.head.as_ref();
        }
        None
    }

    /// Number of frames in the chain.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.head.as_ref();
        while let Some(frame) = cursor {
            depth += 1;
            cursor = frame.parent.head.as_ref();
        }
        depth
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env").field("depth", &self.depth()).finish()
    }
}

// Tear down uniquely owned frames through a worklist. A frame can own a
// deferred argument whose captured environment is another chain, or a forced
// closure holding one; the derived drop would recurse through all of them.
impl Drop for Env {
    fn drop(&mut self) {
        let mut pending: Vec<Rc<Frame>> = self.head.take().into_iter().collect();
        while let Some(frame) = pending.pop() {
            let mut frame = match Rc::try_unwrap(frame) {
                Ok(frame) => frame,
                Err(_) => continue,
            };
            pending.extend(frame.parent.head.take());
            if let Binding::Bound(thunk) = std::mem::replace(&mut frame.binding, Binding::Hidden) {
                if let Ok(cell) = Rc::try_unwrap(thunk) {
                    detach_thunk(cell.into_inner(), &mut pending);
                }
            }
        }
    }
}

fn detach_thunk(thunk: Thunk, pending: &mut Vec<Rc<Frame>>) {
    match thunk {
        Thunk::Unevaluated { mut env, .. } => pending.extend(env.head.take()),
        Thunk::Forced(Value::Closure(closure)) => {
            if let Ok(mut closure) = Rc::try_unwrap(closure) {
                pending.extend(closure.env.head.take());
            }
        }
        Thunk::Forced(_) => {}
    }
}
