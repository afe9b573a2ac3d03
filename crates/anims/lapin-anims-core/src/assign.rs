//! Values that can be written into a slot or proxy.

use std::fmt;
use std::rc::Rc;

use crate::anim::Anim;
use crate::clock::Clock;
use crate::error::Result;
use crate::incomplete::{Completion, IncompleteAnim, Params};

/// Right-hand side of a slot or proxy assignment.
#[derive(Clone)]
pub enum Assignment {
    Value(f32),
    Anim(Anim),
    /// Completed on assignment with the target's current value as `start` and the
    /// clock's time as `startt`.
    Incomplete(IncompleteAnim),
    Func(Rc<dyn Fn() -> f32>),
}

impl Assignment {
    pub fn func<F>(f: F) -> Self
    where
        F: Fn() -> f32 + 'static,
    {
        Assignment::Func(Rc::new(f))
    }

    /// `current` is only called when an incomplete anim needs a starting value.
    pub(crate) fn resolve<F>(self, current: F, clock: &Clock) -> Result<Resolved>
    where
        F: FnOnce() -> Result<f32>,
    {
        Ok(match self {
            Assignment::Value(v) => Resolved::Value(v),
            Assignment::Anim(anim) => Resolved::Anim(anim),
            Assignment::Func(f) => Resolved::Anim(Anim::from_shared_func(f)),
            Assignment::Incomplete(inc) => {
                let args = Params::new().start(current()?);
                Resolved::Anim(inc.force_complete(&args, clock)?)
            }
        })
    }
}

pub(crate) enum Resolved {
    Value(f32),
    Anim(Anim),
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Assignment::Anim(a) => f.debug_tuple("Anim").field(a).finish(),
            Assignment::Incomplete(inc) => f.debug_tuple("Incomplete").field(inc).finish(),
            Assignment::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<f32> for Assignment {
    fn from(v: f32) -> Self {
        Assignment::Value(v)
    }
}

impl From<Anim> for Assignment {
    fn from(anim: Anim) -> Self {
        Assignment::Anim(anim)
    }
}

impl From<&Anim> for Assignment {
    fn from(anim: &Anim) -> Self {
        Assignment::Anim(anim.clone())
    }
}

impl From<IncompleteAnim> for Assignment {
    fn from(inc: IncompleteAnim) -> Self {
        Assignment::Incomplete(inc)
    }
}

impl From<Completion> for Assignment {
    fn from(c: Completion) -> Self {
        match c {
            Completion::Complete(anim) => Assignment::Anim(anim),
            Completion::Incomplete(inc) => Assignment::Incomplete(inc),
        }
    }
}
