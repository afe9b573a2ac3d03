//! The [`Anim`] handle and the closed set of node kinds behind it.
//!
//! Anims are reference-counted so a node can feed several parents (an interpolation
//! endpoint, a chain segment, a rate target) without copying. Evaluation goes through
//! [`Anim::sample`], which reports the value at the query time together with whether the
//! node will keep returning it forever.

use std::fmt;
use std::rc::Rc;

use crate::arith::Arithmetic;
use crate::chain::Chain;
use crate::clock::Clock;
use crate::error::Result;
use crate::interp::{CubicBezier, Interpolate};
use crate::pointer::Pointer;
use crate::proxy::ProxyNode;
use crate::rate::Rate;
use crate::slot::SlotReader;
use crate::wrap::Wrap;

/// Result of evaluating a node at one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub value: f32,
    /// The node returns `value` for every later query time.
    pub settled: bool,
}

impl Sample {
    #[inline]
    pub fn live(value: f32) -> Self {
        Self {
            value,
            settled: false,
        }
    }

    #[inline]
    pub fn settled(value: f32) -> Self {
        Self {
            value,
            settled: true,
        }
    }
}

/// Every kind of node an [`Anim`] can wrap.
pub enum AnimNode {
    Const(f32),
    /// Arbitrary user callback, evaluated on every read.
    Func(Rc<dyn Fn() -> f32>),
    Interpolate(Interpolate),
    Bezier(CubicBezier),
    Chain(Chain),
    Arithmetic(Arithmetic),
    Wrap(Wrap),
    Pointer(Pointer),
    Rate(Rate),
    SlotReader(SlotReader),
    Proxy(ProxyNode),
}

impl AnimNode {
    pub fn kind(&self) -> &'static str {
        match self {
            AnimNode::Const(_) => "const",
            AnimNode::Func(_) => "func",
            AnimNode::Interpolate(_) => "interpolate",
            AnimNode::Bezier(_) => "bezier3",
            AnimNode::Chain(_) => "chain",
            AnimNode::Arithmetic(_) => "arithmetic",
            AnimNode::Wrap(_) => "wrap",
            AnimNode::Pointer(_) => "pointer",
            AnimNode::Rate(_) => "rate",
            AnimNode::SlotReader(_) => "slot_reader",
            AnimNode::Proxy(_) => "proxy",
        }
    }

    fn sample(&self, now: f32) -> Result<Sample> {
        match self {
            AnimNode::Const(v) => Ok(Sample::settled(*v)),
            AnimNode::Func(f) => Ok(Sample::live(f())),
            AnimNode::Interpolate(node) => node.sample(now),
            AnimNode::Bezier(node) => node.sample(now),
            AnimNode::Chain(node) => node.sample(now),
            AnimNode::Arithmetic(node) => node.sample(now),
            AnimNode::Wrap(node) => node.sample(now),
            AnimNode::Pointer(node) => node.sample(),
            AnimNode::Rate(node) => node.sample(now),
            AnimNode::SlotReader(node) => node.sample(now),
            AnimNode::Proxy(node) => node.sample(now),
        }
    }
}

impl fmt::Debug for AnimNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimNode::Const(v) => f.debug_tuple("Const").field(v).finish(),
            AnimNode::Func(_) => f.write_str("Func(..)"),
            AnimNode::Interpolate(node) => fmt::Debug::fmt(node, f),
            AnimNode::Bezier(node) => fmt::Debug::fmt(node, f),
            AnimNode::Chain(node) => fmt::Debug::fmt(node, f),
            AnimNode::Arithmetic(node) => fmt::Debug::fmt(node, f),
            AnimNode::Wrap(node) => fmt::Debug::fmt(node, f),
            AnimNode::Pointer(node) => fmt::Debug::fmt(node, f),
            AnimNode::Rate(node) => fmt::Debug::fmt(node, f),
            AnimNode::SlotReader(node) => fmt::Debug::fmt(node, f),
            AnimNode::Proxy(node) => fmt::Debug::fmt(node, f),
        }
    }
}

/// Shared handle to an anim node.
#[derive(Clone)]
pub struct Anim {
    node: Rc<AnimNode>,
}

impl Anim {
    pub fn new(node: AnimNode) -> Self {
        Self {
            node: Rc::new(node),
        }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(AnimNode::Const(value))
    }

    /// Wrap a callback that is invoked on every read.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn() -> f32 + 'static,
    {
        Self::new(AnimNode::Func(Rc::new(f)))
    }

    pub(crate) fn from_shared_func(f: Rc<dyn Fn() -> f32>) -> Self {
        Self::new(AnimNode::Func(f))
    }

    #[inline]
    pub fn node(&self) -> &AnimNode {
        &self.node
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// True when both handles point at the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Anim) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    pub fn as_interpolate(&self) -> Option<&Interpolate> {
        match self.node() {
            AnimNode::Interpolate(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_chain(&self) -> Option<&Chain> {
        match self.node() {
            AnimNode::Chain(node) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub fn sample(&self, now: f32) -> Result<Sample> {
        self.node.sample(now)
    }

    #[inline]
    pub fn evaluate(&self, now: f32) -> Result<f32> {
        self.sample(now).map(|s| s.value)
    }

    /// Evaluate at the clock's current time.
    #[inline]
    pub fn get(&self, clock: &Clock) -> Result<f32> {
        self.evaluate(clock.get_time())
    }

    /// `(startt, endt)` of a clock-timed interpolation-family node.
    pub(crate) fn segment_times(&self) -> Option<(f32, f32)> {
        match self.node() {
            AnimNode::Interpolate(node) => node.timing().bounds(),
            AnimNode::Bezier(node) => node.timing().bounds(),
            _ => None,
        }
    }

    /// The value an interpolation-family node rests on once it has finished.
    pub(crate) fn segment_end(&self) -> Option<Anim> {
        match self.node() {
            AnimNode::Interpolate(node) => Some(node.end().clone()),
            AnimNode::Bezier(node) => Some(Anim::constant(node.points()[3])),
            _ => None,
        }
    }
}

impl fmt::Debug for Anim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.node(), f)
    }
}

impl From<f32> for Anim {
    fn from(value: f32) -> Self {
        Anim::constant(value)
    }
}

impl From<&Anim> for Anim {
    fn from(anim: &Anim) -> Self {
        anim.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn const_is_settled() {
        let a = Anim::constant(6.0);
        assert_eq!(a.sample(123.0).unwrap(), Sample::settled(6.0));
        assert_eq!(a.kind(), "const");
    }

    #[test]
    fn func_reads_every_time() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let a = Anim::func(move || {
            counter.set(counter.get() + 1);
            4.0
        });
        assert_eq!(a.evaluate(0.0).unwrap(), 4.0);
        assert_eq!(a.evaluate(0.0).unwrap(), 4.0);
        assert_eq!(calls.get(), 2);
        assert!(!a.sample(0.0).unwrap().settled);
    }

    #[test]
    fn clones_share_the_node() {
        let a = Anim::constant(1.0);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Anim::constant(1.0)));
    }

    #[test]
    fn get_reads_the_clock() {
        let clock = Clock::starting_at(3.0);
        let a = Anim::func(|| 9.0);
        assert_eq!(a.get(&clock).unwrap(), 9.0);
    }
}
