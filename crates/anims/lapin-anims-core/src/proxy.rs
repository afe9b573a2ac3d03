//! Rebindable indirection: every reader of a proxy sees whatever it currently points at.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::warn;

use crate::anim::{Anim, AnimNode, Sample};
use crate::assign::{Assignment, Resolved};
use crate::clock::Clock;
use crate::error::Result;

pub struct ProxyNode {
    target: Rc<RefCell<Anim>>,
    busy: Cell<bool>,
    last: Rc<Cell<Option<f32>>>,
    initial: f32,
}

impl ProxyNode {
    /// A proxy that ends up reading itself gets its last value, or the value it was
    /// created with, instead of recursing.
    pub(crate) fn sample(&self, now: f32) -> Result<Sample> {
        if self.busy.get() {
            let value = self.last.get().unwrap_or(self.initial);
            warn!("circular proxy read; returning cached value {value}");
            return Ok(Sample::live(value));
        }
        let target = self.target.borrow().clone();
        self.busy.set(true);
        let sample = target.sample(now);
        self.busy.set(false);
        let value = sample?.value;
        self.last.set(Some(value));
        Ok(Sample::live(value))
    }
}

impl fmt::Debug for ProxyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("target", &*self.target.borrow())
            .finish()
    }
}

/// Owner side of a proxy. Hand out [`AnimProxy::anim`] to readers and retarget
/// them all at once with [`AnimProxy::set`].
pub struct AnimProxy {
    target: Rc<RefCell<Anim>>,
    last: Rc<Cell<Option<f32>>>,
    anim: Anim,
    clock: Clock,
}

impl AnimProxy {
    pub fn new(value: f32, clock: &Clock) -> Self {
        let target = Rc::new(RefCell::new(Anim::constant(value)));
        let last = Rc::new(Cell::new(None));
        let anim = Anim::new(AnimNode::Proxy(ProxyNode {
            target: target.clone(),
            busy: Cell::new(false),
            last: last.clone(),
            initial: value,
        }));
        Self {
            target,
            last,
            anim,
            clock: clock.clone(),
        }
    }

    /// Point the proxy at a value, callback or anim. Incomplete anims start from
    /// the proxy's current value.
    pub fn set(&self, value: impl Into<Assignment>) -> Result<()> {
        let next = match value.into().resolve(|| self.get(), &self.clock)? {
            Resolved::Value(v) => {
                self.last.set(None);
                Anim::constant(v)
            }
            Resolved::Anim(anim) => anim,
        };
        *self.target.borrow_mut() = next;
        Ok(())
    }

    pub fn get(&self) -> Result<f32> {
        self.anim.get(&self.clock)
    }

    /// Shared anim that always reads the current target.
    pub fn anim(&self) -> Anim {
        self.anim.clone()
    }

    pub fn target(&self) -> Anim {
        self.target.borrow().clone()
    }
}

impl fmt::Debug for AnimProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimProxy")
            .field("target", &*self.target.borrow())
            .finish_non_exhaustive()
    }
}
