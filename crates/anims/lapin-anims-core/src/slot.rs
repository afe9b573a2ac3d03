//! Attachment point for one animatable attribute.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::anim::{Anim, AnimNode, Sample};
use crate::assign::{Assignment, Resolved};
use crate::clock::Clock;
use crate::error::{AnimError, Result};

#[derive(Clone, Debug, Default)]
pub enum SlotState {
    /// Never assigned; reads as the slot default.
    #[default]
    Empty,
    Static(f32),
    Dynamic(Anim),
}

/// Holds either a value or an anim. Reading a settled anim replaces it with its
/// final value, so finished anims are dropped on the next read.
#[derive(Debug, Default)]
pub struct AnimSlot {
    state: RefCell<SlotState>,
    last: Cell<Option<f32>>,
    reading: Cell<bool>,
    default: f32,
}

impl AnimSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(default: f32) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    pub fn state(&self) -> Ref<'_, SlotState> {
        self.state.borrow()
    }

    /// The attached anim, if the slot is dynamic.
    pub fn anim(&self) -> Option<Anim> {
        match &*self.state.borrow() {
            SlotState::Dynamic(anim) => Some(anim.clone()),
            _ => None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(&*self.state.borrow(), SlotState::Dynamic(_))
    }

    /// Current value at `now`.
    ///
    /// A read that re-enters the same slot (an anim reading its own slot) returns the
    /// last value this slot produced, or its default, instead of recursing.
    pub fn read(&self, now: f32) -> Result<f32> {
        let anim = match &*self.state.borrow() {
            SlotState::Empty => return Ok(self.default),
            SlotState::Static(v) => return Ok(*v),
            SlotState::Dynamic(anim) => anim.clone(),
        };
        if self.reading.get() {
            let value = self.last.get().unwrap_or(self.default);
            warn!("circular anim read; returning cached value {value}");
            return Ok(value);
        }

        self.reading.set(true);
        let sample = anim.sample(now);
        self.reading.set(false);
        let sample = sample?;

        self.last.set(Some(sample.value));
        if sample.settled {
            let mut state = self.state.borrow_mut();
            let unchanged = matches!(&*state, SlotState::Dynamic(a) if a.ptr_eq(&anim));
            if unchanged {
                debug!("{} anim settled at {}; detaching", anim.kind(), sample.value);
                *state = SlotState::Static(sample.value);
            }
        }
        Ok(sample.value)
    }

    /// Store a plain value, dropping any attached anim.
    pub fn set_value(&self, value: f32) {
        *self.state.borrow_mut() = SlotState::Static(value);
        self.last.set(None);
    }

    pub fn set_anim(&self, anim: Anim) {
        *self.state.borrow_mut() = SlotState::Dynamic(anim);
    }

    /// Assign a value, anim, callback or incomplete anim. Incomplete anims start
    /// from the slot's current value at the clock's current time.
    pub fn assign(&self, value: impl Into<Assignment>, clock: &Clock) -> Result<()> {
        let resolved = self.resolve(value.into(), clock)?;
        self.store(resolved);
        Ok(())
    }

    /// Complete an assignment against this slot without writing it.
    pub(crate) fn resolve(&self, value: Assignment, clock: &Clock) -> Result<Resolved> {
        value.resolve(|| self.read(clock.get_time()), clock)
    }

    pub(crate) fn store(&self, resolved: Resolved) {
        match resolved {
            Resolved::Value(v) => self.set_value(v),
            Resolved::Anim(anim) => self.set_anim(anim),
        }
    }

    /// Anim that reads this slot. It does not keep the slot alive.
    pub fn reader(self: &Rc<Self>) -> Anim {
        Anim::new(AnimNode::SlotReader(SlotReader {
            slot: Rc::downgrade(self),
        }))
    }
}

#[derive(Debug)]
pub struct SlotReader {
    slot: Weak<AnimSlot>,
}

impl SlotReader {
    pub(crate) fn sample(&self, now: f32) -> Result<Sample> {
        let slot = self.slot.upgrade().ok_or(AnimError::SlotDropped)?;
        slot.read(now).map(Sample::live)
    }
}
