//! Fold a parent anim's value into a half-open range.

use std::cell::Cell;
use std::rc::Rc;

use crate::anim::{Anim, AnimNode, Sample};
use crate::error::{AnimError, Result};

/// Bounds that can be changed after the wrap is built.
pub type SharedBounds = Rc<Cell<(f32, f32)>>;

#[derive(Clone, Debug)]
pub enum WrapBounds {
    /// Captured once at construction.
    Static(f32, f32),
    /// Re-read on every evaluation.
    Dynamic(SharedBounds),
}

impl WrapBounds {
    fn get(&self) -> (f32, f32) {
        match self {
            WrapBounds::Static(lo, hi) => (*lo, *hi),
            WrapBounds::Dynamic(bounds) => bounds.get(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Wrap {
    bounds: WrapBounds,
    parent: Anim,
}

impl Wrap {
    pub fn new(bounds: WrapBounds, parent: impl Into<Anim>) -> Self {
        Self {
            bounds,
            parent: parent.into(),
        }
    }

    pub fn into_anim(self) -> Anim {
        Anim::new(AnimNode::Wrap(self))
    }

    pub fn bounds(&self) -> &WrapBounds {
        &self.bounds
    }

    pub fn parent(&self) -> &Anim {
        &self.parent
    }

    pub(crate) fn sample(&self, now: f32) -> Result<Sample> {
        let (lo, hi) = self.bounds.get();
        let width = hi - lo;
        if width == 0.0 {
            return Err(AnimError::domain(format!("wrap bounds have zero width ({lo}, {hi})")));
        }
        let parent = self.parent.sample(now)?;
        let offset = parent.value - lo;
        let mut folded = offset - width * (offset / width).floor();
        // rounding can land exactly on the open end
        if folded == width {
            folded = 0.0;
        }
        Ok(Sample {
            value: lo + folded,
            settled: parent.settled && matches!(self.bounds, WrapBounds::Static(..)),
        })
    }
}

/// Wrap `parent` into `[bounds.0, bounds.1)`. With `static_bounds` the current bounds
/// are captured now; otherwise later changes to `bounds` are observed.
pub fn wrap(bounds: &SharedBounds, parent: impl Into<Anim>, static_bounds: bool) -> Anim {
    let bounds = if static_bounds {
        let (lo, hi) = bounds.get();
        WrapBounds::Static(lo, hi)
    } else {
        WrapBounds::Dynamic(bounds.clone())
    };
    Wrap::new(bounds, parent).into_anim()
}

/// One wrap per parent, all sharing `bounds`.
pub fn wrap_components<I>(bounds: &SharedBounds, parents: I, static_bounds: bool) -> Vec<Anim>
where
    I: IntoIterator,
    I::Item: Into<Anim>,
{
    parents
        .into_iter()
        .map(|p| wrap(bounds, p, static_bounds))
        .collect()
}
