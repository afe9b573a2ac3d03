//! Shared time source that every anim evaluation reads.
//!
//! A [`Clock`] is a cheap, cloneable handle. Clones observe the same time, while
//! separately constructed clocks drive independent simulations.

use std::cell::Cell;
use std::rc::Rc;

use log::warn;

use crate::config::Config;

#[derive(Clone, Debug)]
pub struct Clock {
    time: Rc<Cell<f32>>,
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    pub fn starting_at(time: f32) -> Self {
        Self {
            time: Rc::new(Cell::new(time)),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::starting_at(cfg.start_time)
    }

    #[inline]
    pub fn get_time(&self) -> f32 {
        self.time.get()
    }

    #[inline]
    pub fn set_time(&self, time: f32) {
        self.time.set(time);
    }

    /// Advance (or rewind, for negative `dt`) the clock.
    ///
    /// Non-finite deltas are ignored.
    pub fn add_time(&self, dt: f32) {
        if !dt.is_finite() {
            warn!("ignoring non-finite clock delta {dt}");
            return;
        }
        self.time.set(self.time.get() + dt);
    }

    /// True when both handles share the same underlying time.
    pub fn same_as(&self, other: &Clock) -> bool {
        Rc::ptr_eq(&self.time, &other.time)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
