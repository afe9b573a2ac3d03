//! Rate of change of another anim.

use std::cell::Cell;

use crate::anim::{Anim, AnimNode, Sample};
use crate::clock::Clock;
use crate::error::Result;

#[derive(Clone, Copy, Debug)]
struct RateState {
    time: f32,
    value: f32,
    rate: f32,
}

/// Difference quotient between the two most recent reads at distinct times.
#[derive(Debug)]
pub struct Rate {
    target: Anim,
    state: Cell<Option<RateState>>,
}

impl Rate {
    pub fn target(&self) -> &Anim {
        &self.target
    }

    pub(crate) fn sample(&self, now: f32) -> Result<Sample> {
        // a NaN reference point would poison every later read
        if now.is_nan() {
            return Ok(Sample::live(self.state.get().map_or(0.0, |s| s.rate)));
        }
        let rate = match self.state.get() {
            Some(prev) if prev.time == now => prev.rate,
            Some(prev) => {
                let value = self.target.evaluate(now)?;
                let rate = (value - prev.value) / (now - prev.time);
                self.state.set(Some(RateState {
                    time: now,
                    value,
                    rate,
                }));
                rate
            }
            None => {
                let value = self.target.evaluate(now)?;
                self.state.set(Some(RateState {
                    time: now,
                    value,
                    rate: 0.0,
                }));
                0.0
            }
        };
        Ok(Sample::live(rate))
    }
}

/// Rate of `target`. The first read only records a reference point and returns 0.
pub fn rate(target: impl Into<Anim>) -> Anim {
    Anim::new(AnimNode::Rate(Rate {
        target: target.into(),
        state: Cell::new(None),
    }))
}

/// Like [`rate`], but the reference point is taken now, so the first later read
/// already reports a rate.
pub fn rate_since(target: impl Into<Anim>, clock: &Clock) -> Result<Anim> {
    let target = target.into();
    let now = clock.get_time();
    let value = target.evaluate(now)?;
    Ok(Anim::new(AnimNode::Rate(Rate {
        target,
        state: Cell::new(Some(RateState {
            time: now,
            value,
            rate: 0.0,
        })),
    })))
}
