//! Time-remapped interpolation nodes.
//!
//! An interpolation turns a query time into normalized progress `u`, folds `u`
//! through an [`ExtendMode`], shapes it with an [`Easing`] curve and blends between
//! its endpoints. Progress comes either from the clock (`startt`/`endt`) or from
//! a driver anim that supplies `u` directly.

mod bezier;
mod easing;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::anim::{Anim, AnimNode, Sample};
use crate::error::{AnimError, Result};

pub use bezier::{bezier3, bezier3_components, Bezier3Builder, CubicBezier};
pub use easing::Easing;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// How progress outside `[0, 1]` is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendMode {
    /// Hold the endpoints.
    #[default]
    Constant,
    /// Continue the curve linearly past both ends.
    Extrapolate,
    /// Restart from 0 after every full period.
    Repeat,
    /// Ping-pong between 0 and 1.
    Reverse,
}

impl ExtendMode {
    pub fn name(self) -> &'static str {
        match self {
            ExtendMode::Constant => "constant",
            ExtendMode::Extrapolate => "extrapolate",
            ExtendMode::Repeat => "repeat",
            ExtendMode::Reverse => "reverse",
        }
    }

    /// Fold raw progress into the range the easing curve sees.
    pub fn remap(self, u: f32) -> f32 {
        match self {
            ExtendMode::Constant => u.clamp(0.0, 1.0),
            ExtendMode::Extrapolate => u,
            ExtendMode::Repeat => {
                // the end of the first period is reported as 1, later multiples wrap to 0
                if u == 1.0 {
                    1.0
                } else {
                    u - u.floor()
                }
            }
            ExtendMode::Reverse => {
                let u = u.abs();
                let whole = u.floor();
                let frac = u - whole;
                if whole.rem_euclid(2.0) == 1.0 {
                    1.0 - frac
                } else {
                    frac
                }
            }
        }
    }
}

impl fmt::Display for ExtendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtendMode {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "constant" => Ok(ExtendMode::Constant),
            "extrapolate" => Ok(ExtendMode::Extrapolate),
            "repeat" => Ok(ExtendMode::Repeat),
            "reverse" => Ok(ExtendMode::Reverse),
            other => Err(AnimError::invalid(format!("unknown extend mode {other:?}"))),
        }
    }
}

/// Source of normalized progress.
#[derive(Clone, Debug)]
pub enum Timing {
    /// Progress follows the query time between `startt` and `endt`.
    Clock { startt: f32, endt: f32 },
    /// Progress is read from another anim.
    Driven(Anim),
}

impl Timing {
    /// Clock timing over `[startt, endt]`. Fails unless `startt < endt`.
    pub fn clock(startt: f32, endt: f32) -> Result<Self> {
        if !startt.is_finite() || !endt.is_finite() {
            return Err(AnimError::invalid(format!(
                "time range must be finite (startt={startt}, endt={endt})"
            )));
        }
        if startt >= endt {
            return Err(AnimError::invalid(format!(
                "startt must be before endt (startt={startt}, endt={endt})"
            )));
        }
        Ok(Timing::Clock { startt, endt })
    }

    pub fn driven(t: Anim) -> Self {
        Timing::Driven(t)
    }

    /// `(startt, endt)` for clock timing.
    pub fn bounds(&self) -> Option<(f32, f32)> {
        match self {
            Timing::Clock { startt, endt } => Some((*startt, *endt)),
            Timing::Driven(_) => None,
        }
    }

    /// Raw progress at `now`, plus whether a driver reported it will not change again.
    pub(crate) fn progress(&self, now: f32) -> Result<(f32, bool)> {
        match self {
            Timing::Clock { startt, endt } => Ok(((now - startt) / (endt - startt), false)),
            Timing::Driven(t) => {
                let s = t.sample(now)?;
                Ok((s.value, s.settled))
            }
        }
    }

    pub(crate) fn is_clock(&self) -> bool {
        matches!(self, Timing::Clock { .. })
    }
}

/// Blend between two anims as progress runs from 0 to 1.
#[derive(Clone, Debug)]
pub struct Interpolate {
    start: Anim,
    end: Anim,
    timing: Timing,
    easing: Easing,
    extend: ExtendMode,
}

impl Interpolate {
    pub fn new(
        start: impl Into<Anim>,
        end: impl Into<Anim>,
        timing: Timing,
        easing: Easing,
        extend: ExtendMode,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            timing,
            easing,
            extend,
        }
    }

    pub fn into_anim(self) -> Anim {
        Anim::new(AnimNode::Interpolate(self))
    }

    pub fn start(&self) -> &Anim {
        &self.start
    }

    pub fn end(&self) -> &Anim {
        &self.end
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn startt(&self) -> Option<f32> {
        self.timing.bounds().map(|(s, _)| s)
    }

    pub fn endt(&self) -> Option<f32> {
        self.timing.bounds().map(|(_, e)| e)
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn extend(&self) -> ExtendMode {
        self.extend
    }

    pub(crate) fn sample(&self, now: f32) -> Result<Sample> {
        let (u, frozen) = self.timing.progress(now)?;
        let start = self.start.sample(now)?;
        let end = self.end.sample(now)?;
        let operands = start.settled && end.settled;

        if self.extend == ExtendMode::Constant {
            if u <= 0.0 {
                return Ok(Sample {
                    value: start.value,
                    settled: frozen && operands,
                });
            }
            if u >= 1.0 {
                return Ok(Sample {
                    value: end.value,
                    settled: operands && (frozen || self.timing.is_clock()),
                });
            }
        }

        let x = self.easing.apply(self.extend.remap(u));
        Ok(Sample {
            value: lerp_f32(start.value, end.value, x),
            settled: frozen && operands,
        })
    }
}
