//! Cubic Bézier curves over static control points.

use crate::anim::{Anim, AnimNode, Sample};
use crate::clock::Clock;
use crate::error::{AnimError, Result};

use super::{ExtendMode, Timing};

/// Cubic Bézier basis evaluated at progress `u`.
#[inline]
pub fn cubic_bezier(p: [f32; 4], u: f32) -> f32 {
    let v = 1.0 - u;
    v * v * v * p[0] + 3.0 * v * v * u * p[1] + 3.0 * v * u * u * p[2] + u * u * u * p[3]
}

#[derive(Clone, Debug)]
pub struct CubicBezier {
    points: [f32; 4],
    timing: Timing,
    extend: ExtendMode,
}

impl CubicBezier {
    pub fn new(points: [f32; 4], timing: Timing, extend: ExtendMode) -> Self {
        Self {
            points,
            timing,
            extend,
        }
    }

    pub fn into_anim(self) -> Anim {
        Anim::new(AnimNode::Bezier(self))
    }

    pub fn points(&self) -> [f32; 4] {
        self.points
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn extend(&self) -> ExtendMode {
        self.extend
    }

    pub(crate) fn sample(&self, now: f32) -> Result<Sample> {
        let (u, frozen) = self.timing.progress(now)?;
        if self.extend == ExtendMode::Constant && u >= 1.0 {
            return Ok(Sample {
                value: self.points[3],
                settled: frozen || self.timing.is_clock(),
            });
        }
        Ok(Sample {
            value: cubic_bezier(self.points, self.extend.remap(u)),
            settled: frozen,
        })
    }
}

/// Parameters for one or more Bézier nodes sharing a time range.
#[derive(Clone, Debug)]
pub struct Bezier3Builder {
    components: Vec<[f32; 4]>,
    startt: Option<f32>,
    endt: Option<f32>,
    dt: Option<f32>,
    t: Option<Anim>,
    extend: ExtendMode,
}

/// Curve through `p0` and `p3`, pulled toward `p1` and `p2`.
pub fn bezier3(p0: f32, p1: f32, p2: f32, p3: f32) -> Bezier3Builder {
    Bezier3Builder::from_components(vec![[p0, p1, p2, p3]])
}

/// One curve per component. All control point slices must have the same length.
pub fn bezier3_components(
    p0: &[f32],
    p1: &[f32],
    p2: &[f32],
    p3: &[f32],
) -> Result<Bezier3Builder> {
    let n = p0.len();
    if p1.len() != n || p2.len() != n || p3.len() != n {
        return Err(AnimError::invalid(format!(
            "control points must have matching lengths (got {}, {}, {}, {})",
            p0.len(),
            p1.len(),
            p2.len(),
            p3.len()
        )));
    }
    Ok(Bezier3Builder::from_components(
        (0..n).map(|i| [p0[i], p1[i], p2[i], p3[i]]).collect(),
    ))
}

impl Bezier3Builder {
    fn from_components(components: Vec<[f32; 4]>) -> Self {
        Self {
            components,
            startt: None,
            endt: None,
            dt: None,
            t: None,
            extend: ExtendMode::Constant,
        }
    }

    pub fn startt(mut self, startt: f32) -> Self {
        self.startt = Some(startt);
        self
    }

    pub fn endt(mut self, endt: f32) -> Self {
        self.endt = Some(endt);
        self
    }

    pub fn dt(mut self, dt: f32) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Drive progress from another anim instead of the clock.
    pub fn t(mut self, t: impl Into<Anim>) -> Self {
        self.t = Some(t.into());
        self
    }

    pub fn extend(mut self, extend: ExtendMode) -> Self {
        self.extend = extend;
        self
    }

    fn timing(&self, clock: &Clock) -> Result<Timing> {
        if let Some(t) = &self.t {
            return Ok(Timing::driven(t.clone()));
        }
        let startt = self.startt.unwrap_or_else(|| clock.get_time());
        let endt = match (self.endt, self.dt) {
            (Some(endt), _) => endt,
            (None, Some(dt)) => startt + dt,
            (None, None) => return Err(AnimError::invalid("either dt or endt must be given")),
        };
        Timing::clock(startt, endt)
    }

    /// Build a single curve. A missing `startt` defaults to the clock's time.
    pub fn build(self, clock: &Clock) -> Result<Anim> {
        if self.components.len() != 1 {
            return Err(AnimError::invalid(format!(
                "expected one component, got {}; use build_components",
                self.components.len()
            )));
        }
        let mut anims = self.build_components(clock)?;
        anims
            .pop()
            .ok_or_else(|| AnimError::invalid("bezier3 has no components"))
    }

    pub fn build_components(self, clock: &Clock) -> Result<Vec<Anim>> {
        let timing = self.timing(clock)?;
        Ok(self
            .components
            .iter()
            .map(|&points| CubicBezier::new(points, timing.clone(), self.extend).into_anim())
            .collect())
    }
}
