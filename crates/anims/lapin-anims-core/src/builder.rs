//! Construction functions: `lerp`, `ease`, `ease_in`, `ease_out` and `chain`.
//!
//! Builders return a [`Completion`]: a finished anim when every parameter is known,
//! otherwise an incomplete anim that a slot or chain fills in later.

use crate::anim::Anim;
use crate::error::{AnimError, Result};
use crate::incomplete::{Completion, Driver, IncompleteChain, IncompleteInterpolate, Params};
use crate::interp::ExtendMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Curve {
    Lerp,
    Ease,
    EaseIn,
    EaseOut,
}

#[derive(Clone, Debug)]
enum Endpoint {
    One(Anim),
    Many(Vec<Anim>),
}

impl Endpoint {
    fn component(&self, i: usize) -> Anim {
        match self {
            Endpoint::One(anim) => anim.clone(),
            Endpoint::Many(anims) => anims[i].clone(),
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            Endpoint::One(_) => None,
            Endpoint::Many(anims) => Some(anims.len()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct InterpolateBuilder {
    curve: Curve,
    method: String,
    start: Option<Endpoint>,
    end: Option<Endpoint>,
    startt: Option<f32>,
    endt: Option<f32>,
    dt: Option<f32>,
    t: Option<Driver>,
    extend: ExtendMode,
}

/// Linear interpolation from `start` to `end` between `startt` and `endt`.
pub fn lerp() -> InterpolateBuilder {
    InterpolateBuilder::new(Curve::Lerp)
}

/// Symmetric easing. The curve defaults to `sine`.
pub fn ease() -> InterpolateBuilder {
    InterpolateBuilder::new(Curve::Ease)
}

pub fn ease_in() -> InterpolateBuilder {
    InterpolateBuilder::new(Curve::EaseIn)
}

pub fn ease_out() -> InterpolateBuilder {
    InterpolateBuilder::new(Curve::EaseOut)
}

impl InterpolateBuilder {
    fn new(curve: Curve) -> Self {
        Self {
            curve,
            method: "sine".to_string(),
            start: None,
            end: None,
            startt: None,
            endt: None,
            dt: None,
            t: None,
            extend: ExtendMode::Constant,
        }
    }

    pub fn start(mut self, start: impl Into<Anim>) -> Self {
        self.start = Some(Endpoint::One(start.into()));
        self
    }

    pub fn end(mut self, end: impl Into<Anim>) -> Self {
        self.end = Some(Endpoint::One(end.into()));
        self
    }

    pub fn start_components<I>(mut self, start: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Anim>,
    {
        self.start = Some(Endpoint::Many(start.into_iter().map(Into::into).collect()));
        self
    }

    pub fn end_components<I>(mut self, end: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Anim>,
    {
        self.end = Some(Endpoint::Many(end.into_iter().map(Into::into).collect()));
        self
    }

    pub fn startt(mut self, startt: f32) -> Self {
        self.startt = Some(startt);
        self
    }

    pub fn endt(mut self, endt: f32) -> Self {
        self.endt = Some(endt);
        self
    }

    /// Duration; combined with whichever of `startt`/`endt` is known.
    pub fn dt(mut self, dt: f32) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Read progress from another anim instead of the clock.
    pub fn t(mut self, t: impl Into<Driver>) -> Self {
        self.t = Some(t.into());
        self
    }

    pub fn extend(mut self, extend: ExtendMode) -> Self {
        self.extend = extend;
        self
    }

    /// Easing family (`sine`, `quad`, `cubic`, `circ`, `back`, `bounce`, and
    /// `exponential` for `ease_in`). Resolved when the anim completes. Ignored by `lerp`.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    fn method_name(&self) -> String {
        match self.curve {
            Curve::Lerp => "lerp".to_string(),
            Curve::Ease => format!("ease_{}", self.method),
            Curve::EaseIn => format!("ease_in_{}", self.method),
            Curve::EaseOut => format!("ease_out_{}", self.method),
        }
    }

    fn params(&self, start: Option<Anim>, end: Option<Anim>) -> Params {
        Params {
            start,
            end,
            startt: self.startt,
            endt: self.endt,
            dt: self.dt,
            t: self.t.clone(),
            extend: Some(self.extend),
            method: Some(self.method_name()),
        }
    }

    /// Build a single scalar anim.
    pub fn build(self) -> Result<Completion> {
        let one = |e: &Option<Endpoint>| match e {
            None => Ok(None),
            Some(Endpoint::One(anim)) => Ok(Some(anim.clone())),
            Some(Endpoint::Many(_)) => Err(AnimError::invalid(
                "component endpoints need build_components",
            )),
        };
        let params = self.params(one(&self.start)?, one(&self.end)?);
        IncompleteInterpolate::new(params).complete(&Params::new())
    }

    /// One completion per component. Scalar endpoints are shared by every component.
    pub fn build_components(self) -> Result<Vec<Completion>> {
        let count = match (
            self.start.as_ref().and_then(Endpoint::len),
            self.end.as_ref().and_then(Endpoint::len),
        ) {
            (Some(a), Some(b)) if a != b => {
                return Err(AnimError::invalid(format!(
                    "start has {a} components but end has {b}"
                )))
            }
            (Some(n), _) | (None, Some(n)) => n,
            (None, None) => 1,
        };
        (0..count)
            .map(|i| {
                let start = self.start.as_ref().map(|e| e.component(i));
                let end = self.end.as_ref().map(|e| e.component(i));
                IncompleteInterpolate::new(self.params(start, end)).complete(&Params::new())
            })
            .collect()
    }
}

/// Run segments back to back. Segments missing `start`/`startt` inherit the
/// previous segment's `end`/`endt`.
pub fn chain<I>(segments: I) -> Result<Completion>
where
    I: IntoIterator,
    I::Item: Into<Completion>,
{
    IncompleteChain::new(segments.into_iter().map(Into::into).collect()).complete(&Params::new())
}

/// Chain per component. Every inner list is one segment's components and all
/// of them must have the same length.
pub fn chain_components(segments: Vec<Vec<Completion>>) -> Result<Vec<Completion>> {
    let Some(count) = segments.first().map(Vec::len) else {
        return Err(AnimError::invalid("chain needs at least one segment"));
    };
    if let Some(bad) = segments.iter().find(|s| s.len() != count) {
        return Err(AnimError::invalid(format!(
            "all segments must have the same number of components ({count} vs {})",
            bad.len()
        )));
    }
    (0..count)
        .map(|i| chain(segments.iter().map(|s| s[i].clone())))
        .collect()
}
