//! Partially specified anims.
//!
//! Builders such as `lerp().end(10.0).dt(2.0)` cannot produce a node until the
//! missing parameters are known. They return an [`IncompleteAnim`] instead, which
//! is completed later from context: a slot supplies its current value as `start`
//! and the clock supplies `startt`, a chain supplies the previous segment's
//! `end`/`endt`.

use std::collections::BTreeSet;
use std::fmt;

use crate::anim::Anim;
use crate::arith::IncompleteArithmetic;
use crate::chain::Chain;
use crate::clock::Clock;
use crate::error::{AnimError, Result};
use crate::interp::{Easing, ExtendMode, Interpolate, Timing};

/// Names a completion can report as missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Param {
    Start,
    End,
    Startt,
    Endt,
    Extend,
    Method,
}

impl Param {
    pub const ALL: [Param; 6] = [
        Param::Start,
        Param::End,
        Param::Startt,
        Param::Endt,
        Param::Extend,
        Param::Method,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Param::Start => "start",
            Param::End => "end",
            Param::Startt => "startt",
            Param::Endt => "endt",
            Param::Extend => "extend",
            Param::Method => "method",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress source for an interpolation that may itself still be incomplete.
#[derive(Clone, Debug)]
pub enum Driver {
    Anim(Anim),
    Incomplete(Box<IncompleteAnim>),
}

impl Driver {
    /// Resolve the driver, completing it over `[0, 1]` and starting at the clock if needed.
    pub fn force(&self, clock: &Clock) -> Result<Anim> {
        match self {
            Driver::Anim(anim) => Ok(anim.clone()),
            Driver::Incomplete(inc) => inc.force_complete(&Params::unit_range(), clock),
        }
    }
}

impl From<Anim> for Driver {
    fn from(anim: Anim) -> Self {
        Driver::Anim(anim)
    }
}

impl From<f32> for Driver {
    fn from(value: f32) -> Self {
        Driver::Anim(Anim::constant(value))
    }
}

impl From<IncompleteAnim> for Driver {
    fn from(inc: IncompleteAnim) -> Self {
        Driver::Incomplete(Box::new(inc))
    }
}

impl From<Completion> for Driver {
    fn from(c: Completion) -> Self {
        match c {
            Completion::Complete(anim) => Driver::Anim(anim),
            Completion::Incomplete(inc) => Driver::Incomplete(Box::new(inc)),
        }
    }
}

/// Named interpolation parameters; `None` means "not supplied".
#[derive(Clone, Debug, Default)]
pub struct Params {
    pub start: Option<Anim>,
    pub end: Option<Anim>,
    pub startt: Option<f32>,
    pub endt: Option<f32>,
    pub dt: Option<f32>,
    pub t: Option<Driver>,
    pub extend: Option<ExtendMode>,
    pub method: Option<String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// `start = 0, end = 1`, used to complete progress drivers.
    pub fn unit_range() -> Self {
        Self::new().start(0.0).end(1.0)
    }

    pub fn start(mut self, start: impl Into<Anim>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn end(mut self, end: impl Into<Anim>) -> Self {
        self.end = Some(end.into());
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

    pub fn dt(mut self, dt: f32) -> Self {
        self.dt = Some(dt);
        self
    }

    pub fn t(mut self, t: impl Into<Driver>) -> Self {
        self.t = Some(t.into());
        self
    }

    pub fn extend(mut self, extend: ExtendMode) -> Self {
        self.extend = Some(extend);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn has(&self, param: Param) -> bool {
        match param {
            Param::Start => self.start.is_some(),
            Param::End => self.end.is_some(),
            Param::Startt => self.startt.is_some(),
            Param::Endt => self.endt.is_some(),
            Param::Extend => self.extend.is_some(),
            Param::Method => self.method.is_some(),
        }
    }

    fn fill_from(&mut self, other: &Params, param: Param) {
        match param {
            Param::Start => self.start = other.start.clone(),
            Param::End => self.end = other.end.clone(),
            Param::Startt => self.startt = other.startt,
            Param::Endt => self.endt = other.endt,
            Param::Extend => self.extend = other.extend,
            Param::Method => self.method = other.method.clone(),
        }
    }
}

/// An interpolation waiting for some of its parameters.
#[derive(Clone, Debug)]
pub struct IncompleteInterpolate {
    params: Params,
    missing: BTreeSet<Param>,
}

impl IncompleteInterpolate {
    pub fn new(params: Params) -> Self {
        let missing = Param::ALL
            .iter()
            .copied()
            .filter(|p| !params.has(*p))
            .collect();
        Self { params, missing }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn missing(&self) -> impl Iterator<Item = Param> + '_ {
        self.missing.iter().copied()
    }

    pub fn missing_names(&self) -> Vec<&'static str> {
        self.missing().map(Param::name).collect()
    }

    pub fn known_end(&self) -> Option<Anim> {
        self.params.end.clone()
    }

    pub fn known_endt(&self) -> Option<f32> {
        self.params.endt
    }

    /// Merge `args` into the missing parameters only. Returns a node when nothing is
    /// left missing, otherwise a new incomplete value. `self` is not modified.
    pub fn complete(&self, args: &Params) -> Result<Completion> {
        let mut params = self.params.clone();
        let mut missing = self.missing.clone();
        for param in self.missing.iter().copied() {
            if args.has(param) {
                params.fill_from(args, param);
                missing.remove(&param);
            }
        }

        if params.endt.is_none() {
            if let (Some(startt), Some(dt)) = (params.startt, params.dt) {
                params.endt = Some(startt + dt);
                missing.remove(&Param::Endt);
            }
        }
        if params.startt.is_none() {
            if let (Some(endt), Some(dt)) = (params.endt, params.dt) {
                params.startt = Some(endt - dt);
                missing.remove(&Param::Startt);
            }
        }

        if let Some(driver) = params.t.take() {
            missing.remove(&Param::Startt);
            missing.remove(&Param::Endt);
            params.t = Some(match driver {
                Driver::Incomplete(inc) => inc.complete(&Params::unit_range())?.into(),
                anim => anim,
            });
        }

        let driver_pending = matches!(params.t, Some(Driver::Incomplete(_)));
        if !missing.is_empty() || driver_pending {
            return Ok(Completion::Incomplete(IncompleteAnim::Interpolate(Self {
                params,
                missing,
            })));
        }
        build_interpolate(&params, None).map(Completion::Complete)
    }

    /// Like [`complete`](Self::complete) but `startt` defaults to the clock's time and
    /// an incomplete result is an error naming what is still missing.
    pub fn force_complete(&self, args: &Params, clock: &Clock) -> Result<Anim> {
        let mut args = args.clone();
        if args.startt.is_none() {
            args.startt = Some(clock.get_time());
        }
        match self.complete(&args)? {
            Completion::Complete(anim) => Ok(anim),
            Completion::Incomplete(IncompleteAnim::Interpolate(inc)) if inc.missing.is_empty() => {
                build_interpolate(&inc.params, Some(clock))
            }
            Completion::Incomplete(inc) => Err(AnimError::MissingArguments {
                missing: inc.missing_names(),
            }),
        }
    }
}

fn build_interpolate(params: &Params, clock: Option<&Clock>) -> Result<Anim> {
    let start = params
        .start
        .clone()
        .ok_or_else(|| AnimError::missing([Param::Start]))?;
    let end = params
        .end
        .clone()
        .ok_or_else(|| AnimError::missing([Param::End]))?;
    let extend = params
        .extend
        .ok_or_else(|| AnimError::missing([Param::Extend]))?;
    let method = params
        .method
        .as_deref()
        .ok_or_else(|| AnimError::missing([Param::Method]))?;
    let easing = Easing::lookup(method)?;

    let timing = match (&params.t, clock) {
        (Some(Driver::Anim(t)), _) => Timing::driven(t.clone()),
        (Some(driver @ Driver::Incomplete(_)), Some(clock)) => Timing::driven(driver.force(clock)?),
        (Some(Driver::Incomplete(inc)), None) => {
            return Err(AnimError::MissingArguments {
                missing: inc.missing_names(),
            })
        }
        (None, _) => {
            let startt = params
                .startt
                .ok_or_else(|| AnimError::missing([Param::Startt]))?;
            let endt = params
                .endt
                .ok_or_else(|| AnimError::missing([Param::Endt]))?;
            Timing::clock(startt, endt)?
        }
    };
    Ok(Interpolate::new(start, end, timing, easing, extend).into_anim())
}

/// A chain with at least one incomplete segment.
#[derive(Clone, Debug)]
pub struct IncompleteChain {
    segments: Vec<Completion>,
}

impl IncompleteChain {
    pub fn new(segments: Vec<Completion>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Completion] {
        &self.segments
    }

    /// Complete segments left to right. Each segment's known `end`/`endt` seed the
    /// next segment's `start`/`startt`; unknown ones clear the seed.
    pub fn complete(&self, args: &Params) -> Result<Completion> {
        let mut args = args.clone();
        let mut segments = Vec::with_capacity(self.segments.len());
        let mut complete = true;
        for segment in &self.segments {
            let segment = match segment {
                Completion::Incomplete(inc) => inc.complete(&args)?,
                done => done.clone(),
            };
            match &segment {
                Completion::Complete(anim) => seed_from(&mut args, anim),
                Completion::Incomplete(inc) => {
                    args.start = inc.known_end();
                    args.startt = inc.known_endt();
                    complete = false;
                }
            }
            segments.push(segment);
        }

        if !complete {
            return Ok(Completion::Incomplete(IncompleteAnim::Chain(Self { segments })));
        }
        let anims = segments
            .into_iter()
            .filter_map(Completion::into_anim)
            .collect();
        Ok(Completion::Complete(Chain::new(anims)?.into_anim()))
    }

    /// Force every segment in order. Only the first segment can fall back to the
    /// clock for `startt`; later ones inherit the previous `endt`.
    pub fn force_complete(&self, args: &Params, clock: &Clock) -> Result<Anim> {
        let mut args = args.clone();
        if args.startt.is_none() {
            args.startt = Some(clock.get_time());
        }
        let mut anims = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let anim = segment.force_with(&args, clock)?;
            seed_from(&mut args, &anim);
            anims.push(anim);
        }
        Ok(Chain::new(anims)?.into_anim())
    }

    fn missing_names(&self) -> Vec<&'static str> {
        self.segments
            .iter()
            .find_map(|s| match s {
                Completion::Incomplete(inc) => Some(inc.missing_names()),
                Completion::Complete(_) => None,
            })
            .unwrap_or_default()
    }
}

fn seed_from(args: &mut Params, anim: &Anim) {
    args.start = anim.segment_end();
    args.startt = anim.segment_times().map(|(_, endt)| endt);
}

#[derive(Clone, Debug)]
pub enum IncompleteAnim {
    Interpolate(IncompleteInterpolate),
    Chain(IncompleteChain),
    Arithmetic(IncompleteArithmetic),
}

impl IncompleteAnim {
    pub fn complete(&self, args: &Params) -> Result<Completion> {
        match self {
            IncompleteAnim::Interpolate(inc) => inc.complete(args),
            IncompleteAnim::Chain(inc) => inc.complete(args),
            IncompleteAnim::Arithmetic(inc) => inc.complete(args),
        }
    }

    pub fn force_complete(&self, args: &Params, clock: &Clock) -> Result<Anim> {
        match self {
            IncompleteAnim::Interpolate(inc) => inc.force_complete(args, clock),
            IncompleteAnim::Chain(inc) => inc.force_complete(args, clock),
            IncompleteAnim::Arithmetic(inc) => inc.force_complete(args, clock),
        }
    }

    pub fn missing_names(&self) -> Vec<&'static str> {
        match self {
            IncompleteAnim::Interpolate(inc) => inc.missing_names(),
            IncompleteAnim::Chain(inc) => inc.missing_names(),
            IncompleteAnim::Arithmetic(inc) => inc.missing_names(),
        }
    }

    pub fn known_end(&self) -> Option<Anim> {
        match self {
            IncompleteAnim::Interpolate(inc) => inc.known_end(),
            IncompleteAnim::Chain(_) | IncompleteAnim::Arithmetic(_) => None,
        }
    }

    pub fn known_endt(&self) -> Option<f32> {
        match self {
            IncompleteAnim::Interpolate(inc) => inc.known_endt(),
            IncompleteAnim::Chain(_) | IncompleteAnim::Arithmetic(_) => None,
        }
    }
}

/// Outcome of a completion attempt.
#[derive(Clone, Debug)]
pub enum Completion {
    Complete(Anim),
    Incomplete(IncompleteAnim),
}

impl Completion {
    pub fn is_complete(&self) -> bool {
        matches!(self, Completion::Complete(_))
    }

    pub fn into_anim(self) -> Option<Anim> {
        match self {
            Completion::Complete(anim) => Some(anim),
            Completion::Incomplete(_) => None,
        }
    }

    pub fn as_incomplete(&self) -> Option<&IncompleteAnim> {
        match self {
            Completion::Complete(_) => None,
            Completion::Incomplete(inc) => Some(inc),
        }
    }

    /// Force completion with no extra arguments.
    pub fn force(&self, clock: &Clock) -> Result<Anim> {
        self.force_with(&Params::default(), clock)
    }

    pub fn force_with(&self, args: &Params, clock: &Clock) -> Result<Anim> {
        match self {
            Completion::Complete(anim) => Ok(anim.clone()),
            Completion::Incomplete(inc) => inc.force_complete(args, clock),
        }
    }
}

impl From<Anim> for Completion {
    fn from(anim: Anim) -> Self {
        Completion::Complete(anim)
    }
}

impl From<IncompleteAnim> for Completion {
    fn from(inc: IncompleteAnim) -> Self {
        Completion::Incomplete(inc)
    }
}

impl From<f32> for Completion {
    fn from(value: f32) -> Self {
        Completion::Complete(Anim::constant(value))
    }
}
