//! Sequences of clock-timed interpolations.

use crate::anim::{Anim, AnimNode, Sample};
use crate::error::{AnimError, Result};

#[derive(Clone, Debug)]
pub struct Segment {
    pub anim: Anim,
    pub startt: f32,
    pub endt: f32,
}

/// Plays its segments back to back.
///
/// Before the first segment starts, that segment is evaluated as-is so its own
/// extend mode applies. After the last one ends, the last `end` is held.
#[derive(Clone, Debug)]
pub struct Chain {
    segments: Vec<Segment>,
}

impl Chain {
    /// Segments must be clock-timed interpolations or Bézier curves, ordered by `startt`.
    pub fn new(anims: Vec<Anim>) -> Result<Self> {
        if anims.is_empty() {
            return Err(AnimError::invalid("chain needs at least one segment"));
        }
        let mut segments = Vec::with_capacity(anims.len());
        for (i, anim) in anims.into_iter().enumerate() {
            let Some((startt, endt)) = anim.segment_times() else {
                return Err(AnimError::invalid(format!(
                    "chain segment {i} must be a clock-timed interpolation, got {}",
                    anim.kind()
                )));
            };
            if let Some(prev) = segments.last().map(|s: &Segment| s.startt) {
                if startt < prev {
                    return Err(AnimError::invalid(format!(
                        "chain segment {i} starts at {startt}, \
                         before the previous segment ({prev})"
                    )));
                }
            }
            segments.push(Segment { anim, startt, endt });
        }
        Ok(Self { segments })
    }

    pub fn into_anim(self) -> Anim {
        Anim::new(AnimNode::Chain(self))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn sample(&self, now: f32) -> Result<Sample> {
        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            return Err(AnimError::invalid("chain has no segments"));
        };
        if now.is_nan() || now < first.startt {
            return first.anim.sample(now).map(|s| Sample::live(s.value));
        }
        if now >= last.endt {
            return match last.anim.segment_end() {
                Some(end) => end.sample(now),
                None => last.anim.sample(now),
            };
        }
        // last segment that has started; gaps keep evaluating the previous one
        let idx = self.segments.partition_point(|s| s.startt <= now) - 1;
        self.segments[idx].anim.sample(now).map(|s| Sample::live(s.value))
    }
}
