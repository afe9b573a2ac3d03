//! Easing curves applied to remapped progress.
//!
//! Every curve maps `0 -> 0` and `1 -> 1`. `back` overshoots and `bounce`
//! revisits the endpoints in between; both are evaluated without clamping.

use std::f32::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimError;

const BACK_OVERSHOOT: f32 = 1.70158;
const BACK_IN_OUT_SCALE: f32 = 1.525;

/// Interpolation curve. Names follow the builder that produces them:
/// `ease_*` for symmetric in-out curves, `ease_in_*`/`ease_out_*` for one-sided ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    #[default]
    Lerp,
    InOutSine,
    InSine,
    OutSine,
    InOutQuad,
    InQuad,
    OutQuad,
    InOutCubic,
    InCubic,
    OutCubic,
    InOutCirc,
    InCirc,
    OutCirc,
    InOutBack,
    InBack,
    OutBack,
    InOutBounce,
    InBounce,
    OutBounce,
    InExponential,
}

impl Easing {
    pub const ALL: [Easing; 20] = [
        Easing::Lerp,
        Easing::InOutSine,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutQuad,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutCubic,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCirc,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutBack,
        Easing::InBack,
        Easing::OutBack,
        Easing::InOutBounce,
        Easing::InBounce,
        Easing::OutBounce,
        Easing::InExponential,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Easing::Lerp => "lerp",
            Easing::InOutSine => "ease_sine",
            Easing::InSine => "ease_in_sine",
            Easing::OutSine => "ease_out_sine",
            Easing::InOutQuad => "ease_quad",
            Easing::InQuad => "ease_in_quad",
            Easing::OutQuad => "ease_out_quad",
            Easing::InOutCubic => "ease_cubic",
            Easing::InCubic => "ease_in_cubic",
            Easing::OutCubic => "ease_out_cubic",
            Easing::InOutCirc => "ease_circ",
            Easing::InCirc => "ease_in_circ",
            Easing::OutCirc => "ease_out_circ",
            Easing::InOutBack => "ease_back",
            Easing::InBack => "ease_in_back",
            Easing::OutBack => "ease_out_back",
            Easing::InOutBounce => "ease_bounce",
            Easing::InBounce => "ease_in_bounce",
            Easing::OutBounce => "ease_out_bounce",
            Easing::InExponential => "ease_in_exponential",
        }
    }

    /// Resolve a full curve name such as `"ease_out_quad"`.
    pub fn lookup(name: &str) -> Result<Self, AnimError> {
        match name {
            "linear" => return Ok(Easing::Lerp),
            "exponential" => return Ok(Easing::InExponential),
            _ => {}
        }
        Easing::ALL
            .iter()
            .copied()
            .find(|e| e.name() == name)
            .ok_or_else(|| AnimError::UnknownEasing {
                name: name.to_string(),
            })
    }

    /// Map progress `t` through the curve.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Lerp => t,
            Easing::InSine => 1.0 - (t * PI * 0.5).cos(),
            Easing::OutSine => (t * PI * 0.5).sin(),
            Easing::InOutSine => -(t * PI).cos() * 0.5 + 0.5,
            Easing::InExponential => (t.exp() - 1.0) / (E - 1.0),
            Easing::InQuad => t * t,
            Easing::OutQuad => -t * t + 2.0 * t,
            Easing::InOutQuad => {
                if t < 0.5 {
                    t * t * 2.0
                } else {
                    -2.0 * t * t + 4.0 * t - 1.0
                }
            }
            Easing::InCubic => t * t * t,
            Easing::OutCubic => (t - 1.0).powi(3) + 1.0,
            Easing::InOutCubic => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t.powi(3)
                } else {
                    0.5 * (t - 2.0).powi(3) + 1.0
                }
            }
            Easing::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Easing::OutCirc => {
                let t = t - 1.0;
                (1.0 - t * t).sqrt()
            }
            Easing::InOutCirc => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * (1.0 - (1.0 - t * t).sqrt())
                } else {
                    let t = t - 2.0;
                    0.5 * ((1.0 - t * t).sqrt() + 1.0)
                }
            }
            Easing::InBack => {
                let s = BACK_OVERSHOOT;
                t * t * ((s + 1.0) * t - s)
            }
            Easing::OutBack => {
                let s = BACK_OVERSHOOT;
                let t = t - 1.0;
                t * t * ((s + 1.0) * t + s) + 1.0
            }
            Easing::InOutBack => {
                let s = BACK_OVERSHOOT * BACK_IN_OUT_SCALE;
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * (t * t * ((s + 1.0) * t - s))
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
                }
            }
            Easing::InBounce => 1.0 - out_bounce(1.0 - t),
            Easing::OutBounce => out_bounce(t),
            Easing::InOutBounce => {
                if t < 0.5 {
                    0.5 - out_bounce(1.0 - t * 2.0) * 0.5
                } else {
                    out_bounce(t * 2.0 - 1.0) * 0.5 + 0.5
                }
            }
        }
    }
}

#[inline]
fn out_bounce(t: f32) -> f32 {
    const K: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        K * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        K * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        K * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        K * t * t + 0.984375
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::lookup(s)
    }
}

impl TryFrom<String> for Easing {
    type Error = AnimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Easing::lookup(&value)
    }
}

impl From<Easing> for String {
    fn from(value: Easing) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn every_curve_hits_its_endpoints() {
        for easing in Easing::ALL {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn symmetric_curves_pass_through_half() {
        for easing in [
            Easing::InOutSine,
            Easing::InOutQuad,
            Easing::InOutCubic,
            Easing::InOutCirc,
            Easing::InOutBack,
            Easing::InOutBounce,
        ] {
            assert_abs_diff_eq!(easing.apply(0.5), 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn one_sided_shapes() {
        assert_abs_diff_eq!(Easing::InQuad.apply(0.5), 0.25);
        assert_abs_diff_eq!(Easing::OutQuad.apply(0.5), 0.75);
        assert!(Easing::InBack.apply(0.2) < 0.0);
        assert!(Easing::OutBack.apply(0.8) > 1.0);
    }

    #[test]
    fn names_round_trip_and_aliases_resolve() {
        for easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>().unwrap(), easing);
        }
        assert_eq!(Easing::lookup("linear").unwrap(), Easing::Lerp);
        assert_eq!(
            Easing::lookup("exponential").unwrap(),
            Easing::InExponential
        );
        let err = Easing::lookup("ease_wobble").unwrap_err();
        assert_eq!(err.category(), "easing");
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Easing::OutBounce).unwrap();
        assert_eq!(json, "\"ease_out_bounce\"");
        let back: Easing = serde_json::from_str("\"ease_circ\"").unwrap();
        assert_eq!(back, Easing::InOutCirc);
        assert!(serde_json::from_str::<Easing>("\"ease_nope\"").is_err());
    }
}
