use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// Pacing curve for animated viewport jobs.
///
/// Every curve is monotonic non-decreasing on `[0, 1]` and maps 0 to 0 and
/// 1 to 1 exactly; inputs outside `[0, 1]` are clamped first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    #[default]
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
}

impl Easing {
    #[must_use]
    pub fn ease(self, progress: f64) -> f64 {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if t == 0.0 || t == 1.0 {
            return t;
        }

        let eased = match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOutQuad => in_out(t, |u| u * u),
            Self::EaseInCubic => t.powi(3),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => in_out(t, |u| u.powi(3)),
            Self::EaseInQuart => t.powi(4),
            Self::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Self::EaseInOutQuart => in_out(t, |u| u.powi(4)),
            Self::EaseInSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::EaseOutSine => (t * FRAC_PI_2).sin(),
            Self::EaseInOutSine => in_out(t, |u| 1.0 - (u * FRAC_PI_2).cos()),
            Self::EaseInExpo => expo_in(t),
            Self::EaseOutExpo => 1.0 - expo_in(1.0 - t),
            Self::EaseInOutExpo => in_out(t, expo_in),
            Self::EaseInCirc => circ_in(t),
            Self::EaseOutCirc => 1.0 - circ_in(1.0 - t),
            Self::EaseInOutCirc => in_out(t, circ_in),
        };
        eased.clamp(0.0, 1.0)
    }
}

/// Mirrors an ease-in curve into an ease-in-out curve.
fn in_out(t: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    if t < 0.5 {
        ease_in(t * 2.0) / 2.0
    } else {
        1.0 - ease_in((1.0 - t) * 2.0) / 2.0
    }
}

/// Exponential ease-in rescaled so `expo_in(0) == 0` exactly.
fn expo_in(t: f64) -> f64 {
    let floor = 2f64.powf(-10.0);
    (2f64.powf(10.0 * (t - 1.0)) - floor) / (1.0 - floor)
}

fn circ_in(t: f64) -> f64 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}
