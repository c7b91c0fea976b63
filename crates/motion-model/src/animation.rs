//! Easing curves and the contract handed to animation drivers.
//!
//! The tracker emits a *target* offset; reaching it over time is the
//! driver's job. An [`AnimationSpec`] carries everything a driver needs:
//! the transition duration and the easing curve shape.

use serde::{Deserialize, Serialize};

/// Easing curve applied to a tween's progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum Easing {
    /// Constant-rate interpolation.
    Linear,

    /// Symmetric acceleration and deceleration.
    EaseInOut,

    /// Springy settle that transiently exceeds the target.
    ///
    /// `f(t) = (t-1)^2 * ((tension+1)*(t-1) + tension) + 1`
    ///
    /// Starts at 0, ends exactly at 1, and for tension > 0 peaks above 1 on
    /// the way in, which reads as a subtle bounce. Tension 0 degenerates to
    /// a plain cubic ease-out.
    Overshoot { tension: f64 },
}

impl Easing {
    /// Evaluate the curve at progress `t`, with `t` clamped to [0, 1].
    ///
    /// Output is 0 at t=0 and 1 at t=1 for every curve; `Overshoot` may
    /// exceed 1 in between.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Overshoot { tension } => {
                let u = t - 1.0;
                u * u * ((tension + 1.0) * u + tension) + 1.0
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Overshoot {
            tension: DEFAULT_OVERSHOOT_TENSION,
        }
    }
}

/// Default overshoot tension for tilt-driven motion.
pub const DEFAULT_OVERSHOOT_TENSION: f64 = 0.6;

/// Default transition duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 120;

/// What an animation driver needs to reach a target: how long the
/// transition takes and which curve shapes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    /// Transition duration in milliseconds.
    pub duration_ms: u64,

    /// Easing curve for the transition.
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Duration in nanoseconds.
    pub fn duration_ns(&self) -> u64 {
        self.duration_ms * 1_000_000
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_curves_hit_endpoints() {
        let curves = [
            Easing::Linear,
            Easing::EaseInOut,
            Easing::Overshoot { tension: 0.6 },
            Easing::Overshoot { tension: 0.0 },
        ];
        for curve in curves {
            assert!(curve.apply(0.0).abs() < 1e-12, "{curve:?} start");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-12, "{curve:?} end");
        }
    }

    #[test]
    fn test_overshoot_peaks_above_one() {
        let curve = Easing::Overshoot { tension: 0.6 };
        // The analytic peak sits at t = 0.75 for this tension.
        let peak = curve.apply(0.75);
        assert!(peak > 1.0, "expected overshoot, got {peak}");
        assert!(peak < 1.05, "overshoot should be subtle, got {peak}");
    }

    #[test]
    fn test_zero_tension_never_exceeds_target() {
        let curve = Easing::Overshoot { tension: 0.0 };
        for i in 0..=100 {
            let v = curve.apply(i as f64 / 100.0);
            assert!(v <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_ease_in_out_midpoint() {
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_default_spec_matches_tilt_motion_tuning() {
        let spec = AnimationSpec::default();
        assert_eq!(spec.duration_ms, 120);
        assert_eq!(spec.duration_ns(), 120_000_000);
        assert_eq!(
            spec.easing,
            Easing::Overshoot { tension: 0.6 }
        );
    }

    #[test]
    fn test_spec_roundtrip() {
        let spec = AnimationSpec::new(200, Easing::EaseInOut);
        let json = serde_json::to_string(&spec).unwrap();
        let parsed: AnimationSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, parsed);
    }
}
