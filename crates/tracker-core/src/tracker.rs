//! The tilt tracker: one sample in, one clamped offset out.
//!
//! [`TiltTracker::update`] is a pure function of the sample, the explicit
//! filter state, and the layout snapshot. It never animates, never sleeps,
//! and never fails on sample content — out-of-range readings are clamped,
//! not rejected.

use tiltdrift_common::error::{TiltdriftError, TiltdriftResult};
use tiltdrift_motion_model::geometry::{Offset, StageLayout};

use crate::filter::FilterState;

/// Tuning for the tilt-to-offset pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Low-pass smoothing factor, in (0, 1).
    pub alpha: f64,

    /// Displacement pixels per unit of filtered acceleration.
    pub sensitivity: f64,

    /// Symmetric clamp applied to raw axis readings (device units).
    pub max_tilt: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.15,
            sensitivity: 18.0,
            max_tilt: 1.8,
        }
    }
}

impl TrackerConfig {
    /// Validate tuning values, rejecting configurations that would make the
    /// filter diverge or freeze. Sample values are never validated — they
    /// are clamped — but configuration mistakes are surfaced here.
    pub fn validated(self) -> TiltdriftResult<Self> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(TiltdriftError::config(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if !self.sensitivity.is_finite() {
            return Err(TiltdriftError::config(format!(
                "sensitivity must be finite, got {}",
                self.sensitivity
            )));
        }
        if !(self.max_tilt > 0.0) || !self.max_tilt.is_finite() {
            return Err(TiltdriftError::config(format!(
                "max_tilt must be a positive finite value, got {}",
                self.max_tilt
            )));
        }
        Ok(self)
    }
}

/// Turns raw accelerometer axis readings into clamped translation targets.
pub struct TiltTracker {
    config: TrackerConfig,
}

impl TiltTracker {
    /// Create a tracker with the given tuning.
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Create a tracker with default tuning (alpha 0.15, 18 px/g, ±1.8 g).
    pub fn with_defaults() -> Self {
        Self::new(TrackerConfig::default())
    }

    /// The active tuning.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Process one raw accelerometer sample against the current layout.
    ///
    /// The x reading is sign-inverted so leftward tilt moves the avatar
    /// left under the sensor's native axis convention; both axes are then
    /// clamped to `[-max_tilt, max_tilt]` before filtering (the range is
    /// symmetric, so inversion and clamping commute).
    ///
    /// Returns `None` without touching `state` when the container has no
    /// layout yet (either dimension zero). Otherwise advances the filter,
    /// scales by sensitivity, and clamps the target into the movable
    /// region, which always yields |x| <= max_x and |y| <= max_y.
    pub fn update(
        &self,
        state: &mut FilterState,
        ax: f64,
        ay: f64,
        layout: &StageLayout,
    ) -> Option<Offset> {
        if !layout.is_laid_out() {
            return None;
        }

        let max_tilt = self.config.max_tilt;
        let x_input = (-ax).clamp(-max_tilt, max_tilt);
        let y_input = ay.clamp(-max_tilt, max_tilt);

        state.advance(x_input, y_input, self.config.alpha);

        let target = Offset::new(
            state.x * self.config.sensitivity,
            state.y * self.config.sensitivity,
        );

        Some(layout.bounds().clamp(target))
    }
}
