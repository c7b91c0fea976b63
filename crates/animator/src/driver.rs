//! Animation drivers: consumers of tracker targets.

use tiltdrift_motion_model::animation::AnimationSpec;
use tiltdrift_motion_model::geometry::Offset;
use tiltdrift_motion_model::sample::TimestampNs;

use crate::tween::Tween;

/// Accepts a target translation, an easing curve, and a duration, and owns
/// getting the avatar there frame by frame.
///
/// The tracker hands every emitted offset to a driver and never looks back;
/// in particular, stopping sample delivery does not cancel an in-flight
/// transition — that is the driver owner's call.
pub trait AnimationDriver {
    /// Begin moving toward `target` per `spec`, starting at `now_ns`.
    fn animate_to(&mut self, target: Offset, spec: &AnimationSpec, now_ns: TimestampNs);
}

/// A retargeting tween driver.
///
/// Each `animate_to` starts a fresh tween *from the currently animated
/// position* at call time, so a rapid stream of targets produces continuous
/// motion instead of jumps back to stale origins.
#[derive(Debug, Default)]
pub struct TweenAnimator {
    current: Offset,
    active: Option<Tween>,
}

impl TweenAnimator {
    /// Create an animator resting at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an animator resting at a given position.
    pub fn at(position: Offset) -> Self {
        Self {
            current: position,
            active: None,
        }
    }

    /// The animated position at `now_ns`.
    pub fn position_at(&self, now_ns: TimestampNs) -> Offset {
        match &self.active {
            Some(tween) => tween.position_at(now_ns),
            None => self.current,
        }
    }

    /// The target of the in-flight tween, if any.
    pub fn target(&self) -> Option<Offset> {
        self.active.as_ref().map(|t| t.to)
    }

    /// Freeze at the current animated position, abandoning the target.
    pub fn cancel(&mut self, now_ns: TimestampNs) {
        if let Some(tween) = self.active.take() {
            self.current = tween.position_at(now_ns);
            tracing::debug!(x = self.current.x, y = self.current.y, "Animation cancelled");
        }
    }

    /// Sample the in-flight tween at a fixed frame rate for previews.
    ///
    /// Returns `(timestamp_ns, position)` pairs covering the tween's full
    /// duration, ending exactly on the target. An idle animator yields a
    /// single resting frame.
    pub fn sample_frames(&self, fps: f64) -> Vec<(TimestampNs, Offset)> {
        let Some(tween) = &self.active else {
            return vec![(0, self.current)];
        };

        let fps = fps.max(1.0);
        let step_ns = (1_000_000_000.0 / fps) as u64;
        let end_ns = tween.start_ns + tween.spec.duration_ns();

        let mut frames = Vec::new();
        let mut t = tween.start_ns;
        while t < end_ns {
            frames.push((t, tween.position_at(t)));
            t += step_ns.max(1);
        }
        frames.push((end_ns, tween.to));
        frames
    }
}

impl AnimationDriver for TweenAnimator {
    fn animate_to(&mut self, target: Offset, spec: &AnimationSpec, now_ns: TimestampNs) {
        let from = self.position_at(now_ns);
        self.current = from;
        self.active = Some(Tween::new(from, target, now_ns, *spec));
    }
}

/// A driver that records every target it is handed. Test and replay sink.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    /// Every `(now_ns, target, spec)` received, in order.
    pub calls: Vec<(TimestampNs, Offset, AnimationSpec)>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent target, if any call was made.
    pub fn last_target(&self) -> Option<Offset> {
        self.calls.last().map(|(_, target, _)| *target)
    }
}

impl AnimationDriver for RecordingDriver {
    fn animate_to(&mut self, target: Offset, spec: &AnimationSpec, now_ns: TimestampNs) {
        self.calls.push((now_ns, target, *spec));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiltdrift_motion_model::animation::Easing;

    fn linear_spec(duration_ms: u64) -> AnimationSpec {
        AnimationSpec::new(duration_ms, Easing::Linear)
    }

    #[test]
    fn test_retarget_starts_from_animated_position() {
        let mut animator = TweenAnimator::new();
        let spec = linear_spec(100);

        animator.animate_to(Offset::new(10.0, 0.0), &spec, 0);

        // Halfway through, retarget. The new tween must begin at (5, 0).
        animator.animate_to(Offset::new(0.0, 10.0), &spec, 50_000_000);
        let at_retarget = animator.position_at(50_000_000);
        assert!((at_retarget.x - 5.0).abs() < 1e-9);
        assert!(at_retarget.y.abs() < 1e-9);

        // And lands on the new target.
        assert_eq!(animator.position_at(150_000_000), Offset::new(0.0, 10.0));
    }

    #[test]
    fn test_cancel_freezes_mid_flight() {
        let mut animator = TweenAnimator::new();
        animator.animate_to(Offset::new(10.0, 10.0), &linear_spec(100), 0);

        animator.cancel(50_000_000);
        assert_eq!(animator.target(), None);

        let frozen = animator.position_at(999_000_000);
        assert!((frozen.x - 5.0).abs() < 1e-9);
        assert!((frozen.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_idle_animator_rests() {
        let animator = TweenAnimator::at(Offset::new(2.0, 3.0));
        assert_eq!(animator.position_at(0), Offset::new(2.0, 3.0));
        assert_eq!(animator.position_at(u64::MAX), Offset::new(2.0, 3.0));
        assert_eq!(animator.target(), None);
    }

    #[test]
    fn test_sample_frames_cover_tween_and_end_on_target() {
        let mut animator = TweenAnimator::new();
        let target = Offset::new(8.0, -8.0);
        animator.animate_to(target, &linear_spec(120), 0);

        let frames = animator.sample_frames(60.0);
        assert!(frames.len() >= 7, "120 ms at 60 fps, got {}", frames.len());
        assert_eq!(frames[0], (0, Offset::ZERO));
        assert_eq!(frames.last().unwrap().1, target);
    }

    #[test]
    fn test_recording_driver_keeps_order() {
        let mut driver = RecordingDriver::new();
        let spec = AnimationSpec::default();

        driver.animate_to(Offset::new(1.0, 1.0), &spec, 0);
        driver.animate_to(Offset::new(2.0, 2.0), &spec, 20_000_000);

        assert_eq!(driver.calls.len(), 2);
        assert_eq!(driver.last_target(), Some(Offset::new(2.0, 2.0)));
        assert_eq!(driver.calls[0].0, 0);
    }
}
