//! A single eased transition between two offsets.

use tiltdrift_motion_model::animation::AnimationSpec;
use tiltdrift_motion_model::geometry::Offset;
use tiltdrift_motion_model::sample::TimestampNs;

/// One in-flight transition from a start offset to a target.
///
/// Positions are evaluated on demand from a timestamp; a tween holds no
/// clock of its own. At or after the end of its duration the position snaps
/// exactly to the target, so easing round-off can never leave the avatar
/// short of where it was sent. An overshoot curve may place intermediate
/// positions beyond the target; that is the curve's contract — boundary
/// clamping constrains targets, not tween interiors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Position the transition started from.
    pub from: Offset,

    /// Target position.
    pub to: Offset,

    /// When the transition began.
    pub start_ns: TimestampNs,

    /// Duration and easing curve.
    pub spec: AnimationSpec,
}

impl Tween {
    /// Begin a transition at `start_ns`.
    pub fn new(from: Offset, to: Offset, start_ns: TimestampNs, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            start_ns,
            spec,
        }
    }

    /// Evaluate the animated position at `now_ns`.
    ///
    /// Before the start the position is `from`; a zero-duration spec snaps
    /// to `to` immediately.
    pub fn position_at(&self, now_ns: TimestampNs) -> Offset {
        if now_ns < self.start_ns {
            return self.from;
        }
        let duration_ns = self.spec.duration_ns();
        let elapsed = now_ns - self.start_ns;
        if duration_ns == 0 || elapsed >= duration_ns {
            return self.to;
        }

        let progress = elapsed as f64 / duration_ns as f64;
        let eased = self.spec.easing.apply(progress);
        Offset {
            x: self.from.x + (self.to.x - self.from.x) * eased,
            y: self.from.y + (self.to.y - self.from.y) * eased,
        }
    }

    /// Whether the transition has reached its target at `now_ns`.
    pub fn finished(&self, now_ns: TimestampNs) -> bool {
        now_ns >= self.start_ns + self.spec.duration_ns()
    }
}
