//! TiltDrift Animator
//!
//! The tracker emits *targets*; this crate gets the avatar there. A
//! [`Tween`] interpolates between two offsets under an easing curve, and
//! [`TweenAnimator`] retargets mid-flight the way a view animation engine
//! does: each new target starts from wherever the avatar currently is, not
//! from where the last tween would have ended.
//!
//! Nothing here writes pixels. Drivers produce positions; whatever surface
//! embeds them decides how to paint.

pub mod driver;
pub mod tween;

pub use driver::{AnimationDriver, RecordingDriver, TweenAnimator};
pub use tween::Tween;
