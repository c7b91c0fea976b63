//! TiltDrift Motion Model
//!
//! Defines the core data contracts for TiltDrift:
//! - **Samples:** Timestamped sensor events (readings, accuracy changes)
//! - **Geometry:** Stage layout, movement bounds, and clamped offsets
//! - **Animation:** Easing curves and the target/duration contract handed
//!   to animation drivers
//!
//! Axis readings are raw device units (approximately gravities for the
//! accelerometer); offsets are pixels in the stage's coordinate space.

pub mod animation;
pub mod geometry;
pub mod sample;

pub use animation::*;
pub use geometry::*;
pub use sample::*;
