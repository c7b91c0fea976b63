//! TiltDrift Tracker Core
//!
//! Turns raw accelerometer readings into smoothed, boundary-clamped avatar
//! offsets:
//! - **Filter:** Per-axis first-order low-pass smoothing with explicit state
//! - **Tracker:** Clamp, invert, filter, scale, and bound a single sample
//! - **Trajectory:** Offline replay of recorded traces plus statistics
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod filter;
pub mod tracker;
pub mod trajectory;

pub use filter::FilterState;
pub use tracker::{TiltTracker, TrackerConfig};
