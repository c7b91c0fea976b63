//! TiltDrift Session Engine
//!
//! Owns the tracking lifecycle: registration (start), paced sample
//! consumption, pause/resume, and unregistration (stop). A session wires a
//! sensor feed through the tilt tracker into an animation driver, owning
//! the filter state explicitly for the whole run.

pub mod layout;
pub mod session;

pub use layout::{FixedLayout, LayoutProvider, SharedLayout};
pub use session::{SessionConfig, SessionState, TrackingSession};
