//! Stage geometry: layout queries, movement bounds, and clamped offsets.
//!
//! Offsets are translations away from the avatar's resting center, in
//! pixels. The movable region is symmetric around that center and derived
//! per sample from the current layout — never cached, so container resizes
//! take effect on the very next sample.

use serde::{Deserialize, Serialize};

/// A 2D translation target in stage pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    /// The resting position (no displacement).
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the resting position.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Linear interpolation between two offsets.
    pub fn lerp(a: Offset, b: Offset, t: f64) -> Offset {
        let t = t.clamp(0.0, 1.0);
        Offset {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::ZERO
    }
}

/// The container and avatar dimensions at the moment a sample is processed.
///
/// Supplied by the layout provider as a read-only query per sample. A
/// container dimension of zero means layout has not happened yet; updates
/// are skipped entirely in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageLayout {
    /// Container width in pixels.
    pub container_width: f64,
    /// Container height in pixels.
    pub container_height: f64,
    /// Avatar width in pixels.
    pub avatar_width: f64,
    /// Avatar height in pixels.
    pub avatar_height: f64,
}

impl StageLayout {
    pub fn new(
        container_width: f64,
        container_height: f64,
        avatar_width: f64,
        avatar_height: f64,
    ) -> Self {
        Self {
            container_width,
            container_height,
            avatar_width,
            avatar_height,
        }
    }

    /// Whether the container has been laid out.
    ///
    /// False when either container dimension is zero; processing a sample
    /// against an unlaid-out stage is skipped without touching any state.
    pub fn is_laid_out(&self) -> bool {
        self.container_width > 0.0 && self.container_height > 0.0
    }

    /// Half-extents of the movable region for the avatar's center.
    ///
    /// `max_x = container_width/2 - avatar_width/2`, likewise for y, floored
    /// at zero so an avatar as large as its container yields a degenerate
    /// zero-movement region instead of an inverted range.
    pub fn bounds(&self) -> MotionBounds {
        MotionBounds {
            max_x: ((self.container_width - self.avatar_width) / 2.0).max(0.0),
            max_y: ((self.container_height - self.avatar_height) / 2.0).max(0.0),
        }
    }
}

/// Half-extents of the movable region, both always >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionBounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl MotionBounds {
    /// Clamp a target displacement into the movable region.
    pub fn clamp(&self, target: Offset) -> Offset {
        Offset {
            x: target.x.clamp(-self.max_x, self.max_x),
            y: target.y.clamp(-self.max_y, self.max_y),
        }
    }

    /// Whether an offset already lies inside the region.
    pub fn contains(&self, offset: Offset) -> bool {
        offset.x.abs() <= self.max_x && offset.y.abs() <= self.max_y
    }

    /// True when no movement is possible on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.max_x == 0.0 && self.max_y == 0.0
    }
}
