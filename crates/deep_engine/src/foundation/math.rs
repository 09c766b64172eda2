//! Math utilities and types
//!
//! Provides the vector/matrix aliases used across the engine and the
//! axis-aligned rectangle used by colliders.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Axis-aligned rectangle, described by its lower corner and its extent
///
/// Collider bounds live in the XY plane; `position` is the minimum corner and
/// `size` is non-negative along both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner
    pub position: Vec2,

    /// Width and height
    pub size: Vec2,
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(Vec2::zeros(), Vec2::zeros())
    }
}

impl Rect {
    /// Create a rectangle from its minimum corner and size
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Create a rectangle from plain coordinates
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(width, height))
    }

    /// Minimum corner
    pub const fn min(&self) -> Vec2 {
        self.position
    }

    /// Maximum corner
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Center of the rectangle
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// True if the rectangles share a region of non-zero area
    ///
    /// Touching edges do not count as an overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Overlapping region of two rectangles, if any
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }

        let min = self.min().sup(&other.min());
        let max = self.max().inf(&other.max());
        Some(Self::new(min, max - min))
    }

    /// Move the rectangle by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}
