//! Collider component
//!
//! Colliders are axis-aligned rectangles in the XY plane. The velocity system
//! keeps them in step with the entity's translation.

use crate::foundation::math::{Rect, Vec2};

/// Axis-aligned collision bounds of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColliderComponent {
    /// Bounds in world space
    pub bounds: Rect,
}

impl ColliderComponent {
    /// Create a collider from its bounds
    pub const fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Create a collider from its minimum corner and size
    pub const fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(Rect::new(position, size))
    }
}
