//! Movement components: velocity and acceleration
//!
//! Both are applied once per tick by the reference systems, without any time
//! step scaling.

use crate::foundation::math::Vec3;

/// Displacement applied to the translation each tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityComponent {
    /// Units per tick
    pub velocity: Vec3,
}

impl VelocityComponent {
    /// Create a velocity component
    pub const fn new(velocity: Vec3) -> Self {
        Self { velocity }
    }
}

/// Change applied to the velocity each tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelerationComponent {
    /// Units per tick squared
    pub acceleration: Vec3,
}

impl AccelerationComponent {
    /// Create an acceleration component
    pub const fn new(acceleration: Vec3) -> Self {
        Self { acceleration }
    }
}
