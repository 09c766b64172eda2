//! Transformation component
//!
//! Pure data: translation, per-axis scaling and Euler rotation angles.

use crate::foundation::math::{Mat4, Vec3};

/// Spatial placement of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformationComponent {
    /// World space position
    pub translation: Vec3,

    /// Scale factors per axis
    pub scaling: Vec3,

    /// Rotation angles in radians around X, Y and Z
    pub rotation: Vec3,
}

impl Default for TransformationComponent {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            scaling: Vec3::new(1.0, 1.0, 1.0),
            rotation: Vec3::zeros(),
        }
    }
}

impl TransformationComponent {
    /// Identity placement
    pub fn new() -> Self {
        Self::default()
    }

    /// Placement at `translation` with unit scale and no rotation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Set the scale factors
    pub const fn with_scaling(mut self, scaling: Vec3) -> Self {
        self.scaling = scaling;
        self
    }

    /// Set the rotation angles
    pub const fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Translation matrix
    pub fn translation_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translation)
    }

    /// Scaling matrix
    pub fn scaling_matrix(&self) -> Mat4 {
        Mat4::new_nonuniform_scaling(&self.scaling)
    }

    /// Rotation matrices around X, Y and Z
    pub fn rotation_matrices(&self) -> [Mat4; 3] {
        [
            Mat4::from_axis_angle(&Vec3::x_axis(), self.rotation.x),
            Mat4::from_axis_angle(&Vec3::y_axis(), self.rotation.y),
            Mat4::from_axis_angle(&Vec3::z_axis(), self.rotation.z),
        ]
    }

    /// Combined model matrix: translate * rotX * rotY * rotZ * scale
    pub fn model_matrix(&self) -> Mat4 {
        let [rx, ry, rz] = self.rotation_matrices();
        self.translation_matrix() * rx * ry * rz * self.scaling_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_has_unit_scale() {
        let transform = TransformationComponent::default();
        assert_eq!(transform.scaling, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(transform.model_matrix(), Mat4::identity());
    }

    #[test]
    fn test_model_matrix_moves_origin() {
        let transform = TransformationComponent::from_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_scaling(Vec3::new(2.0, 2.0, 2.0));

        let origin = transform.model_matrix().transform_point(&nalgebra::Point3::origin());
        assert_relative_eq!(origin.x, 1.0);
        assert_relative_eq!(origin.y, 2.0);
        assert_relative_eq!(origin.z, 3.0);
    }
}
