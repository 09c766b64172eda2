//! # Scene Camera
//!
//! A free-look camera described by a position and a viewing direction, with
//! yaw/pitch helpers for mouse-look controls.
//!
//! ## Design Principles
//! - **Library-agnostic**: no graphics API types in camera math
//! - **Plain data**: matrices are computed on demand, nothing is cached

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Vec3};

/// Pitch is clamped to this many degrees to keep the view matrix well defined
const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Camera attached to each scene
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Normalized viewing direction
    pub front: Vec3,

    /// Up vector for camera orientation
    pub up: Vec3,

    /// Yaw angle in degrees
    pub yaw: f32,

    /// Pitch angle in degrees
    pub pitch: f32,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    /// Create a camera looking along `front`
    ///
    /// Yaw and pitch are derived from the direction so that later
    /// [`Camera::rotate`] calls continue smoothly from it.
    pub fn new(position: Vec3, front: Vec3, up: Vec3) -> Self {
        let front = front.normalize();
        let pitch = front.y.asin().to_degrees();
        let yaw = front.z.atan2(front.x).to_degrees();

        Self {
            position,
            front,
            up,
            yaw,
            pitch,
            fov: utils::deg_to_rad(45.0),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Create a camera from configuration values
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.position, config.front, config.up);
        camera.fov = utils::deg_to_rad(config.fov_degrees);
        camera.near = config.near;
        camera.far = config.far;
        camera
    }

    /// Point one unit in front of the camera
    pub fn target(&self) -> Vec3 {
        self.position + self.front
    }

    /// Right-handed world-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&self.position.into(), &self.target().into(), &self.up)
    }

    /// Perspective projection for a viewport of the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::new_perspective(aspect, self.fov, self.near, self.far)
    }

    /// Move along the viewing direction
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.front * distance;
        log::trace!("Camera position updated to: {:?}", self.position);
    }

    /// Move perpendicular to the viewing direction, positive is right
    pub fn move_right(&mut self, distance: f32) {
        let right = self.front.cross(&self.up).normalize();
        self.position += right * distance;
        log::trace!("Camera position updated to: {:?}", self.position);
    }

    /// Move along the up vector
    pub fn move_up(&mut self, distance: f32) {
        self.position += self.up * distance;
        log::trace!("Camera position updated to: {:?}", self.position);
    }

    /// Turn the camera by yaw/pitch offsets in degrees
    pub fn rotate(&mut self, yaw_offset: f32, pitch_offset: f32) {
        self.yaw += yaw_offset;
        self.pitch = (self.pitch + pitch_offset).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);

        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
    }

    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.norm() > f32::EPSILON {
            *self = Self {
                fov: self.fov,
                near: self.near,
                far: self.far,
                ..Self::new(self.position, direction, self.up)
            };
        }
    }
}
