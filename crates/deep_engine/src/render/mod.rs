//! Rendering contracts
//!
//! The ECS does not draw anything itself. Drawables carry opaque [`GpuHandle`]s
//! and a [`RenderStrategy`]; the render system hands both to a
//! [`RenderBackend`] supplied by the integrator.

pub mod camera;

use std::fmt;

use crate::ecs::components::{DrawableComponent, TransformationComponent};
use crate::foundation::math::{Mat4, Vec3};

pub use camera::Camera;

/// Opaque id of a buffer, vertex array, program or texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GpuHandle(pub u32);

impl GpuHandle {
    /// Raw backend id
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Value uploaded to a shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Integer, also used for sampler units
    Int(i32),
    /// 3-component vector
    Vec3(Vec3),
    /// 4x4 matrix
    Mat4(Mat4),
}

/// Depth comparison used by the depth test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunction {
    /// Pass if the incoming depth is less than the stored depth
    Less,
    /// Pass if the incoming depth is less than or equal to the stored depth
    LessEqual,
}

/// Draw-call surface implemented by a graphics backend
pub trait RenderBackend {
    /// Make `program` the current shader program
    fn use_program(&mut self, program: GpuHandle);

    /// Bind a vertex array
    fn bind_vertex_array(&mut self, vertex_array: GpuHandle);

    /// Bind a texture to a texture unit
    fn bind_texture(&mut self, texture: GpuHandle, unit: u32);

    /// Upload a uniform to `program`
    fn set_uniform(&mut self, program: GpuHandle, name: &str, value: UniformValue);

    /// Enable or disable depth writes
    fn set_depth_mask(&mut self, enabled: bool);

    /// Change the depth comparison
    fn set_depth_function(&mut self, function: DepthFunction);

    /// Draw `vertex_count` vertices from `vertex_buffer`
    fn draw(&mut self, vertex_buffer: GpuHandle, vertex_count: u32);
}

/// Output surface dimensions
pub trait Viewport {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Width divided by height, 1.0 for a degenerate viewport
    #[allow(clippy::cast_precision_loss)]
    fn aspect_ratio(&self) -> f32 {
        match self.height() {
            0 => 1.0,
            height => self.width() as f32 / height as f32,
        }
    }
}

/// User supplied render routine
pub type RenderCallback =
    fn(&mut dyn RenderBackend, &DrawableComponent, &TransformationComponent, &dyn Viewport, &Camera);

/// How a drawable is rendered
#[derive(Clone, Copy)]
pub enum RenderStrategy {
    /// Textured mesh with the full model/view/projection uniform set
    Classic,
    /// Background cube drawn behind everything else
    Skybox,
    /// Integrator supplied routine
    Custom(RenderCallback),
    /// Skipped by the render system
    Hidden,
}

impl fmt::Debug for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RenderStrategy {
    /// Stable name, used by scene export
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Skybox => "skybox",
            Self::Custom(_) => "custom",
            Self::Hidden => "hidden",
        }
    }

    /// Strategy for a name written by [`RenderStrategy::name`]
    ///
    /// Custom routines cannot be restored from a name and come back as `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::Classic),
            "skybox" => Some(Self::Skybox),
            "hidden" => Some(Self::Hidden),
            _ => None,
        }
    }

    /// Run this strategy for one drawable
    pub fn render(
        &self,
        backend: &mut dyn RenderBackend,
        drawable: &DrawableComponent,
        transformation: &TransformationComponent,
        viewport: &dyn Viewport,
        camera: &Camera,
    ) {
        match self {
            Self::Classic => classic_render(backend, drawable, transformation, viewport, camera),
            Self::Skybox => skybox_render(backend, drawable, transformation, viewport, camera),
            Self::Custom(callback) => callback(backend, drawable, transformation, viewport, camera),
            Self::Hidden => {}
        }
    }
}

/// Draw a textured mesh
///
/// Uploads `mTrs`, `mRotX`, `mRotY`, `mRotZ`, `mScl`, `view`, `deViewPos`,
/// `proj` and, when a texture is present, `myTex`. Drawables without a program
/// are skipped.
pub fn classic_render(
    backend: &mut dyn RenderBackend,
    drawable: &DrawableComponent,
    transformation: &TransformationComponent,
    viewport: &dyn Viewport,
    camera: &Camera,
) {
    let Some(program) = drawable.program else {
        return;
    };

    backend.use_program(program);
    backend.bind_vertex_array(drawable.vertex_array);

    if let Some(texture) = drawable.texture {
        backend.bind_texture(texture, drawable.texture_unit);
        let unit = i32::try_from(drawable.texture_unit).unwrap_or(i32::MAX);
        backend.set_uniform(program, "myTex", UniformValue::Int(unit));
    }

    let [rot_x, rot_y, rot_z] = transformation.rotation_matrices();
    backend.set_uniform(program, "mTrs", UniformValue::Mat4(transformation.translation_matrix()));
    backend.set_uniform(program, "mRotX", UniformValue::Mat4(rot_x));
    backend.set_uniform(program, "mRotY", UniformValue::Mat4(rot_y));
    backend.set_uniform(program, "mRotZ", UniformValue::Mat4(rot_z));
    backend.set_uniform(program, "mScl", UniformValue::Mat4(transformation.scaling_matrix()));
    backend.set_uniform(program, "view", UniformValue::Mat4(camera.view_matrix()));
    backend.set_uniform(program, "deViewPos", UniformValue::Vec3(camera.position));
    backend.set_uniform(
        program,
        "proj",
        UniformValue::Mat4(camera.projection_matrix(viewport.aspect_ratio())),
    );

    backend.draw(drawable.vertex_buffer, drawable.vertex_count);
}

/// Draw a skybox around the camera
///
/// The view matrix loses its translation so the box follows the camera. Depth
/// writes are off and the depth test is relaxed for the draw, then restored.
pub fn skybox_render(
    backend: &mut dyn RenderBackend,
    drawable: &DrawableComponent,
    _transformation: &TransformationComponent,
    viewport: &dyn Viewport,
    camera: &Camera,
) {
    let Some(program) = drawable.program else {
        return;
    };

    backend.set_depth_mask(false);
    backend.set_depth_function(DepthFunction::LessEqual);

    backend.use_program(program);

    let mut view = camera.view_matrix();
    for row in 0..3 {
        view[(row, 3)] = 0.0;
    }
    backend.set_uniform(program, "view", UniformValue::Mat4(view));
    backend.set_uniform(
        program,
        "proj",
        UniformValue::Mat4(camera.projection_matrix(viewport.aspect_ratio())),
    );

    backend.bind_vertex_array(drawable.vertex_array);
    if let Some(texture) = drawable.texture {
        backend.bind_texture(texture, drawable.texture_unit);
    }
    backend.draw(drawable.vertex_buffer, drawable.vertex_count);

    backend.set_depth_function(DepthFunction::Less);
    backend.set_depth_mask(true);
}


#[cfg(test)]
mod tests {
    use super::testing::{Call, FixedViewport, RecordingBackend};
    use super::*;
    use approx::assert_relative_eq;

    fn textured_drawable() -> DrawableComponent {
        DrawableComponent::new(GpuHandle(1), GpuHandle(2), 36)
            .with_program(GpuHandle(3))
            .with_texture(GpuHandle(4), 2)
    }

    #[test]
    fn test_classic_uploads_uniforms_and_draws() {
        let mut backend = RecordingBackend::default();
        let transformation = TransformationComponent::from_translation(Vec3::new(1.0, 2.0, 3.0));

        RenderStrategy::Classic.render(
            &mut backend,
            &textured_drawable(),
            &transformation,
            &FixedViewport(800, 600),
            &Camera::default(),
        );

        assert_eq!(backend.calls[0], Call::UseProgram(GpuHandle(3)));
        assert!(backend.calls.contains(&Call::BindTexture(GpuHandle(4), 2)));
        assert_eq!(backend.uniform("myTex"), Some(UniformValue::Int(2)));
        assert_eq!(
            backend.uniform("mTrs"),
            Some(UniformValue::Mat4(transformation.translation_matrix()))
        );
        for name in ["mRotX", "mRotY", "mRotZ", "mScl", "view", "deViewPos", "proj"] {
            assert!(backend.uniform(name).is_some(), "missing uniform {name}");
        }
        assert_eq!(backend.calls.last(), Some(&Call::Draw(GpuHandle(1), 36)));
    }

    #[test]
    fn test_skybox_strips_view_translation_and_restores_depth() {
        let mut backend = RecordingBackend::default();
        let mut camera = Camera::default();
        camera.position = Vec3::new(10.0, -4.0, 7.0);

        skybox_render(
            &mut backend,
            &textured_drawable(),
            &TransformationComponent::default(),
            &FixedViewport(640, 480),
            &camera,
        );

        let Some(UniformValue::Mat4(view)) = backend.uniform("view") else {
            panic!("view uniform not uploaded");
        };
        assert_relative_eq!(view[(0, 3)], 0.0);
        assert_relative_eq!(view[(1, 3)], 0.0);
        assert_relative_eq!(view[(2, 3)], 0.0);

        assert_eq!(backend.calls[0], Call::DepthMask(false));
        assert_eq!(backend.calls[1], Call::DepthFunction(DepthFunction::LessEqual));
        let tail = &backend.calls[backend.calls.len() - 2..];
        assert_eq!(tail, [Call::DepthFunction(DepthFunction::Less), Call::DepthMask(true)]);
    }

    #[test]
    fn test_hidden_and_programless_drawables_are_skipped() {
        let mut backend = RecordingBackend::default();
        let viewport = FixedViewport(1, 1);
        let camera = Camera::default();
        let transformation = TransformationComponent::default();

        RenderStrategy::Hidden.render(&mut backend, &textured_drawable(), &transformation, &viewport, &camera);
        let bare = DrawableComponent::new(GpuHandle(1), GpuHandle(2), 3);
        RenderStrategy::Classic.render(&mut backend, &bare, &transformation, &viewport, &camera);

        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_custom_strategy_is_invoked() {
        fn draw_twice(
            backend: &mut dyn RenderBackend,
            drawable: &DrawableComponent,
            _: &TransformationComponent,
            _: &dyn Viewport,
            _: &Camera,
        ) {
            backend.draw(drawable.vertex_buffer, drawable.vertex_count);
            backend.draw(drawable.vertex_buffer, drawable.vertex_count);
        }

        let mut backend = RecordingBackend::default();
        let drawable = textured_drawable().with_strategy(RenderStrategy::Custom(draw_twice));
        drawable.strategy.render(
            &mut backend,
            &drawable,
            &TransformationComponent::default(),
            &FixedViewport(1, 1),
            &Camera::default(),
        );

        assert_eq!(backend.draws(), 2);
    }

    #[test]
    fn test_strategy_names() {
        assert!(matches!(RenderStrategy::from_name("skybox"), Some(RenderStrategy::Skybox)));
        assert!(RenderStrategy::from_name("custom").is_none());
        assert_eq!(format!("{:?}", RenderStrategy::Classic), "classic");
    }

    #[test]
    fn test_degenerate_viewport_aspect() {
        assert_relative_eq!(FixedViewport(800, 0).aspect_ratio(), 1.0);
        assert_relative_eq!(FixedViewport(800, 400).aspect_ratio(), 2.0);
    }
}
