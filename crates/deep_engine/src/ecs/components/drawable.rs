//! Drawable component
//!
//! Holds opaque graphics handles produced by the rendering backend and the
//! strategy used to draw them. The ECS never looks inside the handles.

use crate::render::{GpuHandle, RenderStrategy};

/// Renderable geometry of an entity
#[derive(Debug, Clone, Copy)]
pub struct DrawableComponent {
    /// Vertex buffer
    pub vertex_buffer: GpuHandle,

    /// Vertex array describing the buffer layout
    pub vertex_array: GpuHandle,

    /// Number of vertices to draw
    pub vertex_count: u32,

    /// Shader program, if any
    pub program: Option<GpuHandle>,

    /// Texture, if any
    pub texture: Option<GpuHandle>,

    /// Texture unit the texture is bound to
    pub texture_unit: u32,

    /// How this drawable is rendered
    pub strategy: RenderStrategy,
}

impl DrawableComponent {
    /// Create a drawable using the classic render strategy
    pub const fn new(vertex_buffer: GpuHandle, vertex_array: GpuHandle, vertex_count: u32) -> Self {
        Self {
            vertex_buffer,
            vertex_array,
            vertex_count,
            program: None,
            texture: None,
            texture_unit: 0,
            strategy: RenderStrategy::Classic,
        }
    }

    /// Set the shader program
    pub const fn with_program(mut self, program: GpuHandle) -> Self {
        self.program = Some(program);
        self
    }

    /// Set the texture and its unit
    pub const fn with_texture(mut self, texture: GpuHandle, unit: u32) -> Self {
        self.texture = Some(texture);
        self.texture_unit = unit;
        self
    }

    /// Set the render strategy
    pub const fn with_strategy(mut self, strategy: RenderStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
