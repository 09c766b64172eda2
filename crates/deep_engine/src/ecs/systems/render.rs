//! Render system
//!
//! A thin dispatcher: for each drawable entity of the active scene it calls the
//! drawable's [`RenderStrategy`](crate::render::RenderStrategy) with the scene
//! camera. All drawing happens in the strategy and the backend.

use crate::ecs::components::{DrawableComponent, TransformationComponent};
use crate::ecs::{ComponentType, Entity, System, World};
use crate::render::{RenderBackend, Viewport};

/// Render the given entities of the active scene
///
/// Entities without both a drawable and a transformation are skipped. Returns
/// the number of strategies invoked.
pub fn render_entities(
    world: &World,
    entities: &[Entity],
    backend: &mut dyn RenderBackend,
    viewport: &dyn Viewport,
) -> usize {
    let Some(scene) = world.active_scene() else {
        return 0;
    };
    let scene_id = scene.id();
    let camera = scene.camera();

    let mut rendered = 0;
    for &entity in entities {
        let (Some(drawable), Some(transformation)) = (
            world.component::<DrawableComponent>(scene_id, entity),
            world.component::<TransformationComponent>(scene_id, entity),
        ) else {
            continue;
        };

        drawable.strategy.render(backend, drawable, transformation, viewport, camera);
        rendered += 1;
    }
    rendered
}

/// Render every drawable entity of the active scene
pub fn render_scene(world: &World, backend: &mut dyn RenderBackend, viewport: &dyn Viewport) -> usize {
    let include = ComponentType::DRAWABLE | ComponentType::TRANSFORMATION;
    world
        .query_active(include, ComponentType::empty())
        .map_or(0, |entities| render_entities(world, &entities, backend, viewport))
}

/// Schedulable render system owning its backend and viewport
///
/// Register it with `DRAWABLE | TRANSFORMATION` as include mask, usually last
/// so it sees the state written by the other systems.
#[derive(Debug)]
pub struct RenderSystem<B, V> {
    backend: B,
    viewport: V,
}

impl<B: RenderBackend, V: Viewport> RenderSystem<B, V> {
    /// Create a render system
    pub const fn new(backend: B, viewport: V) -> Self {
        Self { backend, viewport }
    }

    /// The backend draw calls go to
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Replace the viewport, e.g. after a resize
    pub fn set_viewport(&mut self, viewport: V) {
        self.viewport = viewport;
    }
}

impl<B: RenderBackend, V: Viewport> System for RenderSystem<B, V> {
    fn run(&mut self, world: &mut World, entities: &[Entity]) {
        render_entities(world, entities, &mut self.backend, &self.viewport);
    }
}
