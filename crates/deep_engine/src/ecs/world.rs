//! ECS World implementation
//!
//! The world is the explicit context every system, the collision detector and
//! the render dispatcher run against. It owns the component store and the scene
//! registry, and through the registry the active-scene selection.

use super::component::{Component, ComponentId, ComponentKind, ComponentType};
use super::entity::Entity;
use super::error::EcsError;
use super::storage::ComponentStore;
use crate::config::{CameraConfig, EngineConfig};
use crate::render::Camera;
use crate::scene::{Scene, SceneId, SceneRegistry};

/// Counts of what a call to [`World::flush_deletions`] removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    /// Entities removed from their collections
    pub entities: usize,

    /// Scenes removed from the registry
    pub scenes: usize,
}

impl FlushReport {
    /// True if nothing was removed
    pub const fn is_empty(&self) -> bool {
        self.entities == 0 && self.scenes == 0
    }
}

/// Component storage plus every scene
#[derive(Debug)]
pub struct World {
    components: ComponentStore,
    scenes: SceneRegistry,
    default_camera: CameraConfig,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world with default settings
    pub fn new() -> Self {
        Self {
            components: ComponentStore::new(),
            scenes: SceneRegistry::new(),
            default_camera: CameraConfig::default(),
        }
    }

    /// Create an empty world sized and configured from `config`
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            components: ComponentStore::with_capacity(config.component_capacity),
            scenes: SceneRegistry::new(),
            default_camera: config.camera.clone(),
        }
    }

    /// Component store
    pub const fn components(&self) -> &ComponentStore {
        &self.components
    }

    /// Mutable component store
    pub fn components_mut(&mut self) -> &mut ComponentStore {
        &mut self.components
    }

    /// Scene registry
    pub const fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    /// Mutable scene registry
    pub fn scenes_mut(&mut self) -> &mut SceneRegistry {
        &mut self.scenes
    }

    // Scenes

    /// Create a scene with the configured default camera
    pub fn create_scene(&mut self, name: impl Into<String>) -> Result<SceneId, EcsError> {
        let camera = Camera::from_config(&self.default_camera);
        self.scenes.create_scene(name, camera)
    }

    /// Look up a scene
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Look up a scene mutably
    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.get_mut(id)
    }

    /// Scene with the given name
    pub fn find_scene(&self, name: &str) -> Option<SceneId> {
        self.scenes.find_scene(name)
    }

    /// All scenes, in creation order
    pub fn enum_scenes(&self) -> Vec<SceneId> {
        self.scenes.enum_scenes()
    }

    /// Select the active scene; false for unknown ids
    pub fn set_active_scene(&mut self, id: Option<SceneId>) -> bool {
        self.scenes.set_active(id)
    }

    /// Active scene id
    pub const fn active_scene_id(&self) -> Option<SceneId> {
        self.scenes.active()
    }

    /// Active scene
    pub fn active_scene(&self) -> Option<&Scene> {
        self.scenes.active_scene()
    }

    /// Active scene, mutably
    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.active_scene_mut()
    }

    /// Queue a scene for removal at the next flush
    pub fn mark_scene_for_deletion(&mut self, id: SceneId) -> bool {
        self.scenes.mark_for_deletion(id)
    }

    // Entities

    fn scene_or_err(&self, scene: SceneId) -> Result<&Scene, EcsError> {
        self.scenes.get(scene).ok_or(EcsError::SceneNotFound(scene))
    }

    /// Add a named entity to a scene
    pub fn create_entity(&mut self, scene: SceneId, name: impl Into<String>) -> Result<Entity, EcsError> {
        self.scenes
            .get_mut(scene)
            .ok_or(EcsError::SceneNotFound(scene))?
            .entities_mut()
            .create_entity(name)
    }

    /// Attach a stored component to an entity of a scene
    ///
    /// Returns the id previously attached for the same kind, which is left
    /// in the store.
    pub fn attach_component(
        &mut self,
        scene: SceneId,
        entity: Entity,
        component: ComponentId,
    ) -> Result<Option<ComponentId>, EcsError> {
        let Self { components, scenes, .. } = self;
        scenes
            .get_mut(scene)
            .ok_or(EcsError::SceneNotFound(scene))?
            .entities_mut()
            .attach_component(entity, component, components)
    }

    /// Store `component` and attach it to an entity in one step
    ///
    /// If the entity cannot take the component, nothing is stored. A component
    /// of the same kind that was attached before stays in the store, detached.
    pub fn add_component<T: Component>(
        &mut self,
        scene: SceneId,
        entity: Entity,
        component: T,
    ) -> Result<ComponentId, EcsError> {
        if !self.scene_or_err(scene)?.entities().contains(entity) {
            return Err(EcsError::EntityNotFound(entity));
        }

        let id = self.components.insert(component);
        self.attach_component(scene, entity, id)?;
        Ok(id)
    }

    /// Detach the component of type `T` from an entity and delete it from the store
    ///
    /// Keeps the entity's mask in step with the store. Returns the removed
    /// component, or `None` if the entity had none of that kind.
    pub fn remove_component<T: Component>(
        &mut self,
        scene: SceneId,
        entity: Entity,
    ) -> Result<Option<T>, EcsError> {
        let collection = self
            .scenes
            .get_mut(scene)
            .ok_or(EcsError::SceneNotFound(scene))?
            .entities_mut();
        if !collection.contains(entity) {
            return Err(EcsError::EntityNotFound(entity));
        }

        Ok(collection
            .detach_component(entity, T::KIND)
            .and_then(|id| self.components.remove(id)))
    }

    /// Entities of a scene matching the masks; empty for unknown scenes
    pub fn query(&self, scene: SceneId, include: ComponentType, exclude: ComponentType) -> Vec<Entity> {
        self.scenes
            .get(scene)
            .map(|scene| scene.entities().query(include, exclude))
            .unwrap_or_default()
    }

    /// Entities of the active scene matching the masks; `None` without an active scene
    pub fn query_active(&self, include: ComponentType, exclude: ComponentType) -> Option<Vec<Entity>> {
        self.active_scene().map(|scene| scene.entities().query(include, exclude))
    }

    /// Component of type `T` attached to an entity
    pub fn component<T: Component>(&self, scene: SceneId, entity: Entity) -> Option<&T> {
        let id = self.scenes.get(scene)?.entities().get_component_id(entity, T::KIND)?;
        self.components.get(id)
    }

    /// Mutable component of type `T` attached to an entity
    pub fn component_mut<T: Component>(&mut self, scene: SceneId, entity: Entity) -> Option<&mut T> {
        let id = self.scenes.get(scene)?.entities().get_component_id(entity, T::KIND)?;
        self.components.get_mut(id)
    }

    /// Id of the component of `kind` attached to an entity
    pub fn component_id(&self, scene: SceneId, entity: Entity, kind: ComponentKind) -> Option<ComponentId> {
        self.scenes.get(scene)?.entities().get_component_id(entity, kind)
    }

    /// Queue an entity for removal at the next flush
    pub fn mark_entity_for_deletion(&mut self, scene: SceneId, entity: Entity) -> bool {
        self.scenes
            .get_mut(scene)
            .is_some_and(|scene| scene.entities_mut().mark_for_deletion(entity))
    }

    /// Apply every queued entity and scene deletion
    ///
    /// Components attached to removed entities stay in the store; delete them
    /// explicitly if they are no longer needed.
    pub fn flush_deletions(&mut self) -> FlushReport {
        let entities: usize = self
            .scenes
            .iter_mut()
            .map(|scene| scene.entities_mut().flush_deletions())
            .sum();
        let scenes = self.scenes.flush_deletions().len();

        let report = FlushReport { entities, scenes };
        if !report.is_empty() {
            log::debug!("Flushed {} entities and {} scenes", entities, scenes);
        }
        report
    }
}
