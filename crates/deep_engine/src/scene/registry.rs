//! Scene registry and active-scene selector

use std::collections::BTreeMap;

use super::scene::{Scene, SceneId};
use crate::ecs::EcsError;
use crate::render::Camera;

/// Owns every scene of a world and remembers which one is active
#[derive(Debug, Default)]
pub struct SceneRegistry {
    scenes: BTreeMap<SceneId, Scene>,
    next_id: u32,
    active: Option<SceneId>,
    pending_deletion: Vec<SceneId>,
}

impl SceneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scene; names are unique within the registry
    pub fn create_scene(&mut self, name: impl Into<String>, camera: Camera) -> Result<SceneId, EcsError> {
        let name = name.into();
        if self.find_scene(&name).is_some() {
            return Err(EcsError::DuplicateSceneName(name));
        }

        let id = SceneId::new(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(EcsError::IdsExhausted("scene"))?;
        log::debug!("Created scene '{}' ({})", name, id);
        self.scenes.insert(id, Scene::new(id, name, camera));
        Ok(id)
    }

    /// Look up a scene
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(&id)
    }

    /// Look up a scene mutably
    pub fn get_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.get_mut(&id)
    }

    /// Scene with the given name
    pub fn find_scene(&self, name: &str) -> Option<SceneId> {
        self.scenes.values().find(|scene| scene.name() == name).map(Scene::id)
    }

    /// All scenes, in creation order
    pub fn enum_scenes(&self) -> Vec<SceneId> {
        self.scenes.keys().copied().collect()
    }

    /// Iterate over all scenes mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Scene> {
        self.scenes.values_mut()
    }

    /// Number of scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True if no scene exists
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Select the active scene, or clear the selection with `None`
    ///
    /// Returns false and leaves the selection unchanged for unknown ids.
    pub fn set_active(&mut self, id: Option<SceneId>) -> bool {
        match id {
            Some(id) if !self.scenes.contains_key(&id) => false,
            _ => {
                self.active = id;
                true
            }
        }
    }

    /// Currently active scene id
    pub const fn active(&self) -> Option<SceneId> {
        self.active
    }

    /// Currently active scene
    pub fn active_scene(&self) -> Option<&Scene> {
        self.active.and_then(|id| self.scenes.get(&id))
    }

    /// Currently active scene, mutably
    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        let id = self.active?;
        self.scenes.get_mut(&id)
    }

    /// Queue a scene for removal at the next flush
    pub fn mark_for_deletion(&mut self, id: SceneId) -> bool {
        if !self.scenes.contains_key(&id) || self.pending_deletion.contains(&id) {
            return false;
        }
        self.pending_deletion.push(id);
        true
    }

    /// True if the scene is queued for removal
    pub fn is_marked_for_deletion(&self, id: SceneId) -> bool {
        self.pending_deletion.contains(&id)
    }

    /// Remove every queued scene and return the removed scenes
    ///
    /// Removing the active scene clears the active selection.
    pub fn flush_deletions(&mut self) -> Vec<Scene> {
        let pending = std::mem::take(&mut self.pending_deletion);
        let mut removed = Vec::with_capacity(pending.len());

        for id in pending {
            if let Some(scene) = self.scenes.remove(&id) {
                if self.active == Some(id) {
                    self.active = None;
                }
                log::debug!("Deleted scene '{}' ({})", scene.name(), id);
                removed.push(scene);
            }
        }

        removed
    }
}
