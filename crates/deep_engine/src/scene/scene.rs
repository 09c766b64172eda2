//! A named scene: one entity collection, one camera, collision callbacks and
//! the contact table the collision detector keeps between ticks.

use std::fmt;
use std::rc::Rc;

use crate::ecs::World;
use crate::ecs::entity::EntityCollection;
use crate::physics::collision::{
    CollisionEnter, CollisionEnterCallback, CollisionExit, CollisionExitCallback, ContactTable,
};
use crate::render::Camera;

/// Scene identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u32);

impl SceneId {
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the scene ID
    pub const fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// Named container of entities
pub struct Scene {
    id: SceneId,
    name: String,
    entities: EntityCollection,
    camera: Camera,
    on_collision_enter: Option<CollisionEnterCallback>,
    on_collision_exit: Option<CollisionExitCallback>,
    contacts: ContactTable,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("entities", &self.entities.len())
            .field("camera", &self.camera)
            .field("on_collision_enter", &self.on_collision_enter.is_some())
            .field("on_collision_exit", &self.on_collision_exit.is_some())
            .field("contacts", &self.contacts.len())
            .finish()
    }
}

impl Scene {
    pub(crate) fn new(id: SceneId, name: String, camera: Camera) -> Self {
        Self {
            id,
            name,
            entities: EntityCollection::new(),
            camera,
            on_collision_enter: None,
            on_collision_exit: None,
            contacts: ContactTable::new(),
        }
    }

    /// Scene id
    pub const fn id(&self) -> SceneId {
        self.id
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entities of this scene
    pub const fn entities(&self) -> &EntityCollection {
        &self.entities
    }

    /// Mutable access to the entities of this scene
    pub fn entities_mut(&mut self) -> &mut EntityCollection {
        &mut self.entities
    }

    /// Scene camera
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the scene camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Replace the scene camera
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Called on every tick two colliders overlap
    pub fn set_collision_enter_callback<F>(&mut self, callback: F)
    where
        F: Fn(&mut World, SceneId, &CollisionEnter) + 'static,
    {
        self.on_collision_enter = Some(Rc::new(callback));
    }

    /// Called once when two colliders stop overlapping
    pub fn set_collision_exit_callback<F>(&mut self, callback: F)
    where
        F: Fn(&mut World, SceneId, &CollisionExit) + 'static,
    {
        self.on_collision_exit = Some(Rc::new(callback));
    }

    /// Remove both collision callbacks, which disables collision detection
    pub fn clear_collision_callbacks(&mut self) {
        self.on_collision_enter = None;
        self.on_collision_exit = None;
    }

    /// Both collision callbacks, if both are set
    pub fn collision_callbacks(&self) -> Option<(CollisionEnterCallback, CollisionExitCallback)> {
        match (&self.on_collision_enter, &self.on_collision_exit) {
            (Some(enter), Some(exit)) => Some((Rc::clone(enter), Rc::clone(exit))),
            _ => None,
        }
    }

    /// Collider pairs currently overlapping
    pub const fn contacts(&self) -> &ContactTable {
        &self.contacts
    }

    pub(crate) fn contacts_mut(&mut self) -> &mut ContactTable {
        &mut self.contacts
    }
}
