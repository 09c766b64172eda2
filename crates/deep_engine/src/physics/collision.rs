//! Pairwise collision detection between axis-aligned colliders
//!
//! Every invocation tests each unordered pair of collider entities of the
//! active scene. Overlapping pairs fire the scene's enter callback on every
//! invocation; a pair that stops overlapping fires the exit callback once. The
//! scene's [`ContactTable`] remembers which pairs overlapped last time, and an
//! entry is removed exactly when its exit callback fires.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::ecs::components::ColliderComponent;
use crate::ecs::{ComponentKind, ComponentType, Entity, World};
use crate::foundation::math::{Rect, Vec2};
use crate::scene::SceneId;

/// Two colliders overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEnter {
    /// Entity earlier in query order
    pub entity1: Entity,

    /// Entity later in query order
    pub entity2: Entity,

    /// Center of `entity2`'s bounds minus center of `entity1`'s bounds
    pub difference: Vec2,

    /// Overlapping region
    pub intersection: Rect,
}

/// Two colliders stopped overlapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionExit {
    /// Entity earlier in query order
    pub entity1: Entity,

    /// Entity later in query order
    pub entity2: Entity,

    /// Center of `entity2`'s bounds minus center of `entity1`'s bounds
    pub difference: Vec2,
}

/// Callback fired while two colliders overlap
pub type CollisionEnterCallback = Rc<dyn Fn(&mut World, SceneId, &CollisionEnter)>;

/// Callback fired when two colliders stop overlapping
pub type CollisionExitCallback = Rc<dyn Fn(&mut World, SceneId, &CollisionExit)>;

/// Last known state of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Overlapping region
    pub intersection: Rect,

    /// Center-to-center vector
    pub difference: Vec2,
}

/// Overlapping pairs, keyed by the earlier entity and then the later one
#[derive(Debug, Clone, Default)]
pub struct ContactTable {
    pairs: BTreeMap<Entity, BTreeMap<Entity, Contact>>,
}

impl ContactTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Contact recorded for a pair
    pub fn get(&self, entity1: Entity, entity2: Entity) -> Option<&Contact> {
        self.pairs.get(&entity1)?.get(&entity2)
    }

    /// True if the pair is recorded as overlapping
    pub fn contains(&self, entity1: Entity, entity2: Entity) -> bool {
        self.get(entity1, entity2).is_some()
    }

    /// Record or refresh a pair
    pub fn insert(&mut self, entity1: Entity, entity2: Entity, contact: Contact) {
        self.pairs.entry(entity1).or_default().insert(entity2, contact);
    }

    /// Forget a pair, returning its last contact
    pub fn remove(&mut self, entity1: Entity, entity2: Entity) -> Option<Contact> {
        let partners = self.pairs.get_mut(&entity1)?;
        let contact = partners.remove(&entity2);
        if partners.is_empty() {
            self.pairs.remove(&entity1);
        }
        contact
    }

    /// Every recorded pair, ordered by entity1 then entity2
    pub fn pairs(&self) -> impl Iterator<Item = (Entity, Entity, &Contact)> + '_ {
        self.pairs.iter().flat_map(|(&entity1, partners)| {
            partners.iter().map(move |(&entity2, contact)| (entity1, entity2, contact))
        })
    }

    /// Number of recorded pairs
    pub fn len(&self) -> usize {
        self.pairs.values().map(BTreeMap::len).sum()
    }

    /// True if no pair is recorded
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Run collision detection over every collider of the active scene
pub fn detect_collisions(world: &mut World) {
    let Some(colliders) = world.query_active(ComponentType::COLLIDER, ComponentType::empty()) else {
        return;
    };
    detect_among(world, &colliders);
}

/// Run collision detection over `entities`, in the given order
///
/// Only pairs within `entities` are tested; contacts involving other colliders
/// are left as they are. Entities without a collider are ignored. Does nothing
/// when there is no active scene or when the active scene lacks either
/// callback.
pub fn detect_among(world: &mut World, entities: &[Entity]) {
    let Some(scene) = world.active_scene() else {
        return;
    };
    let scene_id = scene.id();
    let Some((on_enter, on_exit)) = scene.collision_callbacks() else {
        return;
    };

    let bounds: Vec<(Entity, Rect)> = entities
        .iter()
        .filter_map(|&entity| {
            let id = scene.entities().get_component_id(entity, ComponentKind::Collider)?;
            let collider = world.components().get::<ColliderComponent>(id)?;
            Some((entity, collider.bounds))
        })
        .collect();

    if bounds.len() < 2 && scene.contacts().is_empty() {
        return;
    }

    for (i, &(entity1, rect1)) in bounds.iter().enumerate() {
        for &(entity2, rect2) in &bounds[i + 1..] {
            let difference = rect2.center() - rect1.center();

            if let Some(intersection) = rect1.intersection(&rect2) {
                let Some(scene) = world.scene_mut(scene_id) else {
                    return;
                };
                scene.contacts_mut().insert(entity1, entity2, Contact { intersection, difference });

                let event = CollisionEnter {
                    entity1,
                    entity2,
                    difference,
                    intersection,
                };
                on_enter(world, scene_id, &event);
            } else {
                let Some(scene) = world.scene_mut(scene_id) else {
                    return;
                };
                if scene.contacts_mut().remove(entity1, entity2).is_some() {
                    on_exit(world, scene_id, &CollisionExit { entity1, entity2, difference });
                }
            }
        }
    }

    release_stale_contacts(world, scene_id, &on_exit);
}

/// End contacts whose entities no longer carry a live collider in the scene
///
/// This covers entities that were deleted or lost their collider while a
/// contact was recorded. Contacts of colliders that were merely left out of
/// `entities` are kept. The exit event carries the last known difference.
fn release_stale_contacts(world: &mut World, scene_id: SceneId, on_exit: &CollisionExitCallback) {
    let Some(scene) = world.scene(scene_id) else {
        return;
    };
    let has_collider = |entity: Entity| {
        scene
            .entities()
            .get_component_id(entity, ComponentKind::Collider)
            .is_some_and(|id| world.components().contains(id))
    };
    let stale: Vec<(Entity, Entity)> = scene
        .contacts()
        .pairs()
        .filter(|&(entity1, entity2, _)| !has_collider(entity1) || !has_collider(entity2))
        .map(|(entity1, entity2, _)| (entity1, entity2))
        .collect();

    for (entity1, entity2) in stale {
        let Some(scene) = world.scene_mut(scene_id) else {
            return;
        };
        if let Some(contact) = scene.contacts_mut().remove(entity1, entity2) {
            log::trace!("Released stale contact {} / {}", entity1, entity2);
            on_exit(
                world,
                scene_id,
                &CollisionExit {
                    entity1,
                    entity2,
                    difference: contact.difference,
                },
            );
        }
    }
}
