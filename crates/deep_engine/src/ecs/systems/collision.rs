//! Collision system: schedules the pairwise detector

use crate::ecs::{Entity, World};
use crate::physics::collision::detect_collisions;

/// Run collision detection over every collider of the active scene
///
/// The entity list handed in by the scheduler is ignored. Detection always
/// covers all colliders, whatever masks the system was registered with, so
/// contacts never end because an entity dropped out of a filtered query.
pub fn collision_system(world: &mut World, _entities: &[Entity]) {
    detect_collisions(world);
}
