//! Velocity system
//!
//! Adds each entity's velocity to its translation. An attached collider moves
//! by the same XY delta so its bounds stay on the entity.

use crate::ecs::components::{ColliderComponent, TransformationComponent, VelocityComponent};
use crate::ecs::{ComponentId, ComponentKind, Entity, World};

struct Movement {
    velocity: ComponentId,
    transformation: ComponentId,
    collider: Option<ComponentId>,
}

/// Move every entity holding a transformation and a velocity
pub fn apply_velocity(world: &mut World, entities: &[Entity]) {
    let Some(scene) = world.active_scene() else {
        return;
    };

    let movements: Vec<Movement> = entities
        .iter()
        .filter_map(|&entity| {
            let collection = scene.entities();
            Some(Movement {
                velocity: collection.get_component_id(entity, ComponentKind::Velocity)?,
                transformation: collection.get_component_id(entity, ComponentKind::Transformation)?,
                collider: collection.get_component_id(entity, ComponentKind::Collider),
            })
        })
        .collect();

    let store = world.components_mut();
    for movement in movements {
        let Some(delta) = store.get::<VelocityComponent>(movement.velocity).map(|v| v.velocity) else {
            continue;
        };
        let Some(transformation) = store.get_mut::<TransformationComponent>(movement.transformation) else {
            continue;
        };
        transformation.translation += delta;

        if let Some(collider) = movement
            .collider
            .and_then(|id| store.get_mut::<ColliderComponent>(id))
        {
            collider.bounds.translate(delta.xy());
        }
    }
}
