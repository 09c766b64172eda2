//! Acceleration system: adds each entity's acceleration to its velocity

use crate::ecs::components::{AccelerationComponent, VelocityComponent};
use crate::ecs::{ComponentKind, Entity, World};

/// Add acceleration to velocity for every entity holding both
///
/// Entities missing either component are skipped.
pub fn apply_acceleration(world: &mut World, entities: &[Entity]) {
    let Some(scene) = world.active_scene() else {
        return;
    };

    let updates: Vec<_> = entities
        .iter()
        .filter_map(|&entity| {
            let collection = scene.entities();
            let velocity = collection.get_component_id(entity, ComponentKind::Velocity)?;
            let acceleration = collection.get_component_id(entity, ComponentKind::Acceleration)?;
            Some((velocity, acceleration))
        })
        .collect();

    let store = world.components_mut();
    for (velocity_id, acceleration_id) in updates {
        let Some(acceleration) = store.get::<AccelerationComponent>(acceleration_id).map(|a| a.acceleration) else {
            continue;
        };
        if let Some(velocity) = store.get_mut::<VelocityComponent>(velocity_id) {
            velocity.velocity += acceleration;
        }
    }
}
