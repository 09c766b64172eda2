//! ECS Systems module
//!
//! Reference systems built on the scheduler. Each one is a plain function over
//! the entities handed to it, so it can be scheduled or called directly.

pub mod acceleration;
pub mod collision;
pub mod render;
pub mod velocity;

pub use acceleration::apply_acceleration;
pub use collision::collision_system;
pub use render::{render_entities, render_scene, RenderSystem};
pub use velocity::apply_velocity;

use super::component::ComponentType;
use super::error::EcsError;
use super::scheduler::{SystemId, SystemScheduler};

/// Ids of the systems created by [`register_builtin_systems`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSystems {
    /// Acceleration into velocity
    pub acceleration: SystemId,
    /// Velocity into translation and collider bounds
    pub velocity: SystemId,
    /// Pairwise collider overlap
    pub collision: SystemId,
}

/// Register and enable the movement and collision systems
///
/// They run in the order acceleration, velocity, collision.
pub fn register_builtin_systems(scheduler: &mut SystemScheduler) -> Result<BuiltinSystems, EcsError> {
    let acceleration = scheduler.create_named_system(
        "acceleration",
        apply_acceleration,
        ComponentType::VELOCITY | ComponentType::ACCELERATION,
        ComponentType::empty(),
    )?;
    let velocity = scheduler.create_named_system(
        "velocity",
        apply_velocity,
        ComponentType::TRANSFORMATION | ComponentType::VELOCITY,
        ComponentType::empty(),
    )?;
    let collision = scheduler.create_named_system(
        "collision",
        collision_system,
        ComponentType::COLLIDER,
        ComponentType::empty(),
    )?;

    for id in [acceleration, velocity, collision] {
        scheduler.enable_system(id);
    }

    Ok(BuiltinSystems {
        acceleration,
        velocity,
        collision,
    })
}
