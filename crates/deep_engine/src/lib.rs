//! # Deep Engine
//!
//! The core of a small 2D/3D game engine built around an Entity-Component-System.
//!
//! ## Features
//!
//! - **ECS Architecture**: Typed component stores, bitmask entity queries and an
//!   ordered system scheduler
//! - **Scenes**: Named entity collections with an active-scene selection and
//!   deferred deletion
//! - **Collision**: Axis-aligned colliders with enter/exit callbacks
//! - **Rendering Hooks**: Per-drawable render strategies over a backend trait
//! - **Export**: Scenes written to a nested key-value container, storable as RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deep_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     engine.register_builtin_systems()?;
//!
//!     let scene = engine.world.create_scene("main")?;
//!     engine.world.set_active_scene(Some(scene));
//!     let ship = engine.world.create_entity(scene, "ship")?;
//!     engine.world.add_component(scene, ship, TransformationComponent::default())?;
//!     engine.world.add_component(scene, ship, VelocityComponent::new(Vec3::new(0.1, 0.0, 0.0)))?;
//!
//!     engine.run_for(10);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;
pub mod render;
pub mod scene;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CameraConfig, Config, EngineConfig},
        ecs::{
            components::{
                AccelerationComponent, ColliderComponent, DrawableComponent, HealthComponent,
                TransformationComponent, VelocityComponent,
            },
            ComponentId, ComponentKind, ComponentType, EcsError, Entity, System, SystemId, SystemScheduler,
            World,
        },
        foundation::math::{Rect, Vec2, Vec3},
        physics::{CollisionEnter, CollisionExit},
        render::{Camera, GpuHandle, RenderBackend, RenderStrategy, Viewport},
        scene::{export_scene, import_scenes, ObjectContainer, ObjectNode, SceneId},
        Engine, EngineError,
    };
}
