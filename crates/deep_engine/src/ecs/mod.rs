//! Entity-Component-System implementation
//!
//! Components live in a typed [`ComponentStore`] owned by the [`World`]. Each
//! scene keeps its own [`EntityCollection`] whose entities reference stored
//! components by id and carry a [`ComponentType`] bitmask for queries. Systems
//! are registered with a [`SystemScheduler`] that runs them against the active
//! scene.

pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod scheduler;
pub mod storage;
pub mod systems;
pub mod world;

pub use component::{Component, ComponentId, ComponentKey, ComponentKind, ComponentType};
pub use entity::{Entity, EntityCollection};
pub use error::EcsError;
pub use scheduler::{System, SystemId, SystemInfo, SystemScheduler};
pub use storage::ComponentStore;
pub use world::{FlushReport, World};
