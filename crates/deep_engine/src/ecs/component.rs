//! Component kinds, type bitmask and component identifiers

use std::fmt;

use slotmap::{new_key_type, Key, SlotMap};

use super::storage::ComponentStore;

new_key_type! {
    /// Generational slot key inside one component store
    pub struct ComponentKey;
}

bitflags::bitflags! {
    /// Set of component kinds, one bit per kind
    ///
    /// Queries use it as "has all of" (include) and "has none of" (exclude).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
    pub struct ComponentType: u32 {
        /// Renderable geometry
        const DRAWABLE = 1 << 0;
        /// Translation, scaling and rotation
        const TRANSFORMATION = 1 << 1;
        /// Axis-aligned collision bounds
        const COLLIDER = 1 << 2;
        /// Linear velocity
        const VELOCITY = 1 << 3;
        /// Linear acceleration
        const ACCELERATION = 1 << 4;
        /// Hit points
        const HEALTH = 1 << 5;
    }
}

/// The six component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// See [`crate::ecs::components::DrawableComponent`]
    Drawable,
    /// See [`crate::ecs::components::TransformationComponent`]
    Transformation,
    /// See [`crate::ecs::components::ColliderComponent`]
    Collider,
    /// See [`crate::ecs::components::VelocityComponent`]
    Velocity,
    /// See [`crate::ecs::components::AccelerationComponent`]
    Acceleration,
    /// See [`crate::ecs::components::HealthComponent`]
    Health,
}

impl ComponentKind {
    /// Number of kinds
    pub const COUNT: usize = 6;

    /// Every kind, in bit order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Drawable,
        Self::Transformation,
        Self::Collider,
        Self::Velocity,
        Self::Acceleration,
        Self::Health,
    ];

    /// The single flag for this kind
    pub const fn component_type(self) -> ComponentType {
        match self {
            Self::Drawable => ComponentType::DRAWABLE,
            Self::Transformation => ComponentType::TRANSFORMATION,
            Self::Collider => ComponentType::COLLIDER,
            Self::Velocity => ComponentType::VELOCITY,
            Self::Acceleration => ComponentType::ACCELERATION,
            Self::Health => ComponentType::HEALTH,
        }
    }

    /// Position of this kind in [`ComponentKind::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable lowercase name, used by scene export
    pub const fn name(self) -> &'static str {
        match self {
            Self::Drawable => "drawable",
            Self::Transformation => "transformation",
            Self::Collider => "collider",
            Self::Velocity => "velocity",
            Self::Acceleration => "acceleration",
            Self::Health => "health",
        }
    }

    /// Inverse of [`ComponentKind::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a stored component
///
/// The kind is part of the id, so two components of different kinds can never
/// share an id. Keys are generational: once a component is deleted its id never
/// resolves again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    kind: ComponentKind,
    key: ComponentKey,
}

impl ComponentId {
    pub(crate) const fn new(kind: ComponentKind, key: ComponentKey) -> Self {
        Self { kind, key }
    }

    /// Kind of the referenced component
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Slot key inside the kind's store
    pub const fn key(&self) -> ComponentKey {
        self.key
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.key.data().as_ffi())
    }
}

/// A record stored in one of the component stores
pub trait Component: 'static + Send + Sync + Sized {
    /// Kind tag of this record type
    const KIND: ComponentKind;

    /// The store holding records of this type
    fn storage(store: &ComponentStore) -> &SlotMap<ComponentKey, Self>;

    /// Mutable access to the store holding records of this type
    fn storage_mut(store: &mut ComponentStore) -> &mut SlotMap<ComponentKey, Self>;
}
