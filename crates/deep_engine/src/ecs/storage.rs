//! Component storage
//!
//! One generational arena per component kind. A [`ComponentId`] names the
//! arena through its kind and the slot through its key, so lookups never need
//! a side table and stale ids simply miss.

use slotmap::SlotMap;

use super::component::{Component, ComponentId, ComponentKey, ComponentKind, ComponentType};
use super::components::{
    AccelerationComponent, ColliderComponent, DrawableComponent, HealthComponent,
    TransformationComponent, VelocityComponent,
};
use crate::foundation::math::{Rect, Vec3};
use crate::render::GpuHandle;

/// Default number of slots reserved in each arena
pub const DEFAULT_CAPACITY: usize = 1000;

/// Flat stores for all six component kinds
#[derive(Debug)]
pub struct ComponentStore {
    drawables: SlotMap<ComponentKey, DrawableComponent>,
    transformations: SlotMap<ComponentKey, TransformationComponent>,
    colliders: SlotMap<ComponentKey, ColliderComponent>,
    velocities: SlotMap<ComponentKey, VelocityComponent>,
    accelerations: SlotMap<ComponentKey, AccelerationComponent>,
    healths: SlotMap<ComponentKey, HealthComponent>,
}

macro_rules! impl_component {
    ($component:ty, $kind:ident, $field:ident) => {
        impl Component for $component {
            const KIND: ComponentKind = ComponentKind::$kind;

            fn storage(store: &ComponentStore) -> &SlotMap<ComponentKey, Self> {
                &store.$field
            }

            fn storage_mut(store: &mut ComponentStore) -> &mut SlotMap<ComponentKey, Self> {
                &mut store.$field
            }
        }
    };
}

impl_component!(DrawableComponent, Drawable, drawables);
impl_component!(TransformationComponent, Transformation, transformations);
impl_component!(ColliderComponent, Collider, colliders);
impl_component!(VelocityComponent, Velocity, velocities);
impl_component!(AccelerationComponent, Acceleration, accelerations);
impl_component!(HealthComponent, Health, healths);

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentStore {
    /// Create empty stores with [`DEFAULT_CAPACITY`] slots each
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create empty stores reserving `capacity` slots each
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            drawables: SlotMap::with_capacity_and_key(capacity),
            transformations: SlotMap::with_capacity_and_key(capacity),
            colliders: SlotMap::with_capacity_and_key(capacity),
            velocities: SlotMap::with_capacity_and_key(capacity),
            accelerations: SlotMap::with_capacity_and_key(capacity),
            healths: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Store a component and return its id
    pub fn insert<T: Component>(&mut self, component: T) -> ComponentId {
        let key = T::storage_mut(self).insert(component);
        ComponentId::new(T::KIND, key)
    }

    /// Look up a component; ids of another kind are not found
    pub fn get<T: Component>(&self, id: ComponentId) -> Option<&T> {
        if id.kind() != T::KIND {
            return None;
        }
        T::storage(self).get(id.key())
    }

    /// Mutable lookup; ids of another kind are not found
    pub fn get_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        if id.kind() != T::KIND {
            return None;
        }
        T::storage_mut(self).get_mut(id.key())
    }

    /// Remove a component, returning it if it was live
    pub fn remove<T: Component>(&mut self, id: ComponentId) -> Option<T> {
        if id.kind() != T::KIND {
            return None;
        }
        T::storage_mut(self).remove(id.key())
    }

    /// Remove a component of any kind; returns whether it was live
    pub fn delete(&mut self, id: ComponentId) -> bool {
        match id.kind() {
            ComponentKind::Drawable => self.remove::<DrawableComponent>(id).is_some(),
            ComponentKind::Transformation => self.remove::<TransformationComponent>(id).is_some(),
            ComponentKind::Collider => self.remove::<ColliderComponent>(id).is_some(),
            ComponentKind::Velocity => self.remove::<VelocityComponent>(id).is_some(),
            ComponentKind::Acceleration => self.remove::<AccelerationComponent>(id).is_some(),
            ComponentKind::Health => self.remove::<HealthComponent>(id).is_some(),
        }
    }

    /// True if the id refers to a live component
    pub fn contains(&self, id: ComponentId) -> bool {
        let key = id.key();
        match id.kind() {
            ComponentKind::Drawable => self.drawables.contains_key(key),
            ComponentKind::Transformation => self.transformations.contains_key(key),
            ComponentKind::Collider => self.colliders.contains_key(key),
            ComponentKind::Velocity => self.velocities.contains_key(key),
            ComponentKind::Acceleration => self.accelerations.contains_key(key),
            ComponentKind::Health => self.healths.contains_key(key),
        }
    }

    /// Type flag of a live component, `None` for unknown or deleted ids
    pub fn get_type(&self, id: ComponentId) -> Option<ComponentType> {
        self.contains(id).then(|| id.kind().component_type())
    }

    /// Number of live components of one kind
    pub fn len_of(&self, kind: ComponentKind) -> usize {
        match kind {
            ComponentKind::Drawable => self.drawables.len(),
            ComponentKind::Transformation => self.transformations.len(),
            ComponentKind::Collider => self.colliders.len(),
            ComponentKind::Velocity => self.velocities.len(),
            ComponentKind::Acceleration => self.accelerations.len(),
            ComponentKind::Health => self.healths.len(),
        }
    }

    /// Number of live components across all kinds
    pub fn len(&self) -> usize {
        ComponentKind::ALL.into_iter().map(|kind| self.len_of(kind)).sum()
    }

    /// True if no component is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Factories and accessors named after each kind

    /// Create a drawable component
    pub fn create_drawable_component(
        &mut self,
        vertex_buffer: GpuHandle,
        vertex_array: GpuHandle,
        vertex_count: u32,
    ) -> ComponentId {
        self.insert(DrawableComponent::new(vertex_buffer, vertex_array, vertex_count))
    }

    /// Create a transformation component
    pub fn create_transformation_component(&mut self, translation: Vec3, scaling: Vec3, rotation: Vec3) -> ComponentId {
        self.insert(TransformationComponent {
            translation,
            scaling,
            rotation,
        })
    }

    /// Create a collider component from its bounds
    pub fn create_collider_component(&mut self, bounds: Rect) -> ComponentId {
        self.insert(ColliderComponent::new(bounds))
    }

    /// Create a velocity component
    pub fn create_velocity_component(&mut self, velocity: Vec3) -> ComponentId {
        self.insert(VelocityComponent::new(velocity))
    }

    /// Create an acceleration component
    pub fn create_acceleration_component(&mut self, acceleration: Vec3) -> ComponentId {
        self.insert(AccelerationComponent::new(acceleration))
    }

    /// Create a health component
    pub fn create_health_component(&mut self, current: u32, max: u32) -> ComponentId {
        self.insert(HealthComponent::new(current, max))
    }

    /// Look up a drawable component
    pub fn get_drawable_component(&self, id: ComponentId) -> Option<&DrawableComponent> {
        self.get(id)
    }

    /// Look up a transformation component
    pub fn get_transformation_component(&self, id: ComponentId) -> Option<&TransformationComponent> {
        self.get(id)
    }

    /// Look up a collider component
    pub fn get_collider_component(&self, id: ComponentId) -> Option<&ColliderComponent> {
        self.get(id)
    }

    /// Look up a velocity component
    pub fn get_velocity_component(&self, id: ComponentId) -> Option<&VelocityComponent> {
        self.get(id)
    }

    /// Look up an acceleration component
    pub fn get_acceleration_component(&self, id: ComponentId) -> Option<&AccelerationComponent> {
        self.get(id)
    }

    /// Look up a health component
    pub fn get_health_component(&self, id: ComponentId) -> Option<&HealthComponent> {
        self.get(id)
    }

    /// Delete a drawable component
    pub fn delete_drawable_component(&mut self, id: ComponentId) -> Option<DrawableComponent> {
        self.remove(id)
    }

    /// Delete a transformation component
    pub fn delete_transformation_component(&mut self, id: ComponentId) -> Option<TransformationComponent> {
        self.remove(id)
    }

    /// Delete a collider component
    pub fn delete_collider_component(&mut self, id: ComponentId) -> Option<ColliderComponent> {
        self.remove(id)
    }

    /// Delete a velocity component
    pub fn delete_velocity_component(&mut self, id: ComponentId) -> Option<VelocityComponent> {
        self.remove(id)
    }

    /// Delete an acceleration component
    pub fn delete_acceleration_component(&mut self, id: ComponentId) -> Option<AccelerationComponent> {
        self.remove(id)
    }

    /// Delete a health component
    pub fn delete_health_component(&mut self, id: ComponentId) -> Option<HealthComponent> {
        self.remove(id)
    }
}
