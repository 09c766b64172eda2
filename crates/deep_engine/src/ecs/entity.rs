//! Entity implementation
//!
//! An [`EntityCollection`] owns, per entity, a name, a component-type bitmask
//! and the id of the component attached for each kind. Ids are handed out in
//! increasing order and never reused, so iterating the ordered map yields
//! entities in insertion order.

use std::collections::BTreeMap;
use std::fmt;

use super::component::{ComponentId, ComponentKind, ComponentType};
use super::error::EcsError;
use super::storage::ComponentStore;

/// Entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(super) const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub const fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

#[derive(Debug, Clone)]
struct EntityRecord {
    name: String,
    mask: ComponentType,
    components: [Option<ComponentId>; ComponentKind::COUNT],
}

/// Entities of one scene with their component associations
#[derive(Debug, Clone, Default)]
pub struct EntityCollection {
    entities: BTreeMap<Entity, EntityRecord>,
    next_id: u32,
    pending_deletion: Vec<Entity>,
}

impl EntityCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity with no components
    ///
    /// Names are unique within the collection.
    pub fn create_entity(&mut self, name: impl Into<String>) -> Result<Entity, EcsError> {
        let name = name.into();
        if self.find_entity(&name).is_some() {
            return Err(EcsError::DuplicateEntityName(name));
        }

        let entity = Entity::new(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(EcsError::IdsExhausted("entity"))?;
        self.entities.insert(
            entity,
            EntityRecord {
                name,
                mask: ComponentType::empty(),
                components: [None; ComponentKind::COUNT],
            },
        );
        Ok(entity)
    }

    /// Attach a stored component to an entity
    ///
    /// Returns the id previously attached for the same kind, if any. That
    /// component stays in the store until deleted explicitly.
    pub fn attach_component(
        &mut self,
        entity: Entity,
        component: ComponentId,
        store: &ComponentStore,
    ) -> Result<Option<ComponentId>, EcsError> {
        let flag = store.get_type(component).ok_or(EcsError::ComponentNotFound(component))?;
        let record = self
            .entities
            .get_mut(&entity)
            .ok_or(EcsError::EntityNotFound(entity))?;

        record.mask |= flag;
        Ok(record.components[component.kind().index()].replace(component))
    }

    /// Remove the association for one kind, returning the detached id
    pub fn detach_component(&mut self, entity: Entity, kind: ComponentKind) -> Option<ComponentId> {
        let record = self.entities.get_mut(&entity)?;
        record.mask.remove(kind.component_type());
        record.components[kind.index()].take()
    }

    /// Entities whose mask contains all of `include` and none of `exclude`
    ///
    /// Results follow insertion order.
    pub fn query(&self, include: ComponentType, exclude: ComponentType) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, record)| record.mask.contains(include) && !record.mask.intersects(exclude))
            .map(|(&entity, _)| entity)
            .collect()
    }

    /// Component kinds attached to an entity
    pub fn get_component_types(&self, entity: Entity) -> Option<ComponentType> {
        self.entities.get(&entity).map(|record| record.mask)
    }

    /// Id of the component of `kind` attached to an entity
    pub fn get_component_id(&self, entity: Entity, kind: ComponentKind) -> Option<ComponentId> {
        self.entities.get(&entity)?.components[kind.index()]
    }

    /// All attached component ids of an entity, in kind order
    pub fn component_ids(&self, entity: Entity) -> impl Iterator<Item = ComponentId> + '_ {
        self.entities
            .get(&entity)
            .into_iter()
            .flat_map(|record| record.components.iter().flatten().copied())
    }

    /// All entities, in insertion order
    pub fn enum_entities(&self) -> Vec<Entity> {
        self.entities.keys().copied().collect()
    }

    /// Entity with the given name
    pub fn find_entity(&self, name: &str) -> Option<Entity> {
        self.entities
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(&entity, _)| entity)
    }

    /// Name of an entity
    pub fn entity_name(&self, entity: Entity) -> Option<&str> {
        self.entities.get(&entity).map(|record| record.name.as_str())
    }

    /// True if the entity is live in this collection
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if the collection holds no entity
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Queue an entity for removal at the next flush
    ///
    /// Returns false for unknown entities and for entities already queued.
    /// The entity stays visible to queries until [`EntityCollection::flush_deletions`].
    pub fn mark_for_deletion(&mut self, entity: Entity) -> bool {
        if !self.contains(entity) || self.pending_deletion.contains(&entity) {
            return false;
        }
        self.pending_deletion.push(entity);
        true
    }

    /// True if the entity is queued for removal
    pub fn is_marked_for_deletion(&self, entity: Entity) -> bool {
        self.pending_deletion.contains(&entity)
    }

    /// Entities queued for removal, in marking order
    pub fn pending_deletions(&self) -> &[Entity] {
        &self.pending_deletion
    }

    /// Remove every queued entity, returning how many were removed
    pub fn flush_deletions(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_deletion);
        pending
            .into_iter()
            .filter(|entity| self.entities.remove(entity).is_some())
            .count()
    }
}
