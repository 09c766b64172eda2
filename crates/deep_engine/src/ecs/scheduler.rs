//! System Scheduling
//!
//! Systems are registered with an include/exclude mask pair and run against the
//! active scene of a [`World`]. Enabled systems form an ordered sequence:
//! activation order is execution order, which lets later systems observe what
//! earlier ones wrote in the same tick.

use std::collections::BTreeMap;
use std::fmt;

use super::component::ComponentType;
use super::entity::Entity;
use super::error::EcsError;
use super::world::World;

/// Unique identifier for systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(u32);

impl SystemId {
    /// Get the system ID
    pub const fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system#{}", self.0)
    }
}

/// Per-tick logic run over the entities matching a system's masks
pub trait System {
    /// Execute the system for one tick
    fn run(&mut self, world: &mut World, entities: &[Entity]);
}

impl<F> System for F
where
    F: FnMut(&mut World, &[Entity]),
{
    fn run(&mut self, world: &mut World, entities: &[Entity]) {
        self(world, entities);
    }
}

struct SystemEntry {
    label: String,
    include: ComponentType,
    exclude: ComponentType,
    system: Box<dyn System>,
}

/// Read-only description of a registered system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// System id
    pub id: SystemId,
    /// Human-readable label
    pub label: String,
    /// Components an entity must have
    pub include: ComponentType,
    /// Components an entity must not have
    pub exclude: ComponentType,
    /// Whether the system is in the enabled sequence
    pub enabled: bool,
}

/// System registry and ordered execution list
#[derive(Default)]
pub struct SystemScheduler {
    systems: BTreeMap<SystemId, SystemEntry>,
    enabled: Vec<SystemId>,
    next_id: u32,
}

impl fmt::Debug for SystemScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemScheduler")
            .field("systems", &self.systems.len())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl SystemScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system without enabling it
    pub fn create_system<S>(
        &mut self,
        system: S,
        include: ComponentType,
        exclude: ComponentType,
    ) -> Result<SystemId, EcsError>
    where
        S: System + 'static,
    {
        let label = format!("system#{}", self.next_id);
        self.create_named_system(label, system, include, exclude)
    }

    /// Register a labelled system without enabling it
    pub fn create_named_system<S>(
        &mut self,
        label: impl Into<String>,
        system: S,
        include: ComponentType,
        exclude: ComponentType,
    ) -> Result<SystemId, EcsError>
    where
        S: System + 'static,
    {
        let id = SystemId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(EcsError::IdsExhausted("system"))?;

        let label = label.into();
        log::debug!("Registered {} '{}' (include {:?}, exclude {:?})", id, label, include, exclude);
        self.systems.insert(
            id,
            SystemEntry {
                label,
                include,
                exclude,
                system: Box::new(system),
            },
        );
        Ok(id)
    }

    /// Append a system to the enabled sequence
    ///
    /// Enabling an already enabled system keeps its position. Returns false
    /// for unknown ids.
    pub fn enable_system(&mut self, id: SystemId) -> bool {
        if !self.systems.contains_key(&id) {
            return false;
        }
        if !self.enabled.contains(&id) {
            self.enabled.push(id);
            log::debug!("Enabled {}", id);
        }
        true
    }

    /// Remove a system from the enabled sequence
    ///
    /// Returns true if the system was enabled.
    pub fn disable_system(&mut self, id: SystemId) -> bool {
        let Some(position) = self.enabled.iter().position(|&enabled| enabled == id) else {
            return false;
        };
        self.enabled.remove(position);
        log::debug!("Disabled {}", id);
        true
    }

    /// True if the system is in the enabled sequence
    pub fn is_enabled(&self, id: SystemId) -> bool {
        self.enabled.contains(&id)
    }

    /// Enabled systems in execution order
    pub fn enabled_systems(&self) -> &[SystemId] {
        &self.enabled
    }

    /// Description of every registered system, in registration order
    pub fn systems(&self) -> Vec<SystemInfo> {
        self.systems
            .iter()
            .map(|(&id, entry)| SystemInfo {
                id,
                label: entry.label.clone(),
                include: entry.include,
                exclude: entry.exclude,
                enabled: self.is_enabled(id),
            })
            .collect()
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// True if no system is registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Run one system against the active scene, enabled or not
    ///
    /// Returns false without doing anything when the id is unknown or no
    /// scene is active.
    pub fn execute_system(&mut self, id: SystemId, world: &mut World) -> bool {
        let Some(entry) = self.systems.get_mut(&id) else {
            return false;
        };
        let Some(entities) = world.query_active(entry.include, entry.exclude) else {
            return false;
        };

        entry.system.run(world, &entities);
        true
    }

    /// Run every enabled system in activation order
    ///
    /// Each system gets a fresh query result, so it sees the effects of the
    /// systems that ran before it.
    pub fn execute_systems(&mut self, world: &mut World) {
        let order = self.enabled.clone();
        for id in order {
            self.execute_system(id, world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{TransformationComponent, VelocityComponent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> impl FnMut(&mut World, &[Entity]) {
        let log = Rc::clone(log);
        move |_, _| log.borrow_mut().push(tag)
    }

    fn active_world() -> World {
        let mut world = World::new();
        let scene = world.create_scene("main").unwrap();
        world.set_active_scene(Some(scene));
        world
    }

    #[test]
    fn test_systems_run_in_activation_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = SystemScheduler::new();
        let a = scheduler.create_system(recorder(&log, "a"), ComponentType::empty(), ComponentType::empty()).unwrap();
        let b = scheduler.create_system(recorder(&log, "b"), ComponentType::empty(), ComponentType::empty()).unwrap();
        let mut world = active_world();

        scheduler.enable_system(b);
        scheduler.enable_system(a);
        scheduler.execute_systems(&mut world);
        assert_eq!(*log.borrow(), vec!["b", "a"]);

        log.borrow_mut().clear();
        scheduler.disable_system(b);
        scheduler.enable_system(b);
        scheduler.execute_systems(&mut world);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_enable_and_disable_are_idempotent() {
        let mut scheduler = SystemScheduler::new();
        let id = scheduler
            .create_system(|_: &mut World, _: &[Entity]| {}, ComponentType::empty(), ComponentType::empty())
            .unwrap();

        assert!(!scheduler.is_enabled(id));
        assert!(scheduler.enable_system(id));
        assert!(scheduler.enable_system(id));
        assert_eq!(scheduler.enabled_systems().len(), 1);

        assert!(scheduler.disable_system(id));
        assert!(!scheduler.disable_system(id));
        assert!(scheduler.enabled_systems().is_empty());
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let mut scheduler = SystemScheduler::new();
        let mut world = active_world();
        let unknown = SystemId(7);

        assert!(!scheduler.enable_system(unknown));
        assert!(!scheduler.execute_system(unknown, &mut world));
    }

    #[test]
    fn test_no_active_scene_is_a_no_op() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = SystemScheduler::new();
        let id = scheduler.create_system(recorder(&log, "a"), ComponentType::empty(), ComponentType::empty()).unwrap();
        scheduler.enable_system(id);

        let mut world = World::new();
        assert!(!scheduler.execute_system(id, &mut world));
        scheduler.execute_systems(&mut world);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_system_receives_matching_entities() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut scheduler = SystemScheduler::new();
        let id = scheduler
            .create_system(
                move |_: &mut World, entities: &[Entity]| sink.borrow_mut().extend_from_slice(entities),
                ComponentType::VELOCITY,
                ComponentType::COLLIDER,
            )
            .unwrap();

        let mut world = active_world();
        let scene = world.active_scene_id().unwrap();
        let still = world.create_entity(scene, "still").unwrap();
        world.add_component(scene, still, TransformationComponent::default()).unwrap();
        let mover = world.create_entity(scene, "mover").unwrap();
        world.add_component(scene, mover, VelocityComponent::default()).unwrap();

        assert!(scheduler.execute_system(id, &mut world));
        assert_eq!(*seen.borrow(), vec![mover]);
    }

    #[test]
    fn test_systems_introspection() {
        let mut scheduler = SystemScheduler::new();
        let id = scheduler
            .create_named_system(
                "physics",
                |_: &mut World, _: &[Entity]| {},
                ComponentType::VELOCITY,
                ComponentType::empty(),
            )
            .unwrap();
        scheduler.enable_system(id);

        let info = scheduler.systems();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].label, "physics");
        assert_eq!(info[0].include, ComponentType::VELOCITY);
        assert!(info[0].enabled);
    }

    #[test]
    fn test_exhausted_system_ids_are_reported() {
        let mut scheduler = SystemScheduler::new();
        scheduler.next_id = u32::MAX;

        let result =
            scheduler.create_system(|_: &mut World, _: &[Entity]| {}, ComponentType::empty(), ComponentType::empty());
        assert_eq!(result, Err(EcsError::IdsExhausted("system")));
        assert!(scheduler.is_empty());
    }
}
