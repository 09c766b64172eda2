//! Core engine implementation
//!
//! Ties a [`World`] to a [`SystemScheduler`] and drives them one tick at a
//! time: enabled systems run in activation order, then pending deletions are
//! flushed so the next tick starts from a consistent state.

use thiserror::Error;

use crate::config::{Config, ConfigError, EngineConfig};
use crate::ecs::systems::{self, BuiltinSystems};
use crate::ecs::{EcsError, FlushReport, SystemScheduler, World};

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Main engine struct
///
/// The world and the scheduler are separate fields so systems can borrow the
/// world mutably while the scheduler iterates over them.
#[derive(Debug)]
pub struct Engine {
    /// ECS world containing all scenes, entities and components
    pub world: World,

    /// Registered systems and their execution order
    pub scheduler: SystemScheduler,

    config: EngineConfig,
    tick_count: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine (component capacity {}, auto flush {})",
            config.component_capacity,
            config.auto_flush
        );

        Ok(Self {
            world: World::from_config(&config),
            scheduler: SystemScheduler::new(),
            config,
            tick_count: 0,
        })
    }

    /// Create an engine from a TOML or RON configuration file
    pub fn from_config_file(path: &str) -> Result<Self, EngineError> {
        log::info!("Loading engine configuration from {}", path);
        Self::new(EngineConfig::load_from_file(path)?)
    }

    /// Register and enable the acceleration, velocity and collision systems
    pub fn register_builtin_systems(&mut self) -> Result<BuiltinSystems, EcsError> {
        systems::register_builtin_systems(&mut self.scheduler)
    }

    /// Advance the simulation by one tick
    ///
    /// Returns what the end-of-tick flush removed; empty when auto flush is
    /// off.
    pub fn tick(&mut self) -> FlushReport {
        self.tick_count += 1;
        log::trace!("Tick {}", self.tick_count);

        self.scheduler.execute_systems(&mut self.world);

        if self.config.auto_flush {
            self.world.flush_deletions()
        } else {
            FlushReport::default()
        }
    }

    /// Run `ticks` ticks
    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Number of ticks run so far
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the ECS world
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
