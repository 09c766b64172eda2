//! Configuration system
//!
//! Engine settings can be loaded from and saved to TOML or RON files; the
//! format is picked from the file extension.

pub use serde::{Deserialize, Serialize};

use crate::foundation::logging::LevelFilter;
use crate::foundation::math::Vec3;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its allowed range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Initial camera placement for newly created scenes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: Vec3,

    /// Viewing direction
    pub front: Vec3,

    /// Up vector
    pub up: Vec3,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near: f32,

    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.5, 0.5, 0.0),
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log level, used when `RUST_LOG` is not set
    pub log_level: String,

    /// Slots reserved up front in each component store
    pub component_capacity: usize,

    /// Flush pending deletions at the end of every tick
    pub auto_flush: bool,

    /// Camera given to new scenes
    pub camera: CameraConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            component_capacity: 1000,
            auto_flush: true,
            camera: CameraConfig::default(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the initial capacity of each component store
    pub fn with_component_capacity(mut self, capacity: usize) -> Self {
        self.component_capacity = capacity;
        self
    }

    /// Enable or disable the end-of-tick deletion flush
    pub fn with_auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    /// Set the camera given to new scenes
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Parsed log level
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level.parse().map_err(|_| ConfigError::Invalid {
            field: "log_level",
            reason: format!("unknown level '{}'", self.log_level),
        })
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid {
                field: "camera.fov_degrees",
                reason: format!("{} is not in (0, 180)", camera.fov_degrees),
            });
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::Invalid {
                field: "camera.near",
                reason: format!("clip range {}..{} is empty", camera.near, camera.far),
            });
        }
        if camera.front.norm() == 0.0 {
            return Err(ConfigError::Invalid {
                field: "camera.front",
                reason: "direction has zero length".to_string(),
            });
        }

        Ok(())
    }
}
