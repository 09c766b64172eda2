//! Scene management
//!
//! A scene is a named entity collection with its own camera, collision
//! callbacks and contact state. The [`SceneRegistry`] owns every scene and
//! tracks which one is active. Scenes can be exported to, and rebuilt from, a
//! nested key-value container.

mod export;
mod registry;
#[allow(clippy::module_inception)]
mod scene;

pub use export::{export_scene, import_scenes, ObjectContainer, ObjectNode, SceneFormatError, SCENES_CONTAINER};
pub use registry::SceneRegistry;
pub use scene::{Scene, SceneId};
