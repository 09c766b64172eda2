//! Error type shared by the ECS operations

use super::component::ComponentId;
use super::entity::Entity;
use crate::scene::SceneId;

/// Failures reported by entity, component, system and scene operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// No scene with this id is registered
    #[error("Scene {0} not found")]
    SceneNotFound(SceneId),

    /// The entity does not exist in the target collection
    #[error("Entity {0} not found")]
    EntityNotFound(Entity),

    /// The component id is unknown or was deleted
    #[error("Component {0} not found")]
    ComponentNotFound(ComponentId),

    /// Every id of this kind has been handed out
    #[error("No {0} ids left")]
    IdsExhausted(&'static str),

    /// Another scene already uses this name
    #[error("Scene name '{0}' is already in use")]
    DuplicateSceneName(String),

    /// Another entity in the collection already uses this name
    #[error("Entity name '{0}' is already in use")]
    DuplicateEntityName(String),
}
