//! Scene export and import
//!
//! Scenes are written through [`ObjectContainer`], a minimal key-value contract:
//! string elements and named nested containers. The layout is
//!
//! ```text
//! scenes/<scene name>/<entity name>/<kind>_component/<key> = <value>
//! ```
//!
//! [`ObjectNode`] is an in-memory container that can be stored as RON and read
//! back by [`import_scenes`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ecs::components::{
    AccelerationComponent, ColliderComponent, DrawableComponent, HealthComponent,
    TransformationComponent, VelocityComponent,
};
use crate::ecs::{ComponentKind, EcsError, Entity, World};
use crate::foundation::math::{Rect, Vec2, Vec3};
use crate::render::{GpuHandle, RenderStrategy};
use crate::scene::SceneId;

/// Name of the top-level container holding all scenes
pub const SCENES_CONTAINER: &str = "scenes";

const COMPONENT_SUFFIX: &str = "_component";

/// Destination of a scene export
pub trait ObjectContainer {
    /// Add a string element
    fn add_element(&mut self, key: &str, value: &str);

    /// Add a named nested container, or reuse the one with that name
    fn add_container(&mut self, name: &str) -> &mut dyn ObjectContainer;
}

/// Scene format errors
#[derive(thiserror::Error, Debug)]
pub enum SceneFormatError {
    /// Container missing from the source
    #[error("Missing container '{0}'")]
    MissingContainer(String),

    /// Element missing from a component container
    #[error("Missing element '{key}' in '{container}'")]
    MissingElement {
        /// Container that should hold the element
        container: String,
        /// Missing key
        key: String,
    },

    /// Element that does not parse as the expected type
    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue {
        /// Element key
        key: String,
        /// Raw value
        value: String,
    },

    /// Component container with an unknown kind
    #[error("Unknown component container '{0}'")]
    UnknownComponent(String),

    /// Entity or scene could not be created
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// RON parse or serialization error
    #[error("RON error: {0}")]
    Ron(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory [`ObjectContainer`] that keeps insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNode {
    /// String elements
    pub elements: Vec<(String, String)>,

    /// Named nested containers
    pub containers: Vec<(String, ObjectNode)>,
}

impl ObjectContainer for ObjectNode {
    fn add_element(&mut self, key: &str, value: &str) {
        match self.elements.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.elements.push((key.to_string(), value.to_string())),
        }
    }

    fn add_container(&mut self, name: &str) -> &mut dyn ObjectContainer {
        self.child_mut(name)
    }
}

impl ObjectNode {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an element
    pub fn element(&self, key: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Nested container by name
    pub fn container(&self, name: &str) -> Option<&Self> {
        self.containers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Nested container by name, created if missing
    pub fn child_mut(&mut self, name: &str) -> &mut Self {
        let index = match self.containers.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.containers.push((name.to_string(), Self::new()));
                self.containers.len() - 1
            }
        };
        &mut self.containers[index].1
    }

    /// Serialize to a pretty RON string
    pub fn to_ron_string(&self) -> Result<String, SceneFormatError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneFormatError::Ron(e.to_string()))
    }

    /// Parse a RON string
    pub fn from_ron_str(source: &str) -> Result<Self, SceneFormatError> {
        ron::from_str(source).map_err(|e| SceneFormatError::Ron(e.to_string()))
    }

    /// Write as RON to `path`
    pub fn save_to_file(&self, path: &str) -> Result<(), SceneFormatError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// Read RON from `path`
    pub fn load_from_file(path: &str) -> Result<Self, SceneFormatError> {
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }
}

/// Write one scene's entities and components into `destination`
pub fn export_scene(
    world: &World,
    scene_id: SceneId,
    destination: &mut dyn ObjectContainer,
) -> Result<(), EcsError> {
    let scene = world.scene(scene_id).ok_or(EcsError::SceneNotFound(scene_id))?;
    let scene_container = destination
        .add_container(SCENES_CONTAINER)
        .add_container(scene.name());

    let collection = scene.entities();
    let entities = collection.enum_entities();
    for &entity in &entities {
        let Some(name) = collection.entity_name(entity) else {
            continue;
        };
        let entity_container = scene_container.add_container(name);

        for kind in ComponentKind::ALL {
            let live = collection
                .get_component_id(entity, kind)
                .is_some_and(|id| world.components().contains(id));
            if live {
                let container = entity_container.add_container(&format!("{}{}", kind.name(), COMPONENT_SUFFIX));
                export_component(world, scene_id, entity, kind, container);
            }
        }
    }

    log::info!("Exported scene '{}' with {} entities", scene.name(), entities.len());
    Ok(())
}

fn add_vec3(container: &mut dyn ObjectContainer, prefix: &str, value: &Vec3) {
    container.add_element(&format!("{prefix}_x"), &value.x.to_string());
    container.add_element(&format!("{prefix}_y"), &value.y.to_string());
    container.add_element(&format!("{prefix}_z"), &value.z.to_string());
}

fn export_component(
    world: &World,
    scene: SceneId,
    entity: Entity,
    kind: ComponentKind,
    container: &mut dyn ObjectContainer,
) {
    match kind {
        ComponentKind::Drawable => {
            if let Some(drawable) = world.component::<DrawableComponent>(scene, entity) {
                container.add_element("vertex_buffer", &drawable.vertex_buffer.raw().to_string());
                container.add_element("vertex_array", &drawable.vertex_array.raw().to_string());
                container.add_element("vertex_count", &drawable.vertex_count.to_string());
                if let Some(program) = drawable.program {
                    container.add_element("program", &program.raw().to_string());
                }
                if let Some(texture) = drawable.texture {
                    container.add_element("texture", &texture.raw().to_string());
                }
                container.add_element("texture_unit", &drawable.texture_unit.to_string());
                container.add_element("strategy", drawable.strategy.name());
            }
        }
        ComponentKind::Transformation => {
            if let Some(transformation) = world.component::<TransformationComponent>(scene, entity) {
                add_vec3(container, "translation", &transformation.translation);
                add_vec3(container, "scaling", &transformation.scaling);
                add_vec3(container, "rotation", &transformation.rotation);
            }
        }
        ComponentKind::Collider => {
            if let Some(collider) = world.component::<ColliderComponent>(scene, entity) {
                let bounds = &collider.bounds;
                container.add_element("collider_position_x", &bounds.position.x.to_string());
                container.add_element("collider_position_y", &bounds.position.y.to_string());
                container.add_element("collider_size_x", &bounds.size.x.to_string());
                container.add_element("collider_size_y", &bounds.size.y.to_string());
            }
        }
        ComponentKind::Velocity => {
            if let Some(velocity) = world.component::<VelocityComponent>(scene, entity) {
                add_vec3(container, "velocity", &velocity.velocity);
            }
        }
        ComponentKind::Acceleration => {
            if let Some(acceleration) = world.component::<AccelerationComponent>(scene, entity) {
                add_vec3(container, "acceleration", &acceleration.acceleration);
            }
        }
        ComponentKind::Health => {
            if let Some(health) = world.component::<HealthComponent>(scene, entity) {
                container.add_element("health_current", &health.current.to_string());
                container.add_element("health_max", &health.max.to_string());
            }
        }
    }
}

/// Rebuild every scene found under the `scenes` container of `source`
///
/// Returns the ids of the created scenes in source order. Drawables exported
/// with a custom strategy come back with the classic one.
pub fn import_scenes(world: &mut World, source: &ObjectNode) -> Result<Vec<SceneId>, SceneFormatError> {
    let scenes = source
        .container(SCENES_CONTAINER)
        .ok_or_else(|| SceneFormatError::MissingContainer(SCENES_CONTAINER.to_string()))?;

    let mut created = Vec::with_capacity(scenes.containers.len());
    for (scene_name, scene_node) in &scenes.containers {
        let scene = world.create_scene(scene_name.as_str())?;

        for (entity_name, entity_node) in &scene_node.containers {
            let entity = world.create_entity(scene, entity_name.as_str())?;
            for (container_name, component_node) in &entity_node.containers {
                import_component(world, scene, entity, container_name, component_node)?;
            }
        }

        log::info!("Imported scene '{}' with {} entities", scene_name, scene_node.containers.len());
        created.push(scene);
    }

    Ok(created)
}

struct Reader<'a> {
    container: &'a str,
    node: &'a ObjectNode,
}

impl Reader<'_> {
    fn optional<T: FromStr>(&self, key: &str) -> Result<Option<T>, SceneFormatError> {
        self.node
            .element(key)
            .map(|value| {
                value.parse().map_err(|_| SceneFormatError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    fn required<T: FromStr>(&self, key: &str) -> Result<T, SceneFormatError> {
        self.optional(key)?.ok_or_else(|| SceneFormatError::MissingElement {
            container: self.container.to_string(),
            key: key.to_string(),
        })
    }

    fn vec3(&self, prefix: &str) -> Result<Vec3, SceneFormatError> {
        Ok(Vec3::new(
            self.required(&format!("{prefix}_x"))?,
            self.required(&format!("{prefix}_y"))?,
            self.required(&format!("{prefix}_z"))?,
        ))
    }
}

fn import_component(
    world: &mut World,
    scene: SceneId,
    entity: Entity,
    container: &str,
    node: &ObjectNode,
) -> Result<(), SceneFormatError> {
    let kind = container
        .strip_suffix(COMPONENT_SUFFIX)
        .and_then(ComponentKind::from_name)
        .ok_or_else(|| SceneFormatError::UnknownComponent(container.to_string()))?;
    let reader = Reader { container, node };

    match kind {
        ComponentKind::Drawable => {
            let strategy = reader
                .optional::<String>("strategy")?
                .and_then(|name| RenderStrategy::from_name(&name))
                .unwrap_or(RenderStrategy::Classic);
            let mut drawable = DrawableComponent::new(
                GpuHandle(reader.required("vertex_buffer")?),
                GpuHandle(reader.required("vertex_array")?),
                reader.required("vertex_count")?,
            )
            .with_strategy(strategy);
            drawable.program = reader.optional("program")?.map(GpuHandle);
            drawable.texture = reader.optional("texture")?.map(GpuHandle);
            drawable.texture_unit = reader.optional("texture_unit")?.unwrap_or(0);
            world.add_component(scene, entity, drawable)?;
        }
        ComponentKind::Transformation => {
            let transformation = TransformationComponent {
                translation: reader.vec3("translation")?,
                scaling: reader.vec3("scaling")?,
                rotation: reader.vec3("rotation")?,
            };
            world.add_component(scene, entity, transformation)?;
        }
        ComponentKind::Collider => {
            let bounds = Rect::new(
                Vec2::new(reader.required("collider_position_x")?, reader.required("collider_position_y")?),
                Vec2::new(reader.required("collider_size_x")?, reader.required("collider_size_y")?),
            );
            world.add_component(scene, entity, ColliderComponent::new(bounds))?;
        }
        ComponentKind::Velocity => {
            world.add_component(scene, entity, VelocityComponent::new(reader.vec3("velocity")?))?;
        }
        ComponentKind::Acceleration => {
            world.add_component(scene, entity, AccelerationComponent::new(reader.vec3("acceleration")?))?;
        }
        ComponentKind::Health => {
            let health = HealthComponent::new(reader.required("health_current")?, reader.required("health_max")?);
            world.add_component(scene, entity, health)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentType;
    use approx::assert_relative_eq;

    fn sample_world() -> (World, SceneId) {
        let mut world = World::new();
        let scene = world.create_scene("level").unwrap();

        let ship = world.create_entity(scene, "ship").unwrap();
        world
            .add_component(scene, ship, TransformationComponent::from_translation(Vec3::new(0.1, 2.5, -3.0)))
            .unwrap();
        world
            .add_component(scene, ship, VelocityComponent::new(Vec3::new(0.3, 0.0, 0.0)))
            .unwrap();
        world
            .add_component(scene, ship, ColliderComponent::new(Rect::from_xywh(0.0, 1.0, 2.0, 0.5)))
            .unwrap();

        let sky = world.create_entity(scene, "sky").unwrap();
        world
            .add_component(
                scene,
                sky,
                DrawableComponent::new(GpuHandle(5), GpuHandle(6), 36)
                    .with_program(GpuHandle(7))
                    .with_strategy(RenderStrategy::Skybox),
            )
            .unwrap();
        world.add_component(scene, sky, HealthComponent::new(3, 5)).unwrap();

        world.create_entity(scene, "marker").unwrap();
        (world, scene)
    }

    #[test]
    fn test_export_layout() {
        let (world, scene) = sample_world();
        let mut root = ObjectNode::new();
        export_scene(&world, scene, &mut root).unwrap();

        let ship = root
            .container("scenes")
            .and_then(|scenes| scenes.container("level"))
            .and_then(|level| level.container("ship"))
            .unwrap();
        let transformation = ship.container("transformation_component").unwrap();
        assert_eq!(transformation.element("translation_y"), Some("2.5"));
        assert_eq!(transformation.element("scaling_x"), Some("1"));
        assert_eq!(
            ship.container("collider_component").unwrap().element("collider_size_y"),
            Some("0.5")
        );
        assert!(ship.container("drawable_component").is_none());
    }

    #[test]
    fn test_export_unknown_scene() {
        let world = World::new();
        let mut root = ObjectNode::new();
        let missing = SceneId::new(3);
        assert_eq!(
            export_scene(&world, missing, &mut root),
            Err(EcsError::SceneNotFound(missing))
        );
    }

    #[test]
    fn test_round_trip_through_ron() {
        let (world, scene) = sample_world();
        let mut root = ObjectNode::new();
        export_scene(&world, scene, &mut root).unwrap();
        let text = root.to_ron_string().unwrap();

        let mut restored = World::new();
        let ids = import_scenes(&mut restored, &ObjectNode::from_ron_str(&text).unwrap()).unwrap();
        assert_eq!(ids.len(), 1);

        let source = world.scene(scene).unwrap().entities();
        let copy = restored.scene(ids[0]).unwrap().entities();
        assert_eq!(copy.len(), source.len());
        for entity in source.enum_entities() {
            let name = source.entity_name(entity).unwrap();
            let twin = copy.find_entity(name).unwrap();
            assert_eq!(copy.get_component_types(twin), source.get_component_types(entity));
        }

        let ship = copy.find_entity("ship").unwrap();
        let translation = restored
            .component::<TransformationComponent>(ids[0], ship)
            .unwrap()
            .translation;
        assert_relative_eq!(translation, Vec3::new(0.1, 2.5, -3.0));

        let sky = copy.find_entity("sky").unwrap();
        let drawable = restored.component::<DrawableComponent>(ids[0], sky).unwrap();
        assert!(matches!(drawable.strategy, RenderStrategy::Skybox));
        assert_eq!(drawable.program, Some(GpuHandle(7)));
        assert_eq!(drawable.texture, None);
    }

    #[test]
    fn test_import_into_existing_scene_name_fails() {
        let (mut world, scene) = sample_world();
        let mut root = ObjectNode::new();
        export_scene(&world, scene, &mut root).unwrap();

        let result = import_scenes(&mut world, &root);
        assert!(matches!(
            result,
            Err(SceneFormatError::Ecs(EcsError::DuplicateSceneName(ref name))) if name == "level"
        ));
    }

    #[test]
    fn test_import_reports_bad_values() {
        let mut root = ObjectNode::new();
        let velocity = root
            .child_mut("scenes")
            .child_mut("broken")
            .child_mut("rock")
            .child_mut("velocity_component");
        velocity.add_element("velocity_x", "fast");
        velocity.add_element("velocity_y", "0");
        velocity.add_element("velocity_z", "0");

        let mut world = World::new();
        assert!(matches!(
            import_scenes(&mut world, &root),
            Err(SceneFormatError::InvalidValue { ref key, .. }) if key == "velocity_x"
        ));
    }

    #[test]
    fn test_import_requires_scenes_container() {
        let mut world = World::new();
        assert!(matches!(
            import_scenes(&mut world, &ObjectNode::new()),
            Err(SceneFormatError::MissingContainer(_))
        ));
    }

    #[test]
    fn test_add_container_reuses_existing() {
        let mut root = ObjectNode::new();
        root.add_container("a").add_element("x", "1");
        root.add_container("a").add_element("y", "2");

        assert_eq!(root.containers.len(), 1);
        assert_eq!(root.container("a").unwrap().elements.len(), 2);
    }

    #[test]
    fn test_deleted_component_is_not_exported() {
        let (mut world, scene) = sample_world();
        let ship = world.scene(scene).unwrap().entities().find_entity("ship").unwrap();
        let velocity = world.component_id(scene, ship, ComponentKind::Velocity).unwrap();
        world.components_mut().delete(velocity);

        let mut root = ObjectNode::new();
        export_scene(&world, scene, &mut root).unwrap();
        let exported = root
            .container("scenes")
            .and_then(|scenes| scenes.container("level"))
            .and_then(|level| level.container("ship"))
            .unwrap();
        assert!(exported.container("velocity_component").is_none());

        let mut restored = World::new();
        let ids = import_scenes(&mut restored, &root).unwrap();
        let copy = restored.scene(ids[0]).unwrap().entities();
        assert_eq!(
            copy.get_component_types(copy.find_entity("ship").unwrap()),
            Some(ComponentType::TRANSFORMATION | ComponentType::COLLIDER)
        );
    }

    #[test]
    fn test_removed_component_round_trips() {
        let (mut world, scene) = sample_world();
        let ship = world.scene(scene).unwrap().entities().find_entity("ship").unwrap();
        world.remove_component::<VelocityComponent>(scene, ship).unwrap();

        let mut root = ObjectNode::new();
        export_scene(&world, scene, &mut root).unwrap();
        let mut restored = World::new();
        let ids = import_scenes(&mut restored, &root).unwrap();

        let copy = restored.scene(ids[0]).unwrap().entities();
        assert_eq!(
            copy.get_component_types(copy.find_entity("ship").unwrap()),
            world.scene(scene).unwrap().entities().get_component_types(ship)
        );
    }
}
