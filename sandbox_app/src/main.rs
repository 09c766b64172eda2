//! Headless sandbox: two ships fly into each other, collide, and the scene is
//! exported to RON afterwards.
//!
//! Usage: `sandbox [config.toml|config.ron] [output.ron]`

use deep_engine::prelude::*;
use deep_engine::render::{DepthFunction, UniformValue};

const TICKS: u64 = 40;
const SHIP_SPEED: f32 = 0.05;
const COLLISION_DAMAGE: u32 = 1;
const DEFAULT_OUTPUT: &str = "sandbox_scene.ron";

/// Backend that traces draw calls instead of issuing them
#[derive(Debug, Default)]
struct TraceBackend;

impl RenderBackend for TraceBackend {
    fn use_program(&mut self, _program: GpuHandle) {}

    fn bind_vertex_array(&mut self, _vertex_array: GpuHandle) {}

    fn bind_texture(&mut self, _texture: GpuHandle, _unit: u32) {}

    fn set_uniform(&mut self, _program: GpuHandle, _name: &str, _value: UniformValue) {}

    fn set_depth_mask(&mut self, _enabled: bool) {}

    fn set_depth_function(&mut self, _function: DepthFunction) {}

    fn draw(&mut self, vertex_buffer: GpuHandle, vertex_count: u32) {
        log::trace!("draw {} vertices from buffer {}", vertex_count, vertex_buffer.raw());
    }
}

#[derive(Debug, Clone, Copy)]
struct Headless;

impl Viewport for Headless {
    fn width(&self) -> u32 {
        1280
    }

    fn height(&self) -> u32 {
        720
    }
}

fn spawn_ship(world: &mut World, scene: SceneId, name: &str, x: f32, speed: f32) -> Result<Entity, EcsError> {
    let ship = world.create_entity(scene, name)?;
    world.add_component(scene, ship, TransformationComponent::from_translation(Vec3::new(x, 0.0, 0.0)))?;
    world.add_component(scene, ship, VelocityComponent::new(Vec3::new(speed, 0.0, 0.0)))?;
    world.add_component(scene, ship, ColliderComponent::new(Rect::from_xywh(x - 0.1, -0.1, 0.2, 0.2)))?;
    world.add_component(scene, ship, HealthComponent::new(3, 3))?;
    world.add_component(
        scene,
        ship,
        DrawableComponent::new(GpuHandle(1), GpuHandle(1), 36).with_program(GpuHandle(1)),
    )?;
    Ok(ship)
}

fn build_scene(world: &mut World) -> Result<SceneId, EcsError> {
    let scene = world.create_scene("arena")?;
    spawn_ship(world, scene, "red", -0.5, SHIP_SPEED)?;
    spawn_ship(world, scene, "blue", 0.5, -SHIP_SPEED)?;

    let Some(arena) = world.scene_mut(scene) else {
        return Err(EcsError::SceneNotFound(scene));
    };
    arena.set_collision_enter_callback(|world, scene, event: &CollisionEnter| {
        log::info!(
            "Collision {} <-> {} (difference {:.2}, {:.2})",
            event.entity1,
            event.entity2,
            event.difference.x,
            event.difference.y
        );
        for entity in [event.entity1, event.entity2] {
            let destroyed = world
                .component_mut::<HealthComponent>(scene, entity)
                .is_some_and(|health| {
                    health.damage(COLLISION_DAMAGE);
                    !health.is_alive()
                });
            if destroyed && world.mark_entity_for_deletion(scene, entity) {
                log::info!("{} destroyed", entity);
            }
        }
    });
    arena.set_collision_exit_callback(|_, _, event: &CollisionExit| {
        log::info!("Separated {} and {}", event.entity1, event.entity2);
    });

    world.set_active_scene(Some(scene));
    Ok(scene)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::default(),
    };
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    deep_engine::foundation::logging::init_with_level(config.level_filter()?);
    log::info!("Starting sandbox");

    let mut engine = Engine::new(config)?;
    engine.register_builtin_systems()?;
    let render = engine.scheduler.create_named_system(
        "render",
        deep_engine::ecs::systems::RenderSystem::new(TraceBackend, Headless),
        ComponentType::DRAWABLE | ComponentType::TRANSFORMATION,
        ComponentType::empty(),
    )?;
    engine.scheduler.enable_system(render);

    let scene = build_scene(&mut engine.world)?;

    for _ in 0..TICKS {
        let report = engine.tick();
        if !report.is_empty() {
            log::info!("Tick {}: removed {} entities", engine.tick_count(), report.entities);
        }
    }

    let remaining = engine.world.query(scene, ComponentType::empty(), ComponentType::empty());
    log::info!("{} entities left after {} ticks", remaining.len(), engine.tick_count());

    let mut root = ObjectNode::new();
    export_scene(&engine.world, scene, &mut root)?;
    root.save_to_file(&output)?;
    log::info!("Exported scene to {}", output);

    let mut reloaded = World::new();
    let scenes = import_scenes(&mut reloaded, &ObjectNode::load_from_file(&output)?)?;
    log::info!("Reloaded {} scene(s) from {}", scenes.len(), output);

    Ok(())
}
