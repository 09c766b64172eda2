//! End-to-end scenarios driven through the engine tick loop

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use deep_engine::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Enter(Entity, Entity),
    Exit(Entity, Entity),
}

type EventLog = Rc<RefCell<Vec<Event>>>;

fn engine_with_scene() -> (Engine, SceneId) {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.register_builtin_systems().unwrap();
    let scene = engine.world.create_scene("arena").unwrap();
    engine.world.set_active_scene(Some(scene));
    (engine, scene)
}

fn record_collisions(world: &mut World, scene: SceneId) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let enter_log = Rc::clone(&log);
    let exit_log = Rc::clone(&log);

    let scene = world.scene_mut(scene).unwrap();
    scene.set_collision_enter_callback(move |_, _, event: &CollisionEnter| {
        enter_log.borrow_mut().push(Event::Enter(event.entity1, event.entity2));
    });
    scene.set_collision_exit_callback(move |_, _, event: &CollisionExit| {
        exit_log.borrow_mut().push(Event::Exit(event.entity1, event.entity2));
    });
    log
}

fn spawn_box(world: &mut World, scene: SceneId, name: &str, x: f32, speed: f32) -> Entity {
    let entity = world.create_entity(scene, name).unwrap();
    world
        .add_component(scene, entity, TransformationComponent::from_translation(Vec3::new(x, 0.0, 0.0)))
        .unwrap();
    world
        .add_component(scene, entity, ColliderComponent::new(Rect::from_xywh(x, 0.0, 1.0, 1.0)))
        .unwrap();
    if speed != 0.0 {
        world
            .add_component(scene, entity, VelocityComponent::new(Vec3::new(speed, 0.0, 0.0)))
            .unwrap();
    }
    entity
}

#[test]
fn query_matches_include_and_exclude_masks_in_creation_order() {
    let mut world = World::new();
    let scene = world.create_scene("main").unwrap();

    let moving = world.create_entity(scene, "moving").unwrap();
    world.add_component(scene, moving, TransformationComponent::default()).unwrap();
    world.add_component(scene, moving, VelocityComponent::default()).unwrap();

    let solid = world.create_entity(scene, "solid").unwrap();
    world.add_component(scene, solid, TransformationComponent::default()).unwrap();
    world.add_component(scene, solid, ColliderComponent::default()).unwrap();

    let both = world.create_entity(scene, "both").unwrap();
    world.add_component(scene, both, TransformationComponent::default()).unwrap();
    world.add_component(scene, both, VelocityComponent::default()).unwrap();
    world.add_component(scene, both, ColliderComponent::default()).unwrap();

    let bare = world.create_entity(scene, "bare").unwrap();

    assert_eq!(
        world.query(scene, ComponentType::TRANSFORMATION, ComponentType::empty()),
        vec![moving, solid, both]
    );
    assert_eq!(
        world.query(scene, ComponentType::VELOCITY, ComponentType::COLLIDER),
        vec![moving]
    );
    assert_eq!(
        world.query(scene, ComponentType::empty(), ComponentType::TRANSFORMATION),
        vec![bare]
    );
    assert!(world
        .query(scene, ComponentType::HEALTH, ComponentType::empty())
        .is_empty());
}

#[test]
fn systems_run_in_activation_order_and_see_earlier_writes() {
    let (mut engine, scene) = engine_with_scene();
    let ship = engine.world.create_entity(scene, "ship").unwrap();
    engine
        .world
        .add_component(scene, ship, TransformationComponent::default())
        .unwrap();
    engine
        .world
        .add_component(scene, ship, VelocityComponent::default())
        .unwrap();
    engine
        .world
        .add_component(scene, ship, AccelerationComponent::new(Vec3::new(1.0, 0.0, 0.0)))
        .unwrap();

    engine.tick();
    engine.tick();

    // Acceleration runs before velocity, so the first tick already moves the ship.
    let translation = engine
        .world
        .component::<TransformationComponent>(scene, ship)
        .unwrap()
        .translation;
    assert_relative_eq!(translation.x, 3.0);
}

#[test]
fn collision_enters_every_overlapping_tick_and_exits_once() {
    let (mut engine, scene) = engine_with_scene();
    let still = spawn_box(&mut engine.world, scene, "still", 0.0, 0.0);
    let mover = spawn_box(&mut engine.world, scene, "mover", 2.0, -0.5);
    let log = record_collisions(&mut engine.world, scene);

    let mut per_tick = Vec::new();
    for _ in 0..8 {
        engine.tick();
        per_tick.push(log.borrow_mut().drain(..).collect::<Vec<_>>());
    }

    let enter = Event::Enter(still, mover);
    let exit = Event::Exit(still, mover);
    assert_eq!(
        per_tick,
        vec![
            vec![],
            vec![],
            vec![enter],
            vec![enter],
            vec![enter],
            vec![exit],
            vec![],
            vec![],
        ]
    );
    assert!(engine.world.scene(scene).unwrap().contacts().is_empty());
}

#[test]
fn collider_stays_on_its_entity() {
    let (mut engine, scene) = engine_with_scene();
    let mover = spawn_box(&mut engine.world, scene, "mover", 1.0, 0.25);

    engine.run_for(4);

    let world = &engine.world;
    let translation = world.component::<TransformationComponent>(scene, mover).unwrap().translation;
    let bounds = world.component::<ColliderComponent>(scene, mover).unwrap().bounds;
    assert_relative_eq!(translation.x, 2.0);
    assert_relative_eq!(bounds.position.x, translation.x);
    assert_relative_eq!(bounds.position.y, 0.0);
}

#[test]
fn deleted_entity_is_visible_until_the_end_of_its_tick() {
    let (mut engine, scene) = engine_with_scene();
    let victim = engine.world.create_entity(scene, "victim").unwrap();
    engine
        .world
        .add_component(scene, victim, HealthComponent::new(1, 1))
        .unwrap();

    let reaper = engine
        .scheduler
        .create_system(
            |world: &mut World, entities: &[Entity]| {
                let Some(scene) = world.active_scene_id() else {
                    return;
                };
                for &entity in entities {
                    world.mark_entity_for_deletion(scene, entity);
                }
            },
            ComponentType::HEALTH,
            ComponentType::empty(),
        )
        .unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let witness = engine
        .scheduler
        .create_system(
            move |_: &mut World, entities: &[Entity]| sink.borrow_mut().push(entities.len()),
            ComponentType::HEALTH,
            ComponentType::empty(),
        )
        .unwrap();
    engine.scheduler.enable_system(reaper);
    engine.scheduler.enable_system(witness);

    let report = engine.tick();
    engine.tick();

    assert_eq!(report.entities, 1);
    assert_eq!(*seen.borrow(), vec![1, 0]);
    assert!(engine.world.scene(scene).unwrap().entities().find_entity("victim").is_none());
}

#[test]
fn removing_a_colliding_entity_fires_exit() {
    let (mut engine, scene) = engine_with_scene();
    let left = spawn_box(&mut engine.world, scene, "left", 0.0, 0.0);
    let right = spawn_box(&mut engine.world, scene, "right", 0.5, 0.0);
    let log = record_collisions(&mut engine.world, scene);

    engine.tick();
    engine.world.mark_entity_for_deletion(scene, right);
    engine.tick();
    engine.tick();

    assert_eq!(
        *log.borrow(),
        vec![
            Event::Enter(left, right),
            Event::Enter(left, right),
            Event::Exit(left, right),
        ]
    );
}

#[test]
fn switching_scenes_only_simulates_the_active_one() {
    let (mut engine, first) = engine_with_scene();
    let first_ship = spawn_box(&mut engine.world, first, "ship", 0.0, 1.0);
    let second = engine.world.create_scene("menu").unwrap();
    let second_ship = spawn_box(&mut engine.world, second, "ship", 0.0, 1.0);

    engine.tick();
    engine.world.set_active_scene(Some(second));
    engine.tick();
    engine.tick();
    engine.world.set_active_scene(None);
    engine.tick();

    let x = |scene, entity| {
        engine
            .world
            .component::<TransformationComponent>(scene, entity)
            .unwrap()
            .translation
            .x
    };
    assert_relative_eq!(x(first, first_ship), 1.0);
    assert_relative_eq!(x(second, second_ship), 2.0);
}

#[test]
fn exported_scene_imports_with_the_same_component_masks() {
    let (mut engine, scene) = engine_with_scene();
    let ship = spawn_box(&mut engine.world, scene, "ship", 1.5, -0.5);
    engine
        .world
        .add_component(scene, ship, HealthComponent::new(2, 4))
        .unwrap();
    engine
        .world
        .add_component(
            scene,
            ship,
            DrawableComponent::new(GpuHandle(1), GpuHandle(2), 36).with_texture(GpuHandle(9), 1),
        )
        .unwrap();
    spawn_box(&mut engine.world, scene, "rock", -3.0, 0.0);
    engine.world.create_entity(scene, "empty").unwrap();
    engine.run_for(3);

    let mut root = ObjectNode::new();
    export_scene(&engine.world, scene, &mut root).unwrap();
    let text = root.to_ron_string().unwrap();

    let mut restored = World::new();
    let scenes = import_scenes(&mut restored, &ObjectNode::from_ron_str(&text).unwrap()).unwrap();
    assert_eq!(scenes.len(), 1);
    assert_eq!(restored.scene(scenes[0]).unwrap().name(), "arena");

    let original = engine.world.scene(scene).unwrap().entities();
    let copy = restored.scene(scenes[0]).unwrap().entities();
    let names = |collection: &deep_engine::ecs::EntityCollection| {
        collection
            .enum_entities()
            .into_iter()
            .map(|entity| {
                (
                    collection.entity_name(entity).unwrap().to_string(),
                    collection.get_component_types(entity).unwrap(),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(names(copy), names(original));

    let ship_copy = copy.find_entity("ship").unwrap();
    let translation = restored
        .component::<TransformationComponent>(scenes[0], ship_copy)
        .unwrap()
        .translation;
    assert_relative_eq!(translation.x, 0.0);
    let health = restored.component::<HealthComponent>(scenes[0], ship_copy).unwrap();
    assert_eq!((health.current, health.max), (2, 4));
}
