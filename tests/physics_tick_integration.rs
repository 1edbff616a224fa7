//! Physics tick integration tests: solver, conflict resolver and commit
//! driven through `physics_update` on a real `World`.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use glam::Vec2;

use gridmotion::components::boxcollider::{BoxCollider, Colliders};
use gridmotion::components::mapposition::MapPosition;
use gridmotion::components::motion::{Facing, Motion};
use gridmotion::components::objectkind::{CollisionFilter, ObjectKind};
use gridmotion::components::owner::Owner;
use gridmotion::components::spatial::SpatialBundle;
use gridmotion::components::targetposition::TargetPosition;
use gridmotion::events::contact::{ContactDirection, ContactEvent};
use gridmotion::resources::level::GridLevel;
use gridmotion::resources::physicsworld::PhysicsWorld;
use gridmotion::systems::physics::{physics_update, setup_physics};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn make_world() -> World {
    let mut world = World::new();
    setup_physics(&mut world);
    world
}

fn spawn_wall(world: &mut World, level: &mut GridLevel, pos: Vec2, size: Vec2) -> Entity {
    let colliders = Colliders::single(BoxCollider::new(size.x, size.y).reporting());
    let entity = world
        .spawn(SpatialBundle::new(ObjectKind::ConcreteWall, pos, size).with_colliders(colliders))
        .id();
    level.insert(entity, pos, pos + size);
    entity
}

fn spawn_mover(world: &mut World, kind: ObjectKind, pos: Vec2, facing: Facing, speed: f32) -> Entity {
    let entity = world
        .spawn(
            SpatialBundle::new(kind, pos, Vec2::splat(16.0))
                .with_motion(Motion::facing(facing, speed))
                .with_colliders(Colliders::single(BoxCollider::new(16.0, 16.0).reporting())),
        )
        .id();
    world.resource_mut::<PhysicsWorld>().register(entity);
    entity
}

fn install(world: &mut World, level: GridLevel) {
    world.resource_mut::<PhysicsWorld>().set_level(Box::new(level));
}

fn position(world: &World, entity: Entity) -> Vec2 {
    world.get::<MapPosition>(entity).unwrap().pos
}

fn read_contacts(state: &mut SystemState<MessageReader<ContactEvent>>, world: &mut World) -> Vec<ContactEvent> {
    let mut reader = state.get_mut(world);
    reader.read().copied().collect()
}

// ==================== SOLVER ====================

#[test]
fn free_mover_integrates_velocity() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(100.0, 100.0), Facing::Right, 50.0);

    physics_update(&mut world, 0.1);

    assert!(vec_approx_eq(position(&world, a), Vec2::new(105.0, 100.0)));
    let target = world.get::<TargetPosition>(a).unwrap().pos;
    assert_eq!(target, position(&world, a));
}

#[test]
fn wall_stops_mover_and_both_sides_report() {
    let mut world = make_world();
    let mut level = GridLevel::new(32.0);
    let wall = spawn_wall(&mut world, &mut level, Vec2::new(104.0, 100.0), Vec2::splat(16.0));
    install(&mut world, level);
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(100.0, 100.0), Facing::Right, 50.0);
    let mut contacts = SystemState::<MessageReader<ContactEvent>>::new(&mut world);

    physics_update(&mut world, 0.1);

    assert_eq!(position(&world, a), Vec2::new(100.0, 100.0));
    let events = read_contacts(&mut contacts, &mut world);
    assert_eq!(events.len(), 2);
    assert!(events.contains(&ContactEvent {
        subject: wall,
        other: a,
        collider: 0,
        direction: ContactDirection::Left,
    }));
    assert!(events.contains(&ContactEvent {
        subject: a,
        other: wall,
        collider: 0,
        direction: ContactDirection::Right,
    }));
}

#[test]
fn blocked_mover_stops_on_the_grid_outside_the_wall() {
    let mut world = make_world();
    let mut level = GridLevel::new(32.0);
    spawn_wall(&mut world, &mut level, Vec2::new(120.0, 96.0), Vec2::splat(16.0));
    install(&mut world, level);
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(103.0, 97.0), Facing::Right, 50.0);

    physics_update(&mut world, 0.1);

    let pos = position(&world, a);
    assert_eq!(pos, Vec2::new(104.0, 96.0));
    assert_eq!(pos.x % 4.0, 0.0);
    let mover = Colliders::single(BoxCollider::new(16.0, 16.0));
    let wall = Colliders::single(BoxCollider::new(16.0, 16.0));
    assert!(!mover.region_overlap(pos, &wall, Vec2::new(120.0, 96.0)));
}

#[test]
fn blocked_mover_never_rounds_into_the_wall() {
    // 8x8 body with a 4x4 collider at offset 2, two units short of the wall
    let mut world = make_world();
    let mut level = GridLevel::new(32.0);
    let wall = spawn_wall(&mut world, &mut level, Vec2::new(64.0, 0.0), Vec2::splat(16.0));
    install(&mut world, level);
    let body = Colliders::single(BoxCollider::new(4.0, 4.0).with_offset(Vec2::splat(2.0)));
    let shell = world
        .spawn(
            SpatialBundle::new(ObjectKind::Projectile, Vec2::new(58.0, 4.0), Vec2::splat(8.0))
                .with_motion(Motion::facing(Facing::Right, 120.0))
                .with_colliders(body.clone()),
        )
        .id();
    world.resource_mut::<PhysicsWorld>().register(shell);

    physics_update(&mut world, 1.0 / 60.0);

    let pos = position(&world, shell);
    assert_eq!(pos, Vec2::new(56.0, 4.0));
    let wall_colliders = world.get::<Colliders>(wall).unwrap().clone();
    assert!(!body.region_overlap(pos, &wall_colliders, Vec2::new(64.0, 0.0)));
}

#[test]
fn vertical_mover_snaps_x_before_moving() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(101.5, 50.0), Facing::Up, 20.0);

    physics_update(&mut world, 0.5);

    assert!(vec_approx_eq(position(&world, a), Vec2::new(100.0, 60.0)));
}

#[test]
fn resting_entity_never_moves() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(13.0, 7.0), Facing::Left, 0.0);

    for _ in 0..5 {
        physics_update(&mut world, 0.1);
        assert_eq!(position(&world, a), Vec2::new(13.0, 7.0));
        assert_eq!(world.get::<TargetPosition>(a).unwrap().pos, Vec2::new(13.0, 7.0));
    }
}

#[test]
fn zero_direction_is_treated_as_stationary() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(13.0, 7.0), Facing::Left, 30.0);
    world.get_mut::<Motion>(a).unwrap().direction = Vec2::ZERO;

    physics_update(&mut world, 0.1);

    assert_eq!(position(&world, a), Vec2::new(13.0, 7.0));
}

#[test]
fn filter_lets_projectiles_cross_water() {
    let mut world = make_world();
    let mut level = GridLevel::new(32.0);
    let water = world
        .spawn(
            SpatialBundle::new(ObjectKind::Water, Vec2::new(32.0, 0.0), Vec2::splat(16.0))
                .with_colliders(Colliders::single(BoxCollider::new(16.0, 16.0).reporting())),
        )
        .id();
    level.insert(water, Vec2::new(32.0, 0.0), Vec2::new(48.0, 16.0));
    install(&mut world, level);

    let tank = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(16.0, 0.0), Facing::Right, 40.0);
    let shell = spawn_mover(&mut world, ObjectKind::Projectile, Vec2::new(16.0, 0.0), Facing::Right, 40.0);
    world.entity_mut(shell).insert(Owner(tank));
    let mut contacts = SystemState::<MessageReader<ContactEvent>>::new(&mut world);

    physics_update(&mut world, 0.1);

    assert_eq!(position(&world, tank), Vec2::new(16.0, 0.0));
    assert!(vec_approx_eq(position(&world, shell), Vec2::new(20.0, 0.0)));
    let events = read_contacts(&mut contacts, &mut world);
    assert!(events.iter().all(|e| e.subject != shell && e.other != shell));
}

#[test]
fn inactive_wall_collider_does_not_block() {
    let mut world = make_world();
    let mut level = GridLevel::new(32.0);
    let wall = spawn_wall(&mut world, &mut level, Vec2::new(104.0, 100.0), Vec2::splat(16.0));
    world.get_mut::<Colliders>(wall).unwrap().set_all_active(false);
    install(&mut world, level);
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(100.0, 100.0), Facing::Right, 50.0);
    let mut contacts = SystemState::<MessageReader<ContactEvent>>::new(&mut world);

    physics_update(&mut world, 0.1);

    assert!(vec_approx_eq(position(&world, a), Vec2::new(105.0, 100.0)));
    assert!(read_contacts(&mut contacts, &mut world).is_empty());
}

#[test]
fn mover_without_colliders_passes_through() {
    let mut world = make_world();
    let mut level = GridLevel::new(32.0);
    spawn_wall(&mut world, &mut level, Vec2::new(104.0, 100.0), Vec2::splat(16.0));
    install(&mut world, level);
    let ghost = world
        .spawn(
            SpatialBundle::new(ObjectKind::Tank, Vec2::new(100.0, 100.0), Vec2::splat(16.0))
                .with_motion(Motion::facing(Facing::Right, 50.0)),
        )
        .id();
    world.resource_mut::<PhysicsWorld>().register(ghost);

    physics_update(&mut world, 0.1);

    assert!(vec_approx_eq(position(&world, ghost), Vec2::new(105.0, 100.0)));
}

#[test]
fn contact_repeats_once_per_blocked_tick() {
    let mut world = make_world();
    let mut level = GridLevel::new(32.0);
    let wall = spawn_wall(&mut world, &mut level, Vec2::new(16.0, 0.0), Vec2::splat(16.0));
    install(&mut world, level);
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 40.0);
    let mut contacts = SystemState::<MessageReader<ContactEvent>>::new(&mut world);

    for _ in 0..3 {
        physics_update(&mut world, 0.1);
        let events = read_contacts(&mut contacts, &mut world);
        let on_wall: Vec<_> = events.iter().filter(|e| e.subject == wall).collect();
        assert_eq!(on_wall.len(), 1);
        assert_eq!(on_wall[0].other, a);
        assert_eq!(position(&world, a), Vec2::ZERO);
    }
}

#[test]
fn composite_collider_reports_each_part() {
    let mut world = make_world();
    let mut level = GridLevel::new(32.0);
    let parts = Colliders::from_vec(vec![
        BoxCollider::new(8.0, 8.0).reporting(),
        BoxCollider::new(8.0, 8.0).with_offset(Vec2::new(0.0, 8.0)).reporting(),
        BoxCollider::new(8.0, 8.0).with_offset(Vec2::new(8.0, 0.0)).reporting(),
        BoxCollider::new(8.0, 8.0).with_offset(Vec2::new(8.0, 8.0)).reporting(),
    ]);
    let brick = world
        .spawn(SpatialBundle::new(ObjectKind::BrickWall, Vec2::new(16.0, 0.0), Vec2::splat(16.0)).with_colliders(parts))
        .id();
    level.insert(brick, Vec2::new(16.0, 0.0), Vec2::new(32.0, 16.0));
    install(&mut world, level);
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 40.0);
    let mut contacts = SystemState::<MessageReader<ContactEvent>>::new(&mut world);

    physics_update(&mut world, 0.1);

    let events = read_contacts(&mut contacts, &mut world);
    let mut hit_parts: Vec<usize> = events.iter().filter(|e| e.subject == brick).map(|e| e.collider).collect();
    hit_parts.sort_unstable();
    // the tank only reaches 4 units into the brick: left column only
    assert_eq!(hit_parts, vec![0, 1]);
    assert_eq!(events.iter().filter(|e| e.subject == a).count(), 2);
}

#[test]
fn no_level_means_no_static_geometry() {
    let mut world = make_world();
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Down, 10.0);

    physics_update(&mut world, 1.0);

    assert!(vec_approx_eq(position(&world, a), Vec2::new(0.0, -10.0)));
}

// ==================== CONFLICT RESOLVER ====================

#[test]
fn head_on_movers_both_roll_back() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 100.0);
    let b = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(34.0, 0.0), Facing::Left, 100.0);

    physics_update(&mut world, 0.1);

    assert_eq!(position(&world, a), Vec2::ZERO);
    assert_eq!(position(&world, b), Vec2::new(34.0, 0.0));
}

#[test]
fn movers_far_apart_are_untouched() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 100.0);
    let b = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(100.0, 0.0), Facing::Left, 100.0);

    physics_update(&mut world, 0.1);

    assert!(vec_approx_eq(position(&world, a), Vec2::new(10.0, 0.0)));
    assert!(vec_approx_eq(position(&world, b), Vec2::new(90.0, 0.0)));
}

#[test]
fn only_the_move_that_clashes_with_the_other_move_is_undone() {
    // B climbs into A's lane while A slides right.
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(0.0, 20.0), Facing::Right, 100.0);
    let b = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(12.0, 0.0), Facing::Up, 100.0);

    physics_update(&mut world, 0.1);

    // A@target (10,20) vs B@current (12,0): clear -> A rolled back.
    // A@current (0,20) vs B@target (12,10): overlap -> B keeps its move.
    assert_eq!(position(&world, a), Vec2::new(0.0, 20.0));
    assert!(vec_approx_eq(position(&world, b), Vec2::new(12.0, 10.0)));
}

/// A heads right, B heads left into A, C heads left faster into B.
fn pile_up(order: [usize; 3]) -> [Vec2; 3] {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let bodies = [
        (Vec2::ZERO, Facing::Right, 100.0),
        (Vec2::new(34.0, 0.0), Facing::Left, 100.0),
        (Vec2::new(50.0, 0.0), Facing::Left, 150.0),
    ];
    let entities: Vec<Entity> = bodies
        .iter()
        .map(|&(pos, facing, speed)| {
            world
                .spawn(
                    SpatialBundle::new(ObjectKind::Tank, pos, Vec2::splat(16.0))
                        .with_motion(Motion::facing(facing, speed))
                        .with_colliders(Colliders::single(BoxCollider::new(16.0, 16.0))),
                )
                .id()
        })
        .collect();
    for i in order {
        world.resource_mut::<PhysicsWorld>().register(entities[i]);
    }

    physics_update(&mut world, 0.1);

    [0, 1, 2].map(|i| position(&world, entities[i]))
}

#[test]
fn pile_up_rollbacks_carry_over_to_later_pairs() {
    // (A,B) first: both roll back, and the stopped A never meets C.
    let [a, b, c] = pile_up([0, 1, 2]);
    assert_eq!(a, Vec2::ZERO);
    assert_eq!(b, Vec2::new(34.0, 0.0));
    assert!(vec_approx_eq(c, Vec2::new(35.0, 0.0)));
}

#[test]
fn pile_up_result_follows_registration_order() {
    // (B,C) first: B rolls back, so (B,A) no longer clashes and A keeps its move.
    let [a, b, c] = pile_up([1, 2, 0]);
    assert!(vec_approx_eq(a, Vec2::new(10.0, 0.0)));
    assert_eq!(b, Vec2::new(34.0, 0.0));
    assert!(vec_approx_eq(c, Vec2::new(35.0, 0.0)));
}

#[test]
fn owner_and_owned_never_conflict() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let tank = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 100.0);
    let shell = spawn_mover(&mut world, ObjectKind::Projectile, Vec2::new(4.0, 0.0), Facing::Left, 100.0);
    world.entity_mut(shell).insert(Owner(tank));

    physics_update(&mut world, 0.1);

    assert!(vec_approx_eq(position(&world, tank), Vec2::new(10.0, 0.0)));
    assert!(vec_approx_eq(position(&world, shell), Vec2::new(-6.0, 0.0)));
}

#[test]
fn inactive_movers_do_not_conflict() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 100.0);
    let b = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(34.0, 0.0), Facing::Left, 100.0);
    world.get_mut::<Colliders>(b).unwrap().set_all_active(false);

    physics_update(&mut world, 0.1);

    assert!(vec_approx_eq(position(&world, a), Vec2::new(10.0, 0.0)));
    assert!(vec_approx_eq(position(&world, b), Vec2::new(24.0, 0.0)));
}

// ==================== LIFECYCLE ====================

#[test]
fn level_swap_forgets_registered_movers() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 100.0);

    install(&mut world, GridLevel::new(32.0));
    physics_update(&mut world, 0.1);

    assert_eq!(position(&world, a), Vec2::ZERO);
    assert!(world.get_entity(a).is_ok());
}

#[test]
fn despawned_entity_in_registry_is_skipped() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let gone = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 100.0);
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::new(64.0, 0.0), Facing::Right, 100.0);
    world.despawn(gone);

    physics_update(&mut world, 0.1);

    assert!(vec_approx_eq(position(&world, a), Vec2::new(74.0, 0.0)));
    assert_eq!(world.resource::<PhysicsWorld>().registry().len(), 2);
}

#[test]
fn registering_twice_moves_once() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let a = spawn_mover(&mut world, ObjectKind::Tank, Vec2::ZERO, Facing::Right, 100.0);
    assert!(!world.resource_mut::<PhysicsWorld>().register(a));

    physics_update(&mut world, 0.1);

    assert!(vec_approx_eq(position(&world, a), Vec2::new(10.0, 0.0)));
}

#[test]
fn unregistered_entities_are_ignored() {
    let mut world = make_world();
    install(&mut world, GridLevel::new(32.0));
    let idle = world
        .spawn(
            SpatialBundle::new(ObjectKind::Tank, Vec2::ZERO, Vec2::splat(16.0))
                .with_motion(Motion::facing(Facing::Right, 100.0))
                .with_filter(CollisionFilter::all()),
        )
        .id();

    physics_update(&mut world, 0.1);

    assert_eq!(position(&world, idle), Vec2::ZERO);
}
