//! Tank game glue used by the demo binary.
//!
//! Everything here sits on top of the physics core: it spawns tanks and their
//! projectiles, fires, and reacts to [`ContactEvent`]s. None of it is needed
//! to run the physics tick itself.
//!
//! # Rules
//!
//! - Every tank owns one projectile (`Owner(tank)`), registered with the
//!   physics world at spawn time, parked until fired.
//! - A new tank spends [`SPAWN_SECONDS`] spawning in: it keeps still,
//!   ignores [`drive`] and cannot [`fire`]. Tanks spawned with a shield then
//!   carry a [`Shield`] for [`SHIELD_SECONDS`].
//! - Once spawned, AI tanks drive at full speed and fire whenever their
//!   projectile is parked.
//! - A projectile that reports a contact is parked again.
//! - A brick sub-block hit by a projectile loses its collider.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::boxcollider::{BoxCollider, Colliders};
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::components::objectkind::ObjectKind;
use crate::components::owner::Owner;
use crate::components::projectile::Projectile;
use crate::components::shield::{SHIELD_SECONDS, Shield};
use crate::components::spatial::{BodySize, SpatialBundle};
use crate::components::spawning::{SPAWN_SECONDS, Spawning};
use crate::components::tank::Tank;
use crate::components::targetposition::TargetPosition;
use crate::events::contact::ContactEvent;
use crate::resources::engineconfig::EngineConfig;
use crate::resources::levellayout::{LevelLayout, TankSpawn, despawn_level, spawn_level};
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::worldtime::WorldTime;

pub const TANK_SIZE: f32 = 16.0;

/// Spawn a tank and its parked projectile, registering both.
///
/// The tank starts still and [`Spawning`]; AI tanks pick up `speed` when
/// spawning ends.
pub fn spawn_tank(world: &mut World, spawn: &TankSpawn, speed: f32) -> Entity {
    let position = Vec2::new(spawn.x, spawn.y);
    let size = Vec2::splat(TANK_SIZE);

    let tank = world
        .spawn((
            SpatialBundle::new(ObjectKind::Tank, position, size)
                .with_motion(Motion::facing(spawn.facing, 0.0))
                .with_colliders(Colliders::single(BoxCollider::new(size.x, size.y))),
            Spawning::new(SPAWN_SECONDS),
        ))
        .id();

    let projectile_size = size / 2.0;
    let projectile = world
        .spawn((
            SpatialBundle::new(ObjectKind::Projectile, position + size / 4.0, projectile_size)
                .with_motion(Motion::facing(spawn.facing, 0.0))
                .with_colliders(Colliders::single(
                    BoxCollider::new(projectile_size.x / 2.0, projectile_size.y / 2.0)
                        .with_offset(projectile_size / 4.0)
                        .reporting()
                        .inactive(),
                )),
            Projectile::default(),
            Owner(tank),
        ))
        .id();

    world.entity_mut(tank).insert(Tank {
        projectile,
        has_ai: spawn.ai,
        max_speed: speed,
        shield_on_spawn: spawn.shield,
    });

    let mut physics = world.resource_mut::<PhysicsWorld>();
    physics.register(tank);
    physics.register(projectile);
    debug!("Spawned tank {:?} with projectile {:?}", tank, projectile);
    tank
}

/// Set `tank`'s speed. Refused (returns false) while it is spawning.
pub fn drive(world: &mut World, tank: Entity, speed: f32) -> bool {
    let Ok(mut entity) = world.get_entity_mut(tank) else {
        return false;
    };
    if entity.contains::<Spawning>() || !entity.contains::<Tank>() {
        return false;
    }
    match entity.get_mut::<Motion>() {
        Some(mut motion) => {
            motion.set_speed(speed);
            true
        }
        None => false,
    }
}

/// Fire `tank`'s projectile if it is parked and the tank has spawned.
/// Returns true if it was launched.
///
/// The projectile starts at `tank + size/4 + size*direction/4`, moving in the
/// tank's direction at the configured projectile speed.
pub fn fire(world: &mut World, tank: Entity) -> bool {
    let speed = world
        .get_resource::<EngineConfig>()
        .map(|c| c.projectile_speed)
        .unwrap_or_else(|| EngineConfig::new().projectile_speed);

    let Some(&Tank { projectile, .. }) = world.get::<Tank>(tank) else {
        return false;
    };
    if world.get::<Spawning>(tank).is_some() {
        return false;
    }
    let (Some(tank_pos), Some(tank_size), Some(tank_motion)) = (
        world.get::<MapPosition>(tank).copied(),
        world.get::<BodySize>(tank).copied(),
        world.get::<Motion>(tank).copied(),
    ) else {
        return false;
    };

    let Ok(mut entity) = world.get_entity_mut(projectile) else {
        return false;
    };
    if entity.get::<Projectile>().is_none_or(|p| p.active) {
        return false;
    }

    let start = tank_pos.pos + tank_size.0 / 4.0 + tank_size.0 * tank_motion.direction / 4.0;
    if let Some(mut p) = entity.get_mut::<Projectile>() {
        p.active = true;
    }
    if let Some(mut pos) = entity.get_mut::<MapPosition>() {
        pos.pos = start;
    }
    if let Some(mut target) = entity.get_mut::<TargetPosition>() {
        target.pos = start;
    }
    if let Some(mut motion) = entity.get_mut::<Motion>() {
        *motion = Motion::new(tank_motion.direction, speed);
    }
    if let Some(mut colliders) = entity.get_mut::<Colliders>() {
        colliders.set_all_active(true);
    }

    world.resource_mut::<PhysicsWorld>().register(projectile);
    debug!("{:?} fired {:?} from {:?}", tank, projectile, start);
    true
}

/// AI stub: every AI tank fires whenever it can.
pub fn ai_fire_system(world: &mut World) {
    let mut tanks = world.query::<(Entity, &Tank)>();
    let shooters: Vec<Entity> = tanks
        .iter(world)
        .filter(|(_, tank)| tank.has_ai)
        .map(|(entity, _)| entity)
        .collect();
    for tank in shooters {
        fire(world, tank);
    }
}

/// Age spawn and shield timers by the tick step.
///
/// When spawning ends the tank becomes controllable, AI tanks start driving at
/// their `max_speed`, and tanks flagged `shield_on_spawn` get a [`Shield`].
/// Run after the physics tick so `WorldTime::delta` holds the current step.
pub fn tank_timer_system(
    time: Res<WorldTime>,
    mut spawning: Query<(Entity, &mut Spawning, &Tank, &mut Motion)>,
    mut shields: Query<(Entity, &mut Shield)>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut timer, tank, mut motion) in spawning.iter_mut() {
        timer.remaining -= dt;
        if timer.remaining > 0.0 {
            continue;
        }
        let mut tank_commands = commands.entity(entity);
        tank_commands.remove::<Spawning>();
        if tank.has_ai {
            motion.set_speed(tank.max_speed);
        }
        if tank.shield_on_spawn {
            tank_commands.insert(Shield::new(SHIELD_SECONDS));
        }
        debug!("Tank {:?} spawned in", entity);
    }

    for (entity, mut shield) in shields.iter_mut() {
        shield.remaining -= dt;
        if shield.remaining <= 0.0 {
            commands.entity(entity).remove::<Shield>();
            debug!("Tank {:?} lost its shield", entity);
        }
    }
}

/// Park projectiles that touched something and chip brick walls they hit.
pub fn projectile_contact_system(
    mut reader: MessageReader<ContactEvent>,
    mut projectiles: Query<(&mut Projectile, &mut Motion, &mut Colliders)>,
    mut blocks: Query<(&ObjectKind, &mut Colliders), Without<Projectile>>,
    kinds: Query<&ObjectKind>,
) {
    for contact in reader.read() {
        if let Ok((mut projectile, mut motion, mut colliders)) = projectiles.get_mut(contact.subject) {
            if projectile.active {
                projectile.active = false;
                motion.set_speed(0.0);
                colliders.set_all_active(false);
                debug!("Projectile {:?} stopped by {:?}", contact.subject, contact.other);
            }
            continue;
        }

        let hit_by_projectile = kinds
            .get(contact.other)
            .is_ok_and(|k| *k == ObjectKind::Projectile);
        if !hit_by_projectile {
            continue;
        }
        let Ok((kind, mut colliders)) = blocks.get_mut(contact.subject) else {
            continue;
        };
        match kind {
            ObjectKind::BrickWall => {
                if let Some(collider) = colliders.get_mut(contact.collider) {
                    collider.active = false;
                    debug!("Brick {:?} lost part {}", contact.subject, contact.collider);
                }
            }
            ObjectKind::Eagle => {
                info!("Eagle {:?} hit from {:?}", contact.subject, contact.direction);
            }
            _ => {}
        }
    }
}

/// Spawn `layout`, make it the current level and spawn its tanks.
///
/// Geometry from a previous level is despawned first. Tanks are spawned after
/// the level swap, since the swap clears the registry.
pub fn load_level(world: &mut World, layout: &LevelLayout, config: &EngineConfig) -> Vec<Entity> {
    despawn_level(world);
    let level = spawn_level(world, layout, config.bucket_size);
    world.resource_mut::<PhysicsWorld>().set_level(Box::new(level));
    let tanks: Vec<Entity> = layout
        .tanks
        .iter()
        .map(|spawn| spawn_tank(world, spawn, config.tank_speed))
        .collect();
    info!("Level loaded with {} tanks", tanks.len());
    tanks
}
