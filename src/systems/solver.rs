//! Target-position solver.
//!
//! First phase of the physics tick. For every registered mover it computes a
//! provisional [`TargetPosition`] that respects static level geometry and the
//! movement grid:
//!
//! 1. Snap the coordinate orthogonal to the movement axis to the grid.
//! 2. Integrate `direction * speed * delta` into a candidate position.
//! 3. Ask the level for everything near `[candidate, candidate + size]`.
//! 4. Test each active collider of the mover at the candidate against each
//!    active collider of the nearby entities at their committed positions,
//!    writing a [`ContactEvent`] for every reporting collider involved.
//! 5. Accept the candidate, or on any overlap stop on the nearest grid line.
//!    If that line would still overlap a blocker, stop on the grid line behind
//!    the mover, and failing that stay at the pre-integration position.
//!
//! Stationary entities, and entities with no movement axis, keep their
//! committed position as target.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::boxcollider::Colliders;
use crate::components::mapposition::MapPosition;
use crate::components::motion::{Motion, MovementAxis};
use crate::components::objectkind::{CollisionFilter, ObjectKind};
use crate::components::spatial::BodySize;
use crate::components::targetposition::TargetPosition;
use crate::events::contact::ContactEvent;
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::worldtime::WorldTime;

pub fn solve_target_positions(
    physics: Res<PhysicsWorld>,
    config: Res<PhysicsConfig>,
    time: Res<WorldTime>,
    mut movers: Query<(
        &MapPosition,
        &mut TargetPosition,
        &Motion,
        &BodySize,
        &ObjectKind,
        &Colliders,
    )>,
    obstacles: Query<(&MapPosition, &CollisionFilter, &Colliders)>,
    mut contacts: MessageWriter<ContactEvent>,
) {
    let level = physics.level();
    if level.is_none() {
        trace!("No level set, static geometry skipped this tick");
    }

    for entity in physics.registry().iter() {
        let Ok((position, mut target, motion, size, kind, colliders)) = movers.get_mut(entity)
        else {
            trace!("Registered {:?} is gone or not spatial, skipped", entity);
            continue;
        };

        if !motion.is_moving() {
            target.pos = position.pos;
            continue;
        }

        // Grid pre-snap of the coordinate across the movement axis.
        let mut start = position.pos;
        match motion.axis() {
            Some(MovementAxis::Horizontal) => start.y = config.snap(start.y),
            Some(MovementAxis::Vertical) => start.x = config.snap(start.x),
            None => {
                trace!("{:?} has speed but no direction, held in place", entity);
                target.pos = position.pos;
                continue;
            }
        }
        target.pos = start;

        let candidate = start + motion.displacement(time.delta);
        let nearby = level
            .map(|l| l.entities_in_region(candidate, candidate + size.0))
            .unwrap_or_default();

        let mut blockers: Vec<(Entity, Vec2, &Colliders)> = Vec::new();
        for (own_index, own) in colliders.iter_active() {
            for &other in &nearby {
                if other == entity {
                    continue;
                }
                let Ok((other_position, filter, other_colliders)) = obstacles.get(other) else {
                    trace!("Level returned {:?} without spatial components", other);
                    continue;
                };
                if !filter.can_collide_with(*kind) || other_colliders.is_empty() {
                    continue;
                }
                for (other_index, other_collider) in other_colliders.iter_active() {
                    if !own.overlaps(candidate, other_collider, other_position.pos) {
                        continue;
                    }
                    if !blockers.iter().any(|(e, _, _)| *e == other) {
                        blockers.push((other, other_position.pos, other_colliders));
                    }
                    if other_collider.reports_contacts {
                        contacts.write(ContactEvent {
                            subject: other,
                            other: entity,
                            collider: other_index,
                            direction: motion.reciprocal_direction(),
                        });
                    }
                    if own.reports_contacts {
                        contacts.write(ContactEvent {
                            subject: entity,
                            other,
                            collider: own_index,
                            direction: motion.approach_direction(),
                        });
                    }
                }
            }
        }

        if blockers.is_empty() {
            target.pos = candidate;
        } else {
            target.pos = settle_blocked(start, motion, &config, colliders, &blockers);
            trace!("{:?} blocked, held at {:?}", entity, target.pos);
        }
    }
}

/// Full stop for a blocked mover: the nearest grid line if it keeps clear of
/// every blocker, else the grid line behind, else the pre-integration spot.
fn settle_blocked(
    start: Vec2,
    motion: &Motion,
    config: &PhysicsConfig,
    colliders: &Colliders,
    blockers: &[(Entity, Vec2, &Colliders)],
) -> Vec2 {
    let horizontal = motion.axis() == Some(MovementAxis::Horizontal);
    let (value, heading) = if horizontal {
        (start.x, motion.direction.x)
    } else {
        (start.y, motion.direction.y)
    };
    let place = |v: f32| {
        if horizontal {
            Vec2::new(v, start.y)
        } else {
            Vec2::new(start.x, v)
        }
    };
    let clear = |pos: Vec2| {
        blockers
            .iter()
            .all(|(_, at, other)| !colliders.region_overlap(pos, other, *at))
    };

    [config.snap(value), config.snap_behind(value, heading)]
        .into_iter()
        .map(place)
        .find(|pos| clear(*pos))
        .unwrap_or(start)
}
