//! Dynamic conflict resolver.
//!
//! Second phase of the physics tick. Every unordered pair of registered
//! entities is checked once, in registry order, and a pair whose provisional
//! positions overlap is pulled apart by rolling targets back to the committed
//! positions:
//!
//! - if A's move overlaps B only because of B's move, A is rolled back;
//! - if B's move overlaps A only because of A's move, B is rolled back.
//!
//! Both may happen for the same pair. A rollback is visible to the pairs
//! checked after it; there is no iteration to a fixed point. Pairs where one
//! entity owns the other are never checked. No contacts are reported here.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::boxcollider::Colliders;
use crate::components::mapposition::MapPosition;
use crate::components::owner::{Owner, owner_related};
use crate::components::targetposition::TargetPosition;
use crate::resources::physicsworld::PhysicsWorld;

struct Slot<'a> {
    entity: Entity,
    current: Vec2,
    target: Vec2,
    owner: Option<&'a Owner>,
    colliders: &'a Colliders,
}

pub fn resolve_dynamic_conflicts(
    physics: Res<PhysicsWorld>,
    mut bodies: Query<(&MapPosition, &mut TargetPosition, Option<&Owner>, &Colliders)>,
) {
    let mut slots: Vec<Slot> = physics
        .registry()
        .iter()
        .filter_map(|entity| {
            let (position, target, owner, colliders) = bodies.get(entity).ok()?;
            Some(Slot {
                entity,
                current: position.pos,
                target: target.pos,
                owner,
                colliders,
            })
        })
        .collect();

    let mut rolled_back = vec![false; slots.len()];
    for i in 0..slots.len() {
        for j in (i + 1)..slots.len() {
            let (head, tail) = slots.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            if owner_related(a.entity, a.owner, b.entity, b.owner) {
                continue;
            }
            if !a.colliders.region_overlap(a.target, b.colliders, b.target) {
                continue;
            }
            if !a.colliders.region_overlap(a.target, b.colliders, b.current) {
                trace!("{:?} rolled back against {:?}", a.entity, b.entity);
                a.target = a.current;
                rolled_back[i] = true;
            }
            if !a.colliders.region_overlap(a.current, b.colliders, b.target) {
                trace!("{:?} rolled back against {:?}", b.entity, a.entity);
                b.target = b.current;
                rolled_back[j] = true;
            }
        }
    }

    let updates: Vec<(Entity, Vec2)> = slots
        .iter()
        .zip(rolled_back)
        .filter(|(_, changed)| *changed)
        .map(|(slot, _)| (slot.entity, slot.target))
        .collect();
    drop(slots);

    for (entity, pos) in updates {
        if let Ok((_, mut target, _, _)) = bodies.get_mut(entity) {
            target.pos = pos;
        }
    }
}
