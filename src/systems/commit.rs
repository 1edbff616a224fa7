//! Position commit: the last phase of the physics tick.
//!
//! Copies every registered entity's [`TargetPosition`] into its
//! [`MapPosition`]. This is the only place the physics tick changes a
//! committed position.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::targetposition::TargetPosition;
use crate::resources::physicsworld::PhysicsWorld;

pub fn commit_positions(
    physics: Res<PhysicsWorld>,
    mut query: Query<(&mut MapPosition, &TargetPosition)>,
) {
    for entity in physics.registry().iter() {
        if let Ok((mut position, target)) = query.get_mut(entity) {
            position.pos = target.pos;
        }
    }
}
