//! Provisional next position of a registered entity.
//!
//! Written by the solver and the conflict resolver, copied into
//! [`MapPosition`](super::mapposition::MapPosition) on commit. Outside of a
//! physics tick it always equals the committed position.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct TargetPosition {
    pub pos: Vec2,
}
