//! Committed world-space position of an entity.
//!
//! The anchor is the bottom-left corner of the entity; colliders and the
//! broad-phase region are measured from it. The y axis grows upward.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}
