//! Projectile gameplay state.
//!
//! An inactive projectile is parked: zero speed, colliders disabled. It stays
//! in the physics registry so firing again is just a matter of re-arming it.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Projectile {
    pub active: bool,
}
