//! Tank gameplay state.
//!
//! Each tank owns exactly one projectile entity for its whole life. The
//! projectile is spawned alongside the tank and reused for every shot.

use bevy_ecs::prelude::{Component, Entity};

#[derive(Component, Clone, Copy, Debug)]
pub struct Tank {
    pub projectile: Entity,
    /// Driven by the "always fire" AI stub.
    pub has_ai: bool,
    /// Speed AI tanks drive at once they finish spawning.
    pub max_speed: f32,
    /// Gain a [`Shield`](super::shield::Shield) when spawning ends.
    pub shield_on_spawn: bool,
}
