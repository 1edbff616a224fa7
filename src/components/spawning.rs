//! Spawn-in delay for tanks.
//!
//! While a tank carries [`Spawning`] it cannot change speed or fire. The
//! countdown runs on [`WorldTime::delta`](crate::resources::worldtime::WorldTime),
//! so it follows `time_scale`. See [`crate::game::tank_timer_system`].

use bevy_ecs::prelude::Component;

/// Seconds a freshly spawned tank spends spawning in.
pub const SPAWN_SECONDS: f32 = 1.5;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Spawning {
    /// Seconds left before the tank becomes controllable.
    pub remaining: f32,
}

impl Spawning {
    pub fn new(seconds: f32) -> Self {
        Spawning { remaining: seconds }
    }
}

impl Default for Spawning {
    fn default() -> Self {
        Self::new(SPAWN_SECONDS)
    }
}
