//! Simulation clock shared by all systems.

use bevy_ecs::prelude::Resource;

/// Time state of the simulation, advanced once per physics tick.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since the world was created.
    pub elapsed: f32,
    /// Scaled step of the current tick, in seconds.
    pub delta: f32,
    /// Multiplier applied to every incoming tick delta.
    pub time_scale: f32,
    pub tick_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            tick_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
