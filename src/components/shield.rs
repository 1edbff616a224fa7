//! Temporary spawn shield.

use bevy_ecs::prelude::Component;

/// Seconds the shield lasts once a tank finishes spawning.
pub const SHIELD_SECONDS: f32 = 2.0;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Shield {
    pub remaining: f32,
}

impl Shield {
    pub fn new(seconds: f32) -> Self {
        Shield { remaining: seconds }
    }
}

impl Default for Shield {
    fn default() -> Self {
        Self::new(SHIELD_SECONDS)
    }
}
