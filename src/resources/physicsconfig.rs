//! Tunables read by the physics systems every tick.

use bevy_ecs::prelude::Resource;

/// Size of a movement cell in world units.
pub const DEFAULT_CELL_SIZE: f32 = 4.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Movers are kept aligned to multiples of this value.
    pub cell_size: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl PhysicsConfig {
    /// Round `value` to the nearest multiple of the cell size, halves up.
    pub fn snap(&self, value: f32) -> f32 {
        (value / self.cell_size + 0.5).floor() * self.cell_size
    }

    /// Grid line at or behind `value` for a mover heading along `heading`:
    /// floor when heading positive, ceil when heading negative.
    pub fn snap_behind(&self, value: f32, heading: f32) -> f32 {
        let cells = value / self.cell_size;
        if heading < 0.0 {
            cells.ceil() * self.cell_size
        } else {
            cells.floor() * self.cell_size
        }
    }
}
