//! Intended movement of an entity: a direction and a scalar speed.
//!
//! Directions are axis-aligned unit vectors. The solver derives the movement
//! axis from the direction (X is inspected before Y) and uses it both for
//! grid snapping and for the approach side reported in contact records.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::events::contact::ContactDirection;

/// Axis along which an entity travels this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementAxis {
    Horizontal,
    Vertical,
}

/// Four-way orientation used by game code to build directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn to_vec(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::Y,
            Facing::Down => Vec2::NEG_Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// One of (0,±1) or (±1,0). The zero vector means "no axis".
    pub direction: Vec2,
    /// World units per second, never negative.
    pub speed: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            direction: Vec2::Y,
            speed: 0.0,
        }
    }
}

impl Motion {
    pub fn new(direction: Vec2, speed: f32) -> Self {
        Self {
            direction,
            speed: speed.max(0.0),
        }
    }

    pub fn facing(facing: Facing, speed: f32) -> Self {
        Self::new(facing.to_vec(), speed)
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn is_moving(&self) -> bool {
        self.speed > 0.0
    }

    pub fn axis(&self) -> Option<MovementAxis> {
        if self.direction.x != 0.0 {
            Some(MovementAxis::Horizontal)
        } else if self.direction.y != 0.0 {
            Some(MovementAxis::Vertical)
        } else {
            None
        }
    }

    /// Displacement for one step of `dt` seconds.
    pub fn displacement(&self, dt: f32) -> Vec2 {
        self.direction * (self.speed * dt)
    }

    /// Side this entity is moving towards.
    pub fn approach_direction(&self) -> ContactDirection {
        if self.direction.x < 0.0 {
            ContactDirection::Left
        } else if self.direction.y > 0.0 {
            ContactDirection::Top
        } else if self.direction.y < 0.0 {
            ContactDirection::Bottom
        } else {
            ContactDirection::Right
        }
    }

    /// Side of the obstacle this entity arrives from.
    pub fn reciprocal_direction(&self) -> ContactDirection {
        self.approach_direction().opposite()
    }
}
