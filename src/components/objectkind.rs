//! Type tags and the per-entity collision filter.
//!
//! Every spatial entity carries an [`ObjectKind`]. Static geometry carries a
//! [`CollisionFilter`] listing the kinds it blocks: water stops tanks but lets
//! projectiles fly over it, trees stop nothing, and so on.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Tank,
    Projectile,
    BrickWall,
    ConcreteWall,
    Water,
    Trees,
    Ice,
    Border,
    Eagle,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 9] = [
        ObjectKind::Tank,
        ObjectKind::Projectile,
        ObjectKind::BrickWall,
        ObjectKind::ConcreteWall,
        ObjectKind::Water,
        ObjectKind::Trees,
        ObjectKind::Ice,
        ObjectKind::Border,
        ObjectKind::Eagle,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Kinds an object of this kind blocks by default.
    pub fn default_filter(self) -> CollisionFilter {
        match self {
            ObjectKind::Water => CollisionFilter::only(&[ObjectKind::Tank]),
            ObjectKind::Trees | ObjectKind::Ice => CollisionFilter::none(),
            _ => CollisionFilter::all(),
        }
    }
}

/// Set of kinds this entity collides with.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    mask: u16,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl CollisionFilter {
    pub fn all() -> Self {
        Self {
            mask: ObjectKind::ALL.iter().fold(0, |acc, k| acc | k.bit()),
        }
    }

    pub fn none() -> Self {
        Self { mask: 0 }
    }

    pub fn only(kinds: &[ObjectKind]) -> Self {
        Self {
            mask: kinds.iter().fold(0, |acc, k| acc | k.bit()),
        }
    }

    pub fn with(mut self, kind: ObjectKind) -> Self {
        self.mask |= kind.bit();
        self
    }

    pub fn without(mut self, kind: ObjectKind) -> Self {
        self.mask &= !kind.bit();
        self
    }

    pub fn can_collide_with(&self, kind: ObjectKind) -> bool {
        self.mask & kind.bit() != 0
    }
}
