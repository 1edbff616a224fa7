//! Spatial entity bundle.
//!
//! Groups the components every participant in the physics tick needs. Game
//! code spawns a [`SpatialBundle`] and then registers the entity with
//! [`PhysicsWorld::register`](crate::resources::physicsworld::PhysicsWorld::register)
//! once it becomes a mover.
//!
//! # Example
//! ```ignore
//! let tank = world
//!     .spawn(
//!         SpatialBundle::new(ObjectKind::Tank, Vec2::new(32.0, 0.0), Vec2::splat(16.0))
//!             .with_motion(Motion::facing(Facing::Up, 40.0))
//!             .with_colliders(Colliders::single(BoxCollider::new(16.0, 16.0))),
//!     )
//!     .id();
//! world.resource_mut::<PhysicsWorld>().register(tank);
//! ```

use bevy_ecs::prelude::{Bundle, Component};
use glam::Vec2;

use crate::components::boxcollider::Colliders;
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::components::objectkind::{CollisionFilter, ObjectKind};
use crate::components::targetposition::TargetPosition;

/// Extent of the broad-phase query region, measured from the anchor.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BodySize(pub Vec2);

#[derive(Bundle, Clone, Debug)]
pub struct SpatialBundle {
    pub position: MapPosition,
    pub target: TargetPosition,
    pub size: BodySize,
    pub motion: Motion,
    pub kind: ObjectKind,
    pub filter: CollisionFilter,
    pub colliders: Colliders,
}

impl SpatialBundle {
    /// Stationary entity with the kind's default filter and no colliders.
    pub fn new(kind: ObjectKind, position: Vec2, size: Vec2) -> Self {
        Self {
            position: MapPosition { pos: position },
            target: TargetPosition { pos: position },
            size: BodySize(size),
            motion: Motion::default(),
            kind,
            filter: kind.default_filter(),
            colliders: Colliders::default(),
        }
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_colliders(mut self, colliders: Colliders) -> Self {
        self.colliders = colliders;
        self
    }
}
