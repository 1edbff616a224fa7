//! Physics context: the dynamic registry and the current level.
//!
//! There is no global physics state. Each `World` that runs the physics tick
//! holds its own [`PhysicsWorld`], so independent simulations (and tests) do
//! not interfere.
//!
//! # Lifecycle
//!
//! - [`PhysicsWorld::set_level`] swaps the level, forgets every registered
//!   mover and initializes the new level.
//! - [`PhysicsWorld::register`] adds a mover; registering twice is a no-op.
//! - [`PhysicsWorld::clear`] drops both the registry and the level on
//!   shutdown.
//!
//! Registered entities are not reclaimed when they stop moving. A projectile
//! that finished its flight stays registered until the next level swap; its
//! owner parks it by zeroing its speed and disabling its collider.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::resources::level::LevelIndex;
use crate::resources::registry::DynamicRegistry;

#[derive(Resource, Default)]
pub struct PhysicsWorld {
    registry: DynamicRegistry,
    level: Option<Box<dyn LevelIndex>>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `level` current: clears the registry, then initializes the level.
    pub fn set_level(&mut self, level: Box<dyn LevelIndex>) {
        let dropped = self.registry.len();
        self.level = Some(level);
        self.registry.clear();
        if let Some(level) = self.level.as_mut() {
            level.initialize();
        }
        info!("Level swapped, {} registered movers discarded", dropped);
    }

    /// Add `entity` to the registry. Returns false if it was already there.
    pub fn register(&mut self, entity: Entity) -> bool {
        let inserted = self.registry.insert(entity);
        if inserted {
            debug!("Registered {:?} ({} movers)", entity, self.registry.len());
        }
        inserted
    }

    pub fn is_registered(&self, entity: Entity) -> bool {
        self.registry.contains(entity)
    }

    /// Empty the registry and release the level.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.level = None;
        info!("Physics world cleared");
    }

    pub fn registry(&self) -> &DynamicRegistry {
        &self.registry
    }

    pub fn level(&self) -> Option<&dyn LevelIndex> {
        self.level.as_deref()
    }

    pub fn has_level(&self) -> bool {
        self.level.is_some()
    }
}
