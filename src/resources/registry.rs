//! Set of entities taking part in the physics tick.
//!
//! Iteration follows insertion order, which fixes the tie-breaking order of
//! the pairwise conflict pass and keeps ticks reproducible. The registry only
//! stores handles: removing an entry never despawns anything, and an entry
//! whose entity was despawned elsewhere is simply skipped by the systems.

use bevy_ecs::prelude::Entity;
use rustc_hash::FxHashSet;

#[derive(Debug, Default, Clone)]
pub struct DynamicRegistry {
    order: Vec<Entity>,
    members: FxHashSet<Entity>,
}

impl DynamicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entity` at the end. Returns false if it was already present.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if !self.members.insert(entity) {
            return false;
        }
        self.order.push(entity);
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.order
    }
}
