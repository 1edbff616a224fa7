//! Level collaborator: static geometry lookup.
//!
//! The physics core only needs two things from a level: a one-time
//! initialization when it becomes current, and a region query that returns
//! every entity whose colliders might overlap an axis-aligned rectangle.
//! Returning too many entities is fine (the narrow phase filters them);
//! returning too few lets movers tunnel through walls.
//!
//! [`GridLevel`] is the bundled implementation. It buckets static entities by
//! square cells so a query only visits the buckets the region touches.

use bevy_ecs::prelude::Entity;
use glam::{IVec2, Vec2};
use log::{debug, info};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Spatial queries the physics core consumes from the current level.
pub trait LevelIndex: Send + Sync {
    /// Called exactly once when the level becomes current.
    fn initialize(&mut self);

    /// Entities whose geometry may overlap the rectangle `[min, max]`.
    fn entities_in_region(&self, min: Vec2, max: Vec2) -> Vec<Entity>;
}

#[derive(Debug, Clone, Copy)]
struct LevelEntry {
    entity: Entity,
    min: Vec2,
    max: Vec2,
}

/// Bucketed index of static level entities.
#[derive(Debug, Clone)]
pub struct GridLevel {
    bucket_size: f32,
    entries: Vec<LevelEntry>,
    buckets: FxHashMap<IVec2, SmallVec<[u32; 8]>>,
    initialized: bool,
}

impl GridLevel {
    pub fn new(bucket_size: f32) -> Self {
        Self {
            bucket_size: bucket_size.max(1.0),
            entries: Vec::new(),
            buckets: FxHashMap::default(),
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entity occupying the world-space box `[min, max]`.
    ///
    /// Entries added after [`LevelIndex::initialize`] are indexed right away.
    pub fn insert(&mut self, entity: Entity, min: Vec2, max: Vec2) {
        let entry = LevelEntry {
            entity,
            min: min.min(max),
            max: min.max(max),
        };
        self.entries.push(entry);
        if self.initialized {
            self.index_entry((self.entries.len() - 1) as u32);
        }
    }

    fn bucket_of(&self, point: Vec2) -> IVec2 {
        (point / self.bucket_size).floor().as_ivec2()
    }

    fn index_entry(&mut self, index: u32) {
        let entry = self.entries[index as usize];
        let lo = self.bucket_of(entry.min);
        let hi = self.bucket_of(entry.max);
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                self.buckets.entry(IVec2::new(x, y)).or_default().push(index);
            }
        }
    }
}

impl LevelIndex for GridLevel {
    fn initialize(&mut self) {
        self.buckets.clear();
        for index in 0..self.entries.len() as u32 {
            self.index_entry(index);
        }
        self.initialized = true;
        info!(
            "Level initialized: {} static entities in {} buckets",
            self.entries.len(),
            self.buckets.len()
        );
    }

    fn entities_in_region(&self, min: Vec2, max: Vec2) -> Vec<Entity> {
        let (min, max) = (min.min(max), min.max(max));
        let lo = self.bucket_of(min);
        let hi = self.bucket_of(max);

        let mut hits: Vec<u32> = Vec::new();
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                if let Some(bucket) = self.buckets.get(&IVec2::new(x, y)) {
                    hits.extend(bucket.iter().copied());
                }
            }
        }
        hits.sort_unstable();
        hits.dedup();

        let found: Vec<Entity> = hits
            .into_iter()
            .map(|i| self.entries[i as usize])
            .filter(|e| e.min.x <= max.x && e.max.x >= min.x && e.min.y <= max.y && e.max.y >= min.y)
            .map(|e| e.entity)
            .collect();
        debug!("Region {:?}..{:?} -> {} candidates", min, max, found.len());
        found
    }
}
