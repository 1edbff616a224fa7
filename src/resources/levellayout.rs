//! Data-driven level layouts.
//!
//! A layout is a JSON grid of characters plus a legend mapping characters to
//! block kinds, in the same spirit as the engine's grid layouts. Row 0 is the
//! top of the map; the world y axis grows upward, so the last row sits at
//! `y = 0`.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "cell_size": 16.0,
//!   "borders": true,
//!   "grid": ["B..C", "...."],
//!   "legend": {
//!     "B": { "kind": "brick_wall", "subdivide": true },
//!     "C": { "kind": "concrete_wall" }
//!   },
//!   "tanks": [ { "x": 16.0, "y": 0.0, "facing": "up", "ai": true, "shield": true } ]
//! }
//! ```
//!
//! [`spawn_level`] turns a layout into static entities and a [`GridLevel`]
//! indexing them.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::{BoxCollider, Colliders};
use crate::components::motion::Facing;
use crate::components::objectkind::ObjectKind;
use crate::components::spatial::SpatialBundle;
use crate::resources::level::GridLevel;

/// Level geometry entities carry this marker.
#[derive(Component, Clone, Copy, Debug)]
pub struct StaticGeometry;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LevelLayout {
    pub cell_size: f32,
    #[serde(default)]
    pub borders: bool,
    pub grid: Vec<String>,
    pub legend: FxHashMap<char, LevelCell>,
    #[serde(default)]
    pub tanks: Vec<TankSpawn>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LevelCell {
    pub kind: ObjectKind,
    /// Split the block into four half-size colliders that report contacts.
    #[serde(default)]
    pub subdivide: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct TankSpawn {
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    #[serde(default)]
    pub ai: bool,
    /// Shield the tank for a while after it spawns in.
    #[serde(default)]
    pub shield: bool,
}

impl LevelLayout {
    /// Loads layout data from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json_str(&file_content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let layout: LevelLayout = serde_json::from_str(json)?;
        if layout.cell_size <= 0.0 {
            return Err(format!("cell_size must be positive, got {}", layout.cell_size).into());
        }
        Ok(layout)
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn columns(&self) -> usize {
        self.grid.iter().map(|row| row.chars().count()).max().unwrap_or(0)
    }

    /// World size of the playable area.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.columns() as f32, self.rows() as f32) * self.cell_size
    }

    /// Iterate over all defined cells with their bottom-left world positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (Vec2, &LevelCell)> {
        let rows = self.rows();
        self.grid.iter().enumerate().flat_map(move |(row, line)| {
            line.chars().enumerate().filter_map(move |(col, ch)| {
                self.legend.get(&ch).map(|cell| {
                    let x = col as f32 * self.cell_size;
                    let y = (rows - 1 - row) as f32 * self.cell_size;
                    (Vec2::new(x, y), cell)
                })
            })
        })
    }
}

fn block_colliders(cell: &LevelCell, size: f32) -> Colliders {
    if cell.subdivide {
        let half = size / 2.0;
        Colliders::from_vec(
            [(0.0, 0.0), (half, 0.0), (0.0, half), (half, half)]
                .into_iter()
                .map(|(x, y)| {
                    BoxCollider::new(half, half)
                        .with_offset(Vec2::new(x, y))
                        .reporting()
                })
                .collect(),
        )
    } else {
        Colliders::single(BoxCollider::new(size, size).reporting())
    }
}

fn spawn_block(world: &mut World, level: &mut GridLevel, kind: ObjectKind, pos: Vec2, size: Vec2, colliders: Colliders) {
    let bounds = colliders.bounds(pos).unwrap_or((pos, pos + size));
    let entity = world
        .spawn((
            SpatialBundle::new(kind, pos, size).with_colliders(colliders),
            StaticGeometry,
        ))
        .id();
    level.insert(entity, bounds.0, bounds.1);
}

/// Spawn the static geometry of `layout` and return an index over it.
///
/// The returned level is not initialized yet; hand it to
/// [`PhysicsWorld::set_level`](crate::resources::physicsworld::PhysicsWorld::set_level).
pub fn spawn_level(world: &mut World, layout: &LevelLayout, bucket_size: f32) -> GridLevel {
    let mut level = GridLevel::new(bucket_size);
    let size = layout.cell_size;

    for (pos, cell) in layout.iter_cells() {
        let colliders = block_colliders(cell, size);
        spawn_block(world, &mut level, cell.kind, pos, Vec2::splat(size), colliders);
    }

    if layout.borders {
        let extent = layout.extent();
        let borders = [
            (Vec2::new(-size, -size), Vec2::new(size, extent.y + 2.0 * size)),
            (Vec2::new(extent.x, -size), Vec2::new(size, extent.y + 2.0 * size)),
            (Vec2::new(0.0, -size), Vec2::new(extent.x, size)),
            (Vec2::new(0.0, extent.y), Vec2::new(extent.x, size)),
        ];
        for (pos, border_size) in borders {
            let colliders = Colliders::single(BoxCollider::new(border_size.x, border_size.y).reporting());
            spawn_block(world, &mut level, ObjectKind::Border, pos, border_size, colliders);
        }
        debug!("Spawned level borders around {:?}", extent);
    }

    info!(
        "Spawned level {}x{} ({} static entities)",
        layout.columns(),
        layout.rows(),
        level.len()
    );
    level
}

/// Despawn every entity spawned by [`spawn_level`]. Returns how many went.
pub fn despawn_level(world: &mut World) -> usize {
    let mut query = world.query_filtered::<Entity, With<StaticGeometry>>();
    let blocks: Vec<Entity> = query.iter(world).collect();
    for &entity in &blocks {
        world.despawn(entity);
    }
    debug!("Despawned {} static entities", blocks.len());
    blocks.len()
}
