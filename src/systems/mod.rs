//! Engine systems.
//!
//! Submodules overview
//! - [`commit`] – copy provisional targets into committed positions
//! - [`conflicts`] – pairwise rollback between registered movers
//! - [`physics`] – tick schedule setup and the per-tick driver
//! - [`solver`] – provisional moves against static level geometry
//! - [`time`] – update simulation time and delta

pub mod commit;
pub mod conflicts;
pub mod physics;
pub mod solver;
pub mod time;
