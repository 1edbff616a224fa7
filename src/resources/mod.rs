//! ECS resources made available to systems.
//!
//! Overview
//! - `engineconfig` – INI-backed engine and simulation settings
//! - `level` – level spatial index trait and the bucketed `GridLevel`
//! - `levellayout` – JSON level layouts and static geometry spawning
//! - `physicsconfig` – grid cell size read by the solver
//! - `physicsworld` – dynamic registry plus current level
//! - `registry` – insertion-ordered set of registered movers
//! - `worldtime` – simulation time and delta
pub mod engineconfig;
pub mod level;
pub mod levellayout;
pub mod physicsconfig;
pub mod physicsworld;
pub mod registry;
pub mod worldtime;
