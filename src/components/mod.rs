//! ECS components for spatial entities.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned colliders and per-entity collider lists
//! - [`mapposition`] – committed world-space position (bottom-left anchor)
//! - [`motion`] – direction and speed, movement axis, approach sides
//! - [`objectkind`] – type tags and the `can_collide_with` filter
//! - [`owner`] – non-owning back reference used for owner exemption
//! - [`projectile`] – projectile gameplay state
//! - [`shield`] – temporary spawn shield
//! - [`spawning`] – spawn-in delay gating tank speed and fire
//! - [`spatial`] – body size and the bundle every physics entity spawns with
//! - [`tank`] – tank gameplay state
//! - [`targetposition`] – provisional position valid within one tick

pub mod boxcollider;
pub mod mapposition;
pub mod motion;
pub mod objectkind;
pub mod owner;
pub mod projectile;
pub mod shield;
pub mod spatial;
pub mod spawning;
pub mod tank;
pub mod targetposition;
