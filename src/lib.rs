//! gridmotion library.
//!
//! Grid-aligned collision resolution for 2D arcade games on top of
//! `bevy_ecs`. This module exposes the components, resources, systems and
//! events of the physics tick, plus the small tank game used by the demo
//! binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
