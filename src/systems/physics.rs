//! Physics tick driver.
//!
//! [`setup_physics`] prepares a `World` for simulation and registers the
//! [`PhysicsTick`] schedule; [`physics_update`] advances time and runs it.
//!
//! # Tick Flow
//!
//! 1. `update_contact_messages` – rotate the [`ContactEvent`] buffers
//! 2. [`solve_target_positions`] – provisional moves against static geometry
//! 3. [`resolve_dynamic_conflicts`] – pairwise rollback between movers
//! 4. [`commit_positions`] – targets become committed positions
//!
//! The systems are chained, so every phase finishes for all entities before
//! the next one starts.
//!
//! # Example
//!
//! ```ignore
//! let mut world = World::new();
//! setup_physics(&mut world);
//! world.resource_mut::<PhysicsWorld>().set_level(Box::new(level));
//! loop {
//!     physics_update(&mut world, 1.0 / 60.0);
//! }
//! ```

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ScheduleLabel;

use crate::events::contact::ContactEvent;
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::worldtime::WorldTime;
use crate::systems::commit::commit_positions;
use crate::systems::conflicts::resolve_dynamic_conflicts;
use crate::systems::solver::solve_target_positions;
use crate::systems::time::update_world_time;

/// Schedule holding the physics phases.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhysicsTick;

/// Advance the contact message buffers so records live for two ticks.
pub fn update_contact_messages(mut messages: ResMut<Messages<ContactEvent>>) {
    messages.update();
}

/// Insert the physics resources that are missing and add the
/// [`PhysicsTick`] schedule. Existing resources (a custom
/// [`PhysicsConfig`], for instance) are kept.
pub fn setup_physics(world: &mut World) {
    if !world.contains_resource::<PhysicsWorld>() {
        world.insert_resource(PhysicsWorld::new());
    }
    if !world.contains_resource::<WorldTime>() {
        world.insert_resource(WorldTime::default());
    }
    if !world.contains_resource::<PhysicsConfig>() {
        world.insert_resource(PhysicsConfig::default());
    }
    if !world.contains_resource::<Messages<ContactEvent>>() {
        world.init_resource::<Messages<ContactEvent>>();
    }

    let mut schedule = Schedule::new(PhysicsTick);
    schedule.add_systems(
        (
            update_contact_messages,
            solve_target_positions,
            resolve_dynamic_conflicts,
            commit_positions,
        )
            .chain(),
    );
    world.add_schedule(schedule);
}

/// Run one physics tick of `dt` unscaled seconds.
pub fn physics_update(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    world.run_schedule(PhysicsTick);
}
