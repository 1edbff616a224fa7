//! Tick clock.
//!
//! Advances [`WorldTime`] before the physics phases run. The solver reads
//! `WorldTime::delta` as the integration step of the tick.
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::worldtime::WorldTime;

/// Advance the clock by one tick of `dt` unscaled seconds and return the
/// scaled step. Negative or non-finite deltas produce a zero step.
pub fn update_world_time(world: &mut World, dt: f32) -> f32 {
    let mut wt = world.resource_mut::<WorldTime>();
    let step = if dt.is_finite() { (dt * wt.time_scale).max(0.0) } else { 0.0 };
    wt.elapsed += step;
    wt.delta = step;
    wt.tick_count += 1;
    trace!("tick {} step {}", wt.tick_count, step);
    step
}
