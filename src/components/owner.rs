//! Non-owning back reference to the entity that spawned this one.
//!
//! A projectile carries `Owner(tank)`. The pair is exempt from dynamic
//! conflict checks in both directions. The referenced entity may already be
//! despawned; nothing here keeps it alive.

use bevy_ecs::prelude::{Component, Entity};

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Owner(pub Entity);

/// True if `a` owns `b` or `b` owns `a`.
pub fn owner_related(a: Entity, a_owner: Option<&Owner>, b: Entity, b_owner: Option<&Owner>) -> bool {
    a_owner.is_some_and(|o| o.0 == b) || b_owner.is_some_and(|o| o.0 == a)
}
