//! Contact records produced by the target-position solver.
//!
//! Whenever a mover's candidate position overlaps static geometry, the solver
//! writes one [`ContactEvent`] per reporting collider involved. The records
//! are plain data; game code decides what a contact means (destroy a brick,
//! stop a projectile, end the game when the eagle is hit).
//!
//! The dynamic conflict resolver never writes contacts.
//!
//! # Example
//!
//! ```ignore
//! fn on_contact(mut reader: MessageReader<ContactEvent>) {
//!     for contact in reader.read() {
//!         log::info!("{:?} touched {:?} from {:?}", contact.subject, contact.other, contact.direction);
//!     }
//! }
//! ```

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

/// Side of an entity a contact happened on. The y axis grows upward, so
/// `Top` is positive y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactDirection {
    Left,
    Right,
    Top,
    Bottom,
}

impl ContactDirection {
    pub fn opposite(self) -> Self {
        match self {
            ContactDirection::Left => ContactDirection::Right,
            ContactDirection::Right => ContactDirection::Left,
            ContactDirection::Top => ContactDirection::Bottom,
            ContactDirection::Bottom => ContactDirection::Top,
        }
    }
}

/// One reporting collider found overlapping another entity.
///
/// `subject` owns the reporting collider at index `collider`; `other` is the
/// entity it overlapped. For the mover, `direction` is its own movement
/// direction; for the obstacle it is the side the mover arrived from.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub subject: Entity,
    pub other: Entity,
    pub collider: usize,
    pub direction: ContactDirection,
}
