//! Axis-aligned box colliders.
//!
//! A [`BoxCollider`] is a rectangle expressed in entity-local space: it is
//! offset from the entity anchor ([`MapPosition`](super::mapposition::MapPosition))
//! and only becomes a world-space box when a position is supplied at test
//! time. Entities with composite shapes carry several colliders in a
//! [`Colliders`] component.
//!
//! Overlap is strict: two boxes that only share an edge do not overlap.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
    /// Inactive colliders neither test nor get tested.
    pub active: bool,
    /// Emit a [`ContactEvent`](crate::events::contact::ContactEvent) whenever
    /// this collider is found overlapping another entity.
    pub reports_contacts: bool,
}

impl BoxCollider {
    /// Create an active BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
            active: true,
            reports_contacts: false,
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Make this collider emit contact records.
    pub fn reporting(mut self) -> Self {
        self.reports_contacts = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    ///
    /// Activity flags are not consulted here; see [`Colliders::region_overlap`].
    /// A box with zero width or height has no area and never overlaps.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    pub fn is_degenerate(&self) -> bool {
        self.size.x == 0.0 || self.size.y == 0.0
    }
}

/// Ordered list of colliders attached to one entity.
///
/// The index of a collider in this list is stable for the lifetime of the
/// component and is what [`ContactEvent::collider`](crate::events::contact::ContactEvent)
/// refers to.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Colliders(pub SmallVec<[BoxCollider; 4]>);

impl Colliders {
    pub fn single(collider: BoxCollider) -> Self {
        let mut list = SmallVec::new();
        list.push(collider);
        Self(list)
    }

    pub fn from_vec(colliders: Vec<BoxCollider>) -> Self {
        Self(SmallVec::from_vec(colliders))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&BoxCollider> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BoxCollider> {
        self.0.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxCollider> {
        self.0.iter()
    }

    /// Active colliders paired with their index in the list.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &BoxCollider)> {
        self.0.iter().enumerate().filter(|(_, c)| c.active)
    }

    pub fn has_active(&self) -> bool {
        self.0.iter().any(|c| c.active)
    }

    pub fn set_all_active(&mut self, active: bool) {
        for collider in self.0.iter_mut() {
            collider.active = active;
        }
    }

    /// True if any active collider of `self` placed at `position` overlaps any
    /// active collider of `other` placed at `other_position`.
    pub fn region_overlap(&self, position: Vec2, other: &Colliders, other_position: Vec2) -> bool {
        self.iter_active().any(|(_, a)| {
            other
                .iter_active()
                .any(|(_, b)| a.overlaps(position, b, other_position))
        })
    }

    /// World-space bounds enclosing every collider, active or not.
    pub fn bounds(&self, position: Vec2) -> Option<(Vec2, Vec2)> {
        self.0.iter().map(|c| c.aabb(position)).reduce(|(min_a, max_a), (min_b, max_b)| {
            (min_a.min(min_b), max_a.max(max_b))
        })
    }
}
