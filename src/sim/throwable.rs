//! Falling objects thrown by the antagonist

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Category;

/// Stable handle for an object in the [`World`](super::world::World)
pub type EntityId = u32;

/// Kind of throwable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrowableKind {
    Banana,
    Coconut,
}

impl ThrowableKind {
    /// Collision category of bodies of this kind
    pub fn category(&self) -> Category {
        match self {
            ThrowableKind::Banana => Category::Banana,
            ThrowableKind::Coconut => Category::Coconut,
        }
    }

    /// Collision radius (points)
    pub fn radius(&self) -> f32 {
        match self {
            ThrowableKind::Banana => 12.0,
            ThrowableKind::Coconut => 14.0,
        }
    }

    /// Range of the upward launch impulse
    fn vertical_force_range(&self) -> (f32, f32) {
        match self {
            ThrowableKind::Banana => (6.0, 9.0),
            // Heavier, thrown harder
            ThrowableKind::Coconut => (7.0, 10.0),
        }
    }

    /// Upward impulse magnitude for one throw
    pub fn vertical_throw_force(&self, rng: &mut impl Rng) -> f32 {
        let (lo, hi) = self.vertical_force_range();
        rng.random_range(lo..hi)
    }
}

/// A throwable entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Throwable {
    /// Assigned by the world on insertion
    pub id: EntityId,
    pub kind: ThrowableKind,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Throwable {
    pub fn new(kind: ThrowableKind) -> Self {
        Self {
            id: 0,
            kind,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
        }
    }

    pub fn banana() -> Self {
        Self::new(ThrowableKind::Banana)
    }

    pub fn coconut() -> Self {
        Self::new(ThrowableKind::Coconut)
    }

    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    /// Replace the velocity with the one produced by an impulse
    pub fn apply_impulse(&mut self, impulse: Vec2, impulse_scale: f32) {
        self.vel = impulse * impulse_scale;
    }

    pub fn radius(&self) -> f32 {
        self.kind.radius()
    }
}
