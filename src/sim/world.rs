//! World container: live throwables and ground decorations
//!
//! The world is the single owner of every throwable in a scene. Removal is
//! terminal: ids are never reused, so a removed throwable cannot come back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Body;
use super::throwable::{EntityId, Throwable};

/// Closed set of decoration kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DecorationKind {
    /// Rising "+10" / "-5" label
    FloatingScore { points: i64 },
    /// Squashed banana on the ground
    SplatBanana,
    /// Cracked coconut halves on the ground
    BrokenCoconut,
    /// Fading "Game Over" banner
    GameOverLabel,
}

/// A visual leftover placed into the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub pos: Vec2,
    /// Seconds left before removal (`None` = stays)
    pub ttl: Option<f32>,
}

impl Decoration {
    pub fn floating_score(points: i64, pos: Vec2) -> Self {
        Self {
            kind: DecorationKind::FloatingScore { points },
            pos,
            ttl: Some(1.0),
        }
    }

    pub fn splat_banana(pos: Vec2) -> Self {
        Self {
            kind: DecorationKind::SplatBanana,
            pos,
            ttl: Some(3.0),
        }
    }

    pub fn broken_coconut(pos: Vec2) -> Self {
        Self {
            kind: DecorationKind::BrokenCoconut,
            pos,
            ttl: Some(3.0),
        }
    }

    pub fn game_over_label(pos: Vec2) -> Self {
        Self {
            kind: DecorationKind::GameOverLabel,
            pos,
            ttl: None,
        }
    }
}

/// Scene contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Live throwables, sorted by id
    throwables: Vec<Throwable>,
    decorations: Vec<Decoration>,
    next_id: EntityId,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            throwables: Vec::new(),
            decorations: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert a throwable, assigning it a fresh id
    pub fn insert(&mut self, mut throwable: Throwable) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        throwable.id = id;
        self.throwables.push(throwable);
        id
    }

    /// Remove a throwable; removing twice is a no-op returning `None`
    pub fn remove(&mut self, id: EntityId) -> Option<Throwable> {
        let idx = self.throwables.iter().position(|t| t.id == id)?;
        Some(self.throwables.remove(idx))
    }

    pub fn is_attached(&self, id: EntityId) -> bool {
        self.throwables.iter().any(|t| t.id == id)
    }

    /// Whether a contacting body still belongs to the scene
    ///
    /// Fixtures (catcher, ground, edge) are always live.
    pub fn is_live(&self, body: &Body) -> bool {
        body.entity.is_none_or(|id| self.is_attached(id))
    }

    pub fn get(&self, id: EntityId) -> Option<&Throwable> {
        self.throwables.iter().find(|t| t.id == id)
    }

    pub fn throwables(&self) -> &[Throwable] {
        &self.throwables
    }

    pub fn throwables_mut(&mut self) -> &mut [Throwable] {
        &mut self.throwables
    }

    pub fn add_decoration(&mut self, decoration: Decoration) {
        self.decorations.push(decoration);
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Count decorations matching a predicate
    pub fn count_decorations(&self, pred: impl Fn(&DecorationKind) -> bool) -> usize {
        self.decorations.iter().filter(|d| pred(&d.kind)).count()
    }

    /// Age timed decorations and drop the expired ones
    pub fn age_decorations(&mut self, dt: f32) {
        for decoration in &mut self.decorations {
            if let Some(ttl) = decoration.ttl.as_mut() {
                *ttl -= dt;
            }
        }
        self.decorations.retain(|d| d.ttl.is_none_or(|ttl| ttl > 0.0));
    }

    /// Drop everything (scene teardown)
    pub fn clear(&mut self) {
        self.throwables.clear();
        self.decorations.clear();
    }
}
