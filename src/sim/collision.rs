//! Contact classification
//!
//! The physics side reports contacts as an unordered pair of bodies. Here the
//! pair is put into canonical order (lower category first) and looked up in a
//! single dispatch table, so the handler never depends on which body the
//! engine happened to call "A".

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::throwable::EntityId;
use crate::error::GameError;

/// Body categories, in canonical contact order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Category {
    Banana = 1,
    Coconut = 2,
    Catcher = 4,
    Ground = 8,
    Edge = 16,
}

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub category: Category,
    /// World handle; `None` for scene fixtures
    pub entity: Option<EntityId>,
    pub pos: Vec2,
}

impl Body {
    pub fn entity(category: Category, id: EntityId, pos: Vec2) -> Self {
        Self {
            category,
            entity: Some(id),
            pos,
        }
    }

    pub fn fixture(category: Category, pos: Vec2) -> Self {
        Self {
            category,
            entity: None,
            pos,
        }
    }
}

/// A contact with its bodies in canonical order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionPair {
    pub low: Body,
    pub high: Body,
}

impl CollisionPair {
    /// Order two bodies by category rank
    pub fn canonical(a: Body, b: Body) -> Self {
        if a.category <= b.category {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

/// Outcome of a recognised contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    BananaCaught { banana: EntityId, pos: Vec2 },
    BananaLanded { banana: EntityId, pos: Vec2 },
    CoconutCaught { coconut: EntityId, pos: Vec2 },
    CoconutLanded { coconut: EntityId, pos: Vec2 },
}

impl Collision {
    /// The throwable consumed by this contact
    pub fn throwable(&self) -> EntityId {
        match *self {
            Collision::BananaCaught { banana, .. } | Collision::BananaLanded { banana, .. } => banana,
            Collision::CoconutCaught { coconut, .. } | Collision::CoconutLanded { coconut, .. } => {
                coconut
            }
        }
    }
}

/// Dispatch table for canonical pairs
pub fn classify(pair: &CollisionPair) -> Result<Collision, GameError> {
    let unexpected = || GameError::UnexpectedContact {
        low: pair.low.category,
        high: pair.high.category,
    };
    let throwable = || {
        pair.low.entity.ok_or(GameError::MissingEntity {
            category: pair.low.category,
        })
    };
    let pos = pair.low.pos;

    match pair.low.category {
        Category::Banana => match pair.high.category {
            Category::Catcher => Ok(Collision::BananaCaught {
                banana: throwable()?,
                pos,
            }),
            Category::Ground => Ok(Collision::BananaLanded {
                banana: throwable()?,
                pos,
            }),
            Category::Banana | Category::Coconut | Category::Edge => Err(unexpected()),
        },
        Category::Coconut => match pair.high.category {
            Category::Catcher => Ok(Collision::CoconutCaught {
                coconut: throwable()?,
                pos,
            }),
            Category::Ground => Ok(Collision::CoconutLanded {
                coconut: throwable()?,
                pos,
            }),
            Category::Banana | Category::Coconut | Category::Edge => Err(unexpected()),
        },
        Category::Catcher | Category::Ground | Category::Edge => Err(unexpected()),
    }
}
