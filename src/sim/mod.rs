//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies; the host consumes events

pub mod antagonist;
pub mod catcher;
pub mod collision;
pub mod event;
pub mod motion;
pub mod physics;
pub mod score;
pub mod state;
pub mod throwable;
pub mod tick;
pub mod timeline;
pub mod tutorial;
pub mod world;

pub use antagonist::{Antagonist, AntagonistStatus, FrenzyThrow, LevelChange, Side, frenzy_plan};
pub use catcher::{Catcher, PointerEvent, PointerLatch, Reaction};
pub use collision::{Body, Category, Collision, CollisionPair, classify};
pub use event::{ButtonFace, GameEvent, SceneKind, Transition};
pub use physics::{Arena, ContactEvent};
pub use score::Scoreboard;
pub use state::{GamePhase, GameState};
pub use throwable::{EntityId, Throwable, ThrowableKind};
pub use tick::{TickInput, handle_contact, tick};
pub use timeline::{Step, Timeline};
pub use tutorial::{TutorialStage, TutorialState};
pub use world::{Decoration, DecorationKind, World};
