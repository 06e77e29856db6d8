//! Main scene state
//!
//! Everything a play session mutates lives here and is owned by one
//! `GameState`; nothing outside the tick/contact path writes to it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::antagonist::Antagonist;
use super::catcher::{Catcher, PointerLatch};
use super::event::GameEvent;
use super::physics::Arena;
use super::score::Scoreboard;
use super::timeline::Timeline;
use super::world::World;
use crate::audio::MusicTrack;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives depleted, waiting out the delay before leaving the scene
    Ending,
    /// Game over scene presented; the session is frozen
    Over,
}

/// Deferred scene-level actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCue {
    PresentGameOver,
}

/// Complete main scene state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub arena: Arena,
    /// Simulation clock (seconds)
    pub time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub world: World,
    pub catcher: Catcher,
    pub pointer: PointerLatch,
    pub antagonist: Antagonist,
    pub scoreboard: Scoreboard,
    pub cues: Timeline<SceneCue>,
    /// Pending events for the host (drain each frame)
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let arena = Arena::from_tuning(&tuning);
        let antagonist = Antagonist::new(Vec2::new(arena.center_x(), tuning.antagonist_y()));
        let mut state = Self {
            seed,
            arena,
            time: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            world: World::new(),
            catcher: Catcher::new(&tuning),
            pointer: PointerLatch::default(),
            antagonist,
            scoreboard: Scoreboard::new(tuning.starting_lives),
            cues: Timeline::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.events.push(GameEvent::ChangeMusic(MusicTrack::Game));
        log::info!(
            "Game session started (seed {}, {} lives)",
            seed,
            state.scoreboard.lives()
        );
        state
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn score(&self) -> i64 {
        self.scoreboard.score()
    }

    pub fn lives(&self) -> u32 {
        self.scoreboard.lives()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }
}
