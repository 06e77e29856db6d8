//! Score and lives

use serde::{Deserialize, Serialize};

/// Session score and remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: i64,
    lives: u32,
}

impl Scoreboard {
    pub fn new(lives: u32) -> Self {
        Self { score: 0, lives }
    }

    /// Add points (may be negative); returns the new score
    pub fn apply_delta(&mut self, points: i64) -> i64 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Take a life, never going below zero; returns lives left
    pub fn decrement_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_depleted(&self) -> bool {
        self.lives == 0
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }
}
