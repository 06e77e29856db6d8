//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`]. A JSON
//! override only needs the keys it wants to change:
//!
//! ```json
//! { "starting_lives": 5, "points": { "banana_missed": -10 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Points awarded per contact kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointTable {
    pub banana_caught: i64,
    pub banana_missed: i64,
    pub coconut_caught: i64,
}

impl Default for PointTable {
    fn default() -> Self {
        Self {
            banana_caught: BANANA_CAUGHT_POINTS,
            banana_missed: BANANA_MISSED_POINTS,
            coconut_caught: COCONUT_CAUGHT_POINTS,
        }
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scene ===
    pub scene_width: f32,
    pub scene_height: f32,
    pub ground_height: f32,

    // === Physics ===
    pub gravity: f32,
    pub impulse_scale: f32,
    pub throw_jitter: i32,
    pub edge_restitution: f32,

    // === Scoring ===
    pub points: PointTable,
    pub starting_lives: u32,
    pub level_milestone: u32,

    // === Antagonist ===
    pub cooldown_base: f32,
    pub cooldown_per_level: f32,
    pub cooldown_min: f32,
    pub coconut_chance_base: f32,
    pub coconut_chance_per_level: f32,
    pub coconut_chance_max: f32,
    pub antagonist_top_offset: f32,
    pub patrol_speed_base: f32,
    pub patrol_speed_per_level: f32,
    pub patrol_margin: f32,
    pub patrol_turn_rate: f32,
    pub enrage_duration: f32,

    // === Frenzy ===
    pub frenzy_max_x: f32,
    pub frenzy_jitter: u32,
    pub frenzy_throw_delay: f32,
    pub frenzy_center_duration: f32,

    // === End of game ===
    pub game_over_delay: f32,
    pub transition_duration: f32,

    // === Catcher ===
    pub catcher_lift: f32,
    pub catcher_width: f32,
    pub catcher_height: f32,
    pub catcher_speed: f32,
    pub reaction_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,
            ground_height: GROUND_HEIGHT,

            gravity: GRAVITY,
            impulse_scale: IMPULSE_SCALE,
            throw_jitter: THROW_JITTER,
            edge_restitution: EDGE_RESTITUTION,

            points: PointTable::default(),
            starting_lives: STARTING_LIVES,
            level_milestone: LEVEL_MILESTONE,

            cooldown_base: THROW_COOLDOWN_BASE,
            cooldown_per_level: THROW_COOLDOWN_PER_LEVEL,
            cooldown_min: THROW_COOLDOWN_MIN,
            coconut_chance_base: COCONUT_CHANCE_BASE,
            coconut_chance_per_level: COCONUT_CHANCE_PER_LEVEL,
            coconut_chance_max: COCONUT_CHANCE_MAX,
            antagonist_top_offset: ANTAGONIST_TOP_OFFSET,
            patrol_speed_base: PATROL_SPEED_BASE,
            patrol_speed_per_level: PATROL_SPEED_PER_LEVEL,
            patrol_margin: PATROL_MARGIN,
            patrol_turn_rate: PATROL_TURN_RATE,
            enrage_duration: ENRAGE_DURATION,

            frenzy_max_x: FRENZY_MAX_X,
            frenzy_jitter: FRENZY_JITTER,
            frenzy_throw_delay: FRENZY_THROW_DELAY,
            frenzy_center_duration: FRENZY_CENTER_DURATION,

            game_over_delay: GAME_OVER_DELAY,
            transition_duration: TRANSITION_DURATION,

            catcher_lift: CATCHER_LIFT,
            catcher_width: CATCHER_WIDTH,
            catcher_height: CATCHER_HEIGHT,
            catcher_speed: CATCHER_SPEED,
            reaction_duration: REACTION_DURATION,
        }
    }
}

impl Tuning {
    /// Parse a (partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("scene_width", self.scene_width),
            ("scene_height", self.scene_height),
            ("impulse_scale", self.impulse_scale),
            ("cooldown_min", self.cooldown_min),
            ("frenzy_throw_delay", self.frenzy_throw_delay),
            ("catcher_width", self.catcher_width),
            ("catcher_height", self.catcher_height),
            ("catcher_speed", self.catcher_speed),
            ("gravity", self.gravity),
            ("game_over_delay", self.game_over_delay),
            ("transition_duration", self.transition_duration),
            ("frenzy_center_duration", self.frenzy_center_duration),
            ("reaction_duration", self.reaction_duration),
            ("enrage_duration", self.enrage_duration),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(GameError::InvalidTuning {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }
        if self.ground_height < 0.0 || self.ground_height >= self.scene_height {
            return Err(GameError::InvalidTuning {
                field: "ground_height",
                reason: "must lie inside the scene",
            });
        }
        if self.level_milestone == 0 {
            return Err(GameError::InvalidTuning {
                field: "level_milestone",
                reason: "must be at least one catch",
            });
        }
        if self.starting_lives == 0 {
            return Err(GameError::InvalidTuning {
                field: "starting_lives",
                reason: "must start with at least one life",
            });
        }
        if self.cooldown_min > self.cooldown_base {
            return Err(GameError::InvalidTuning {
                field: "cooldown_min",
                reason: "floor exceeds base cooldown",
            });
        }
        if self.cooldown_per_level < 0.0 || self.patrol_speed_per_level < 0.0 {
            return Err(GameError::InvalidTuning {
                field: "per_level",
                reason: "difficulty must not ease with level",
            });
        }
        let chances = [
            ("coconut_chance_base", self.coconut_chance_base),
            ("coconut_chance_per_level", self.coconut_chance_per_level),
        ];
        for (field, value) in chances {
            if !value.is_finite() {
                return Err(GameError::InvalidTuning {
                    field,
                    reason: "must be a finite number",
                });
            }
        }
        if !(0.0..=1.0).contains(&self.coconut_chance_max) {
            return Err(GameError::InvalidTuning {
                field: "coconut_chance_max",
                reason: "must be a probability",
            });
        }
        Ok(())
    }

    /// Throw cooldown at `level`; non-increasing in level
    pub fn cooldown_for_level(&self, level: u32) -> f32 {
        (self.cooldown_base - self.cooldown_per_level * level as f32).max(self.cooldown_min)
    }

    /// Chance a regular throw is a coconut at `level`
    pub fn coconut_chance_for_level(&self, level: u32) -> f32 {
        (self.coconut_chance_base + self.coconut_chance_per_level * level as f32)
            .clamp(0.0, self.coconut_chance_max)
    }

    /// Patrol speed at `level`
    pub fn patrol_speed_for_level(&self, level: u32) -> f32 {
        self.patrol_speed_base + self.patrol_speed_per_level * level as f32
    }

    /// Height of the antagonist above the scene floor
    pub fn antagonist_y(&self) -> f32 {
        self.scene_height - self.antagonist_top_offset
    }

    /// Resting height of the catcher's centre
    pub fn catcher_y(&self) -> f32 {
        self.ground_height + self.catcher_lift
    }
}
