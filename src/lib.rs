//! Banana Catcher - catch the bananas, dodge the coconuts
//!
//! Core modules:
//! - `sim`: Deterministic simulation (throwables, contacts, antagonist, tutorial)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player audio preferences
//! - `audio`: Sound identifiers and volume gating
//! - `services`: Collaborator seam for the rendering/audio/scene host

pub mod audio;
pub mod error;
pub mod services;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the authoritative defaults behind [`Tuning::default`].
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Scene dimensions (points, y axis pointing up)
    pub const SCENE_WIDTH: f32 = 320.0;
    pub const SCENE_HEIGHT: f32 = 568.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Downward acceleration (points/s²)
    pub const GRAVITY: f32 = 200.0;
    /// Converts throw impulses to launch velocity (points/s per impulse unit)
    pub const IMPULSE_SCALE: f32 = 20.0;
    /// Horizontal impulse of a regular throw is drawn from -JITTER..=JITTER
    pub const THROW_JITTER: i32 = 6;
    /// Velocity kept after bouncing off the scene edge
    pub const EDGE_RESTITUTION: f32 = 0.5;

    /// Points table
    pub const BANANA_CAUGHT_POINTS: i64 = 10;
    pub const BANANA_MISSED_POINTS: i64 = -5;
    pub const COCONUT_CAUGHT_POINTS: i64 = 5;

    pub const STARTING_LIVES: u32 = 3;
    /// Bananas caught per antagonist level
    pub const LEVEL_MILESTONE: u32 = 5;

    /// Antagonist throw cooldown curve (seconds)
    pub const THROW_COOLDOWN_BASE: f32 = 1.2;
    pub const THROW_COOLDOWN_PER_LEVEL: f32 = 0.1;
    pub const THROW_COOLDOWN_MIN: f32 = 0.4;

    /// Coconut probability curve for regular throws
    pub const COCONUT_CHANCE_BASE: f32 = 0.25;
    pub const COCONUT_CHANCE_PER_LEVEL: f32 = 0.05;
    pub const COCONUT_CHANCE_MAX: f32 = 0.6;

    /// Antagonist patrol
    pub const ANTAGONIST_TOP_OFFSET: f32 = 130.0;
    pub const PATROL_SPEED_BASE: f32 = 80.0;
    pub const PATROL_SPEED_PER_LEVEL: f32 = 12.0;
    pub const PATROL_MARGIN: f32 = 40.0;
    /// Chance per second of a spontaneous turn
    pub const PATROL_TURN_RATE: f32 = 0.5;
    pub const ENRAGE_DURATION: f32 = 0.6;

    /// Frenzy: horizontal impulse spread, jitter, pacing (seconds)
    pub const FRENZY_MAX_X: f32 = 8.0;
    pub const FRENZY_JITTER: u32 = 4;
    pub const FRENZY_THROW_DELAY: f32 = 0.4;
    pub const FRENZY_CENTER_DURATION: f32 = 0.5;

    /// End of game
    pub const GAME_OVER_DELAY: f32 = 0.3;
    pub const TRANSITION_DURATION: f32 = 0.5;

    /// Catcher geometry and movement
    pub const CATCHER_LIFT: f32 = 10.0;
    pub const CATCHER_WIDTH: f32 = 64.0;
    pub const CATCHER_HEIGHT: f32 = 40.0;
    pub const CATCHER_SPEED: f32 = 600.0;
    pub const REACTION_DURATION: f32 = 0.5;
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = (target - current).clamp(-max_delta, max_delta);
    current + delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_clamps_step() {
        assert_eq!(approach(0.0, 10.0, 3.0), 3.0);
        assert_eq!(approach(0.0, -10.0, 3.0), -3.0);
        assert_eq!(approach(9.0, 10.0, 3.0), 10.0);
    }
}
