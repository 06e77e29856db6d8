//! The coconut-throwing antagonist
//!
//! State machine:
//! - `Ready` → `Throttled` on every throw; back to `Ready` once the cooldown
//!   (which shrinks with level) has elapsed.
//! - Any → `Disabled` on level-up (frenzy) or end of game. A frenzy re-enables
//!   the antagonist with its final step; cancelling the frenzy drops that step.
//!
//! Catches below a level milestone only trigger a short enrage reaction.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motion::Glide;
use super::throwable::ThrowableKind;
use super::timeline::Timeline;
use crate::tuning::Tuning;

/// Throw gate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AntagonistStatus {
    /// May throw
    Ready,
    /// Cooling down until the given sim time
    Throttled { until: f64 },
    /// Locked out (frenzy or game over)
    Disabled,
}

/// Result of recording a banana catch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    Unchanged,
    Raised { from: u32, to: u32 },
}

/// Which side a frenzy coconut is thrown toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One coconut of a frenzy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrenzyThrow {
    pub side: Side,
    /// Horizontal impulse
    pub impulse_x: f32,
}

/// Scripted frenzy steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrenzyAction {
    /// Glide to the scene centre
    Center { x: f32, duration: f32 },
    Throw(FrenzyThrow),
    /// Frenzy over; may throw again
    Enable,
}

/// Horizontal impulses of a frenzy at `level`, alternating left/right
pub fn frenzy_plan(level: u32, rng: &mut impl Rng, tuning: &Tuning) -> Vec<FrenzyThrow> {
    let level = level.max(1);
    let max_x = tuning.frenzy_max_x;
    let step = 2.0 * max_x / level as f32;

    let mut pairs = level.saturating_sub(1).max(1);
    if pairs >= 2 {
        pairs -= rng.random_range(0..pairs);
    }

    let mut throws = Vec::with_capacity(pairs as usize * 2);
    for i in 0..pairs {
        let offset = step * i as f32;
        throws.push(FrenzyThrow {
            side: Side::Left,
            impulse_x: -max_x + offset + jitter(rng, tuning.frenzy_jitter),
        });
        throws.push(FrenzyThrow {
            side: Side::Right,
            impulse_x: max_x - offset + jitter(rng, tuning.frenzy_jitter),
        });
    }
    throws
}

fn jitter(rng: &mut impl Rng, span: u32) -> f32 {
    if span == 0 {
        0.0
    } else {
        rng.random_range(0..span) as f32
    }
}

/// The antagonist
#[derive(Debug, Clone)]
pub struct Antagonist {
    pub pos: Vec2,
    level: u32,
    bananas_caught: u32,
    status: AntagonistStatus,
    last_throw_at: Option<f64>,
    /// Patrol direction (+1 right, -1 left)
    heading: f32,
    glide: Option<Glide>,
    enrage_timer: f32,
    frenzy: Timeline<FrenzyAction>,
}

impl Antagonist {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            level: 0,
            bananas_caught: 0,
            status: AntagonistStatus::Ready,
            last_throw_at: None,
            heading: 1.0,
            glide: None,
            enrage_timer: 0.0,
            frenzy: Timeline::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn bananas_caught(&self) -> u32 {
        self.bananas_caught
    }

    pub fn status(&self) -> AntagonistStatus {
        self.status
    }

    pub fn last_throw_at(&self) -> Option<f64> {
        self.last_throw_at
    }

    pub fn is_throttled(&self) -> bool {
        matches!(self.status, AntagonistStatus::Throttled { .. })
    }

    pub fn is_disabled(&self) -> bool {
        self.status == AntagonistStatus::Disabled
    }

    pub fn frenzy_in_progress(&self) -> bool {
        self.frenzy.is_running()
    }

    pub fn is_enraged(&self) -> bool {
        self.enrage_timer > 0.0
    }

    /// Can a throw be asked for at sim time `now`?
    pub fn is_able_to_throw(&self, now: f64) -> bool {
        match self.status {
            AntagonistStatus::Ready => true,
            AntagonistStatus::Throttled { until } => now >= until,
            AntagonistStatus::Disabled => false,
        }
    }

    /// Lock out throwing and drop any scripted frenzy
    pub fn disable(&mut self) {
        self.status = AntagonistStatus::Disabled;
        self.glide = None;
        let dropped = self.frenzy.cancel();
        if dropped > 0 {
            log::debug!("Antagonist disabled, dropped {} frenzy steps", dropped);
        }
    }

    pub fn enable(&mut self) {
        self.status = AntagonistStatus::Ready;
    }

    /// Decide on a throw; a safe no-op (`None`) while throttled or disabled
    pub fn try_throw(&mut self, now: f64, rng: &mut impl Rng, tuning: &Tuning) -> Option<ThrowableKind> {
        if !self.is_able_to_throw(now) {
            return None;
        }
        let kind = if rng.random_bool(tuning.coconut_chance_for_level(self.level) as f64) {
            ThrowableKind::Coconut
        } else {
            ThrowableKind::Banana
        };
        let cooldown = tuning.cooldown_for_level(self.level) as f64;
        self.status = AntagonistStatus::Throttled { until: now + cooldown };
        self.last_throw_at = Some(now);
        Some(kind)
    }

    /// Count a caught banana and report whether the level went up
    pub fn record_banana_catch(&mut self, tuning: &Tuning) -> LevelChange {
        self.bananas_caught += 1;
        self.enrage_timer = tuning.enrage_duration;

        let new_level = self.bananas_caught / tuning.level_milestone.max(1);
        if new_level > self.level {
            let from = self.level;
            self.level = new_level;
            LevelChange::Raised { from, to: new_level }
        } else {
            LevelChange::Unchanged
        }
    }

    /// Disable and script a frenzy for the current level
    pub fn begin_frenzy(&mut self, center_x: f32, rng: &mut impl Rng, tuning: &Tuning) -> usize {
        self.disable();
        let throws = frenzy_plan(self.level, rng, tuning);
        let count = throws.len();

        self.frenzy.run(FrenzyAction::Center {
            x: center_x,
            duration: tuning.frenzy_center_duration,
        });
        self.frenzy.wait(tuning.frenzy_center_duration);
        for throw in throws {
            self.frenzy.run(FrenzyAction::Throw(throw));
            self.frenzy.wait(tuning.frenzy_throw_delay);
        }
        self.frenzy.wait(tuning.frenzy_throw_delay);
        self.frenzy.run(FrenzyAction::Enable);

        log::info!("Antagonist frenzy at level {}: {} coconuts", self.level, count);
        count
    }

    /// Advance the frenzy script; returns the coconuts due this tick
    pub fn advance_frenzy(&mut self, dt: f32) -> Vec<FrenzyThrow> {
        let mut due = Vec::new();
        for action in self.frenzy.advance(dt) {
            match action {
                FrenzyAction::Center { x, duration } => self.glide = Some(Glide::new(x, duration)),
                FrenzyAction::Throw(throw) => due.push(throw),
                FrenzyAction::Enable => {
                    self.enable();
                    log::debug!("Antagonist frenzy over");
                }
            }
        }
        due
    }

    /// Patrol (or follow a scripted glide) and refresh timers
    pub fn update(&mut self, now: f64, dt: f32, scene_width: f32, rng: &mut impl Rng, tuning: &Tuning) {
        if let AntagonistStatus::Throttled { until } = self.status {
            if now >= until {
                self.status = AntagonistStatus::Ready;
            }
        }
        if self.enrage_timer > 0.0 {
            self.enrage_timer = (self.enrage_timer - dt).max(0.0);
        }

        if let Some(glide) = self.glide.as_mut() {
            self.pos.x = glide.step(self.pos.x, dt);
            if glide.is_finished() {
                self.glide = None;
            }
            return;
        }
        if self.is_disabled() {
            return;
        }

        let min_x = tuning.patrol_margin.min(scene_width / 2.0);
        let max_x = (scene_width - tuning.patrol_margin).max(min_x);

        if rng.random_bool((tuning.patrol_turn_rate * dt).clamp(0.0, 1.0) as f64) {
            self.heading = -self.heading;
        }
        self.pos.x += self.heading * tuning.patrol_speed_for_level(self.level) * dt;
        if self.pos.x <= min_x {
            self.pos.x = min_x;
            self.heading = 1.0;
        } else if self.pos.x >= max_x {
            self.pos.x = max_x;
            self.heading = -1.0;
        }
    }
}
