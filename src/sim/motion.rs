//! Scripted horizontal glides

use serde::{Deserialize, Serialize};

/// Linear move to `to` over `duration`, optionally after a delay
///
/// The start point is captured when the delay runs out, so a glide queued
/// while something else still moves the body starts from wherever it ends up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glide {
    from: Option<f32>,
    to: f32,
    duration: f32,
    delay: f32,
    elapsed: f32,
}

impl Glide {
    pub fn new(to: f32, duration: f32) -> Self {
        Self::after(0.0, to, duration)
    }

    pub fn after(delay: f32, to: f32, duration: f32) -> Self {
        Self {
            from: None,
            to,
            duration: duration.max(0.0),
            delay: delay.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.delay <= 0.0 && self.elapsed >= self.duration
    }

    /// Advance and return the new position of a body currently at `current`
    pub fn step(&mut self, current: f32, dt: f32) -> f32 {
        let mut dt = dt;
        if self.delay > 0.0 {
            let used = dt.min(self.delay);
            self.delay -= used;
            dt -= used;
            if self.delay > 0.0 {
                return current;
            }
        }
        let from = *self.from.get_or_insert(current);
        self.elapsed += dt;
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return self.to;
        }
        from + (self.to - from) * (self.elapsed / self.duration)
    }
}
