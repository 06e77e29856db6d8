//! The player's catcher and pointer input

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Category};
use super::motion::Glide;
use crate::approach;
use crate::tuning::Tuning;

/// Facial reaction shown by the catcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Reaction {
    #[default]
    Neutral,
    /// Caught a banana
    Happy,
    /// Let a banana drop
    Sad,
    /// Got hit by a coconut
    Hurt,
}

/// Raw pointer events from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    PressBegin { x: f32 },
    Move { x: f32 },
    PressEnd,
}

/// "Pointer down" latch plus last known position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerLatch {
    down: bool,
    x: f32,
}

impl PointerLatch {
    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::PressBegin { x } => {
                self.down = true;
                self.x = x;
            }
            PointerEvent::Move { x } => self.x = x,
            PointerEvent::PressEnd => self.down = false,
        }
    }

    /// Follow target while pressed
    pub fn target(&self) -> Option<f32> {
        self.down.then_some(self.x)
    }
}

/// The player-controlled catcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catcher {
    pub pos: Vec2,
    pub half_size: Vec2,
    /// Horizontal travel limits for the centre
    pub min_x: f32,
    pub max_x: f32,
    reaction: Reaction,
    reaction_timer: f32,
    /// Scripted move (tutorial)
    glide: Option<Glide>,
}

impl Catcher {
    /// Catcher resting on the ground at the scene centre
    pub fn new(tuning: &Tuning) -> Self {
        let half_size = Vec2::new(tuning.catcher_width, tuning.catcher_height) / 2.0;
        Self {
            pos: Vec2::new(tuning.scene_width / 2.0, tuning.catcher_y()),
            half_size,
            min_x: half_size.x,
            max_x: (tuning.scene_width - half_size.x).max(half_size.x),
            reaction: Reaction::Neutral,
            reaction_timer: 0.0,
            glide: None,
        }
    }

    /// Step toward `target_x`, capped at `max_speed`
    pub fn move_toward(&mut self, target_x: f32, dt: f32, max_speed: f32) {
        let target = target_x.clamp(self.min_x, self.max_x);
        self.pos.x = approach(self.pos.x, target, max_speed * dt);
    }

    /// Queue a scripted glide
    pub fn glide_to(&mut self, glide: Glide) {
        self.glide = Some(glide);
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    pub fn reaction(&self) -> Reaction {
        self.reaction
    }

    pub fn react(&mut self, reaction: Reaction, duration: f32) {
        self.reaction = reaction;
        self.reaction_timer = duration;
    }

    /// Advance scripted motion and let reactions fade back to neutral
    pub fn update(&mut self, dt: f32) {
        if let Some(glide) = self.glide.as_mut() {
            self.pos.x = glide.step(self.pos.x, dt).clamp(self.min_x, self.max_x);
            if glide.is_finished() {
                self.glide = None;
            }
        }
        if self.reaction_timer > 0.0 {
            self.reaction_timer -= dt;
            if self.reaction_timer <= 0.0 {
                self.reaction_timer = 0.0;
                self.reaction = Reaction::Neutral;
            }
        }
    }

    /// Does a circle overlap the catcher box?
    pub fn overlaps(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.pos - self.half_size, self.pos + self.half_size);
        closest.distance_squared(center) <= radius * radius
    }

    pub fn body(&self) -> Body {
        Body::fixture(Category::Catcher, self.pos)
    }
}
