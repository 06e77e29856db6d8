//! Events emitted by the simulation for the host to present

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catcher::Reaction;
use super::throwable::{EntityId, ThrowableKind};
use super::world::Decoration;
use crate::audio::{MusicTrack, SoundEffect};

/// Scenes the host can present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    Menu,
    Game,
    Tutorial,
    GameOver,
}

/// Scene transition style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    FlipVertical { duration: f32 },
}

/// Face of the tutorial continue button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonFace {
    Next,
    Ok,
}

/// Something the host should show, play or do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ThrowableSpawned {
        id: EntityId,
        kind: ThrowableKind,
        pos: Vec2,
    },
    ThrowableRemoved {
        id: EntityId,
    },
    Decoration(Decoration),
    CatcherReacted(Reaction),
    /// Little hop after every throw
    AntagonistBounced,
    /// Short angry shake after a catch
    AntagonistEnraged,
    /// Level-up tantrum preceding a frenzy
    AntagonistTantrum {
        level: u32,
    },
    ScoreChanged {
        score: i64,
        delta: i64,
    },
    LifeLost {
        remaining: u32,
    },
    GameOverTriggered,
    PlaySound(SoundEffect),
    ChangeMusic(MusicTrack),
    InfoText(String),
    ContinueButton {
        alpha: f32,
        face: ButtonFace,
    },
    /// Tutorial pointer hint sliding toward `target_x`
    AssistHint {
        target_x: f32,
    },
    PresentScene {
        scene: SceneKind,
        transition: Transition,
    },
}
