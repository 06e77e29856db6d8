//! Host collaborators
//!
//! The simulation never renders, plays audio or switches scenes itself. It
//! queues [`GameEvent`]s; the host drains them once per frame and hands them to
//! [`dispatch`], which routes each one to a [`SceneHost`] method.

use glam::Vec2;

use crate::audio::{MusicTrack, SoundEffect};
use crate::sim::event::{GameEvent, SceneKind, Transition};
use crate::sim::throwable::{EntityId, ThrowableKind};
use crate::sim::world::{Decoration, DecorationKind};

/// Rendering, audio and scene management as seen from the simulation
///
/// Every method defaults to a no-op so hosts only implement what they present.
pub trait SceneHost {
    /// Add a sprite for a newly thrown object
    fn insert(&mut self, _id: EntityId, _kind: ThrowableKind, _pos: Vec2) {}

    /// Drop the sprite of a caught or landed object
    fn remove(&mut self, _id: EntityId) {}

    fn play(&mut self, _effect: SoundEffect) {}

    fn change_music(&mut self, _track: MusicTrack) {}

    fn show_floating_score(&mut self, _points: i64, _pos: Vec2) {}

    /// Splats, broken coconuts and the game over label
    fn show_decoration(&mut self, _decoration: &Decoration) {}

    fn present_scene(&mut self, _scene: SceneKind, _transition: Transition) {}

    /// Everything else: reactions, antagonist animations, HUD and tutorial UI
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Route drained events to the host, in order
pub fn dispatch(host: &mut impl SceneHost, events: impl IntoIterator<Item = GameEvent>) {
    for event in events {
        match event {
            GameEvent::ThrowableSpawned { id, kind, pos } => host.insert(id, kind, pos),
            GameEvent::ThrowableRemoved { id } => host.remove(id),
            GameEvent::PlaySound(effect) => host.play(effect),
            GameEvent::ChangeMusic(track) => host.change_music(track),
            GameEvent::Decoration(decoration) => match decoration.kind {
                DecorationKind::FloatingScore { points } => {
                    host.show_floating_score(points, decoration.pos)
                }
                _ => host.show_decoration(&decoration),
            },
            GameEvent::PresentScene { scene, transition } => host.present_scene(scene, transition),
            other => host.notify(&other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        inserted: Vec<EntityId>,
        removed: Vec<EntityId>,
        sounds: Vec<SoundEffect>,
        scores: Vec<i64>,
        decorations: usize,
        scenes: Vec<SceneKind>,
        notified: usize,
    }

    impl SceneHost for Recorder {
        fn insert(&mut self, id: EntityId, _kind: ThrowableKind, _pos: Vec2) {
            self.inserted.push(id);
        }

        fn remove(&mut self, id: EntityId) {
            self.removed.push(id);
        }

        fn play(&mut self, effect: SoundEffect) {
            self.sounds.push(effect);
        }

        fn show_floating_score(&mut self, points: i64, _pos: Vec2) {
            self.scores.push(points);
        }

        fn show_decoration(&mut self, _decoration: &Decoration) {
            self.decorations += 1;
        }

        fn present_scene(&mut self, scene: SceneKind, _transition: Transition) {
            self.scenes.push(scene);
        }

        fn notify(&mut self, _event: &GameEvent) {
            self.notified += 1;
        }
    }

    #[test]
    fn test_routes_events() {
        let mut host = Recorder::default();
        dispatch(
            &mut host,
            vec![
                GameEvent::ThrowableSpawned {
                    id: 1,
                    kind: ThrowableKind::Banana,
                    pos: Vec2::ZERO,
                },
                GameEvent::Decoration(Decoration::floating_score(10, Vec2::ZERO)),
                GameEvent::Decoration(Decoration::splat_banana(Vec2::ZERO)),
                GameEvent::ThrowableRemoved { id: 1 },
                GameEvent::PlaySound(SoundEffect::BananaCatch),
                GameEvent::ScoreChanged {
                    score: 10,
                    delta: 10,
                },
                GameEvent::PresentScene {
                    scene: SceneKind::GameOver,
                    transition: Transition::FlipVertical { duration: 0.5 },
                },
            ],
        );

        assert_eq!(host.inserted, vec![1]);
        assert_eq!(host.removed, vec![1]);
        assert_eq!(host.sounds, vec![SoundEffect::BananaCatch]);
        assert_eq!(host.scores, vec![10]);
        assert_eq!(host.decorations, 1);
        assert_eq!(host.scenes, vec![SceneKind::GameOver]);
        assert_eq!(host.notified, 1);
    }

    #[test]
    fn test_default_host_ignores_everything() {
        struct Silent;
        impl SceneHost for Silent {}

        dispatch(
            &mut Silent,
            vec![
                GameEvent::GameOverTriggered,
                GameEvent::ChangeMusic(MusicTrack::Menu),
            ],
        );
    }
}
