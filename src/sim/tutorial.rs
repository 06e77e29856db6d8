//! Tutorial scene
//!
//! Two scripted stages (catch the bananas, avoid the coconuts), each ending
//! with the continue gate opening. The world is closed and fully scripted, so
//! an unrecognised contact here is a programming error and halts.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::antagonist::Antagonist;
use super::catcher::{Catcher, Reaction};
use super::collision::{Body, Collision, CollisionPair, classify};
use super::event::{ButtonFace, GameEvent, SceneKind, Transition};
use super::motion::Glide;
use super::physics::{self, Arena};
use super::throwable::{EntityId, Throwable, ThrowableKind};
use super::timeline::Timeline;
use super::world::{Decoration, World};
use crate::audio::{MusicTrack, SoundEffect};
use crate::tuning::Tuning;

/// Antagonist sits lower than in the main scene
const ANTAGONIST_TOP_OFFSET: f32 = 180.0;
const DIMMED_ALPHA: f32 = 0.2;
const GLIDE_DELAY: f32 = 0.2;
const GLIDE_DURATION: f32 = 0.75;

pub const BANANA_TEXT: &str = "Catch all the bananas!";
pub const COCONUT_TEXT: &str = "Avoid the coconuts!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialStage {
    BananaCatch,
    CoconutDodge,
    Finished,
}

impl TutorialStage {
    pub fn ordinal(&self) -> u32 {
        match self {
            TutorialStage::BananaCatch => 1,
            TutorialStage::CoconutDodge => 2,
            TutorialStage::Finished => 3,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TutorialStage::BananaCatch => TutorialStage::CoconutDodge,
            TutorialStage::CoconutDodge | TutorialStage::Finished => TutorialStage::Finished,
        }
    }
}

/// One scripted step of a stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TutorialCue {
    InfoText(&'static str),
    /// Throw with a fixed horizontal force; the catcher glides to
    /// `catcher_offset` from the scene centre
    Throw {
        kind: ThrowableKind,
        force_x: f32,
        catcher_offset: f32,
    },
    OpenGate,
}

#[derive(Debug, Clone)]
pub struct TutorialState {
    pub tuning: Tuning,
    pub arena: Arena,
    pub time: f64,
    pub world: World,
    pub catcher: Catcher,
    pub antagonist: Antagonist,
    stage: TutorialStage,
    gate_open: bool,
    face: ButtonFace,
    script: Timeline<TutorialCue>,
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl TutorialState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let arena = Arena::from_tuning(&tuning);
        let mut antagonist = Antagonist::new(Vec2::new(
            arena.center_x(),
            arena.height - ANTAGONIST_TOP_OFFSET,
        ));
        antagonist.disable();

        let mut state = Self {
            arena,
            time: 0.0,
            world: World::new(),
            catcher: Catcher::new(&tuning),
            antagonist,
            stage: TutorialStage::BananaCatch,
            gate_open: false,
            face: ButtonFace::Next,
            script: Timeline::new(),
            events: vec![GameEvent::ChangeMusic(MusicTrack::Tutorial)],
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        log::info!("Tutorial started");
        state.play_stage();
        state
    }

    pub fn stage(&self) -> TutorialStage {
        self.stage
    }

    pub fn is_gate_open(&self) -> bool {
        self.gate_open
    }

    pub fn is_finished(&self) -> bool {
        self.stage == TutorialStage::Finished
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Continue button tapped. Returns whether the tutorial advanced.
    pub fn continue_pressed(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        if !self.gate_open {
            log::debug!(
                "Continue ignored, stage {} still running",
                self.stage.ordinal()
            );
            return false;
        }

        self.events.push(GameEvent::PlaySound(SoundEffect::OptionSelect));
        self.stage = self.stage.next();
        if self.is_finished() {
            self.leave();
        } else {
            self.play_stage();
        }
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if self.is_finished() {
            return;
        }
        self.time += dt as f64;

        for cue in self.script.advance(dt) {
            self.apply_cue(cue);
        }

        self.catcher.update(dt);
        let contacts = physics::step(&mut self.world, &self.catcher, &self.arena, dt);
        for contact in contacts {
            self.handle_contact(contact.a, contact.b);
        }
        self.world.age_decorations(dt);
    }

    /// Same dispatch as the main scene, but any anomaly is fatal
    pub fn handle_contact(&mut self, a: Body, b: Body) {
        let pair = CollisionPair::canonical(a, b);
        if !self.world.is_live(&pair.low) || !self.world.is_live(&pair.high) {
            return;
        }

        let collision = match classify(&pair) {
            Ok(collision) => collision,
            Err(err) => panic!("Unexpected contact in tutorial: {}", err),
        };

        match collision {
            Collision::BananaCaught { banana, pos } => {
                self.remove(banana);
                self.show(Decoration::floating_score(
                    self.tuning.points.banana_caught,
                    pos,
                ));
                self.react(Reaction::Happy);
                self.events.push(GameEvent::PlaySound(SoundEffect::BananaCatch));
            }
            Collision::BananaLanded { banana, .. } => {
                self.remove(banana);
                self.react(Reaction::Sad);
                self.events.push(GameEvent::PlaySound(SoundEffect::BananaSplat));
            }
            Collision::CoconutCaught { coconut, .. } => {
                self.remove(coconut);
                self.react(Reaction::Hurt);
                self.events.push(GameEvent::PlaySound(SoundEffect::CoconutHit));
            }
            Collision::CoconutLanded { coconut, pos } => {
                self.remove(coconut);
                self.show(Decoration::broken_coconut(self.arena.ground_mark(pos.x)));
                self.events.push(GameEvent::PlaySound(SoundEffect::CoconutCrack));
            }
        }
    }

    fn play_stage(&mut self) {
        self.script.cancel();
        self.gate_open = false;
        self.events.push(GameEvent::InfoText(String::new()));
        if self.stage == TutorialStage::CoconutDodge {
            self.face = ButtonFace::Ok;
        }
        self.events.push(GameEvent::ContinueButton {
            alpha: DIMMED_ALPHA,
            face: self.face,
        });

        match self.stage {
            TutorialStage::BananaCatch => {
                self.script
                    .run(TutorialCue::InfoText(BANANA_TEXT))
                    .wait(0.65)
                    .run(TutorialCue::Throw {
                        kind: ThrowableKind::Banana,
                        force_x: -2.0,
                        catcher_offset: -100.0,
                    })
                    .wait(1.75)
                    .run(TutorialCue::Throw {
                        kind: ThrowableKind::Banana,
                        force_x: 2.0,
                        catcher_offset: 100.0,
                    })
                    .wait(0.65)
                    .run(TutorialCue::OpenGate);
            }
            TutorialStage::CoconutDodge => {
                self.script
                    .run(TutorialCue::InfoText(COCONUT_TEXT))
                    .wait(0.5)
                    .run(TutorialCue::Throw {
                        kind: ThrowableKind::Coconut,
                        force_x: 4.0,
                        catcher_offset: -100.0,
                    })
                    .wait(1.5)
                    .run(TutorialCue::Throw {
                        kind: ThrowableKind::Coconut,
                        force_x: -4.0,
                        catcher_offset: 100.0,
                    })
                    .wait(0.5)
                    .run(TutorialCue::OpenGate);
            }
            TutorialStage::Finished => {}
        }
        log::debug!("Tutorial stage {} playing", self.stage.ordinal());
    }

    fn apply_cue(&mut self, cue: TutorialCue) {
        match cue {
            TutorialCue::InfoText(text) => self.events.push(GameEvent::InfoText(text.to_string())),
            TutorialCue::Throw {
                kind,
                force_x,
                catcher_offset,
            } => {
                self.throw(kind, force_x);
                let target_x = self.arena.center_x() + catcher_offset;
                self.catcher
                    .glide_to(Glide::after(GLIDE_DELAY, target_x, GLIDE_DURATION));
                self.events.push(GameEvent::AssistHint { target_x });
            }
            TutorialCue::OpenGate => {
                self.gate_open = true;
                self.events.push(GameEvent::ContinueButton {
                    alpha: 1.0,
                    face: self.face,
                });
            }
        }
    }

    fn throw(&mut self, kind: ThrowableKind, force_x: f32) -> EntityId {
        let force_y = kind.vertical_throw_force(&mut self.rng);
        let mut item = Throwable::new(kind).at(self.antagonist.pos);
        item.apply_impulse(Vec2::new(force_x, force_y), self.tuning.impulse_scale);
        let pos = item.pos;
        let id = self.world.insert(item);
        self.events.push(GameEvent::ThrowableSpawned { id, kind, pos });
        self.events.push(GameEvent::PlaySound(SoundEffect::Throw));
        self.events.push(GameEvent::AntagonistBounced);
        id
    }

    fn leave(&mut self) {
        let dropped = self.script.cancel();
        self.world.clear();
        log::info!("Tutorial finished ({} queued steps dropped)", dropped);
        self.events.push(GameEvent::PresentScene {
            scene: SceneKind::Menu,
            transition: Transition::FlipVertical {
                duration: self.tuning.transition_duration,
            },
        });
    }

    fn remove(&mut self, id: EntityId) {
        if self.world.remove(id).is_some() {
            self.events.push(GameEvent::ThrowableRemoved { id });
        }
    }

    fn show(&mut self, decoration: Decoration) {
        self.world.add_decoration(decoration.clone());
        self.events.push(GameEvent::Decoration(decoration));
    }

    fn react(&mut self, reaction: Reaction) {
        self.catcher.react(reaction, self.tuning.reaction_duration);
        self.events.push(GameEvent::CatcherReacted(reaction));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::collision::Category;
    use crate::sim::world::DecorationKind;

    fn run(state: &mut TutorialState, ticks: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            state.tick(SIM_DT);
            events.extend(state.drain_events());
        }
        events
    }

    fn spawned(events: &[GameEvent], wanted: ThrowableKind) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::ThrowableSpawned { kind, .. } if *kind == wanted))
            .count()
    }

    #[test]
    fn test_starts_on_first_stage() {
        let mut state = TutorialState::new(1, Tuning::default());
        assert_eq!(state.stage(), TutorialStage::BananaCatch);
        assert!(!state.is_gate_open());
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::ChangeMusic(MusicTrack::Tutorial));
        assert!(events.contains(&GameEvent::ContinueButton {
            alpha: DIMMED_ALPHA,
            face: ButtonFace::Next,
        }));
    }

    #[test]
    fn test_continue_ignored_while_gate_closed() {
        let mut state = TutorialState::new(1, Tuning::default());
        run(&mut state, 60);
        assert!(!state.continue_pressed());
        assert_eq!(state.stage(), TutorialStage::BananaCatch);
    }

    #[test]
    fn test_gate_opens_after_script() {
        let mut state = TutorialState::new(1, Tuning::default());
        let events = run(&mut state, 180);
        assert!(!state.is_gate_open());
        assert_eq!(spawned(&events, ThrowableKind::Banana), 2);
        assert!(events.contains(&GameEvent::InfoText(BANANA_TEXT.to_string())));

        run(&mut state, 6);
        assert!(state.is_gate_open());
    }

    #[test]
    fn test_full_walkthrough() {
        let mut state = TutorialState::new(3, Tuning::default());
        run(&mut state, 240);
        assert!(state.continue_pressed());
        assert_eq!(state.stage(), TutorialStage::CoconutDodge);
        assert!(!state.is_gate_open());
        let switched = state.drain_events();
        assert!(switched.contains(&GameEvent::PlaySound(SoundEffect::OptionSelect)));
        assert!(switched.contains(&GameEvent::ContinueButton {
            alpha: DIMMED_ALPHA,
            face: ButtonFace::Ok,
        }));

        let events = run(&mut state, 180);
        assert_eq!(spawned(&events, ThrowableKind::Coconut), 2);
        assert!(state.is_gate_open());

        assert!(state.continue_pressed());
        assert!(state.is_finished());
        assert!(state.world.throwables().is_empty());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PresentScene {
            scene: SceneKind::Menu,
            transition: Transition::FlipVertical { duration: 0.5 },
        }));

        assert!(!state.continue_pressed());
        state.tick(SIM_DT);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_throw_glides_catcher() {
        let mut state = TutorialState::new(5, Tuning::default());
        let events = run(&mut state, 45);
        let center = state.arena.center_x();
        assert!(events.contains(&GameEvent::AssistHint {
            target_x: center - 100.0
        }));
        assert!(state.catcher.is_gliding() || state.catcher.pos.x < center);
        run(&mut state, 60);
        assert!((state.catcher.pos.x - (center - 100.0)).abs() < 1.0);
    }

    #[test]
    fn test_contacts_have_no_score() {
        let mut state = TutorialState::new(1, Tuning::default());
        state.drain_events();

        let pos = state.catcher.pos;
        let id = state.world.insert(Throwable::banana().at(pos));
        let catcher = state.catcher.body();
        state.handle_contact(Body::entity(Category::Banana, id, pos), catcher);
        assert_eq!(state.catcher.reaction(), Reaction::Happy);

        let missed = Vec2::new(20.0, state.arena.ground_y);
        let id = state.world.insert(Throwable::banana().at(missed));
        let ground = state.arena.ground_body(missed.x);
        state.handle_contact(ground, Body::entity(Category::Banana, id, missed));
        assert_eq!(state.catcher.reaction(), Reaction::Sad);
        assert_eq!(
            state
                .world
                .count_decorations(|k| *k == DecorationKind::SplatBanana),
            0
        );

        let events = state.drain_events();
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::ScoreChanged { .. } | GameEvent::LifeLost { .. }))
        );
    }

    #[test]
    #[should_panic(expected = "Unexpected contact in tutorial")]
    fn test_unexpected_contact_is_fatal() {
        let mut state = TutorialState::new(1, Tuning::default());
        let ground = state.arena.ground_body(0.0);
        let catcher = state.catcher.body();
        state.handle_contact(catcher, ground);
    }
}
