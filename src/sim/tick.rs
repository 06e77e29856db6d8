//! Fixed timestep simulation tick
//!
//! Per tick, in order: antagonist patrol and frenzy script, regular throw
//! decision, catcher movement, then physics. Contacts reported by the physics
//! step are resolved at the end of the tick, so their score, life and
//! antagonist effects are what the next tick's throw decision sees.

use glam::Vec2;
use rand::Rng;

use super::antagonist::LevelChange;
use super::catcher::{PointerEvent, Reaction};
use super::collision::{Body, Collision, CollisionPair, classify};
use super::event::{GameEvent, SceneKind, Transition};
use super::physics;
use super::state::{GamePhase, GameState, SceneCue};
use super::throwable::{EntityId, Throwable, ThrowableKind};
use super::world::Decoration;
use crate::audio::SoundEffect;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer events since the previous tick, in arrival order
    pub pointer: Vec<PointerEvent>,
    /// Idle/demo mode - AI steers the catcher
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::Over {
        return;
    }

    state.time_ticks += 1;
    state.time += dt as f64;
    let now = state.time;

    for cue in state.cues.advance(dt) {
        match cue {
            SceneCue::PresentGameOver => present_game_over(state),
        }
    }
    if state.phase == GamePhase::Over {
        return;
    }

    for event in &input.pointer {
        state.pointer.apply(*event);
    }
    if input.idle_mode {
        autopilot(state);
    }

    // Antagonist patrol and any scripted frenzy
    state
        .antagonist
        .update(now, dt, state.arena.width, &mut state.rng, &state.tuning);
    for throw in state.antagonist.advance_frenzy(dt) {
        spawn_throwable(state, ThrowableKind::Coconut, throw.impulse_x);
    }

    // Regular throw
    if let Some(kind) = state.antagonist.try_throw(now, &mut state.rng, &state.tuning) {
        let jitter = state.tuning.throw_jitter.max(0);
        let impulse_x = state.rng.random_range(-jitter..=jitter) as f32;
        spawn_throwable(state, kind, impulse_x);
    }

    // Catcher follows the pointer while it is held down
    if let Some(target) = state.pointer.target() {
        state.catcher.move_toward(target, dt, state.tuning.catcher_speed);
    }
    state.catcher.update(dt);

    let contacts = physics::step(&mut state.world, &state.catcher, &state.arena, dt);
    for contact in contacts {
        handle_contact(state, contact.a, contact.b);
    }

    state.world.age_decorations(dt);
}

/// Resolve one contact reported by the physics side (body order irrelevant)
///
/// Unexpected pairs are logged and ignored. Contacts whose throwable already
/// left the world (caught or landed earlier this step) are dropped.
pub fn handle_contact(state: &mut GameState, a: Body, b: Body) {
    if state.phase == GamePhase::Over {
        return;
    }

    let pair = CollisionPair::canonical(a, b);
    if !state.world.is_live(&pair.low) || !state.world.is_live(&pair.high) {
        log::trace!(
            "Stale contact {:?}/{:?} dropped",
            pair.low.category,
            pair.high.category
        );
        return;
    }

    match classify(&pair) {
        Ok(collision) => apply_collision(state, collision),
        Err(err) => log::warn!("Ignoring contact: {}", err),
    }
}

fn apply_collision(state: &mut GameState, collision: Collision) {
    let points = state.tuning.points;

    match collision {
        Collision::BananaCaught { banana, pos } => {
            remove_throwable(state, banana);
            show(state, Decoration::floating_score(points.banana_caught, pos));
            react(state, Reaction::Happy);
            state.events.push(GameEvent::PlaySound(SoundEffect::BananaCatch));
            add_points(state, points.banana_caught);
            escalate(state);
        }
        Collision::BananaLanded { banana, pos } => {
            show(
                state,
                Decoration::floating_score(points.banana_missed, pos + Vec2::new(0.0, 8.0)),
            );
            react(state, Reaction::Sad);
            remove_throwable(state, banana);
            let mark = state.arena.ground_mark(pos.x);
            show(state, Decoration::splat_banana(mark));
            state.events.push(GameEvent::PlaySound(SoundEffect::BananaSplat));
            add_points(state, points.banana_missed);
            lose_life(state);
        }
        Collision::CoconutCaught { coconut, pos } => {
            remove_throwable(state, coconut);
            show(state, Decoration::floating_score(points.coconut_caught, pos));
            react(state, Reaction::Hurt);
            state.events.push(GameEvent::PlaySound(SoundEffect::CoconutHit));
            add_points(state, points.coconut_caught);
            lose_life(state);
        }
        Collision::CoconutLanded { coconut, pos } => {
            remove_throwable(state, coconut);
            let mark = state.arena.ground_mark(pos.x);
            show(state, Decoration::broken_coconut(mark));
            state.events.push(GameEvent::PlaySound(SoundEffect::CoconutCrack));
        }
    }
}

fn spawn_throwable(state: &mut GameState, kind: ThrowableKind, impulse_x: f32) -> EntityId {
    let force_y = kind.vertical_throw_force(&mut state.rng);
    let mut item = Throwable::new(kind).at(state.antagonist.pos);
    item.apply_impulse(Vec2::new(impulse_x, force_y), state.tuning.impulse_scale);
    let pos = item.pos;
    let id = state.world.insert(item);
    state.events.push(GameEvent::ThrowableSpawned { id, kind, pos });
    state.events.push(GameEvent::PlaySound(SoundEffect::Throw));
    state.events.push(GameEvent::AntagonistBounced);
    id
}

fn remove_throwable(state: &mut GameState, id: EntityId) {
    if state.world.remove(id).is_some() {
        state.events.push(GameEvent::ThrowableRemoved { id });
    }
}

fn show(state: &mut GameState, decoration: Decoration) {
    state.world.add_decoration(decoration.clone());
    state.events.push(GameEvent::Decoration(decoration));
}

fn react(state: &mut GameState, reaction: Reaction) {
    state.catcher.react(reaction, state.tuning.reaction_duration);
    state.events.push(GameEvent::CatcherReacted(reaction));
}

fn add_points(state: &mut GameState, delta: i64) {
    let score = state.scoreboard.apply_delta(delta);
    state.events.push(GameEvent::ScoreChanged { score, delta });
}

/// Banana caught: enrage, and on a new level throw a tantrum and a frenzy
fn escalate(state: &mut GameState) {
    let change = state.antagonist.record_banana_catch(&state.tuning);
    state.events.push(GameEvent::AntagonistEnraged);

    if let LevelChange::Raised { to, .. } = change {
        if state.phase != GamePhase::Playing {
            return;
        }
        log::info!("Antagonist reached level {}", to);
        state.events.push(GameEvent::AntagonistTantrum { level: to });
        state.events.push(GameEvent::PlaySound(SoundEffect::Tantrum));
        let center = state.arena.center_x();
        state
            .antagonist
            .begin_frenzy(center, &mut state.rng, &state.tuning);
    }
}

fn lose_life(state: &mut GameState) {
    let before = state.scoreboard.lives();
    let remaining = state.scoreboard.decrement_life();
    if remaining < before {
        state.events.push(GameEvent::LifeLost { remaining });
    }
    if state.scoreboard.is_depleted() {
        trigger_game_over(state);
    }
}

/// First depletion only; later ones in the same tick (or after) are ignored
fn trigger_game_over(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    log::info!(
        "Game over at {:.1}s with score {}",
        state.time,
        state.scoreboard.score()
    );
    state.phase = GamePhase::Ending;
    state.antagonist.disable();
    state.pointer.apply(PointerEvent::PressEnd);
    let label_pos = Vec2::new(state.arena.center_x(), state.arena.height / 2.0);
    show(state, Decoration::game_over_label(label_pos));
    state.events.push(GameEvent::GameOverTriggered);
    state.events.push(GameEvent::PlaySound(SoundEffect::GameOver));
    state.cues.wait(state.tuning.game_over_delay);
    state.cues.run(SceneCue::PresentGameOver);
}

fn present_game_over(state: &mut GameState) {
    state.phase = GamePhase::Over;
    state.cues.cancel();
    state.events.push(GameEvent::PresentScene {
        scene: SceneKind::GameOver,
        transition: Transition::FlipVertical {
            duration: state.tuning.transition_duration,
        },
    });
}

/// Demo AI: chase the lowest banana, sidestep coconuts about to land on us
fn autopilot(state: &mut GameState) {
    let catcher = &state.catcher;
    let reach = catcher.half_size.x;

    let threat = state
        .world
        .throwables()
        .iter()
        .filter(|t| t.kind == ThrowableKind::Coconut && t.vel.y < 0.0)
        .filter(|t| t.pos.y < catcher.pos.y + 160.0)
        .filter(|t| (t.pos.x - catcher.pos.x).abs() < reach + t.radius() + 12.0)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target = if let Some(coconut) = threat {
        let away = if coconut.pos.x >= catcher.pos.x { -1.0 } else { 1.0 };
        let dodge = catcher.pos.x + away * (reach * 3.0);
        if dodge < catcher.min_x || dodge > catcher.max_x {
            catcher.pos.x - away * (reach * 3.0)
        } else {
            dodge
        }
    } else if let Some(banana) = state
        .world
        .throwables()
        .iter()
        .filter(|t| t.kind == ThrowableKind::Banana)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        banana.pos.x
    } else {
        state.antagonist.pos.x
    };

    state.pointer.apply(PointerEvent::PressBegin { x: target });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::collision::Category;
    use crate::sim::world::DecorationKind;
    use crate::tuning::Tuning;

    /// State with a passive antagonist so only hand-placed objects fall
    fn quiet_state(tuning: Tuning) -> GameState {
        let mut state = GameState::with_tuning(42, tuning);
        state.antagonist.disable();
        state.drain_events();
        state
    }

    fn run_until_empty(state: &mut GameState, max_ticks: usize) {
        let input = TickInput::default();
        for _ in 0..max_ticks {
            if state.world.throwables().is_empty() {
                return;
            }
            tick(state, &input, SIM_DT);
        }
        panic!("objects still falling after {} ticks", max_ticks);
    }

    fn catch_banana(state: &mut GameState) {
        let pos = state.catcher.pos;
        let id = state.world.insert(Throwable::banana().at(pos));
        let catcher = state.catcher.body();
        handle_contact(state, Body::entity(Category::Banana, id, pos), catcher);
    }

    fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_banana_falls_onto_catcher() {
        let tuning = Tuning {
            ground_height: 0.0,
            ..Tuning::default()
        };
        let mut state = quiet_state(tuning);
        state.catcher.pos = Vec2::ZERO;
        state
            .world
            .insert(Throwable::banana().at(Vec2::new(0.0, 150.0)));

        run_until_empty(&mut state, 600);

        assert_eq!(state.score(), state.tuning.points.banana_caught);
        assert_eq!(state.lives(), state.tuning.starting_lives);
        assert_eq!(state.catcher.reaction(), Reaction::Happy);
        assert_eq!(
            state
                .world
                .count_decorations(|k| *k == DecorationKind::SplatBanana),
            0
        );
    }

    #[test]
    fn test_banana_falls_onto_ground() {
        let mut state = quiet_state(Tuning::default());
        state
            .world
            .insert(Throwable::banana().at(Vec2::new(20.0, 200.0)));

        run_until_empty(&mut state, 600);

        assert_eq!(state.score(), state.tuning.points.banana_missed);
        assert_eq!(state.lives(), state.tuning.starting_lives - 1);
        let splats: Vec<_> = state
            .world
            .decorations()
            .iter()
            .filter(|d| d.kind == DecorationKind::SplatBanana)
            .collect();
        assert_eq!(splats.len(), 1);
        assert_eq!(splats[0].pos.y, state.arena.ground_y + 5.0);
        assert_eq!(state.catcher.reaction(), Reaction::Sad);
    }

    #[test]
    fn test_coconut_catch_scores_and_hurts() {
        let mut state = quiet_state(Tuning::default());
        let pos = state.catcher.pos;
        let id = state.world.insert(Throwable::coconut().at(pos));
        let catcher = state.catcher.body();
        handle_contact(&mut state, catcher, Body::entity(Category::Coconut, id, pos));
        assert_eq!(state.score(), state.tuning.points.coconut_caught);
        assert_eq!(state.lives(), state.tuning.starting_lives - 1);
        assert_eq!(state.catcher.reaction(), Reaction::Hurt);
        assert!(!state.world.is_attached(id));
    }

    #[test]
    fn test_coconut_on_ground_has_no_score_effect() {
        let mut state = quiet_state(Tuning::default());
        state
            .world
            .insert(Throwable::coconut().at(Vec2::new(300.0, 120.0)));
        run_until_empty(&mut state, 600);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), state.tuning.starting_lives);
        assert_eq!(
            state
                .world
                .count_decorations(|k| *k == DecorationKind::BrokenCoconut),
            1
        );
    }

    #[test]
    fn test_stale_contact_not_double_counted() {
        let mut state = quiet_state(Tuning::default());
        let pos = state.catcher.pos;
        let id = state.world.insert(Throwable::banana().at(pos));
        let banana = Body::entity(Category::Banana, id, pos);

        let catcher = state.catcher.body();
        let ground = state.arena.ground_body(pos.x);
        handle_contact(&mut state, banana, catcher);
        handle_contact(&mut state, catcher, banana);
        handle_contact(&mut state, banana, ground);

        assert_eq!(state.score(), state.tuning.points.banana_caught);
        assert_eq!(state.lives(), state.tuning.starting_lives);
        assert_eq!(state.antagonist.bananas_caught(), 1);
        let events = state.drain_events();
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::ThrowableRemoved { .. })),
            1
        );
    }

    #[test]
    fn test_unexpected_contact_ignored() {
        let mut state = quiet_state(Tuning::default());
        let catcher = state.catcher.body();
        let ground = state.arena.ground_body(0.0);
        handle_contact(&mut state, ground, catcher);
        handle_contact(&mut state, Body::fixture(Category::Edge, Vec2::ZERO), catcher);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), state.tuning.starting_lives);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_last_life_ends_game_once() {
        let tuning = Tuning {
            starting_lives: 1,
            ..Tuning::default()
        };
        let mut state = quiet_state(tuning);
        let y = state.arena.ground_y + 20.0;
        state.world.insert(Throwable::banana().at(Vec2::new(20.0, y)));
        state.world.insert(Throwable::banana().at(Vec2::new(300.0, y)));

        let mut events = Vec::new();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
        }

        assert_eq!(state.lives(), 0);
        assert!(state.is_over());
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::GameOverTriggered)),
            1
        );
        assert_eq!(
            count(&events, |e| matches!(
                e,
                GameEvent::PresentScene {
                    scene: SceneKind::GameOver,
                    ..
                }
            )),
            1
        );
        assert_eq!(count(&events, |e| matches!(e, GameEvent::LifeLost { .. })), 1);
    }

    #[test]
    fn test_game_over_waits_for_delay() {
        let tuning = Tuning {
            starting_lives: 1,
            ..Tuning::default()
        };
        let mut state = quiet_state(tuning);
        let pos = state.catcher.pos;
        let id = state.world.insert(Throwable::coconut().at(pos));
        let catcher = state.catcher.body();
        handle_contact(&mut state, Body::entity(Category::Coconut, id, pos), catcher);
        assert_eq!(state.phase, GamePhase::Ending);

        // 0.3 s at 60 Hz
        for _ in 0..17 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Ending);
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_milestone_catch_starts_frenzy() {
        let mut state = GameState::new(7);
        for _ in 0..4 {
            catch_banana(&mut state);
        }
        assert!(!state.antagonist.frenzy_in_progress());
        catch_banana(&mut state);

        assert_eq!(state.antagonist.level(), 1);
        assert!(state.antagonist.frenzy_in_progress());
        assert!(state.antagonist.is_disabled());
        let events = state.drain_events();
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::AntagonistTantrum { level: 1 })),
            1
        );
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::AntagonistEnraged)),
            5
        );

        // Frenzy throws its coconuts, then hands control back
        let mut coconuts = 0;
        let mut ticks = 0;
        loop {
            tick(&mut state, &TickInput::default(), SIM_DT);
            let events = state.drain_events();
            if !state.antagonist.frenzy_in_progress() {
                break;
            }
            assert!(!state.antagonist.is_able_to_throw(state.time));
            coconuts += count(&events, |e| {
                matches!(
                    e,
                    GameEvent::ThrowableSpawned {
                        kind: ThrowableKind::Coconut,
                        ..
                    }
                )
            });
            ticks += 1;
            assert!(ticks < 600);
        }
        assert_eq!(coconuts, 2);
        assert!(!state.antagonist.is_disabled());
    }

    #[test]
    fn test_game_over_cancels_frenzy() {
        let tuning = Tuning {
            starting_lives: 1,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(9, tuning);
        for _ in 0..5 {
            catch_banana(&mut state);
        }
        assert!(state.antagonist.frenzy_in_progress());

        let pos = state.catcher.pos;
        let id = state.world.insert(Throwable::coconut().at(pos));
        let catcher = state.catcher.body();
        handle_contact(&mut state, Body::entity(Category::Coconut, id, pos), catcher);
        assert!(!state.antagonist.frenzy_in_progress());
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.antagonist.is_disabled());
        assert!(state.is_over());
    }

    #[test]
    fn test_first_tick_throws_then_cools_down() {
        let mut state = GameState::new(11);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.world.throwables().len(), 1);
        assert!(state.antagonist.is_throttled());
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.world.throwables().len(), 1);
    }

    #[test]
    fn test_pointer_drives_catcher() {
        let mut state = quiet_state(Tuning::default());
        let start = state.catcher.pos.x;
        let press = TickInput {
            pointer: vec![PointerEvent::PressBegin { x: 300.0 }],
            ..Default::default()
        };
        tick(&mut state, &press, SIM_DT);
        let moved = state.catcher.pos.x;
        assert!(moved > start);

        let release = TickInput {
            pointer: vec![PointerEvent::PressEnd],
            ..Default::default()
        };
        tick(&mut state, &release, SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.catcher.pos.x, moved);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..1200 {
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.lives(), state2.lives());
        assert_eq!(state1.world.throwables().len(), state2.world.throwables().len());
        assert_eq!(state1.antagonist.pos, state2.antagonist.pos);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
