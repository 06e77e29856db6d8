//! Banana Catcher entry point
//!
//! Headless runner: plays a seeded session on autopilot, or walks through the
//! tutorial, and logs what a renderer would present.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;

use banana_catcher::audio::{AudioManager, LogBackend, MusicTrack, SoundEffect};
use banana_catcher::consts::{MAX_SUBSTEPS, SIM_DT};
use banana_catcher::services::{SceneHost, dispatch};
use banana_catcher::sim::{
    Decoration, EntityId, GameEvent, GameState, SceneKind, ThrowableKind, TickInput, Transition,
    TutorialState, tick,
};
use banana_catcher::{GameError, Settings, Tuning};

/// Display refresh the runner pretends to have
const FRAME_DT: f32 = 1.0 / 30.0;
/// Give up on a tutorial that never finishes
const TUTORIAL_TIMEOUT: f32 = 60.0;

#[derive(Parser, Debug)]
#[command(version, about = "Headless Banana Catcher session")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of play to simulate
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Game balance overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Player settings (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Run the tutorial instead of a game
    #[arg(long)]
    tutorial: bool,
}

/// Host that presents everything through the log
struct HeadlessHost {
    audio: AudioManager<LogBackend>,
    floating_scores: bool,
    sprites: usize,
    scene: Option<SceneKind>,
}

impl HeadlessHost {
    fn new(settings: &Settings) -> Self {
        Self {
            audio: AudioManager::with_settings(LogBackend, settings),
            floating_scores: settings.floating_scores,
            sprites: 0,
            scene: None,
        }
    }
}

impl SceneHost for HeadlessHost {
    fn insert(&mut self, id: EntityId, kind: ThrowableKind, pos: Vec2) {
        self.sprites += 1;
        log::trace!("+{:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    }

    fn remove(&mut self, id: EntityId) {
        self.sprites = self.sprites.saturating_sub(1);
        log::trace!("-#{}", id);
    }

    fn play(&mut self, effect: SoundEffect) {
        self.audio.play(effect);
    }

    fn change_music(&mut self, track: MusicTrack) {
        self.audio.change_music(track);
    }

    fn show_floating_score(&mut self, points: i64, pos: Vec2) {
        if self.floating_scores {
            log::debug!("{:+} at ({:.0}, {:.0})", points, pos.x, pos.y);
        }
    }

    fn show_decoration(&mut self, decoration: &Decoration) {
        log::debug!("{:?} at x={:.0}", decoration.kind, decoration.pos.x);
    }

    fn present_scene(&mut self, scene: SceneKind, transition: Transition) {
        log::info!("Presenting {:?} ({:?})", scene, transition);
        self.scene = Some(scene);
    }

    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::InfoText(text) if !text.is_empty() => log::info!("Info: {}", text),
            GameEvent::LifeLost { remaining } => log::info!("Life lost, {} left", remaining),
            GameEvent::AntagonistTantrum { level } => log::info!("Tantrum! Level {}", level),
            other => log::trace!("{:?}", other),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), GameError> {
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let settings = args
        .settings
        .as_ref()
        .map(|path| Settings::load_or_default(path))
        .unwrap_or_default();
    let seed = args.seed.unwrap_or_else(rand::random);

    log::info!("Banana Catcher (headless) starting, seed {}", seed);
    let mut host = HeadlessHost::new(&settings);

    if args.tutorial {
        run_tutorial(seed, tuning, &mut host);
    } else {
        run_game(seed, tuning, args.seconds, &mut host);
    }
    Ok(())
}

fn run_game(seed: u64, tuning: Tuning, seconds: f32, host: &mut HeadlessHost) {
    let mut state = GameState::with_tuning(seed, tuning);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let frames = (seconds.max(0.0) / FRAME_DT).ceil() as u32;
    let mut accumulator = 0.0;
    for _ in 0..frames {
        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        dispatch(host, state.drain_events());
        if state.is_over() {
            break;
        }
    }

    log::info!(
        "Session ended at {:.1}s: score {}, lives {}, level {}, {} bananas caught, {} objects in flight",
        state.time,
        state.score(),
        state.lives(),
        state.antagonist.level(),
        state.antagonist.bananas_caught(),
        host.sprites
    );
}

/// Plays the tutorial, tapping continue as soon as each stage allows it
fn run_tutorial(seed: u64, tuning: Tuning, host: &mut HeadlessHost) {
    let mut tutorial = TutorialState::new(seed, tuning);
    let mut elapsed = 0.0;

    while !tutorial.is_finished() && elapsed < TUTORIAL_TIMEOUT {
        tutorial.tick(SIM_DT);
        elapsed += SIM_DT;
        if tutorial.is_gate_open() {
            tutorial.continue_pressed();
        }
        dispatch(host, tutorial.drain_events());
    }

    if host.scene == Some(SceneKind::Menu) {
        log::info!("Tutorial completed in {:.1}s", elapsed);
    } else {
        log::warn!("Tutorial stopped after {:.1}s at stage {}", elapsed, tutorial.stage().ordinal());
    }
}
