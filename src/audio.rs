//! Audio identifiers and volume gating
//!
//! The simulation only names sounds. Playback belongs to an [`AudioBackend`]
//! supplied by the host; [`AudioManager`] applies volume and mute in front of it.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Banana lands in the basket
    BananaCatch,
    /// Banana splats on the ground
    BananaSplat,
    /// Coconut bonks the catcher
    CoconutHit,
    /// Coconut cracks on the ground
    CoconutCrack,
    /// Antagonist throws something
    Throw,
    /// Antagonist levels up
    Tantrum,
    /// Tutorial continue button
    OptionSelect,
    /// Lives depleted
    GameOver,
}

impl SoundEffect {
    /// Asset name the host resolves
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::BananaCatch => "collect.wav",
            SoundEffect::BananaSplat => "splat.wav",
            SoundEffect::CoconutHit => "ouch.wav",
            SoundEffect::CoconutCrack => "crack.wav",
            SoundEffect::Throw => "throw.wav",
            SoundEffect::Tantrum => "tantrum.wav",
            SoundEffect::OptionSelect => "option_select.wav",
            SoundEffect::GameOver => "game_over.wav",
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    Menu,
    Game,
    Tutorial,
}

impl MusicTrack {
    pub fn name(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu",
            MusicTrack::Game => "game",
            MusicTrack::Tutorial => "tutorial",
        }
    }
}

/// Playback device; fire-and-forget
pub trait AudioBackend {
    fn play_effect(&mut self, name: &'static str, volume: f32);
    fn change_music(&mut self, name: &'static str, volume: f32);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_effect(&mut self, name: &'static str, volume: f32) {
        log::debug!("sfx {} @ {:.2}", name, volume);
    }

    fn change_music(&mut self, name: &'static str, volume: f32) {
        log::debug!("music -> {} @ {:.2}", name, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, &Settings::default())
    }

    pub fn with_settings(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_effect(effect.file_name(), vol);
    }

    /// Switch background music
    pub fn change_music(&mut self, track: MusicTrack) {
        let vol = self.effective_volume(self.music_volume);
        self.backend.change_music(track.name(), vol);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        effects: Vec<(&'static str, f32)>,
        music: Vec<&'static str>,
    }

    impl AudioBackend for Recorder {
        fn play_effect(&mut self, name: &'static str, volume: f32) {
            self.effects.push((name, volume));
        }

        fn change_music(&mut self, name: &'static str, _volume: f32) {
            self.music.push(name);
        }
    }

    #[test]
    fn test_play_scales_by_master_and_sfx() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        let mut audio = AudioManager::with_settings(Recorder::default(), &settings);
        audio.play(SoundEffect::OptionSelect);
        let (name, vol) = audio.backend().effects[0];
        assert_eq!(name, "option_select.wav");
        assert!((vol - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_muted_skips_effects() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Throw);
        audio.change_music(MusicTrack::Tutorial);
        assert!(audio.backend().effects.is_empty());
        // Track changes still go through so unmuting resumes the right music
        assert_eq!(audio.backend().music, vec!["tutorial"]);
    }
}
