//! One-shot sound cue dispatch
//!
//! The simulation only names cues; mixing and playback belong to whatever
//! [`AudioBackend`] the host plugs in.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player jumped
    Flap,
    /// Player hit a hazard
    Thud,
    /// Pipe passed
    Point,
    /// New game started
    Start,
    /// Previous high score beaten
    HighScore,
}

impl SoundEffect {
    /// Relative loudness of each cue
    pub fn base_gain(&self) -> f32 {
        match self {
            SoundEffect::Flap => 0.5,
            SoundEffect::Thud => 0.8,
            SoundEffect::Point => 0.6,
            SoundEffect::Start => 0.5,
            SoundEffect::HighScore => 0.9,
        }
    }
}

/// Plays a single cue at the given volume
pub trait AudioBackend {
    fn play_one_shot(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs cues, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_one_shot(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("enabled", &self.backend.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play_one_shot(effect, vol * effect.base_gain());
    }
}
