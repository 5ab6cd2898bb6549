//! Presentation side of the game
//!
//! The simulation only emits [`GameEvent`]s. [`Presentation`] owns the
//! collaborators that turn them into sound, camera motion, sprite frames and
//! score glyphs, and keeps the visibility flags and scroll offsets a renderer
//! reads each frame.

pub mod score_display;
pub mod shake;
pub mod sprite;

pub use score_display::{DigitGlyph, DigitPair, ScoreDisplay};
pub use shake::CameraShake;
pub use sprite::SpriteAnimator;

use crate::audio::AudioManager;
use crate::config::Tuning;
use crate::sim::{GameEvent, ScrollParams};

#[derive(Debug)]
pub struct Presentation {
    pub audio: AudioManager,
    pub shake: CameraShake,
    pub sprite: SpriteAnimator,
    pub score: ScoreDisplay,
    pub start_control_visible: bool,
    pub player_visible: bool,
    pub scroll: ScrollParams,
}

impl Presentation {
    pub fn new(tuning: &Tuning, audio: AudioManager) -> Self {
        Self {
            audio,
            shake: CameraShake::new(),
            sprite: SpriteAnimator::new(tuning.player.sprite_frames),
            score: ScoreDisplay::new(),
            start_control_visible: true,
            player_visible: false,
            scroll: ScrollParams::default(),
        }
    }

    /// Apply events in emission order
    pub fn apply<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = GameEvent>,
    {
        for event in events {
            self.apply_one(event);
        }
    }

    fn apply_one(&mut self, event: GameEvent) {
        match event {
            GameEvent::Cue(effect) => self.audio.play(effect),
            GameEvent::Mute(value) => self.audio.set_muted(value),
            GameEvent::Shake {
                intensity,
                duration,
            } => self.shake.shake(intensity, duration),
            GameEvent::NextSprite => {
                self.sprite.next_frame();
            }
            GameEvent::ResetSprite => self.sprite.reset(),
            GameEvent::ScoreChanged(score) => self.score.set_score(score),
            GameEvent::ShowHighScore(score) => self.score.show_high_score(score),
            GameEvent::HideHighScore => self.score.hide_high_score(),
            GameEvent::HideCurrentScore => self.score.hide_current_score(),
            GameEvent::StartControlVisible(visible) => self.start_control_visible = visible,
            GameEvent::PlayerVisible(visible) => self.player_visible = visible,
            GameEvent::Scroll(params) => self.scroll = params,
        }
    }

    /// Per-frame tweens; returns the camera shake amplitude
    pub fn update(&mut self, dt: f32) -> f32 {
        self.shake.update(dt)
    }
}
