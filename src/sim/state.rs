//! Game state and core simulation types
//!
//! Everything the controller mutates between frames lives in [`GameState`].
//! Side effects leave the simulation only as [`GameEvent`]s.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstaclePool;
use super::player::Player;
use super::scheduler::Scheduler;
use super::scroll::{ScrollDriver, ScrollParams};
use crate::audio::SoundEffect;
use crate::config::{ConfigError, Tuning};
use crate::highscores::SessionScore;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start, player hidden
    Idle,
    /// Player visible and bobbing, pipes stationary
    WaitingForInput,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a new start
    GameOver,
}

/// Fire-and-forget effects for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Cue(SoundEffect),
    Mute(bool),
    /// Peak amplitude decaying linearly to 0 over `duration` seconds
    Shake { intensity: f32, duration: f32 },
    NextSprite,
    ResetSprite,
    ScoreChanged(u32),
    ShowHighScore(u32),
    HideHighScore,
    HideCurrentScore,
    StartControlVisible(bool),
    PlayerVisible(bool),
    Scroll(ScrollParams),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated at construction and fixed for the session
    pub(crate) tuning: Tuning,
    /// Session seed for reproducible pipe heights
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Gates both update callbacks
    pub paused: bool,
    pub player: Player,
    /// Present only when the pipes feature is on
    pub pipes: Option<ObstaclePool>,
    pub scroll: ScrollDriver,
    pub score: SessionScore,
    /// Host seconds since creation (drives the idle bob)
    pub clock: f32,
    pub scheduler: Scheduler,
    /// Pending effects, drained by the host each frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session, rejecting tuning the simulation can't run
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let pipes = tuning
            .features
            .pipes
            .then(|| ObstaclePool::new(&tuning.pipes, &mut rng));

        Ok(Self {
            player: Player::new(&tuning.player),
            scroll: ScrollDriver::new(&tuning.scroll),
            pipes,
            tuning,
            seed,
            rng,
            phase: GamePhase::Idle,
            paused: true,
            score: SessionScore::new(),
            clock: 0.0,
            scheduler: Scheduler::new(),
            events: Vec::new(),
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Whether movement input is currently ignored
    pub fn is_waiting_for_input(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events in emission order
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
