//! Score and high score bookkeeping
//!
//! Kept in process memory only; nothing survives a restart.

use serde::{Deserialize, Serialize};

/// Running score plus the best score of this process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionScore {
    pub score: u32,
    pub high_score: u32,
}

impl SessionScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run (high score is kept)
    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Fold the finished run into the high score.
    /// Returns true if the high score was beaten.
    pub fn record_game_over(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}
