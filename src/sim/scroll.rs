//! Parallax background scroll
//!
//! One phase accumulator drives two layers. Wrapping is left to the texture
//! sampler, so the phase grows without bound.

use serde::{Deserialize, Serialize};

use crate::config::ScrollTuning;

/// Material X offsets for the two background layers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollParams {
    pub background: f32,
    pub foreground: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollDriver {
    pub phase: f32,
    speed: f32,
    layer_offset: f32,
}

impl ScrollDriver {
    pub fn new(tuning: &ScrollTuning) -> Self {
        Self {
            phase: tuning.start_x,
            speed: tuning.speed,
            layer_offset: tuning.layer_offset,
        }
    }

    /// Advance one fixed step and return the values to publish
    pub fn advance(&mut self, dt: f32) -> ScrollParams {
        self.phase += self.speed * dt;
        self.params()
    }

    pub fn params(&self) -> ScrollParams {
        ScrollParams {
            background: self.phase,
            foreground: self.phase * self.layer_offset,
        }
    }
}
