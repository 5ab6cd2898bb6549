//! Camera shake tween

use serde::{Deserialize, Serialize};

use crate::lerp;

/// Amplitude that fades linearly from a peak to zero
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraShake {
    peak: f32,
    duration: f32,
    remaining: f32,
}

impl CameraShake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a shake; replaces one already running
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        self.peak = intensity;
        self.duration = duration;
        self.remaining = duration;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Current amplitude without advancing time
    pub fn amplitude(&self) -> f32 {
        if !self.is_active() {
            return 0.0;
        }
        lerp(0.0, self.peak, self.remaining / self.duration)
    }

    /// Advance by `dt` and return the amplitude to render this frame
    pub fn update(&mut self, dt: f32) -> f32 {
        let amplitude = self.amplitude();
        self.remaining = (self.remaining - dt).max(0.0);
        amplitude
    }
}
