//! Flap Core - gameplay core of a side-scrolling flappy game
//!
//! Core modules:
//! - `sim`: Simulation (player physics, pipes, collision, session state machine)
//! - `config`: Data-driven tuning and the three gameplay variants
//! - `feedback`: Camera shake, sprite animation, score display
//! - `audio`: One-shot sound cue dispatch
//! - `highscores`: Process-lifetime score bookkeeping

pub mod audio;
pub mod config;
pub mod feedback;
pub mod highscores;
pub mod sim;

pub use config::{ConfigError, Features, Tuning, Variant, VelocityClamp};
pub use feedback::Presentation;
pub use highscores::SessionScore;

/// Host loop constants
pub mod consts {
    /// Fixed physics timestep (50 Hz)
    pub const FIXED_DT: f32 = 1.0 / 50.0;
    /// Nominal render frame time (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum fixed steps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Linear interpolation, `t` is clamped to [0, 1]
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}
