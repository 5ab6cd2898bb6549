//! Player physics
//!
//! Vertical-only motion: the player stays at a fixed X while the world
//! scrolls past. Rotation is cosmetic but follows the vertical velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{PlayerTuning, VelocityClamp};
use crate::lerp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (units/s, positive is up)
    pub vel_y: f32,
    /// Degrees, positive pitches the nose up
    pub rotation: f32,
    pub visible: bool,
}

impl Player {
    /// Hidden player at the start position
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.starting_x, tuning.starting_y),
            vel_y: tuning.starting_force,
            rotation: 0.0,
            visible: false,
        }
    }

    /// Back to the start position, level and at rest
    pub fn reset(&mut self, tuning: &PlayerTuning) {
        self.pos = Vec2::new(tuning.starting_x, tuning.starting_y);
        self.vel_y = tuning.starting_force;
        self.rotation = 0.0;
    }

    /// Apply a jump impulse.
    ///
    /// Falling (or resting) players get exactly `jump_force`; rising players
    /// stack it on top of their current velocity. Either way the result is
    /// capped at `max_up_force`.
    pub fn jump(&mut self, tuning: &PlayerTuning) {
        if self.vel_y <= 0.0 {
            self.vel_y = tuning.jump_force;
        } else {
            self.vel_y += tuning.jump_force;
        }
        self.clamp_velocity(tuning);
    }

    /// Sinusoidal hover while waiting for the first jump
    pub fn idle_bob(&mut self, tuning: &PlayerTuning, clock: f32) {
        self.pos.y =
            tuning.starting_y + (clock * tuning.idle_bob_speed).sin() * tuning.idle_bob_intensity;
    }

    /// Integrate one variable-rate step
    pub fn step(&mut self, tuning: &PlayerTuning, dt: f32) {
        self.pos.y = (self.pos.y + self.vel_y * dt).clamp(tuning.min_y, tuning.max_y);

        self.vel_y += tuning.gravity * dt;
        if tuning.velocity_clamp == VelocityClamp::Symmetric {
            self.clamp_velocity(tuning);
        }

        self.update_rotation(tuning, dt);
    }

    /// Ease rotation toward the pitch implied by the current velocity
    fn update_rotation(&mut self, tuning: &PlayerTuning, dt: f32) {
        let (target, rate) = if self.vel_y > tuning.down_rotation_threshold {
            (tuning.max_up_rotation, tuning.rotation_up_speed)
        } else {
            let fall = self.vel_y.clamp(-tuning.max_up_force, 0.0) / tuning.max_up_force;
            (fall * tuning.max_down_rotation, tuning.rotation_down_speed)
        };
        self.rotation = lerp(self.rotation, target, dt * rate);
    }

    fn clamp_velocity(&mut self, tuning: &PlayerTuning) {
        self.vel_y = match tuning.velocity_clamp {
            VelocityClamp::UpperOnly => self.vel_y.min(tuning.max_up_force),
            VelocityClamp::Symmetric => self.vel_y.clamp(-tuning.max_up_force, tuning.max_up_force),
        };
    }
}
