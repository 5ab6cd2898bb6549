//! Gameplay tuning and variant presets
//!
//! Every tunable constant of the controller lives in [`Tuning`]. The three
//! shipped variants differ only in these values and in their [`Features`];
//! only [`Variant::Full`] has pipes and the score display.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gameplay variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Player only, velocity clamped both ways, one rotation rate
    Basic,
    /// Player only with the shipped controller constants
    Classic,
    /// Recycled pipes, scoring and the score/high score display
    #[default]
    Full,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Basic => "Basic",
            Variant::Classic => "Classic",
            Variant::Full => "Full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(Variant::Basic),
            "classic" => Some(Variant::Classic),
            "full" => Some(Variant::Full),
            _ => None,
        }
    }
}

/// How the vertical velocity is bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VelocityClamp {
    /// Only jumps are capped at `max_up_force`; falling speed is unbounded
    #[default]
    UpperOnly,
    /// Velocity stays in [-max_up_force, max_up_force] after jumps and gravity
    Symmetric,
}

/// Optional gameplay features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Pipes scroll, score and act as hazards
    pub pipes: bool,
    /// Digit score display and high score view
    pub score_display: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            pipes: true,
            score_display: true,
        }
    }
}

/// Player physics and animation constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub starting_x: f32,
    pub starting_y: f32,
    /// Vertical velocity on reset
    pub starting_force: f32,
    pub idle_bob_intensity: f32,
    pub idle_bob_speed: f32,
    pub jump_force: f32,
    pub max_up_force: f32,
    pub velocity_clamp: VelocityClamp,
    /// Gravity in units/s² (negative pulls down)
    pub gravity: f32,
    pub min_y: f32,
    pub max_y: f32,
    /// Degrees
    pub max_up_rotation: f32,
    /// Degrees
    pub max_down_rotation: f32,
    pub rotation_up_speed: f32,
    pub rotation_down_speed: f32,
    /// Below this vertical velocity the player pitches down
    pub down_rotation_threshold: f32,
    pub hurtbox_radius: f32,
    /// Fraction of the hurtbox radius kept between player and hazard after a hit
    pub ground_hit_offset: f32,
    /// Seconds between sprite frames while playing
    pub animation_interval: f32,
    pub sprite_frames: usize,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            starting_x: -0.9,
            starting_y: 0.1,
            starting_force: 0.0,
            idle_bob_intensity: 0.3,
            idle_bob_speed: 4.0,
            jump_force: 5.0,
            max_up_force: 7.0,
            velocity_clamp: VelocityClamp::UpperOnly,
            gravity: -13.0,
            min_y: -3.0,
            max_y: 2.8,
            max_up_rotation: 29.0,
            max_down_rotation: 90.0,
            rotation_up_speed: 80.0,
            rotation_down_speed: 9.0,
            down_rotation_threshold: -4.0,
            hurtbox_radius: 0.2,
            ground_hit_offset: 0.65,
            animation_interval: 0.13,
            sprite_frames: 3,
        }
    }
}

/// Pipe pool constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeTuning {
    pub count: usize,
    pub first_x: f32,
    pub spacing: f32,
    /// Leftward speed in units/s
    pub speed: f32,
    /// Crossing this X grants the reward
    pub reward_x: f32,
    /// Below this X the pipe is recycled
    pub recycle_x: f32,
    /// X a recycled pipe is moved to
    pub reset_x: f32,
    /// Range of the gap centre
    pub min_y: f32,
    pub max_y: f32,
    pub gap_height: f32,
    pub half_width: f32,
    /// Length of each pipe body beyond the gap
    pub length: f32,
}

impl Default for PipeTuning {
    fn default() -> Self {
        Self {
            count: 3,
            first_x: 3.0,
            spacing: 2.4,
            speed: 1.5,
            reward_x: -0.9,
            recycle_x: -4.2,
            reset_x: 3.0,
            min_y: -1.2,
            max_y: 1.4,
            gap_height: 2.2,
            half_width: 0.35,
            length: 6.0,
        }
    }
}

/// Background scroll constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    /// Phase units per second
    pub speed: f32,
    pub start_x: f32,
    /// Foreground layer multiplier of the background phase
    pub layer_offset: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            speed: 0.025,
            start_x: 0.0,
            layer_offset: 0.3,
        }
    }
}

/// Camera shake on hazard hit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeTuning {
    /// Seconds
    pub time: f32,
    /// Scales the impact velocity into shake amplitude
    pub intensity: f32,
}

impl Default for ShakeTuning {
    fn default() -> Self {
        Self {
            time: 0.09,
            intensity: 0.2,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub variant: Variant,
    pub features: Features,
    pub player: PlayerTuning,
    pub pipes: PipeTuning,
    pub scroll: ScrollTuning,
    pub shake: ShakeTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_variant(Variant::Full)
    }
}

impl Tuning {
    /// Build the preset tuning for a variant
    pub fn for_variant(variant: Variant) -> Self {
        let player_only = Features {
            pipes: false,
            score_display: false,
        };
        match variant {
            Variant::Basic => Self {
                variant,
                features: player_only,
                player: PlayerTuning {
                    velocity_clamp: VelocityClamp::Symmetric,
                    rotation_up_speed: 9.0,
                    ..PlayerTuning::default()
                },
                pipes: PipeTuning::default(),
                scroll: ScrollTuning::default(),
                shake: ShakeTuning::default(),
            },
            Variant::Classic => Self {
                variant,
                features: player_only,
                player: PlayerTuning::default(),
                pipes: PipeTuning::default(),
                scroll: ScrollTuning::default(),
                shake: ShakeTuning::default(),
            },
            Variant::Full => Self {
                variant,
                features: Features::default(),
                player: PlayerTuning::default(),
                pipes: PipeTuning::default(),
                scroll: ScrollTuning::default(),
                shake: ShakeTuning::default(),
            },
        }
    }

    /// Parse a tuning file.
    ///
    /// `variant` picks the preset; every other field present in the file
    /// overrides that preset, and missing fields keep the preset's values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let variant = match overrides.get("variant") {
            Some(value) => Variant::deserialize(value)?,
            None => Variant::default(),
        };

        let mut merged = serde_json::to_value(Tuning::for_variant(variant))?;
        merge_json(&mut merged, overrides);

        let tuning: Tuning = serde_json::from_value(merged)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        if p.min_y.is_nan() || p.max_y.is_nan() || p.min_y > p.max_y {
            return Err(ConfigError::Invalid(format!(
                "player min_y {} exceeds max_y {}",
                p.min_y, p.max_y
            )));
        }
        if p.max_up_force.is_nan() || p.max_up_force <= 0.0 {
            return Err(ConfigError::Invalid("max_up_force must be positive".into()));
        }
        if p.sprite_frames == 0 {
            return Err(ConfigError::Invalid("sprite_frames must be at least 1".into()));
        }
        if p.animation_interval.is_nan() || p.animation_interval <= 0.0 {
            return Err(ConfigError::Invalid(
                "animation_interval must be positive".into(),
            ));
        }

        if self.features.pipes {
            let pipes = &self.pipes;
            if pipes.count == 0 {
                return Err(ConfigError::Invalid("pipe count must be positive".into()));
            }
            if !pipes.min_y.is_finite() || !pipes.max_y.is_finite() || pipes.min_y > pipes.max_y {
                return Err(ConfigError::Invalid(format!(
                    "pipe gap range {}..={} is empty",
                    pipes.min_y, pipes.max_y
                )));
            }
            // Rewarding must happen before recycling on the way left
            if pipes.recycle_x >= pipes.reward_x {
                return Err(ConfigError::Invalid(format!(
                    "recycle_x {} must be left of reward_x {}",
                    pipes.recycle_x, pipes.reward_x
                )));
            }
            // Pipes spawn right of the reward line or they pay out at once
            if pipes.first_x <= pipes.reward_x {
                return Err(ConfigError::Invalid(format!(
                    "first_x {} must be right of reward_x {}",
                    pipes.first_x, pipes.reward_x
                )));
            }
            if pipes.reset_x <= pipes.reward_x {
                return Err(ConfigError::Invalid(format!(
                    "reset_x {} must be right of reward_x {}",
                    pipes.reset_x, pipes.reward_x
                )));
            }
        }

        Ok(())
    }
}

/// Overlay `patch` onto `base`, recursing into objects
fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    use serde_json::Value;

    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, patch) => *base = patch,
    }
}

/// Errors from loading or validating a tuning file
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "malformed tuning file: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
