//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering, audio or platform dependencies; effects leave as events

pub mod collision;
pub mod obstacles;
pub mod player;
pub mod scheduler;
pub mod scroll;
pub mod sdf;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Hazard, HazardLayer, probe_hazards};
pub use obstacles::{Obstacle, ObstacleId, ObstaclePool};
pub use player::Player;
pub use scheduler::{Scheduler, Task, TaskContext};
pub use scroll::{ScrollDriver, ScrollParams};
pub use sdf::{sd_box, sd_ceiling, sd_circle, sd_ground};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameInput, fixed_update, frame_update, game_over, mute, pause_game, start_game};
