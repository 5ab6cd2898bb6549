//! Recycled pipe pool
//!
//! A fixed number of pipes is created once per session. Pipes scroll left,
//! pay out one point when they pass the reward line, and are teleported back
//! to the right with a fresh gap height once they leave the screen. Slots are
//! never added or removed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Hazard, HazardLayer};
use crate::config::PipeTuning;

/// Index of a pipe in its pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub usize);

/// A pipe pair; `pos.y` is the centre of the gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub pos: Vec2,
    /// Spawn position, restored on every new game
    pub reset_pos: Vec2,
    pub reward_claimed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    slots: Vec<Obstacle>,
    tuning: PipeTuning,
}

impl ObstaclePool {
    /// Lay out `tuning.count` pipes at their spacing with random gap heights
    pub fn new<R: Rng>(tuning: &PipeTuning, rng: &mut R) -> Self {
        let slots = (0..tuning.count)
            .map(|i| {
                let pos = Vec2::new(
                    tuning.first_x + i as f32 * tuning.spacing,
                    random_gap_y(tuning, rng),
                );
                Obstacle {
                    id: ObstacleId(i),
                    pos,
                    reset_pos: pos,
                    reward_claimed: false,
                }
            })
            .collect();

        Self {
            slots,
            tuning: tuning.clone(),
        }
    }

    /// Pipe constants this pool was built with
    pub fn tuning(&self) -> &PipeTuning {
        &self.tuning
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.slots.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter()
    }

    /// Move every pipe back to its spawn position
    pub fn reset(&mut self) {
        for obstacle in &mut self.slots {
            obstacle.pos = obstacle.reset_pos;
            obstacle.reward_claimed = false;
        }
    }

    /// Scroll all pipes left by one step.
    /// Returns the number of rewards earned this step.
    pub fn advance<R: Rng>(&mut self, dt: f32, rng: &mut R) -> u32 {
        let mut rewards = 0;

        for obstacle in &mut self.slots {
            obstacle.pos.x -= self.tuning.speed * dt;

            // Reward before recycle: the flag, not the position, prevents repeats
            if obstacle.pos.x < self.tuning.reward_x && !obstacle.reward_claimed {
                obstacle.reward_claimed = true;
                rewards += 1;
            }

            if obstacle.pos.x < self.tuning.recycle_x {
                obstacle.pos = Vec2::new(self.tuning.reset_x, random_gap_y(&self.tuning, rng));
                obstacle.reward_claimed = false;
            }
        }

        rewards
    }

    /// Upper and lower pipe bodies around the gap
    pub fn pipe_hazards(&self, obstacle: &Obstacle) -> [Hazard; 2] {
        let t = &self.tuning;
        let half_extents = Vec2::new(t.half_width, t.length / 2.0);
        let gap_half = t.gap_height / 2.0;
        [
            Hazard::Box {
                center: Vec2::new(obstacle.pos.x, obstacle.pos.y + gap_half + t.length / 2.0),
                half_extents,
            },
            Hazard::Box {
                center: Vec2::new(obstacle.pos.x, obstacle.pos.y - gap_half - t.length / 2.0),
                half_extents,
            },
        ]
    }
}

impl HazardLayer for ObstaclePool {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Option<Hazard> {
        self.slots
            .iter()
            // Cheap reject on X before building the boxes
            .filter(|o| (o.pos.x - center.x).abs() <= self.tuning.half_width + radius)
            .find_map(|o| {
                self.pipe_hazards(o)
                    .into_iter()
                    .find(|h| h.overlaps_circle(center, radius))
            })
    }
}

fn random_gap_y<R: Rng>(tuning: &PipeTuning, rng: &mut R) -> f32 {
    rng.random_range(tuning.min_y..=tuning.max_y)
}
