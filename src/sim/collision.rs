//! Hazard geometry and hit resolution
//!
//! The player is a circular hurtbox. Each fixed tick the hurtbox is probed one
//! tick ahead along the vertical velocity so thin hazards can't be skipped.
//! On overlap the player is placed just outside the hazard surface instead of
//! bouncing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sdf::{sd_box, sd_ceiling, sd_circle, sd_ground};

/// A solid region that ends the run on contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hazard {
    /// Axis-aligned box (pipe bodies)
    Box { center: Vec2, half_extents: Vec2 },
    Circle { center: Vec2, radius: f32 },
    /// Everything below `y`
    Ground { y: f32 },
    /// Everything above `y`
    Ceiling { y: f32 },
}

impl Hazard {
    /// Signed distance from `p` to the hazard surface
    pub fn distance(&self, p: Vec2) -> f32 {
        match *self {
            Hazard::Box {
                center,
                half_extents,
            } => sd_box(p, center, half_extents),
            Hazard::Circle { center, radius } => sd_circle(p, center, radius),
            Hazard::Ground { y } => sd_ground(p, y),
            Hazard::Ceiling { y } => sd_ceiling(p, y),
        }
    }

    /// Whether a circle touches the hazard
    #[inline]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.distance(center) < radius
    }

    /// Closest point of the hazard to `p`; `p` itself when inside
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        if self.distance(p) <= 0.0 {
            return p;
        }
        match *self {
            Hazard::Box {
                center,
                half_extents,
            } => p.clamp(center - half_extents, center + half_extents),
            Hazard::Circle { center, radius } => {
                center + (p - center).normalize_or_zero() * radius
            }
            Hazard::Ground { y } | Hazard::Ceiling { y } => Vec2::new(p.x, y),
        }
    }
}

/// Anything that can answer "which hazard does this circle touch?"
pub trait HazardLayer {
    /// First hazard overlapping the circle, if any
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Option<Hazard>;
}

impl HazardLayer for [Hazard] {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Option<Hazard> {
        self.iter()
            .find(|h| h.overlaps_circle(center, radius))
            .copied()
    }
}

impl HazardLayer for Vec<Hazard> {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Option<Hazard> {
        self.as_slice().overlap_circle(center, radius)
    }
}

/// A detected hit and the corrected player position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub hazard: Hazard,
    /// Closest hazard point to the player's current position
    pub point: Vec2,
    /// Where the player should be placed
    pub corrected_pos: Vec2,
}

/// Probe the hurtbox one tick ahead and resolve the first hazard it touches
pub fn probe_hazards<L: HazardLayer + ?Sized>(
    layer: &L,
    pos: Vec2,
    vel_y: f32,
    dt: f32,
    radius: f32,
    hit_offset: f32,
) -> Option<CollisionResult> {
    let predicted = pos + Vec2::Y * (vel_y * dt);
    let hazard = layer.overlap_circle(predicted, radius)?;

    let point = hazard.closest_point(pos);
    let away = (pos - point).normalize_or_zero();
    Some(CollisionResult {
        hazard,
        point,
        corrected_pos: point + away * (radius * hit_offset),
    })
}
