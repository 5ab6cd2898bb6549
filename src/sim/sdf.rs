//! Signed distance functions for hazard shapes
//!
//! Negative inside, positive outside, zero on the surface.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box
pub fn sd_box(p: Vec2, center: Vec2, half_extents: Vec2) -> f32 {
    let d = (p - center).abs() - half_extents;
    let outside = d.max(Vec2::ZERO).length();
    let inside = d.x.max(d.y).min(0.0);
    outside + inside
}

/// Signed distance to the solid half-plane below `y`
#[inline]
pub fn sd_ground(p: Vec2, y: f32) -> f32 {
    p.y - y
}

/// Signed distance to the solid half-plane above `y`
#[inline]
pub fn sd_ceiling(p: Vec2, y: f32) -> f32 {
    y - p.y
}
