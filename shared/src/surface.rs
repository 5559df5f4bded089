use crate::types::{Vec3, world_up};

/// Angle in degrees between world-up and a surface normal.
#[inline]
pub fn angle_from_up_deg(normal: &Vec3) -> f32 {
    world_up().angle(normal).to_degrees()
}

/// Returns true if a surface with `normal` counts as ground for a `max_angle_deg` limit.
///
/// The comparison is strict: a surface exactly at the limit is rejected. A zero or
/// non-finite normal is never ground.
pub fn is_walkable(normal: &Vec3, max_angle_deg: f32) -> bool {
    let len_sq = normal.norm_squared();
    if !len_sq.is_finite() || len_sq <= f32::EPSILON {
        return false;
    }
    angle_from_up_deg(normal) < max_angle_deg
}
