/// Scale applied to the last tick's displacement when a held object is released.
///
/// The displacement is measured per tick, not per second, so the resulting "throw"
/// velocity depends on the host's tick rate.
pub const THROW_SCALE: f32 = 30.0;

/// Smallest distance (meters) a held object may sit along the pointer ray.
pub const MIN_GRAB_DISTANCE: f32 = 0.1;

/// Distance change (meters) applied per qualifying touch-surface tick.
pub const GRAB_DISTANCE_STEP: f32 = 0.1;

/// Touch-surface `y` above which the held object is pushed away.
pub const TOUCH_PUSH_Y: f32 = 0.6;

/// Touch-surface `y` below which the held object is pulled closer.
pub const TOUCH_PULL_Y: f32 = -0.9;

/// Half-width of the central touch column (inclusive, around `x = 0`).
pub const TOUCH_CENTER_HALF_WIDTH: f32 = 0.5;

/// Default reach of the straight laser pointer (meters).
pub const DEFAULT_LASER_MAX_DISTANCE: f32 = 100.0;

/// Category label grabbable props carry unless the host configures another predicate.
pub const DEFAULT_GRAB_TAG: &str = "Ball";

/// Squared length below which a projected direction is treated as degenerate.
pub const DIRECTION_EPS_SQ: f32 = 1.0e-8;
