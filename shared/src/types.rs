/*!
Core data types shared by the pointer modules.

This module contains no algorithms. It defines what flows through a pointer tick:
- the pose and input snapshot supplied by the host,
- the hit returned by a scene ray cast,
- the per-tick pointer state and grab events exposed back to the host.

Geometry is recomputed every tick; nothing here outlives the tick that produced it
except [`PointerState`], which is kept only so renderers can read the last result.
*/

use nalgebra as na;
use rapier3d::prelude::ColliderHandle;

pub use rapier3d::prelude::Ray;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Vec2 = na::Vector2<f32>;
pub type Point3 = na::Point3<f32>;

/// World-up used by the surface filter and the arc projection.
#[inline]
pub fn world_up() -> Vec3 {
    Vec3::y()
}

/// Weak handle to a scene entity.
///
/// The scene owns its entities; a handle only names one. Handles are generational, so a
/// handle to a destroyed entity fails lookups instead of aliasing a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub ColliderHandle);

/// World-space pose of a tracked anchor (controller or head).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorPose {
    pub position: Point3,
    /// Unit forward direction.
    pub forward: Vec3,
}

impl AnchorPose {
    /// Build a pose, normalizing `forward`. Returns `None` for a zero or non-finite forward.
    pub fn new(position: Point3, forward: Vec3) -> Option<Self> {
        let len_sq = forward.norm_squared();
        if !len_sq.is_finite() || len_sq <= f32::EPSILON {
            return None;
        }
        Some(Self {
            position,
            forward: forward / len_sq.sqrt(),
        })
    }

    /// Angle in degrees between straight down and `forward`.
    ///
    /// 0 = pointing at the floor, 90 = level, 180 = pointing straight up.
    pub fn pitch_from_down_deg(&self) -> f32 {
        (-world_up()).angle(&self.forward).to_degrees()
    }
}

/// Which tracked controller is currently driving input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveController {
    Right,
    Left,
    #[default]
    None,
}

/// Anchors a host can provide. Any of them may be missing on a given tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackedAnchors {
    pub right_hand: Option<AnchorPose>,
    pub left_hand: Option<AnchorPose>,
    pub center_eye: Option<AnchorPose>,
    /// Origin of the tracking space (the player's feet), used by the arc pointer.
    pub tracking_space: Option<Point3>,
}

impl TrackedAnchors {
    /// Pose the beam leaves from: the active hand, or between the eyes when no tracked
    /// controller is active.
    pub fn pointer_pose(&self, active: ActiveController) -> Option<AnchorPose> {
        match active {
            ActiveController::Right => self.right_hand,
            ActiveController::Left => self.left_hand,
            ActiveController::None => self.center_eye,
        }
    }
}

/// Edge and level state of a digital button for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

/// Everything the host supplies for one pointer tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    pub anchors: TrackedAnchors,
    pub active_controller: ActiveController,
    /// The grab gesture (trigger for the laser, touchpad click for the arc).
    pub grab: ButtonState,
    /// Touch-surface position in `[-1, 1] x [-1, 1]`.
    pub touch: Vec2,
}

/// Nearest ray/scene intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub entity: EntityHandle,
    pub point: Point3,
    /// Unit surface normal at `point`.
    pub normal: Vec3,
    /// Distance from the ray origin to `point` (meters).
    pub distance: f32,
}

/// What a renderer needs to draw the beam for the last tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    /// Where the beam leaves the controller.
    pub beam_start: Point3,
    /// Where the beam ends: the accepted hit, or the fallback end point.
    pub hit_point: Point3,
    /// Normal of the accepted hit.
    pub normal: Option<Vec3>,
    /// True when the hit passed the surface filter.
    pub making_contact: bool,
}

/// Grab transitions reported by a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrabEvent {
    Grabbed(EntityHandle),
    /// `velocity` is `None` when the entity had no rigid body to receive it.
    Released {
        entity: EntityHandle,
        velocity: Option<Vec3>,
    },
    /// The held entity disappeared from the scene; the session was dropped.
    Lost(EntityHandle),
}

/// Result of a single pointer tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// `None` when the tick was skipped (missing anchor, degenerate aim).
    pub state: Option<PointerState>,
    pub event: Option<GrabEvent>,
}
