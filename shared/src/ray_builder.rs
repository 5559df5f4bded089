/*!
Per-tick ray construction for the two pointer variants.

A [`RayBuilder`] turns the host's pose/input snapshot into a [`CastPlan`]: the ray to
cast, how far, against which layers, where the beam ends without contact, and the ray
a held object is placed along. Plans are rebuilt every tick and never cached.

- [`LaserRay`]: straight beam from the active controller.
- [`ArcRay`]: pitch-driven cast from above the player, aimed at a point on the
  horizontal plane, for targeting uneven ground.
*/

use crate::{
    bitmask_flags::LayerMask,
    constants::DIRECTION_EPS_SQ,
    settings::{ArcSettings, LaserSettings},
    types::{AnchorPose, Point3, PointerInput, Ray, Vec3, world_up},
};

/// Why a builder could not produce a plan this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No pose for the anchor the beam leaves from.
    MissingAnchor,
    /// The arc needs the tracking-space origin and the host did not provide it.
    MissingTrackingSpace,
    /// Aim is degenerate (e.g. controller pointing straight up/down for the arc).
    DegenerateAim,
}

/// How far along the hold ray a new grab starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrabDistance {
    /// The distance of the hit that started the grab.
    HitDistance,
    /// A distance computed by the builder (the arc's horizontal distance).
    Fixed(f32),
}

/// Everything a pointer tick needs from ray construction.
#[derive(Clone, Copy, Debug)]
pub struct CastPlan {
    /// Where the visual beam starts.
    pub beam_start: Point3,
    /// Ray handed to the collision query. `dir` is unit length.
    pub cast: Ray,
    pub max_length: f32,
    pub layers: LayerMask,
    /// Where the beam ends when nothing is hit (or the hit is filtered out).
    pub fallback_end: Point3,
    /// Ray a held object is placed along. `dir` is unit length.
    pub hold_ray: Ray,
    pub grab_distance: GrabDistance,
    /// Steepest accepted surface in degrees from world-up; `None` accepts every hit.
    pub surface_angle: Option<f32>,
}

pub trait RayBuilder {
    fn plan(&self, input: &PointerInput) -> Result<CastPlan, SkipReason>;

    /// Current maximum cast distance, for renderers sizing the beam.
    fn max_cast_distance(&self) -> f32;
}

impl<B: RayBuilder + ?Sized> RayBuilder for Box<B> {
    fn plan(&self, input: &PointerInput) -> Result<CastPlan, SkipReason> {
        (**self).plan(input)
    }

    fn max_cast_distance(&self) -> f32 {
        (**self).max_cast_distance()
    }
}

/// Straight beam from the active controller (or the eyes when none is tracked).
#[derive(Clone, Debug)]
pub struct LaserRay {
    pub settings: LaserSettings,
}

impl RayBuilder for LaserRay {
    fn plan(&self, input: &PointerInput) -> Result<CastPlan, SkipReason> {
        let pose = input
            .anchors
            .pointer_pose(input.active_controller)
            .ok_or(SkipReason::MissingAnchor)?;
        let ray = Ray::new(pose.position, pose.forward);

        Ok(CastPlan {
            beam_start: pose.position,
            cast: ray,
            max_length: self.settings.max_distance,
            layers: self.settings.layers,
            fallback_end: ray.point_at(self.settings.max_distance),
            hold_ray: ray,
            grab_distance: GrabDistance::HitDistance,
            surface_angle: None,
        })
    }

    fn max_cast_distance(&self) -> f32 {
        self.settings.max_distance
    }
}

/// Pitch-driven arc pointer.
#[derive(Clone, Debug)]
pub struct ArcRay {
    pub settings: ArcSettings,
}

impl ArcRay {
    /// Map controller pitch (degrees from straight down) to a distance on the
    /// horizontal plane.
    ///
    /// Pitch is clamped to `[min_controller_angle, max_controller_angle]` and mapped
    /// linearly onto `[min_distance, max_distance]`.
    pub fn horizontal_distance(&self, pitch_from_down_deg: f32) -> f32 {
        let s = &self.settings;
        let pitch = pitch_from_down_deg.clamp(s.min_controller_angle, s.max_controller_angle);

        let pitch_range = s.max_controller_angle - s.min_controller_angle;
        if pitch_range <= f32::EPSILON {
            return s.min_distance;
        }

        let t = (pitch - s.min_controller_angle) / pitch_range;
        s.min_distance + (s.max_distance - s.min_distance) * t
    }

    /// Compute the arc geometry for a controller pose and tracking-space origin.
    pub fn arc_geometry(
        &self,
        pose: &AnchorPose,
        tracking_space: Point3,
    ) -> Result<ArcGeometry, SkipReason> {
        let s = &self.settings;
        let horizontal =
            horizontal_ray(tracking_space, pose.forward).ok_or(SkipReason::DegenerateAim)?;
        let horizontal_distance = self.horizontal_distance(pose.pitch_from_down_deg());
        let target = horizontal.point_at(horizontal_distance);

        let cast_origin = tracking_space + world_up() * s.cast_height;
        let to_target = target - cast_origin;
        let len_sq = to_target.norm_squared();
        if len_sq <= DIRECTION_EPS_SQ {
            return Err(SkipReason::DegenerateAim);
        }
        let cast = Ray::new(cast_origin, to_target / len_sq.sqrt());

        let drop_point = target + to_target * s.drop_multiplier;
        let cast_length = (drop_point - cast_origin).norm() + s.extra_cast_length;

        Ok(ArcGeometry {
            horizontal,
            horizontal_distance,
            target,
            cast,
            drop_point,
            cast_length,
        })
    }
}

/// Derived arc values for one tick.
#[derive(Clone, Copy, Debug)]
pub struct ArcGeometry {
    /// From the tracking-space origin along the level controller heading.
    pub horizontal: Ray,
    pub horizontal_distance: f32,
    /// Point on the horizontal ray at `horizontal_distance`.
    pub target: Point3,
    /// From above the player through `target`.
    pub cast: Ray,
    /// End point used when the cast finds no ground.
    pub drop_point: Point3,
    pub cast_length: f32,
}

impl RayBuilder for ArcRay {
    fn plan(&self, input: &PointerInput) -> Result<CastPlan, SkipReason> {
        let tracking_space = input
            .anchors
            .tracking_space
            .ok_or(SkipReason::MissingTrackingSpace)?;
        let pose = input
            .anchors
            .pointer_pose(input.active_controller)
            .ok_or(SkipReason::MissingAnchor)?;
        let arc = self.arc_geometry(&pose, tracking_space)?;

        Ok(CastPlan {
            beam_start: pose.position,
            cast: arc.cast,
            max_length: arc.cast_length,
            layers: self.settings.cast_layers(),
            fallback_end: arc.drop_point,
            hold_ray: arc.horizontal,
            grab_distance: GrabDistance::Fixed(arc.horizontal_distance),
            surface_angle: Some(self.settings.surface_angle),
        })
    }

    fn max_cast_distance(&self) -> f32 {
        self.settings.max_distance
    }
}

/// Ray from `origin` along `forward` flattened onto the horizontal plane.
///
/// Returns `None` when `forward` is (nearly) vertical and has no horizontal heading.
pub fn horizontal_ray(origin: Point3, forward: Vec3) -> Option<Ray> {
    let up = world_up();
    let flat = forward - up * forward.dot(&up);
    let len_sq = flat.norm_squared();
    if len_sq <= DIRECTION_EPS_SQ || !len_sq.is_finite() {
        return None;
    }
    Some(Ray::new(origin, flat / len_sq.sqrt()))
}
