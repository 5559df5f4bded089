//! The scene capability a pointer needs from its host.
//!
//! The pointer never owns scene entities. It casts rays, reads tags and positions, and
//! writes positions/velocities through this trait. [`crate::rapier_world::RapierScene`]
//! is the rapier-backed implementation; hosts with their own physics engine implement
//! the trait over it instead.

use thiserror::Error;

use crate::{
    bitmask_flags::LayerMask,
    types::{EntityHandle, Point3, Ray, RayHit, Vec3},
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not name a live entity (never existed or was destroyed).
    #[error("entity {0:?} does not exist")]
    UnknownEntity(EntityHandle),

    /// The entity exists but has no rigid body to receive a velocity.
    #[error("entity {0:?} has no dynamic rigid body")]
    MissingBody(EntityHandle),
}

pub trait Scene {
    /// Nearest hit along `ray` within `max_length`, ignoring entities outside `layers`.
    ///
    /// `ray.dir` is expected to be unit length so hit distances are in meters.
    fn cast_ray(&self, ray: &Ray, max_length: f32, layers: LayerMask) -> Option<RayHit>;

    /// Category label of an entity, if it is alive and tagged.
    fn entity_tag(&self, entity: EntityHandle) -> Option<&str>;

    /// World-space position of an entity, `None` once it is destroyed.
    fn entity_position(&self, entity: EntityHandle) -> Option<Point3>;

    fn set_entity_position(
        &mut self,
        entity: EntityHandle,
        position: Point3,
    ) -> Result<(), SceneError>;

    fn set_entity_velocity(&mut self, entity: EntityHandle, velocity: Vec3)
    -> Result<(), SceneError>;
}
