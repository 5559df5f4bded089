//! Rapier-backed scene for pointer interaction.
//!
//! Used by the client sandbox and the tests: props are spawned from canonical
//! definitions, ray casts return the nearest hit, and the pointer moves or throws
//! props through the [`Scene`] trait.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical sets.
//! - Handles are rapier generational handles; a removed prop fails lookups.
//! - Motion after release is rapier's job ([`RapierScene::step`]).
//! - Casts go through a `QueryPipeline` over a query-only copy of the colliders,
//!   refreshed after every spawn, despawn, pose write and physics step.

// Re-export Rapier so the client can use Rapier types without depending on it directly.
pub use rapier3d;

use std::collections::HashMap;

use nalgebra::vector;
use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::prelude::*;

use crate::{
    bitmask_flags::LayerMask,
    scene::{Scene, SceneError},
    types::{EntityHandle, Point3, RayHit, Vec3},
};

/// Canonical definition of a scene prop.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - For planes, the normal is derived from the pose: `normal = rotation * +Y`.
#[derive(Clone, Debug)]
pub struct PropDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// Category label read by the grab predicate (e.g. "Ball").
    pub tag: String,
    /// Layers this prop belongs to.
    pub layers: LayerMask,
    pub body: BodyKind,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
}

/// How a prop participates in physics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Simulated; can be grabbed and thrown.
    Dynamic,
    /// Immovable rigid body (walls, terrain).
    Fixed,
    /// Bare collider with no rigid body. Can be hit and moved, but never receives velocity.
    Bodiless,
}

/// Supported prop shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space) through the prop translation.
    ///
    /// The plane normal is derived from the pose as `rotation * +Y`.
    /// In Rapier a half-space is infinite; any visible size is a rendering concern.
    Plane {
        /// Offset along the plane normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },
}

/// Per-prop data the pointer reads besides geometry.
#[derive(Clone, Debug)]
pub struct PropMeta {
    pub id: u32,
    pub tag: String,
    pub layers: LayerMask,
}

/// In-memory Rapier structures for the interactive scene.
pub struct RapierScene {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    props: HashMap<ColliderHandle, PropMeta>,
    queries: QueryWorld,
}

impl Default for RapierScene {
    fn default() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            props: HashMap::new(),
            queries: QueryWorld::default(),
        }
    }
}

impl RapierScene {
    /// Build a scene from a list of prop definitions.
    ///
    /// The input is sorted by `id` before insertion. NaN/invalid values should be
    /// filtered by the caller.
    pub fn build(mut defs: Vec<PropDef>) -> (Self, Vec<(u32, EntityHandle)>) {
        defs.sort_by_key(|d| d.id);

        let mut scene = Self::default();
        let handles = defs
            .into_iter()
            .map(|def| (def.id, scene.insert_prop(def)))
            .collect();
        scene.refresh_queries();
        (scene, handles)
    }

    /// Insert a single prop and return its handle.
    pub fn spawn(&mut self, def: PropDef) -> EntityHandle {
        let handle = self.insert_prop(def);
        self.refresh_queries();
        handle
    }

    fn insert_prop(&mut self, def: PropDef) -> EntityHandle {
        let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
        let mut collider = collider_from_def(&def.shape);

        let handle = match def.body {
            BodyKind::Dynamic | BodyKind::Fixed => {
                let builder = if def.body == BodyKind::Dynamic {
                    RigidBodyBuilder::dynamic()
                } else {
                    RigidBodyBuilder::fixed()
                };
                let rb_handle = self.bodies.insert(builder.pose(iso).build());
                // A parentless collider's pose becomes its offset from the parent on insertion.
                collider.set_position(plane_offset(&def.shape));
                self.colliders
                    .insert_with_parent(collider, rb_handle, &mut self.bodies)
            }
            BodyKind::Bodiless => {
                collider.set_position(iso * plane_offset(&def.shape));
                self.colliders.insert(collider)
            }
        };

        self.props.insert(
            handle,
            PropMeta {
                id: def.id,
                tag: def.tag,
                layers: def.layers,
            },
        );
        EntityHandle(handle)
    }

    /// Destroy a prop (and its rigid body). Returns false if it was already gone.
    pub fn despawn(&mut self, entity: EntityHandle) -> bool {
        self.props.remove(&entity.0);
        let Some(parent) = self.colliders.get(entity.0).map(|c| c.parent()) else {
            return false;
        };

        let removed = match parent {
            Some(body) => self
                .bodies
                .remove(
                    body,
                    &mut self.islands,
                    &mut self.colliders,
                    &mut self.impulse_joints,
                    &mut self.multibody_joints,
                    true,
                )
                .is_some(),
            None => self
                .colliders
                .remove(entity.0, &mut self.islands, &mut self.bodies, true)
                .is_some(),
        };
        self.refresh_queries();
        removed
    }

    pub fn prop(&self, entity: EntityHandle) -> Option<&PropMeta> {
        self.props.get(&entity.0)
    }

    /// All live props with their current world pose.
    pub fn props(&self) -> impl Iterator<Item = (EntityHandle, &PropMeta, Isometry<f32>)> + '_ {
        self.props.iter().filter_map(|(handle, meta)| {
            let collider = self.colliders.get(*handle)?;
            Some((EntityHandle(*handle), meta, *collider.position()))
        })
    }

    /// World pose of a live prop.
    pub fn entity_pose(&self, entity: EntityHandle) -> Option<Isometry<f32>> {
        self.colliders.get(entity.0).map(|c| *c.position())
    }

    /// Current linear velocity of a dynamic prop.
    pub fn entity_velocity(&self, entity: EntityHandle) -> Option<Vec3> {
        let body = self.colliders.get(entity.0)?.parent()?;
        self.bodies.get(body).map(|rb| *rb.linvel())
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        self.integration_parameters.dt = dt;

        let hooks = ();
        let events = ();
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &hooks,
            &events,
        );
        self.refresh_queries();
    }

    /// Bring the query BVH in line with the current collider poses.
    fn refresh_queries(&mut self) {
        self.queries.sync(&self.colliders);
    }

    fn body_of(&self, entity: EntityHandle) -> Result<Option<RigidBodyHandle>, SceneError> {
        self.colliders
            .get(entity.0)
            .map(|c| c.parent())
            .ok_or(SceneError::UnknownEntity(entity))
    }
}

impl Scene for RapierScene {
    fn cast_ray(&self, ray: &Ray, max_length: f32, layers: LayerMask) -> Option<RayHit> {
        if !(max_length > 0.0) || layers.is_empty() {
            return None;
        }

        let on_layers = |handle: ColliderHandle, _: &Collider| {
            self.queries
                .owner(handle)
                .and_then(|entity| self.props.get(&entity.0))
                .is_some_and(|meta| meta.layers.intersects(&layers))
        };
        let filter = QueryFilter::default().predicate(&on_layers);
        let (handle, hit) = self
            .queries
            .query_pipeline(filter)
            .cast_ray_and_get_normal(ray, max_length, true)?;

        Some(RayHit {
            entity: self.queries.owner(handle)?,
            point: ray.point_at(hit.time_of_impact),
            normal: hit.normal,
            distance: hit.time_of_impact * ray.dir.norm(),
        })
    }

    fn entity_tag(&self, entity: EntityHandle) -> Option<&str> {
        self.colliders.get(entity.0)?;
        self.props.get(&entity.0).map(|meta| meta.tag.as_str())
    }

    fn entity_position(&self, entity: EntityHandle) -> Option<Point3> {
        let collider = self.colliders.get(entity.0)?;
        let translation = match collider.parent().and_then(|b| self.bodies.get(b)) {
            Some(body) => *body.translation(),
            None => *collider.translation(),
        };
        Some(Point3::from(translation))
    }

    fn set_entity_position(
        &mut self,
        entity: EntityHandle,
        position: Point3,
    ) -> Result<(), SceneError> {
        match self.body_of(entity)? {
            Some(body) => {
                let rb = self
                    .bodies
                    .get_mut(body)
                    .ok_or(SceneError::UnknownEntity(entity))?;
                rb.set_translation(position.coords, true);
                self.bodies
                    .propagate_modified_body_positions_to_colliders(&mut self.colliders);
            }
            None => {
                let collider = self
                    .colliders
                    .get_mut(entity.0)
                    .ok_or(SceneError::UnknownEntity(entity))?;
                collider.set_translation(position.coords);
            }
        }
        self.refresh_queries();
        Ok(())
    }

    fn set_entity_velocity(
        &mut self,
        entity: EntityHandle,
        velocity: Vec3,
    ) -> Result<(), SceneError> {
        let body = self.body_of(entity)?.ok_or(SceneError::MissingBody(entity))?;
        match self.bodies.get_mut(body) {
            Some(rb) if rb.is_dynamic() => {
                rb.set_linvel(velocity, true);
                Ok(())
            }
            _ => Err(SceneError::MissingBody(entity)),
        }
    }
}

/// Query-only copy of the scene's colliders.
///
/// The physics broad phase only moves during `PhysicsPipeline::step`. Casts run
/// against this parentless copy instead; its BVH is refreshed through a
/// `CollisionPipeline` whenever the scene changes.
#[derive(Default)]
struct QueryWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    collision_pipeline: CollisionPipeline,
    /// Scene collider -> query copy.
    copies: HashMap<ColliderHandle, ColliderHandle>,
    /// Query copy -> scene prop.
    owners: HashMap<ColliderHandle, EntityHandle>,
}

impl QueryWorld {
    fn sync(&mut self, scene: &ColliderSet) {
        let stale: Vec<_> = self
            .copies
            .iter()
            .filter(|(source, _)| !scene.contains(**source))
            .map(|(source, copy)| (*source, *copy))
            .collect();
        for (source, copy) in stale {
            self.copies.remove(&source);
            self.owners.remove(&copy);
            self.colliders.remove(copy, &mut self.islands, &mut self.bodies, false);
        }

        for (source, collider) in scene.iter() {
            let pose = *collider.position();
            match self.copies.get(&source).and_then(|c| self.colliders.get_mut(*c)) {
                Some(copy) if *copy.position() != pose => copy.set_position(pose),
                Some(_) => {}
                None => {
                    // Copies never collide with each other; they only answer queries.
                    let copy = ColliderBuilder::new(collider.shared_shape().clone())
                        .position(pose)
                        .active_collision_types(ActiveCollisionTypes::empty())
                        .build();
                    let handle = self.colliders.insert(copy);
                    self.copies.insert(source, handle);
                    self.owners.insert(handle, EntityHandle(source));
                }
            }
        }

        let hooks = ();
        let events = ();
        self.collision_pipeline.step(
            0.0,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &hooks,
            &events,
        );
    }

    fn owner(&self, copy: ColliderHandle) -> Option<EntityHandle> {
        self.owners.get(&copy).copied()
    }

    /// Borrowed `QueryPipeline` over the current copies.
    fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

/// Local offset of a prop's collider from its pose (planes shift along their own +Y).
fn plane_offset(shape: &ColliderShapeDef) -> Isometry<f32> {
    match shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => Isometry::translation(0.0, *offset_along_normal, 0.0),
        _ => Isometry::identity(),
    }
}

/// Build a Rapier collider from a shape definition.
///
/// The collider is created with identity local transform; the pose comes from the
/// parent body, or is set directly for bodiless props.
fn collider_from_def(shape: &ColliderShapeDef) -> Collider {
    match shape {
        ColliderShapeDef::Plane { .. } => {
            // Local +Y half-space; the pose rotation turns it into `rotation * +Y`.
            let halfspace = HalfSpace::new(Vector::y_axis());
            ColliderBuilder::new(SharedShape::new(halfspace)).build()
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).build(),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius).build(),
    }
}
