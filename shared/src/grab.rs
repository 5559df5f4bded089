/*!
Grab state machine: pick up, carry and throw a single scene entity.

States are `Idle` (no session) and `Holding` (one [`GrabSession`]). The controller
only ever names its entity through a weak [`EntityHandle`]; every access goes through
the [`Scene`] and a missing entity ends the session instead of faulting.

Re-grab policy: a grab edge while already holding is ignored. The current session
continues until a release edge, so a missed or duplicated press can never orphan the
held entity with a zeroed velocity.
*/

use crate::{
    constants::{DEFAULT_GRAB_TAG, MIN_GRAB_DISTANCE, THROW_SCALE},
    distance::adjust_distance,
    scene::{Scene, SceneError},
    types::{EntityHandle, GrabEvent, Point3, Ray, RayHit, Vec2, Vec3},
};

/// Decides whether a hit entity may be grabbed, from its category label.
pub trait GrabPredicate {
    fn can_grab(&self, tag: Option<&str>) -> bool;
}

impl<F: Fn(Option<&str>) -> bool> GrabPredicate for F {
    fn can_grab(&self, tag: Option<&str>) -> bool {
        self(tag)
    }
}

/// Grab entities whose category label equals `0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagPredicate(pub String);

impl Default for TagPredicate {
    fn default() -> Self {
        Self(DEFAULT_GRAB_TAG.to_string())
    }
}

impl GrabPredicate for TagPredicate {
    fn can_grab(&self, tag: Option<&str>) -> bool {
        tag == Some(self.0.as_str())
    }
}

/// The held entity and how it hangs off the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrabSession {
    pub entity: EntityHandle,
    /// Entity position minus hit point at grab time.
    pub offset: Vec3,
    /// Distance along the hold ray (never below [`MIN_GRAB_DISTANCE`]).
    pub distance: f32,
    /// Entity position before the last move; only used for the release velocity.
    pub previous_position: Point3,
}

/// Velocity imparted on release from the last tick's displacement.
#[inline]
pub fn release_velocity(current: Point3, previous: Point3) -> Vec3 {
    (current - previous) * THROW_SCALE
}

#[derive(Clone, Debug, Default)]
pub struct GrabController {
    session: Option<GrabSession>,
}

impl GrabController {
    pub fn is_holding(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GrabSession> {
        self.session.as_ref()
    }

    /// Idle → Holding on a grab edge over a grabbable hit.
    ///
    /// `distance` is where along the hold ray the entity starts (hit distance for the
    /// laser, horizontal distance for the arc). Returns `None` when the grab does not
    /// start: already holding, the target is not grabbable, or it is already gone.
    pub fn try_grab<S, P>(
        &mut self,
        scene: &S,
        hit: &RayHit,
        distance: f32,
        predicate: &P,
    ) -> Option<GrabEvent>
    where
        S: Scene + ?Sized,
        P: GrabPredicate + ?Sized,
    {
        if let Some(current) = &self.session {
            log::debug!(
                "Ignoring grab of {:?} while holding {:?}",
                hit.entity,
                current.entity
            );
            return None;
        }

        if !predicate.can_grab(scene.entity_tag(hit.entity)) {
            return None;
        }
        let position = scene.entity_position(hit.entity)?;

        self.session = Some(GrabSession {
            entity: hit.entity,
            offset: position - hit.point,
            distance: distance.max(MIN_GRAB_DISTANCE),
            previous_position: position,
        });
        log::debug!("Grabbed {:?} at distance {distance}", hit.entity);
        Some(GrabEvent::Grabbed(hit.entity))
    }

    /// Per-tick Holding update: adjust distance from touch input and place the entity
    /// on `hold_ray`.
    ///
    /// Returns [`GrabEvent::Lost`] if the entity disappeared; the session is dropped.
    pub fn hold<S>(&mut self, scene: &mut S, hold_ray: &Ray, touch: Vec2) -> Option<GrabEvent>
    where
        S: Scene + ?Sized,
    {
        let session = self.session.as_mut()?;
        let entity = session.entity;

        let Some(current) = scene.entity_position(entity) else {
            return self.lose(entity);
        };

        session.distance = adjust_distance(session.distance, touch);
        session.previous_position = current;
        let target = hold_ray.point_at(session.distance) + session.offset;

        if let Err(err) = scene.set_entity_position(entity, target) {
            log::warn!("Failed to move held entity: {err}");
            return self.lose(entity);
        }

        // Held entities are placed manually; keep physics from fighting the placement.
        match scene.set_entity_velocity(entity, Vec3::zeros()) {
            Ok(()) | Err(SceneError::MissingBody(_)) => None,
            Err(SceneError::UnknownEntity(_)) => self.lose(entity),
        }
    }

    /// Holding → Idle: throw the entity with its last-tick displacement.
    ///
    /// Releasing while idle is a no-op. An entity without a rigid body is released
    /// without a velocity.
    pub fn release<S>(&mut self, scene: &mut S) -> Option<GrabEvent>
    where
        S: Scene + ?Sized,
    {
        let session = self.session.take()?;
        let entity = session.entity;

        let Some(current) = scene.entity_position(entity) else {
            log::warn!("Held entity {entity:?} vanished before release");
            return Some(GrabEvent::Lost(entity));
        };

        let velocity = release_velocity(current, session.previous_position);
        let applied = match scene.set_entity_velocity(entity, velocity) {
            Ok(()) => Some(velocity),
            Err(err) => {
                log::warn!("Released {entity:?} without velocity: {err}");
                None
            }
        };

        log::debug!("Released {entity:?} with velocity {applied:?}");
        Some(GrabEvent::Released {
            entity,
            velocity: applied,
        })
    }

    fn lose(&mut self, entity: EntityHandle) -> Option<GrabEvent> {
        log::warn!("Held entity {entity:?} vanished; dropping grab");
        self.session = None;
        Some(GrabEvent::Lost(entity))
    }
}
