/*!
Pointer tick: ray construction, scene query, surface filter and grab handling.

One [`Pointer::update`] call per frame, in this order:
1. release on a release edge (needs no ray, so it runs even when the tick is skipped);
2. build the cast plan from the host's pose snapshot;
3. cast against the scene and apply the surface filter (arc only);
4. start a grab on a grab edge over a grabbable hit;
5. place the held entity on the hold ray;
6. publish the beam state for renderers.

A tick without a usable pose (missing anchor, missing tracking space, degenerate arc
aim) casts nothing and moves nothing. Missing anchors are logged once per outage.
*/

use crate::{
    grab::{GrabController, GrabPredicate, TagPredicate},
    ray_builder::{ArcRay, CastPlan, GrabDistance, LaserRay, RayBuilder, SkipReason},
    scene::Scene,
    settings::{ArcSettings, LaserSettings, SettingsError},
    surface::is_walkable,
    types::{EntityHandle, GrabEvent, Point3, PointerInput, PointerState, RayHit, TickReport, Vec3},
};

pub type LaserPointer = Pointer<LaserRay>;
pub type ArcPointer = Pointer<ArcRay>;
/// Pointer whose variant is picked at runtime (e.g. from configuration).
pub type DynPointer = Pointer<Box<dyn RayBuilder + Send + Sync>>;

pub struct Pointer<B> {
    builder: B,
    predicate: Box<dyn GrabPredicate + Send + Sync>,
    grab: GrabController,
    state: Option<PointerState>,
    pose_outage_reported: bool,
}

impl LaserPointer {
    pub fn laser(settings: LaserSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let tag = settings.grab.grab_tag.clone();
        Ok(Self::new(LaserRay { settings }, TagPredicate(tag)))
    }
}

impl ArcPointer {
    pub fn arc(settings: ArcSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let tag = settings.grab.grab_tag.clone();
        Ok(Self::new(ArcRay { settings }, TagPredicate(tag)))
    }
}

impl DynPointer {
    pub fn boxed_laser(settings: LaserSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let tag = settings.grab.grab_tag.clone();
        Ok(Self::new(Box::new(LaserRay { settings }), TagPredicate(tag)))
    }

    pub fn boxed_arc(settings: ArcSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let tag = settings.grab.grab_tag.clone();
        Ok(Self::new(Box::new(ArcRay { settings }), TagPredicate(tag)))
    }
}

impl<B: RayBuilder> Pointer<B> {
    /// Build a pointer from an already validated ray builder.
    pub fn new(builder: B, predicate: impl GrabPredicate + Send + Sync + 'static) -> Self {
        Self {
            builder,
            predicate: Box::new(predicate),
            grab: GrabController::default(),
            state: None,
            pose_outage_reported: false,
        }
    }

    /// Replace the grab predicate (e.g. to grab by something other than a tag).
    pub fn with_predicate(mut self, predicate: impl GrabPredicate + Send + Sync + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Run one tick. `dt` must be finite and non-negative or the tick is skipped.
    pub fn update<S>(&mut self, dt: f32, input: &PointerInput, scene: &mut S) -> TickReport
    where
        S: Scene + ?Sized,
    {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Skipping pointer tick with invalid dt {dt}");
            return TickReport::default();
        }

        let mut event = None;
        if input.grab.just_released {
            event = self.grab.release(scene);
        }

        let plan = match self.builder.plan(input) {
            Ok(plan) => {
                self.pose_outage_reported = false;
                plan
            }
            Err(reason) => {
                self.report_skip(reason);
                self.state = None;
                return TickReport { state: None, event };
            }
        };

        let hit = scene.cast_ray(&plan.cast, plan.max_length, plan.layers);
        let contact = hit.filter(|h| accepts_surface(&plan, h));

        if input.grab.just_pressed && !input.grab.just_released {
            if let Some(hit) = &hit {
                let distance = match plan.grab_distance {
                    GrabDistance::HitDistance => hit.distance,
                    GrabDistance::Fixed(d) => d,
                };
                if let Some(grabbed) =
                    self.grab.try_grab(&*scene, hit, distance, self.predicate.as_ref())
                {
                    event = Some(grabbed);
                }
            }
        }

        // The grab tick itself does not move the entity; holding starts next tick.
        if !matches!(event, Some(GrabEvent::Grabbed(_))) {
            if let Some(lost) = self.grab.hold(scene, &plan.hold_ray, input.touch) {
                event = Some(lost);
            }
        }

        let state = PointerState {
            beam_start: plan.beam_start,
            hit_point: contact.map_or(plan.fallback_end, |h| h.point),
            normal: contact.map(|h| h.normal),
            making_contact: contact.is_some(),
        };
        self.state = Some(state);

        TickReport {
            state: Some(state),
            event,
        }
    }

    /// Force a release, as on a release edge. No-op when nothing is held.
    pub fn release<S>(&mut self, scene: &mut S) -> Option<GrabEvent>
    where
        S: Scene + ?Sized,
    {
        self.grab.release(scene)
    }

    pub fn max_cast_distance(&self) -> f32 {
        self.builder.max_cast_distance()
    }

    /// Beam state from the last completed tick.
    pub fn state(&self) -> Option<&PointerState> {
        self.state.as_ref()
    }

    pub fn making_contact(&self) -> bool {
        self.state.is_some_and(|s| s.making_contact)
    }

    pub fn hit_point(&self) -> Option<Point3> {
        self.state.map(|s| s.hit_point)
    }

    pub fn normal(&self) -> Option<Vec3> {
        self.state.and_then(|s| s.normal)
    }

    pub fn is_holding(&self) -> bool {
        self.grab.is_holding()
    }

    pub fn held(&self) -> Option<EntityHandle> {
        self.grab.session().map(|s| s.entity)
    }

    pub fn grab_distance(&self) -> Option<f32> {
        self.grab.session().map(|s| s.distance)
    }

    fn report_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MissingAnchor | SkipReason::MissingTrackingSpace => {
                if !self.pose_outage_reported {
                    log::error!("Pointer disabled: {reason:?}");
                    self.pose_outage_reported = true;
                }
            }
            SkipReason::DegenerateAim => log::trace!("Skipping pointer tick: degenerate aim"),
        }
    }
}

fn accepts_surface(plan: &CastPlan, hit: &RayHit) -> bool {
    plan.surface_angle.is_none_or(|max_angle| is_walkable(&hit.normal, max_angle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmask_flags::LayerMask;
    use crate::constants::{MIN_GRAB_DISTANCE, THROW_SCALE};
    use crate::rapier_world::{BodyKind, ColliderShapeDef, PropDef, RapierScene};
    use crate::types::{ActiveController, AnchorPose, ButtonState, TrackedAnchors, Vec2};
    use nalgebra::{UnitQuaternion, point, vector};

    const EPS: f32 = 1.0e-3;
    const DT: f32 = 1.0 / 60.0;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() <= EPS
    }

    fn ball(id: u32, at: Point3, body: BodyKind) -> PropDef {
        PropDef {
            id,
            tag: "Ball".into(),
            layers: LayerMask::all(),
            body,
            translation: at.coords,
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Sphere { radius: 0.5 },
        }
    }

    fn floor(id: u32, tilt_deg: f32) -> PropDef {
        PropDef {
            id,
            tag: "Floor".into(),
            layers: LayerMask::all(),
            body: BodyKind::Fixed,
            translation: Vec3::zeros(),
            rotation: UnitQuaternion::from_axis_angle(&Vec3::x_axis(), tilt_deg.to_radians()),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        }
    }

    /// Right hand at the origin aiming along `forward`.
    fn input(forward: Vec3, grab: ButtonState) -> PointerInput {
        PointerInput {
            anchors: TrackedAnchors {
                right_hand: AnchorPose::new(Point3::origin(), forward),
                tracking_space: Some(Point3::origin()),
                ..TrackedAnchors::default()
            },
            active_controller: ActiveController::Right,
            grab,
            touch: Vec2::zeros(),
        }
    }

    fn press() -> ButtonState {
        ButtonState {
            pressed: true,
            just_pressed: true,
            just_released: false,
        }
    }

    fn hold() -> ButtonState {
        ButtonState {
            pressed: true,
            ..ButtonState::default()
        }
    }

    fn lift() -> ButtonState {
        ButtonState {
            just_released: true,
            ..ButtonState::default()
        }
    }

    fn laser() -> LaserPointer {
        LaserPointer::laser(LaserSettings::default()).unwrap()
    }

    fn ahead() -> Vec3 {
        vector![0.0, 0.0, 1.0]
    }

    #[test]
    fn invalid_settings_fail_construction() {
        let settings = LaserSettings {
            max_distance: -1.0,
            ..LaserSettings::default()
        };
        assert!(LaserPointer::laser(settings).is_err());
    }

    #[test]
    fn laser_reports_hit_and_fallback() {
        let (mut scene, _) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let mut pointer = laser();

        let report = pointer.update(DT, &input(ahead(), ButtonState::default()), &mut scene);
        let state = report.state.unwrap();
        assert!(state.making_contact);
        assert!(approx(state.hit_point.coords, vector![0.0, 0.0, 4.5]));
        assert!(approx(state.normal.unwrap(), vector![0.0, 0.0, -1.0]));
        assert_eq!(pointer.hit_point(), Some(state.hit_point));

        let report = pointer.update(
            DT,
            &input(vector![0.0, 0.0, -1.0], ButtonState::default()),
            &mut scene,
        );
        let state = report.state.unwrap();
        assert!(!state.making_contact);
        assert_eq!(state.normal, None);
        assert!(approx(state.hit_point.coords, vector![0.0, 0.0, -100.0]));
        assert_eq!(pointer.max_cast_distance(), 100.0);
    }

    #[test]
    fn grab_then_immediate_release_throws_nothing() {
        let (mut scene, handles) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let ball = handles[0].1;
        let mut pointer = laser();

        let report = pointer.update(DT, &input(ahead(), press()), &mut scene);
        assert_eq!(report.event, Some(GrabEvent::Grabbed(ball)));
        assert_eq!(pointer.held(), Some(ball));

        let report = pointer.update(DT, &input(ahead(), lift()), &mut scene);
        assert_eq!(
            report.event,
            Some(GrabEvent::Released {
                entity: ball,
                velocity: Some(Vec3::zeros())
            })
        );
        assert!(!pointer.is_holding());
    }

    #[test]
    fn throw_velocity_is_last_displacement_times_scale() {
        let (mut scene, handles) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let ball = handles[0].1;
        let mut pointer = laser();

        pointer.update(DT, &input(ahead(), press()), &mut scene);
        // Hold still once so the entity sits on the ray at the grab distance.
        pointer.update(DT, &input(ahead(), hold()), &mut scene);
        assert!(approx(
            scene.entity_position(ball).unwrap().coords,
            vector![0.0, 0.0, 5.0]
        ));

        // Swing right: the entity follows the new ray direction.
        let swung = vector![0.1, 0.0, 1.0].normalize();
        pointer.update(DT, &input(swung, hold()), &mut scene);
        let after = scene.entity_position(ball).unwrap();
        let expected_pos = Point3::from(swung * 4.5) + vector![0.0, 0.0, 0.5];
        assert!(approx(after.coords, expected_pos.coords));

        let report = pointer.update(DT, &input(swung, lift()), &mut scene);
        let Some(GrabEvent::Released { velocity, .. }) = report.event else {
            panic!("expected a release, got {:?}", report.event);
        };
        let expected = (after - point![0.0, 0.0, 5.0]) * THROW_SCALE;
        assert!(approx(velocity.unwrap(), expected));
        assert!(approx(scene.entity_velocity(ball).unwrap(), expected));
    }

    #[test]
    fn held_entity_keeps_zero_velocity() {
        let (mut scene, handles) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let ball = handles[0].1;
        let mut pointer = laser();

        pointer.update(DT, &input(ahead(), press()), &mut scene);
        for _ in 0..3 {
            scene.step(DT);
            pointer.update(DT, &input(ahead(), hold()), &mut scene);
            assert_eq!(scene.entity_velocity(ball), Some(Vec3::zeros()));
        }
    }

    #[test]
    fn release_while_idle_is_a_no_op() {
        let (mut scene, _) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let mut pointer = laser();

        let report = pointer.update(DT, &input(ahead(), lift()), &mut scene);
        assert_eq!(report.event, None);
        assert_eq!(pointer.release(&mut scene), None);
    }

    #[test]
    fn second_grab_edge_keeps_current_session() {
        let (mut scene, handles) = RapierScene::build(vec![
            ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic),
            ball(2, point![3.0, 0.0, 5.0], BodyKind::Dynamic),
        ]);
        let first = handles[0].1;
        let mut pointer = laser();

        pointer.update(DT, &input(ahead(), press()), &mut scene);
        let toward_second = vector![3.0, 0.0, 4.5].normalize();
        let report = pointer.update(DT, &input(toward_second, press()), &mut scene);

        assert_eq!(report.event, None);
        assert_eq!(pointer.held(), Some(first));
    }

    #[test]
    fn non_grabbable_hit_does_not_grab() {
        let (mut scene, _) = RapierScene::build(vec![PropDef {
            tag: "Crate".into(),
            ..ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)
        }]);
        let mut pointer = laser();

        let report = pointer.update(DT, &input(ahead(), press()), &mut scene);
        assert_eq!(report.event, None);
        assert!(report.state.unwrap().making_contact);
        assert!(!pointer.is_holding());
    }

    #[test]
    fn custom_predicate_overrides_tag() {
        let (mut scene, handles) = RapierScene::build(vec![PropDef {
            tag: "Crate".into(),
            ..ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)
        }]);
        let mut pointer = laser().with_predicate(|tag: Option<&str>| tag == Some("Crate"));

        let report = pointer.update(DT, &input(ahead(), press()), &mut scene);
        assert_eq!(report.event, Some(GrabEvent::Grabbed(handles[0].1)));
    }

    #[test]
    fn pull_stops_at_minimum_distance() {
        let (mut scene, _) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 1.0], BodyKind::Dynamic)]);
        let mut pointer = laser();

        pointer.update(DT, &input(ahead(), press()), &mut scene);
        let mut pulling = input(ahead(), hold());
        pulling.touch = Vec2::new(0.0, -1.0);
        for _ in 0..20 {
            pointer.update(DT, &pulling, &mut scene);
        }

        assert_eq!(pointer.grab_distance(), Some(MIN_GRAB_DISTANCE));
    }

    #[test]
    fn push_moves_held_entity_away() {
        let (mut scene, handles) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let ball = handles[0].1;
        let mut pointer = laser();

        pointer.update(DT, &input(ahead(), press()), &mut scene);
        let mut pushing = input(ahead(), hold());
        pushing.touch = Vec2::new(0.0, 1.0);
        for _ in 0..5 {
            pointer.update(DT, &pushing, &mut scene);
        }

        assert!((pointer.grab_distance().unwrap() - 5.0).abs() < EPS);
        assert!(approx(
            scene.entity_position(ball).unwrap().coords,
            vector![0.0, 0.0, 5.5]
        ));
    }

    #[test]
    fn destroyed_entity_is_reported_lost() {
        let (mut scene, handles) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let ball = handles[0].1;
        let mut pointer = laser();

        pointer.update(DT, &input(ahead(), press()), &mut scene);
        scene.despawn(ball);

        let report = pointer.update(DT, &input(ahead(), hold()), &mut scene);
        assert_eq!(report.event, Some(GrabEvent::Lost(ball)));
        assert!(!pointer.is_holding());
    }

    #[test]
    fn bodiless_entity_releases_without_velocity() {
        let (mut scene, handles) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Bodiless)]);
        let orb = handles[0].1;
        let mut pointer = laser();

        pointer.update(DT, &input(ahead(), press()), &mut scene);
        pointer.update(DT, &input(ahead(), hold()), &mut scene);
        let report = pointer.update(DT, &input(ahead(), lift()), &mut scene);

        assert_eq!(
            report.event,
            Some(GrabEvent::Released {
                entity: orb,
                velocity: None
            })
        );
    }

    #[test]
    fn missing_anchor_skips_tick_but_still_releases() {
        let (mut scene, handles) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let ball = handles[0].1;
        let mut pointer = laser();

        pointer.update(DT, &input(ahead(), press()), &mut scene);

        let mut lost_tracking = input(ahead(), hold());
        lost_tracking.anchors.right_hand = None;
        let report = pointer.update(DT, &lost_tracking, &mut scene);
        assert_eq!(report, TickReport::default());
        assert_eq!(pointer.state(), None);
        assert!(pointer.is_holding());
        assert!(approx(
            scene.entity_position(ball).unwrap().coords,
            vector![0.0, 0.0, 5.0]
        ));

        lost_tracking.grab = lift();
        let report = pointer.update(DT, &lost_tracking, &mut scene);
        assert!(matches!(report.event, Some(GrabEvent::Released { .. })));
        assert_eq!(report.state, None);
    }

    #[test]
    fn invalid_dt_is_a_no_op() {
        let (mut scene, _) =
            RapierScene::build(vec![ball(1, point![0.0, 0.0, 5.0], BodyKind::Dynamic)]);
        let mut pointer = laser();

        assert_eq!(
            pointer.update(f32::NAN, &input(ahead(), press()), &mut scene),
            TickReport::default()
        );
        assert_eq!(
            pointer.update(-DT, &input(ahead(), press()), &mut scene),
            TickReport::default()
        );
        assert!(!pointer.is_holding());
    }

    /// Right hand aiming down the +Z heading at `pitch_deg` from straight down.
    fn arc_input(pitch_deg: f32, grab: ButtonState) -> PointerInput {
        let p = pitch_deg.to_radians();
        input(vector![0.0, -p.cos(), p.sin()], grab)
    }

    #[test]
    fn arc_makes_contact_with_floor() {
        let (mut scene, _) = RapierScene::build(vec![floor(1, 0.0)]);
        let mut pointer = ArcPointer::arc(ArcSettings::default()).unwrap();

        let state = pointer
            .update(DT, &arc_input(90.0, ButtonState::default()), &mut scene)
            .state
            .unwrap();

        assert!(state.making_contact);
        assert!(approx(state.normal.unwrap(), Vec3::y()));
        assert!(state.hit_point.y.abs() < EPS);
        assert!(state.hit_point.z > 0.5);
    }

    #[test]
    fn arc_rejects_steep_surfaces() {
        let (mut scene, _) = RapierScene::build(vec![floor(1, -60.0)]);
        let mut pointer = ArcPointer::arc(ArcSettings::default()).unwrap();
        let input = arc_input(90.0, ButtonState::default());

        let plan = pointer.builder().plan(&input).unwrap();
        assert!(scene.cast_ray(&plan.cast, plan.max_length, plan.layers).is_some());

        let report = pointer.update(DT, &input, &mut scene);
        let state = report.state.unwrap();

        assert!(!state.making_contact);
        assert_eq!(state.normal, None);
        assert!(!pointer.making_contact());
    }

    #[test]
    fn arc_accepts_gentle_slopes() {
        let (mut scene, _) = RapierScene::build(vec![floor(1, -10.0)]);
        let mut pointer = ArcPointer::arc(ArcSettings::default()).unwrap();

        pointer.update(DT, &arc_input(90.0, ButtonState::default()), &mut scene);
        assert!(pointer.making_contact());
    }

    #[test]
    fn arc_without_ground_ends_at_drop_point() {
        let mut scene = RapierScene::default();
        let mut pointer = ArcPointer::arc(ArcSettings::default()).unwrap();
        let input = arc_input(90.0, ButtonState::default());

        let state = pointer.update(DT, &input, &mut scene).state.unwrap();
        let pose = input.anchors.right_hand.unwrap();
        let geometry = pointer
            .builder()
            .arc_geometry(&pose, Point3::origin())
            .unwrap();

        assert!(!state.making_contact);
        assert!(approx(state.hit_point.coords, geometry.drop_point.coords));
    }

    #[test]
    fn arc_vertical_aim_skips_tick() {
        let (mut scene, _) = RapierScene::build(vec![floor(1, 0.0)]);
        let mut pointer = ArcPointer::arc(ArcSettings::default()).unwrap();

        let report = pointer.update(
            DT,
            &input(vector![0.0, -1.0, 0.0], ButtonState::default()),
            &mut scene,
        );
        assert_eq!(report, TickReport::default());
    }

    #[test]
    fn arc_missing_tracking_space_skips_tick() {
        let (mut scene, _) = RapierScene::build(vec![floor(1, 0.0)]);
        let mut pointer = ArcPointer::arc(ArcSettings::default()).unwrap();

        let mut no_space = arc_input(90.0, ButtonState::default());
        no_space.anchors.tracking_space = None;
        assert_eq!(pointer.update(DT, &no_space, &mut scene).state, None);
    }

    #[test]
    fn arc_grab_holds_on_horizontal_ray() {
        let (mut scene, handles) = RapierScene::build(vec![
            floor(1, 0.0),
            ball(2, point![0.0, 0.5, 0.0], BodyKind::Dynamic),
        ]);
        let ball = handles[1].1;
        let mut pointer = ArcPointer::arc(ArcSettings::default()).unwrap();

        // Put the ball on the cast segment, 0.5 m above the floor.
        let pitch = 90.0;
        let distance = pointer.builder().horizontal_distance(pitch);
        let at = point![0.0, 0.5, 0.75 * distance];
        scene.set_entity_position(ball, at).unwrap();

        let grab_input = arc_input(pitch, press());
        let plan = pointer.builder().plan(&grab_input).unwrap();
        let hit = scene
            .cast_ray(&plan.cast, plan.max_length, plan.layers)
            .unwrap();
        assert_eq!(hit.entity, ball);

        let report = pointer.update(DT, &grab_input, &mut scene);
        assert_eq!(report.event, Some(GrabEvent::Grabbed(ball)));
        assert!((pointer.grab_distance().unwrap() - distance).abs() < EPS);

        pointer.update(DT, &arc_input(pitch, hold()), &mut scene);
        let expected = point![0.0, 0.0, distance] + (at - hit.point);
        assert!(approx(
            scene.entity_position(ball).unwrap().coords,
            expected.coords
        ));
    }

    #[test]
    fn dyn_pointer_runs_either_variant() {
        let (mut scene, _) = RapierScene::build(vec![floor(1, 0.0)]);
        let mut laser = DynPointer::boxed_laser(LaserSettings::default()).unwrap();
        let mut arc = DynPointer::boxed_arc(ArcSettings::default()).unwrap();

        let mut down = input(vector![0.0, -1.0, 1.0], ButtonState::default());
        down.anchors.right_hand = AnchorPose::new(point![0.0, 1.5, 0.0], vector![0.0, -1.0, 1.0]);
        let laser_state = laser.update(DT, &down, &mut scene).state.unwrap();
        assert!(laser_state.making_contact);

        let aim = arc_input(90.0, ButtonState::default());
        let arc_state = arc.update(DT, &aim, &mut scene).state.unwrap();
        assert!(arc_state.making_contact);
        assert_eq!(arc.max_cast_distance(), 12.0);
    }
}
