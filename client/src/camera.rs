//! Desktop stand-in for a tracked rig.
//!
//! The rig root sits on the floor and doubles as the tracking-space origin. The camera
//! is the center-eye anchor; both hands hang off it so they follow the view pitch.

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use shared::scene::Scene as _;

use crate::{
    AppSystems,
    convert::to_na_point,
    input::PointerAction,
    world::{PlayerBody, SceneWorld},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_rig);
    app.add_systems(
        Update,
        (steer_rig, carry_player_body).chain().in_set(AppSystems::Rig),
    );
}

const EYE_HEIGHT: f32 = 1.6;
const BODY_CENTER_HEIGHT: f32 = 0.9;
const WALK_SPEED: f32 = 3.0;
const LOOK_SENSITIVITY: f32 = 0.003;
const MAX_PITCH: f32 = 1.5;

#[derive(Component)]
pub struct Rig;

#[derive(Component)]
pub struct HeadCamera;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Right,
    Left,
}

fn add_rig(mut commands: Commands) {
    commands
        .spawn((Rig, Transform::default(), Visibility::default()))
        .with_children(|rig| {
            rig.spawn((
                HeadCamera,
                bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
                Camera3d::default(),
                Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
                DistanceFog {
                    color: Color::srgba(0.35, 0.48, 0.66, 1.0),
                    directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
                    directional_light_exponent: 30.0,
                    falloff: FogFalloff::from_visibility_colors(
                        200.0, // Fog distance
                        Color::srgb(0.35, 0.5, 0.66),
                        Color::srgb(0.8, 0.8, 0.7),
                    ),
                },
            ))
            .with_children(|head| {
                head.spawn((Hand::Right, Transform::from_xyz(0.25, -0.3, -0.35)));
                head.spawn((Hand::Left, Transform::from_xyz(-0.25, -0.3, -0.35)));
            });
        });
}

fn steer_rig(
    actions: Res<ActionState<PointerAction>>,
    time: Res<Time>,
    mut rig: Single<&mut Transform, (With<Rig>, Without<HeadCamera>)>,
    mut head: Single<&mut Transform, (With<HeadCamera>, Without<Rig>)>,
) {
    let look = actions.axis_pair(&PointerAction::Look) * LOOK_SENSITIVITY;
    rig.rotate_y(-look.x);

    let (_, pitch, _) = head.rotation.to_euler(EulerRot::YXZ);
    let pitch = (pitch - look.y).clamp(-MAX_PITCH, MAX_PITCH);
    head.rotation = Quat::from_rotation_x(pitch);

    let walk = actions.axis_pair(&PointerAction::Move);
    if walk == Vec2::ZERO {
        return;
    }
    let forward = rig.forward().as_vec3();
    let right = rig.right().as_vec3();
    let step = (forward * walk.y + right * walk.x) * WALK_SPEED * time.delta_secs();
    rig.translation += step;
}

fn carry_player_body(
    rig: Single<&Transform, With<Rig>>,
    body: Res<PlayerBody>,
    mut scene: ResMut<SceneWorld>,
) {
    let center = rig.translation + Vec3::Y * BODY_CENTER_HEIGHT;
    if let Err(err) = scene.set_entity_position(body.0, to_na_point(center)) {
        warn!("Player body out of sync: {err}");
    }
}
