//! Sandbox scene: rapier props mirrored onto Bevy meshes.
//!
//! The rapier scene is the source of truth. Bevy entities carry a [`Prop`] handle and
//! copy their pose from it every frame; props that fall off the island are despawned
//! and balls are respawned at their spawn point.

use bevy::prelude::*;
use shared::{
    LayerMask,
    rapier_world::{BodyKind, ColliderShapeDef, PropDef, RapierScene},
    types::EntityHandle,
};

use crate::{
    AppSystems,
    convert::{to_bevy_transform, to_bevy_vec, to_na_rotation, to_na_vec},
};

shared::define_bitmask_flags!(SandboxLayer, u32, {
    Default,
    Ground,
    Props,
    Player,
});

/// Below this height a prop is considered lost.
const KILL_HEIGHT: f32 = -20.0;
const BALL_RADIUS: f32 = 0.25;
const BALL_SPAWNS: [Vec3; 5] = [
    Vec3::new(-2.0, 1.0, -4.0),
    Vec3::new(-1.0, 1.0, -4.5),
    Vec3::new(0.0, 1.0, -5.0),
    Vec3::new(1.0, 1.0, -4.5),
    Vec3::new(2.0, 1.0, -4.0),
];

/// The interactive scene the pointer casts against.
#[derive(Resource, Deref, DerefMut)]
pub struct SceneWorld(pub RapierScene);

/// Links a Bevy entity to its rapier prop.
#[derive(Component, Debug, Clone, Copy)]
pub struct Prop(pub EntityHandle);

/// Where a ball came from, so it can be replaced when it falls off the island.
#[derive(Component, Debug, Clone, Copy)]
struct BallSpawn(Vec3);

/// Invisible collider that follows the rig; pointer casts exclude its layer.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerBody(pub EntityHandle);

#[derive(Resource)]
struct PropMaterials {
    ball: Handle<StandardMaterial>,
    ball_mesh: Handle<Mesh>,
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
    app.add_systems(FixedUpdate, step_scene);
    app.add_systems(
        Update,
        (despawn_fallen, sync_props).chain().in_set(AppSystems::Present),
    );
}

pub fn layers(flags: &[SandboxLayer]) -> LayerMask {
    LayerMask::from_flags(flags)
}

fn prop_def(
    id: u32,
    tag: &str,
    layer: SandboxLayer,
    body: BodyKind,
    transform: Transform,
    shape: ColliderShapeDef,
) -> PropDef {
    PropDef {
        id,
        tag: tag.into(),
        layers: layers(&[layer]),
        body,
        translation: to_na_vec(transform.translation),
        rotation: to_na_rotation(transform.rotation),
        shape,
    }
}

fn ball_def(id: u32, at: Vec3) -> PropDef {
    prop_def(
        id,
        "Ball",
        SandboxLayer::Props,
        BodyKind::Dynamic,
        Transform::from_translation(at),
        ColliderShapeDef::Sphere {
            radius: BALL_RADIUS,
        },
    )
}

fn cuboid(half_extents: Vec3) -> ColliderShapeDef {
    ColliderShapeDef::Cuboid {
        half_extents: to_na_vec(half_extents),
    }
}

fn mesh_for(shape: &ColliderShapeDef) -> Mesh {
    match shape {
        ColliderShapeDef::Plane { .. } => Plane3d::default().mesh().size(200.0, 200.0).build(),
        ColliderShapeDef::Cuboid { half_extents } => {
            Cuboid::new(
                half_extents.x * 2.0,
                half_extents.y * 2.0,
                half_extents.z * 2.0,
            )
            .into()
        }
        ColliderShapeDef::Sphere { radius } => Sphere::new(*radius).mesh().build(),
        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => Capsule3d::new(*radius, half_height * 2.0).into(),
        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => Cylinder::new(*radius, half_height * 2.0).into(),
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_color = Color::linear_rgb(0.2, 0.3, 0.25);
    let slope_color = Color::srgb_u8(160, 150, 120);
    let ball_color = Color::srgb_u8(230, 120, 60);

    let mut defs = vec![
        (
            prop_def(
                0,
                "Floor",
                SandboxLayer::Ground,
                BodyKind::Fixed,
                Transform::from_xyz(0.0, -0.25, 0.0),
                cuboid(Vec3::new(15.0, 0.25, 15.0)),
            ),
            ground_color,
        ),
        // Walkable: shallower than the arc's surface angle.
        (
            prop_def(
                1,
                "Ramp",
                SandboxLayer::Ground,
                BodyKind::Fixed,
                Transform::from_xyz(-6.0, 0.5, -8.0)
                    .with_rotation(Quat::from_rotation_x(20f32.to_radians())),
                cuboid(Vec3::new(2.0, 0.2, 4.0)),
            ),
            slope_color,
        ),
        // Too steep to stand on.
        (
            prop_def(
                2,
                "Slope",
                SandboxLayer::Ground,
                BodyKind::Fixed,
                Transform::from_xyz(6.0, 1.5, -8.0)
                    .with_rotation(Quat::from_rotation_x(60f32.to_radians())),
                cuboid(Vec3::new(2.0, 0.2, 3.0)),
            ),
            slope_color,
        ),
        (
            prop_def(
                3,
                "Wall",
                SandboxLayer::Ground,
                BodyKind::Fixed,
                Transform::from_xyz(0.0, 2.0, -14.0),
                cuboid(Vec3::new(8.0, 2.0, 0.25)),
            ),
            Color::srgb_u8(124, 144, 255),
        ),
        (
            prop_def(
                4,
                "Crate",
                SandboxLayer::Props,
                BodyKind::Dynamic,
                Transform::from_xyz(3.5, 0.5, -3.0),
                cuboid(Vec3::splat(0.5)),
            ),
            Color::srgb_u8(140, 90, 50),
        ),
        // Grabbable but has no rigid body: it is carried, never thrown.
        (
            prop_def(
                5,
                "Ball",
                SandboxLayer::Props,
                BodyKind::Bodiless,
                Transform::from_xyz(-3.5, 1.5, -3.0),
                ColliderShapeDef::Sphere { radius: 0.35 },
            ),
            Color::srgb_u8(250, 230, 120),
        ),
        (
            prop_def(
                6,
                "Post",
                SandboxLayer::Default,
                BodyKind::Fixed,
                Transform::from_xyz(-4.0, 1.0, -10.0),
                ColliderShapeDef::CylinderY {
                    radius: 0.3,
                    half_height: 1.0,
                },
            ),
            slope_color,
        ),
    ];
    for (i, at) in BALL_SPAWNS.iter().enumerate() {
        defs.push((ball_def(100 + i as u32, *at), ball_color));
    }

    let mut scene = RapierScene::default();
    for (def, color) in defs {
        let mesh = meshes.add(mesh_for(&def.shape));
        let spawn_at = to_bevy_vec(&def.translation);
        let is_ball = def.tag == "Ball" && def.body == BodyKind::Dynamic;
        let handle = scene.spawn(def);
        let Some(pose) = scene.entity_pose(handle) else {
            continue;
        };

        let mut entity = commands.spawn((
            Prop(handle),
            to_bevy_transform(&pose),
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.9,
                metallic: 0.0,
                ..default()
            })),
        ));
        if is_ball {
            entity.insert(BallSpawn(spawn_at));
        }
    }

    // Rig collider; hidden, but an unfiltered cast would hit it first.
    let player = scene.spawn(prop_def(
        1000,
        "Player",
        SandboxLayer::Player,
        BodyKind::Bodiless,
        Transform::from_xyz(0.0, 0.9, 0.0),
        ColliderShapeDef::CapsuleY {
            radius: 0.3,
            half_height: 0.6,
        },
    ));
    commands.insert_resource(PlayerBody(player));

    commands.insert_resource(PropMaterials {
        ball: materials.add(ball_color),
        ball_mesh: meshes.add(mesh_for(&ColliderShapeDef::Sphere {
            radius: BALL_RADIUS,
        })),
    });
    commands.insert_resource(SceneWorld(scene));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Sandbox scene ready");
}

fn step_scene(mut scene: ResMut<SceneWorld>, time: Res<Time>) {
    scene.step(time.delta_secs());
}

fn despawn_fallen(
    mut commands: Commands,
    mut scene: ResMut<SceneWorld>,
    materials: Res<PropMaterials>,
    props: Query<(Entity, &Prop, &Transform, Option<&BallSpawn>)>,
    mut respawned: Local<u32>,
) {
    for (entity, prop, transform, spawn) in &props {
        if transform.translation.y > KILL_HEIGHT {
            continue;
        }

        scene.despawn(prop.0);
        commands.entity(entity).despawn();
        debug!("Prop {:?} fell off the island", prop.0);

        let Some(BallSpawn(at)) = spawn.copied() else {
            continue;
        };
        *respawned += 1;
        let handle = scene.spawn(ball_def(2000 + *respawned, at));
        commands.spawn((
            Prop(handle),
            BallSpawn(at),
            Transform::from_translation(at),
            Mesh3d(materials.ball_mesh.clone()),
            MeshMaterial3d(materials.ball.clone()),
        ));
    }
}

fn sync_props(
    mut commands: Commands,
    scene: Res<SceneWorld>,
    mut props: Query<(Entity, &Prop, &mut Transform)>,
) {
    for (entity, prop, mut transform) in &mut props {
        match scene.entity_pose(prop.0) {
            Some(pose) => *transform = to_bevy_transform(&pose),
            None => {
                commands.entity(entity).despawn();
            }
        }
    }
}
