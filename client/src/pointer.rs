//! Drives the shared pointer from the rig and draws its beam.

use std::{env, fmt, str::FromStr};

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use shared::{
    ArcSettings, DynPointer, LaserSettings, LayerMask, SettingsError,
    types::{ActiveController, ButtonState, GrabEvent, PointerInput, TrackedAnchors, Vec2 as NaVec2},
};

use crate::{
    AppSystems,
    camera::{Hand, HeadCamera, Rig},
    convert::{anchor_pose, to_bevy_point, to_bevy_vec, to_na_point},
    input::PointerAction,
    world::{SandboxLayer, SceneWorld, layers},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_pointer);
    app.add_systems(
        Update,
        (switch_hand, switch_mode, tick_pointer)
            .chain()
            .in_set(AppSystems::Pointer)
            .run_if(resource_exists::<ActivePointer>),
    );
    app.add_systems(
        Update,
        draw_beam
            .in_set(AppSystems::Present)
            .run_if(resource_exists::<ActivePointer>),
    );
}

/// Environment variable selecting the starting pointer (`laser` or `arc`).
const POINTER_MODE_VAR: &str = "POINTER_MODE";
const ARC_SEGMENTS: usize = 24;
const ARC_BULGE: f32 = 0.25;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerMode {
    #[default]
    Laser,
    Arc,
}

impl PointerMode {
    fn from_env() -> Self {
        match env::var(POINTER_MODE_VAR) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring {POINTER_MODE_VAR}={raw:?}; expected `laser` or `arc`");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Laser => Self::Arc,
            Self::Arc => Self::Laser,
        }
    }
}

impl FromStr for PointerMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "laser" => Ok(Self::Laser),
            "arc" => Ok(Self::Arc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PointerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Laser => "laser",
            Self::Arc => "arc",
        })
    }
}

#[derive(Resource)]
pub struct ActivePointer {
    pub mode: PointerMode,
    pub controller: ActiveController,
    pub pointer: DynPointer,
}

fn build_pointer(mode: PointerMode) -> Result<DynPointer, SettingsError> {
    match mode {
        PointerMode::Laser => {
            let mut castable = LayerMask::all();
            castable.remove(SandboxLayer::Player);
            DynPointer::boxed_laser(LaserSettings {
                layers: castable,
                ..LaserSettings::default()
            })
        }
        PointerMode::Arc => DynPointer::boxed_arc(ArcSettings {
            exclude_layers: layers(&[SandboxLayer::Player]),
            ..ArcSettings::default()
        }),
    }
}

fn add_pointer(mut commands: Commands) {
    let mode = PointerMode::from_env();
    match build_pointer(mode) {
        Ok(pointer) => {
            info!("Starting with the {mode} pointer");
            commands.insert_resource(ActivePointer {
                mode,
                controller: ActiveController::Right,
                pointer,
            });
        }
        Err(err) => error!("Pointer disabled: {err}"),
    }
}

fn switch_hand(actions: Res<ActionState<PointerAction>>, mut active: ResMut<ActivePointer>) {
    if !actions.just_pressed(&PointerAction::SwitchHand) {
        return;
    }
    active.controller = match active.controller {
        ActiveController::Right => ActiveController::Left,
        ActiveController::Left => ActiveController::None,
        ActiveController::None => ActiveController::Right,
    };
    info!("Active controller: {:?}", active.controller);
}

fn switch_mode(
    actions: Res<ActionState<PointerAction>>,
    mut active: ResMut<ActivePointer>,
    mut scene: ResMut<SceneWorld>,
) {
    if !actions.just_pressed(&PointerAction::ToggleMode) {
        return;
    }

    let next = active.mode.toggled();
    let pointer = match build_pointer(next) {
        Ok(pointer) => pointer,
        Err(err) => {
            error!("Cannot switch to the {next} pointer: {err}");
            return;
        }
    };

    // Drop whatever is held before the old pointer goes away.
    if let Some(event) = active.pointer.release(&mut scene.0) {
        log_event(&event);
    }
    active.pointer = pointer;
    active.mode = next;
    info!("Switched to the {next} pointer");
}

fn tick_pointer(
    actions: Res<ActionState<PointerAction>>,
    time: Res<Time>,
    mut active: ResMut<ActivePointer>,
    mut scene: ResMut<SceneWorld>,
    rig: Single<&GlobalTransform, With<Rig>>,
    head: Single<&GlobalTransform, With<HeadCamera>>,
    hands: Query<(&Hand, &GlobalTransform)>,
) {
    let mut anchors = TrackedAnchors {
        center_eye: anchor_pose(&head),
        tracking_space: Some(to_na_point(rig.translation())),
        ..TrackedAnchors::default()
    };
    for (hand, transform) in &hands {
        match hand {
            Hand::Right => anchors.right_hand = anchor_pose(transform),
            Hand::Left => anchors.left_hand = anchor_pose(transform),
        }
    }

    let touch = actions.axis_pair(&PointerAction::Touch);
    let input = PointerInput {
        anchors,
        active_controller: active.controller,
        grab: ButtonState {
            pressed: actions.pressed(&PointerAction::Grab),
            just_pressed: actions.just_pressed(&PointerAction::Grab),
            just_released: actions.just_released(&PointerAction::Grab),
        },
        touch: NaVec2::new(touch.x, touch.y),
    };

    let report = active
        .pointer
        .update(time.delta_secs(), &input, &mut scene.0);
    if let Some(event) = report.event {
        log_event(&event);
    }
}

fn log_event(event: &GrabEvent) {
    match event {
        GrabEvent::Grabbed(entity) => info!("Grabbed {entity:?}"),
        GrabEvent::Released {
            entity,
            velocity: Some(v),
        } => info!("Threw {entity:?} at {:.2} m/s", v.norm()),
        GrabEvent::Released {
            entity,
            velocity: None,
        } => info!("Dropped {entity:?}"),
        GrabEvent::Lost(entity) => warn!("Lost hold of {entity:?}"),
    }
}

fn draw_beam(mut gizmos: Gizmos, active: Res<ActivePointer>) {
    let Some(state) = active.pointer.state() else {
        return;
    };

    let start = to_bevy_point(&state.beam_start);
    let end = to_bevy_point(&state.hit_point);
    let color = if active.pointer.is_holding() {
        Color::srgb(1.0, 0.8, 0.2)
    } else if state.making_contact {
        Color::srgb(0.2, 1.0, 0.4)
    } else {
        Color::srgb(0.8, 0.3, 0.3)
    };

    match active.mode {
        PointerMode::Laser => {
            gizmos.line(start, end, color);
        }
        PointerMode::Arc => {
            // Quadratic curve bulging upward between the hand and the landing point.
            let control = start.midpoint(end) + Vec3::Y * start.distance(end) * ARC_BULGE;
            let points = (0..=ARC_SEGMENTS).map(|i| {
                let t = i as f32 / ARC_SEGMENTS as f32;
                let a = start.lerp(control, t);
                let b = control.lerp(end, t);
                a.lerp(b, t)
            });
            gizmos.linestrip(points, color);
        }
    }

    if let Some(normal) = state.normal {
        let normal = to_bevy_vec(&normal);
        let rotation = Quat::from_rotation_arc(Vec3::Z, normal.normalize_or(Vec3::Y));
        gizmos.circle(Isometry3d::new(end, rotation), 0.2, color);
    }
}
