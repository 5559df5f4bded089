//! Debug/performance tooling for native dev builds.
//!
//! Adds the perf overlay plus a one-line pointer readout.

use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use iyes_perf_ui::prelude::*;

use crate::{AppSystems, pointer::ActivePointer, world::SceneWorld};

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_overlays);
    app.add_systems(
        Update,
        update_pointer_readout
            .after(AppSystems::Pointer)
            .run_if(resource_exists::<ActivePointer>),
    );
}

#[derive(Component)]
struct PointerReadout;

fn spawn_overlays(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
    commands.spawn((
        PointerReadout,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

fn update_pointer_readout(
    active: Res<ActivePointer>,
    scene: Res<SceneWorld>,
    mut readout: Single<&mut Text, With<PointerReadout>>,
) {
    let pointer = &active.pointer;
    let target = match pointer.hit_point() {
        Some(p) if pointer.making_contact() => format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
        _ => "none".to_string(),
    };
    let held = match (pointer.held().and_then(|e| scene.prop(e)), pointer.grab_distance()) {
        (Some(meta), Some(distance)) => format!("{} #{} at {distance:.1} m", meta.tag, meta.id),
        _ => "nothing".to_string(),
    };

    readout.0 = format!(
        "{} pointer | {:?} hand | contact: {target} | holding: {held} | props: {}",
        active.mode,
        active.controller,
        scene.props().count()
    );
}
