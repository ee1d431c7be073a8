use std::time::Duration;

use bevy::{
    app::{AppExit, ScheduleRunnerPlugin},
    log::LogPlugin,
    prelude::*,
    scene::Scene,
};
use bevy_xr_markers::helper_traits::ToPosef;
use bevy_xr_markers::prelude::*;

const DEFAULT_PREFAB: Handle<Scene> = Handle::weak_from_u128(0x8c3e_51d0_7a41_4c9e_9b0d_2f4a_0000_0000);
const JET_PREFAB: Handle<Scene> = Handle::weak_from_u128(0x8c3e_51d0_7a41_4c9e_9b0d_2f4a_0000_0001);
const CAR_PREFAB: Handle<Scene> = Handle::weak_from_u128(0x8c3e_51d0_7a41_4c9e_9b0d_2f4a_0000_0002);

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 30.0,
        ))),
    )
    .add_plugins(LogPlugin::default())
    .add_plugins(XrMarkerPlugin::default())
    .insert_resource(MarkerDetectors::new(script()))
    .insert_resource(XrMarkerPrefabs(
        PrefabCatalog::new(DEFAULT_PREFAB)
            .with(0, DEFAULT_PREFAB)
            .with(1, JET_PREFAB)
            .with(2, CAR_PREFAB),
    ))
    .add_systems(Startup, spawn_origin)
    .add_systems(Update, (report_markers, exit_when_done).chain());

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(eyre::eyre!("marker simulation exited with {code}")),
    }
}

/// A jet marker that shows up unposed, gets located and grows as its size estimate
/// settles, then a car marker and a QR code pointing to the jet, then the car again.
fn script() -> EmulatedMarkerRuntime {
    let pose = |x: f32| {
        Some(MarkerPose::new(
            Vec3::new(x, 0.0, -1.0),
            Quat::from_rotation_y(0.2),
        ))
    };
    let mut runtime = EmulatedMarkerRuntime::new()
        .with_warmup(2)
        .with_frame([MarkerObservation::aruco(1, 0.0, None)])
        .with_frame([MarkerObservation::aruco(1, 0.04, pose(0.0))])
        .with_frame([MarkerObservation::aruco(1, 0.05, pose(0.0))])
        .with_frame([
            MarkerObservation::aruco(1, 0.05, pose(0.0)),
            MarkerObservation::upca("036000291452"),
        ])
        .with_frame([MarkerObservation::aruco(2, 0.08, pose(0.3))])
        .with_frame([
            MarkerObservation::qr("1", 0.1, pose(-0.3)),
            MarkerObservation::qr("https://bevyengine.org", 0.1, pose(-0.6)),
        ]);
    // the car marker again, reported the way an OpenXR runtime hands poses over
    runtime.push_xr_frame([(
        MarkerPayload::Aruco(2),
        Some(0.08),
        pose(0.4).map(|pose| pose.to_posef()),
    )]);
    runtime
}

fn spawn_origin(mut cmds: Commands) {
    let floor_offset = Transform::from_xyz(0.0, 1.6, 0.0);
    cmds.spawn((
        MarkerOrigin,
        floor_offset,
        GlobalTransform::from(floor_offset),
        Name::new("Tracking Origin"),
    ));
}

fn report_markers(
    tick: Res<LastMarkerTick>,
    markers: Query<(&TrackedMarker, &Transform, &Visibility)>,
) {
    if !tick.is_changed() {
        return;
    }
    for id in tick.spawned() {
        info!("new marker {id}");
    }
    for (marker, transform, visibility) in &markers {
        debug!(
            "marker {} at {:?} scale {:.3} {:?}",
            marker.id, transform.translation, transform.scale.x, visibility
        );
    }
}

fn exit_when_done(
    detectors: Option<Res<MarkerDetectors>>,
    mut frames: Local<usize>,
    mut exit: EventWriter<AppExit>,
) {
    *frames += 1;
    let Some(detectors) = detectors else {
        exit.send(AppExit::Success);
        return;
    };
    // warmup plus script plus one idle frame
    if *frames > 10 || detectors.detectors().is_empty() {
        exit.send(AppExit::Success);
    }
}
