use bevy::app::AppExit;
use bevy::ecs::query::QuerySingleError;
use bevy::prelude::*;
use bevy::scene::{Scene, SceneBundle};

use crate::catalog::PrefabCatalog;
use crate::config::MarkerTrackingConfig;
use crate::error::MarkerError;
use crate::reconciler::{MarkerReconciler, TickReport};
use crate::runtime::MarkerDetectorRuntime;
use crate::scene::MarkerScene;

/// Places a scene for every fiducial marker the detector runtime reports.
///
/// The app has to provide a [`MarkerDetectors`] runtime, the [`XrMarkerPrefabs`] to spawn and
/// an entity tagged with [`MarkerOrigin`] before [`PostStartup`]. Missing any of them disables
/// marker tracking.
#[derive(Default)]
pub struct XrMarkerPlugin {
    pub config: MarkerTrackingConfig,
}

impl Plugin for XrMarkerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(XrMarkerSettings(self.config.clone()))
            .init_resource::<LastMarkerTick>()
            .add_systems(PostStartup, setup_marker_tracking)
            .add_systems(
                Update,
                update_markers
                    .run_if(resource_exists::<XrMarkerReconciler>)
                    .run_if(resource_exists::<MarkerDetectors>),
            )
            .add_systems(
                Last,
                shutdown_marker_tracking.run_if(resource_exists::<XrMarkerReconciler>),
            );
    }
}

#[derive(Resource, Clone, Debug, Deref, DerefMut)]
pub struct XrMarkerSettings(pub MarkerTrackingConfig);

#[derive(Resource, Deref, DerefMut)]
pub struct MarkerDetectors(pub Box<dyn MarkerDetectorRuntime + Send + Sync>);

impl MarkerDetectors {
    pub fn new(runtime: impl MarkerDetectorRuntime + Send + Sync + 'static) -> Self {
        Self(Box::new(runtime))
    }
}

#[derive(Resource, Clone, Debug, Deref, DerefMut)]
pub struct XrMarkerPrefabs(pub PrefabCatalog<Handle<Scene>>);

/// Only exists while marker tracking is running.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct XrMarkerReconciler(pub MarkerReconciler<Handle<Scene>, Entity>);

/// What the last update did.
#[derive(Resource, Debug, Default, Deref)]
pub struct LastMarkerTick(pub TickReport);

/// The tracking origin marker poses are relative to, usually the floor offset of the XR rig.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct MarkerOrigin;

/// Added to every entity spawned for a marker.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct TrackedMarker {
    pub id: String,
}

/// [`MarkerScene`] over the root entities of a bevy [`World`].
pub struct WorldMarkerScene<'w> {
    world: &'w mut World,
}

impl<'w> WorldMarkerScene<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }
}

impl MarkerScene for WorldMarkerScene<'_> {
    type Template = Handle<Scene>;
    type Object = Entity;

    fn instantiate(&mut self, template: &Handle<Scene>, id: &str) -> Entity {
        self.world
            .spawn((
                SceneBundle {
                    scene: template.clone(),
                    ..default()
                },
                TrackedMarker { id: id.to_owned() },
                Name::new(format!("Marker {id}")),
            ))
            .id()
    }

    fn set_visible(&mut self, object: Entity, visible: bool) {
        if let Some(mut visibility) = self.world.get_mut::<Visibility>(object) {
            visibility.set_if_neq(if visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            });
        }
    }

    fn transform(&self, object: Entity) -> Option<Transform> {
        self.world.get::<Transform>(object).copied()
    }

    fn set_transform(&mut self, object: Entity, transform: Transform) {
        if let Some(mut current) = self.world.get_mut::<Transform>(object) {
            current.set_if_neq(transform);
        }
    }
}

fn origin_transform(world: &mut World) -> Option<Transform> {
    let mut origins = world.query_filtered::<&GlobalTransform, With<MarkerOrigin>>();
    match origins.get_single(world) {
        Ok(origin) => Some(origin.compute_transform()),
        Err(QuerySingleError::MultipleEntities(_)) => {
            warn!("more than one MarkerOrigin in the world, markers can't be placed");
            None
        }
        Err(QuerySingleError::NoEntities(_)) => None,
    }
}

fn setup_marker_tracking(world: &mut World) {
    let config = world.resource::<XrMarkerSettings>().0.clone();
    let prefabs = world.get_resource::<XrMarkerPrefabs>().cloned();
    let has_origin = origin_transform(world).is_some();
    let result = match (prefabs, has_origin) {
        (None, _) => Err(MarkerError::MissingPrefabs),
        (_, false) => Err(MarkerError::MissingOrigin),
        (Some(prefabs), true) => match world.get_resource_mut::<MarkerDetectors>() {
            Some(mut detectors) => MarkerReconciler::init(config, prefabs.0, &mut *detectors.0),
            None => Err(MarkerError::MissingCollaborator),
        },
    };
    match result {
        Ok(reconciler) => {
            info!("marker tracking started");
            world.insert_resource(XrMarkerReconciler(reconciler));
        }
        Err(err) => error!("{err}. Disabling marker tracking."),
    }
}

fn update_markers(world: &mut World) {
    let origin = origin_transform(world);
    let result = world.resource_scope(|world, mut detectors: Mut<MarkerDetectors>| {
        world.resource_scope(|world, mut reconciler: Mut<XrMarkerReconciler>| {
            let mut scene = WorldMarkerScene::new(world);
            reconciler.tick(&mut *detectors.0, &mut scene, origin.as_ref())
        })
    });
    match result {
        Ok(report) => world.insert_resource(LastMarkerTick(report)),
        Err(err) => {
            error!("{err}. Disabling marker tracking.");
            if let Some(mut reconciler) = world.remove_resource::<XrMarkerReconciler>() {
                let mut detectors = world.resource_mut::<MarkerDetectors>();
                reconciler.shutdown(&mut *detectors.0);
            }
        }
    }
}

fn shutdown_marker_tracking(
    mut cmds: Commands,
    mut exit: EventReader<AppExit>,
    mut reconciler: ResMut<XrMarkerReconciler>,
    detectors: Option<ResMut<MarkerDetectors>>,
) {
    if exit.read().next().is_none() {
        return;
    }
    if let Some(mut detectors) = detectors {
        reconciler.shutdown(&mut *detectors.0);
    }
    cmds.remove_resource::<XrMarkerReconciler>();
    info!("marker tracking stopped");
}
