use bevy::log::{debug, info, warn};
use bevy::transform::components::Transform;

use crate::catalog::PrefabCatalog;
use crate::config::{MarkerTrackingConfig, UnposedPolicy};
use crate::error::MarkerError;
use crate::pose::apply_marker_pose;
use crate::registry::{ActiveMarker, MarkerRegistry};
use crate::runtime::MarkerDetectorRuntime;
use crate::scene::MarkerScene;
use crate::types::{MarkerKind, MarkerObservation, MarkerPayload};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedKind(MarkerKind),
    /// Only reported with [`UnposedPolicy::SkipObservation`].
    Unposed,
    EmptyId,
    InvalidSize,
    InvalidMarkerId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkippedMarker {
    pub id: String,
    pub reason: SkipReason,
}

/// What a single [`MarkerReconciler::reconcile`] call did to the scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconcileReport {
    /// Ids that got a new object.
    pub spawned: Vec<String>,
    /// Ids whose object was moved and made active, in order.
    pub placed: Vec<String>,
    pub skipped: Vec<SkippedMarker>,
    /// Set when an unposed observation stopped the batch.
    pub aborted: bool,
}

impl ReconcileReport {
    fn skip(&mut self, id: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedMarker {
            id: id.into(),
            reason,
        });
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub ready_detectors: usize,
    /// One report per ready detector.
    pub batches: Vec<ReconcileReport>,
}

impl TickReport {
    pub fn spawned(&self) -> impl Iterator<Item = &str> {
        self.batches
            .iter()
            .flat_map(|batch| batch.spawned.iter().map(String::as_str))
    }

    pub fn placed(&self) -> impl Iterator<Item = &str> {
        self.batches
            .iter()
            .flat_map(|batch| batch.placed.iter().map(String::as_str))
    }
}

/// Keeps one scene object per detected marker and places it at the marker pose.
///
/// `T` is the template objects are spawned from, `O` the handle of a spawned object.
#[derive(Clone, Debug)]
pub struct MarkerReconciler<T, O> {
    config: MarkerTrackingConfig,
    catalog: PrefabCatalog<T>,
    registry: MarkerRegistry<O>,
    active: Option<ActiveMarker<O>>,
    enabled: bool,
}

impl<T: Clone + PartialEq, O: Copy + PartialEq> MarkerReconciler<T, O> {
    /// Creates a reconciler without touching a detector runtime.
    pub fn new(config: MarkerTrackingConfig, catalog: PrefabCatalog<T>) -> Self {
        Self {
            config,
            catalog,
            registry: MarkerRegistry::default(),
            active: None,
            enabled: true,
        }
    }

    /// Creates one detector per configured marker kind.
    ///
    /// Fails if the runtime is unavailable. Detectors that fail to be created are logged and
    /// left out.
    pub fn init<R: MarkerDetectorRuntime + ?Sized>(
        config: MarkerTrackingConfig,
        catalog: PrefabCatalog<T>,
        runtime: &mut R,
    ) -> Result<Self, MarkerError> {
        if !runtime.is_available() {
            return Err(MarkerError::MissingCollaborator);
        }
        for kind in &config.kinds {
            match runtime.create_detector(&config.detector_settings(*kind)) {
                Ok(()) => debug!("created {kind} marker detector"),
                Err(err) => warn!("{err}"),
            }
        }
        Ok(Self::new(config, catalog))
    }

    /// Runs one frame: updates the detectors and reconciles the data of every ready one.
    ///
    /// A missing origin disables the reconciler. Once disabled every call fails with
    /// [`MarkerError::Disabled`].
    pub fn tick<R, S>(
        &mut self,
        runtime: &mut R,
        scene: &mut S,
        origin: Option<&Transform>,
    ) -> Result<TickReport, MarkerError>
    where
        R: MarkerDetectorRuntime + ?Sized,
        S: MarkerScene<Template = T, Object = O>,
    {
        if !self.enabled {
            return Err(MarkerError::Disabled);
        }
        let Some(origin) = origin else {
            self.enabled = false;
            return Err(MarkerError::MissingOrigin);
        };

        runtime.update_all();

        let mut report = TickReport::default();
        for detector in runtime.detectors().iter().filter(|d| d.is_ready()) {
            report.ready_detectors += 1;
            report
                .batches
                .push(self.reconcile(scene, origin, &detector.data));
        }
        Ok(report)
    }

    /// Applies one detector's observations to the scene.
    pub fn reconcile<S>(
        &mut self,
        scene: &mut S,
        origin: &Transform,
        observations: &[MarkerObservation],
    ) -> ReconcileReport
    where
        S: MarkerScene<Template = T, Object = O>,
    {
        let mut report = ReconcileReport::default();
        for observation in observations {
            let (id, size) = match &observation.payload {
                MarkerPayload::Aruco(number) => (number.to_string(), observation.length),
                MarkerPayload::Qr(text) => (text.clone(), observation.length),
                MarkerPayload::Upca(code) => {
                    let err = MarkerError::UnsupportedKind(MarkerKind::Upca);
                    info!("{err}, value is {code}");
                    report.skip(code.as_str(), SkipReason::UnsupportedKind(MarkerKind::Upca));
                    continue;
                }
            };

            let Some(pose) = observation.pose else {
                match self.config.unposed_policy {
                    UnposedPolicy::AbortBatch => {
                        // nothing is placed until the pose is valid
                        report.aborted = true;
                        return report;
                    }
                    UnposedPolicy::SkipObservation => {
                        report.skip(id, SkipReason::Unposed);
                        continue;
                    }
                }
            };

            if id.is_empty() {
                report.skip(id, SkipReason::EmptyId);
                continue;
            }
            let size = match size {
                Some(size) if size > 0.0 => size,
                _ => {
                    report.skip(id, SkipReason::InvalidSize);
                    continue;
                }
            };

            let template = match self.catalog.resolve(&id) {
                Ok(template) => template.clone(),
                Err(err) => {
                    warn!("{err}, skipping it");
                    report.skip(id, SkipReason::InvalidMarkerId);
                    continue;
                }
            };

            let (object, spawned) = self
                .registry
                .get_or_insert_with(&id, || scene.instantiate(&template, &id));
            if spawned {
                info!("spawned object for marker {id}");
                report.spawned.push(id.clone());
            }

            // only the most recently placed marker stays visible
            if let Some(active) = &self.active {
                if active.object != object {
                    scene.set_visible(active.object, false);
                }
            }

            let current = scene.transform(object).unwrap_or_default();
            scene.set_transform(object, apply_marker_pose(current, origin, &pose, size));

            self.active = Some(ActiveMarker {
                id: id.clone(),
                object,
            });
            scene.set_visible(object, true);
            report.placed.push(id);
        }
        report
    }

    /// Destroys all detectors and disables the reconciler. Spawned objects stay in the scene.
    pub fn shutdown<R: MarkerDetectorRuntime + ?Sized>(&mut self, runtime: &mut R) {
        runtime.destroy_all();
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn registry(&self) -> &MarkerRegistry<O> {
        &self.registry
    }

    pub fn active(&self) -> Option<&ActiveMarker<O>> {
        self.active.as_ref()
    }

    pub fn catalog(&self) -> &PrefabCatalog<T> {
        &self.catalog
    }

    pub fn config(&self) -> &MarkerTrackingConfig {
        &self.config
    }
}
