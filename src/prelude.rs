pub use crate::catalog::PrefabCatalog;
pub use crate::config::{
    ArucoDictionary, MarkerDetectorProfile, MarkerDetectorSettings, MarkerTrackingConfig,
    UnposedPolicy,
};
pub use crate::emulated::EmulatedMarkerRuntime;
pub use crate::error::MarkerError;
pub use crate::plugin::{
    LastMarkerTick, MarkerDetectors, MarkerOrigin, TrackedMarker, XrMarkerPlugin,
    XrMarkerPrefabs, XrMarkerReconciler,
};
pub use crate::reconciler::{MarkerReconciler, ReconcileReport, SkipReason, TickReport};
pub use crate::runtime::{MarkerDetector, MarkerDetectorRuntime};
pub use crate::scene::MarkerScene;
pub use crate::types::{
    MarkerDetectorStatus, MarkerKind, MarkerObservation, MarkerPayload, MarkerPose,
};
