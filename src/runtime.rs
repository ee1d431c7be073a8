use crate::config::MarkerDetectorSettings;
use crate::error::MarkerError;
use crate::types::{MarkerDetectorStatus, MarkerObservation};

/// A detector owned by the runtime, scanning camera frames for one marker kind.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerDetector {
    pub settings: MarkerDetectorSettings,
    pub status: MarkerDetectorStatus,
    /// Markers seen during the last [`MarkerDetectorRuntime::update_all`].
    pub data: Vec<MarkerObservation>,
}

impl MarkerDetector {
    pub fn new(settings: MarkerDetectorSettings) -> Self {
        Self {
            settings,
            status: MarkerDetectorStatus::Pending,
            data: Vec::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == MarkerDetectorStatus::Ready
    }
}

/// The runtime doing the actual marker detection and pose estimation.
///
/// Poses in [`MarkerDetector::data`] must be relative to the tracking origin.
pub trait MarkerDetectorRuntime {
    /// False when the runtime feature is missing or disabled.
    fn is_available(&self) -> bool;

    fn create_detector(&mut self, settings: &MarkerDetectorSettings) -> Result<(), MarkerError>;

    /// Advances every detector by one frame.
    fn update_all(&mut self);

    fn detectors(&self) -> &[MarkerDetector];

    fn destroy_all(&mut self);
}
