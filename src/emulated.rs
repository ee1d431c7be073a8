use std::collections::VecDeque;

use bevy::log::debug;

use crate::config::MarkerDetectorSettings;
use crate::error::MarkerError;
#[cfg(not(target_family = "wasm"))]
use crate::helper_traits::ToMarkerPose;
use crate::runtime::{MarkerDetector, MarkerDetectorRuntime};
use crate::types::{MarkerDetectorStatus, MarkerObservation, MarkerPayload};

/// A detector runtime that plays back scripted frames, for running without a headset.
///
/// Each update pops one frame and hands every observation in it to the detector of the
/// matching kind. Once the script runs out detectors report no data.
#[derive(Clone, Debug, Default)]
pub struct EmulatedMarkerRuntime {
    detectors: Vec<MarkerDetector>,
    frames: VecDeque<Vec<MarkerObservation>>,
    warmup: usize,
    unavailable: bool,
}

impl EmulatedMarkerRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runtime that reports itself as missing.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    /// Keeps detectors pending for the first `updates` updates.
    pub fn with_warmup(mut self, updates: usize) -> Self {
        self.warmup = updates;
        self
    }

    pub fn with_frame(mut self, frame: impl IntoIterator<Item = MarkerObservation>) -> Self {
        self.push_frame(frame);
        self
    }

    pub fn push_frame(&mut self, frame: impl IntoIterator<Item = MarkerObservation>) {
        self.frames.push_back(frame.into_iter().collect());
    }

    /// Queues a frame of raw OpenXR poses, as a runtime reports them before conversion.
    #[cfg(not(target_family = "wasm"))]
    pub fn push_xr_frame(
        &mut self,
        frame: impl IntoIterator<Item = (MarkerPayload, Option<f32>, Option<openxr::Posef>)>,
    ) {
        self.push_frame(
            frame
                .into_iter()
                .map(|(payload, length, pose)| MarkerObservation {
                    payload,
                    length,
                    pose: pose.map(|pose| pose.to_marker_pose()),
                }),
        );
    }

    pub fn remaining_frames(&self) -> usize {
        self.frames.len()
    }
}

impl MarkerDetectorRuntime for EmulatedMarkerRuntime {
    fn is_available(&self) -> bool {
        !self.unavailable
    }

    fn create_detector(&mut self, settings: &MarkerDetectorSettings) -> Result<(), MarkerError> {
        if self.unavailable {
            return Err(MarkerError::DetectorCreation {
                kind: settings.kind,
                reason: "runtime unavailable".into(),
            });
        }
        self.detectors.push(MarkerDetector::new(*settings));
        Ok(())
    }

    fn update_all(&mut self) {
        let status = if self.warmup > 0 {
            self.warmup -= 1;
            MarkerDetectorStatus::Pending
        } else {
            MarkerDetectorStatus::Ready
        };
        let frame = self.frames.pop_front().unwrap_or_default();
        for detector in &mut self.detectors {
            detector.status = status;
            let dictionary = detector.settings.aruco.dictionary;
            detector.data = frame
                .iter()
                .filter(|observation| observation.kind() == detector.settings.kind)
                .filter(|observation| match observation.payload {
                    // numbers outside the dictionary can't be decoded
                    MarkerPayload::Aruco(number) => number < dictionary.marker_count(),
                    _ => true,
                })
                .cloned()
                .collect();
        }
        debug!("emulated marker frame with {} observations", frame.len());
    }

    fn detectors(&self) -> &[MarkerDetector] {
        &self.detectors
    }

    fn destroy_all(&mut self) {
        self.detectors.clear();
    }
}
