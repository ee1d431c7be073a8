use crate::types::MarkerKind;

/// Detection profile handed to the runtime. Trades speed against accuracy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkerDetectorProfile {
    #[default]
    Default,
    Speed,
    Accuracy,
    SmallTargets,
    LargeFov,
    Custom,
}

/// ArUco and AprilTag dictionaries a detector can decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArucoDictionary {
    Dict4x4_50,
    Dict4x4_100,
    Dict4x4_250,
    Dict4x4_1000,
    #[default]
    Dict5x5_50,
    Dict5x5_100,
    Dict5x5_250,
    Dict5x5_1000,
    Dict6x6_50,
    Dict6x6_100,
    Dict6x6_250,
    Dict6x6_1000,
    Dict7x7_50,
    Dict7x7_100,
    Dict7x7_250,
    Dict7x7_1000,
    AprilTag16h5,
    AprilTag25h9,
    AprilTag36h10,
    AprilTag36h11,
}

impl ArucoDictionary {
    /// Number of distinct markers, valid marker numbers are `0..marker_count()`.
    pub fn marker_count(&self) -> u64 {
        use ArucoDictionary::*;
        match self {
            Dict4x4_50 | Dict5x5_50 | Dict6x6_50 | Dict7x7_50 => 50,
            Dict4x4_100 | Dict5x5_100 | Dict6x6_100 | Dict7x7_100 => 100,
            Dict4x4_250 | Dict5x5_250 | Dict6x6_250 | Dict7x7_250 => 250,
            Dict4x4_1000 | Dict5x5_1000 | Dict6x6_1000 | Dict7x7_1000 => 1000,
            AprilTag16h5 => 30,
            AprilTag25h9 => 35,
            AprilTag36h10 => 2320,
            AprilTag36h11 => 587,
        }
    }
}

/// What to do with the rest of a detector's batch when an observation has no pose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnposedPolicy {
    /// Stop processing the batch. Later observations wait for the next frame.
    #[default]
    AbortBatch,
    /// Skip only the unposed observation.
    SkipObservation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArucoSettings {
    pub dictionary: ArucoDictionary,
    /// When false the runtime reports `length` for every marker.
    pub estimate_length: bool,
    pub length: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QrSettings {
    pub estimate_length: bool,
    pub length: f32,
}

/// Settings for a single detector. Passed to the runtime as is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerDetectorSettings {
    pub kind: MarkerKind,
    pub profile: MarkerDetectorProfile,
    pub aruco: ArucoSettings,
    pub qr: QrSettings,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerTrackingConfig {
    /// One detector is created per entry.
    pub kinds: Vec<MarkerKind>,
    pub profile: MarkerDetectorProfile,
    pub aruco_dictionary: ArucoDictionary,
    pub estimate_aruco_length: bool,
    pub aruco_length: f32,
    pub estimate_qr_length: bool,
    pub qr_length: f32,
    pub unposed_policy: UnposedPolicy,
}

impl Default for MarkerTrackingConfig {
    fn default() -> Self {
        Self {
            kinds: MarkerKind::ALL.to_vec(),
            profile: MarkerDetectorProfile::Default,
            aruco_dictionary: ArucoDictionary::Dict5x5_50,
            estimate_aruco_length: true,
            aruco_length: 0.05,
            estimate_qr_length: true,
            qr_length: 0.05,
            unposed_policy: UnposedPolicy::AbortBatch,
        }
    }
}

impl MarkerTrackingConfig {
    /// Every detector shares the same settings, only the marker kind differs.
    pub fn detector_settings(&self, kind: MarkerKind) -> MarkerDetectorSettings {
        MarkerDetectorSettings {
            kind,
            profile: self.profile,
            aruco: ArucoSettings {
                dictionary: self.aruco_dictionary,
                estimate_length: self.estimate_aruco_length,
                length: self.aruco_length,
            },
            qr: QrSettings {
                estimate_length: self.estimate_qr_length,
                length: self.qr_length,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_tracks_all_kinds() {
        let config = MarkerTrackingConfig::default();
        assert_eq!(config.kinds, vec![MarkerKind::Aruco, MarkerKind::Qr, MarkerKind::Upca]);
        assert_eq!(config.aruco_dictionary, ArucoDictionary::Dict5x5_50);
        assert_eq!(config.unposed_policy, UnposedPolicy::AbortBatch);
    }

    #[test]
    fn detector_settings_only_differ_in_kind() {
        let config = MarkerTrackingConfig {
            profile: MarkerDetectorProfile::Accuracy,
            estimate_qr_length: false,
            qr_length: 0.1,
            ..Default::default()
        };
        let aruco = config.detector_settings(MarkerKind::Aruco);
        let qr = config.detector_settings(MarkerKind::Qr);
        assert_eq!(aruco.kind, MarkerKind::Aruco);
        assert_eq!(qr.kind, MarkerKind::Qr);
        assert_eq!(aruco.profile, qr.profile);
        assert_eq!(aruco.qr, qr.qr);
        assert!(!qr.qr.estimate_length);
        assert_eq!(qr.qr.length, 0.1);
    }

    #[test]
    fn dictionary_sizes() {
        assert_eq!(ArucoDictionary::Dict5x5_50.marker_count(), 50);
        assert_eq!(ArucoDictionary::Dict7x7_1000.marker_count(), 1000);
        assert_eq!(ArucoDictionary::AprilTag36h11.marker_count(), 587);
    }
}
