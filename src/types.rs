use std::fmt;

use bevy::math::{Quat, Vec3};
use bevy::reflect::Reflect;

/// The fiducial families a detector can be created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum MarkerKind {
    Aruco,
    Qr,
    /// UPC-A barcodes are decoded but never located, so they carry no pose.
    Upca,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 3] = [MarkerKind::Aruco, MarkerKind::Qr, MarkerKind::Upca];
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Aruco => write!(f, "ArUco"),
            MarkerKind::Qr => write!(f, "QR"),
            MarkerKind::Upca => write!(f, "UPC-A"),
        }
    }
}

/// What the detector decoded from a marker.
#[derive(Clone, Debug, PartialEq, Eq, Reflect)]
pub enum MarkerPayload {
    /// Index of the marker inside the configured ArUco dictionary.
    Aruco(u64),
    /// Decoded QR string.
    Qr(String),
    /// Decoded UPC-A code.
    Upca(String),
}

impl MarkerPayload {
    pub fn kind(&self) -> MarkerKind {
        match self {
            MarkerPayload::Aruco(_) => MarkerKind::Aruco,
            MarkerPayload::Qr(_) => MarkerKind::Qr,
            MarkerPayload::Upca(_) => MarkerKind::Upca,
        }
    }
}

/// Pose of a marker relative to the tracking origin.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct MarkerPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl MarkerPose {
    pub const IDENTITY: MarkerPose = MarkerPose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

impl Default for MarkerPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One marker as reported by a detector during a single frame.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct MarkerObservation {
    pub payload: MarkerPayload,
    /// Edge length in meters, either estimated by the runtime or the configured length.
    pub length: Option<f32>,
    /// `None` until the runtime has a valid pose for the marker.
    pub pose: Option<MarkerPose>,
}

impl MarkerObservation {
    pub fn aruco(number: u64, length: f32, pose: Option<MarkerPose>) -> Self {
        Self {
            payload: MarkerPayload::Aruco(number),
            length: Some(length),
            pose,
        }
    }

    pub fn qr(text: impl Into<String>, length: f32, pose: Option<MarkerPose>) -> Self {
        Self {
            payload: MarkerPayload::Qr(text.into()),
            length: Some(length),
            pose,
        }
    }

    pub fn upca(code: impl Into<String>) -> Self {
        Self {
            payload: MarkerPayload::Upca(code.into()),
            length: None,
            pose: None,
        }
    }

    pub fn kind(&self) -> MarkerKind {
        self.payload.kind()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum MarkerDetectorStatus {
    /// The runtime is still setting the detector up.
    Pending,
    /// The detector produces data every update.
    Ready,
    Error,
}
