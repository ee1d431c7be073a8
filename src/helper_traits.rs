//! Conversions between OpenXR pose types and [`MarkerPose`], for runtimes that report raw
//! `XrPosef` values.
use bevy::math::{Quat, Vec3};

use crate::types::MarkerPose;

pub trait ToPosef {
    fn to_posef(&self) -> openxr::Posef;
}
pub trait ToMarkerPose {
    fn to_marker_pose(&self) -> MarkerPose;
}
pub trait ToQuat {
    fn to_quat(&self) -> Quat;
}
pub trait ToVec3 {
    fn to_vec3(&self) -> Vec3;
}

impl ToMarkerPose for openxr::Posef {
    fn to_marker_pose(&self) -> MarkerPose {
        MarkerPose {
            position: self.position.to_vec3(),
            rotation: self.orientation.to_quat(),
        }
    }
}
impl ToPosef for MarkerPose {
    fn to_posef(&self) -> openxr::Posef {
        openxr::Posef {
            orientation: openxr::Quaternionf {
                x: self.rotation.x,
                y: self.rotation.y,
                z: self.rotation.z,
                w: self.rotation.w,
            },
            position: openxr::Vector3f {
                x: self.position.x,
                y: self.position.y,
                z: self.position.z,
            },
        }
    }
}

impl ToQuat for openxr::Quaternionf {
    /// Runtimes report an all zero orientation for untracked poses, that maps to identity.
    fn to_quat(&self) -> Quat {
        let mut quat = Quat::from_xyzw(self.x, self.y, self.z, self.w);
        if quat.length() == 0.0 {
            quat = Quat::IDENTITY;
        }
        if !quat.is_normalized() {
            quat = quat.normalize();
        }
        quat
    }
}
impl ToVec3 for openxr::Vector3f {
    fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
