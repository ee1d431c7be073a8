use bevy::math::{Quat, Vec3};
use bevy::transform::components::Transform;

use crate::types::MarkerPose;

/// Prefabs are authored with their up axis along the marker normal, so every placed marker
/// gets rotated -90 degrees around its local X axis.
pub const MARKER_ROTATION_CORRECTION: Quat = Quat::from_xyzw(-0.70710677, 0.0, 0.0, 0.70710677);

/// Places `current` at a marker pose given relative to `origin`, and scales it to `size`.
///
/// The scale is only written when the x scale differs from `size`. Estimated sizes are noisy
/// for the first few frames, so objects may resize a couple of times before settling.
pub fn apply_marker_pose(
    current: Transform,
    origin: &Transform,
    pose: &MarkerPose,
    size: f32,
) -> Transform {
    let mut transform = current;
    transform.translation = origin.transform_point(pose.position);
    transform.rotation = origin.rotation * pose.rotation * MARKER_ROTATION_CORRECTION;
    if transform.scale.x != size {
        transform.scale = Vec3::splat(size);
    }
    transform
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn correction_constant_matches_axis_angle() {
        let rebuilt = Quat::from_rotation_x(-FRAC_PI_2);
        assert!(MARKER_ROTATION_CORRECTION.abs_diff_eq(rebuilt, 1e-6));
        assert!(MARKER_ROTATION_CORRECTION.is_normalized());
    }

    #[test]
    fn identity_origin_and_pose_only_applies_correction() {
        let placed = apply_marker_pose(
            Transform::IDENTITY,
            &Transform::IDENTITY,
            &MarkerPose::IDENTITY,
            0.05,
        );
        assert_eq!(placed.rotation, MARKER_ROTATION_CORRECTION);
        assert_eq!(placed.translation, Vec3::ZERO);
        assert_eq!(placed.scale, Vec3::splat(0.05));
    }

    #[test]
    fn position_goes_through_origin_transform() {
        let origin = Transform::from_xyz(1.0, 2.0, 3.0)
            .with_rotation(Quat::from_rotation_y(FRAC_PI_2))
            .with_scale(Vec3::splat(2.0));
        let pose = MarkerPose::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY);
        let placed = apply_marker_pose(Transform::IDENTITY, &origin, &pose, 0.1);
        // scaled to (2, 0, 0), rotated onto -z, then offset by the origin
        assert!(placed
            .translation
            .abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), 1e-5));
        assert!(placed
            .rotation
            .abs_diff_eq(origin.rotation * MARKER_ROTATION_CORRECTION, 1e-6));
    }

    #[test]
    fn scale_is_left_alone_when_it_matches() {
        let current = Transform::from_scale(Vec3::new(0.2, 0.5, 0.7));
        let placed = apply_marker_pose(current, &Transform::IDENTITY, &MarkerPose::IDENTITY, 0.2);
        assert_eq!(placed.scale, Vec3::new(0.2, 0.5, 0.7));

        let placed = apply_marker_pose(current, &Transform::IDENTITY, &MarkerPose::IDENTITY, 0.3);
        assert_eq!(placed.scale, Vec3::splat(0.3));
    }
}
