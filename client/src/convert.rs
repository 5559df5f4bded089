//! Bevy (`glam`) <-> nalgebra conversions at the scene boundary.

use bevy::prelude::*;
use nalgebra as na;
use shared::types::{AnchorPose, Point3};

pub fn to_na_vec(v: Vec3) -> na::Vector3<f32> {
    na::Vector3::new(v.x, v.y, v.z)
}

pub fn to_na_point(v: Vec3) -> Point3 {
    Point3::new(v.x, v.y, v.z)
}

pub fn to_bevy_vec(v: &na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_bevy_point(p: &Point3) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

pub fn to_bevy_transform(iso: &na::Isometry3<f32>) -> Transform {
    let q = iso.rotation.quaternion();
    Transform {
        translation: to_bevy_vec(&iso.translation.vector),
        rotation: Quat::from_xyzw(q.i, q.j, q.k, q.w),
        scale: Vec3::ONE,
    }
}

pub fn to_na_rotation(rot: Quat) -> na::UnitQuaternion<f32> {
    na::UnitQuaternion::from_quaternion(na::Quaternion::new(rot.w, rot.x, rot.y, rot.z))
}

/// Anchor pose from a tracked entity; forward is Bevy's -Z.
pub fn anchor_pose(transform: &GlobalTransform) -> Option<AnchorPose> {
    AnchorPose::new(
        to_na_point(transform.translation()),
        to_na_vec(transform.forward().as_vec3()),
    )
}
