//! Transform composition helpers.
//!
//! Every function takes a base matrix and returns `base * op`, so the new
//! operation is applied in the base's local space. All angles are radians.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Which construction `rotate` uses for Euler angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EulerPath {
    /// Three elementary rotation matrices multiplied together.
    #[default]
    Matrix,
    /// A quaternion built from half-angles, converted to a matrix.
    Quaternion,
}

pub fn translate(offset: Vec3, base: Mat4) -> Mat4 {
    base * Mat4::from_translation(offset)
}

pub fn scale(factors: Vec3, base: Mat4) -> Mat4 {
    base * Mat4::from_scale(factors)
}

/// Rotates `base` by `angle` radians about `axis`. The axis does not need to be
/// unit length but must be non-zero.
pub fn rotate_around(angle: f32, axis: Vec3, base: Mat4) -> Mat4 {
    base * Mat4::from_axis_angle(axis.normalize(), angle)
}

pub fn rotate_around_degrees(degrees: f32, axis: Vec3, base: Mat4) -> Mat4 {
    rotate_around(degrees.to_radians(), axis, base)
}

/// Rotates `base` by Euler angles packed as `(yaw, pitch, roll)`.
///
/// Yaw turns about +Y, pitch about +X and roll about +Z. The combined rotation
/// is `roll * pitch * yaw`, so yaw is applied to a vector first.
pub fn rotate(eulers: Vec3, path: EulerPath, base: Mat4) -> Mat4 {
    let rotation = match path {
        EulerPath::Matrix => euler_matrix(eulers),
        EulerPath::Quaternion => quaternion_matrix(euler_quaternion(eulers)),
    };
    base * Mat4::from_mat3(rotation)
}

fn euler_matrix(eulers: Vec3) -> Mat3 {
    let (sy, cy) = eulers.x.sin_cos();
    let (sp, cp) = eulers.y.sin_cos();
    let (sr, cr) = eulers.z.sin_cos();

    let yaw = Mat3::from_cols(
        Vec3::new(cy, 0.0, -sy),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(sy, 0.0, cy),
    );
    let pitch = Mat3::from_cols(
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, cp, sp),
        Vec3::new(0.0, -sp, cp),
    );
    let roll = Mat3::from_cols(
        Vec3::new(cr, sr, 0.0),
        Vec3::new(-sr, cr, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    );

    roll * pitch * yaw
}

/// Closed-form quaternion for `(yaw, pitch, roll)` with the same axis order as
/// [`rotate`].
pub fn euler_quaternion(eulers: Vec3) -> Quat {
    let (s1, c1) = (eulers.x * 0.5).sin_cos();
    let (s2, c2) = (eulers.y * 0.5).sin_cos();
    let (s3, c3) = (eulers.z * 0.5).sin_cos();

    let w = c1 * c2 * c3 - s1 * s2 * s3;
    let x = c1 * s2 * c3 - s1 * c2 * s3;
    let y = s1 * c2 * c3 + c1 * s2 * s3;
    let z = s1 * s2 * c3 + c1 * c2 * s3;

    Quat::from_xyzw(x, y, z, w)
}

fn quaternion_matrix(q: Quat) -> Mat3 {
    let (w, x, y, z) = (q.w, q.x, q.y, q.z);

    Mat3::from_cols(
        Vec3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y + w * z),
            2.0 * (x * z - w * y),
        ),
        Vec3::new(
            2.0 * (x * y - w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z + w * x),
        ),
        Vec3::new(
            2.0 * (x * z + w * y),
            2.0 * (y * z - w * x),
            1.0 - 2.0 * (x * x + y * y),
        ),
    )
}
