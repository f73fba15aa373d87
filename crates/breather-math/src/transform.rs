use crate::{DMat3, DMat4, Mat3Cols, Mat4Cols, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Affine transform stored as a column-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Rotation about the +X axis by `angle` radians.
    pub fn from_rotation_x(angle: f64) -> Self {
        Self::from_mat4(DMat4::from_rotation_x(angle))
    }

    /// Rotation about the +Y axis by `angle` radians.
    pub fn from_rotation_y(angle: f64) -> Self {
        Self::from_mat4(DMat4::from_rotation_y(angle))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    /// `self * other`: `other` is applied first.
    pub fn compose(&self, other: &Transform) -> Transform {
        Self::from_mat4(self.to_mat4() * other.to_mat4())
    }

    /// Inverse-transpose of the upper 3x3 block, for transforming normals.
    /// Falls back to the plain 3x3 block when it is singular.
    pub fn normal_matrix(&self) -> DMat3 {
        let m = DMat3::from_mat4(self.to_mat4());
        if m.determinant().abs() < 1e-15 {
            m
        } else {
            m.inverse().transpose()
        }
    }

    pub fn to_cols_f32(&self) -> Mat4Cols {
        self.to_mat4().as_mat4().to_cols_array_2d()
    }

    pub fn normal_matrix_f32(&self) -> Mat3Cols {
        self.normal_matrix().as_mat3().to_cols_array_2d()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::dvec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        let p = dvec3(1.0, 2.0, 3.0);
        let result = t.transform_point(p);
        assert!((result - p).length() < 1e-10);
    }

    #[test]
    fn test_translation() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let p = dvec3(1.0, 2.0, 3.0);
        let result = t.transform_point(p);
        assert!((result - dvec3(11.0, 22.0, 33.0)).length() < 1e-10);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let t = Transform::from_rotation_y(FRAC_PI_2);
        let p = t.transform_point(dvec3(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_applies_right_first() {
        let translate = Transform::from_translation(dvec3(0.0, 0.0, -5.0));
        let rotate = Transform::from_rotation_y(FRAC_PI_2);
        let p = translate.compose(&rotate).transform_point(dvec3(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p.z, -6.0, epsilon = 1e-12);
        let q = rotate.compose(&translate).transform_point(dvec3(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(q.z, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.x, -5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_matrix_of_rigid_transform_is_rotation() {
        let t = Transform::from_translation(dvec3(0.0, 0.0, -50.0))
            .compose(&Transform::from_rotation_x(0.3));
        let n = t.normal_matrix();
        let expected = DMat3::from_rotation_x(0.3);
        for (a, b) in n.to_cols_array().iter().zip(expected.to_cols_array().iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}
