use crate::{DMat4, DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid body transform (rotation + translation, no shear/scale).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    /// Rotation about the z-axis through the origin, counter-clockwise for positive angles.
    pub fn rotation_z(angle_deg: f64) -> Self {
        Self::from_mat4(DMat4::from_rotation_z(angle_deg.to_radians()))
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
        self.to_mat4().transform_point3(DVec3::from(p)).into()
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(DVec3::from(v)).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotation_keeps_z() {
        let p = Transform::rotation_z(45.0).transform_point(Point3::new(1.0, 0.0, 2.0));
        assert!((p.z - 2.0).abs() < 1e-12);
        assert!((p.x - p.y).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_there_and_back() {
        let p = Point3::xy(0.75, 0.04);
        let there = Transform::rotation_z(-2.31).transform_point(p);
        let back = Transform::rotation_z(2.31).transform_point(there);
        assert_abs_diff_eq!(back, p, epsilon = 1e-12);
    }

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Transform::from_mat4(DMat4::from_translation(DVec3::new(10.0, 20.0, 30.0)));
        let p = t.transform_point(Point3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(p, Point3::new(11.0, 22.0, 33.0), epsilon = 1e-10);

        let v = t.transform_vector(Vector3::X);
        assert_abs_diff_eq!(v, Vector3::X, epsilon = 1e-10);
    }
}
