//! Directions and displacements.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use foil_core::{FoilError, Result};
use serde::{Deserialize, Serialize};

use crate::{DVec3, Transform};

/// A direction or displacement. Unlike [`Point3`](crate::Point3) it carries no location,
/// which is what allows a point to be translated by it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn to_dvec3(self) -> DVec3 {
        self.into()
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.to_dvec3().dot(other.to_dvec3())
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        self.to_dvec3().cross(other.to_dvec3()).into()
    }

    /// Largest absolute component.
    fn max_abs_component(&self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Components divided by `scale`, leaving the largest of them at unit size.
    fn scaled_down(&self, scale: f64) -> Vector3 {
        Self::new(self.x / scale, self.y / scale, self.z / scale)
    }

    /// Euclidean length, free of intermediate overflow and underflow.
    pub fn magnitude(&self) -> f64 {
        let scale = self.max_abs_component();
        if scale == 0.0 || scale.is_infinite() {
            return scale;
        }
        scale * self.scaled_down(scale).to_dvec3().length()
    }

    /// Unit vector in the same direction. Fails only when the magnitude is exactly zero.
    pub fn normalize(&self) -> Result<Vector3> {
        let scale = self.max_abs_component();
        if scale == 0.0 {
            return Err(FoilError::DegenerateVector);
        }
        let w = self.scaled_down(scale);
        let len = w.to_dvec3().length();
        Ok(w.scaled_down(len))
    }

    /// Euclidean distance between the tips of two position vectors.
    pub fn distance(&self, other: &Vector3) -> f64 {
        (*other - *self).magnitude()
    }

    pub fn translate(&self, vector: Vector3) -> Vector3 {
        *self + vector
    }

    /// Rotate about the z-axis, counter-clockwise for positive `angle_deg`.
    pub fn rotate(&self, angle_deg: f64) -> Vector3 {
        if angle_deg == 0.0 {
            return *self;
        }
        Transform::rotation_z(angle_deg).transform_vector(*self)
    }
}

impl_components!(Vector3);

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}
