//! Locations in model space.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use foil_core::{FoilError, Result};
use serde::{Deserialize, Serialize};

use crate::{DVec3, Transform, Vector3};

/// A location in 3D space. Planar airfoil work keeps `z = 0`, but it is always carried.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point on the XY plane.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Build a point from a raw coordinate row of 2 (`x y`) or 3 (`x y z`) finite values.
    pub fn try_from_slice(coords: &[f64]) -> Result<Self> {
        let point = match *coords {
            [x, y] => Self::xy(x, y),
            [x, y, z] => Self::new(x, y, z),
            _ => {
                return Err(FoilError::InvalidOperand(format!(
                    "expected 2 or 3 coordinates, got {}",
                    coords.len()
                )))
            }
        };
        if !point.is_finite() {
            return Err(FoilError::InvalidOperand(format!(
                "non-finite coordinate in {}",
                point
            )));
        }
        Ok(point)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_dvec3(self) -> DVec3 {
        self.into()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point3) -> f64 {
        (*other - *self).magnitude()
    }

    /// Rotate about the z-axis through the origin, counter-clockwise for positive `angle_deg`.
    pub fn rotate(&self, angle_deg: f64) -> Point3 {
        if angle_deg == 0.0 {
            return *self;
        }
        Transform::rotation_z(angle_deg).transform_point(*self)
    }

    pub fn translate(&self, vector: Vector3) -> Point3 {
        Self::new(self.x + vector.x, self.y + vector.y, self.z + vector.z)
    }
}

impl_components!(Point3);

impl Neg for Point3 {
    type Output = Point3;

    fn neg(self) -> Point3 {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Sub for Point3 {
    type Output = Vector3;

    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vector3) -> Point3 {
        self.translate(rhs)
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Vector3) -> Point3 {
        self.translate(-rhs)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point3({}, {}, {})", self.x, self.y, self.z)
    }
}
