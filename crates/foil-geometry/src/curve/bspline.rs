//! Non-rational B-spline curves.

use foil_math::{DVec3, Point3, Vector3};

use super::Curve;
use crate::nurbs::deboor;

/// A B-spline curve defined by degree, knot vector, and control points.
#[derive(Debug, Clone)]
pub struct BSplineCurve {
    pub degree: usize,
    pub knots: Vec<f64>,
    pub control_points: Vec<DVec3>,
}

impl BSplineCurve {
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<DVec3>) -> Self {
        debug_assert!(
            knots.len() == control_points.len() + degree + 1,
            "Knot vector length must be n + p + 1, got {} knots for {} CPs with degree {}",
            knots.len(),
            control_points.len(),
            degree
        );
        Self {
            degree,
            knots,
            control_points,
        }
    }

    /// Point and first two derivatives at `t`.
    pub fn derivs_at(&self, t: f64) -> [DVec3; 3] {
        let d = deboor::curve_derivs(self.degree, &self.knots, &self.control_points, t, 2);
        [d[0], d[1], d[2]]
    }
}

impl Curve for BSplineCurve {
    fn point_at(&self, t: f64) -> Point3 {
        deboor::curve_point(self.degree, &self.knots, &self.control_points, t).into()
    }

    fn derivative_at(&self, t: f64) -> Vector3 {
        self.derivs_at(t)[1].into()
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        self.derivs_at(t)[2].into()
    }

    fn domain(&self) -> (f64, f64) {
        let p = self.degree;
        (self.knots[p], self.knots[self.knots.len() - p - 1])
    }
}
