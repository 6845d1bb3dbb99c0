//! Line segment curve.

use foil_math::{Point3, Vector3};

use super::Curve;

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vector3 {
        self.end - self.start
    }

    /// Orthogonal projection of `point` onto the infinite line carrying this segment.
    ///
    /// A degenerate segment projects everything onto `start`.
    pub fn project_point(&self, point: Point3) -> Point3 {
        let d = self.direction();
        let len_sq = d.dot(&d);
        if len_sq == 0.0 {
            return self.start;
        }
        let t = (point - self.start).dot(&d) / len_sq;
        self.start.translate(d * t)
    }
}

impl Curve for Line {
    fn point_at(&self, t: f64) -> Point3 {
        self.start.translate(self.direction() * t)
    }

    fn derivative_at(&self, _t: f64) -> Vector3 {
        self.direction()
    }

    fn second_derivative_at(&self, _t: f64) -> Vector3 {
        Vector3::ZERO
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}
