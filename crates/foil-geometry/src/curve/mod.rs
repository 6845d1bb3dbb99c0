//! Curve traits and implementations.

mod bspline;
mod line;
mod spline;

use foil_math::{Point3, Vector3};

pub use bspline::BSplineCurve;
pub use line::Line;
pub use spline::SplineCurve;

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// First derivative with respect to `t` (not normalized).
    fn derivative_at(&self, t: f64) -> Vector3;

    /// Second derivative with respect to `t`.
    fn second_derivative_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);
}
