//! Interpolating spline through an ordered ordinate sequence.

use std::sync::OnceLock;

use foil_core::{FoilError, Result};
use foil_math::{DVec3, Point3, Vector3};
use tracing::debug;

use super::{BSplineCurve, Curve};
use crate::nurbs;
use crate::tessellate;

/// The fixed out-of-plane axis used to turn tangents into normals.
const INTO_PLANE: Vector3 = Vector3::new(0.0, 0.0, -1.0);

/// A smooth curve through ordered ordinates, parameterized over `u ∈ [0, 1]`.
///
/// `u = 0` is the first ordinate and `u = 1` the last. The interpolating
/// B-spline passes through every ordinate. It is fitted on first query,
/// exactly once per instance, and read without locking afterwards.
#[derive(Debug)]
pub struct SplineCurve {
    ordinates: Vec<Point3>,
    degree: usize,
    fit: OnceLock<std::result::Result<BSplineCurve, String>>,
}

impl SplineCurve {
    pub const DEFAULT_DEGREE: usize = 3;

    /// Validate `ordinates` for a degree-`degree` fit. The fit itself is deferred.
    pub fn new(ordinates: Vec<Point3>, degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(FoilError::CurveFit("degree must be at least 1".into()));
        }
        if ordinates.len() < degree + 1 {
            return Err(FoilError::CurveFit(format!(
                "need at least {} ordinates for a degree-{} fit, got {}",
                degree + 1,
                degree,
                ordinates.len()
            )));
        }
        if let Some(bad) = ordinates.iter().find(|p| !p.is_finite()) {
            return Err(FoilError::CurveFit(format!("non-finite ordinate {}", bad)));
        }
        for (i, pair) in ordinates.windows(2).enumerate() {
            if pair[0].x == pair[1].x && pair[0].y == pair[1].y {
                return Err(FoilError::CurveFit(format!(
                    "ordinates {} and {} coincide at {}",
                    i,
                    i + 1,
                    pair[0]
                )));
            }
        }

        Ok(Self {
            ordinates,
            degree,
            fit: OnceLock::new(),
        })
    }

    pub fn cubic(ordinates: Vec<Point3>) -> Result<Self> {
        Self::new(ordinates, Self::DEFAULT_DEGREE)
    }

    pub fn ordinates(&self) -> &[Point3] {
        &self.ordinates
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn is_fitted(&self) -> bool {
        self.fit.get().is_some()
    }

    /// The fitted B-spline, computed on first access.
    pub fn spline(&self) -> Result<&BSplineCurve> {
        self.fit
            .get_or_init(|| self.compute_fit())
            .as_ref()
            .map_err(|reason| FoilError::CurveFit(reason.clone()))
    }

    fn compute_fit(&self) -> std::result::Result<BSplineCurve, String> {
        let points: Vec<DVec3> = self.ordinates.iter().map(|p| p.to_dvec3()).collect();
        match nurbs::interpolate(&points, self.degree) {
            Ok(spline) => {
                debug!(
                    "Fitted degree-{} spline through {} ordinates",
                    self.degree,
                    points.len()
                );
                Ok(spline)
            }
            Err(FoilError::CurveFit(reason)) => Err(reason),
            Err(other) => Err(other.to_string()),
        }
    }

    pub fn point_at_parameter(&self, u: f64) -> Result<Point3> {
        let u = check_parameter(u)?;
        Ok(self.spline()?.point_at(u))
    }

    /// First derivative with respect to `u`.
    pub fn derivative(&self, u: f64) -> Result<Vector3> {
        let u = check_parameter(u)?;
        Ok(self.spline()?.derivative_at(u))
    }

    pub fn second_derivative(&self, u: f64) -> Result<Vector3> {
        let u = check_parameter(u)?;
        Ok(self.spline()?.second_derivative_at(u))
    }

    /// Unit tangent at `u`.
    pub fn tangent(&self, u: f64) -> Result<Vector3> {
        self.derivative(u)?.normalize()
    }

    /// Unit normal at `u`: the tangent turned 90° counter-clockwise.
    pub fn normal(&self, u: f64) -> Result<Vector3> {
        self.tangent(u)?.cross(&INTO_PLANE).normalize()
    }

    /// Slope dy/dx of the curve at `u`. Infinite where the tangent is vertical.
    pub fn slope(&self, u: f64) -> Result<f64> {
        let d = self.derivative(u)?;
        Ok(d.y / d.x)
    }

    /// Signed curvature at `u`, positive when the curve turns counter-clockwise.
    pub fn curvature(&self, u: f64) -> Result<f64> {
        let u = check_parameter(u)?;
        let [_, d1, d2] = self.spline()?.derivs_at(u);
        let speed_sq = d1.x * d1.x + d1.y * d1.y;
        if speed_sq == 0.0 {
            return Err(FoilError::DegenerateVector);
        }
        Ok((d1.x * d2.y - d1.y * d2.x) / speed_sq.powf(1.5))
    }

    /// Radius of the osculating circle at `u`. Infinite on straight stretches.
    pub fn radius_of_curvature(&self, u: f64) -> Result<f64> {
        Ok(1.0 / self.curvature(u)?.abs())
    }

    /// Center of the osculating circle at `u`.
    pub fn curvature_center(&self, u: f64) -> Result<Point3> {
        let kappa = self.curvature(u)?;
        if kappa == 0.0 {
            return Err(FoilError::Geometry(format!(
                "curve is straight at u = {}, no curvature center",
                u
            )));
        }
        let p = self.point_at_parameter(u)?;
        Ok(p.translate(self.normal(u)? * (1.0 / kappa)))
    }

    /// Adaptive polyline through the curve with at most `tolerance` chord deviation.
    pub fn polyline(&self, tolerance: f64) -> Result<Vec<Point3>> {
        Ok(tessellate::curve_to_polyline(self.spline()?, tolerance))
    }

    /// `count` points at evenly spaced parameters, both ends included.
    pub fn sample_uniform(&self, count: usize) -> Result<Vec<Point3>> {
        Ok(tessellate::sample_uniform(self.spline()?, count))
    }
}

fn check_parameter(u: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&u) {
        Ok(u)
    } else {
        Err(FoilError::ParameterOutOfRange(u))
    }
}
