//! Global B-spline interpolation through an ordered point sequence.

use foil_core::{FoilError, Result};
use foil_math::DVec3;
use nalgebra::DMatrix;

use super::knot::{basis_functions, find_span};
use crate::curve::BSplineCurve;

/// Chord-length parameterization of `points`, normalized to `[0, 1]`.
///
/// Parameters are strictly increasing as long as no two consecutive points coincide.
pub fn chord_length_parameters(points: &[DVec3]) -> Result<Vec<f64>> {
    let mut params = Vec::with_capacity(points.len());
    params.push(0.0);

    let mut total = 0.0;
    for window in points.windows(2) {
        total += (window[1] - window[0]).length();
        params.push(total);
    }

    if total <= 0.0 || !total.is_finite() {
        return Err(FoilError::CurveFit("zero total chord length".into()));
    }

    for param in &mut params {
        *param /= total;
    }
    if let Some(last) = params.last_mut() {
        *last = 1.0;
    }

    Ok(params)
}

/// Clamped knot vector from the averaging method.
///
/// For a degree-p B-spline through points at parameters t_0 ... t_n the
/// interior knots are u_{j+p} = (t_j + ... + t_{j+p-1}) / p for j = 1 ... n-p.
pub fn averaging_knot_vector(params: &[f64], degree: usize) -> Vec<f64> {
    let n = params.len() - 1;
    let p = degree;

    let mut knots = Vec::with_capacity(n + p + 2);
    knots.extend(std::iter::repeat(0.0).take(p + 1));

    for j in 1..=(n - p) {
        let sum: f64 = params[j..j + p].iter().sum();
        knots.push(sum / p as f64);
    }

    knots.extend(std::iter::repeat(1.0).take(p + 1));
    knots
}

/// Interpolate a degree-`degree` B-spline through the (x, y) coordinates of `points`.
///
/// z is ignored and the resulting control points lie on the XY plane. The curve
/// passes through every point exactly: `C(t_k) = Q_k` where `t_k` are the
/// chord-length parameters.
pub fn interpolate(points: &[DVec3], degree: usize) -> Result<BSplineCurve> {
    let p = degree;
    if p == 0 {
        return Err(FoilError::CurveFit("degree must be at least 1".into()));
    }
    if points.len() < p + 1 {
        return Err(FoilError::CurveFit(format!(
            "need at least {} points for a degree-{} fit, got {}",
            p + 1,
            p,
            points.len()
        )));
    }

    let planar: Vec<DVec3> = points.iter().map(|q| DVec3::new(q.x, q.y, 0.0)).collect();
    let params = chord_length_parameters(&planar)?;
    let knots = averaging_knot_vector(&params, p);

    let n = planar.len() - 1;
    let size = n + 1;

    // Collocation matrix N[k][i] = N_{i,p}(t_k), banded with bandwidth p + 1
    let mut collocation = DMatrix::<f64>::zeros(size, size);
    for (k, &t) in params.iter().enumerate() {
        let span = find_span(p, &knots, n, t);
        let basis = basis_functions(p, &knots, span, t);
        for (j, &value) in basis.iter().enumerate() {
            collocation[(k, span - p + j)] = value;
        }
    }

    let mut rhs = DMatrix::<f64>::zeros(size, 2);
    for (k, q) in planar.iter().enumerate() {
        rhs[(k, 0)] = q.x;
        rhs[(k, 1)] = q.y;
    }

    let solution = collocation
        .lu()
        .solve(&rhs)
        .ok_or_else(|| FoilError::CurveFit("singular interpolation system".into()))?;

    let control_points: Vec<DVec3> = (0..size)
        .map(|i| DVec3::new(solution[(i, 0)], solution[(i, 1)], 0.0))
        .collect();

    if control_points.iter().any(|cp| !cp.is_finite()) {
        return Err(FoilError::CurveFit(
            "interpolation produced non-finite control points".into(),
        ));
    }

    Ok(BSplineCurve::new(p, knots, control_points))
}
