//! De Boor evaluation of B-spline curves and their derivatives.

use foil_math::DVec3;

use super::knot::{basis_functions, ders_basis_functions, find_span};

/// Evaluate a B-spline curve point at parameter `t`.
pub fn curve_point(degree: usize, knots: &[f64], control_points: &[DVec3], t: f64) -> DVec3 {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let basis = basis_functions(degree, knots, span, t);

    let mut point = DVec3::ZERO;
    for i in 0..=degree {
        point += basis[i] * control_points[span - degree + i];
    }

    point
}

/// Evaluate the curve point and its derivatives up to order `n` at parameter `t`.
///
/// Entry `k` of the result is the `k`-th derivative; entry 0 is the point itself.
pub fn curve_derivs(
    degree: usize,
    knots: &[f64],
    control_points: &[DVec3],
    t: f64,
    n: usize,
) -> Vec<DVec3> {
    let last = control_points.len() - 1;
    let span = find_span(degree, knots, last, t);
    let ders = ders_basis_functions(degree, knots, span, t, n);

    let mut ck = vec![DVec3::ZERO; n + 1];
    for (k, row) in ders.iter().enumerate().take(n.min(degree) + 1) {
        for (j, &b) in row.iter().enumerate() {
            ck[k] += b * control_points[span - degree + j];
        }
    }

    ck
}
