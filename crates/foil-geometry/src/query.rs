//! Parameter searches on fitted ordinate curves.

use foil_core::{FoilError, Result, Tolerance};

use crate::curve::SplineCurve;
use crate::solve::{brent_minimize, brent_root};

/// Closed parameter interval `(lo, hi)` searched by a query.
pub type Bracket = (f64, f64);

/// The whole parameter domain.
pub const FULL_BRACKET: Bracket = (0.0, 1.0);

/// Reject brackets that leave `[0, 1]` or are empty.
pub fn check_bracket(bracket: Bracket) -> Result<Bracket> {
    let (lo, hi) = bracket;
    for end in [lo, hi] {
        if !(0.0..=1.0).contains(&end) {
            return Err(FoilError::ParameterOutOfRange(end));
        }
    }
    if lo >= hi {
        return Err(FoilError::InvalidOperand(format!(
            "empty bracket [{}, {}]",
            lo, hi
        )));
    }
    Ok(bracket)
}

/// Parameter in `bracket` where the tangent is horizontal.
///
/// Minimizes the squared slope, so the curve is expected to have a single
/// horizontal tangent inside the bracket. A vertical tangent counts as the
/// largest possible slope.
pub fn find_zero_slope(curve: &SplineCurve, bracket: Bracket, tol: &Tolerance) -> Result<f64> {
    let (lo, hi) = check_bracket(bracket)?;
    brent_minimize(
        |u| {
            let slope = curve.slope(u)?;
            let squared = slope * slope;
            Ok(if squared.is_finite() { squared } else { f64::MAX })
        },
        lo,
        hi,
        tol,
    )
}

/// Angle in degrees between the normal at `u` and the x-axis, in `[0, 90]`.
pub fn normal_angle(curve: &SplineCurve, u: f64) -> Result<f64> {
    let n = curve.normal(u)?;
    Ok((n.y / n.x).abs().atan().to_degrees())
}

/// Parameter in `bracket` where the normal makes `target_deg` with the x-axis.
///
/// Fails with [`FoilError::NoBracketingRoot`] when the angle does not cross
/// the target between the bracket ends.
pub fn find_angle_match(
    curve: &SplineCurve,
    target_deg: f64,
    bracket: Bracket,
    tol: &Tolerance,
) -> Result<f64> {
    let (lo, hi) = check_bracket(bracket)?;
    brent_root(|u| Ok(normal_angle(curve, u)? - target_deg), lo, hi, tol)
}
