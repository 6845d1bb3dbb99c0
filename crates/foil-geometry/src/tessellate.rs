//! Discretization of curves into point lists for plotting and file output.

use foil_math::Point3;

use crate::curve::Curve;

/// Convert a curve to a polyline using adaptive subdivision.
///
/// The algorithm recursively subdivides segments where the midpoint deviation
/// from the chord exceeds the given `tolerance`.
///
/// # Arguments
/// * `curve` - The curve to tessellate
/// * `tolerance` - Maximum allowed deviation from the true curve
///
/// # Returns
/// A vector of points approximating the curve.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let mut points = Vec::new();
    points.push(curve.point_at(t_min));
    subdivide_curve(curve, t_min, t_max, tolerance, &mut points, 0);
    points
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Closed loops and S-shapes have midpoints on their chord, so a few levels are always split.
const MIN_DEPTH: u32 = 2;

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    if depth >= MAX_DEPTH {
        points.push(curve.point_at(t1));
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p1 = curve.point_at(t1);
    let p_mid = curve.point_at(t_mid);

    // Chord midpoint
    let chord_mid = p0.translate((p1 - p0) * 0.5);
    let deviation = p_mid.distance(&chord_mid);

    if depth < MIN_DEPTH || deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}

/// Evaluate `count` points at evenly spaced parameters over the curve domain.
pub fn sample_uniform(curve: &dyn Curve, count: usize) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    match count {
        0 => Vec::new(),
        1 => vec![curve.point_at(t_min)],
        _ => (0..count)
            .map(|i| {
                let t = t_min + (t_max - t_min) * i as f64 / (count - 1) as f64;
                curve.point_at(t)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{BSplineCurve, Line};
    use foil_math::DVec3;

    #[test]
    fn test_curve_to_polyline_line() {
        let line = Line::new(Point3::ORIGIN, Point3::xy(10.0, 0.0));
        let points = curve_to_polyline(&line, 0.01);
        // Only the forced minimum subdivision: 2^MIN_DEPTH segments
        assert_eq!(points.len(), 5);
        assert!(points[0].distance(&Point3::ORIGIN) < 1e-10);
        assert!(points[4].distance(&Point3::xy(10.0, 0.0)) < 1e-10);
    }

    #[test]
    fn test_curve_to_polyline_closed_loop() {
        // Closed quadratic loop: start == end, midpoint far from the (zero-length) chord
        let curve = BSplineCurve::new(
            2,
            vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0],
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(-1.0, 1.0, 0.0),
                DVec3::new(0.0, 0.0, 0.0),
            ],
        );
        let points = curve_to_polyline(&curve, 1e-3);
        assert!(points.len() > 10, "got {} points", points.len());
        assert!(points[0].distance(points.last().unwrap()) < 1e-12);
    }

    #[test]
    fn test_sample_uniform() {
        let line = Line::new(Point3::ORIGIN, Point3::xy(1.0, 0.0));
        let pts = sample_uniform(&line, 5);
        assert_eq!(pts.len(), 5);
        assert!((pts[2].x - 0.5).abs() < 1e-12);
        assert!(sample_uniform(&line, 0).is_empty());
        assert_eq!(sample_uniform(&line, 1), vec![Point3::ORIGIN]);
    }
}
