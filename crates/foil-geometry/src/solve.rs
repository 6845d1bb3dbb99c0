//! Bounded scalar solvers over a parameter interval.
//!
//! Both solvers take a fallible objective so that evaluation errors (for
//! example a curve query outside its domain) propagate unchanged.

use foil_core::{FoilError, Result, Tolerance};
use tracing::debug;

/// Find a root of `f` in `[lower, upper]` with Brent's method.
///
/// `f(lower)` and `f(upper)` must have opposite signs (or one of them be zero),
/// otherwise the search fails with [`FoilError::NoBracketingRoot`]. The result
/// is within `tol.parameter` of a sign change of `f`.
pub fn brent_root<F>(f: F, lower: f64, upper: f64, tol: &Tolerance) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    let mut a = lower;
    let mut b = upper;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    // Compare signs, the product of tiny values underflows. NaN never brackets.
    if fa.is_nan() || fb.is_nan() || (fa > 0.0) == (fb > 0.0) {
        return Err(FoilError::NoBracketingRoot {
            lower,
            upper,
            f_lower: fa,
            f_upper: fb,
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..tol.max_iterations {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * tol.parameter;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            debug!("Root at {} after {} iterations", b, iteration);
            return Ok(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // Inverse quadratic interpolation, secant when only two points are distinct
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let qa = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * qa * (qa - r) - (b - a) * (r - 1.0)),
                    (qa - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol1 { d } else { tol1.copysign(xm) };
        fb = f(b)?;
    }

    Err(FoilError::ConvergenceFailure {
        iterations: tol.max_iterations,
        estimate: b,
    })
}

/// Find the minimizer of `f` over the open interval `(lower, upper)`.
///
/// Golden-section search accelerated by successive parabolic interpolation.
/// The interval ends themselves are never evaluated. Converges to a local
/// minimum within `tol.parameter`.
pub fn brent_minimize<F>(f: F, lower: f64, upper: f64, tol: &Tolerance) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    let sqrt_eps = f64::EPSILON.sqrt();
    let golden_mean = 0.5 * (3.0 - 5.0_f64.sqrt());

    let (mut a, mut b) = (lower, upper);
    let mut fulc = a + golden_mean * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;
    let mut rat = 0.0_f64;
    let mut e = 0.0_f64;

    let mut fx = f(xf)?;
    let mut ffulc = fx;
    let mut fnfc = fx;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + tol.parameter / 3.0;
    let mut tol2 = 2.0 * tol1;

    let mut iterations = 0;
    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        if iterations >= tol.max_iterations {
            return Err(FoilError::ConvergenceFailure {
                iterations,
                estimate: xf,
            });
        }
        iterations += 1;

        let mut golden = true;

        if e.abs() > tol1 {
            // Parabola through the three best points
            golden = false;
            let mut r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                rat = p / q;
                let x = xf + rat;
                // Keep the trial point away from the interval ends
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = tol1 * sign_or_one(xm - xf);
                }
            } else {
                golden = true;
            }
        }

        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = golden_mean * e;
        }

        let x = xf + sign_or_one(rat) * rat.abs().max(tol1);
        let fu = f(x)?;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + tol.parameter / 3.0;
        tol2 = 2.0 * tol1;
    }

    debug!("Minimum at {} after {} iterations", xf, iterations);
    Ok(xf)
}

/// Sign of `v`, treating zero as positive.
fn sign_or_one(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}
