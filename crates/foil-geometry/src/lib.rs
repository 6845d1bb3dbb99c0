//! Curve geometry for airfoil blocking.
//!
//! Ordinates are fitted with a global interpolating B-spline
//! ([`SplineCurve`]) and queried for positions, normals and curvature over
//! the parameter domain `[0, 1]`. The [`query`] module locates parameters
//! satisfying geometric conditions with the bounded solvers in [`solve`].

pub mod curve;
pub mod nurbs;
pub mod query;
pub mod solve;
pub mod tessellate;

pub use curve::{BSplineCurve, Curve, Line, SplineCurve};
pub use query::{find_angle_match, find_zero_slope, normal_angle, Bracket, FULL_BRACKET};
pub use solve::{brent_minimize, brent_root};
