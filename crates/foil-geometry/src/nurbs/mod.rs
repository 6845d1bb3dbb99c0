//! B-spline core algorithms: knot vector utilities, De Boor evaluation and
//! global interpolation.

pub mod deboor;
pub mod interpolate;
pub mod knot;

pub use deboor::{curve_derivs, curve_point};
pub use interpolate::{averaging_knot_vector, chord_length_parameters, interpolate};
pub use knot::{basis_functions, ders_basis_functions, find_span};
