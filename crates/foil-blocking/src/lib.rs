//! Airfoil blocking: from surface ordinates to mesh-blocking construction points.
//!
//! An [`Airfoil`] fits both surfaces once at a given angle of attack. A
//! [`Blocking`] borrows it together with its far-field [`Domain`] and derives
//! the named construction points.

pub mod airfoil;
pub mod blocking;
pub mod config;
pub mod domain;
pub mod source;

pub use airfoil::{Airfoil, Surface, SurfaceOrdinates};
pub use blocking::{Blocking, BlockingPoint, BlockingSettings, LeZone};
pub use config::StudyConfig;
pub use domain::{Boundary, Domain, DomainMargins};
pub use source::{InMemoryOrdinates, OrdinateSource};
