pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{FoilError, Result};
pub use tolerance::Tolerance;
