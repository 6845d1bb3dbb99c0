//! Ordinate sources: where raw surface coordinates come from.

use std::collections::HashMap;

use foil_core::{FoilError, Result};
use foil_math::Point3;

use crate::airfoil::SurfaceOrdinates;

/// Supplies the top and bottom ordinates of a named airfoil, leading edge first.
pub trait OrdinateSource: Send + Sync {
    fn ordinates(&self, name: &str) -> Result<SurfaceOrdinates>;
}

/// Ordinate sets held in memory, keyed by airfoil name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrdinates {
    airfoils: HashMap<String, SurfaceOrdinates>,
}

impl InMemoryOrdinates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the ordinates of `name`.
    pub fn insert(&mut self, name: impl Into<String>, ordinates: SurfaceOrdinates) {
        self.airfoils.insert(name.into(), ordinates);
    }

    /// Register ordinates given as raw `[x, y]` or `[x, y, z]` rows.
    ///
    /// Nothing is stored if any row is malformed.
    pub fn insert_rows<R: AsRef<[f64]>>(
        &mut self,
        name: impl Into<String>,
        top: &[R],
        bot: &[R],
    ) -> Result<()> {
        let ordinates = SurfaceOrdinates {
            top: parse_rows(top)?,
            bot: parse_rows(bot)?,
        };
        self.insert(name, ordinates);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.airfoils.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.airfoils.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airfoils.is_empty()
    }
}

impl OrdinateSource for InMemoryOrdinates {
    fn ordinates(&self, name: &str) -> Result<SurfaceOrdinates> {
        self.airfoils
            .get(name)
            .cloned()
            .ok_or_else(|| FoilError::NotFound(format!("airfoil `{}`", name)))
    }
}

fn parse_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Point3>> {
    rows.iter()
        .map(|row| Point3::try_from_slice(row.as_ref()))
        .collect()
}
