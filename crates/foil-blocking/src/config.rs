//! Study configuration loaded from JSON.

use std::path::Path;

use foil_core::traits::Validate;
use foil_core::{FoilError, Result, Tolerance};
use serde::{Deserialize, Serialize};

use crate::blocking::BlockingSettings;
use crate::domain::DomainMargins;

/// Everything needed to go from ordinates to blocking points.
///
/// Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Angle of attack in degrees, positive nose up
    pub angle_of_attack: f64,
    /// Degree of the surface fits
    pub degree: usize,
    pub margins: DomainMargins,
    pub blocking: BlockingSettings,
    pub tolerance: Tolerance,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            angle_of_attack: 0.0,
            degree: 3,
            margins: DomainMargins::default(),
            blocking: BlockingSettings::default(),
            tolerance: Tolerance::default(),
        }
    }
}

impl StudyConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: StudyConfig =
            serde_json::from_str(json).map_err(|e| FoilError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| FoilError::Config(e.to_string()))
    }
}

impl Validate for StudyConfig {
    fn validate(&self) -> Result<()> {
        if !self.angle_of_attack.is_finite() {
            return Err(FoilError::Config(format!(
                "angle of attack {} is not finite",
                self.angle_of_attack
            )));
        }
        if self.degree == 0 {
            return Err(FoilError::Config("fit degree must be at least 1".into()));
        }
        let tol = &self.tolerance;
        if !(tol.parameter > 0.0) || tol.max_iterations == 0 {
            return Err(FoilError::Config(format!(
                "parameter tolerance must be positive with a non-zero iteration budget, got {:?}",
                tol
            )));
        }
        self.margins.validate()?;
        self.blocking.validate()
    }
}
