//! Airfoil shape model: fitted surfaces and the points derived from them.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use foil_core::traits::BoundingBox;
use foil_core::{FoilError, Result, Tolerance};
use foil_geometry::{find_zero_slope, SplineCurve, FULL_BRACKET};
use foil_math::{Aabb3, Point3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::StudyConfig;
use crate::source::OrdinateSource;

/// Raw ordinates of both surfaces, each ordered leading edge first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceOrdinates {
    pub top: Vec<Point3>,
    pub bot: Vec<Point3>,
}

/// One of the two airfoil surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Top,
    Bottom,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Top, Surface::Bottom];

    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bot",
        }
    }
}

impl FromStr for Surface {
    type Err = FoilError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Self::Top),
            "bot" | "bottom" => Ok(Self::Bottom),
            other => Err(FoilError::InvalidSide(other.to_string())),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An airfoil at a fixed angle of attack.
///
/// The ordinates are rotated by the angle of attack once, at construction,
/// and every curve is fitted to the rotated ordinates. Positive angles pitch
/// the nose up.
#[derive(Debug)]
pub struct Airfoil {
    name: String,
    angle_of_attack: f64,
    ordinates: SurfaceOrdinates,
    top: SplineCurve,
    bot: SplineCurve,
    complete: SplineCurve,
    bounds: Aabb3,
    tolerance: Tolerance,
    maxima: OnceLock<(f64, f64)>,
}

impl Airfoil {
    /// Cubic fit with default tolerances.
    pub fn new(
        name: impl Into<String>,
        ordinates: SurfaceOrdinates,
        angle_of_attack: f64,
    ) -> Result<Self> {
        Self::with_settings(
            name,
            ordinates,
            angle_of_attack,
            SplineCurve::DEFAULT_DEGREE,
            Tolerance::default(),
        )
    }

    pub fn with_settings(
        name: impl Into<String>,
        ordinates: SurfaceOrdinates,
        angle_of_attack: f64,
        degree: usize,
        tolerance: Tolerance,
    ) -> Result<Self> {
        let name = name.into();
        if !angle_of_attack.is_finite() {
            return Err(FoilError::InvalidOperand(format!(
                "angle of attack {} is not finite",
                angle_of_attack
            )));
        }

        let ordinates = SurfaceOrdinates {
            top: rotate_all(&ordinates.top, angle_of_attack),
            bot: rotate_all(&ordinates.bot, angle_of_attack),
        };

        let top = fit(&name, "top", ordinates.top.clone(), degree)?;
        let bot = fit(&name, "bot", ordinates.bot.clone(), degree)?;
        let complete = fit(&name, "complete", complete_loop(&ordinates), degree)?;

        let all: Vec<Point3> = ordinates.top.iter().chain(&ordinates.bot).copied().collect();
        let bounds = Aabb3::from_points(&all)
            .ok_or_else(|| FoilError::CurveFit("airfoil has no ordinates".into()))?;

        debug!(
            "Airfoil {} at {}°: {} top / {} bottom ordinates",
            name,
            angle_of_attack,
            ordinates.top.len(),
            ordinates.bot.len()
        );

        Ok(Self {
            name,
            angle_of_attack,
            ordinates,
            top,
            bot,
            complete,
            bounds,
            tolerance,
            maxima: OnceLock::new(),
        })
    }

    /// Load `name` from `source` with the angle, degree and tolerance of `config`.
    pub fn from_source(
        source: &dyn OrdinateSource,
        name: &str,
        config: &StudyConfig,
    ) -> Result<Self> {
        let ordinates = source.ordinates(name)?;
        Self::with_settings(
            name,
            ordinates,
            config.angle_of_attack,
            config.degree,
            config.tolerance,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn angle_of_attack(&self) -> f64 {
        self.angle_of_attack
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Rotated ordinates of one surface.
    pub fn ordinates(&self, surface: Surface) -> &[Point3] {
        match surface {
            Surface::Top => &self.ordinates.top,
            Surface::Bottom => &self.ordinates.bot,
        }
    }

    pub fn curve(&self, surface: Surface) -> &SplineCurve {
        match surface {
            Surface::Top => &self.top,
            Surface::Bottom => &self.bot,
        }
    }

    /// The closed boundary: trailing edge over the top to the leading edge,
    /// then along the bottom back to the trailing edge.
    pub fn complete_curve(&self) -> &SplineCurve {
        &self.complete
    }

    pub fn leading_edge(&self) -> Point3 {
        self.top.ordinates()[0]
    }

    pub fn trailing_edge(&self) -> Point3 {
        let top = self.top.ordinates();
        top[top.len() - 1]
    }

    /// Curve parameters of the top and bottom thickness extrema.
    pub fn get_maxima(&self) -> Result<(f64, f64)> {
        if let Some(maxima) = self.maxima.get() {
            return Ok(*maxima);
        }
        let u_top = find_zero_slope(&self.top, FULL_BRACKET, &self.tolerance)?;
        let u_bot = find_zero_slope(&self.bot, FULL_BRACKET, &self.tolerance)?;
        debug!("Airfoil {} maxima at u_top = {}, u_bot = {}", self.name, u_top, u_bot);
        Ok(*self.maxima.get_or_init(|| (u_top, u_bot)))
    }

    /// Points of the top and bottom thickness extrema.
    pub fn maxima_points(&self) -> Result<(Point3, Point3)> {
        let (u_top, u_bot) = self.get_maxima()?;
        Ok((
            self.top.point_at_parameter(u_top)?,
            self.bot.point_at_parameter(u_bot)?,
        ))
    }

    /// Reference center: mean x of the thickness extrema, on the x-axis.
    pub fn center(&self) -> Result<Point3> {
        let (top, bot) = self.maxima_points()?;
        Ok(Point3::xy(0.5 * (top.x + bot.x), 0.0))
    }

    /// Polyline of the closed boundary within `tolerance` chord deviation.
    pub fn outline(&self, tolerance: f64) -> Result<Vec<Point3>> {
        self.complete.polyline(tolerance)
    }

    pub fn bounds(&self) -> Aabb3 {
        self.bounds
    }
}

impl BoundingBox for Airfoil {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        (self.bounds.min, self.bounds.max)
    }
}

fn rotate_all(points: &[Point3], angle_of_attack: f64) -> Vec<Point3> {
    points.iter().map(|p| p.rotate(-angle_of_attack)).collect()
}

/// Trailing edge to leading edge over the top, then the bottom surface.
fn complete_loop(ordinates: &SurfaceOrdinates) -> Vec<Point3> {
    let mut points: Vec<Point3> = ordinates.top.iter().rev().copied().collect();
    points.pop();
    points.extend_from_slice(&ordinates.bot);
    points
}

/// Fit `ordinates`, lowering the degree when there are too few of them.
fn fit(airfoil: &str, label: &str, ordinates: Vec<Point3>, degree: usize) -> Result<SplineCurve> {
    let max_degree = ordinates.len().saturating_sub(1).max(1);
    let fit_degree = degree.min(max_degree);
    if fit_degree < degree {
        warn!(
            "Airfoil {} {} surface has {} ordinates, fitting degree {} instead of {}",
            airfoil,
            label,
            ordinates.len(),
            fit_degree,
            degree
        );
    }
    SplineCurve::new(ordinates, fit_degree)
}
