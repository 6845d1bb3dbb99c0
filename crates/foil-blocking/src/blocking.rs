//! Construction points for structured mesh blocking around an airfoil.

use std::fmt;
use std::str::FromStr;

use foil_core::traits::Validate;
use foil_core::{FoilError, Result};
use foil_geometry::query::check_bracket;
use foil_geometry::{find_angle_match, Bracket};
use foil_math::{Point3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::airfoil::{Airfoil, Surface};
use crate::domain::{Boundary, Domain};

/// Parameters of the blocking layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockingSettings {
    /// Normal angle (degrees from the x-axis) that bounds the leading-edge zone
    pub le_angle: f64,
    /// Offset of the refinement layer from the surface
    pub refinement_distance: f64,
    /// Search bracket of the leading-edge zone on the top surface
    pub top_le_bracket: Bracket,
    /// Search bracket of the leading-edge zone on the bottom surface
    pub bottom_le_bracket: Bracket,
    /// Curve parameter of the aft refinement stations
    pub aft_parameter: f64,
    /// Distance of the wake station behind the trailing edge
    pub wake_extension: f64,
}

impl Default for BlockingSettings {
    fn default() -> Self {
        Self {
            le_angle: 60.0,
            refinement_distance: 0.3,
            top_le_bracket: (0.0, 0.5),
            bottom_le_bracket: (0.0, 0.3),
            aft_parameter: 0.7,
            wake_extension: 0.5,
        }
    }
}

impl BlockingSettings {
    #[must_use]
    pub fn with_le_angle(mut self, degrees: f64) -> Self {
        self.le_angle = degrees;
        self
    }

    #[must_use]
    pub fn with_refinement_distance(mut self, distance: f64) -> Self {
        self.refinement_distance = distance;
        self
    }

    #[must_use]
    pub fn with_le_brackets(mut self, top: Bracket, bottom: Bracket) -> Self {
        self.top_le_bracket = top;
        self.bottom_le_bracket = bottom;
        self
    }

    fn le_bracket(&self, surface: Surface) -> Bracket {
        match surface {
            Surface::Top => self.top_le_bracket,
            Surface::Bottom => self.bottom_le_bracket,
        }
    }
}

impl Validate for BlockingSettings {
    fn validate(&self) -> Result<()> {
        if !(0.0..=90.0).contains(&self.le_angle) {
            return Err(FoilError::Config(format!(
                "leading-edge angle {} is outside [0, 90] degrees",
                self.le_angle
            )));
        }
        if !(self.refinement_distance > 0.0 && self.refinement_distance.is_finite()) {
            return Err(FoilError::Config(format!(
                "refinement distance must be positive, got {}",
                self.refinement_distance
            )));
        }
        for (name, bracket) in [
            ("top", self.top_le_bracket),
            ("bottom", self.bottom_le_bracket),
        ] {
            check_bracket(bracket).map_err(|e| {
                FoilError::Config(format!("{} leading-edge bracket: {}", name, e))
            })?;
        }
        if !(0.0..=1.0).contains(&self.aft_parameter) {
            return Err(FoilError::Config(format!(
                "aft parameter {} is outside [0, 1]",
                self.aft_parameter
            )));
        }
        if !(self.wake_extension >= 0.0 && self.wake_extension.is_finite()) {
            return Err(FoilError::Config(format!(
                "wake extension must be non-negative, got {}",
                self.wake_extension
            )));
        }
        Ok(())
    }
}

/// Curve parameters bounding the leading-edge refinement zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeZone {
    pub top: f64,
    pub bot: f64,
}

/// The named construction points of a blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockingPoint {
    TopMaximum,
    TopMaximumOffset,
    BottomMaximum,
    BottomMaximumOffset,
    TopAft,
    TopAftOffset,
    BottomAft,
    BottomAftOffset,
    TrailingEdge,
    TrailingEdgeTopOffset,
    TrailingEdgeBottomOffset,
    TopLeadingZone,
    TopLeadingZoneOffset,
    BottomLeadingZone,
    BottomLeadingZoneOffset,
    LeadingEdgeProjection,
    WakeStation,
    WakeStationTopOffset,
    WakeStationBottomOffset,
    TopMaximumFarfield,
    BottomMaximumFarfield,
    TopLeadingZoneFarfield,
    BottomLeadingZoneFarfield,
    TrailingEdgeTopFarfield,
    TrailingEdgeBottomFarfield,
    WakeTopFarfield,
    WakeBottomFarfield,
}

impl BlockingPoint {
    pub const ALL: [BlockingPoint; 27] = [
        Self::TopMaximum,
        Self::TopMaximumOffset,
        Self::BottomMaximum,
        Self::BottomMaximumOffset,
        Self::TopAft,
        Self::TopAftOffset,
        Self::BottomAft,
        Self::BottomAftOffset,
        Self::TrailingEdge,
        Self::TrailingEdgeTopOffset,
        Self::TrailingEdgeBottomOffset,
        Self::TopLeadingZone,
        Self::TopLeadingZoneOffset,
        Self::BottomLeadingZone,
        Self::BottomLeadingZoneOffset,
        Self::LeadingEdgeProjection,
        Self::WakeStation,
        Self::WakeStationTopOffset,
        Self::WakeStationBottomOffset,
        Self::TopMaximumFarfield,
        Self::BottomMaximumFarfield,
        Self::TopLeadingZoneFarfield,
        Self::BottomLeadingZoneFarfield,
        Self::TrailingEdgeTopFarfield,
        Self::TrailingEdgeBottomFarfield,
        Self::WakeTopFarfield,
        Self::WakeBottomFarfield,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TopMaximum => "top_maximum",
            Self::TopMaximumOffset => "top_maximum_offset",
            Self::BottomMaximum => "bottom_maximum",
            Self::BottomMaximumOffset => "bottom_maximum_offset",
            Self::TopAft => "top_aft",
            Self::TopAftOffset => "top_aft_offset",
            Self::BottomAft => "bottom_aft",
            Self::BottomAftOffset => "bottom_aft_offset",
            Self::TrailingEdge => "trailing_edge",
            Self::TrailingEdgeTopOffset => "trailing_edge_top_offset",
            Self::TrailingEdgeBottomOffset => "trailing_edge_bottom_offset",
            Self::TopLeadingZone => "top_leading_zone",
            Self::TopLeadingZoneOffset => "top_leading_zone_offset",
            Self::BottomLeadingZone => "bottom_leading_zone",
            Self::BottomLeadingZoneOffset => "bottom_leading_zone_offset",
            Self::LeadingEdgeProjection => "leading_edge_projection",
            Self::WakeStation => "wake_station",
            Self::WakeStationTopOffset => "wake_station_top_offset",
            Self::WakeStationBottomOffset => "wake_station_bottom_offset",
            Self::TopMaximumFarfield => "top_maximum_farfield",
            Self::BottomMaximumFarfield => "bottom_maximum_farfield",
            Self::TopLeadingZoneFarfield => "top_leading_zone_farfield",
            Self::BottomLeadingZoneFarfield => "bottom_leading_zone_farfield",
            Self::TrailingEdgeTopFarfield => "trailing_edge_top_farfield",
            Self::TrailingEdgeBottomFarfield => "trailing_edge_bottom_farfield",
            Self::WakeTopFarfield => "wake_top_farfield",
            Self::WakeBottomFarfield => "wake_bottom_farfield",
        }
    }
}

impl FromStr for BlockingPoint {
    type Err = FoilError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| FoilError::InvalidOperand(format!("unknown blocking point `{}`", s)))
    }
}

impl fmt::Display for BlockingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Blocking construction points of one airfoil inside its domain.
///
/// Every point is a pure function of the airfoil, the domain and the
/// settings. Points are computed on request. Only the curve fits and the
/// leading-edge zone are reused between requests.
#[derive(Debug)]
pub struct Blocking<'a> {
    airfoil: &'a Airfoil,
    domain: &'a Domain,
    settings: BlockingSettings,
    le_zone: LeZone,
}

impl<'a> Blocking<'a> {
    pub fn new(airfoil: &'a Airfoil, domain: &'a Domain, settings: BlockingSettings) -> Result<Self> {
        settings.validate()?;
        let tol = airfoil.tolerance();
        let le_zone = LeZone {
            top: find_angle_match(
                airfoil.curve(Surface::Top),
                settings.le_angle,
                settings.le_bracket(Surface::Top),
                tol,
            )?,
            bot: find_angle_match(
                airfoil.curve(Surface::Bottom),
                settings.le_angle,
                settings.le_bracket(Surface::Bottom),
                tol,
            )?,
        };
        debug!(
            "Leading-edge zone of {} at {}°: u_top = {}, u_bot = {}",
            airfoil.name(),
            settings.le_angle,
            le_zone.top,
            le_zone.bot
        );

        Ok(Self {
            airfoil,
            domain,
            settings,
            le_zone,
        })
    }

    pub fn airfoil(&self) -> &Airfoil {
        self.airfoil
    }

    pub fn domain(&self) -> &Domain {
        self.domain
    }

    pub fn settings(&self) -> &BlockingSettings {
        &self.settings
    }

    /// Parameters where the surface normals make the refinement angle with the x-axis.
    pub fn le_zone(&self) -> LeZone {
        self.le_zone
    }

    pub fn point(&self, point: BlockingPoint) -> Result<Point3> {
        use BlockingPoint::*;

        let aft = self.settings.aft_parameter;
        let le = self.le_zone;

        match point {
            TopMaximum => self.on_curve(Surface::Top, self.airfoil.get_maxima()?.0),
            TopMaximumOffset => self.offset(Surface::Top, self.airfoil.get_maxima()?.0),
            BottomMaximum => self.on_curve(Surface::Bottom, self.airfoil.get_maxima()?.1),
            BottomMaximumOffset => self.offset(Surface::Bottom, self.airfoil.get_maxima()?.1),
            TopAft => self.on_curve(Surface::Top, aft),
            TopAftOffset => self.offset(Surface::Top, aft),
            BottomAft => self.on_curve(Surface::Bottom, aft),
            BottomAftOffset => self.offset(Surface::Bottom, aft),
            TrailingEdge => Ok(self.airfoil.trailing_edge()),
            TrailingEdgeTopOffset => self.offset(Surface::Top, 1.0),
            TrailingEdgeBottomOffset => self.offset(Surface::Bottom, 1.0),
            TopLeadingZone => self.on_curve(Surface::Top, le.top),
            TopLeadingZoneOffset => self.offset(Surface::Top, le.top),
            BottomLeadingZone => self.on_curve(Surface::Bottom, le.bot),
            BottomLeadingZoneOffset => self.offset(Surface::Bottom, le.bot),
            LeadingEdgeProjection => Ok(self
                .airfoil
                .leading_edge()
                .translate(Vector3::xy(-self.settings.refinement_distance, 0.0))),
            WakeStation => self.wake_station(),
            WakeStationTopOffset => self.wake_offset(Surface::Top),
            WakeStationBottomOffset => self.wake_offset(Surface::Bottom),
            TopMaximumFarfield => self.far_field(TopMaximum, Boundary::Top),
            BottomMaximumFarfield => self.far_field(BottomMaximum, Boundary::Bottom),
            TopLeadingZoneFarfield => self.far_field(TopLeadingZone, Boundary::Top),
            BottomLeadingZoneFarfield => self.far_field(BottomLeadingZone, Boundary::Bottom),
            TrailingEdgeTopFarfield => self.far_field(TrailingEdge, Boundary::Top),
            TrailingEdgeBottomFarfield => self.far_field(TrailingEdge, Boundary::Bottom),
            WakeTopFarfield => self.far_field(WakeStationTopOffset, Boundary::Wake),
            WakeBottomFarfield => self.far_field(WakeStationBottomOffset, Boundary::Wake),
        }
    }

    /// Project a catalog point onto the domain boundary named `boundary`.
    pub fn project(&self, point: BlockingPoint, boundary: &str) -> Result<Point3> {
        let boundary: Boundary = boundary.parse()?;
        Ok(self.domain.project(self.point(point)?, boundary))
    }

    /// The whole catalog in [`BlockingPoint::ALL`] order.
    pub fn points(&self) -> Result<Vec<(BlockingPoint, Point3)>> {
        BlockingPoint::ALL
            .par_iter()
            .map(|&p| self.point(p).map(|pt| (p, pt)))
            .collect()
    }

    fn on_curve(&self, surface: Surface, u: f64) -> Result<Point3> {
        self.airfoil.curve(surface).point_at_parameter(u)
    }

    /// Outward offset: along the normal on top, against it on the bottom.
    fn offset(&self, surface: Surface, u: f64) -> Result<Point3> {
        let p = self.on_curve(surface, u)?;
        Ok(p.translate(self.outward(surface, u)?))
    }

    fn outward(&self, surface: Surface, u: f64) -> Result<Vector3> {
        let n = self.airfoil.curve(surface).normal(u)? * self.settings.refinement_distance;
        Ok(match surface {
            Surface::Top => n,
            Surface::Bottom => -n,
        })
    }

    /// Trailing edge carried along the top-surface tangent.
    fn wake_station(&self) -> Result<Point3> {
        let tangent = self.airfoil.curve(Surface::Top).tangent(1.0)?;
        Ok(self
            .airfoil
            .trailing_edge()
            .translate(tangent * self.settings.wake_extension))
    }

    fn wake_offset(&self, surface: Surface) -> Result<Point3> {
        Ok(self.wake_station()?.translate(self.outward(surface, 1.0)?))
    }

    fn far_field(&self, point: BlockingPoint, boundary: Boundary) -> Result<Point3> {
        Ok(self.domain.project(self.point(point)?, boundary))
    }
}
