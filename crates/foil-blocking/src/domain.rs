//! Far-field domain around an airfoil.

use std::fmt;
use std::str::FromStr;

use foil_core::traits::{BoundingBox, Validate};
use foil_core::{FoilError, Result};
use foil_geometry::Line;
use foil_math::{Aabb3, Point3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::airfoil::Airfoil;

/// Distances from the airfoil to the far-field boundaries, in chord units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainMargins {
    /// Ahead of the leading edge
    pub upstream: f64,
    /// Above the center line
    pub top: f64,
    /// Below the center line
    pub bottom: f64,
    /// Behind the trailing edge
    pub wake: f64,
}

impl DomainMargins {
    pub fn new(upstream: f64, top: f64, bottom: f64, wake: f64) -> Self {
        Self {
            upstream,
            top,
            bottom,
            wake,
        }
    }
}

impl Default for DomainMargins {
    fn default() -> Self {
        Self::new(13.0, 13.0, 13.0, 20.0)
    }
}

impl Validate for DomainMargins {
    fn validate(&self) -> Result<()> {
        let named = [
            ("upstream", self.upstream),
            ("top", self.top),
            ("bottom", self.bottom),
            ("wake", self.wake),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(FoilError::Config(format!(
                    "{} margin must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// A straight far-field boundary that points can be projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Top,
    Bottom,
    Wake,
}

impl Boundary {
    pub const ALL: [Boundary; 3] = [Boundary::Top, Boundary::Bottom, Boundary::Wake];

    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Wake => "wake",
        }
    }
}

impl FromStr for Boundary {
    type Err = FoilError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" | "bot" => Ok(Self::Bottom),
            "wake" => Ok(Self::Wake),
            other => Err(FoilError::InvalidSide(other.to_string())),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The far-field rectangle behind the airfoil center plus the upstream apex.
///
/// Holds no reference to the airfoil it was built around. Any non-negative
/// margins build a domain; [`Validate::validate`] additionally checks that the
/// rectangle encloses the airfoil.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    margins: DomainMargins,
    upstream_apex: Point3,
    top_left: Point3,
    top_right: Point3,
    bottom_right: Point3,
    bottom_left: Point3,
    airfoil_bounds: Aabb3,
}

impl Domain {
    pub fn new(airfoil: &Airfoil, margins: DomainMargins) -> Result<Self> {
        margins.validate()?;

        let center = airfoil.center()?;
        let le = airfoil.leading_edge();
        let te = airfoil.trailing_edge();

        let top = center.y + margins.top;
        let bottom = center.y - margins.bottom;
        let aft = te.x + margins.wake;

        let bounds = airfoil.bounds();
        let domain = Self {
            margins,
            upstream_apex: Point3::xy(le.x - margins.upstream, center.y),
            top_left: Point3::xy(center.x, top),
            top_right: Point3::xy(aft, top),
            bottom_right: Point3::xy(aft, bottom),
            bottom_left: Point3::xy(center.x, bottom),
            airfoil_bounds: Aabb3::new(
                Point3::xy(bounds.min.x, bounds.min.y),
                Point3::xy(bounds.max.x, bounds.max.y),
            ),
        };
        if let Err(err) = domain.validate() {
            warn!("{}", err);
        }

        debug!(
            "Domain around {}: x in [{}, {}], y in [{}, {}]",
            airfoil.name(),
            domain.upstream_apex.x,
            aft,
            bottom,
            top
        );
        Ok(domain)
    }

    pub fn margins(&self) -> &DomainMargins {
        &self.margins
    }

    pub fn upstream_apex(&self) -> Point3 {
        self.upstream_apex
    }

    pub fn top_left(&self) -> Point3 {
        self.top_left
    }

    pub fn top_right(&self) -> Point3 {
        self.top_right
    }

    pub fn bottom_right(&self) -> Point3 {
        self.bottom_right
    }

    pub fn bottom_left(&self) -> Point3 {
        self.bottom_left
    }

    /// The five boundary points, upstream apex first, then clockwise from top-left.
    pub fn points(&self) -> [Point3; 5] {
        [
            self.upstream_apex,
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn bounds(&self) -> Aabb3 {
        let [apex, top_left, top_right, bottom_right, bottom_left] = self.points();
        Aabb3::new(
            Point3::xy(apex.x.min(top_left.x), bottom_left.y.min(bottom_right.y)),
            Point3::xy(top_right.x.max(bottom_right.x), top_left.y.max(top_right.y)),
        )
    }

    pub fn boundary(&self, boundary: Boundary) -> Line {
        match boundary {
            Boundary::Top => Line::new(self.top_left, self.top_right),
            Boundary::Bottom => Line::new(self.bottom_left, self.bottom_right),
            Boundary::Wake => Line::new(self.top_right, self.bottom_right),
        }
    }

    /// Snap `point` onto a boundary line, keeping the coordinate along it.
    pub fn project(&self, point: Point3, boundary: Boundary) -> Point3 {
        self.boundary(boundary).project_point(point)
    }

    /// [`Domain::project`] with the boundary given by name.
    pub fn project_named(&self, point: Point3, boundary: &str) -> Result<Point3> {
        Ok(self.project(point, boundary.parse()?))
    }
}

impl Validate for Domain {
    fn validate(&self) -> Result<()> {
        self.margins.validate()?;
        if !self.bounds().contains(&self.airfoil_bounds) {
            return Err(FoilError::Geometry(format!(
                "far field [{}, {}] does not enclose the airfoil [{}, {}]",
                self.bounds().min,
                self.bounds().max,
                self.airfoil_bounds.min,
                self.airfoil_bounds.max
            )));
        }
        Ok(())
    }
}

impl BoundingBox for Domain {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        let bounds = self.bounds();
        (bounds.min, bounds.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margins() {
        let margins = DomainMargins::default();
        assert_eq!(margins, DomainMargins::new(13.0, 13.0, 13.0, 20.0));
        assert!(margins.validate().is_ok());
    }

    #[test]
    fn test_negative_margin_rejected() {
        let margins = DomainMargins {
            wake: -1.0,
            ..Default::default()
        };
        assert!(matches!(margins.validate(), Err(FoilError::Config(_))));

        let margins = DomainMargins {
            top: f64::INFINITY,
            ..Default::default()
        };
        assert!(margins.validate().is_err());
    }

    #[test]
    fn test_boundary_from_str() {
        for boundary in Boundary::ALL {
            assert_eq!(boundary.name().parse::<Boundary>().unwrap(), boundary);
        }
        assert_eq!("bot".parse::<Boundary>().unwrap(), Boundary::Bottom);
        assert!(matches!(
            "inlet".parse::<Boundary>(),
            Err(FoilError::InvalidSide(_))
        ));
    }

    #[test]
    fn test_margins_partial_json() {
        let margins: DomainMargins = serde_json::from_str(r#"{"wake": 30.0}"#).unwrap();
        assert_eq!(margins.wake, 30.0);
        assert_eq!(margins.upstream, 13.0);
    }
}
