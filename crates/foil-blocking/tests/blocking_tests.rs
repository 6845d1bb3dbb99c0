use std::io::Write;

use approx::assert_abs_diff_eq;
use foil_blocking::{
    Airfoil, Blocking, BlockingPoint, BlockingSettings, Boundary, Domain, DomainMargins,
    InMemoryOrdinates, OrdinateSource, StudyConfig, Surface, SurfaceOrdinates,
};
use foil_core::traits::{BoundingBox, Validate};
use foil_core::FoilError;
use foil_geometry::normal_angle;
use foil_math::Point3;
use tempfile::NamedTempFile;

const EPSILON: f64 = 1e-9;

/// NACA 4-digit section with a closed trailing edge and cosine spacing.
///
/// `camber` and `camber_position` are fractions of the chord, `thickness`
/// the maximum thickness ratio.
fn naca4(camber: f64, camber_position: f64, thickness: f64, stations: usize) -> SurfaceOrdinates {
    let mut top = Vec::with_capacity(stations + 1);
    let mut bot = Vec::with_capacity(stations + 1);
    for i in 0..=stations {
        let beta = std::f64::consts::PI * i as f64 / stations as f64;
        let x = 0.5 * (1.0 - beta.cos());
        let yt = 5.0
            * thickness
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                - 0.1036 * x.powi(4));
        let (yc, dyc) = if camber == 0.0 {
            (0.0, 0.0)
        } else if x < camber_position {
            let p = camber_position;
            (
                camber / (p * p) * (2.0 * p * x - x * x),
                2.0 * camber / (p * p) * (p - x),
            )
        } else {
            let p = camber_position;
            let q = (1.0 - p) * (1.0 - p);
            (
                camber / q * ((1.0 - 2.0 * p) + 2.0 * p * x - x * x),
                2.0 * camber / q * (p - x),
            )
        };
        let theta = dyc.atan();
        top.push(Point3::xy(x - yt * theta.sin(), yc + yt * theta.cos()));
        bot.push(Point3::xy(x + yt * theta.sin(), yc - yt * theta.cos()));
    }
    // Both surfaces share the trailing edge exactly
    top[stations] = Point3::xy(1.0, 0.0);
    bot[stations] = Point3::xy(1.0, 0.0);
    SurfaceOrdinates { top, bot }
}

fn naca0012() -> Airfoil {
    Airfoil::new("NACA0012", naca4(0.0, 0.0, 0.12, 40), 0.0).unwrap()
}

#[test]
fn test_three_point_airfoil_maxima_and_center() {
    let ordinates = SurfaceOrdinates {
        top: vec![
            Point3::xy(1.0, 0.0),
            Point3::xy(0.5, 0.05),
            Point3::xy(0.0, 0.0),
        ],
        bot: vec![
            Point3::xy(0.0, 0.0),
            Point3::xy(0.5, -0.05),
            Point3::xy(1.0, 0.0),
        ],
    };
    let airfoil = Airfoil::new("three", ordinates, 0.0).unwrap();
    assert_eq!(airfoil.curve(Surface::Top).degree(), 2);

    let (top, bot) = airfoil.maxima_points().unwrap();
    assert!((top.y - 0.05).abs() < 1e-6, "top maximum {}", top);
    assert!((bot.y + 0.05).abs() < 1e-6, "bottom maximum {}", bot);

    let center = airfoil.center().unwrap();
    assert!((center.x - 0.5 * (top.x + bot.x)).abs() < EPSILON);
    assert!((center.x - 0.5).abs() < 1e-4);
    assert_eq!(center.y, 0.0);
}

#[test]
fn test_naca0012_maxima_and_center() {
    let airfoil = naca0012();
    let (top, bot) = airfoil.maxima_points().unwrap();

    assert!((top.y - 0.06).abs() < 1e-3, "top maximum {}", top);
    assert!((top.x - 0.3).abs() < 0.02, "top maximum {}", top);
    assert!((top.y + bot.y).abs() < 1e-5);
    assert!((top.x - bot.x).abs() < 1e-5);

    let center = airfoil.center().unwrap();
    assert!((center.x - 0.3).abs() < 0.02);
}

#[test]
fn test_airfoil_outline_is_closed() {
    let airfoil = naca0012();
    let outline = airfoil.outline(1e-4).unwrap();
    assert!(outline.len() > 20);
    assert_abs_diff_eq!(outline[0], airfoil.trailing_edge(), epsilon = EPSILON);
    assert_abs_diff_eq!(outline[outline.len() - 1], airfoil.trailing_edge(), epsilon = EPSILON);
}

#[test]
fn test_angle_of_attack_rotates_once() {
    let airfoil = Airfoil::new("NACA0012", naca4(0.0, 0.0, 0.12, 40), 5.0).unwrap();
    let angle = 5.0_f64.to_radians();
    assert_abs_diff_eq!(airfoil.leading_edge(), Point3::ORIGIN, epsilon = EPSILON);
    assert_abs_diff_eq!(
        airfoil.trailing_edge(),
        Point3::xy(angle.cos(), -angle.sin()),
        epsilon = 1e-12
    );

    let (min, max) = airfoil.bounding_box();
    assert!(min.y < -0.08 && max.y > 0.0);
}

#[test]
fn test_domain_points() {
    let airfoil = naca0012();
    let domain = Domain::new(&airfoil, DomainMargins::default()).unwrap();
    let cx = airfoil.center().unwrap().x;

    assert_abs_diff_eq!(domain.upstream_apex(), Point3::xy(-13.0, 0.0), epsilon = EPSILON);
    assert_abs_diff_eq!(domain.top_left(), Point3::xy(cx, 13.0), epsilon = EPSILON);
    assert_abs_diff_eq!(domain.top_right(), Point3::xy(21.0, 13.0), epsilon = EPSILON);
    assert_abs_diff_eq!(domain.bottom_right(), Point3::xy(21.0, -13.0), epsilon = EPSILON);
    assert_abs_diff_eq!(domain.bottom_left(), Point3::xy(cx, -13.0), epsilon = EPSILON);

    let (min, max) = domain.bounding_box();
    assert_eq!(min, Point3::xy(-13.0, -13.0));
    assert_eq!(max, Point3::xy(21.0, 13.0));
}

#[test]
fn test_domain_accepts_zero_margins() {
    let airfoil = naca0012();
    let center_y = airfoil.center().unwrap().y;
    let domain = Domain::new(&airfoil, DomainMargins::new(13.0, 0.0, 13.0, 20.0)).unwrap();
    assert_abs_diff_eq!(domain.top_left().y, center_y, epsilon = EPSILON);
    assert!(matches!(domain.validate(), Err(FoilError::Geometry(_))));

    let domain = Domain::new(&airfoil, DomainMargins::new(0.0, 0.0, 0.0, 0.0)).unwrap();
    assert_abs_diff_eq!(domain.upstream_apex(), airfoil.leading_edge(), epsilon = 1e-6);

    let domain = Domain::new(&airfoil, DomainMargins::default()).unwrap();
    assert!(domain.validate().is_ok());

    let margins = DomainMargins::new(-1.0, 13.0, 13.0, 20.0);
    assert!(matches!(
        Domain::new(&airfoil, margins),
        Err(FoilError::Config(_))
    ));
}

#[test]
fn test_domain_projection() {
    let airfoil = naca0012();
    let domain = Domain::new(&airfoil, DomainMargins::default()).unwrap();
    let p = Point3::xy(0.4, 0.2);

    assert_abs_diff_eq!(domain.project(p, Boundary::Top), Point3::xy(0.4, 13.0), epsilon = EPSILON);
    assert_abs_diff_eq!(
        domain.project(p, Boundary::Bottom),
        Point3::xy(0.4, -13.0),
        epsilon = EPSILON
    );
    assert_abs_diff_eq!(domain.project(p, Boundary::Wake), Point3::xy(21.0, 0.2), epsilon = EPSILON);
    // Points ahead of the rectangle still keep their x
    assert_abs_diff_eq!(
        domain.project_named(Point3::xy(-0.3, 0.0), "top").unwrap(),
        Point3::xy(-0.3, 13.0),
        epsilon = EPSILON
    );
    assert!(matches!(
        domain.project_named(p, "left"),
        Err(FoilError::InvalidSide(_))
    ));
}

#[test]
fn test_blocking_catalog_naca0012() {
    let airfoil = naca0012();
    let domain = Domain::new(&airfoil, DomainMargins::default()).unwrap();
    let blocking = Blocking::new(&airfoil, &domain, BlockingSettings::default()).unwrap();
    let pt = |p: BlockingPoint| blocking.point(p).unwrap();

    let points = blocking.points().unwrap();
    assert_eq!(points.len(), 27);
    for ((name, point), expected) in points.iter().zip(BlockingPoint::ALL) {
        assert_eq!(*name, expected);
        assert!(point.is_finite(), "{} = {}", name, point);
        assert_eq!(*point, pt(*name));
    }

    // Offsets at the thickness extrema go straight up and down
    let top_max = pt(BlockingPoint::TopMaximum);
    let bot_max = pt(BlockingPoint::BottomMaximum);
    assert_abs_diff_eq!(
        pt(BlockingPoint::TopMaximumOffset),
        Point3::xy(top_max.x, top_max.y + 0.3),
        epsilon = 1e-3
    );
    assert_abs_diff_eq!(
        pt(BlockingPoint::BottomMaximumOffset),
        Point3::xy(bot_max.x, bot_max.y - 0.3),
        epsilon = 1e-3
    );

    // Every offset sits at the refinement distance
    for (on_curve, offset) in [
        (BlockingPoint::TopAft, BlockingPoint::TopAftOffset),
        (BlockingPoint::BottomAft, BlockingPoint::BottomAftOffset),
        (BlockingPoint::TopLeadingZone, BlockingPoint::TopLeadingZoneOffset),
        (BlockingPoint::BottomLeadingZone, BlockingPoint::BottomLeadingZoneOffset),
        (BlockingPoint::TrailingEdge, BlockingPoint::TrailingEdgeTopOffset),
        (BlockingPoint::TrailingEdge, BlockingPoint::TrailingEdgeBottomOffset),
        (BlockingPoint::WakeStation, BlockingPoint::WakeStationTopOffset),
        (BlockingPoint::WakeStation, BlockingPoint::WakeStationBottomOffset),
    ] {
        assert!((pt(on_curve).distance(&pt(offset)) - 0.3).abs() < 1e-6);
    }
    // Offsets point away from the airfoil
    assert!(pt(BlockingPoint::TopAftOffset).y > pt(BlockingPoint::TopAft).y);
    assert!(pt(BlockingPoint::BottomAftOffset).y < pt(BlockingPoint::BottomAft).y);

    assert_eq!(pt(BlockingPoint::LeadingEdgeProjection), Point3::xy(-0.3, 0.0));
    assert_eq!(pt(BlockingPoint::TrailingEdge), Point3::xy(1.0, 0.0));

    let wake = pt(BlockingPoint::WakeStation);
    assert!((wake.distance(&Point3::xy(1.0, 0.0)) - 0.5).abs() < 1e-9);
    assert!(wake.x > 1.45 && wake.y < 0.0);

    assert_abs_diff_eq!(
        pt(BlockingPoint::TopMaximumFarfield),
        Point3::xy(top_max.x, 13.0),
        epsilon = EPSILON
    );
    assert_abs_diff_eq!(
        pt(BlockingPoint::BottomMaximumFarfield),
        Point3::xy(bot_max.x, -13.0),
        epsilon = EPSILON
    );
    assert_abs_diff_eq!(
        pt(BlockingPoint::TrailingEdgeBottomFarfield),
        Point3::xy(1.0, -13.0),
        epsilon = EPSILON
    );
    let wake_top = pt(BlockingPoint::WakeStationTopOffset);
    assert_abs_diff_eq!(
        pt(BlockingPoint::WakeTopFarfield),
        Point3::xy(21.0, wake_top.y),
        epsilon = EPSILON
    );
}

#[test]
fn test_leading_edge_zone_matches_angle() {
    let airfoil = naca0012();
    let domain = Domain::new(&airfoil, DomainMargins::default()).unwrap();
    let blocking = Blocking::new(&airfoil, &domain, BlockingSettings::default()).unwrap();
    let zone = blocking.le_zone();

    let top_angle = normal_angle(airfoil.curve(Surface::Top), zone.top).unwrap();
    let bot_angle = normal_angle(airfoil.curve(Surface::Bottom), zone.bot).unwrap();
    assert!((top_angle - 60.0).abs() < 1e-2);
    assert!((bot_angle - 60.0).abs() < 1e-2);
    // Symmetric section, different brackets, same station
    assert!((zone.top - zone.bot).abs() < 1e-5);

    let top = blocking.point(BlockingPoint::TopLeadingZone).unwrap();
    let bot = blocking.point(BlockingPoint::BottomLeadingZone).unwrap();
    assert!(top.x > 0.0 && top.x < 0.1);
    assert!((top.y + bot.y).abs() < 1e-5);
}

#[test]
fn test_blocking_projection_by_name() {
    let airfoil = naca0012();
    let domain = Domain::new(&airfoil, DomainMargins::default()).unwrap();
    let blocking = Blocking::new(&airfoil, &domain, BlockingSettings::default()).unwrap();

    let aft = blocking.point(BlockingPoint::TopAft).unwrap();
    let projected = blocking.project(BlockingPoint::TopAft, "bottom").unwrap();
    assert_abs_diff_eq!(projected, Point3::xy(aft.x, -13.0), epsilon = EPSILON);

    assert!(matches!(
        blocking.project(BlockingPoint::TopAft, "inlet"),
        Err(FoilError::InvalidSide(_))
    ));
}

#[test]
fn test_unreachable_le_angle_fails() {
    let airfoil = naca0012();
    let domain = Domain::new(&airfoil, DomainMargins::default()).unwrap();
    let settings = BlockingSettings::default().with_le_brackets((0.6, 1.0), (0.0, 0.3));
    let err = Blocking::new(&airfoil, &domain, settings).unwrap_err();
    assert!(err.is_no_bracketing_root());
}

#[test]
fn test_cambered_airfoil_at_incidence() {
    let airfoil = Airfoil::new("NACA2412", naca4(0.02, 0.4, 0.12, 60), 2.31).unwrap();
    let domain = Domain::new(&airfoil, DomainMargins::default()).unwrap();
    let blocking = Blocking::new(&airfoil, &domain, BlockingSettings::default()).unwrap();

    let points = blocking.points().unwrap();
    assert!(points.iter().all(|(_, p)| p.is_finite()));

    let top_max = blocking.point(BlockingPoint::TopMaximum).unwrap();
    let bot_max = blocking.point(BlockingPoint::BottomMaximum).unwrap();
    assert!(top_max.y > 0.05 && bot_max.y < -0.03);

    let zone = blocking.le_zone();
    let angle = normal_angle(airfoil.curve(Surface::Top), zone.top).unwrap();
    assert!((angle - 60.0).abs() < 1e-2);
}

#[test]
fn test_pipeline_from_config_file() {
    let mut source = InMemoryOrdinates::new();
    source.insert("NACA0012", naca4(0.0, 0.0, 0.12, 40));

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "angle_of_attack": 2.0,
            "margins": { "upstream": 10.0, "wake": 15.0 },
            "blocking": { "refinement_distance": 0.2 }
        }"#,
    )
    .unwrap();
    file.flush().unwrap();

    let config = StudyConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.margins.upstream, 10.0);
    assert_eq!(config.margins.top, 13.0);

    let airfoil = Airfoil::from_source(&source, "NACA0012", &config).unwrap();
    assert_eq!(airfoil.angle_of_attack(), 2.0);

    let domain = Domain::new(&airfoil, config.margins).unwrap();
    assert!((domain.upstream_apex().x + 10.0).abs() < EPSILON);

    let blocking = Blocking::new(&airfoil, &domain, config.blocking).unwrap();
    let le = blocking.point(BlockingPoint::LeadingEdgeProjection).unwrap();
    assert_abs_diff_eq!(le, Point3::xy(-0.2, 0.0), epsilon = EPSILON);
}

#[test]
fn test_missing_inputs() {
    let source = InMemoryOrdinates::new();
    assert!(matches!(
        source.ordinates("RAE2822"),
        Err(FoilError::NotFound(_))
    ));
    assert!(matches!(
        Airfoil::from_source(&source, "RAE2822", &StudyConfig::default()),
        Err(FoilError::NotFound(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("study.json");
    assert!(matches!(
        StudyConfig::from_json_file(&missing),
        Err(FoilError::Io(_))
    ));
}
