use approx::assert_relative_eq;
use arcpost::float_types::{PI, Real};
use arcpost::post::TierSpec;
use arcpost::profile::{AnnularSection, Profile};
use arcpost::solid::{RadialMap, extrude, loft};
use arcpost::{GeometryError, Shape3};

fn sector_area(outer: Real, inner: Real, span: Real) -> Real {
    span / 360.0 * PI * (outer * outer - inner * inner)
}

fn constant_tier() -> TierSpec {
    TierSpec {
        height: 100.0,
        bottom_radius: 43.18,
        top_radius: 43.18,
        wall_thickness: 6.35,
        z_offset: 0.0,
        span_degrees: 270.0,
    }
}

fn tapered_tier() -> TierSpec {
    TierSpec {
        height: 203.2,
        bottom_radius: 58.42,
        top_radius: 48.26,
        wall_thickness: 6.35,
        z_offset: 0.0,
        span_degrees: 270.0,
    }
}

#[test]
fn extruded_tier_is_a_closed_prism_of_its_section() {
    let solid = constant_tier().build::<()>(None).unwrap();
    assert!(solid.is_manifold());

    // every horizontal cross-section matches the profile radii
    for z in [0.0, 12.5, 50.0, 99.0, 100.0] {
        assert_relative_eq!(solid.outer_radius_at(z).unwrap(), 43.18, epsilon = 1e-9);
        assert_relative_eq!(solid.inner_radius_at(z).unwrap(), 36.83, epsilon = 2e-2);
    }

    let expected = sector_area(43.18, 36.83, 270.0) * 100.0;
    let rel = (solid.volume() - expected).abs() / expected;
    assert!(rel < 5e-3, "relative volume error {rel}");
}

#[test]
fn extrusion_spans_exactly_its_height() {
    let solid = constant_tier().build::<()>(None).unwrap();
    let bb = solid.bounding_box();
    assert_relative_eq!(bb.mins.z, 0.0, epsilon = 1e-12);
    assert_relative_eq!(bb.maxs.z, 100.0, epsilon = 1e-12);
    // the 270° arc spans the full circle in Y but only -cos45°..1 in X
    assert_relative_eq!(bb.maxs.x, 43.18, epsilon = 1e-9);
    assert_relative_eq!(bb.maxs.y, 43.18, epsilon = 1e-9);
    assert_relative_eq!(bb.mins.y, -43.18, epsilon = 1e-9);
}

#[test]
fn lofted_radius_interpolates_linearly_with_height() {
    let tier = tapered_tier();
    let solid = tier.build::<()>(None).unwrap();
    assert!(solid.is_manifold());

    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let z = t * tier.height;
        let outer = (1.0 - t) * tier.bottom_radius + t * tier.top_radius;
        let inner = outer - tier.wall_thickness;
        assert_relative_eq!(solid.outer_radius_at(z).unwrap(), outer, epsilon = 1e-9);
        assert_relative_eq!(solid.inner_radius_at(z).unwrap(), inner, epsilon = 2e-2);
        // wall thickness varies linearly too; here the ends agree, so it is constant
        let wall = solid.outer_radius_at(z).unwrap() - solid.inner_radius_at(z).unwrap();
        assert_relative_eq!(wall, tier.wall_thickness, epsilon = 2e-2);
    }
}

#[test]
fn lofted_volume_matches_the_quadratic_section_integral() {
    let tier = tapered_tier();
    let solid = tier.build::<()>(None).unwrap();

    // cross-section area is quadratic in the height fraction, so Simpson's
    // rule integrates it exactly
    let area_at = |t: Real| {
        let outer = (1.0 - t) * tier.bottom_radius + t * tier.top_radius;
        sector_area(outer, outer - tier.wall_thickness, tier.span_degrees)
    };
    let expected = tier.height * (area_at(0.0) + 4.0 * area_at(0.5) + area_at(1.0)) / 6.0;
    let rel = (solid.volume() - expected).abs() / expected;
    assert!(rel < 1e-2, "relative volume error {rel}");
}

#[test]
fn loft_keeps_the_corner_wedge_open_at_every_height() {
    let tier = tapered_tier();
    let solid = tier.build::<()>(None).unwrap();
    let record = solid.prism_record().unwrap();
    let section = Profile::<()>::from_geo(record.base.clone(), None);
    // the wedge bisector stays clear at the bottom section
    assert!(!section.contains(-40.0, 0.0));
    assert!(section.contains(40.0, 0.0));
}

#[test]
fn zero_height_sweeps_are_degenerate() {
    let profile: Profile<()> = AnnularSection::from_wall(43.18, 6.35, 270.0)
        .profile(None)
        .unwrap();
    let err = extrude(&profile, 0.0).unwrap_err();
    assert!(matches!(err, GeometryError::DegenerateSweep { .. }));
}

#[test]
fn loft_rejects_profiles_with_different_spans() {
    let bottom: Profile<()> = AnnularSection::from_wall(58.42, 6.35, 270.0)
        .profile(None)
        .unwrap();
    let top: Profile<()> = AnnularSection::from_wall(48.26, 6.35, 360.0)
        .profile(None)
        .unwrap();
    let map = RadialMap {
        from_inner: 52.07,
        from_outer: 58.42,
        to_inner: 41.91,
        to_outer: 48.26,
    };
    let err = loft(&bottom, &top, map, 100.0).unwrap_err();
    assert!(matches!(err, GeometryError::LoftMismatch { .. }));
}

#[test]
fn prismatic_cuts_need_an_upright_prism() {
    let solid = constant_tier().build::<()>(None).unwrap();
    let tipped = solid.rotate(90.0, 0.0, 0.0);
    let cutter: Profile<()> = Profile::circle(5.0, 32, None);
    let err = tipped.subtract_profile(&cutter).unwrap_err();
    assert!(matches!(
        err,
        GeometryError::NotPrismatic {
            operation: "subtract_profile"
        }
    ));
}

#[test]
fn subtracting_everything_is_reported_not_swallowed() {
    let solid = constant_tier().build::<()>(None).unwrap();
    let everything: Profile<()> = Profile::circle(500.0, 64, None);
    let err = solid.subtract_profile(&everything).unwrap_err();
    assert!(matches!(err, GeometryError::EmptyBoolean { .. }));
}

#[test]
fn full_annulus_extrusion_is_manifold_with_its_hole() {
    let tier = TierSpec {
        span_degrees: 360.0,
        ..constant_tier()
    };
    let solid = tier.build::<()>(None).unwrap();
    assert!(solid.is_manifold());
    let expected = sector_area(43.18, 36.83, 360.0) * 100.0;
    assert!((solid.volume() - expected).abs() / expected < 5e-3);
}

#[test]
fn identical_builds_are_congruent() {
    let a = tapered_tier().build::<()>(None).unwrap();
    let b = tapered_tier().build::<()>(None).unwrap();
    assert_eq!(a.polygons.len(), b.polygons.len());
    assert_relative_eq!(a.volume(), b.volume(), epsilon = 1e-9);
}

#[test]
fn translation_carries_the_prism_record_along() {
    let solid = constant_tier().build::<()>(None).unwrap();
    let moved = solid.translate(0.0, 0.0, 25.4);
    assert_relative_eq!(
        moved.outer_radius_at(25.4 + 50.0).unwrap(),
        43.18,
        epsilon = 1e-9
    );
    assert!(moved.outer_radius_at(5.0).is_none());
}
