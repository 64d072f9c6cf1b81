use approx::assert_relative_eq;
use arcpost::float_types::Real;
use arcpost::post::TierSpec;
use arcpost::post::strips::{grout_angle_from_gap, partition, strip_windows};
use arcpost::profile::Profile;
use arcpost::{BuildError, ConfigError};

fn tile_tier() -> TierSpec {
    TierSpec {
        height: 254.0,
        bottom_radius: 43.18,
        top_radius: 43.18,
        wall_thickness: 6.35,
        z_offset: 0.0,
        span_degrees: 270.0,
    }
}

/// Cross-section of a strip solid, for angular sampling.
fn section_of(strip: &arcpost::Solid<()>) -> Profile<()> {
    Profile::from_geo(strip.prism_record().unwrap().base.clone(), None)
}

#[test]
fn nine_strips_with_one_degree_grout() {
    let strips = partition(&tile_tier(), 9, 1.0, None::<()>).unwrap();
    assert_eq!(strips.len(), 9);

    let mid_r = 40.0;
    for (i, strip) in strips.iter().enumerate() {
        assert!(strip.is_manifold(), "strip {i} is not closed");
        let coverage = section_of(strip).coverage_degrees(mid_r, 0.1);
        assert!(
            (coverage - 29.0).abs() < 0.5,
            "strip {i} covers {coverage} degrees"
        );
    }
}

#[test]
fn strips_are_ordered_from_the_wedge_edge_downward() {
    let strips = partition(&tile_tier(), 9, 1.0, None::<()>).unwrap();
    let windows = strip_windows(270.0, 9, 1.0).unwrap();
    let mid_r = 40.0;

    for (i, strip) in strips.iter().enumerate() {
        let section = section_of(strip);
        let (lo, hi) = windows[i];
        let mid = ((lo + hi) * 0.5 as Real).to_radians();
        assert!(
            section.contains(mid_r * mid.cos(), mid_r * mid.sin()),
            "strip {i} does not cover its own window"
        );
        // and it does not reach into its neighbors
        for (j, &(lo_j, hi_j)) in windows.iter().enumerate() {
            if i == j {
                continue;
            }
            let mid_j = ((lo_j + hi_j) * 0.5).to_radians();
            assert!(
                !section.contains(mid_r * mid_j.cos(), mid_r * mid_j.sin()),
                "strip {i} bleeds into window {j}"
            );
        }
    }
}

#[test]
fn no_point_belongs_to_two_strips() {
    let strips = partition(&tile_tier(), 9, 1.0, None::<()>).unwrap();
    let sections: Vec<Profile<()>> = strips.iter().map(section_of).collect();
    let mid_r = 40.0;

    let mut angle: Real = -180.0;
    while angle < 180.0 {
        let rad = angle.to_radians();
        let (x, y) = (mid_r * rad.cos(), mid_r * rad.sin());
        let owners = sections.iter().filter(|s| s.contains(x, y)).count();
        assert!(owners <= 1, "angle {angle} is inside {owners} strips");
        angle += 0.25;
    }
}

#[test]
fn windows_grout_and_wedge_tile_the_full_circle() {
    let strips = partition(&tile_tier(), 9, 1.0, None::<()>).unwrap();
    let covered: Real = strips
        .iter()
        .map(|s| section_of(s).coverage_degrees(40.0, 0.1))
        .sum();
    let grout_total = 9.0 * 1.0;
    let wedge = 90.0;
    assert!(
        (covered + grout_total + wedge - 360.0).abs() < 1.0,
        "covered {covered} degrees"
    );
}

#[test]
fn the_corner_wedge_is_clear_of_every_strip() {
    let strips = partition(&tile_tier(), 9, 1.0, None::<()>).unwrap();
    for strip in &strips {
        let section = section_of(strip);
        for angle in [140.0_f64, 180.0, 220.0] {
            let rad = angle.to_radians();
            assert!(!section.contains(40.0 * rad.cos(), 40.0 * rad.sin()));
        }
    }
}

#[test]
fn tapered_tiers_partition_too() {
    let tier = TierSpec {
        bottom_radius: 58.42,
        top_radius: 48.26,
        ..tile_tier()
    };
    let strips = partition(&tier, 9, 1.0, None::<()>).unwrap();
    assert_eq!(strips.len(), 9);
    for strip in &strips {
        assert!(strip.is_manifold());
        // the taper survives the angular cuts
        assert_relative_eq!(strip.outer_radius_at(0.0).unwrap(), 58.42, epsilon = 1e-9);
        assert_relative_eq!(
            strip.outer_radius_at(254.0).unwrap(),
            48.26,
            epsilon = 1e-9
        );
    }
}

#[test]
fn strip_volumes_add_up_to_their_share_of_the_tier() {
    let tier = tile_tier();
    let strips = partition(&tier, 9, 1.0, None::<()>).unwrap();
    let tier_solid = tier.build::<()>(None).unwrap();
    let total: Real = strips.iter().map(|s| s.volume()).sum();
    // 9 × 29° of the tier's 270°
    let expected = tier_solid.volume() * (9.0 * 29.0) / 270.0;
    let rel = (total - expected).abs() / expected;
    assert!(rel < 1e-2, "relative volume error {rel}");
}

#[test]
fn grout_gap_converts_to_the_angle_it_subtends() {
    // 1/8" gap at the tile face radius
    let angle = grout_angle_from_gap(3.175, 43.18);
    assert_relative_eq!(angle, (3.175 / 43.18 as Real).to_degrees(), epsilon = 1e-12);
    assert!(angle > 4.0 && angle < 5.0);
}

#[test]
fn invalid_partitions_are_config_errors() {
    let tier = tile_tier();
    match partition(&tier, 0, 1.0, None::<()>) {
        Err(BuildError::Config(ConfigError::InvalidStripCount { count: 0 })) => {}
        other => panic!("expected InvalidStripCount, got {other:?}"),
    }
    match partition(&tier, 9, 30.0, None::<()>) {
        Err(BuildError::Config(ConfigError::GroutTooWide { .. })) => {}
        other => panic!("expected GroutTooWide, got {other:?}"),
    }
}
