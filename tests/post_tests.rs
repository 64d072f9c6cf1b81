use approx::assert_relative_eq;
use arcpost::ConfigError;
use arcpost::Shape3;
use arcpost::float_types::{INCH, Real, UNIT_TOLERANCE};
use arcpost::post::{PostDimensions, resolve_remaining_height};
use proptest::prelude::*;

#[test]
fn counter_to_mantel_resolves_the_remaining_tier() {
    // 28" total; 1" + 10" + 1" bases/tier and a 3" cap leave a 13" tier2
    let resolved = PostDimensions::counter_to_mantel().resolve().unwrap();
    assert_relative_eq!(resolved.tier2_height, 330.2, epsilon = 1e-6);

    let total: Real = resolved.sections.iter().map(|s| s.tier.height).sum();
    assert!((total - 28.0 * INCH).abs() < UNIT_TOLERANCE);
}

#[test]
fn sections_stack_bottom_to_top_with_no_gaps() {
    let resolved = PostDimensions::counter_to_mantel().resolve().unwrap();
    let names: Vec<&str> = resolved.sections.iter().map(|s| s.name).collect();
    assert_eq!(names, ["base1", "tier1", "base2", "tier2", "cap"]);

    let mut z = 0.0;
    for section in &resolved.sections {
        assert_relative_eq!(section.tier.z_offset, z, epsilon = 1e-9);
        z += section.tier.height;
    }
    assert_relative_eq!(z, 711.2, epsilon = 1e-9);
}

#[test]
fn the_built_post_is_five_closed_solids() {
    let parts = PostDimensions::counter_to_mantel().build().unwrap();
    assert_eq!(parts.len(), 5);

    for part in &parts {
        let meta = part.metadata.as_ref().unwrap();
        assert!(!meta.reference, "{} should be a fabricated part", meta.name);
        assert!(part.is_manifold(), "{} is not closed", meta.name);
    }

    // the stack tops out at the total height
    let top = parts
        .iter()
        .map(|p| p.bounding_box().maxs.z)
        .fold(Real::MIN, Real::max);
    assert_relative_eq!(top, 711.2, epsilon = 1e-9);

    // bases and cap overhang the tiers radially
    let base1 = &parts[0];
    let tier1 = &parts[1];
    assert!(base1.bounding_box().maxs.x > tier1.bounding_box().maxs.x);
}

#[test]
fn tapered_post_narrows_going_up() {
    let dims = PostDimensions::tapered_mantel();
    let parts = dims.build().unwrap();
    assert_eq!(parts.len(), 5);

    let tier1 = &parts[1];
    // tier1 runs from 1" to 9"; radius interpolates 2.3" -> 1.9"
    let z0 = 1.0 * INCH;
    let z1 = 9.0 * INCH;
    assert_relative_eq!(
        tier1.outer_radius_at(z0).unwrap(),
        2.3 * INCH,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        tier1.outer_radius_at(z1).unwrap(),
        1.9 * INCH,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        tier1.outer_radius_at((z0 + z1) * 0.5).unwrap(),
        2.1 * INCH,
        epsilon = 1e-9
    );

    for part in &parts {
        assert!(part.is_manifold());
    }
}

#[test]
fn non_physical_heights_are_rejected() {
    let dims = PostDimensions {
        tier1_height: 27.0 * INCH,
        ..PostDimensions::counter_to_mantel()
    };
    // 1 + 27 + 1 + 3 > 28: nothing left for tier2
    let err = dims.resolve().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositiveDimension {
            name: "tier2_height",
            ..
        }
    ));
}

#[test]
fn widening_tapers_are_rejected() {
    let dims = PostDimensions {
        narrow_radius: 2.0 * INCH,
        ..PostDimensions::tapered_mantel()
    };
    let err = dims.resolve().unwrap_err();
    assert!(matches!(err, ConfigError::TaperInversion { name: "tier2", .. }));
}

#[test]
fn dimension_sets_round_trip_through_serde() {
    let dims = PostDimensions::tapered_mantel();
    let json = serde_json::to_string(&dims).unwrap();
    let back: PostDimensions = serde_json::from_str(&json).unwrap();
    assert_eq!(dims, back);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn remaining_height_always_completes_the_total(
        total in 100.0..2000.0f64,
        a in 1.0..600.0f64,
        b in 1.0..600.0f64,
        c in 1.0..600.0f64,
        d in 1.0..600.0f64,
    ) {
        let given = [("a", a), ("b", b), ("c", c), ("d", d)];
        let sum = a + b + c + d;
        match resolve_remaining_height(total, &given, "rest") {
            Ok(rest) => {
                prop_assert!(rest > 0.0);
                prop_assert!((rest + sum - total).abs() < 1e-6);
            }
            Err(ConfigError::NonPositiveDimension { name, .. }) => {
                prop_assert_eq!(name, "rest");
                prop_assert!(total - sum <= 0.0);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn resolving_twice_is_deterministic(
        tier1 in 100.0..400.0f64,
        cap in 50.0..150.0f64,
    ) {
        let dims = PostDimensions {
            tier1_height: tier1,
            cap_height: cap,
            ..PostDimensions::counter_to_mantel()
        };
        match (dims.resolve(), dims.resolve()) {
            (Ok(one), Ok(two)) => prop_assert_eq!(one, two),
            (Err(one), Err(two)) => prop_assert_eq!(one, two),
            _ => prop_assert!(false, "resolve was not deterministic"),
        }
    }
}

#[test]
fn built_solids_can_still_be_placed_by_the_caller() {
    // the orchestration layer may move parts around for display
    let parts = PostDimensions::counter_to_mantel().build().unwrap();
    let moved = parts[0].translate(100.0, 0.0, 0.0);
    assert_relative_eq!(
        moved.bounding_box().maxs.x,
        parts[0].bounding_box().maxs.x + 100.0,
        epsilon = 1e-9
    );
}
