//! Grinder-mount constraint solving.
//!
//! The solver takes measured grinder hardware plus a target blade exposure
//! below the base plate and derives every dependent bracket and collar
//! dimension from them. The measured inputs are never mutated; the output is
//! a report of derived lengths plus the fixture solids, and an exposure
//! check that flags — but does not fail — a miss, so a human can adjust
//! inputs before anything is cut or welded.

mod parts;

pub use parts::build_parts;

use crate::errors::{BuildError, ConfigError};
use crate::float_types::Real;
use crate::scene::Part;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed clearance added to the bracket's horizontal reach past the gear
/// head standoff.
pub const BRACKET_REACH_MARGIN: Real = 15.0;

/// Diametral clearance between the motor body and the collar bore.
pub const COLLAR_CLEARANCE: Real = 1.0;

/// Diametral span from the collar bore to its outside surface.
pub const COLLAR_WALL_SPAN: Real = 14.0;

/// Axial width of the shaft collar.
pub const COLLAR_WIDTH: Real = 25.0;

/// Kerf slot stops this far short of the base plate ends.
pub const KERF_SLOT_END_MARGIN: Real = 20.0;

/// Acceptable miss between target and realized blade exposure.
pub const EXPOSURE_TOLERANCE: Real = 1.0;

/// Measured grinder hardware and fixture design inputs, all in model units.
/// Measure the actual grinder before fabrication; the defaults are reference
/// dimensions for a 4.5" Makita-pattern machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountDimensions {
    // measured grinder hardware
    pub gear_head_dia: Real,
    pub gear_head_length: Real,
    /// M-thread nominal diameter of the side handle holes.
    pub handle_thread: Real,
    /// Center-to-center across the gear head.
    pub handle_hole_spacing: Real,
    /// Hole center above the spindle centerline.
    pub handle_hole_height: Real,
    pub motor_body_dia: Real,
    pub motor_body_length: Real,
    /// Blade face to guard-collar center.
    pub collar_dist_from_blade: Real,
    pub blade_dia: Real,
    pub blade_thickness: Real,
    pub spindle_dia: Real,

    // fixture design inputs
    pub base_thickness: Real,
    pub base_length: Real,
    pub base_width: Real,
    pub bracket_steel: Real,
    pub bracket_width: Real,
    pub bracket_standoff: Real,
    pub kerf_slot_width: Real,
    /// How much blade should protrude below the base plate.
    pub target_exposure: Real,
}

impl MountDimensions {
    /// Reference dimensions for a 4.5" (115 mm) grinder on a 1/4" steel
    /// base. Blade exposure targets the bottom third of the blade.
    pub fn makita_4p5() -> Self {
        MountDimensions {
            gear_head_dia: 65.0,
            gear_head_length: 45.0,
            handle_thread: 10.0,
            handle_hole_spacing: 65.0,
            handle_hole_height: 32.0,
            motor_body_dia: 57.0,
            motor_body_length: 180.0,
            collar_dist_from_blade: 12.0,
            blade_dia: 115.0,
            blade_thickness: 1.5,
            spindle_dia: 22.0,
            base_thickness: 6.35,
            base_length: 160.0,
            base_width: 100.0,
            bracket_steel: 6.35,
            bracket_width: 30.0,
            bracket_standoff: 5.0,
            kerf_slot_width: 4.0,
            target_exposure: 115.0 / 3.0,
        }
    }
}

/// Result of the exposure verification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureCheck {
    pub target: Real,
    pub realized: Real,
    pub tolerance: Real,
    pub passed: bool,
}

/// Derived mount dimensions, computed once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountReport {
    /// Blade centerline above the base plate's bottom face; negative means
    /// the centerline itself sits below the plate.
    pub blade_center_z: Real,
    /// Vertical leg: base top to handle-hole centerline.
    pub bracket_vertical: Real,
    /// Horizontal leg: upright face outward.
    pub bracket_horizontal: Real,
    pub collar_inner_dia: Real,
    pub collar_outer_dia: Real,
    pub kerf_slot_length: Real,
    pub exposure: ExposureCheck,
}

/// The chain of derived lengths. Pure function of the inputs; geometry comes
/// later, so bad measurements surface before anything is built.
pub fn derive(dims: &MountDimensions) -> Result<MountReport, ConfigError> {
    for (name, value) in [
        ("blade_dia", dims.blade_dia),
        ("base_thickness", dims.base_thickness),
        ("base_length", dims.base_length),
        ("base_width", dims.base_width),
        ("bracket_steel", dims.bracket_steel),
        ("bracket_width", dims.bracket_width),
        ("gear_head_dia", dims.gear_head_dia),
        ("motor_body_dia", dims.motor_body_dia),
        ("handle_hole_spacing", dims.handle_hole_spacing),
        ("kerf_slot_width", dims.kerf_slot_width),
    ] {
        if value <= 0.0 {
            return Err(ConfigError::NonPositiveDimension { name, value });
        }
    }

    let blade_radius = dims.blade_dia * 0.5;
    // exposure below the plate: blade bottom = center - radius = -target
    let blade_center_z = blade_radius - dims.target_exposure;

    let bracket_vertical =
        dims.handle_hole_height + blade_center_z - dims.base_thickness;
    if bracket_vertical <= 0.0 {
        return Err(ConfigError::NonPositiveDimension {
            name: "bracket_vertical",
            value: bracket_vertical,
        });
    }

    let bracket_horizontal = dims.handle_hole_spacing * 0.5 - dims.gear_head_dia * 0.5
        + dims.bracket_standoff
        + BRACKET_REACH_MARGIN;
    if bracket_horizontal <= 0.0 {
        return Err(ConfigError::NonPositiveDimension {
            name: "bracket_horizontal",
            value: bracket_horizontal,
        });
    }

    let kerf_slot_length = dims.base_length - KERF_SLOT_END_MARGIN;

    let realized = (blade_radius - blade_center_z).max(0.0);
    let exposure = ExposureCheck {
        target: dims.target_exposure,
        realized,
        tolerance: EXPOSURE_TOLERANCE,
        passed: (realized - dims.target_exposure).abs() < EXPOSURE_TOLERANCE,
    };

    debug!(
        blade_center_z,
        bracket_vertical, bracket_horizontal, "derived mount dimensions"
    );

    Ok(MountReport {
        blade_center_z,
        bracket_vertical,
        bracket_horizontal,
        collar_inner_dia: dims.motor_body_dia + COLLAR_CLEARANCE,
        collar_outer_dia: dims.motor_body_dia + COLLAR_WALL_SPAN,
        kerf_slot_length,
        exposure,
    })
}

/// Derived report plus the fixture and reference solids, in display order.
#[derive(Debug, Clone)]
pub struct MountSolution {
    pub report: MountReport,
    pub parts: Vec<Part>,
}

/// Full solve: derive dimensions, verify the exposure target, build solids.
/// A failed exposure check is reported and flagged, never silently passed —
/// and never fatal, so the model can still be inspected.
pub fn solve(dims: &MountDimensions) -> Result<MountSolution, BuildError> {
    let report = derive(dims)?;
    if !report.exposure.passed {
        warn!(
            target_exposure = report.exposure.target,
            realized_exposure = report.exposure.realized,
            "blade exposure misses its target; adjust inputs before fabrication"
        );
    }
    let parts = build_parts(dims, &report)?;
    Ok(MountSolution { report, parts })
}
