//! Fixture and reference solids for the grinder mount.
//!
//! Frame convention: the base plate's bottom face is z = 0, blade travel is
//! +X, the blade disc lies in the XZ plane through y = 0, and the motor body
//! extends toward -X. Brackets flank the gear head in ±Y so their bolt holes
//! line up with the side handle holes.

use super::{COLLAR_WIDTH, MountDimensions, MountReport};
use crate::errors::BuildError;
use crate::float_types::Real;
use crate::profile::{CIRCLE_SEGMENTS, HOLE_SEGMENTS, Profile};
use crate::scene::{Part, PartMeta};
use crate::solid::extrude;
use crate::traits::Shape3;

/// Inset of the carriage bolt holes from the base plate edges.
const CARRIAGE_HOLE_INSET: Real = 12.0;
/// Clearance diameter for the M8 carriage bolts.
const CARRIAGE_HOLE_DIA: Real = 8.5;
/// Diametral clearance added to the handle thread for its bolt hole.
const HANDLE_HOLE_CLEARANCE: Real = 1.0;
/// Width of the collar's split gap.
const SPLIT_GAP_WIDTH: Real = 10.0;
/// Clamp ear plate size, tangential x radial.
const EAR_WIDTH: Real = 12.0;
const EAR_HEIGHT: Real = 20.0;
/// Clearance diameter for the M6 clamp bolts.
const EAR_BOLT_DIA: Real = 7.0;
/// Support leg width and how far a leg laps onto the collar ring.
const LEG_WIDTH: Real = 12.0;
const LEG_LAP: Real = 6.0;
/// Tangential offset of the support legs from the collar centerline.
const LEG_OFFSET: Real = 15.0;

/// Build the fixture solids plus reference grinder geometry, in display
/// order. Pure function of the inputs and the derived report.
pub fn build_parts(
    dims: &MountDimensions,
    report: &MountReport,
) -> Result<Vec<Part>, BuildError> {
    let mut parts = vec![base_plate(dims, report)?];
    parts.extend(brackets(dims, report)?);
    parts.push(shaft_collar(dims, report)?);
    parts.extend(reference_geometry(dims, report)?);
    Ok(parts)
}

/// Base plate: rectangle minus the blade kerf slot minus four carriage bolt
/// holes, extruded to the plate thickness.
fn base_plate(dims: &MountDimensions, report: &MountReport) -> Result<Part, BuildError> {
    let meta = PartMeta::solid("base_plate", "slategray");
    let mut plate = Profile::centered_rectangle(
        dims.base_length,
        dims.base_width,
        Some(meta),
    );

    let kerf: Profile<PartMeta> = Profile::slot(
        report.kerf_slot_length,
        dims.kerf_slot_width,
        HOLE_SEGMENTS,
        None,
    );
    plate = plate.difference(&kerf);

    let hx = dims.base_length * 0.5 - CARRIAGE_HOLE_INSET;
    let hy = dims.base_width * 0.5 - CARRIAGE_HOLE_INSET;
    for (x, y) in [(hx, hy), (hx, -hy), (-hx, hy), (-hx, -hy)] {
        let hole: Profile<PartMeta> = Profile::hole(CARRIAGE_HOLE_DIA, x, y, None);
        plate = plate.difference(&hole);
    }

    Ok(extrude(&plate, dims.base_thickness)?)
}

/// L-brackets, two welded plates per side: an upright whose bolt hole faces
/// the gear head's handle hole, and a foot plate on the base. The upright
/// runs one thread diameter above the hole centerline for edge distance.
fn brackets(dims: &MountDimensions, report: &MountReport) -> Result<Vec<Part>, BuildError> {
    let upright_height = report.bracket_vertical + dims.handle_thread;
    let hole_dia = dims.handle_thread + HANDLE_HOLE_CLEARANCE;
    // brackets center on the handle holes, mid gear head
    let bracket_x = -dims.gear_head_length * 0.5;
    let inner_face_y = dims.handle_hole_spacing * 0.5 + dims.bracket_standoff;

    let upright_profile: Profile<PartMeta> =
        Profile::rectangle(dims.bracket_width, upright_height, None).difference(
            &Profile::hole(
                hole_dia,
                dims.bracket_width * 0.5,
                report.bracket_vertical,
                None,
            ),
        );
    // stand the plate up: profile y becomes world z, the plate thickness
    // ends up along -Y
    let upright = extrude(&upright_profile, dims.bracket_steel)?
        .rotate(90.0, 0.0, 0.0)
        .translate(
            bracket_x - dims.bracket_width * 0.5,
            inner_face_y + dims.bracket_steel,
            dims.base_thickness,
        );

    let foot_profile: Profile<PartMeta> =
        Profile::rectangle(dims.bracket_width, report.bracket_horizontal, None);
    let foot = extrude(&foot_profile, dims.bracket_steel)?.translate(
        bracket_x - dims.bracket_width * 0.5,
        inner_face_y - report.bracket_horizontal,
        dims.base_thickness,
    );

    let name = |side: &str, leg: &str| format!("bracket_{side}_{leg}");
    let mut out = Vec::with_capacity(4);
    for (part, label) in [(&upright, "upright"), (&foot, "foot")] {
        let mut p = part.clone();
        p.metadata = Some(PartMeta::solid(&name("left", label), "silver"));
        out.push(p);
    }
    for (part, label) in [(&upright, "upright"), (&foot, "foot")] {
        let mut p = part.mirror_xz();
        p.metadata = Some(PartMeta::solid(&name("right", label), "silver"));
        out.push(p);
    }
    Ok(out)
}

/// Split shaft collar around the motor body: ring with a clamp gap, two
/// clamp ears with bolt holes, and support legs down to the base plate when
/// the geometry leaves room for them. Built in cross-section and extruded
/// along the motor axis.
fn shaft_collar(dims: &MountDimensions, report: &MountReport) -> Result<Part, BuildError> {
    let od = report.collar_outer_dia;
    let id = report.collar_inner_dia;
    let meta = PartMeta::solid("shaft_collar", "gray");

    let mut section =
        Profile::annulus(od * 0.5, id * 0.5, CIRCLE_SEGMENTS, Some(meta))?;

    // clamp ears flanking the split, lapped onto the ring
    let ear_x = SPLIT_GAP_WIDTH * 0.5 + EAR_WIDTH * 0.5;
    let ear_y = od * 0.5 + EAR_HEIGHT * 0.5 - 4.0;
    for x in [ear_x, -ear_x] {
        let ear: Profile<PartMeta> =
            Profile::centered_rectangle(EAR_WIDTH, EAR_HEIGHT, None).translate(x, ear_y);
        section = section.union(&ear);
    }

    // support legs to the base, only when the collar hangs high enough to
    // need them
    let leg_drop = report.blade_center_z - dims.base_thickness;
    if leg_drop > od * 0.5 - LEG_LAP {
        let leg_top = -(od * 0.5 - LEG_LAP);
        let leg_len = leg_top + leg_drop;
        for x in [LEG_OFFSET, -LEG_OFFSET] {
            let leg: Profile<PartMeta> =
                Profile::rectangle(LEG_WIDTH, leg_len, None)
                    .translate(x - LEG_WIDTH * 0.5, -leg_drop);
            section = section.union(&leg);
        }
    }

    // the split: cut from just under the bore to past the rim
    let split_height = (od - id) * 0.5 + 4.0;
    let split: Profile<PartMeta> =
        Profile::centered_rectangle(SPLIT_GAP_WIDTH, split_height, None)
            .translate(0.0, (od + id) * 0.25);
    section = section.difference(&split);

    // M6 clamp bolt holes through the ears
    for x in [ear_x, -ear_x] {
        let hole: Profile<PartMeta> =
            Profile::hole(EAR_BOLT_DIA, x, od * 0.5 + 8.0, None);
        section = section.difference(&hole);
    }

    let collar_x = -dims.collar_dist_from_blade - COLLAR_WIDTH * 0.5;
    Ok(extrude(&section, COLLAR_WIDTH)?
        .rotate(90.0, 0.0, 90.0)
        .translate(collar_x, 0.0, report.blade_center_z))
}

/// Visualization-only grinder geometry: gear head, motor body, blade.
fn reference_geometry(
    dims: &MountDimensions,
    report: &MountReport,
) -> Result<Vec<Part>, BuildError> {
    let z = report.blade_center_z;

    let gear_profile = Profile::circle(
        dims.gear_head_dia * 0.5,
        CIRCLE_SEGMENTS,
        Some(PartMeta::reference("gear_head", "darkseagreen")),
    );
    let gear_head = extrude(&gear_profile, dims.gear_head_length)?
        .rotate(90.0, 0.0, 90.0)
        .translate(-dims.gear_head_length, 0.0, z);

    let motor_profile = Profile::circle(
        dims.motor_body_dia * 0.5,
        CIRCLE_SEGMENTS,
        Some(PartMeta::reference("motor_body", "dimgray")),
    );
    let motor_body = extrude(&motor_profile, dims.motor_body_length)?
        .rotate(90.0, 0.0, 90.0)
        .translate(
            -dims.gear_head_length - dims.motor_body_length,
            0.0,
            z,
        );

    let blade_profile = Profile::annulus(
        dims.blade_dia * 0.5,
        dims.spindle_dia * 0.5,
        CIRCLE_SEGMENTS,
        Some(PartMeta::reference("blade", "indianred")),
    )?;
    let blade = extrude(&blade_profile, dims.blade_thickness)?
        .rotate(90.0, 0.0, 0.0)
        .translate(0.0, dims.blade_thickness * 0.5, z);

    Ok(vec![gear_head, motor_body, blade])
}
