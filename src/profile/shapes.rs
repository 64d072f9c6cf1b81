//! Shape constructors and the annular cross-section builder.

use crate::errors::ConfigError;
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::profile::Profile;
use geo::{LineString, Polygon as GeoPolygon, coord};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Bisector of the removed corner wedge: the post's outward diagonal, fixed
/// for every tier and strip this crate builds.
pub const WEDGE_BISECTOR_DEG: Real = 180.0;

/// Vertex count for full circles. A multiple of 8 keeps ring vertices exactly
/// on the 135°/225° wedge edges, so the corner cut lands on existing points
/// instead of splitting chords there.
pub const CIRCLE_SEGMENTS: usize = 256;

/// Vertex count for small clearance holes.
pub const HOLE_SEGMENTS: usize = 64;

/// Cutter regions reach this multiple of the outer radius past the origin.
/// Anything below ~1.5 risks a cut that grazes the rim and leaves slivers.
pub const CUTTER_REACH_FACTOR: Real = 3.0;

impl<S: Clone + Send + Sync + Debug> Profile<S> {
    /// Creates a 2D circle centered on the origin, discretized with uniform
    /// angular sampling: θᵢ = 2πi/n.
    pub fn circle(radius: Real, segments: usize, metadata: Option<S>) -> Self {
        if segments < 3 {
            return Profile::new();
        }
        let mut coords: Vec<(Real, Real)> = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                (radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        // close it
        coords.push(coords[0]);
        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Profile::from_geo(geo::MultiPolygon(vec![polygon_2d]), metadata)
    }

    /// Creates a 2D rectangle with one corner at the origin.
    pub fn rectangle(width: Real, length: Real, metadata: Option<S>) -> Self {
        let outer = LineString::new(vec![
            coord! {x: 0.0, y: 0.0},
            coord! {x: width, y: 0.0},
            coord! {x: width, y: length},
            coord! {x: 0.0, y: length},
            coord! {x: 0.0, y: 0.0},
        ]);
        Profile::from_geo(
            geo::MultiPolygon(vec![GeoPolygon::new(outer, vec![])]),
            metadata,
        )
    }

    /// Creates a 2D rectangle centered on the origin, the way the shop
    /// drawings dimension plates.
    pub fn centered_rectangle(width: Real, length: Real, metadata: Option<S>) -> Self {
        Profile::rectangle(width, length, metadata).translate(-width * 0.5, -length * 0.5)
    }

    /// A stadium (slot) of overall `length` along X and `width` across,
    /// centered on the origin. Used for the blade kerf in the base plate.
    pub fn slot(length: Real, width: Real, segments: usize, metadata: Option<S>) -> Self {
        let r = width * 0.5;
        let half = (length * 0.5 - r).max(0.0);
        let per_cap = segments.max(8) / 2;
        let mut coords: Vec<(Real, Real)> = Vec::with_capacity(2 * per_cap + 3);
        // right cap, -90° to +90°
        for i in 0..=per_cap {
            let theta = -PI * 0.5 + PI * (i as Real) / (per_cap as Real);
            coords.push((half + r * theta.cos(), r * theta.sin()));
        }
        // left cap, +90° to +270°
        for i in 0..=per_cap {
            let theta = PI * 0.5 + PI * (i as Real) / (per_cap as Real);
            coords.push((-half + r * theta.cos(), r * theta.sin()));
        }
        coords.push(coords[0]);
        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Profile::from_geo(geo::MultiPolygon(vec![polygon_2d]), metadata)
    }

    /// A circular clearance hole of the given diameter at (x, y).
    pub fn hole(diameter: Real, x: Real, y: Real, metadata: Option<S>) -> Self {
        Profile::circle(diameter * 0.5, HOLE_SEGMENTS, metadata).translate(x, y)
    }

    /// Full annulus: outer circle minus inner circle, both discretized with
    /// the same segment count so their vertices share angles.
    pub fn annulus(
        outer_radius: Real,
        inner_radius: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Result<Self, ConfigError> {
        if inner_radius <= EPSILON || inner_radius >= outer_radius {
            return Err(ConfigError::InvalidRadii {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        let outer = Profile::circle(outer_radius, segments, metadata);
        let inner: Profile<S> = Profile::circle(inner_radius, segments, None);
        Ok(outer.difference(&inner))
    }

    /// Cutter for the removed corner wedge: an origin-anchored fan of the
    /// given angular width centered on [`WEDGE_BISECTOR_DEG`], reaching
    /// `reach` radially. The fan is sampled every ≤30° so its boundary never
    /// sags below `reach · cos 15°`; callers size `reach` with
    /// [`CUTTER_REACH_FACTOR`] to guarantee the cut clears the rim.
    pub fn wedge_cutter(width_degrees: Real, reach: Real, metadata: Option<S>) -> Self {
        let steps = (width_degrees / 30.0).ceil().max(1.0) as usize;
        let start = WEDGE_BISECTOR_DEG - width_degrees * 0.5;
        let mut coords: Vec<(Real, Real)> = Vec::with_capacity(steps + 3);
        coords.push((0.0, 0.0));
        for i in 0..=steps {
            let theta =
                (start + width_degrees * (i as Real) / (steps as Real)).to_radians();
            coords.push((reach * theta.cos(), reach * theta.sin()));
        }
        coords.push((0.0, 0.0));
        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Profile::from_geo(geo::MultiPolygon(vec![polygon_2d]), metadata)
    }

    /// Cutter covering the half-plane counter-clockwise of the radial line at
    /// `edge_degrees`, i.e. the angular interval (edge, edge + 180°), out to
    /// `reach` from the origin.
    pub fn half_plane_cutter(edge_degrees: Real, reach: Real, metadata: Option<S>) -> Self {
        let e = edge_degrees.to_radians();
        let (dx, dy) = (e.cos(), e.sin());
        // left normal of the edge direction
        let (nx, ny) = (-dy, dx);
        let coords = vec![
            (-reach * dx, -reach * dy),
            (reach * dx, reach * dy),
            (reach * (dx + nx), reach * (dy + ny)),
            (reach * (nx - dx), reach * (ny - dy)),
            (-reach * dx, -reach * dy),
        ];
        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Profile::from_geo(geo::MultiPolygon(vec![polygon_2d]), metadata)
    }
}

/// The annular, angularly-trimmed cross-section every post tier is swept
/// from: outer/inner radius plus the angular span left after the corner
/// wedge is removed. The wedge bisector is fixed at [`WEDGE_BISECTOR_DEG`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnularSection {
    pub outer_radius: Real,
    pub inner_radius: Real,
    pub span_degrees: Real,
}

impl AnnularSection {
    pub fn new(outer_radius: Real, inner_radius: Real, span_degrees: Real) -> Self {
        AnnularSection {
            outer_radius,
            inner_radius,
            span_degrees,
        }
    }

    /// Section from an outer radius and wall thickness.
    pub fn from_wall(outer_radius: Real, wall_thickness: Real, span_degrees: Real) -> Self {
        AnnularSection::new(outer_radius, outer_radius - wall_thickness, span_degrees)
    }

    pub fn wall_thickness(&self) -> Real {
        self.outer_radius - self.inner_radius
    }

    /// Angular width of the removed wedge.
    pub fn wedge_degrees(&self) -> Real {
        360.0 - self.span_degrees
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inner_radius <= EPSILON || self.inner_radius >= self.outer_radius {
            return Err(ConfigError::InvalidRadii {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        if self.span_degrees <= 0.0 || self.span_degrees > 360.0 {
            return Err(ConfigError::InvalidSpan {
                span: self.span_degrees,
            });
        }
        Ok(())
    }

    /// Build the cross-section: full annulus, then the corner wedge removed
    /// by subtracting an oversized origin-anchored fan. A full 360° span
    /// skips the wedge cut entirely.
    pub fn profile<S: Clone + Send + Sync + Debug>(
        &self,
        metadata: Option<S>,
    ) -> Result<Profile<S>, ConfigError> {
        self.validate()?;
        let annulus = Profile::annulus(
            self.outer_radius,
            self.inner_radius,
            CIRCLE_SEGMENTS,
            metadata,
        )?;
        if self.span_degrees >= 360.0 {
            return Ok(annulus);
        }
        let cutter: Profile<S> = Profile::wedge_cutter(
            self.wedge_degrees(),
            CUTTER_REACH_FACTOR * self.outer_radius,
            None,
        );
        Ok(annulus.difference(&cutter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_closes_and_has_requested_segments() {
        let c: Profile<()> = Profile::circle(10.0, 64, None);
        let rings = c.rings();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 64);
        // area of a regular 64-gon inscribed in r=10
        let expected = 0.5 * 64.0 * 10.0 * 10.0 * (TAU / 64.0).sin();
        assert!((c.area() - expected).abs() < 1e-6);
    }

    #[test]
    fn annulus_rejects_inverted_radii() {
        let r: Result<Profile<()>, _> = Profile::annulus(10.0, 12.0, 64, None);
        assert_eq!(
            r.unwrap_err(),
            ConfigError::InvalidRadii {
                inner: 12.0,
                outer: 10.0
            }
        );
    }

    #[test]
    fn wedge_cutter_reaches_well_past_the_rim() {
        let outer = 43.18;
        let cutter: Profile<()> =
            Profile::wedge_cutter(90.0, CUTTER_REACH_FACTOR * outer, None);
        // along the bisector, 1.5 outer radii out, we are still inside the cutter
        assert!(cutter.contains(-1.5 * outer, 0.0));
        // and the wedge edges are clear of the arc
        assert!(!cutter.contains(outer, 0.0));
    }

    #[test]
    fn half_plane_cutter_covers_its_side_only() {
        let c: Profile<()> = Profile::half_plane_cutter(0.0, 100.0, None);
        assert!(c.contains(10.0, 5.0)); // 26° is inside (0, 180)
        assert!(!c.contains(10.0, -5.0)); // -26° is outside
        assert!(c.contains(-10.0, 5.0)); // 153° is inside
    }
}
