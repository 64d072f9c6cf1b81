//! 2-D cross-section regions in the XY plane.
//!
//! A [`Profile`] is the closed planar region every solid in this crate is
//! swept from. Regions are stored as a [`geo::MultiPolygon`] and combined
//! exclusively through [`BooleanKind`] operations, so there is no ambient
//! sketch state: each constructor and combinator returns a new owned value.

mod shapes;

pub use shapes::{
    AnnularSection, CIRCLE_SEGMENTS, CUTTER_REACH_FACTOR, HOLE_SEGMENTS, WEDGE_BISECTOR_DEG,
};

use crate::float_types::{EPSILON, Real};
use geo::orient::Direction;
use geo::{
    AffineOps, AffineTransform, Area, BooleanOps, Contains, MultiPolygon, Orient, Point,
};
use std::fmt::Debug;

/// Closed set of boolean region operations. Matched exhaustively wherever a
/// combination mode is chosen; there are no string-keyed modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanKind {
    Union,
    Subtract,
    Intersect,
}

/// A closed 2-D region in the XY plane.
///
/// Orientation is normalized on construction: exterior rings wind
/// counter-clockwise, holes clockwise. Sliver polygons below the degeneracy
/// threshold are dropped so that boolean residue never reaches the mesher.
#[derive(Debug, Clone)]
pub struct Profile<S: Clone + Send + Sync + Debug> {
    pub geom: MultiPolygon<Real>,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Profile<S> {
    /// The empty region.
    pub fn new() -> Self {
        Profile {
            geom: MultiPolygon(Vec::new()),
            metadata: None,
        }
    }

    /// Wrap an existing geo region, normalizing winding and discarding
    /// zero-area fragments.
    pub fn from_geo(geom: MultiPolygon<Real>, metadata: Option<S>) -> Self {
        let polys = geom
            .0
            .into_iter()
            .filter(|p| p.unsigned_area() > EPSILON)
            .map(|p| p.orient(Direction::Default))
            .collect();
        Profile {
            geom: MultiPolygon(polys),
            metadata,
        }
    }

    /// Combine two regions. The result carries `self`'s metadata.
    pub fn boolean(&self, other: &Self, kind: BooleanKind) -> Self {
        let geom = match kind {
            BooleanKind::Union => self.geom.union(&other.geom),
            BooleanKind::Subtract => self.geom.difference(&other.geom),
            BooleanKind::Intersect => self.geom.intersection(&other.geom),
        };
        Profile::from_geo(geom, self.metadata.clone())
    }

    pub fn union(&self, other: &Self) -> Self {
        self.boolean(other, BooleanKind::Union)
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.boolean(other, BooleanKind::Subtract)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        self.boolean(other, BooleanKind::Intersect)
    }

    pub fn is_empty(&self) -> bool {
        self.geom.0.is_empty()
    }

    pub fn area(&self) -> Real {
        self.geom.unsigned_area()
    }

    pub fn contains(&self, x: Real, y: Real) -> bool {
        self.geom.contains(&Point::new(x, y))
    }

    /// Returns a copy shifted by (dx, dy).
    pub fn translate(&self, dx: Real, dy: Real) -> Self {
        Profile {
            geom: self
                .geom
                .affine_transform(&AffineTransform::translate(dx, dy)),
            metadata: self.metadata.clone(),
        }
    }

    /// All boundary rings, exterior first per polygon, closing duplicate
    /// dropped. Ring winding follows the normalized orientation.
    pub fn rings(&self) -> Vec<Vec<[Real; 2]>> {
        let mut out = Vec::new();
        for poly in &self.geom {
            out.push(ring_coords(poly.exterior()));
            for hole in poly.interiors() {
                out.push(ring_coords(hole));
            }
        }
        out
    }

    /// Total angular coverage, in degrees, of this region on the circle of
    /// the given radius, measured by sampling every `step_deg`.
    ///
    /// The tests use this to pin down wedge and grout widths; resolution is
    /// limited by both the sampling step and the circle discretization.
    pub fn coverage_degrees(&self, radius: Real, step_deg: Real) -> Real {
        let mut covered = 0.0;
        let mut angle: Real = -180.0 + step_deg * 0.5;
        while angle < 180.0 {
            let rad = angle.to_radians();
            if self.contains(radius * rad.cos(), radius * rad.sin()) {
                covered += step_deg;
            }
            angle += step_deg;
        }
        covered
    }
}

impl<S: Clone + Send + Sync + Debug> Default for Profile<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn ring_coords(ring: &geo::LineString<Real>) -> Vec<[Real; 2]> {
    let mut pts: Vec<[Real; 2]> = ring.0.iter().map(|c| [c.x, c.y]).collect();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_kinds_are_exhaustive_over_overlapping_squares() {
        let a: Profile<()> = Profile::rectangle(2.0, 2.0, None);
        let b = Profile::rectangle(2.0, 2.0, None).translate(1.0, 0.0);

        let union = a.boolean(&b, BooleanKind::Union);
        let cut = a.boolean(&b, BooleanKind::Subtract);
        let both = a.boolean(&b, BooleanKind::Intersect);

        assert!((union.area() - 6.0).abs() < 1e-9);
        assert!((cut.area() - 2.0).abs() < 1e-9);
        assert!((both.area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn difference_with_disjoint_region_is_identity() {
        let a: Profile<()> = Profile::rectangle(1.0, 1.0, None);
        let far = Profile::rectangle(1.0, 1.0, None).translate(10.0, 10.0);
        let cut = a.difference(&far);
        assert!((cut.area() - a.area()).abs() < 1e-9);
    }

    #[test]
    fn rings_drop_the_closing_duplicate() {
        let a: Profile<()> = Profile::rectangle(1.0, 1.0, None);
        let rings = a.rings();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
    }
}
