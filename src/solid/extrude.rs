//! Sweeps from 2-D profiles to closed 3-D bodies.
//!
//! Both builders share one mesher: caps are earcut triangulations of the
//! cross-section, walls are ruled quads between the bottom boundary and its
//! radially-mapped image at the top. Because the map preserves angles and is
//! linear in the radius, the swept body's cross-section at height fraction
//! `t` is exactly the linear interpolation of the two end sections.

use super::{Polygon3, PrismRecord, Solid, Vertex};
use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use crate::profile::Profile;
use geo::orient::Direction;
use geo::{Area, Coord, LineString, MultiPolygon, Orient, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use std::sync::OnceLock;

/// Independent linear interpolation of inner and outer radius across a
/// sweep. Angles are preserved; only radial distance changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialMap {
    pub from_inner: Real,
    pub from_outer: Real,
    pub to_inner: Real,
    pub to_outer: Real,
}

impl RadialMap {
    /// The do-nothing map used by straight extrusions.
    pub const fn identity() -> Self {
        RadialMap {
            from_inner: 0.0,
            from_outer: 1.0,
            to_inner: 0.0,
            to_outer: 1.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        (self.from_inner - self.to_inner).abs() < EPSILON
            && (self.from_outer - self.to_outer).abs() < EPSILON
    }

    /// Radius of the top-face image of a bottom-face point at radius `r`.
    pub fn apply(&self, r: Real) -> Real {
        if self.is_identity() {
            return r;
        }
        let t = (r - self.from_inner) / (self.from_outer - self.from_inner);
        self.to_inner + t * (self.to_outer - self.to_inner)
    }

    fn scale_coord(&self, c: Coord<Real>) -> Coord<Real> {
        if self.is_identity() {
            return c;
        }
        let r = (c.x * c.x + c.y * c.y).sqrt();
        if r < EPSILON {
            return c;
        }
        let s = self.apply(r) / r;
        Coord {
            x: c.x * s,
            y: c.y * s,
        }
    }
}

/// Constant-radius sweep of a profile along +Z by `height`. Every horizontal
/// cross-section of the result is the profile itself.
pub fn extrude<S: Clone + Send + Sync + Debug>(
    profile: &Profile<S>,
    height: Real,
) -> Result<Solid<S>, GeometryError> {
    if height <= EPSILON {
        return Err(GeometryError::DegenerateSweep { height });
    }
    if profile.is_empty() {
        return Err(GeometryError::EmptyProfile {
            operation: "extrude",
        });
    }
    Ok(sweep(
        &profile.geom,
        RadialMap::identity(),
        0.0,
        height,
        profile.metadata.clone(),
    ))
}

/// Tapered sweep between two cross-sections `height` apart, radius varying
/// linearly with height for inner and outer surfaces independently.
///
/// The wall ruling is generated by applying `map` to the bottom boundary, so
/// ring correspondence is exact by construction; `top` is validated against
/// the mapped geometry and rejected with [`GeometryError::LoftMismatch`]
/// when it is not the radial image of `bottom`.
pub fn loft<S: Clone + Send + Sync + Debug>(
    bottom: &Profile<S>,
    top: &Profile<S>,
    map: RadialMap,
    height: Real,
) -> Result<Solid<S>, GeometryError> {
    if height <= EPSILON {
        return Err(GeometryError::DegenerateSweep { height });
    }
    if bottom.is_empty() || top.is_empty() {
        return Err(GeometryError::EmptyProfile { operation: "loft" });
    }

    let mapped = map_multi(&bottom.geom, &map);
    let mapped_area = mapped.unsigned_area();
    let top_area = top.geom.unsigned_area();
    let scale = mapped_area.max(top_area).max(1.0);
    if (mapped_area - top_area).abs() / scale > 1e-3 {
        return Err(GeometryError::LoftMismatch {
            mapped_area,
            top_area,
        });
    }

    Ok(sweep(
        &bottom.geom,
        map,
        0.0,
        height,
        bottom.metadata.clone(),
    ))
}

/// Shared mesher: walls from ruled quads, caps from earcut triangles, prism
/// record retained for later prismatic cuts.
pub(crate) fn sweep<S: Clone + Send + Sync + Debug>(
    base: &MultiPolygon<Real>,
    map: RadialMap,
    z0: Real,
    height: Real,
    metadata: Option<S>,
) -> Solid<S> {
    // coincident-edge booleans (e.g. re-cutting a wedge along an existing
    // edge) can leave zero-area fragments; they must not reach the mesher
    let base = MultiPolygon(
        base.0
            .iter()
            .filter(|p| p.unsigned_area() > EPSILON)
            .cloned()
            .collect(),
    )
    .orient(Direction::Default);
    let z1 = z0 + height;
    let mut polygons: Vec<Polygon3<S>> = Vec::new();

    for poly in &base {
        let rings = std::iter::once(poly.exterior()).chain(poly.interiors().iter());
        for ring in rings {
            wall_quads(ring, &map, z0, z1, &metadata, &mut polygons);
        }

        // bottom cap faces -Z
        cap_triangles(poly, z0, false, &metadata, &mut polygons);
        // top cap faces +Z, triangulated from the mapped section
        let top_poly = map_polygon(poly, &map);
        cap_triangles(&top_poly, z1, true, &metadata, &mut polygons);
    }

    Solid {
        polygons,
        bounding_box: OnceLock::new(),
        metadata,
        prism: Some(PrismRecord {
            base,
            map,
            z0,
            height,
        }),
    }
}

fn wall_quads<S: Clone + Send + Sync + Debug>(
    ring: &LineString<Real>,
    map: &RadialMap,
    z0: Real,
    z1: Real,
    metadata: &Option<S>,
    out: &mut Vec<Polygon3<S>>,
) {
    let coords = &ring.0;
    if coords.len() < 2 {
        return;
    }
    // rings are closed (first == last); walk the closing edge implicitly
    let n = coords.len() - 1;
    for i in 0..n {
        let a = coords[i];
        let b = coords[(i + 1) % n];
        if (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON {
            continue;
        }
        let a2 = map.scale_coord(a);
        let b2 = map.scale_coord(b);

        let pa = Point3::new(a.x, a.y, z0);
        let pb = Point3::new(b.x, b.y, z0);
        let pc = Point3::new(b2.x, b2.y, z1);
        let pd = Point3::new(a2.x, a2.y, z1);

        // CCW exteriors and CW holes both face outward with this winding
        let mut quad = Polygon3::new(
            vec![
                Vertex::new(pa, Vector3::z()),
                Vertex::new(pb, Vector3::z()),
                Vertex::new(pc, Vector3::z()),
                Vertex::new(pd, Vector3::z()),
            ],
            metadata.clone(),
        );
        let normal = quad.newell_normal();
        for v in &mut quad.vertices {
            v.normal = normal;
        }
        out.push(quad);
    }
}

fn cap_triangles<S: Clone + Send + Sync + Debug>(
    poly: &GeoPolygon<Real>,
    z: Real,
    upward: bool,
    metadata: &Option<S>,
    out: &mut Vec<Polygon3<S>>,
) {
    let normal = if upward {
        Vector3::z()
    } else {
        -Vector3::z()
    };
    for tri in poly.earcut_triangles() {
        let [p0, p1, p2] = tri.to_array();
        let signed2 =
            (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y);
        if signed2.abs() < EPSILON {
            continue;
        }
        // want CCW (viewed from +Z) for the top cap, CW for the bottom
        let ccw = signed2 > 0.0;
        let ordered = if ccw == upward {
            [p0, p1, p2]
        } else {
            [p0, p2, p1]
        };
        out.push(Polygon3::new(
            ordered
                .iter()
                .map(|c| Vertex::new(Point3::new(c.x, c.y, z), normal))
                .collect(),
            metadata.clone(),
        ));
    }
}

fn map_polygon(poly: &GeoPolygon<Real>, map: &RadialMap) -> GeoPolygon<Real> {
    if map.is_identity() {
        return poly.clone();
    }
    let ext = LineString::new(
        poly.exterior()
            .0
            .iter()
            .map(|&c| map.scale_coord(c))
            .collect(),
    );
    let ints = poly
        .interiors()
        .iter()
        .map(|ring| {
            LineString::new(ring.0.iter().map(|&c| map.scale_coord(c)).collect())
        })
        .collect();
    GeoPolygon::new(ext, ints)
}

fn map_multi(mp: &MultiPolygon<Real>, map: &RadialMap) -> MultiPolygon<Real> {
    MultiPolygon(mp.0.iter().map(|p| map_polygon(p, map)).collect())
}
