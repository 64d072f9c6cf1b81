//! 3-D bodies as closed polygon soups.
//!
//! A [`Solid`] is produced by exactly one sweep call ([`extrude`] or
//! [`loft`]) and is immutable afterwards; every operation returns a new owned
//! body. While a solid is still an upright Z-prism it carries a
//! [`PrismRecord`] — its generating cross-section and radial map — which is
//! what makes prismatic re-cuts and cross-section queries exact instead of
//! approximate mesh surgery.

mod extrude;
mod manifold;

pub use extrude::{RadialMap, extrude, loft};

use crate::errors::GeometryError;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::{EPSILON, Real};
use crate::profile::{BooleanKind, Profile};
use crate::traits::Shape3;
use geo::{AffineOps, AffineTransform, Area, BooleanOps, MultiPolygon};
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use std::fmt::Debug;
use std::sync::OnceLock;

/// A vertex of a polygon, position plus outward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    #[inline]
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex { pos, normal }
    }

    /// Flip the normal in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }
}

/// A planar convex face with at least three vertices.
#[derive(Debug, Clone)]
pub struct Polygon3<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub metadata: Option<S>,
}

impl<S: Clone> Polygon3<S> {
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        debug_assert!(vertices.len() >= 3, "degenerate polygon");
        Polygon3 { vertices, metadata }
    }

    /// Face normal by Newell's method; robust for any planar winding.
    pub fn newell_normal(&self) -> Vector3<Real> {
        let mut n = Vector3::zeros();
        let len = self.vertices.len();
        for i in 0..len {
            let a = self.vertices[i].pos;
            let b = self.vertices[(i + 1) % len].pos;
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        if n.norm() > EPSILON {
            n.normalize()
        } else {
            Vector3::z()
        }
    }

    /// Reverse winding and flip vertex normals.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
    }

    /// Fan triangulation. Faces in this crate are convex by construction
    /// (ruled wall quads and earcut cap triangles), so a fan is exact.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let mut tris = Vec::with_capacity(self.vertices.len().saturating_sub(2));
        for i in 1..self.vertices.len() - 1 {
            tris.push([
                self.vertices[0],
                self.vertices[i],
                self.vertices[i + 1],
            ]);
        }
        tris
    }
}

/// Sweep bookkeeping kept while the solid is still an upright Z-prism:
/// the cross-section at the bottom face, the radial map to the top face,
/// and the vertical extent.
#[derive(Debug, Clone)]
pub struct PrismRecord {
    pub base: MultiPolygon<Real>,
    pub map: RadialMap,
    pub z0: Real,
    pub height: Real,
}

/// An owned 3-D body.
#[derive(Debug, Clone)]
pub struct Solid<S: Clone + Send + Sync + Debug> {
    /// Boundary faces, consistently outward-oriented.
    pub polygons: Vec<Polygon3<S>>,

    /// Lazily calculated AABB spanning `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Opaque display metadata; no geometric meaning.
    pub metadata: Option<S>,

    pub(crate) prism: Option<PrismRecord>,
}

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Build a Solid from an existing polygon list. No prism record, so
    /// prismatic operations are unavailable on the result.
    pub fn from_polygons(polygons: Vec<Polygon3<S>>, metadata: Option<S>) -> Self {
        Solid {
            polygons,
            bounding_box: OnceLock::new(),
            metadata,
            prism: None,
        }
    }

    /// All vertices of all faces.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Enclosed volume by the divergence theorem over the triangulated
    /// boundary. Orientation-independent (absolute value).
    pub fn volume(&self) -> Real {
        let mut six_v = 0.0;
        for poly in &self.polygons {
            for [a, b, c] in poly.triangulate() {
                six_v += a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords));
            }
        }
        (six_v / 6.0).abs()
    }

    /// The generating cross-section record, if the solid is still an
    /// upright prism.
    pub fn prism_record(&self) -> Option<&PrismRecord> {
        self.prism.as_ref()
    }

    /// Largest radial distance of the boundary at height `z`, from the
    /// prism record. For annular solids this is the outer surface radius.
    pub fn outer_radius_at(&self, z: Real) -> Option<Real> {
        self.radius_extreme_at(z, true)
    }

    /// Smallest radial distance of the boundary at height `z`. For annular
    /// solids this is the inner surface radius (to within the circle
    /// discretization chord error).
    pub fn inner_radius_at(&self, z: Real) -> Option<Real> {
        self.radius_extreme_at(z, false)
    }

    fn radius_extreme_at(&self, z: Real, outer: bool) -> Option<Real> {
        let record = self.prism.as_ref()?;
        if z < record.z0 - EPSILON || z > record.z0 + record.height + EPSILON {
            return None;
        }
        let t = ((z - record.z0) / record.height).clamp(0.0, 1.0);
        let mut extreme: Option<Real> = None;
        for poly in &record.base {
            let rings =
                std::iter::once(poly.exterior()).chain(poly.interiors().iter());
            for ring in rings {
                for c in &ring.0 {
                    let r = (c.x * c.x + c.y * c.y).sqrt();
                    let rz = r + (record.map.apply(r) - r) * t;
                    extreme = Some(match extreme {
                        None => rz,
                        Some(e) if outer => e.max(rz),
                        Some(e) => e.min(rz),
                    });
                }
            }
        }
        extreme
    }

    /// Subtract a prismatic (z-invariant) cutter region over the solid's
    /// full height, producing a new solid.
    ///
    /// The cut happens in cross-section space and is re-swept, which equals
    /// the true 3-D boolean as long as the cutter is invariant under the
    /// solid's radial map — trivially true for untapered prisms, and true
    /// for tapered ones whenever the cutter is bounded by radial lines
    /// through the origin (every wedge and strip cutter is).
    pub fn subtract_profile<C: Clone + Send + Sync + Debug>(
        &self,
        cutter: &Profile<C>,
    ) -> Result<Self, GeometryError> {
        let record = self
            .prism
            .as_ref()
            .ok_or(GeometryError::NotPrismatic {
                operation: "subtract_profile",
            })?;
        let cut = record.base.difference(&cutter.geom);
        let cut_area = cut.unsigned_area();
        if cut_area <= EPSILON {
            return Err(GeometryError::EmptyBoolean {
                op: BooleanKind::Subtract,
                operation: "subtract_profile",
            });
        }
        // a cutter that only grazes existing edges removes nothing; keep the
        // already-clean section instead of re-meshing boolean noise
        let base_area = record.base.unsigned_area();
        let base = if (base_area - cut_area).abs() <= base_area * 1e-9 {
            record.base.clone()
        } else {
            cut
        };
        Ok(extrude::sweep(
            &base,
            record.map,
            record.z0,
            record.height,
            self.metadata.clone(),
        ))
    }

    /// Whether every edge of the triangulated boundary is shared by exactly
    /// two faces — see [`manifold`].
    pub fn is_manifold(&self) -> bool {
        manifold::is_manifold(self)
    }
}

impl<S: Clone + Send + Sync + Debug> Shape3 for Solid<S> {
    fn transform(&self, matrix: &Matrix4<Real>) -> Self {
        let linear: Matrix3<Real> = matrix.fixed_view::<3, 3>(0, 0).clone_owned();
        let flips = linear.determinant() < 0.0;

        let polygons = self
            .polygons
            .iter()
            .map(|poly| {
                let mut verts: Vec<Vertex> = poly
                    .vertices
                    .iter()
                    .map(|v| Vertex::new(matrix.transform_point(&v.pos), v.normal))
                    .collect();
                if flips {
                    verts.reverse();
                }
                let mut p = Polygon3::new(verts, poly.metadata.clone());
                let n = p.newell_normal();
                for v in &mut p.vertices {
                    v.normal = n;
                }
                p
            })
            .collect();

        // The prism record survives pure translations; in-plane offsets are
        // only meaningful for untapered prisms (the radial map is anchored
        // at the origin).
        let translation_only = (linear - Matrix3::identity()).norm() < 1e-9;
        let dx = matrix[(0, 3)];
        let dy = matrix[(1, 3)];
        let prism = if translation_only {
            self.prism.as_ref().and_then(|r| {
                if r.map.is_identity() || (dx.abs() < EPSILON && dy.abs() < EPSILON) {
                    Some(PrismRecord {
                        base: r
                            .base
                            .affine_transform(&AffineTransform::translate(dx, dy)),
                        map: r.map,
                        z0: r.z0 + matrix[(2, 3)],
                        height: r.height,
                    })
                } else {
                    None
                }
            })
        } else {
            None
        };

        Solid {
            polygons,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
            prism,
        }
    }

    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for poly in &self.polygons {
                for v in &poly.vertices {
                    mins.x = mins.x.min(v.pos.x);
                    mins.y = mins.y.min(v.pos.y);
                    mins.z = mins.z.min(v.pos.z);
                    maxs.x = maxs.x.max(v.pos.x);
                    maxs.y = maxs.y.max(v.pos.y);
                    maxs.z = maxs.z.max(v.pos.z);
                }
            }
            if mins.x > maxs.x {
                Aabb::new(Point3::origin(), Point3::origin())
            } else {
                Aabb::new(mins, maxs)
            }
        })
    }
}
