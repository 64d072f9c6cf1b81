//! Closed-surface check over the triangulated boundary.

use super::Solid;
use crate::float_types::Real;
use hashbrown::HashMap;
use nalgebra::Point3;
use std::fmt::Debug;

const QUANTIZATION_FACTOR: Real = 1e7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct QuantizedPoint(i64, i64, i64);

fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
    QuantizedPoint(
        (p.x * QUANTIZATION_FACTOR).round() as i64,
        (p.y * QUANTIZATION_FACTOR).round() as i64,
        (p.z * QUANTIZATION_FACTOR).round() as i64,
    )
}

/// Returns `true` when every edge of the triangulated boundary appears in
/// exactly two faces with opposite direction — i.e. the body is closed and
/// consistently oriented. Coordinates are quantized so vertices that agree
/// to well below fabrication tolerance count as identical.
pub(super) fn is_manifold<S: Clone + Send + Sync + Debug>(solid: &Solid<S>) -> bool {
    if solid.polygons.is_empty() {
        return false;
    }

    let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), u32> = HashMap::new();

    for poly in &solid.polygons {
        for tri in poly.triangulate() {
            for &(i0, i1) in &[(0usize, 1usize), (1, 2), (2, 0)] {
                let p0 = quantize_point(&tri[i0].pos);
                let p1 = quantize_point(&tri[i1].pos);
                if p0 == p1 {
                    // collapsed edge from quantization; treat as open
                    return false;
                }
                // order the key so both directions land on the same entry
                let key = if (p0.0, p0.1, p0.2) < (p1.0, p1.1, p1.2) {
                    (p0, p1)
                } else {
                    (p1, p0)
                };
                *edge_counts.entry(key).or_insert(0) += 1;
            }
        }
    }

    edge_counts.values().all(|&count| count == 2)
}
