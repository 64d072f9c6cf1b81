//! Shared transform helpers for 3-D bodies.

use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

/// Transformations over anything with a homogeneous-matrix transform and an
/// axis-aligned bounding box. Implementors return new values; nothing here
/// mutates in place.
pub trait Shape3: Sized {
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Rotates by x_degrees, y_degrees, z_degrees, composed as Rz * Ry * Rx.
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());
        self.transform(&(rz * ry * rx).to_homogeneous())
    }

    /// Mirrors across the XZ plane (y -> -y).
    fn mirror_xz(&self) -> Self {
        self.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(
            1.0, -1.0, 1.0,
        )))
    }

    /// Translates so the bounding-box center lands on the origin.
    fn center(&self) -> Self {
        let aabb = self.bounding_box();
        let c = aabb.center();
        self.translate(-c.x, -c.y, -c.z)
    }

    /// Translates so the bottommost point sits exactly at z = 0.
    fn drop_to_floor(&self) -> Self {
        let aabb = self.bounding_box();
        self.translate(0.0, 0.0, -aabb.mins.z)
    }
}
