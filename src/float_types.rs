//! Scalar type, tolerances, and unit constants shared by the whole crate.

// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Degeneracy threshold for geometric predicates (zero-length edges,
/// zero-area faces, zero-height sweeps).
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Degeneracy threshold for geometric predicates (zero-length edges,
/// zero-area faces, zero-height sweeps).
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-8;

/// Tolerance for dimension bookkeeping that must hold exactly, e.g. the sum
/// of tier heights against the fixed total.
pub const UNIT_TOLERANCE: Real = 1e-6;

/// One inch, in model units (millimetres). The shop drawings this crate
/// reproduces mix fractional-inch stock with metric hardware.
pub const INCH: Real = 25.4;

/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
