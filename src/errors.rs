//! Typed failures for configuration and geometry construction.
//!
//! Every variant carries the offending parameter names and computed values so
//! a bad input can be root-caused without re-deriving the formula chain.

use crate::float_types::Real;
use crate::profile::BooleanKind;

/// A supplied or derived dimension is non-physical. Raised before any
/// geometry is built, and never recovered silently.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A length that must be strictly positive resolved to zero or less.
    #[error("dimension `{name}` resolves to {value}, which is not positive")]
    NonPositiveDimension { name: &'static str, value: Real },

    /// An annular wall with inner radius at or beyond the outer radius.
    #[error("inner radius {inner} must be positive and smaller than outer radius {outer}")]
    InvalidRadii { inner: Real, outer: Real },

    /// Angular span outside the half-open interval (0, 360].
    #[error("angular span {span}° must lie in (0, 360]")]
    InvalidSpan { span: Real },

    /// The ordered tier heights do not add up to the fixed total.
    #[error("tier heights sum to {sum} but `total_height` is {total}")]
    HeightMismatch { sum: Real, total: Real },

    /// Tier radii widen with height; the canonical taper is wide-at-bottom.
    #[error("tier radii must not widen with height: `{name}` goes {below} -> {above}")]
    TaperInversion {
        name: &'static str,
        below: Real,
        above: Real,
    },

    /// A tier cannot be divided into zero strips.
    #[error("strip count must be at least 1, got {count}")]
    InvalidStripCount { count: usize },

    /// The grout gap consumes an entire strip.
    #[error("grout angle {grout}° must be smaller than the strip width {width}°")]
    GroutTooWide { grout: Real, width: Real },
}

/// A boolean, extrude, or loft operation produced degenerate output. Fatal
/// for that construction call; the kernel is deterministic, so the operation
/// is never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The profile handed to a sweep has no area.
    #[error("profile handed to `{operation}` has no area to sweep")]
    EmptyProfile { operation: &'static str },

    /// Extrusion or loft over a non-positive height.
    #[error("sweep height {height} is not positive")]
    DegenerateSweep { height: Real },

    /// Loft end profiles disagree on angular span.
    #[error("loft sections disagree: bottom spans {bottom_span}°, top spans {top_span}°")]
    ProfileMismatch { bottom_span: Real, top_span: Real },

    /// The supplied top profile is not the radial image of the bottom one.
    #[error(
        "loft cross-sections are incompatible: bottom maps to area {mapped_area}, top has area {top_area}"
    )]
    LoftMismatch { mapped_area: Real, top_area: Real },

    /// A prism-only operation was requested on a solid that has been
    /// transformed out of its upright-prism form.
    #[error("solid is no longer an upright prism; `{operation}` is unavailable")]
    NotPrismatic { operation: &'static str },

    /// A boolean pass removed the entire body.
    #[error("boolean {op:?} during `{operation}` left nothing behind")]
    EmptyBoolean {
        op: BooleanKind,
        operation: &'static str,
    },
}

/// Any failure an assembly-level build can surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
