//! Parametric solid models for a 270° tiled **corner post** and an
//! angle-grinder **mounting fixture**, built as constructive solid geometry:
//! 2-D cross-section regions combined with boolean operations, then swept
//! into closed 3-D bodies.
//!
//! The crate is the geometric core only. It produces ordered lists of
//! [`scene::Part`]s — solids tagged with opaque name/color hints — for an
//! external viewer or exporter; it does no rendering, file I/O, or printing
//! of its own.
//!
//! # Layout
//! - [`profile`] — 2-D regions ([`Profile`]), boolean combination
//!   ([`BooleanKind`]), and the annular cross-section builder
//!   ([`AnnularSection`]).
//! - [`solid`] — closed polygon-soup bodies ([`Solid`]) produced by
//!   [`extrude`](solid::extrude) and [`loft`](solid::loft), with prismatic
//!   re-cuts and manifold checking.
//! - [`post`] — dimension resolution and the five-section post, plus
//!   [`post::strips`] for grout-separated tile strips.
//! - [`mount`] — the grinder-mount constraint solver and fixture parts.
//!
//! # Features
//! - **f64** (default) / **f32**: float width, mutually exclusive.
//! - **parallel**: build strips with rayon.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod errors;
pub mod float_types;
pub mod mount;
pub mod post;
pub mod profile;
pub mod scene;
pub mod solid;
pub mod traits;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{BuildError, ConfigError, GeometryError};
pub use profile::{AnnularSection, BooleanKind, Profile};
pub use scene::{Part, PartMeta};
pub use solid::{Solid, Vertex};
pub use traits::Shape3;
