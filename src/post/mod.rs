//! Corner-post parameter resolution and tier construction.
//!
//! A post is a stack of five annular sections — base1, tier1, base2, tier2,
//! cap — sharing the fixed 270° arc and corner bisector. The tier2 height is
//! never specified directly: it is whatever remains of the fixed total after
//! the four given heights, and a non-positive remainder is a configuration
//! error, not something to absorb.

pub mod strips;

use crate::errors::{BuildError, ConfigError, GeometryError};
use crate::float_types::{INCH, Real, UNIT_TOLERANCE};
use crate::profile::{AnnularSection, CUTTER_REACH_FACTOR, Profile};
use crate::scene::{Part, PartMeta};
use crate::solid::{RadialMap, Solid, extrude, loft};
use crate::traits::Shape3;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

/// The post's angular span: 360° minus the 90° corner wedge.
pub const ARC_SPAN_DEG: Real = 270.0;

/// Remaining tier height under a fixed total: `total - Σ given`.
///
/// Pure and deterministic; fails with the derived tier's name when the
/// remainder is not a physical height.
pub fn resolve_remaining_height(
    total: Real,
    given: &[(&'static str, Real)],
    derived_name: &'static str,
) -> Result<Real, ConfigError> {
    let sum: Real = given.iter().map(|(_, h)| *h).sum();
    let remaining = total - sum;
    if remaining <= 0.0 {
        return Err(ConfigError::NonPositiveDimension {
            name: derived_name,
            value: remaining,
        });
    }
    Ok(remaining)
}

/// Everything one sweep call needs: vertical extent, end radii, wall
/// thickness, and where the bottom face sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSpec {
    pub height: Real,
    pub bottom_radius: Real,
    pub top_radius: Real,
    pub wall_thickness: Real,
    pub z_offset: Real,
    pub span_degrees: Real,
}

impl TierSpec {
    pub fn is_constant(&self) -> bool {
        (self.bottom_radius - self.top_radius).abs() < UNIT_TOLERANCE
    }

    pub fn bottom_section(&self) -> AnnularSection {
        AnnularSection::from_wall(self.bottom_radius, self.wall_thickness, self.span_degrees)
    }

    pub fn top_section(&self) -> AnnularSection {
        AnnularSection::from_wall(self.top_radius, self.wall_thickness, self.span_degrees)
    }

    /// Build the tier solid at its z offset.
    ///
    /// Constant tiers extrude their cross-section. Tapered tiers loft the two
    /// end sections and then re-apply the corner wedge cut over the full
    /// height — the cut is anchored to the fixed bisector at every height, so
    /// the open corner stays planar instead of following the taper.
    pub fn build<S: Clone + Send + Sync + Debug>(
        &self,
        metadata: Option<S>,
    ) -> Result<Solid<S>, BuildError> {
        let bottom = self.bottom_section();
        let solid = if self.is_constant() {
            extrude(&bottom.profile(metadata)?, self.height)?
        } else {
            let top = self.top_section();
            if (bottom.span_degrees - top.span_degrees).abs() > UNIT_TOLERANCE {
                return Err(GeometryError::ProfileMismatch {
                    bottom_span: bottom.span_degrees,
                    top_span: top.span_degrees,
                }
                .into());
            }
            let map = RadialMap {
                from_inner: bottom.inner_radius,
                from_outer: bottom.outer_radius,
                to_inner: top.inner_radius,
                to_outer: top.outer_radius,
            };
            let lofted = loft(
                &bottom.profile(metadata)?,
                &top.profile(None)?,
                map,
                self.height,
            )?;
            if self.span_degrees < 360.0 {
                let reach =
                    CUTTER_REACH_FACTOR * self.bottom_radius.max(self.top_radius);
                let wedge: Profile<()> =
                    Profile::wedge_cutter(360.0 - self.span_degrees, reach, None);
                lofted.subtract_profile(&wedge)?
            } else {
                lofted
            }
        };
        Ok(solid.translate(0.0, 0.0, self.z_offset))
    }
}

/// Named dimension set for the five-section post. All lengths share one
/// linear unit; radii follow the canonical wide-at-bottom taper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDimensions {
    pub total_height: Real,
    pub base_height: Real,
    pub tier1_height: Real,
    pub base2_height: Real,
    pub cap_height: Real,
    pub wall_thickness: Real,
    /// Tier1 bottom radius.
    pub wide_radius: Real,
    /// Tier1 top = tier2 bottom radius.
    pub mid_radius: Real,
    /// Tier2 top radius.
    pub narrow_radius: Real,
    /// Radial overhang of the bases and cap past their neighboring tier.
    pub trim_overhang: Real,
}

impl PostDimensions {
    /// The counter-to-mantel post: straight 1.7" radius, 28" tall.
    pub fn counter_to_mantel() -> Self {
        PostDimensions {
            total_height: 28.0 * INCH,
            base_height: 1.0 * INCH,
            tier1_height: 10.0 * INCH,
            base2_height: 1.0 * INCH,
            cap_height: 3.0 * INCH,
            wall_thickness: 0.25 * INCH,
            wide_radius: 1.7 * INCH,
            mid_radius: 1.7 * INCH,
            narrow_radius: 1.7 * INCH,
            trim_overhang: 0.15 * INCH,
        }
    }

    /// The tapered variant: tiers narrow 2.3" → 1.9" → 1.5" going up.
    pub fn tapered_mantel() -> Self {
        PostDimensions {
            total_height: 28.0 * INCH,
            base_height: 1.0 * INCH,
            tier1_height: 8.0 * INCH,
            base2_height: 1.0 * INCH,
            cap_height: 3.0 * INCH,
            wall_thickness: 0.25 * INCH,
            wide_radius: 2.3 * INCH,
            mid_radius: 1.9 * INCH,
            narrow_radius: 1.5 * INCH,
            trim_overhang: 0.15 * INCH,
        }
    }

    fn given_heights(&self) -> [(&'static str, Real); 4] {
        [
            ("base_height", self.base_height),
            ("tier1_height", self.tier1_height),
            ("base2_height", self.base2_height),
            ("cap_height", self.cap_height),
        ]
    }

    /// Derive the tier2 height and the five tier specs, validating every
    /// dimension before any geometry is built.
    pub fn resolve(&self) -> Result<ResolvedPost, ConfigError> {
        for (name, value) in [
            ("total_height", self.total_height),
            ("wall_thickness", self.wall_thickness),
        ]
        .into_iter()
        .chain(self.given_heights())
        {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        if self.trim_overhang < 0.0 {
            return Err(ConfigError::NonPositiveDimension {
                name: "trim_overhang",
                value: self.trim_overhang,
            });
        }

        let tier2_height =
            resolve_remaining_height(self.total_height, &self.given_heights(), "tier2_height")?;

        let sum: Real = self
            .given_heights()
            .iter()
            .map(|(_, h)| *h)
            .sum::<Real>()
            + tier2_height;
        if (sum - self.total_height).abs() > UNIT_TOLERANCE {
            return Err(ConfigError::HeightMismatch {
                sum,
                total: self.total_height,
            });
        }

        for (name, below, above) in [
            ("tier1", self.wide_radius, self.mid_radius),
            ("tier2", self.mid_radius, self.narrow_radius),
        ] {
            if above > below + UNIT_TOLERANCE {
                return Err(ConfigError::TaperInversion { name, below, above });
            }
        }
        if self.narrow_radius <= self.wall_thickness {
            return Err(ConfigError::InvalidRadii {
                inner: self.narrow_radius - self.wall_thickness,
                outer: self.narrow_radius,
            });
        }

        let trim = self.trim_overhang;
        let mut z = 0.0;
        let mut section = |name, color, height, bottom_radius, top_radius| {
            let tier = TierSpec {
                height,
                bottom_radius,
                top_radius,
                wall_thickness: self.wall_thickness,
                z_offset: z,
                span_degrees: ARC_SPAN_DEG,
            };
            z += height;
            SectionSpec { name, color, tier }
        };

        let sections = vec![
            section(
                "base1",
                "slategray",
                self.base_height,
                self.wide_radius + trim,
                self.wide_radius + trim,
            ),
            section(
                "tier1",
                "sienna",
                self.tier1_height,
                self.wide_radius,
                self.mid_radius,
            ),
            section(
                "base2",
                "darkgray",
                self.base2_height,
                self.mid_radius + trim,
                self.mid_radius + trim,
            ),
            section(
                "tier2",
                "peru",
                tier2_height,
                self.mid_radius,
                self.narrow_radius,
            ),
            section(
                "cap",
                "dimgray",
                self.cap_height,
                self.narrow_radius + trim,
                self.narrow_radius + trim,
            ),
        ];

        debug!(tier2_height, total = self.total_height, "resolved post sections");

        Ok(ResolvedPost {
            tier2_height,
            sections,
        })
    }

    /// Resolve and build all five sections, bottom to top.
    pub fn build(&self) -> Result<Vec<Part>, BuildError> {
        let resolved = self.resolve()?;
        let mut parts = Vec::with_capacity(resolved.sections.len());
        for spec in &resolved.sections {
            let part = spec
                .tier
                .build(Some(PartMeta::solid(spec.name, spec.color)))?;
            debug!(name = spec.name, z = spec.tier.z_offset, "built post section");
            parts.push(part);
        }
        Ok(parts)
    }
}

/// One named, colored entry of the resolved post stack.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub name: &'static str,
    pub color: &'static str,
    pub tier: TierSpec,
}

/// Output of [`PostDimensions::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPost {
    pub tier2_height: Real,
    pub sections: Vec<SectionSpec>,
}
