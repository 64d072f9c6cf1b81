//! Angular partitioning of a tier into grout-separated tile strips.
//!
//! Strip 0 sits immediately next to the removed corner wedge at +span/2
//! (135° for the 270° post) and numbering proceeds around the arc to the
//! opposite wedge edge. Each strip keeps its leading edge and gives up the
//! grout angle at its trailing edge, so N·(visible + grout) plus the wedge
//! covers the full circle with no overlap.

use super::TierSpec;
use crate::errors::{BuildError, ConfigError};
use crate::float_types::Real;
use crate::profile::{CUTTER_REACH_FACTOR, Profile};
use crate::solid::Solid;
use std::fmt::Debug;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Linear grout gap at a given face radius, as the angle it subtends.
pub fn grout_angle_from_gap(gap: Real, radius: Real) -> Real {
    (gap / radius).to_degrees()
}

/// Visible angular windows `(trailing, leading)` in degrees, ascending strip
/// index (descending angle). Pure bookkeeping, shared by construction and
/// tests.
pub fn strip_windows(
    span_degrees: Real,
    strip_count: usize,
    grout_angle: Real,
) -> Result<Vec<(Real, Real)>, ConfigError> {
    if strip_count == 0 {
        return Err(ConfigError::InvalidStripCount { count: strip_count });
    }
    let width = span_degrees / strip_count as Real;
    if grout_angle < 0.0 || grout_angle >= width {
        return Err(ConfigError::GroutTooWide {
            grout: grout_angle,
            width,
        });
    }
    let start = span_degrees * 0.5;
    Ok((0..strip_count)
        .map(|i| {
            let leading = start - width * i as Real;
            (leading - width + grout_angle, leading)
        })
        .collect())
}

/// Divide a tier into `strip_count` solids separated by `grout_angle`.
///
/// Per strip: the tier's full annulus is swept first, then everything
/// outside the strip's window is removed — a half-plane cut past each window
/// edge plus the fixed corner wedge cut that applies to every strip. The two
/// half-planes together cover the whole complement of any window narrower
/// than 180°, so both are always applied; the wedge cut is kept on top of
/// them because the partition is defined against the wedge-cut tier.
///
/// Strips are returned in ascending index order so downstream naming and
/// coloring line up with angular position.
pub fn partition<S: Clone + Send + Sync + Debug>(
    tier: &TierSpec,
    strip_count: usize,
    grout_angle: Real,
    metadata: Option<S>,
) -> Result<Vec<Solid<S>>, BuildError> {
    let windows = strip_windows(tier.span_degrees, strip_count, grout_angle)?;

    // Full annulus for the tier: same radii and taper, no wedge.
    let full = TierSpec {
        span_degrees: 360.0,
        ..*tier
    }
    .build(metadata)?;

    let reach = CUTTER_REACH_FACTOR * tier.bottom_radius.max(tier.top_radius);
    let wedge: Profile<()> =
        Profile::wedge_cutter(360.0 - tier.span_degrees, reach, None);

    let strips = build_strips(&full, &windows, &wedge, reach)?;

    debug!(
        strip_count,
        grout_angle,
        span = tier.span_degrees,
        "partitioned tier into strips"
    );
    Ok(strips)
}

fn cut_strip<S: Clone + Send + Sync + Debug>(
    full: &Solid<S>,
    window: (Real, Real),
    wedge: &Profile<()>,
    reach: Real,
) -> Result<Solid<S>, BuildError> {
    let (trailing, leading) = window;
    // remove (leading, leading + 180°)
    let past_leading: Profile<()> = Profile::half_plane_cutter(leading, reach, None);
    // remove (trailing - 180°, trailing)
    let past_trailing: Profile<()> =
        Profile::half_plane_cutter(trailing - 180.0, reach, None);

    let strip = full
        .subtract_profile(&past_leading)?
        .subtract_profile(&past_trailing)?;
    // the corner wedge applies to every strip; it is empty only for a full
    // 360° tier, where there is no corner to keep clear
    let strip = if wedge.is_empty() {
        strip
    } else {
        strip.subtract_profile(wedge)?
    };
    Ok(strip)
}

#[cfg(not(feature = "parallel"))]
fn build_strips<S: Clone + Send + Sync + Debug>(
    full: &Solid<S>,
    windows: &[(Real, Real)],
    wedge: &Profile<()>,
    reach: Real,
) -> Result<Vec<Solid<S>>, BuildError> {
    windows
        .iter()
        .map(|&window| cut_strip(full, window, wedge, reach))
        .collect()
}

#[cfg(feature = "parallel")]
fn build_strips<S: Clone + Send + Sync + Debug>(
    full: &Solid<S>,
    windows: &[(Real, Real)],
    wedge: &Profile<()>,
    reach: Real,
) -> Result<Vec<Solid<S>>, BuildError> {
    windows
        .par_iter()
        .map(|&window| cut_strip(full, window, wedge, reach))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_strips_over_270_give_30_degree_sectors() {
        let windows = strip_windows(270.0, 9, 1.0).unwrap();
        assert_eq!(windows.len(), 9);
        for (i, &(lo, hi)) in windows.iter().enumerate() {
            assert!((hi - (135.0 - 30.0 * i as Real)).abs() < 1e-9);
            assert!(((hi - lo) - 29.0).abs() < 1e-9);
        }
        // last strip ends one grout angle short of the far wedge edge
        assert!((windows[8].0 - (-134.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_strips_is_a_config_error() {
        assert_eq!(
            strip_windows(270.0, 0, 1.0).unwrap_err(),
            ConfigError::InvalidStripCount { count: 0 }
        );
    }

    #[test]
    fn grout_wider_than_a_strip_is_rejected() {
        assert!(matches!(
            strip_windows(270.0, 9, 30.0).unwrap_err(),
            ConfigError::GroutTooWide { .. }
        ));
    }
}
