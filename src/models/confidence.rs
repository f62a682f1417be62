//! Confidence scoring for synthesized tenor points
//!
//! A synthesized point is scored by how close it sits to the horizons that are
//! already known. Points outside the known span receive a fixed extrapolation
//! penalty; interior points score
//!
//! ```text
//! 1 - mean(two smallest |candidate - known_i|) / (max(known) - min(known))
//! ```
//!
//! floored at `interior_floor`, rounded to `decimals` places and capped at
//! `interior_ceiling` so that only directly quoted points carry 1.0.

use crate::error::{GridError, GridResult};
use crate::grid::config::ConfidenceConfig;
use crate::models::tenor::format_tenor;

/// Confidence of a directly quoted point.
pub const QUOTED_CONFIDENCE: f64 = 1.0;

/// Lowest confidence any point can carry.
pub const MIN_CONFIDENCE: f64 = 0.2;

/// Most decimal places a score is rounded to; finer scales overflow `f64`.
pub const MAX_DECIMALS: u32 = 15;

/// Score a candidate horizon against the known horizons.
///
/// # Arguments
///
/// * `candidate_months` - Horizon of the point being synthesized
/// * `known_months` - Horizons already on the grid (any order)
/// * `config` - Penalty, floor, ceiling and rounding constants
///
/// # Errors
///
/// * [`GridError::InsufficientPoints`] if `known_months` is empty
/// * [`GridError::DuplicateTenor`] if the candidate is already known; such
///   requests are rejected upstream and never scored
///
/// # Example
///
/// ```rust
/// use surface_grid::models::confidence::estimate_confidence;
/// use surface_grid::ConfidenceConfig;
///
/// let known = [1, 2, 3, 6, 12];
/// let config = ConfidenceConfig::default();
///
/// assert_eq!(estimate_confidence(4, &known, &config).unwrap(), 0.86);
/// assert_eq!(estimate_confidence(18, &known, &config).unwrap(), 0.2);
/// ```
pub fn estimate_confidence(
    candidate_months: u32,
    known_months: &[u32],
    config: &ConfidenceConfig,
) -> GridResult<f64> {
    let (min_known, max_known) = match (known_months.iter().min(), known_months.iter().max()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => return Err(GridError::insufficient_points(1, 0)),
    };

    if known_months.contains(&candidate_months) {
        return Err(GridError::DuplicateTenor {
            label: format_tenor(candidate_months),
            months: candidate_months,
        });
    }

    if candidate_months < min_known || candidate_months > max_known {
        return Ok(config.extrapolation_penalty);
    }

    // Interior implies min < candidate < max, hence at least two distinct knowns.
    let span = f64::from(max_known - min_known);

    let mut distances: Vec<u32> = known_months
        .iter()
        .map(|&k| k.abs_diff(candidate_months))
        .collect();
    distances.sort_unstable();

    let nearest = f64::from(distances[0] + distances[1]) / 2.0;
    let raw = (1.0 - nearest / span).max(config.interior_floor);

    Ok(round_to(raw, config.decimals).min(config.interior_ceiling))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * scale).round() / scale
}
