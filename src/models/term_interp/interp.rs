use tracing::{debug, warn};

use crate::error::{GridError, GridResult};
use crate::grid::config::InterpConfig;
use crate::grid::point::QuoteField;
use crate::models::traits::TermInterpolant;

use super::linear::LinearInterpolant;
use super::spline::CubicSpline;
use super::types::*;

/// Build the cubic tier and evaluate it at `x`.
fn cubic_value(xs: &[f64], ys: &[f64], x: f64, config: &InterpConfig) -> GridResult<f64> {
    if xs.len() < config.min_cubic_points {
        return Err(GridError::insufficient_points(
            config.min_cubic_points,
            xs.len(),
        ));
    }
    CubicSpline::new(xs.to_vec(), ys.to_vec())?.value_at(x)
}

/// Build the linear tier and evaluate it at `x`.
fn linear_value(xs: &[f64], ys: &[f64], x: f64) -> GridResult<f64> {
    LinearInterpolant::new(xs.to_vec(), ys.to_vec())?.value_at(x)
}

/// Interpolate one field at horizon `x` using the two-tier policy
///
/// 1. With at least `min_cubic_points` knots, build a natural cubic spline and
///    evaluate it (extrapolating if needed).
/// 2. If there are too few knots, or cubic construction or evaluation fails,
///    use a piecewise linear interpolant over the same knots.
/// 3. If the linear tier also fails, report [`GridError::InterpolationFailure`].
///
/// The returned [`FieldEstimate`] records the tier used and whether the cubic
/// tier was eligible but failed.
///
/// # Arguments
///
/// * `field` - The field being interpolated (for diagnostics only)
/// * `knots` - (horizon in months, value) pairs sorted ascending by horizon
/// * `x` - Target horizon in months
/// * `config` - Tier selection thresholds
pub fn interpolate_with_fallback(
    field: QuoteField,
    knots: &[(f64, f64)],
    x: f64,
    config: &InterpConfig,
) -> GridResult<FieldEstimate> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = knots.iter().copied().unzip();
    let cubic_eligible = xs.len() >= config.min_cubic_points;

    let cubic_err = match cubic_value(&xs, &ys, x, config) {
        Ok(value) => {
            debug!(%field, x, value, "cubic interpolation");
            return Ok(FieldEstimate {
                value,
                tier: InterpTier::Cubic,
                fell_back: false,
            });
        }
        Err(e) => e,
    };

    if cubic_eligible {
        warn!(%field, x, error = %cubic_err, "cubic interpolation failed, falling back to linear");
    }

    match linear_value(&xs, &ys, x) {
        Ok(value) => {
            debug!(%field, x, value, "linear interpolation");
            Ok(FieldEstimate {
                value,
                tier: InterpTier::Linear,
                fell_back: cubic_eligible,
            })
        }
        Err(e) => Err(GridError::InterpolationFailure {
            field,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ATM_KNOTS: [(f64, f64); 5] = [(1.0, 8.2), (2.0, 8.0), (3.0, 8.0), (6.0, 8.1), (12.0, 8.2)];

    #[test]
    fn test_cubic_tier_with_enough_points() {
        let estimate =
            interpolate_with_fallback(QuoteField::AtmRaw, &ATM_KNOTS, 4.0, &InterpConfig::default())
                .unwrap();
        assert_eq!(estimate.tier, InterpTier::Cubic);
        assert!(!estimate.fell_back);
        assert!(estimate.value > 8.0 && estimate.value < 8.1);
    }

    #[test]
    fn test_linear_tier_below_cubic_threshold() {
        let knots = [(1.0, 8.2), (3.0, 8.0), (6.0, 8.1)];
        let estimate =
            interpolate_with_fallback(QuoteField::AtmRaw, &knots, 4.5, &InterpConfig::default())
                .unwrap();
        assert_eq!(estimate.tier, InterpTier::Linear);
        assert!(!estimate.fell_back);
        assert_relative_eq!(estimate.value, 8.05, epsilon = 1e-12);
    }

    #[test]
    fn test_falls_back_when_cubic_evaluation_fails() {
        // Curvature overflows in the spline while the linear slopes stay finite
        let knots = [(1.0, 0.0), (2.0, 1e308), (3.0, -1e308), (4.0, 0.0)];
        let estimate =
            interpolate_with_fallback(QuoteField::Strangle10, &knots, 1.5, &InterpConfig::default())
                .unwrap();
        assert_eq!(estimate.tier, InterpTier::Linear);
        assert!(estimate.fell_back);
        assert_relative_eq!(estimate.value, 5e307, max_relative = 1e-12);
    }

    #[test]
    fn test_linear_only_config() {
        let estimate =
            interpolate_with_fallback(QuoteField::AtmRaw, &ATM_KNOTS, 4.0, &InterpConfig::linear_only())
                .unwrap();
        assert_eq!(estimate.tier, InterpTier::Linear);
        assert!(!estimate.fell_back);
        assert_relative_eq!(estimate.value, 8.0 + 0.1 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_failure_with_single_point() {
        let err = interpolate_with_fallback(
            QuoteField::RiskReversal25,
            &[(3.0, -0.3)],
            6.0,
            &InterpConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GridError::InterpolationFailure {
                field: QuoteField::RiskReversal25,
                ..
            }
        ));
    }
}
