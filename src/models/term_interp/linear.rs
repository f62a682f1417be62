use crate::error::{GridError, GridResult};
use crate::models::term_interp::InterpTier;
use crate::models::traits::TermInterpolant;
use crate::models::utils::{find_segment, validate_knots};

/// Smallest knot count a linear interpolant can be built from.
pub const MIN_LINEAR_POINTS: usize = 2;

/// Piecewise linear interpolation over tenor horizons
///
/// Extrapolates with the slope of the nearest end segment. Unlike strike-space
/// variance interpolation, negative results are kept: risk reversals are
/// signed quotes.
#[derive(Debug, Clone)]
pub struct LinearInterpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolant {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> GridResult<Self> {
        validate_knots(&xs, &ys, MIN_LINEAR_POINTS)?;
        Ok(Self { xs, ys })
    }
}

impl TermInterpolant for LinearInterpolant {
    fn tier(&self) -> InterpTier {
        InterpTier::Linear
    }

    fn value_at(&self, x: f64) -> GridResult<f64> {
        let i = find_segment(&self.xs, x);
        let (x1, y1) = (self.xs[i], self.ys[i]);
        let (x2, y2) = (self.xs[i + 1], self.ys[i + 1]);

        let slope = (y2 - y1) / (x2 - x1);
        let y = y1 + slope * (x - x1);

        if y.is_finite() {
            Ok(y)
        } else {
            Err(GridError::invalid_quote("linear value", y))
        }
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_interp_and_extrap() {
        let interp =
            LinearInterpolant::new(vec![1.0, 3.0, 6.0], vec![-0.30, -0.20, -0.50]).unwrap();

        assert_relative_eq!(interp.value_at(2.0).unwrap(), -0.25, epsilon = 1e-12);
        assert_relative_eq!(interp.value_at(4.5).unwrap(), -0.35, epsilon = 1e-12);
        assert_relative_eq!(interp.value_at(6.0).unwrap(), -0.50, epsilon = 1e-12);
        // Left and right extrapolation follow the end segments
        assert_relative_eq!(interp.value_at(0.0).unwrap(), -0.35, epsilon = 1e-12);
        assert_relative_eq!(interp.value_at(9.0).unwrap(), -0.80, epsilon = 1e-12);
        assert_eq!(interp.tier(), InterpTier::Linear);
        assert_eq!((interp.min_x(), interp.max_x()), (1.0, 6.0));
    }

    #[test]
    fn test_requires_two_points() {
        assert!(matches!(
            LinearInterpolant::new(vec![1.0], vec![8.0]),
            Err(GridError::InsufficientPoints { required: 2, actual: 1 })
        ));
    }
}
