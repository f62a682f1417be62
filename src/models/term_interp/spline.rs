//! Natural cubic spline over tenor horizons.

use crate::error::{GridError, GridResult};
use crate::models::term_interp::InterpTier;
use crate::models::traits::TermInterpolant;
use crate::models::utils::{find_segment, validate_knots};

/// Smallest knot count a natural spline can be built from.
pub const MIN_SPLINE_POINTS: usize = 3;

/// Natural cubic spline interpolation.
///
/// Piecewise cubic polynomials with continuous first and second derivatives
/// and zero second derivative at both ends. Outside the knot span the first or
/// last segment's polynomial is continued.
///
/// # Example
///
/// ```rust
/// use surface_grid::models::term_interp::CubicSpline;
/// use surface_grid::models::traits::TermInterpolant;
///
/// let spline = CubicSpline::new(
///     vec![1.0, 2.0, 3.0, 6.0, 12.0],
///     vec![8.2, 8.0, 8.0, 8.1, 8.2],
/// )
/// .unwrap();
/// let atm_4m = spline.value_at(4.0).unwrap();
/// assert!(atm_4m > 8.0 && atm_4m < 8.1);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot
    y2s: Vec<f64>,
}

impl CubicSpline {
    /// Build a natural cubic spline.
    ///
    /// # Errors
    ///
    /// Fails with fewer than [`MIN_SPLINE_POINTS`] knots, non-increasing
    /// horizons, non-finite values, or a degenerate tridiagonal system.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> GridResult<Self> {
        validate_knots(&xs, &ys, MIN_SPLINE_POINTS)?;

        let y2s = second_derivatives(&xs, &ys);
        if let Some(&bad) = y2s.iter().find(|v| !v.is_finite()) {
            return Err(GridError::invalid_quote("spline curvature", bad));
        }

        Ok(Self { xs, ys, y2s })
    }
}

impl TermInterpolant for CubicSpline {
    fn tier(&self) -> InterpTier {
        InterpTier::Cubic
    }

    fn value_at(&self, x: f64) -> GridResult<f64> {
        let i = find_segment(&self.xs, x);

        let (x_lo, x_hi) = (self.xs[i], self.xs[i + 1]);
        let (y_lo, y_hi) = (self.ys[i], self.ys[i + 1]);
        let (y2_lo, y2_hi) = (self.y2s[i], self.y2s[i + 1]);

        let h = x_hi - x_lo;
        let a = (x_hi - x) / h;
        let b = (x - x_lo) / h;

        let y = a * y_lo
            + b * y_hi
            + ((a * a * a - a) * y2_lo + (b * b * b - b) * y2_hi) * (h * h) / 6.0;

        if y.is_finite() {
            Ok(y)
        } else {
            Err(GridError::invalid_quote("cubic value", y))
        }
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Solve the tridiagonal system for the knot second derivatives.
fn second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    let mut u = vec![0.0; n - 1];

    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * y2s[i - 1] + 2.0;
        y2s[i] = (sig - 1.0) / p;
        let slope_diff =
            (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * slope_diff / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    // natural end conditions
    y2s[n - 1] = 0.0;
    for i in (0..n - 1).rev() {
        y2s[i] = y2s[i] * y2s[i + 1] + u[i];
    }

    y2s
}
