pub mod confidence;
pub mod tenor;
pub mod term_interp;

/// Common traits shared by the term-structure interpolants
pub mod traits {
    use crate::error::GridResult;
    use crate::models::term_interp::InterpTier;

    /// An interpolant over (horizon, value) knots that can also extrapolate
    pub trait TermInterpolant {
        /// Which tier of the fallback policy this interpolant implements
        fn tier(&self) -> InterpTier;

        /// Evaluate at horizon `x`, extrapolating outside the knot span
        fn value_at(&self, x: f64) -> GridResult<f64>;

        fn min_x(&self) -> f64;
        fn max_x(&self) -> f64;
    }
}

/// Knot helpers shared by the interpolants
pub mod utils {
    use crate::error::{GridError, GridResult};

    /// Check that knots are usable: equal lengths, enough of them, strictly
    /// increasing abscissae and finite ordinates.
    pub fn validate_knots(xs: &[f64], ys: &[f64], min_points: usize) -> GridResult<()> {
        if xs.len() != ys.len() {
            return Err(GridError::invalid_quote("knot count", ys.len() as f64));
        }
        if xs.len() < min_points {
            return Err(GridError::insufficient_points(min_points, xs.len()));
        }
        if let Some(&x) = xs.iter().find(|x| !x.is_finite()) {
            return Err(GridError::invalid_quote("knot horizon", x));
        }
        if let Some(w) = xs.windows(2).find(|w| w[1] <= w[0]) {
            return Err(GridError::invalid_quote("knot horizon", w[1]));
        }
        if let Some(&y) = ys.iter().find(|y| !y.is_finite()) {
            return Err(GridError::invalid_quote("knot value", y));
        }
        Ok(())
    }

    /// Index `i` of the segment `[xs[i], xs[i + 1]]` used to evaluate `x`.
    ///
    /// Points left of the span use the first segment and points right of it the
    /// last, which is how both tiers extrapolate.
    pub fn find_segment(xs: &[f64], x: f64) -> usize {
        let last = xs.len().saturating_sub(2);
        match xs.binary_search_by(|probe| {
            probe
                .partial_cmp(&x)
                .unwrap_or(std::cmp::Ordering::Equal)
        }) {
            Ok(i) => i.min(last),
            Err(i) => i.saturating_sub(1).min(last),
        }
    }

}
