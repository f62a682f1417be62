use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::point::QuoteField;

/// Tier of the interpolation policy that produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpTier {
    /// Natural cubic spline over all known horizons
    Cubic,
    /// Piecewise linear fallback
    Linear,
}

impl fmt::Display for InterpTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpTier::Cubic => write!(f, "cubic"),
            InterpTier::Linear => write!(f, "linear"),
        }
    }
}

/// Value estimated for one field together with the tier that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldEstimate {
    pub value: f64,
    pub tier: InterpTier,
    /// True when the cubic tier was eligible but failed
    pub fell_back: bool,
}

/// Per-field estimates of one tenor insertion, in `QuoteField::INTERPOLATED` order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterpolationReport {
    pub estimates: Vec<(QuoteField, FieldEstimate)>,
}

impl InterpolationReport {
    /// Get the estimate for a specific field
    pub fn get(&self, field: QuoteField) -> Option<&FieldEstimate> {
        self.estimates
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, estimate)| estimate)
    }

    /// Tier used for a specific field
    pub fn tier(&self, field: QuoteField) -> Option<InterpTier> {
        self.get(field).map(|estimate| estimate.tier)
    }

    /// Fields whose cubic interpolant failed and were filled linearly
    pub fn fallback_fields(&self) -> Vec<QuoteField> {
        self.estimates
            .iter()
            .filter(|(_, estimate)| estimate.fell_back)
            .map(|(field, _)| *field)
            .collect()
    }
}
