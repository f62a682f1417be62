//! Error types for grid operations.

use thiserror::Error;

use crate::grid::point::QuoteField;

/// A specialized Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can abort a grid operation.
///
/// Every variant leaves the caller's snapshot untouched: mutations build a new
/// grid and only hand it back when all steps succeed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Tenor label is not `<n>M` or `<n>Y` with a positive integer `n`.
    #[error("Unsupported tenor format: {label:?} (expected <n>M or <n>Y with n > 0)")]
    UnsupportedTenorFormat {
        /// The rejected label.
        label: String,
    },

    /// The horizon is already present on the grid.
    #[error("Duplicate tenor: {label} ({months} months) is already on the grid")]
    DuplicateTenor {
        /// Canonical label of the horizon.
        label: String,
        /// Horizon in months.
        months: u32,
    },

    /// An edit targets a horizon that is not on the grid.
    #[error("Tenor not found: no point at {months} months")]
    TenorNotFound {
        /// Requested horizon in months.
        months: u32,
    },

    /// Not enough known points for the requested branch.
    #[error("Insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Points available.
        actual: usize,
    },

    /// Both the cubic and the linear interpolant failed for a field.
    #[error("Interpolation failed for {field}: {reason}")]
    InterpolationFailure {
        /// The field being interpolated.
        field: QuoteField,
        /// Why the linear tier failed.
        reason: String,
    },

    /// A supplied value is non-finite or outside its allowed range.
    #[error("Invalid value {value} for {field}")]
    InvalidQuote {
        /// Name of the offending field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// A field name that does not denote an editable quote field.
    #[error("Unknown quote field: {0:?}")]
    UnknownField(String),

    /// A grid must hold at least one point.
    #[error("Grid for {instrument} has no points")]
    EmptyGrid {
        /// Instrument whose grid was empty.
        instrument: String,
    },

    /// No book is open for the instrument.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// A book is already open for the instrument.
    #[error("Instrument {0} is already open")]
    InstrumentAlreadyOpen(String),
}

impl GridError {
    /// Creates an unsupported tenor format error.
    pub fn unsupported_tenor(label: impl Into<String>) -> Self {
        Self::UnsupportedTenorFormat {
            label: label.into(),
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Creates an invalid quote error.
    pub fn invalid_quote(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidQuote {
            field: field.into(),
            value,
        }
    }
}
