//! # Surface-Grid: Tenor Grid Interpolation and Confidence Scoring
//!
//! `surface-grid` maintains sparse per-instrument grids of FX volatility quotes indexed by
//! tenor, and densifies them on request. A new tenor is synthesized from the quoted ones by
//! term interpolation, tagged with a confidence score and an extrapolation flag, and kept
//! consistent with its derived fields (ATM level and smile strikes).
//!
//! ## Core Features
//!
//! - **Tenor Codec**: `"3M"` / `"1Y"` labels parsed to month horizons and canonicalized
//! - **Two-Tier Term Interpolation**: natural cubic spline with an explicit linear fallback,
//!   reporting the tier used for every field
//! - **Confidence Scoring**: proximity-based score for interior horizons, fixed penalty outside
//! - **Immutable Snapshots**: every mutation produces a new, sorted, revisioned grid
//! - **Single-Writer Books**: per-instrument serialization with non-blocking snapshot reads
//!
//! ## Quick Start
//!
//! ```rust
//! use surface_grid::{insert_tenor, edit_field, project_smile, default_configs};
//! use surface_grid::{Grid, QuoteField, QuoteSet, TenorPoint};
//!
//! let quotes = [("1M", 8.2), ("2M", 8.0), ("3M", 8.0), ("6M", 8.1), ("1Y", 8.2)];
//! let points = quotes
//!     .iter()
//!     .map(|&(label, atm)| TenorPoint::quoted(label, QuoteSet::new(atm, -0.4, 7.8, -0.2, 7.5)))
//!     .collect::<Result<Vec<_>, _>>()?;
//! let grid = Grid::new("EURUSD", points)?;
//!
//! // Synthesize a 4M point between the 3M and 6M quotes
//! let config = default_configs::standard();
//! let inserted = insert_tenor(&grid, "4M", &config)?;
//! assert_eq!(inserted.point.confidence(), 0.86);
//! assert!(!inserted.point.extrapolated());
//!
//! // Shift the 4M ATM level and look at its smile
//! let edited = edit_field(&inserted.grid, 4, QuoteField::Offset, 0.25, &config)?;
//! let smile = project_smile(edited.find("4M")?);
//! assert_eq!(smile.points.len(), 5);
//! # Ok::<(), surface_grid::GridError>(())
//! ```
//!
//! ## Concurrency
//!
//! [`SurfaceDesk`] holds one [`SurfaceBook`] per instrument. Each book admits one writer at a
//! time and publishes snapshots by swapping an `Arc<Grid>`, so readers always see a complete
//! grid and two edits against the same instrument can never be applied to the same base.
//!
//! ## Configuration Presets
//!
//! - `standard()`: cubic tier from four horizons, 0.2 extrapolation penalty, 0.3 interior floor
//! - `linear_only()`: the same scoring with the cubic tier disabled

// ================================================================================================
// MODULES
// ================================================================================================

pub mod desk;
pub mod error;
pub mod grid;
pub mod models;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Errors
pub use error::{GridError, GridResult};

// Grid entities and configuration
pub use grid::{
    config::{ConfidenceConfig, GridConfig, InterpConfig},
    derived::{SmilePoint, SmileSeries, StrikeLabel},
    mutator::{GridMutator, GridRequest, GridUpdate, TenorInsertion},
    point::{QuoteField, QuoteSet, TenorPoint, TenorRecord},
    types::{Grid, InstrumentId},
};

// Numerical building blocks
pub use models::{
    confidence::estimate_confidence,
    tenor::{canonical_label, format_tenor, parse_tenor},
    term_interp::{
        interpolate_with_fallback, CubicSpline, FieldEstimate, InterpTier, InterpolationReport,
        LinearInterpolant,
    },
};

// Concurrency layer
pub use desk::{ChangeRecord, SurfaceBook, SurfaceDesk};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured grid settings.
///
/// # Available Configurations
///
/// - [`standard()`]: Desk defaults
/// - [`linear_only()`]: Linear term interpolation only
pub mod default_configs {
    use crate::grid::config::GridConfig;

    /// Standard desk configuration.
    ///
    /// **Characteristics:**
    /// - Cubic spline once at least 4 tenors are known, linear below that
    /// - Extrapolated tenors scored 0.2
    /// - Interior tenors scored in [0.3, 0.99], rounded to 2 decimals
    /// - Change log of 64 entries per book
    ///
    /// # Example
    ///
    /// ```rust
    /// use surface_grid::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.interpolation.min_cubic_points, 4);
    /// ```
    pub fn standard() -> GridConfig {
        GridConfig::standard()
    }

    /// Configuration that never builds a spline.
    ///
    /// **Use Cases:**
    /// - Grids with noisy quotes where a spline would overshoot
    /// - Cross-checking cubic estimates
    pub fn linear_only() -> GridConfig {
        GridConfig::linear_only()
    }
}

// ================================================================================================
// CONVENIENCE FUNCTIONS
// ================================================================================================

/// Insert a tenor into a grid snapshot.
///
/// # Arguments
///
/// * `grid` - Current snapshot; left untouched
/// * `label` - Tenor label such as `"4M"` or `"2Y"`
/// * `config` - Scoring and interpolation settings. Use [`default_configs`] for presets.
///
/// # Returns
///
/// A [`TenorInsertion`] holding the successor grid, the synthesized point and the
/// interpolation tier used for each of its fields.
///
/// # Errors
///
/// * [`GridError::UnsupportedTenorFormat`] if the label is not `<n>M` or `<n>Y` with `n > 0`
/// * [`GridError::DuplicateTenor`] if the horizon is already quoted
/// * [`GridError::InterpolationFailure`] if the grid has too few points to interpolate
pub fn insert_tenor(grid: &Grid, label: &str, config: &GridConfig) -> GridResult<TenorInsertion> {
    GridMutator::new(config.clone()).insert_tenor(grid, label)
}

/// Edit one quote field of the point at `months`, recomputing its ATM level when the
/// field is `offset` or `atmRaw`.
///
/// # Errors
///
/// * [`GridError::TenorNotFound`] if no point has that horizon
/// * [`GridError::InvalidQuote`] if `value` is not finite
pub fn edit_field(
    grid: &Grid,
    months: u32,
    field: QuoteField,
    value: f64,
    config: &GridConfig,
) -> GridResult<Grid> {
    GridMutator::new(config.clone()).edit_field(grid, months, field, value)
}

/// Five-strike smile of a point, ordered 25DPut, 10DPut, ATM, 10DCall, 25DCall.
pub fn project_smile(point: &TenorPoint) -> SmileSeries {
    grid::derived::project_smile(point)
}
