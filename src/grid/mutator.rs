use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::{GridError, GridResult};
use crate::models::confidence::estimate_confidence;
use crate::models::tenor::{format_tenor, parse_tenor};
use crate::models::term_interp::{interpolate_with_fallback, InterpolationReport};

use super::config::GridConfig;
use super::derived::{project_smile, recompute_atm, SmileSeries};
use super::point::{QuoteField, QuoteSet, TenorPoint};
use super::types::Grid;

/// One mutation request against an instrument's grid
///
/// Serialized with an `operation` tag, matching the request shape of the
/// display layer:
///
/// ```json
/// {"operation": "insertTenor", "label": "4M"}
/// {"operation": "editField", "months": 3, "field": "offset", "value": 0.5}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum GridRequest {
    InsertTenor {
        label: String,
    },
    EditField {
        months: u32,
        field: QuoteField,
        value: f64,
    },
}

impl GridRequest {
    pub fn insert(label: impl Into<String>) -> Self {
        GridRequest::InsertTenor {
            label: label.into(),
        }
    }

    pub fn edit(months: u32, field: QuoteField, value: f64) -> Self {
        GridRequest::EditField {
            months,
            field,
            value,
        }
    }
}

impl fmt::Display for GridRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridRequest::InsertTenor { label } => write!(f, "insert {}", label),
            GridRequest::EditField {
                months,
                field,
                value,
            } => write!(f, "edit {} {} = {}", format_tenor(*months), field, value),
        }
    }
}

/// Result of a successful tenor insertion
#[derive(Debug, Clone)]
pub struct TenorInsertion {
    /// Successor snapshot containing the new point
    pub grid: Grid,
    /// The synthesized point
    pub point: TenorPoint,
    /// Tier used for each interpolated field
    pub report: InterpolationReport,
}

/// Result of a successful request, ready for display
#[derive(Debug, Clone)]
pub struct GridUpdate {
    pub grid: Arc<Grid>,
    /// Horizon of the inserted or edited point
    pub months: u32,
    /// Smile of the inserted or edited point
    pub smile: SmileSeries,
    /// Present for insertions only
    pub report: Option<InterpolationReport>,
}

/// Stateless mutation pipeline for grid snapshots
///
/// Every operation takes a snapshot by reference and returns a successor;
/// on error the input snapshot is the state of record.
#[derive(Debug, Clone, Default)]
pub struct GridMutator {
    config: GridConfig,
}

impl GridMutator {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Synthesize a new tenor from the points already on the grid.
    ///
    /// The horizon is scored with [`estimate_confidence`] and each of the five
    /// quote fields is interpolated independently over all known horizons.
    /// Any field that cannot be interpolated aborts the whole insertion.
    ///
    /// # Errors
    ///
    /// * [`GridError::UnsupportedTenorFormat`] for a malformed label
    /// * [`GridError::DuplicateTenor`] if the horizon is already on the grid
    /// * [`GridError::InterpolationFailure`] if some field has no usable interpolant
    pub fn insert_tenor(&self, grid: &Grid, label: &str) -> GridResult<TenorInsertion> {
        let months = parse_tenor(label)?;
        if grid.contains(months) {
            return Err(GridError::DuplicateTenor {
                label: format_tenor(months),
                months,
            });
        }

        let known = grid.months();
        let extrapolated = months < grid.min_months() || months > grid.max_months();
        let confidence = estimate_confidence(months, &known, &self.config.confidence)?;

        let x = f64::from(months);
        let mut quotes = QuoteSet::new(0.0, 0.0, 0.0, 0.0, 0.0);
        let mut report = InterpolationReport::default();
        for field in QuoteField::INTERPOLATED {
            let knots: Vec<(f64, f64)> = grid
                .points()
                .iter()
                .map(|p| (f64::from(p.months()), p.field(field)))
                .collect();
            let estimate =
                interpolate_with_fallback(field, &knots, x, &self.config.interpolation)?;
            quotes.set(field, estimate.value);
            report.estimates.push((field, estimate));
        }

        let point = TenorPoint::synthesized(months, quotes, confidence, extrapolated);
        debug!(
            instrument = %grid.instrument(),
            tenor = point.tenor_label(),
            confidence,
            extrapolated,
            "synthesized tenor"
        );

        let mut points = grid.points().to_vec();
        points.push(point.clone());
        Ok(TenorInsertion {
            grid: grid.successor(points)?,
            point,
            report,
        })
    }

    /// Replace one field of the point at `months`.
    ///
    /// Editing `offset` or `atmRaw` recomputes the point's ATM level. Every
    /// other point is carried over unchanged.
    ///
    /// # Errors
    ///
    /// * [`GridError::InvalidQuote`] for a non-finite value
    /// * [`GridError::TenorNotFound`] if no point has that horizon
    pub fn edit_field(
        &self,
        grid: &Grid,
        months: u32,
        field: QuoteField,
        value: f64,
    ) -> GridResult<Grid> {
        if !value.is_finite() {
            return Err(GridError::invalid_quote(field.name(), value));
        }
        let index = grid
            .position(months)
            .ok_or(GridError::TenorNotFound { months })?;

        let mut points = grid.points().to_vec();
        let edited = points[index].with_field(field, value);
        points[index] = if field.drives_atm() {
            recompute_atm(&edited)
        } else {
            edited
        };

        grid.successor(points)
    }

    /// Dispatch a request and package the outcome for display.
    pub fn apply(&self, grid: &Grid, request: &GridRequest) -> GridResult<GridUpdate> {
        let (next, months, report) = match request {
            GridRequest::InsertTenor { label } => {
                let insertion = self.insert_tenor(grid, label)?;
                let months = insertion.point.months();
                (insertion.grid, months, Some(insertion.report))
            }
            GridRequest::EditField {
                months,
                field,
                value,
            } => (self.edit_field(grid, *months, *field, *value)?, *months, None),
        };

        let smile = next
            .get(months)
            .map(project_smile)
            .ok_or(GridError::TenorNotFound { months })?;

        Ok(GridUpdate {
            grid: Arc::new(next),
            months,
            smile,
            report,
        })
    }
}
