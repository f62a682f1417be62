use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{GridError, GridResult};
use crate::models::tenor::{format_tenor, parse_tenor};

use super::point::{TenorPoint, TenorRecord};

/// Instrument key selecting a grid (e.g. `"EURUSD"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for InstrumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for InstrumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Immutable snapshot of one instrument's tenor grid
///
/// Invariants, checked on construction and preserved by every mutation:
/// points are strictly ascending by `months` (so no horizon repeats) and the
/// grid is never empty. Mutations never patch a grid in place; they build a
/// successor with `revision + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    instrument: InstrumentId,
    revision: u64,
    points: Vec<TenorPoint>,
}

impl Grid {
    /// Seed a grid from externally supplied points (any order).
    ///
    /// # Errors
    ///
    /// * [`GridError::EmptyGrid`] if `points` is empty
    /// * [`GridError::DuplicateTenor`] if two points share a horizon
    pub fn new(instrument: impl Into<InstrumentId>, points: Vec<TenorPoint>) -> GridResult<Self> {
        let instrument = instrument.into();
        if points.is_empty() {
            return Err(GridError::EmptyGrid {
                instrument: instrument.to_string(),
            });
        }

        let points = sorted_unique(points)?;
        Ok(Self {
            instrument,
            revision: 0,
            points,
        })
    }

    /// Seed a grid from external records
    pub fn from_records(
        instrument: impl Into<InstrumentId>,
        records: Vec<TenorRecord>,
    ) -> GridResult<Self> {
        let points = records
            .into_iter()
            .map(TenorPoint::try_from)
            .collect::<GridResult<Vec<_>>>()?;
        Self::new(instrument, points)
    }

    /// Successor snapshot holding `points`, which must already satisfy the
    /// grid invariants apart from ordering
    pub(crate) fn successor(&self, points: Vec<TenorPoint>) -> GridResult<Self> {
        Ok(Self {
            instrument: self.instrument.clone(),
            revision: self.revision + 1,
            points: sorted_unique(points)?,
        })
    }

    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    /// Number of committed mutations since seeding
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn points(&self) -> &[TenorPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed grid; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Known horizons in ascending order
    pub fn months(&self) -> Vec<u32> {
        self.points.iter().map(TenorPoint::months).collect()
    }

    /// Labels in ascending horizon order, for a tenor selector
    pub fn tenor_labels(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.tenor_label().to_string())
            .collect()
    }

    pub fn min_months(&self) -> u32 {
        self.points.first().map_or(0, TenorPoint::months)
    }

    pub fn max_months(&self) -> u32 {
        self.points.last().map_or(0, TenorPoint::months)
    }

    pub fn contains(&self, months: u32) -> bool {
        self.position(months).is_some()
    }

    /// Point at an exact horizon
    pub fn get(&self, months: u32) -> Option<&TenorPoint> {
        self.position(months).map(|i| &self.points[i])
    }

    /// Point by label; `"12M"` finds the `1Y` point
    pub fn find(&self, label: &str) -> GridResult<&TenorPoint> {
        let months = parse_tenor(label)?;
        self.get(months)
            .ok_or(GridError::TenorNotFound { months })
    }

    pub(crate) fn position(&self, months: u32) -> Option<usize> {
        self.points
            .binary_search_by_key(&months, TenorPoint::months)
            .ok()
    }

    /// Records in the external shape, ascending by horizon
    pub fn to_records(&self) -> Vec<TenorRecord> {
        self.points.iter().cloned().map(TenorRecord::from).collect()
    }
}

/// Sort ascending by horizon and reject repeated horizons
fn sorted_unique(mut points: Vec<TenorPoint>) -> GridResult<Vec<TenorPoint>> {
    points.sort_by_key(TenorPoint::months);
    if let Some(w) = points.windows(2).find(|w| w[0].months() == w[1].months()) {
        let months = w[1].months();
        return Err(GridError::DuplicateTenor {
            label: format_tenor(months),
            months,
        });
    }
    Ok(points)
}
