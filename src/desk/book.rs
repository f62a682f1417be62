//! Single-writer owner of one instrument's grid.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::GridResult;
use crate::grid::derived::{project_smile, SmileSeries};
use crate::grid::mutator::{GridMutator, GridRequest, GridUpdate};
use crate::grid::types::{Grid, InstrumentId};

/// One committed mutation in a book's change log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Revision of the snapshot the change produced
    pub revision: u64,
    pub request: GridRequest,
    pub summary: String,
}

/// Owns the current grid of one instrument.
///
/// Readers take a cheap `Arc` clone of the latest snapshot and never block on
/// a mutation in flight. Writers are serialized by the writer section, so every
/// request is applied to the snapshot left by the previous one.
pub struct SurfaceBook {
    instrument: InstrumentId,
    mutator: GridMutator,
    current: RwLock<Arc<Grid>>,
    /// Writer section; also guards the change log
    writer: Mutex<VecDeque<ChangeRecord>>,
    history_limit: usize,
}

impl SurfaceBook {
    /// Create a book around a seeded grid.
    pub fn new(grid: Grid, mutator: GridMutator) -> Self {
        let history_limit = mutator.config().history_limit;
        Self {
            instrument: grid.instrument().clone(),
            mutator,
            current: RwLock::new(Arc::new(grid)),
            writer: Mutex::new(VecDeque::with_capacity(history_limit)),
            history_limit,
        }
    }

    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> Arc<Grid> {
        self.current.read().clone()
    }

    /// Apply a request to the latest snapshot and publish the result.
    ///
    /// On error nothing is published and the change log is untouched.
    pub fn apply(&self, request: &GridRequest) -> GridResult<GridUpdate> {
        let mut log = self.writer.lock();
        let base = self.snapshot();

        let update = match self.mutator.apply(&base, request) {
            Ok(update) => update,
            Err(e) => {
                warn!(
                    instrument = %self.instrument,
                    revision = base.revision(),
                    %request,
                    error = %e,
                    "request rejected"
                );
                return Err(e);
            }
        };

        *self.current.write() = update.grid.clone();

        let record = ChangeRecord {
            revision: update.grid.revision(),
            request: request.clone(),
            summary: summarize(&update),
        };
        info!(
            instrument = %self.instrument,
            revision = record.revision,
            summary = %record.summary,
            "snapshot committed"
        );
        if self.history_limit > 0 {
            if log.len() == self.history_limit {
                log.pop_front();
            }
            log.push_back(record);
        }

        Ok(update)
    }

    /// Tenor labels of the latest snapshot, ascending
    pub fn tenor_labels(&self) -> Vec<String> {
        self.snapshot().tenor_labels()
    }

    /// Smile of one tenor of the latest snapshot
    pub fn smile(&self, label: &str) -> GridResult<SmileSeries> {
        self.snapshot().find(label).map(project_smile)
    }

    /// Committed changes, oldest first
    pub fn history(&self) -> Vec<ChangeRecord> {
        self.writer.lock().iter().cloned().collect()
    }
}

fn summarize(update: &GridUpdate) -> String {
    let Some(point) = update.grid.get(update.months) else {
        return String::new();
    };
    match &update.report {
        Some(report) => {
            let fallbacks = report.fallback_fields();
            let mut summary = format!(
                "inserted {} (confidence {:.2}{})",
                point.tenor_label(),
                point.confidence(),
                if point.extrapolated() { ", extrapolated" } else { "" }
            );
            if !fallbacks.is_empty() {
                let names: Vec<&str> = fallbacks.iter().map(|f| f.name()).collect();
                summary.push_str(&format!(", linear fallback for {}", names.join(", ")));
            }
            summary
        }
        None => format!(
            "edited {} (atm {:.4}, offset {:.4})",
            point.tenor_label(),
            point.atm(),
            point.offset()
        ),
    }
}
