//! Registry of books keyed by instrument.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

use crate::error::{GridError, GridResult};
use crate::grid::config::GridConfig;
use crate::grid::derived::SmileSeries;
use crate::grid::mutator::{GridMutator, GridRequest, GridUpdate};
use crate::grid::point::{TenorPoint, TenorRecord};
use crate::grid::types::{Grid, InstrumentId};

use super::book::SurfaceBook;

/// All open instrument books.
///
/// Every request names its instrument explicitly and is routed to that
/// instrument's book; books for different instruments never contend.
pub struct SurfaceDesk {
    books: DashMap<InstrumentId, Arc<SurfaceBook>>,
    config: GridConfig,
}

impl SurfaceDesk {
    pub fn new(config: GridConfig) -> Self {
        Self {
            books: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Seed a book for an instrument.
    pub fn open(
        &self,
        instrument: impl Into<InstrumentId>,
        points: Vec<TenorPoint>,
    ) -> GridResult<Arc<SurfaceBook>> {
        let grid = Grid::new(instrument, points)?;
        self.insert_book(grid)
    }

    /// Seed a book from external records.
    pub fn open_records(
        &self,
        instrument: impl Into<InstrumentId>,
        records: Vec<TenorRecord>,
    ) -> GridResult<Arc<SurfaceBook>> {
        let grid = Grid::from_records(instrument, records)?;
        self.insert_book(grid)
    }

    fn insert_book(&self, grid: Grid) -> GridResult<Arc<SurfaceBook>> {
        match self.books.entry(grid.instrument().clone()) {
            Entry::Occupied(entry) => Err(GridError::InstrumentAlreadyOpen(entry.key().to_string())),
            Entry::Vacant(entry) => {
                info!(instrument = %grid.instrument(), tenors = grid.len(), "book opened");
                let book = Arc::new(SurfaceBook::new(
                    grid,
                    GridMutator::new(self.config.clone()),
                ));
                entry.insert(book.clone());
                Ok(book)
            }
        }
    }

    /// Drop a book; returns its last snapshot.
    pub fn close(&self, instrument: &str) -> GridResult<Arc<Grid>> {
        let (_, book) = self
            .books
            .remove(instrument)
            .ok_or_else(|| GridError::UnknownInstrument(instrument.to_string()))?;
        info!(instrument, "book closed");
        Ok(book.snapshot())
    }

    /// Open instruments, sorted
    pub fn instruments(&self) -> Vec<InstrumentId> {
        let mut ids: Vec<InstrumentId> = self.books.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn book(&self, instrument: &str) -> GridResult<Arc<SurfaceBook>> {
        self.books
            .get(instrument)
            .map(|b| b.value().clone())
            .ok_or_else(|| GridError::UnknownInstrument(instrument.to_string()))
    }

    /// Route a request to the instrument's book.
    pub fn apply(&self, instrument: &str, request: &GridRequest) -> GridResult<GridUpdate> {
        // Clone the book out so the map shard is not held during the mutation.
        self.book(instrument)?.apply(request)
    }

    pub fn snapshot(&self, instrument: &str) -> GridResult<Arc<Grid>> {
        Ok(self.book(instrument)?.snapshot())
    }

    pub fn tenor_labels(&self, instrument: &str) -> GridResult<Vec<String>> {
        Ok(self.book(instrument)?.tenor_labels())
    }

    pub fn smile(&self, instrument: &str, label: &str) -> GridResult<SmileSeries> {
        self.book(instrument)?.smile(label)
    }
}

impl Default for SurfaceDesk {
    fn default() -> Self {
        Self::new(GridConfig::standard())
    }
}
