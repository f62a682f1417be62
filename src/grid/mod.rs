//! Grid entities and the mutation pipeline
//!
//! - `point`: tenor points, quote fields and the external record shape
//! - `types`: the immutable per-instrument grid snapshot
//! - `derived`: ATM recomputation and smile projection
//! - `mutator`: tenor insertion and field edits producing successor snapshots
//! - `config`: confidence and interpolation settings

pub mod config;
pub mod derived;
pub mod mutator;
pub mod point;
pub mod types;

pub use config::{ConfidenceConfig, GridConfig, InterpConfig};
pub use derived::{project_smile, recompute_atm, SmilePoint, SmileSeries, StrikeLabel};
pub use mutator::{GridMutator, GridRequest, GridUpdate, TenorInsertion};
pub use point::{QuoteField, QuoteSet, TenorPoint, TenorRecord};
pub use types::{Grid, InstrumentId};
