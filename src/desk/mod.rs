//! Concurrent ownership of per-instrument grids
//!
//! A [`SurfaceBook`] is the single writer for one instrument and publishes
//! snapshots by atomic `Arc` swap. A [`SurfaceDesk`] routes requests to books
//! by instrument key.

pub mod book;
pub mod registry;

pub use book::{ChangeRecord, SurfaceBook};
pub use registry::SurfaceDesk;
