//! Record sink trait and types
//!
//! This module defines the trait interface consuming the walker's flattened
//! records and the associated error type.

use crate::crawler::FlatRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write record: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Consumer of flattened records.
///
/// Accepts records in any order and persists them grouped by sheet group
/// into a tabular structure with header columns `ID, Name, Depth, Parent`;
/// an absent parent is written as `0`.
pub trait RecordSink {
    /// Records one flattened row under its sheet group.
    fn record(&mut self, record: &FlatRecord) -> SinkResult<()>;

    /// Flushes and closes all groups.
    ///
    /// Called exactly once per run, even when the walk produced no records.
    fn finalize(&mut self) -> SinkResult<()>;
}
