//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, StationSnapshotRow, StepSummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Writer errors never interrupt a run: [`SimOutputObserver`] stores the
/// first one, to be retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver`]: crate::SimOutputObserver
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write a batch of station snapshots.
    fn write_snapshots(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
