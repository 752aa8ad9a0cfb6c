//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `station_snapshots.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, StationSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("station_snapshots.csv"))?;
        snapshots.write_record([
            "station_id", "step", "phase", "total_capacity", "spaces_free", "full_count", "empty_count",
        ])?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record([
            "step", "riders", "dropped", "unmatched", "truck_bikes_moved",
            "total_full", "total_empty", "total_bikes",
        ])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.station_id.to_string(),
                row.step.to_string(),
                row.phase.as_str().to_owned(),
                row.total_capacity.to_string(),
                row.spaces_free.to_string(),
                row.full_count.to_string(),
                row.empty_count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.riders.to_string(),
            row.dropped.to_string(),
            row.unmatched.to_string(),
            row.truck_bikes_moved.to_string(),
            row.total_full.to_string(),
            row.total_empty.to_string(),
            row.total_bikes.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
