//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `station_snapshots.parquet`
//! - `step_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{OutputResult, StationSnapshotRow, StepSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("station_id",     DataType::UInt32, false),
        Field::new("step",           DataType::UInt64, false),
        Field::new("phase",          DataType::Utf8,   false),
        Field::new("total_capacity", DataType::UInt32, false),
        Field::new("spaces_free",    DataType::UInt32, false),
        Field::new("full_count",     DataType::UInt64, false),
        Field::new("empty_count",    DataType::UInt64, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("step",              DataType::UInt64, false),
        Field::new("riders",            DataType::UInt32, false),
        Field::new("dropped",           DataType::UInt32, false),
        Field::new("unmatched",         DataType::UInt32, false),
        Field::new("truck_bikes_moved", DataType::UInt32, false),
        Field::new("total_full",        DataType::UInt64, false),
        Field::new("total_empty",       DataType::UInt64, false),
        Field::new("total_bikes",       DataType::UInt64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("station_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(
            snap_file,
            Arc::clone(&snap_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("step_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut station_ids = UInt32Builder::new();
        let mut steps       = UInt64Builder::new();
        let mut phases      = StringBuilder::new();
        let mut capacities  = UInt32Builder::new();
        let mut free        = UInt32Builder::new();
        let mut full        = UInt64Builder::new();
        let mut empty       = UInt64Builder::new();

        for row in rows {
            station_ids.append_value(row.station_id);
            steps.append_value(row.step);
            phases.append_value(row.phase.as_str());
            capacities.append_value(row.total_capacity);
            free.append_value(row.spaces_free);
            full.append_value(row.full_count);
            empty.append_value(row.empty_count);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(station_ids.finish()),
                Arc::new(steps.finish()),
                Arc::new(phases.finish()),
                Arc::new(capacities.finish()),
                Arc::new(free.finish()),
                Arc::new(full.finish()),
                Arc::new(empty.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut steps     = UInt64Builder::new();
        let mut riders    = UInt32Builder::new();
        let mut dropped   = UInt32Builder::new();
        let mut unmatched = UInt32Builder::new();
        let mut moved     = UInt32Builder::new();
        let mut full      = UInt64Builder::new();
        let mut empty     = UInt64Builder::new();
        let mut bikes     = UInt64Builder::new();

        steps.append_value(row.step);
        riders.append_value(row.riders);
        dropped.append_value(row.dropped);
        unmatched.append_value(row.unmatched);
        moved.append_value(row.truck_bikes_moved);
        full.append_value(row.total_full);
        empty.append_value(row.total_empty);
        bikes.append_value(row.total_bikes);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(steps.finish()),
                Arc::new(riders.finish()),
                Arc::new(dropped.finish()),
                Arc::new(unmatched.finish()),
                Arc::new(moved.finish()),
                Arc::new(full.finish()),
                Arc::new(empty.finish()),
                Arc::new(bikes.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
