//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `station_snapshots` and `step_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{OutputResult, StationSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS station_snapshots (
                 station_id     INTEGER NOT NULL,
                 step           INTEGER NOT NULL,
                 phase          TEXT    NOT NULL,
                 total_capacity INTEGER NOT NULL,
                 spaces_free    INTEGER NOT NULL,
                 full_count     INTEGER NOT NULL,
                 empty_count    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS step_summaries (
                 step              INTEGER PRIMARY KEY,
                 riders            INTEGER NOT NULL,
                 dropped           INTEGER NOT NULL,
                 unmatched         INTEGER NOT NULL,
                 truck_bikes_moved INTEGER NOT NULL,
                 total_full        INTEGER NOT NULL,
                 total_empty       INTEGER NOT NULL,
                 total_bikes       INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO station_snapshots \
                 (station_id, step, phase, total_capacity, spaces_free, full_count, empty_count) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.station_id,
                    row.step,
                    row.phase.as_str(),
                    row.total_capacity,
                    row.spaces_free,
                    row.full_count,
                    row.empty_count,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO step_summaries \
             (step, riders, dropped, unmatched, truck_bikes_moved, total_full, total_empty, total_bikes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.step,
                row.riders,
                row.dropped,
                row.unmatched,
                row.truck_bikes_moved,
                row.total_full,
                row.total_empty,
                row.total_bikes,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
