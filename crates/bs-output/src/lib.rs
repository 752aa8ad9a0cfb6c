//! `bs-output` — simulation output writers for the bike-share simulator.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                             |
//! |-----------|-------------|-----------------------------------------------------------|
//! | *(none)*  | CSV         | `station_snapshots.csv`, `step_summaries.csv`             |
//! | `sqlite`  | SQLite      | `output.db`                                               |
//! | `parquet` | Parquet     | `station_snapshots.parquet`, `step_summaries.parquet`     |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `bs_sim::SimObserver`.
//!
//! Station snapshots are taken twice per snapshot step: once after the
//! demand phase and once after the truck pass, tagged with the phase.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{StationSnapshotRow, StepSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
