//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use bs_core::{SimConfig, Step};
use bs_sim::{Phase, SimObserver, SimSummary, StepReport};
use bs_station::{Counter, StationStore};

use crate::row::{StationSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// Counter totals captured when the truck pass ends.
#[derive(Default)]
struct PhaseTotals {
    full:  u64,
    empty: u64,
    bikes: u64,
}

/// A [`SimObserver`] that writes station snapshots and step summaries to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    snapshot_interval: u64,
    totals:            PhaseTotals,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, snapshotting stations every
    /// `config.snapshot_interval` steps.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            snapshot_interval: config.snapshot_interval,
            totals:            PhaseTotals::default(),
            last_error:        None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn is_snapshot_step(&self, step: Step) -> bool {
        self.snapshot_interval > 0 && step.0.is_multiple_of(self.snapshot_interval)
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_phase_end(&mut self, step: Step, phase: Phase, stations: &StationStore) {
        if phase == Phase::Rebalance {
            self.totals = PhaseTotals {
                full:  stations.total(Counter::Full),
                empty: stations.total(Counter::Empty),
                bikes: stations.total_bikes(),
            };
        }
        if !self.is_snapshot_step(step) {
            return;
        }

        let rows: Vec<StationSnapshotRow> = stations
            .iter()
            .map(|(id, s)| StationSnapshotRow {
                station_id:     id.0,
                step:           step.0,
                phase,
                total_capacity: s.total_capacity(),
                spaces_free:    s.spaces_free(),
                full_count:     s.full_count(),
                empty_count:    s.empty_count(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_step_end(&mut self, step: Step, report: &StepReport) {
        let row = StepSummaryRow {
            step:              step.0,
            riders:            report.riders,
            dropped:           report.dropped_deposits,
            unmatched:         report.unmatched_withdrawals,
            truck_bikes_moved: report.truck.bikes_delivered,
            total_full:        self.totals.full,
            total_empty:       self.totals.empty,
            total_bikes:       self.totals.bikes,
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _summary: &SimSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
