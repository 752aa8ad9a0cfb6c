//! Simulation observer trait for progress reporting and data collection.

use bs_core::Step;
use bs_station::StationStore;

use crate::{Phase, SimSummary, StepReport};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: Step, report: &StepReport) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: {} riders, {} dropped", report.riders, report.dropped_deposits);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any rider moves.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after the demand phase and again after the truck pass, with
    /// the station state as that phase left it.
    fn on_phase_end(&mut self, _step: Step, _phase: Phase, _stations: &StationStore) {}

    /// Called at the end of each step.
    fn on_step_end(&mut self, _step: Step, _report: &StepReport) {}

    /// Called at snapshot intervals (every `config.snapshot_interval` steps),
    /// after `on_step_end`.
    fn on_snapshot(&mut self, _step: Step, _stations: &StationStore) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _summary: &SimSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
