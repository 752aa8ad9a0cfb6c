//! The `Sim` struct and its step loop.

use bs_core::{SimConfig, SimRng, Step};
use bs_network::{CentralityRanking, StationNetwork};
use bs_station::{Counter, StationStore};

use crate::{DemandFlow, Phase, SimObserver, SimSummary, StepReport, TruckPass};

/// Driver lifecycle.  A [`SimBuilder`][crate::SimBuilder] is the
/// uninitialized state; a freshly built `Sim` starts `Initialized`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimState {
    Initialized,
    /// At least one step has run; holds the next step to execute.
    Running(Step),
    /// Terminal: set by [`Sim::run`].  No further step executes.
    Completed,
}

/// Run-wide totals accumulated across steps.
#[derive(Clone, Debug, Default)]
struct Totals {
    dropped:     u64,
    unmatched:   u64,
    truck_moved: u64,
}

/// The main simulation runner.
///
/// Each step runs two phases in order:
///
/// 1. **Demand**: `riders_per_step` riders, strictly sequential, each
///    docking `bikes_per_rider` bikes and withdrawing a matching number from
///    a neighbour.
/// 2. **Rebalance**: up to `truck.runs` truck transfers out of nearly full
///    stations.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Immutable run configuration.
    pub config: SimConfig,

    /// Directed station graph.  Only edge existence and neighbour order are
    /// consumed by the step.
    pub network: StationNetwork,

    /// Ranking derived once at build time; never recomputed.
    pub ranking: CentralityRanking,

    /// Mutable per-station state.
    pub stations: StationStore,

    pub(crate) demand:         DemandFlow,
    pub(crate) trucks:         TruckPass,
    pub(crate) rng:            SimRng,
    pub(crate) state:          SimState,
    pub(crate) current:        Step,
    pub(crate) bikes_at_start: u64,
    totals:                    Totals,
}

impl Sim {
    pub(crate) fn from_parts(
        config:   SimConfig,
        network:  StationNetwork,
        ranking:  CentralityRanking,
        stations: StationStore,
        demand:   DemandFlow,
    ) -> Self {
        let rng = SimRng::new(config.seed);
        let trucks = TruckPass::new(config.truck.clone());
        let bikes_at_start = stations.total_bikes();
        Self {
            config,
            network,
            ranking,
            stations,
            demand,
            trucks,
            rng,
            state: SimState::Initialized,
            current: Step::ZERO,
            bikes_at_start,
            totals: Totals::default(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn state(&self) -> SimState {
        self.state
    }

    /// The next step to execute.
    pub fn current_step(&self) -> Step {
        self.current
    }

    /// Boundary index between the central and peripheral pools.
    pub fn boundary(&self) -> usize {
        self.demand.boundary()
    }

    /// Run from the current step to `config.end_step()` and complete.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// On a completed sim this returns the final summary and fires no hooks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimSummary {
        if self.state == SimState::Completed {
            return self.summary();
        }
        while self.current < self.config.end_step() {
            self.step(observer);
        }
        self.state = SimState::Completed;
        let summary = self.summary();
        tracing::debug!(
            steps = summary.steps,
            total_full = summary.total_full,
            total_empty = summary.total_empty,
            bikes = summary.bikes_at_end,
            "simulation completed"
        );
        observer.on_sim_end(&summary);
        summary
    }

    /// Run exactly `n` steps from the current position (ignores `end_step`).
    ///
    /// Useful for tests and incremental stepping.  Returns no reports once
    /// the sim is completed.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> Vec<StepReport> {
        (0..n).map_while(|_| self.step(observer)).collect()
    }

    /// Execute one Demand + Rebalance step.
    ///
    /// Returns `None` without touching any state when the sim is completed.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> Option<StepReport> {
        if self.state == SimState::Completed {
            return None;
        }
        let now = self.current;
        observer.on_step_start(now);
        let report = self.process_step(now, observer);
        observer.on_step_end(now, &report);
        if self.config.snapshot_interval > 0
            && now.0.is_multiple_of(self.config.snapshot_interval)
        {
            observer.on_snapshot(now, &self.stations);
        }

        self.current = now.next();
        self.state = SimState::Running(self.current);
        Some(report)
    }

    /// Aggregate results so far.
    pub fn summary(&self) -> SimSummary {
        SimSummary {
            seed:                  self.config.seed,
            steps:                 self.current.0,
            total_full:            self.stations.total(Counter::Full),
            total_empty:           self.stations.total(Counter::Empty),
            bikes_at_start:        self.bikes_at_start,
            bikes_at_end:          self.stations.total_bikes(),
            stations_ever_full:    self.stations.saturated(Counter::Full).len(),
            stations_ever_empty:   self.stations.saturated(Counter::Empty).len(),
            dropped_deposits:      self.totals.dropped,
            unmatched_withdrawals: self.totals.unmatched,
            truck_bikes_moved:     self.totals.truck_moved,
        }
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn process_step<O: SimObserver>(&mut self, now: Step, observer: &mut O) -> StepReport {
        let mut report = StepReport::new(now);

        // ── Phase 1: demand ───────────────────────────────────────────────
        self.demand.run(
            &mut self.stations,
            &self.network,
            &self.ranking,
            &mut self.rng,
            &mut report,
        );
        observer.on_phase_end(now, Phase::Demand, &self.stations);

        // ── Phase 2: rebalance ────────────────────────────────────────────
        report.truck = self.trucks.run(&mut self.stations);
        observer.on_phase_end(now, Phase::Rebalance, &self.stations);

        self.totals.dropped += report.dropped_deposits as u64;
        self.totals.unmatched += report.unmatched_withdrawals as u64;
        self.totals.truck_moved += report.truck.bikes_delivered as u64;

        tracing::debug!(
            step = now.0,
            dropped = report.dropped_deposits,
            unmatched = report.unmatched_withdrawals,
            truck_moved = report.truck.bikes_delivered,
            bikes = self.stations.total_bikes(),
            "step complete"
        );
        report
    }
}
