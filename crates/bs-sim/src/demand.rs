//! Demand Flow step: riders docking bikes according to the centrality ranking.
//!
//! # One rider
//!
//! ```text
//! r ~ U[low, high]
//! r <= key(boundary) ?  pos ~ U[0, boundary)          (central pool)
//!                    :  pos ~ U[boundary+1, len)      (peripheral pool)
//! chosen = ranking[pos]
//!
//! deposit:   try_take_space(chosen)  ─fail─▶  first station along the
//!                                             fallback order with room,
//!                                             else dropped
//! withdraw:  first out-neighbour of the placed (or chosen) station holding
//!            enough bikes, else the failure is recorded at the first
//!            neighbour and the withdrawal is unmatched
//! ```
//!
//! Riders run strictly one after another; each sees the effects of every
//! earlier rider in the same step.

use bs_core::{DemandInterval, FallbackOrder, SimConfig, SimRng, StationId};
use bs_network::{CentralityRanking, StationNetwork};
use bs_station::{Actor, StationStore, release_at_first, take_at_first};

use crate::StepReport;

/// Where a rider decided to go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pool {
    Central,
    Peripheral,
}

/// Fixed per-run parameters of the demand step.
#[derive(Clone, Debug)]
pub struct DemandFlow {
    boundary:        usize,
    boundary_key:    f64,
    riders:          u32,
    bikes_per_rider: u32,
    interval:        DemandInterval,
    fallback_order:  FallbackOrder,
}

impl DemandFlow {
    /// The caller guarantees `boundary ∈ [1, ranking.len() - 2]`; the
    /// simulation builder checks it before constructing one.
    pub fn new(config: &SimConfig, ranking: &CentralityRanking, boundary: usize) -> Self {
        Self {
            boundary,
            boundary_key:    ranking.key_at(boundary),
            riders:          config.riders_per_step,
            bikes_per_rider: config.bikes_per_rider,
            interval:        config.demand_interval,
            fallback_order:  config.fallback_order,
        }
    }

    pub fn boundary(&self) -> usize {
        self.boundary
    }

    /// Rank-key the per-rider threshold is compared against.
    pub fn boundary_key(&self) -> f64 {
        self.boundary_key
    }

    /// Process every rider of one step, accumulating counts into `report`.
    pub fn run(
        &self,
        store:   &mut StationStore,
        network: &StationNetwork,
        ranking: &CentralityRanking,
        rng:     &mut SimRng,
        report:  &mut StepReport,
    ) {
        for _ in 0..self.riders {
            self.rider(store, network, ranking, rng, report);
        }
        report.riders += self.riders;
    }

    fn pick(&self, ranking: &CentralityRanking, rng: &mut SimRng) -> (Pool, StationId) {
        let r = rng.uniform(self.interval.low, self.interval.high);
        if r <= self.boundary_key {
            let pos = rng.gen_range(0..self.boundary);
            (Pool::Central, ranking.station_at(pos))
        } else {
            let pos = rng.gen_range(self.boundary + 1..ranking.len());
            (Pool::Peripheral, ranking.station_at(pos))
        }
    }

    fn rider(
        &self,
        store:   &mut StationStore,
        network: &StationNetwork,
        ranking: &CentralityRanking,
        rng:     &mut SimRng,
        report:  &mut StepReport,
    ) {
        let n = self.bikes_per_rider;
        let (pool, chosen) = self.pick(ranking, rng);
        match pool {
            Pool::Central    => report.central_picks += 1,
            Pool::Peripheral => report.peripheral_picks += 1,
        }

        // ── Deposit ───────────────────────────────────────────────────────
        let anchor = if store.try_take_space(chosen, n, Actor::Rider) {
            report.direct_deposits += 1;
            chosen
        } else {
            match take_at_first(store, ranking.ordered(self.fallback_order), n, Actor::Rider) {
                Some(placed) => {
                    report.fallback_deposits += 1;
                    placed
                }
                None => {
                    report.dropped_deposits += 1;
                    tracing::trace!(station = %chosen, "deposit dropped: no station has room");
                    chosen
                }
            }
        };

        // ── Matching withdrawal ───────────────────────────────────────────
        match release_at_first(store, network.neighbors(anchor), n, Actor::Rider) {
            Some(_) => report.matched_withdrawals += 1,
            None    => report.unmatched_withdrawals += 1,
        }
    }
}
