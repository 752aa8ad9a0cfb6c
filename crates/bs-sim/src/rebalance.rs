//! Truck pass: bulk, non-demand transfers out of nearly full stations.
//!
//! ```text
//! sources = { s : total_capacity(s) > 0  ∧  spaces_free(s) <= total_capacity(s) * fraction }
//! heap    = max by centrality, ties → lower StationId first
//!
//! repeat runs times:
//!     src    = heap.pop()              (stop when exhausted)
//!     amount = total_capacity(src) * pct / 100
//!     amount == 0 or release fails  →  run skipped
//!     fill   = stations ≠ src, ascending bikes_present, then StationId
//!     deposit amount along fill; leftovers go back to src
//! ```
//!
//! Every primitive call is tagged [`Actor::Truck`], so a pass never touches
//! saturation counters and never changes the total number of docked bikes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bs_core::{StationId, TruckConfig};
use bs_station::{Actor, StationStore, deposit_along};

use crate::TruckReport;

/// A pickup candidate ordered for a max-heap.
#[derive(Copy, Clone, Debug)]
struct Source {
    centrality: f64,
    station:    StationId,
}

impl Ord for Source {
    fn cmp(&self, other: &Self) -> Ordering {
        self.centrality
            .total_cmp(&other.centrality)
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for Source {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Source {}

/// Rebalancing parameters bound for one run.
#[derive(Clone, Debug)]
pub struct TruckPass {
    config: TruckConfig,
}

impl TruckPass {
    pub fn new(config: TruckConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.runs > 0
    }

    /// Stations eligible as pickup sources right now, highest priority first.
    pub fn sources(&self, store: &StationStore) -> Vec<StationId> {
        let mut heap = self.source_heap(store);
        std::iter::from_fn(|| heap.pop().map(|s| s.station)).collect()
    }

    fn source_heap(&self, store: &StationStore) -> BinaryHeap<Source> {
        let fraction = self.config.low_space_fraction;
        store
            .iter()
            .filter(|(_, s)| {
                s.total_capacity() > 0
                    && s.spaces_free() as f64 <= s.total_capacity() as f64 * fraction
            })
            .map(|(station, s)| Source { centrality: s.centrality(), station })
            .collect()
    }

    /// Stations other than `source`, emptiest first.
    fn fill_order(store: &StationStore, source: StationId) -> Vec<StationId> {
        let mut fill: Vec<StationId> = store
            .iter()
            .map(|(id, _)| id)
            .filter(|&id| id != source)
            .collect();
        fill.sort_by_key(|&id| (store.bikes_present(id), id));
        fill
    }

    /// Run one pass against `store`.
    pub fn run(&self, store: &mut StationStore) -> TruckReport {
        let mut report = TruckReport::default();
        if !self.is_enabled() {
            return report;
        }

        let mut heap = self.source_heap(store);
        for _ in 0..self.config.runs {
            let Some(Source { station: src, .. }) = heap.pop() else {
                break;
            };
            report.runs_attempted += 1;

            let capacity = store.get(src).total_capacity() as u64;
            let amount = (capacity * self.config.transfer_pct as u64 / 100) as u32;
            if amount == 0 || !store.try_release_space(src, amount, Actor::Truck) {
                report.runs_skipped += 1;
                tracing::trace!(station = %src, amount, "truck run skipped");
                continue;
            }
            report.bikes_collected += amount;

            let fill = Self::fill_order(store, src);
            let delivered = deposit_along(store, fill, amount, Actor::Truck).moved;
            report.bikes_delivered += delivered;

            let leftover = amount - delivered;
            if leftover > 0 {
                // The pickup just freed `amount` docks at the source.
                store.try_take_space(src, leftover, Actor::Truck);
                report.bikes_returned += leftover;
            }
            tracing::trace!(station = %src, amount, delivered, leftover, "truck run");
        }
        report
    }
}
