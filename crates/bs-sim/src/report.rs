//! Per-step and per-run counts reported by the driver.

use bs_core::Step;

/// Which half of a step just finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// After all riders of the step were processed.
    Demand,
    /// After the truck pass.
    Rebalance,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Demand    => "demand",
            Phase::Rebalance => "rebalance",
        }
    }
}

/// Outcome of one truck pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruckReport {
    /// Runs that popped a source station.
    pub runs_attempted:  u32,
    /// Runs skipped because the transfer was zero or the pickup failed.
    pub runs_skipped:    u32,
    pub bikes_collected: u32,
    pub bikes_delivered: u32,
    /// Collected bikes the fill list could not absorb, docked back at the source.
    pub bikes_returned:  u32,
}

/// Outcome of one Demand + Rebalance step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    pub step:                  Step,
    pub riders:                u32,
    pub central_picks:         u32,
    pub peripheral_picks:      u32,
    /// Deposits accepted by the randomly chosen station.
    pub direct_deposits:       u32,
    /// Deposits placed by the fallback ranking scan.
    pub fallback_deposits:     u32,
    /// Deposits no station could accept.
    pub dropped_deposits:      u32,
    pub matched_withdrawals:   u32,
    pub unmatched_withdrawals: u32,
    pub truck:                 TruckReport,
}

impl StepReport {
    pub(crate) fn new(step: Step) -> Self {
        Self { step, ..Self::default() }
    }

    /// Net change in bikes docked caused by the demand phase, in riders.
    ///
    /// Multiply by `bikes_per_rider` for bikes.
    pub fn demand_imbalance(&self) -> i64 {
        self.unmatched_withdrawals as i64 - self.dropped_deposits as i64
    }
}

/// Aggregate results of a whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSummary {
    pub seed:                  u64,
    pub steps:                 u64,
    pub total_full:            u64,
    pub total_empty:           u64,
    pub bikes_at_start:        u64,
    pub bikes_at_end:          u64,
    /// Stations whose `full_count` is non-zero.
    pub stations_ever_full:    usize,
    /// Stations whose `empty_count` is non-zero.
    pub stations_ever_empty:   usize,
    pub dropped_deposits:      u64,
    pub unmatched_withdrawals: u64,
    pub truck_bikes_moved:     u64,
}
