//! Immutable run configuration.
//!
//! Every tunable the simulation reads lives in [`SimConfig`].  The driver
//! takes it by value at construction, so nothing about a run can change
//! halfway through it.

use crate::{BsError, BsResult, Step};

// ── RankMode ──────────────────────────────────────────────────────────────────

/// How centrality is turned into a demand ranking.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RankMode {
    /// Morning: rank by raw in-degree centrality, so a small set of central
    /// stations absorbs most arriving bikes.
    Am,
    /// Evening: rank by `1 - centrality`, spreading arrivals over the many
    /// outer stations.
    #[default]
    Pm,
}

impl RankMode {
    /// Rank key for a station with the given centrality.
    #[inline]
    pub fn key(self, centrality: f64) -> f64 {
        match self {
            RankMode::Am => centrality,
            RankMode::Pm => 1.0 - centrality,
        }
    }
}

// ── FallbackOrder ─────────────────────────────────────────────────────────────

/// Order in which a rider scans the ranking when the chosen station is full.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackOrder {
    /// Highest rank-key first.
    #[default]
    Ranking,
    /// Lowest rank-key first.
    ReverseRanking,
}

// ── DemandInterval ────────────────────────────────────────────────────────────

/// Interval the per-rider threshold `r` is drawn from.
///
/// Compared against the rank-key at the boundary index: the wider the part of
/// the interval below that key, the more often riders head for the central
/// pool.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandInterval {
    pub low:  f64,
    pub high: f64,
}

impl Default for DemandInterval {
    fn default() -> Self {
        Self { low: 0.1, high: 0.99 }
    }
}

// ── TruckConfig ───────────────────────────────────────────────────────────────

/// Rebalancing parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TruckConfig {
    /// Truck runs per pass.  `0` disables rebalancing.
    pub runs: u32,

    /// Share of the source station's capacity moved per run, in percent.
    pub transfer_pct: u32,

    /// A station is a pickup candidate when
    /// `spaces_free <= total_capacity * low_space_fraction`.
    pub low_space_fraction: f64,
}

impl Default for TruckConfig {
    fn default() -> Self {
        Self { runs: 2, transfer_pct: 10, low_space_fraction: 0.1 }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate (enable the
/// `serde` feature) and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total steps to simulate.
    pub steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Riders processed, one after another, in every Demand Flow step.
    pub riders_per_step: u32,

    /// Bike units each rider moves.
    pub bikes_per_rider: u32,

    /// Boundary divisor: the central pool is the first
    /// `ranking_len / centre_ratio` ranking positions (mirrored in PM mode).
    pub centre_ratio: u32,

    pub rank_mode: RankMode,

    pub demand_interval: DemandInterval,

    pub fallback_order: FallbackOrder,

    pub truck: TruckConfig,

    /// Emit a full station snapshot every N steps.  `0` disables snapshots.
    pub snapshot_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            steps:             20,
            seed:              42,
            riders_per_step:   20,
            bikes_per_rider:   1,
            centre_ratio:      3,
            rank_mode:         RankMode::Pm,
            demand_interval:   DemandInterval::default(),
            fallback_order:    FallbackOrder::Ranking,
            truck:             TruckConfig::default(),
            snapshot_interval: 1,
        }
    }
}

impl SimConfig {
    /// The step at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_step(&self) -> Step {
        Step(self.steps)
    }

    /// Reject parameter combinations the simulation cannot run with.
    pub fn validate(&self) -> BsResult<()> {
        if self.centre_ratio == 0 {
            return Err(BsError::Config("centre_ratio must be at least 1".into()));
        }
        if self.bikes_per_rider == 0 {
            return Err(BsError::Config("bikes_per_rider must be at least 1".into()));
        }
        let DemandInterval { low, high } = self.demand_interval;
        if !(low > 0.0 && low <= high && high <= 1.0) {
            return Err(BsError::Config(format!(
                "demand_interval [{low}, {high}] must be a non-empty sub-interval of (0, 1]"
            )));
        }
        if self.truck.transfer_pct > 100 {
            return Err(BsError::Config(format!(
                "truck.transfer_pct {} exceeds 100",
                self.truck.transfer_pct
            )));
        }
        if !(0.0..=1.0).contains(&self.truck.low_space_fraction) {
            return Err(BsError::Config(format!(
                "truck.low_space_fraction {} outside [0, 1]",
                self.truck.low_space_fraction
            )));
        }
        Ok(())
    }
}
