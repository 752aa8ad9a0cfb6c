//! Plain data row types written by output backends.

use bs_sim::Phase;

/// One station's state at the end of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationSnapshotRow {
    pub station_id:     u32,
    pub step:           u64,
    pub phase:          Phase,
    pub total_capacity: u32,
    pub spaces_free:    u32,
    pub full_count:     u64,
    pub empty_count:    u64,
}

/// Summary statistics for one simulation step.
///
/// Totals are taken after the truck pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummaryRow {
    pub step:              u64,
    pub riders:            u32,
    pub dropped:           u32,
    pub unmatched:         u32,
    pub truck_bikes_moved: u32,
    pub total_full:        u64,
    pub total_empty:       u64,
    pub total_bikes:       u64,
}
