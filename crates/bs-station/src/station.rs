//! Per-station state.

use bs_core::Occupancy;

use crate::Counter;

/// State of one docking station.
///
/// Occupancy is stored as free docks; `bikes_present` is derived.  Fields
/// are read through accessors and written only by
/// [`StationStore`][crate::StationStore] primitives, which keep
/// `spaces_free <= total_capacity` at all times.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub(crate) total_capacity: u32,
    pub(crate) spaces_free:    u32,
    pub(crate) full_count:     u64,
    pub(crate) empty_count:    u64,
    pub(crate) centrality:     f64,
}

impl Station {
    /// A station with zeroed counters.
    ///
    /// `occupancy` must satisfy `spaces_free <= total_capacity`; the store
    /// constructor checks this.
    pub fn new(occupancy: Occupancy, centrality: f64) -> Self {
        Self {
            total_capacity: occupancy.total_capacity,
            spaces_free:    occupancy.spaces_free,
            full_count:     0,
            empty_count:    0,
            centrality,
        }
    }

    #[inline]
    pub fn total_capacity(&self) -> u32 {
        self.total_capacity
    }

    #[inline]
    pub fn spaces_free(&self) -> u32 {
        self.spaces_free
    }

    #[inline]
    pub fn bikes_present(&self) -> u32 {
        self.total_capacity - self.spaces_free
    }

    #[inline]
    pub fn full_count(&self) -> u64 {
        self.full_count
    }

    #[inline]
    pub fn empty_count(&self) -> u64 {
        self.empty_count
    }

    /// In-degree centrality in `[0, 1]`.
    #[inline]
    pub fn centrality(&self) -> f64 {
        self.centrality
    }

    #[inline]
    pub fn counter(&self, which: Counter) -> u64 {
        match which {
            Counter::Full  => self.full_count,
            Counter::Empty => self.empty_count,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.spaces_free == 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bikes_present() == 0
    }

    /// Current capacity and free docks.
    #[inline]
    pub fn occupancy(&self) -> Occupancy {
        Occupancy { total_capacity: self.total_capacity, spaces_free: self.spaces_free }
    }
}
