//! Initial capacity and occupancy of one station.

/// Docking capacity and free spaces a station starts a run with.
///
/// Graph sources that know the physical station (a live feed, a CSV export)
/// supply one of these per station; otherwise the simulator derives it from
/// the station's centrality with [`Occupancy::from_centrality`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    pub total_capacity: u32,
    pub spaces_free:    u32,
}

impl Occupancy {
    /// A station with `total_capacity` docks, half of them free.
    #[inline]
    pub fn half_free(total_capacity: u32) -> Self {
        Self { total_capacity, spaces_free: total_capacity / 2 }
    }

    /// Capacity coupled to network position:
    /// `round(centrality * 10) * 10` docks, half of them free.
    pub fn from_centrality(centrality: f64) -> Self {
        let tens = (centrality.clamp(0.0, 1.0) * 10.0).round() as u32;
        Self::half_free(tens * 10)
    }

    /// Bikes docked at the station.  Saturates at zero for inconsistent input.
    #[inline]
    pub fn bikes_present(self) -> u32 {
        self.total_capacity.saturating_sub(self.spaces_free)
    }

    /// `true` when `spaces_free <= total_capacity`.
    #[inline]
    pub fn is_consistent(self) -> bool {
        self.spaces_free <= self.total_capacity
    }
}
