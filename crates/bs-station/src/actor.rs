//! Who is moving bikes, and which saturation counter a failure lands in.

/// The party performing a capacity operation.
///
/// Saturation counters measure service failures a rider would see.  Trucks
/// move bikes for internal redistribution, so their operations never touch
/// the counters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Actor {
    Rider,
    Truck,
}

impl Actor {
    /// `true` if operations by this actor update saturation counters.
    #[inline]
    pub fn counts_saturation(self) -> bool {
        matches!(self, Actor::Rider)
    }
}

/// One of the two per-station saturation counters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Counter {
    /// A bike could not be docked (or the last free dock was taken).
    Full,
    /// A bike could not be taken (or the last bike left).
    Empty,
}
