//! `bs-station` — per-station mutable state and the primitives that change it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`station`] | `Station` — capacity, free docks, saturation counters           |
//! | [`actor`]   | `Actor` (rider / truck), `Counter` (full / empty)               |
//! | [`store`]   | `StationStore` — `try_take_space` / `try_release_space`         |
//! | [`scan`]    | ordered scans shared by demand and rebalancing                  |
//! | [`error`]   | `StationError`, `StationResult<T>`                              |
//!
//! # Mutation model
//!
//! `try_take_space` (a bike docks) and `try_release_space` (a bike leaves)
//! are the only operations that change a station's occupancy or counters.
//! Both are check-and-mutate: they either apply the whole change or leave
//! the station untouched and return `false`.  Everything else — rider
//! fallback searches, truck pickups and drop-offs — is built from them.

pub mod actor;
pub mod error;
pub mod scan;
pub mod station;
pub mod store;

#[cfg(test)]
mod tests;

pub use actor::{Actor, Counter};
pub use error::{StationError, StationResult};
pub use scan::{ScanOutcome, deposit_along, release_at_first, take_at_first};
pub use station::Station;
pub use store::{SaturatedStation, StationStore};
