//! `bs-core` — foundational types for the bike-share occupancy simulator.
//!
//! This crate is a dependency of every other `bs-*` crate.  It intentionally
//! has no `bs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `StationId`, `EdgeId`                                      |
//! | [`geo`]         | `GeoPoint`, haversine distance, centroid                   |
//! | [`step`]        | `Step` counter                                             |
//! | [`config`]      | `SimConfig`, `TruckConfig`, `RankMode`, `FallbackOrder`    |
//! | [`occupancy`]   | `Occupancy` — initial capacity / free-space pair           |
//! | [`rng`]         | `SimRng` (seeded, single-threaded)                         |
//! | [`error`]       | `BsError`, `BsResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod occupancy;
pub mod rng;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DemandInterval, FallbackOrder, RankMode, SimConfig, TruckConfig};
pub use error::{BsError, BsResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, StationId};
pub use occupancy::Occupancy;
pub use rng::SimRng;
pub use step::Step;
