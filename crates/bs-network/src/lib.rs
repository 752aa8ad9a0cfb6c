//! `bs-network` — the station graph model.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`network`]    | `StationNetwork` (CSR + R-tree), `StationNetworkBuilder`       |
//! | [`centrality`] | in-degree centrality, `CentralityRanking`, `RankEntry`         |
//! | [`generate`]   | synthetic (Erdős–Rényi) and geographic graph construction      |
//! | [`loader`]     | `StationRecord` CSV loader (station feed export format)        |
//! | [`directory`]  | `StationDirectory` — reporting-only names, numbers, positions  |
//! | [`error`]      | `NetworkError`, `NetworkResult<T>`                             |
//!
//! # Edge semantics
//!
//! An edge `u → v` means "a bike deposited at `u` may have come from `v`":
//! the simulator withdraws the matching bike from one of `u`'s out-neighbours.
//! Neighbour enumeration order is fixed at build time (insertion order per
//! source station) so fallback scans are reproducible.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `fx-hash` | `StationDirectory` uses `rustc-hash` maps.                  |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `bs-core` types.       |

pub mod centrality;
pub mod directory;
pub mod error;
pub mod generate;
pub mod loader;
pub mod network;


pub use centrality::{CentralityRanking, RankEntry, in_degree_centrality};
pub use directory::{StationDirectory, StationInfo};
pub use error::{NetworkError, NetworkResult};
pub use generate::{
    CYCLING_SPEED_KMH, DEFAULT_MAX_RADIUS_KM, GeoGraph, centre_distances, erdos_renyi,
    geographic, geographic_from_records,
};
pub use loader::{StationRecord, load_stations_csv, load_stations_reader};
pub use network::{StationNetwork, StationNetworkBuilder};
