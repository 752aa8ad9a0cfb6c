//! Graph construction: synthetic random graphs and geographic station graphs.
//!
//! # Geographic edge predicate
//!
//! ```text
//! u → v  ⇔  centre_dist(u) > centre_dist(v)  ∧  dist(u, v) ≤ max_radius
//! ```
//!
//! where `centre_dist` is the haversine distance to the mean position of all
//! stations.  The strict inequality makes the relation asymmetric: no
//! self-loops, and equidistant stations are never connected.  The radius
//! (default 5 km, half an hour at cycling speed) keeps journeys within the
//! free-ride window.

use bs_core::{GeoPoint, Occupancy, SimRng, StationId};

use crate::network::{build_index, query_within};
use crate::{NetworkResult, StationDirectory, StationNetwork, StationNetworkBuilder, StationRecord};

/// Default connectivity radius.
pub const DEFAULT_MAX_RADIUS_KM: f32 = 5.0;

/// Average cycling speed used to estimate edge travel time.
pub const CYCLING_SPEED_KMH: f32 = 10.0;

/// Directed Erdős–Rényi graph: every ordered pair `(u, v)` with `u != v`
/// gets an edge with probability `edge_prob`.
///
/// Pairs are visited in row-major order, so neighbour enumeration order is
/// ascending `StationId` and the graph is a pure function of the RNG state.
pub fn erdos_renyi(station_count: usize, edge_prob: f64, rng: &mut SimRng) -> StationNetwork {
    let expected = (station_count * station_count.saturating_sub(1)) as f64 * edge_prob;
    let mut b = StationNetworkBuilder::with_capacity(station_count, expected.max(0.0) as usize);
    for _ in 0..station_count {
        b.add_station();
    }
    for u in 0..station_count {
        for v in 0..station_count {
            if u != v && rng.gen_bool(edge_prob) {
                b.add_edge(StationId(u as u32), StationId(v as u32));
            }
        }
    }
    let net = b.build();
    tracing::debug!(
        stations = net.station_count(),
        edges = net.edge_count(),
        edge_prob,
        "built synthetic station graph"
    );
    net
}

/// Haversine distance (km) from each position to the mean of all positions.
pub fn centre_distances(positions: &[GeoPoint]) -> Vec<f32> {
    let Some(centre) = GeoPoint::centroid(positions) else {
        return Vec::new();
    };
    positions.iter().map(|p| p.distance_km(centre)).collect()
}

/// Build the directed proximity graph over stations at `positions`.
///
/// `StationId(i)` is located at `positions[i]`.  Each station's neighbours
/// are listed in ascending `StationId` order.
pub fn geographic(positions: &[GeoPoint], max_radius_km: f32) -> StationNetwork {
    let centre_dist = centre_distances(positions);
    let radius_m = max_radius_km * 1_000.0;
    let ms_per_metre = 3_600.0 / CYCLING_SPEED_KMH;

    let located: Vec<Option<GeoPoint>> = positions.iter().copied().map(Some).collect();
    let index = build_index(&located);

    let mut b = StationNetworkBuilder::with_capacity(positions.len(), positions.len() * 4);
    for &pos in positions {
        b.add_station_at(pos);
    }
    for (u, &from) in positions.iter().enumerate() {
        for v in query_within(&index, from, radius_m) {
            if centre_dist[u] > centre_dist[v.index()] {
                let length_m = from.distance_m(positions[v.index()]);
                let travel_ms = (length_m * ms_per_metre).round() as u32;
                b.add_edge_with(StationId(u as u32), v, length_m, travel_ms);
            }
        }
    }
    let net = b.build();
    tracing::debug!(
        stations = net.station_count(),
        edges = net.edge_count(),
        max_radius_km,
        "built geographic station graph"
    );
    net
}

/// A geographic network together with the feed data it was built from.
pub struct GeoGraph {
    pub network:   StationNetwork,
    pub directory: StationDirectory,
    /// Per-station capacity and free docks reported by the feed.
    pub occupancy: Vec<Option<Occupancy>>,
}

/// Build a [`GeoGraph`] from station feed records.
///
/// # Errors
///
/// Propagates [`StationDirectory::from_records`] errors (duplicate numbers).
pub fn geographic_from_records(
    records:       &[StationRecord],
    max_radius_km: f32,
) -> NetworkResult<GeoGraph> {
    let directory = StationDirectory::from_records(records)?;
    let positions: Vec<GeoPoint> = records.iter().map(StationRecord::position).collect();
    let network = geographic(&positions, max_radius_km);
    let occupancy = records.iter().map(|r| Some(r.occupancy())).collect();
    Ok(GeoGraph { network, directory, occupancy })
}
