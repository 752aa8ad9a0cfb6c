//! Station graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `StationId s`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ station_out_start[s] .. station_out_start[s+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`, `edge_travel_ms`)
//! are sorted by source station and indexed by `EdgeId`.  The sort is stable,
//! so the out-neighbours of a station keep the order in which their edges
//! were added — this is the neighbour enumeration order the demand step
//! relies on.
//!
//! # Spatial index
//!
//! Stations that have a position are bulk-loaded into an R-tree (via
//! `rstar`) keyed by `[lat, lon]`, used for nearest-station and
//! within-radius queries.  Synthetic graphs have no positions and an empty
//! index.

use std::collections::HashSet;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use bs_core::{EdgeId, GeoPoint, StationId};

// ── R-tree station entry ──────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `StationId`.
#[derive(Clone)]
pub(crate) struct StationEntry {
    pub(crate) point: [f32; 2], // [lat, lon]
    pub(crate) id:    StationId,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    /// Squared Euclidean distance in lat/lon space.  Only used for ordering
    /// nearest-neighbour candidates; exact distances go through haversine.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

/// Bulk-load an R-tree over every positioned station.
pub(crate) fn build_index(positions: &[Option<GeoPoint>]) -> RTree<StationEntry> {
    let entries: Vec<StationEntry> = positions
        .iter()
        .enumerate()
        .filter_map(|(i, pos)| {
            pos.map(|p| StationEntry { point: [p.lat, p.lon], id: StationId(i as u32) })
        })
        .collect();
    RTree::bulk_load(entries)
}

/// Stations whose haversine distance from `center` is at most `radius_m`,
/// in ascending `StationId` order.
pub(crate) fn query_within(
    index:  &RTree<StationEntry>,
    center: GeoPoint,
    radius_m: f32,
) -> Vec<StationId> {
    // Longitude degrees are the wider span away from the equator, so a circle
    // of that radius in degree space encloses the true search circle.
    let (dlat, dlon) = center.degree_span(radius_m);
    let span = dlat.max(dlon);
    let mut hits: Vec<StationId> = index
        .locate_within_distance([center.lat, center.lon], span * span)
        .filter(|e| center.distance_m(GeoPoint::new(e.point[0], e.point[1])) <= radius_m)
        .map(|e| e.id)
        .collect();
    hits.sort_unstable();
    hits
}

// ── StationNetwork ────────────────────────────────────────────────────────────

/// Directed station graph in CSR format plus a spatial index.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`StationNetworkBuilder`] or one of the
/// generators in [`crate::generate`].
#[derive(Clone)]
pub struct StationNetwork {
    // ── Station data ──────────────────────────────────────────────────────
    /// Geographic position of each station, if known.  Indexed by `StationId`.
    pub station_pos: Vec<Option<GeoPoint>>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of station `s` are at EdgeIds
    /// `station_out_start[s] .. station_out_start[s+1]`.
    /// Length = `station_count + 1`.
    pub station_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    pub edge_from: Vec<StationId>,

    pub edge_to: Vec<StationId>,

    /// Straight-line length of each edge in metres (reporting only).
    pub edge_length_m: Vec<f32>,

    /// Estimated cycling time in milliseconds (reporting only).
    pub edge_travel_ms: Vec<u32>,

    /// Number of incoming edges per station.
    pub in_degree: Vec<u32>,

    spatial_idx: RTree<StationEntry>,
}

impl StationNetwork {
    /// Construct an empty network with no stations or edges.
    pub fn empty() -> Self {
        StationNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.station_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.station_pos.is_empty()
    }

    /// All station ids in ascending order.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.station_count()).map(|i| StationId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `station`.
    #[inline]
    pub fn out_edges(&self, station: StationId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.station_out_start[station.index()] as usize;
        let end   = self.station_out_start[station.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-neighbours of `station` in enumeration order.
    #[inline]
    pub fn neighbors(&self, station: StationId) -> &[StationId] {
        let start = self.station_out_start[station.index()] as usize;
        let end   = self.station_out_start[station.index() + 1] as usize;
        &self.edge_to[start..end]
    }

    #[inline]
    pub fn out_degree(&self, station: StationId) -> usize {
        self.neighbors(station).len()
    }

    #[inline]
    pub fn in_degree(&self, station: StationId) -> usize {
        self.in_degree[station.index()] as usize
    }

    /// `true` if the directed edge `from → to` exists.
    pub fn has_edge(&self, from: StationId, to: StationId) -> bool {
        self.neighbors(from).contains(&to)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    pub fn position(&self, station: StationId) -> Option<GeoPoint> {
        self.station_pos.get(station.index()).copied().flatten()
    }

    /// The positioned station closest to `pos`, or `None` if no station has
    /// a position.
    pub fn nearest_station(&self, pos: GeoPoint) -> Option<StationId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Positioned stations within `radius_m` of `pos`, ascending by id.
    pub fn stations_within(&self, pos: GeoPoint, radius_m: f32) -> Vec<StationId> {
        query_within(&self.spatial_idx, pos, radius_m)
    }
}

// ── StationNetworkBuilder ─────────────────────────────────────────────────────

/// Construct a [`StationNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use bs_core::GeoPoint;
/// use bs_network::StationNetworkBuilder;
///
/// let mut b = StationNetworkBuilder::new();
/// let a = b.add_station_at(GeoPoint::new(53.349, -6.260));
/// let c = b.add_station_at(GeoPoint::new(53.343, -6.267));
/// b.add_edge(a, c);
/// let net = b.build();
/// assert_eq!(net.station_count(), 2);
/// assert_eq!(net.neighbors(a), &[c]);
/// assert_eq!(net.in_degree(c), 1);
/// ```
pub struct StationNetworkBuilder {
    stations:  Vec<Option<GeoPoint>>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:      StationId,
    to:        StationId,
    length_m:  f32,
    travel_ms: u32,
}

impl StationNetworkBuilder {
    pub fn new() -> Self {
        Self { stations: Vec::new(), raw_edges: Vec::new() }
    }

    pub fn with_capacity(stations: usize, edges: usize) -> Self {
        Self {
            stations:  Vec::with_capacity(stations),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a station with no geographic position (synthetic graphs).
    pub fn add_station(&mut self) -> StationId {
        let id = StationId(self.stations.len() as u32);
        self.stations.push(None);
        id
    }

    /// Add a station located at `pos`.
    pub fn add_station_at(&mut self, pos: GeoPoint) -> StationId {
        let id = StationId(self.stations.len() as u32);
        self.stations.push(Some(pos));
        id
    }

    /// Add a directed edge with no distance metadata.
    ///
    /// Self-loops are ignored: a station is never its own neighbour.
    pub fn add_edge(&mut self, from: StationId, to: StationId) {
        self.add_edge_with(from, to, 0.0, 0);
    }

    /// Add a directed edge carrying reporting metadata.
    ///
    /// A repeated `from → to` pair is dropped at [`build`](Self::build); the
    /// first one added wins.
    pub fn add_edge_with(&mut self, from: StationId, to: StationId, length_m: f32, travel_ms: u32) {
        if from == to {
            return;
        }
        debug_assert!(from.index() < self.stations.len() && to.index() < self.stations.len());
        self.raw_edges.push(RawEdge { from, to, length_m, travel_ms });
    }

    pub fn station_count(&self) -> usize { self.stations.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`StationNetwork`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(N log N) for the
    /// R-tree bulk load.
    pub fn build(self) -> StationNetwork {
        let station_count = self.stations.len();

        // Each ordered pair counts once toward in-degree.
        let mut seen = HashSet::with_capacity(self.raw_edges.len());
        let mut raw = self.raw_edges;
        raw.retain(|e| seen.insert((e.from, e.to)));
        let edge_count = raw.len();

        // Stable: preserves insertion order among edges of the same source.
        raw.sort_by_key(|e| e.from.0);

        let edge_from:      Vec<StationId> = raw.iter().map(|e| e.from).collect();
        let edge_to:        Vec<StationId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m:  Vec<f32>       = raw.iter().map(|e| e.length_m).collect();
        let edge_travel_ms: Vec<u32>       = raw.iter().map(|e| e.travel_ms).collect();

        let mut station_out_start = vec![0u32; station_count + 1];
        let mut in_degree = vec![0u32; station_count];
        for e in &raw {
            station_out_start[e.from.index() + 1] += 1;
            in_degree[e.to.index()] += 1;
        }
        for i in 1..=station_count {
            station_out_start[i] += station_out_start[i - 1];
        }
        debug_assert_eq!(station_out_start[station_count] as usize, edge_count);

        let spatial_idx = build_index(&self.stations);

        StationNetwork {
            station_pos: self.stations,
            station_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_travel_ms,
            in_degree,
            spatial_idx,
        }
    }
}

impl Default for StationNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
