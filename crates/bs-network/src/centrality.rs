//! In-degree centrality and the demand ranking derived from it.
//!
//! # Ranking
//!
//! The ranking is computed once per run and never recomputed as bikes move.
//! Entries are sorted by descending rank-key; equal keys are ordered by
//! descending `StationId`.
//!
//! ```text
//! position:   0        1        …  boundary  …   len-1
//! key:        high ──────────────────────────────▶ low
//!             └── central pool ──┘          └ peripheral pool ┘
//! ```

use std::cmp::Ordering;

use bs_core::{FallbackOrder, RankMode, StationId};

use crate::StationNetwork;

/// In-degree centrality of every station: `in_degree / (n - 1)`.
///
/// A network with one station gets centrality `1.0`; an empty network
/// yields an empty vector.
pub fn in_degree_centrality(network: &StationNetwork) -> Vec<f64> {
    let n = network.station_count();
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    network
        .in_degree
        .iter()
        .map(|&d| d as f64 * scale)
        .collect()
}

// ── RankEntry ─────────────────────────────────────────────────────────────────

/// One `(rank-key, station)` pair of a [`CentralityRanking`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RankEntry {
    pub key:     f64,
    pub station: StationId,
}

/// Descending by key, then descending by station.
fn rank_order(a: &RankEntry, b: &RankEntry) -> Ordering {
    b.key
        .total_cmp(&a.key)
        .then_with(|| b.station.cmp(&a.station))
}

// ── CentralityRanking ─────────────────────────────────────────────────────────

/// Stations ordered by rank-key, highest first.
#[derive(Clone, Debug)]
pub struct CentralityRanking {
    mode:    RankMode,
    entries: Vec<RankEntry>,
}

impl CentralityRanking {
    /// Rank stations by `mode.key(centrality[i])`.  `centrality` is indexed
    /// by `StationId`.
    pub fn new(centrality: &[f64], mode: RankMode) -> Self {
        let mut entries: Vec<RankEntry> = centrality
            .iter()
            .enumerate()
            .map(|(i, &c)| RankEntry { key: mode.key(c), station: StationId(i as u32) })
            .collect();
        entries.sort_by(rank_order);
        Self { mode, entries }
    }

    /// Compute in-degree centrality for `network` and rank it.
    pub fn from_network(network: &StationNetwork, mode: RankMode) -> Self {
        Self::new(&in_degree_centrality(network), mode)
    }

    pub fn mode(&self) -> RankMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    #[inline]
    pub fn key_at(&self, position: usize) -> f64 {
        self.entries[position].key
    }

    #[inline]
    pub fn station_at(&self, position: usize) -> StationId {
        self.entries[position].station
    }

    /// Ranking position separating the central pool `[0, boundary)` from the
    /// peripheral pool `(boundary, len)`.
    ///
    /// AM: `len / centre_ratio`.  PM mirrors it to `len - len / centre_ratio`
    /// so evening demand spreads across the larger outer set.  The caller is
    /// responsible for checking the result lies in `[1, len - 2]`.
    ///
    /// # Panics
    /// Panics if `centre_ratio == 0`.
    pub fn boundary(&self, centre_ratio: u32) -> usize {
        let central = self.entries.len() / centre_ratio as usize;
        match self.mode {
            RankMode::Am => central,
            RankMode::Pm => self.entries.len() - central,
        }
    }

    /// Station ids in scan order.
    pub fn ordered(&self, order: FallbackOrder) -> impl Iterator<Item = StationId> + '_ {
        let len = self.entries.len();
        (0..len).map(move |i| {
            let pos = match order {
                FallbackOrder::Ranking        => i,
                FallbackOrder::ReverseRanking => len - 1 - i,
            };
            self.entries[pos].station
        })
    }
}
