//! `StationStore` — the station array and its two capacity primitives.
//!
//! # Counter rule
//!
//! For rider operations only:
//!
//! | Operation           | Outcome                          | Counter          |
//! |---------------------|----------------------------------|------------------|
//! | `try_take_space`    | fails (too few free docks)       | `full_count += 1`  |
//! | `try_take_space`    | succeeds, leaves 0 free docks    | `full_count += 1`  |
//! | `try_release_space` | fails (too few bikes)            | `empty_count += 1` |
//! | `try_release_space` | succeeds, leaves 0 bikes         | `empty_count += 1` |
//!
//! A zero-bike request always succeeds and changes nothing.

use bs_core::{Occupancy, StationId};

use crate::{Actor, Counter, Station, StationError, StationResult};

/// A station whose saturation counter is non-zero.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaturatedStation {
    pub station:    StationId,
    pub centrality: f64,
    pub count:      u64,
}

/// All stations of a run, indexed by `StationId`.
#[derive(Clone, Debug, Default)]
pub struct StationStore {
    stations: Vec<Station>,
}

impl StationStore {
    /// Build a store from per-station occupancy and centrality.
    ///
    /// # Errors
    ///
    /// - [`StationError::LengthMismatch`] if the slices differ in length.
    /// - [`StationError::Inconsistent`] if any station has more free docks
    ///   than docks.
    pub fn new(occupancy: &[Occupancy], centrality: &[f64]) -> StationResult<Self> {
        if occupancy.len() != centrality.len() {
            return Err(StationError::LengthMismatch {
                expected: centrality.len(),
                got:      occupancy.len(),
                what:     "occupancy",
            });
        }
        let mut stations = Vec::with_capacity(occupancy.len());
        for (i, (&occ, &c)) in occupancy.iter().zip(centrality).enumerate() {
            if !occ.is_consistent() {
                return Err(StationError::Inconsistent {
                    station:        StationId(i as u32),
                    spaces_free:    occ.spaces_free,
                    total_capacity: occ.total_capacity,
                });
            }
            stations.push(Station::new(occ, c));
        }
        Ok(Self { stations })
    }

    /// Capacity derived from centrality for every station.
    pub fn from_centrality(centrality: &[f64]) -> Self {
        let stations = centrality
            .iter()
            .map(|&c| Station::new(Occupancy::from_centrality(c), c))
            .collect();
        Self { stations }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// # Panics
    /// Panics if `id` is out of range.
    #[inline]
    pub fn get(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn iter(&self) -> impl Iterator<Item = (StationId, &Station)> + '_ {
        self.stations
            .iter()
            .enumerate()
            .map(|(i, s)| (StationId(i as u32), s))
    }

    #[inline]
    pub fn spaces_free(&self, id: StationId) -> u32 {
        self.stations[id.index()].spaces_free
    }

    #[inline]
    pub fn bikes_present(&self, id: StationId) -> u32 {
        self.stations[id.index()].bikes_present()
    }

    // ── Capacity primitives ───────────────────────────────────────────────

    /// Dock `n` bikes at `id`.
    ///
    /// Succeeds iff `spaces_free >= n`, decrementing `spaces_free` by `n`.
    /// On failure the station is unchanged apart from the rider counter.
    pub fn try_take_space(&mut self, id: StationId, n: u32, actor: Actor) -> bool {
        if n == 0 {
            return true;
        }
        let s = &mut self.stations[id.index()];
        let ok = s.spaces_free >= n;
        if ok {
            s.spaces_free -= n;
        }
        if actor.counts_saturation() && (!ok || s.spaces_free == 0) {
            s.full_count += 1;
        }
        ok
    }

    /// Remove `n` bikes from `id`.
    ///
    /// Succeeds iff `bikes_present >= n`, incrementing `spaces_free` by `n`.
    /// On failure the station is unchanged apart from the rider counter.
    pub fn try_release_space(&mut self, id: StationId, n: u32, actor: Actor) -> bool {
        if n == 0 {
            return true;
        }
        let s = &mut self.stations[id.index()];
        let ok = s.bikes_present() >= n;
        if ok {
            s.spaces_free += n;
        }
        if actor.counts_saturation() && (!ok || s.bikes_present() == 0) {
            s.empty_count += 1;
        }
        ok
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    pub fn total_bikes(&self) -> u64 {
        self.stations.iter().map(|s| s.bikes_present() as u64).sum()
    }

    pub fn total_capacity(&self) -> u64 {
        self.stations.iter().map(|s| s.total_capacity as u64).sum()
    }

    pub fn total(&self, which: Counter) -> u64 {
        self.stations.iter().map(|s| s.counter(which)).sum()
    }

    /// Stations whose `which` counter is non-zero, ascending by id.
    pub fn saturated(&self, which: Counter) -> Vec<SaturatedStation> {
        self.iter()
            .filter(|(_, s)| s.counter(which) > 0)
            .map(|(station, s)| SaturatedStation {
                station,
                centrality: s.centrality,
                count:      s.counter(which),
            })
            .collect()
    }

    /// Zero every saturation counter, leaving occupancy as is.
    pub fn reset_counters(&mut self) {
        for s in &mut self.stations {
            s.full_count = 0;
            s.empty_count = 0;
        }
    }

    /// `true` when every station satisfies `spaces_free <= total_capacity`.
    pub fn is_consistent(&self) -> bool {
        self.stations.iter().all(|s| s.spaces_free <= s.total_capacity)
    }
}
