//! Reporting-only station metadata.
//!
//! Names, operator numbers, status strings and positions never influence the
//! simulation.  They live here, keyed by `StationId`, so the station store
//! only carries the fields the algorithms read.

use bs_core::{GeoPoint, StationId};

use crate::{NetworkError, NetworkResult, StationRecord};

#[cfg(feature = "fx-hash")]
type NumberMap = rustc_hash::FxHashMap<u32, StationId>;
#[cfg(not(feature = "fx-hash"))]
type NumberMap = std::collections::HashMap<u32, StationId>;

/// Descriptive fields of one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationInfo {
    pub number:   u32,
    pub name:     String,
    pub status:   String,
    pub position: Option<GeoPoint>,
}

/// `StationId`-indexed lookup of [`StationInfo`] plus a reverse index from
/// operator station number.
#[derive(Debug, Default)]
pub struct StationDirectory {
    infos:     Vec<StationInfo>,
    by_number: NumberMap,
}

impl StationDirectory {
    /// Build from feed records; record `i` describes `StationId(i)`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::DuplicateStation`] if two records share a number.
    pub fn from_records(records: &[StationRecord]) -> NetworkResult<Self> {
        let mut dir = Self {
            infos:     Vec::with_capacity(records.len()),
            by_number: NumberMap::default(),
        };
        for (i, r) in records.iter().enumerate() {
            if dir.by_number.insert(r.number, StationId(i as u32)).is_some() {
                return Err(NetworkError::DuplicateStation(r.number));
            }
            dir.infos.push(StationInfo {
                number:   r.number,
                name:     r.name.clone(),
                status:   r.status.clone(),
                position: Some(r.position()),
            });
        }
        Ok(dir)
    }

    /// Placeholder entries for a synthetic network: station `i` is numbered
    /// `i` and named `"Station i"`.
    pub fn synthetic(station_count: usize) -> Self {
        let mut dir = Self::default();
        for i in 0..station_count {
            let id = StationId(i as u32);
            dir.by_number.insert(i as u32, id);
            dir.infos.push(StationInfo {
                number:   i as u32,
                name:     format!("Station {i}"),
                status:   "SYNTHETIC".to_owned(),
                position: None,
            });
        }
        dir
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn get(&self, id: StationId) -> Option<&StationInfo> {
        self.infos.get(id.index())
    }

    /// Station name, or `"?"` for an unknown id.
    pub fn name(&self, id: StationId) -> &str {
        self.get(id).map_or("?", |info| info.name.as_str())
    }

    /// Resolve an operator station number to its `StationId`.
    pub fn lookup_number(&self, number: u32) -> Option<StationId> {
        self.by_number.get(&number).copied()
    }
}
