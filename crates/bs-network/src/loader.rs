//! Station feed CSV loader.
//!
//! # CSV format
//!
//! One row per docking station, using the field names of the JCDecaux
//! station feed so an export of the live feed loads unchanged:
//!
//! ```csv
//! number,name,lat,lng,bike_stands,available_bike_stands,available_bikes,status
//! 42,SMITHFIELD NORTH,53.349562,-6.278198,30,18,12,OPEN
//! 33,PRINCES STREET / O'CONNELL STREET,53.349013,-6.260311,23,9,14,OPEN
//! ```
//!
//! Row order defines `StationId`s: the first row becomes `StationId(0)`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bs_core::{GeoPoint, Occupancy};

use crate::{NetworkError, NetworkResult};

/// One station as described by the feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationRecord {
    /// Operator's station number (stable across feed snapshots).
    pub number:                u32,
    pub name:                  String,
    pub lat:                   f32,
    pub lng:                   f32,
    pub bike_stands:           u32,
    pub available_bike_stands: u32,
    pub available_bikes:       u32,
    pub status:                String,
}

impl StationRecord {
    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Capacity and free docks as reported.  Free docks are clamped to the
    /// stand count; the feed excludes broken docks from both available
    /// counts, so `available_bikes` is not needed here.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            total_capacity: self.bike_stands,
            spaces_free:    self.available_bike_stands.min(self.bike_stands),
        }
    }
}

/// Load station records from a CSV file.
pub fn load_stations_csv(path: &Path) -> NetworkResult<Vec<StationRecord>> {
    let file = std::fs::File::open(path)?;
    load_stations_reader(file)
}

/// Like [`load_stations_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for feed snapshots held
/// in memory.
pub fn load_stations_reader<R: Read>(reader: R) -> NetworkResult<Vec<StationRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in csv_reader.deserialize::<StationRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        records.push(row);
    }
    Ok(records)
}
