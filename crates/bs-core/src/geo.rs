//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f32` (single-precision) latitude/longitude.  At the
//! equator this gives ~1 m precision — more than enough to decide whether two
//! docking stations are within cycling range of each other.

/// A WGS-84 geographic coordinate stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f32 = 6_371_000.0;

/// Metres spanned by one degree of latitude.
pub const METRES_PER_DEGREE: f32 = 111_195.0;

impl GeoPoint {
    #[inline]
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Accuracy: ±0.5 % (f32 rounding); suitable for deciding station
    /// connectivity at city scale.
    pub fn distance_m(self, other: GeoPoint) -> f32 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Haversine distance in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f32 {
        self.distance_m(other) / 1_000.0
    }

    /// Half-widths `(lat_deg, lon_deg)` of a box that encloses every point
    /// within `radius_m` of `self`.
    pub fn degree_span(self, radius_m: f32) -> (f32, f32) {
        let lat_deg = radius_m / METRES_PER_DEGREE;
        // Guard the poles; cos → 0 would blow the longitude span up.
        let cos_lat = self.lat.to_radians().cos().max(1e-3);
        (lat_deg, lat_deg / cos_lat)
    }

    /// Arithmetic mean of a set of points.  Returns `None` for an empty slice.
    ///
    /// Adequate as the "centre" of a single city's station layout; not a true
    /// spherical centroid.
    pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (lat, lon) = points
            .iter()
            .fold((0.0f64, 0.0f64), |(la, lo), p| (la + p.lat as f64, lo + p.lon as f64));
        Some(GeoPoint::new((lat / n) as f32, (lon / n) as f32))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
