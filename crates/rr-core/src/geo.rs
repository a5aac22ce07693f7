//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Edge weights are summed over
//! whole routes and compared against tariff thresholds, so the extra precision
//! over `f32` keeps long routes stable to well under a metre.

/// Mean Earth radius in metres used by every distance computation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Half-widths `(d_lat, d_lng)` in degrees of a box that contains every
    /// point within `radius_m` of `self`.
    ///
    /// The longitude span is computed at the highest latitude the box can
    /// reach, so it never under-covers.  Near the poles it saturates at 180°.
    pub fn bbox_half_extent_deg(self, radius_m: f64) -> (f64, f64) {
        let d_lat = (radius_m / EARTH_RADIUS_M).to_degrees();
        let widest_lat = (self.lat.abs() + d_lat).min(90.0).to_radians();
        let cos = widest_lat.cos();
        let d_lng = if cos <= f64::EPSILON {
            180.0
        } else {
            (radius_m / (EARTH_RADIUS_M * cos)).to_degrees().min(180.0)
        };
        (d_lat, d_lng)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
