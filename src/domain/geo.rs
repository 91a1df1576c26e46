//! Distance helpers for the "near spot" search

/// Mean earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Search radius of GET /gathering/spot
pub const NEAR_SPOT_RADIUS_KM: f64 = 5.0;

/// Great-circle distance between two coordinates, in kilometers
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Latitude/longitude rectangle that contains every point within a radius.
///
/// Used as a cheap SQL pre-filter; the exact distance is checked afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn around(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        let d_lat = (radius_km / EARTH_RADIUS_KM).to_degrees();
        let cos_lat = latitude.to_radians().cos();
        let d_lon = if cos_lat.abs() < 1e-6 {
            180.0
        } else {
            (d_lat / cos_lat).abs()
        };

        let min_latitude = latitude - d_lat;
        let max_latitude = latitude + d_lat;

        // A circle touching a pole or crossing the antimeridian gets the whole longitude range
        let (min_longitude, max_longitude) = if d_lon >= 180.0
            || min_latitude <= -90.0
            || max_latitude >= 90.0
            || longitude - d_lon < -180.0
            || longitude + d_lon > 180.0
        {
            (-180.0, 180.0)
        } else {
            (longitude - d_lon, longitude + d_lon)
        };

        Self {
            min_latitude: min_latitude.max(-90.0),
            max_latitude: max_latitude.min(90.0),
            min_longitude,
            max_longitude,
        }
    }

    #[cfg(test)]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}
