use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`, but
/// neither range is enforced: clients may submit any finite pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a location from raw request values, degrading anything
    /// unparseable to zero.
    pub fn from_raw(latitude: Option<&str>, longitude: Option<&str>) -> Self {
        Self::new(parse_lenient(latitude), parse_lenient(longitude))
    }

    /// Great-circle distance in kilometers (haversine).
    pub fn distance_km(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_KM * c
    }
}

/// Lenient coordinate parse: missing, malformed or non-finite input yields `0.0`.
///
/// A bad `lat`/`lon` therefore lands on the equator/prime meridian instead of
/// rejecting the request.
pub fn parse_lenient(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Location::new(37.0, -120.0);
        assert!(p.distance_km(&p).abs() < 1e-9);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(1.0, 0.0);
        // 2 * pi * 6371 / 360
        assert!((a.distance_km(&b) - 111.194_926_6).abs() < 1e-3);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Location::new(37.0, -120.0);
        let b = Location::new(40.7, -74.0);
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient(Some("37.5")), 37.5);
        assert_eq!(parse_lenient(Some(" -120 ")), -120.0);
        assert_eq!(parse_lenient(Some("north")), 0.0);
        assert_eq!(parse_lenient(Some("")), 0.0);
        assert_eq!(parse_lenient(Some("NaN")), 0.0);
        assert_eq!(parse_lenient(Some("inf")), 0.0);
        assert_eq!(parse_lenient(None), 0.0);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&Location::new(37.0, -120.0)).unwrap();
        assert_eq!(json, r#"{"lat":37.0,"lon":-120.0}"#);
    }
}
