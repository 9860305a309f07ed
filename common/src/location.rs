//! Location related module
//!
//! Coordinates, geocoded places and the coarse bounding boxes used for
//! provider service areas.
//!

use serde::{Deserialize, Serialize};

/// A WGS-84 coordinate pair.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }

    /// Textual stand-in when no reverse geocoded address is available.
    ///
    pub fn placeholder_address(&self) -> String {
        format!("Lat: {}, Lng: {}", self.lat, self.lon)
    }
}

/// A geocoded place, coordinate plus display address.
///
/// Transient by design: held in suggestion lists or as a trip endpoint,
/// discarded on the next query or on restart.
///
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Place {
    pub coord: Coordinate,
    pub address: String,
}

impl Place {
    pub fn new(lat: f64, lon: f64, address: &str) -> Self {
        Place {
            coord: Coordinate::new(lat, lon),
            address: address.to_owned(),
        }
    }
}

/// Axis-aligned bounding box in degrees.
///
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    /// Latitude - Y0
    pub min_lat: f64,
    /// Longitude - X0
    pub min_lon: f64,
    /// Latitude - Y1
    pub max_lat: f64,
    /// Longitude - X1
    pub max_lon: f64,
}

impl BoundingBox {
    /// Take a centre point and create a box extending `half_deg` degrees in
    /// every direction.
    ///
    /// So from (lat, lon) we generate the following bounding box:
    /// (lat - half_deg, lon - half_deg, lat + half_deg, lon + half_deg)
    ///
    #[tracing::instrument]
    pub fn around(center: Coordinate, half_deg: f64) -> Self {
        let (min_lat, max_lat) = (center.lat - half_deg, center.lat + half_deg);
        let (min_lon, max_lon) = (center.lon - half_deg, center.lon + half_deg);

        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Strict containment check, mirrors the `|Δlat| < d && |Δlon| < d` test.
    ///
    #[inline]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat > self.min_lat
            && point.lat < self.max_lat
            && point.lon > self.min_lon
            && point.lon < self.max_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const BLR: Coordinate = Coordinate {
        lat: 12.9716,
        lon: 77.5946,
    };

    #[test]
    fn test_bb_around_blr() {
        let bb = BoundingBox::around(BLR, 0.5);
        assert_eq!(12.4716, bb.min_lat);
        assert_eq!(77.0946, bb.min_lon);
        assert_eq!(13.4716, bb.max_lat);
        assert_eq!(78.0946, bb.max_lon);
    }

    #[rstest]
    #[case(12.9716, 77.5946, true)]
    #[case(13.0, 77.6, true)]
    #[case(28.6, 77.2, false)]
    #[case(12.4716, 77.5946, false)]
    fn test_bb_contains(#[case] lat: f64, #[case] lon: f64, #[case] inside: bool) {
        let bb = BoundingBox::around(BLR, 0.5);
        assert_eq!(inside, bb.contains(Coordinate::new(lat, lon)));
    }

    #[test]
    fn test_placeholder_address() {
        let c = Coordinate::new(12.9716, 77.5946);
        assert_eq!("Lat: 12.9716, Lng: 77.5946", c.placeholder_address());
    }
}
