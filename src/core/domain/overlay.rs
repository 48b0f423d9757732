//! Map geometry for the midnight line and the band that has already celebrated.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::longitude::midnight_longitude;

/// The map only pans to the midnight line once it has drifted this far from the centre.
pub const RECENTER_THRESHOLD_DEGREES: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapOverlay {
    pub midnight_longitude: f64,
    /// Pole-to-pole polyline along the midnight meridian.
    pub midnight_line: [LatLon; 2],
    /// Everything from the midnight meridian east to the date line.
    pub celebrated_band: Bounds,
}

impl MapOverlay {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::from_longitude(midnight_longitude(instant))
    }

    pub fn from_longitude(longitude: f64) -> Self {
        Self {
            midnight_longitude: longitude,
            midnight_line: [
                LatLon { lat: -90.0, lon: longitude },
                LatLon { lat: 90.0, lon: longitude },
            ],
            celebrated_band: Bounds {
                south: -90.0,
                west: longitude,
                north: 90.0,
                east: 180.0,
            },
        }
    }
}

/// Shortest angular distance between two longitudes, in `[0, 180]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

pub fn should_recenter(center_longitude: f64, midnight_longitude: f64) -> bool {
    angular_distance(center_longitude, midnight_longitude) > RECENTER_THRESHOLD_DEGREES
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn overlay_tracks_the_midnight_meridian() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 6, 0, 0).unwrap();
        let overlay = MapOverlay::at(instant);
        assert_eq!(overlay.midnight_longitude, -90.0);
        assert_eq!(overlay.midnight_line[0], LatLon { lat: -90.0, lon: -90.0 });
        assert_eq!(overlay.midnight_line[1], LatLon { lat: 90.0, lon: -90.0 });
        assert_eq!(overlay.celebrated_band.west, -90.0);
        assert_eq!(overlay.celebrated_band.east, 180.0);
    }

    #[test]
    fn distance_wraps_across_the_date_line() {
        assert_eq!(angular_distance(170.0, -170.0), 20.0);
        assert_eq!(angular_distance(-10.0, 10.0), 20.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
    }

    #[test]
    fn recenters_only_past_threshold() {
        assert!(!should_recenter(170.0, -170.0));
        assert!(!should_recenter(0.0, 30.0));
        assert!(should_recenter(0.0, 30.5));
        assert!(should_recenter(20.0, -90.0));
    }
}
