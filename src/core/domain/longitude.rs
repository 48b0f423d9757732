//! Where on Earth is it midnight right now?
//!
//! The Earth turns 15 degrees per hour. Noon sits on the meridian where the sun
//! is overhead and midnight is 180 degrees away from it, so the midnight meridian
//! depends only on the UTC time of day.

use chrono::{DateTime, Timelike, Utc};

pub const DEGREES_PER_HOUR: f64 = 15.0;

/// UTC hour of day as `hour + minute/60 + second/3600`, in `[0, 24)`.
///
/// Sub-second precision is dropped so that every instant within the same
/// second maps to the same value.
pub fn fractional_utc_hour(instant: DateTime<Utc>) -> f64 {
    f64::from(instant.hour()) + f64::from(instant.minute()) / 60.0 + f64::from(instant.second()) / 3600.0
}

/// Longitude currently at local clock time 00:00, normalized to `(-180, 180]`.
///
/// UTC 00:00 maps to 0, UTC 06:00 to -90, UTC 12:00 to +180 and UTC 18:00 to +90.
/// The only discontinuity is at UTC 12:00, where the value jumps from just above
/// -180 to +180.
pub fn midnight_longitude(instant: DateTime<Utc>) -> f64 {
    let hours = fractional_utc_hour(instant);
    normalize_longitude((12.0 - hours) * DEGREES_PER_HOUR - 180.0)
}

/// Wrap any finite longitude into `(-180, 180]`. `-180` is reported as `+180`.
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { 180.0 } else { wrapped }
}
