//! Resolved IANA zones and their January 1 boundaries.
//!
//! The rule data comes from `chrono-tz`; this module only projects instants into
//! a zone and finds the instant at which a local year begins.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::core::error::{Error, Result};

/// An IANA time-zone identifier that has been resolved against the rule database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneId(Tz);

impl ZoneId {
    /// Resolve a zone identifier such as `"Asia/Tokyo"`.
    ///
    /// Unknown identifiers fail with [`Error::InvalidZone`]; there is no fallback zone.
    pub fn parse(id: &str) -> Result<Self> {
        Tz::from_str(id.trim())
            .map(Self)
            .map_err(|_| Error::InvalidZone(id.to_string()))
    }

    pub fn utc() -> Self {
        Self(Tz::UTC)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Project an instant onto this zone's wall clock.
    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.0)
    }

    pub fn local_year(&self, instant: DateTime<Utc>) -> i32 {
        self.local(instant).year()
    }

    /// The instant at which `year` begins in this zone (local Jan 1, 00:00:00).
    ///
    /// When midnight is ambiguous the earlier instant wins. When midnight is skipped
    /// by a transition, it is read with the offset in force before the gap, which
    /// lands on the transition itself.
    pub fn new_year_instant(&self, year: i32) -> Result<DateTime<Utc>> {
        let midnight = NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| Error::UnresolvableLocalTime {
                zone: self.name().to_string(),
                year,
            })?;

        if let Some(local) = self.0.from_local_datetime(&midnight).earliest() {
            return Ok(local.with_timezone(&Utc));
        }
        let before_gap = self
            .0
            .offset_from_utc_datetime(&(midnight - TimeDelta::days(1)))
            .fix();
        let shifted = midnight - TimeDelta::seconds(i64::from(before_gap.local_minus_utc()));
        Ok(Utc.from_utc_datetime(&shifted))
    }
}

impl FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_zone() {
        let zone = ZoneId::parse("Asia/Tokyo").expect("known zone");
        assert_eq!(zone.name(), "Asia/Tokyo");
        assert_eq!(zone.to_string(), "Asia/Tokyo");
    }

    #[test]
    fn rejects_unknown_zone() {
        let err = ZoneId::parse("Atlantis/Capital").unwrap_err();
        assert_eq!(err, Error::InvalidZone("Atlantis/Capital".into()));
    }

    #[test]
    fn new_year_instant_uses_standard_offset() {
        let tokyo = ZoneId::parse("Asia/Tokyo").unwrap();
        let start = tokyo.new_year_instant(2026).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 31, 15, 0, 0).unwrap());

        let new_york = ZoneId::parse("America/New_York").unwrap();
        let start = new_york.new_year_instant(2026).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 1, 5, 0, 0).unwrap());
    }

    #[test]
    fn skipped_midnight_resolves_to_the_transition() {
        let casey = ZoneId::parse("Antarctica/Casey").unwrap();
        assert_eq!(
            casey.new_year_instant(1969).unwrap(),
            Utc.with_ymd_and_hms(1969, 1, 1, 0, 0, 0).unwrap()
        );

        // LMT (-0:16:08) to GMT: the local year starts at 00:16:08 GMT.
        let abidjan = ZoneId::parse("Africa/Abidjan").unwrap();
        let start = abidjan.new_year_instant(1912).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(1912, 1, 1, 0, 16, 8).unwrap());
        assert_eq!(abidjan.local(start).year(), 1912);
        assert_eq!(abidjan.local(start - TimeDelta::seconds(1)).year(), 1911);
    }

    #[test]
    fn local_year_follows_the_zone() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 11, 0, 0).unwrap();
        let kiritimati = ZoneId::parse("Pacific/Kiritimati").unwrap();
        assert_eq!(kiritimati.local_year(instant), 2026);
        assert_eq!(ZoneId::utc().local_year(instant), 2025);
    }

    #[test]
    fn serializes_as_identifier() {
        let zone = ZoneId::parse("Europe/London").unwrap();
        assert_eq!(serde_json::to_string(&zone).unwrap(), "\"Europe/London\"");
    }
}
