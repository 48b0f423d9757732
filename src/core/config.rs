//! The zone catalog shared by every view.

use chrono::TimeDelta;
use serde::Serialize;

use crate::core::{
    domain::ZoneId,
    error::{Error, Result},
};

pub const DEFAULT_CELEBRATION_WINDOW_MINUTES: i64 = 90;
pub const DEFAULT_SCHEDULE_WINDOW_HOURS: i64 = 24;

/// Built-in catalog, east to west.
const BUILTIN_ZONES: &[(&str, &str)] = &[
    ("Kiritimati", "Pacific/Kiritimati"),
    ("Tongatapu", "Pacific/Tongatapu"),
    ("Auckland", "Pacific/Auckland"),
    ("Noumea", "Pacific/Noumea"),
    ("Sydney", "Australia/Sydney"),
    ("Tokyo", "Asia/Tokyo"),
    ("Shanghai", "Asia/Shanghai"),
    ("Bangkok", "Asia/Bangkok"),
    ("Dhaka", "Asia/Dhaka"),
    ("Kolkata", "Asia/Kolkata"),
    ("Karachi", "Asia/Karachi"),
    ("Dubai", "Asia/Dubai"),
    ("Moscow", "Europe/Moscow"),
    ("Cairo", "Africa/Cairo"),
    ("Paris", "Europe/Paris"),
    ("London", "Europe/London"),
    ("Azores", "Atlantic/Azores"),
    ("South Georgia", "Atlantic/South_Georgia"),
    ("Buenos Aires", "America/Argentina/Buenos_Aires"),
    ("Santiago", "America/Santiago"),
    ("New York", "America/New_York"),
    ("Chicago", "America/Chicago"),
    ("Denver", "America/Denver"),
    ("Los Angeles", "America/Los_Angeles"),
    ("Anchorage", "America/Anchorage"),
    ("Honolulu", "Pacific/Honolulu"),
    ("Pago Pago", "Pacific/Pago_Pago"),
    ("Baker Island", "Etc/GMT+12"),
];

const BUILTIN_FEATURED: &[&str] = &[
    "Australia/Sydney",
    "Asia/Tokyo",
    "Asia/Kolkata",
    "Europe/London",
    "America/New_York",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneEntry {
    pub label: String,
    pub zone: ZoneId,
}

impl ZoneEntry {
    pub fn new(label: impl Into<String>, zone: &str) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(Error::Config(format!("zone '{zone}' must have a non-empty label")));
        }
        Ok(Self {
            label,
            zone: ZoneId::parse(zone)?,
        })
    }
}

/// Runtime catalog after parsing and validation.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    pub entries: Vec<ZoneEntry>,
    pub featured: Vec<ZoneId>,
    pub celebration_window: TimeDelta,
    pub schedule_window: TimeDelta,
}

impl ZoneCatalog {
    pub fn new(
        entries: Vec<ZoneEntry>,
        featured: Vec<ZoneId>,
        celebration_window: TimeDelta,
        schedule_window: TimeDelta,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Config("catalog must contain at least one zone".into()));
        }
        if celebration_window <= TimeDelta::zero() {
            return Err(Error::Config("celebration window must be positive".into()));
        }
        if schedule_window <= TimeDelta::zero() {
            return Err(Error::Config("schedule window must be positive".into()));
        }
        Ok(Self {
            entries,
            featured,
            celebration_window,
            schedule_window,
        })
    }

    pub fn builtin() -> Result<Self> {
        let entries = BUILTIN_ZONES
            .iter()
            .map(|(label, zone)| ZoneEntry::new(*label, zone))
            .collect::<Result<Vec<_>>>()?;
        let featured = BUILTIN_FEATURED
            .iter()
            .map(|zone| ZoneId::parse(zone))
            .collect::<Result<Vec<_>>>()?;
        Self::new(
            entries,
            featured,
            TimeDelta::minutes(DEFAULT_CELEBRATION_WINDOW_MINUTES),
            TimeDelta::hours(DEFAULT_SCHEDULE_WINDOW_HOURS),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn label_for(&self, zone: &ZoneId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.zone == *zone)
            .map(|entry| entry.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_resolves_every_zone() {
        let catalog = ZoneCatalog::builtin().expect("builtin catalog is valid");
        assert_eq!(catalog.len(), 28);
        assert_eq!(catalog.featured.len(), 5);
        assert_eq!(catalog.celebration_window, TimeDelta::minutes(90));
    }

    #[test]
    fn builtin_catalog_has_single_utc_minus_twelve_entry() {
        let catalog = ZoneCatalog::builtin().unwrap();
        let gmt12 = ZoneId::parse("Etc/GMT+12").unwrap();
        let matches = catalog.entries.iter().filter(|e| e.zone == gmt12).count();
        assert_eq!(matches, 1);
        assert_eq!(catalog.label_for(&gmt12), Some("Baker Island"));
        assert_eq!(
            catalog.label_for(&ZoneId::parse("Pacific/Kiritimati").unwrap()),
            Some("Kiritimati")
        );
    }

    #[test]
    fn rejects_empty_catalog() {
        let err = ZoneCatalog::new(vec![], vec![], TimeDelta::minutes(90), TimeDelta::hours(24))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn entry_requires_label_and_valid_zone() {
        assert!(matches!(ZoneEntry::new(" ", "Asia/Tokyo"), Err(Error::Config(_))));
        assert!(matches!(
            ZoneEntry::new("Nowhere", "Nowhere/City"),
            Err(Error::InvalidZone(_))
        ));
    }
}
