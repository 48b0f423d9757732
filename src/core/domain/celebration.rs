//! The "who just celebrated" feed.

use chrono::{DateTime, Datelike, TimeDelta, Utc};

use super::zone::ZoneId;
use crate::core::{config::ZoneCatalog, error::Result};

/// Seconds elapsed since local midnight when the zone is on January 1, `None` otherwise.
pub fn seconds_into_new_year(instant: DateTime<Utc>, zone: &ZoneId) -> Result<Option<i64>> {
    let local = zone.local(instant);
    if local.month() != 1 || local.day() != 1 {
        return Ok(None);
    }
    let start = zone.new_year_instant(local.year())?;
    Ok(Some((instant - start).num_seconds()))
}

/// True when the zone is on January 1 and within `[0, window)` of its midnight.
pub fn is_recently_celebrated(
    instant: DateTime<Utc>,
    zone: &ZoneId,
    window: TimeDelta,
) -> Result<bool> {
    let window_seconds = window.num_seconds();
    Ok(seconds_into_new_year(instant, zone)?
        .is_some_and(|elapsed| (0..window_seconds).contains(&elapsed)))
}

/// Labels of catalog zones that crossed midnight within `window`.
///
/// Labels are deduplicated and returned in catalog order.
pub fn recently_celebrated(
    instant: DateTime<Utc>,
    catalog: &ZoneCatalog,
    window: TimeDelta,
) -> Result<Vec<String>> {
    let mut labels: Vec<String> = Vec::new();
    for entry in &catalog.entries {
        if is_recently_celebrated(instant, &entry.zone, window)?
            && !labels.iter().any(|label| label == &entry.label)
        {
            labels.push(entry.label.clone());
        }
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ZoneEntry;
    use chrono::TimeZone;

    fn window() -> TimeDelta {
        TimeDelta::minutes(90)
    }

    fn kiritimati() -> ZoneId {
        ZoneId::parse("Pacific/Kiritimati").unwrap()
    }

    #[test]
    fn kiritimati_one_hour_in_is_included() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 11, 0, 0).unwrap();
        assert_eq!(seconds_into_new_year(instant, &kiritimati()).unwrap(), Some(3_600));

        let catalog = ZoneCatalog::builtin().unwrap();
        let labels = recently_celebrated(instant, &catalog, window()).unwrap();
        assert!(labels.contains(&"Kiritimati".to_string()));
        // UTC+13 zones are exactly at midnight.
        assert!(labels.contains(&"Auckland".to_string()));
        assert!(!labels.contains(&"Sydney".to_string()));
    }

    #[test]
    fn kiritimati_two_hours_in_is_excluded() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();
        assert!(!is_recently_celebrated(instant, &kiritimati(), window()).unwrap());
    }

    #[test]
    fn window_is_half_open() {
        let start = kiritimati().new_year_instant(2026).unwrap();
        assert!(is_recently_celebrated(start, &kiritimati(), window()).unwrap());
        assert!(
            is_recently_celebrated(start + TimeDelta::seconds(5_399), &kiritimati(), window())
                .unwrap()
        );
        assert!(
            !is_recently_celebrated(start + TimeDelta::seconds(5_400), &kiritimati(), window())
                .unwrap()
        );
    }

    #[test]
    fn december_31_is_excluded() {
        let start = kiritimati().new_year_instant(2026).unwrap();
        let before = start - TimeDelta::seconds(1);
        assert_eq!(seconds_into_new_year(before, &kiritimati()).unwrap(), None);
        assert!(!is_recently_celebrated(before, &kiritimati(), window()).unwrap());
    }

    #[test]
    fn duplicate_labels_collapse() {
        let catalog = ZoneCatalog::new(
            vec![
                ZoneEntry::new("Line Islands", "Pacific/Kiritimati").unwrap(),
                ZoneEntry::new("Line Islands", "Etc/GMT-14").unwrap(),
                ZoneEntry::new("London", "Europe/London").unwrap(),
            ],
            vec![],
            window(),
            TimeDelta::hours(24),
        )
        .unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 10, 30, 0).unwrap();
        let labels = recently_celebrated(instant, &catalog, window()).unwrap();
        assert_eq!(labels, vec!["Line Islands".to_string()]);
    }

    #[test]
    fn several_zones_can_share_the_window() {
        // 15:30Z on Dec 31: Tokyo is 30 minutes in; Seoul shares the offset but is not in the catalog.
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 15, 30, 0).unwrap();
        let catalog = ZoneCatalog::builtin().unwrap();
        let labels = recently_celebrated(instant, &catalog, window()).unwrap();
        assert_eq!(labels, vec!["Tokyo".to_string()]);

        // 14:30Z: UTC+11 zones are exactly 90 minutes in, Tokyo not yet there.
        let earlier = Utc.with_ymd_and_hms(2025, 12, 31, 14, 30, 0).unwrap();
        assert!(recently_celebrated(earlier, &catalog, window()).unwrap().is_empty());
    }
}
