//! Countdowns to the next (or most recent) local New Year.

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::Serialize;

use super::zone::ZoneId;
use crate::core::error::Result;

const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Which January 1 a countdown should aim at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMode {
    /// Always the next January 1.
    #[default]
    Upcoming,
    /// The January 1 that just passed while still inside `window`, otherwise the next one.
    Recent { window: TimeDelta },
}

/// The start of the current local year and of the following one, both as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewYearBoundaries {
    pub previous: DateTime<Utc>,
    pub next: DateTime<Utc>,
}

impl NewYearBoundaries {
    /// Time elapsed since the most recent boundary. Never negative for the
    /// instant the boundaries were computed from.
    pub fn since_previous(&self, instant: DateTime<Utc>) -> TimeDelta {
        instant - self.previous
    }

    pub fn select(&self, instant: DateTime<Utc>, mode: TargetMode) -> DateTime<Utc> {
        match mode {
            TargetMode::Upcoming => self.next,
            TargetMode::Recent { window } => {
                let elapsed = self.since_previous(instant);
                if elapsed >= TimeDelta::zero() && elapsed < window {
                    self.previous
                } else {
                    self.next
                }
            }
        }
    }
}

/// Both January 1 boundaries around `instant` in `zone`.
pub fn new_year_boundaries(instant: DateTime<Utc>, zone: &ZoneId) -> Result<NewYearBoundaries> {
    let year = zone.local_year(instant);
    Ok(NewYearBoundaries {
        previous: zone.new_year_instant(year)?,
        next: zone.new_year_instant(year + 1)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownResult {
    /// Whole hours remaining; not capped at 24.
    pub hours_remaining: u64,
    pub minutes_remaining: u32,
    pub seconds_remaining: u32,
    pub is_past: bool,
    pub is_soon: bool,
    pub target: DateTime<Utc>,
}

/// Countdown from `instant` to `target`.
///
/// Once the target is reached the units clamp to zero and `is_past` is set.
/// The sub-second remainder is truncated, never rounded.
pub fn countdown_to(instant: DateTime<Utc>, target: DateTime<Utc>) -> CountdownResult {
    let is_past = target <= instant;
    let remaining = if is_past {
        0
    } else {
        (target - instant).num_seconds().max(0)
    };

    let hours = remaining / SECONDS_PER_HOUR;
    let minutes = (remaining % SECONDS_PER_HOUR) / 60;
    let seconds = remaining % 60;

    CountdownResult {
        hours_remaining: hours as u64,
        minutes_remaining: minutes as u32,
        seconds_remaining: seconds as u32,
        is_past,
        is_soon: !is_past && hours < 24,
        target,
    }
}

/// Countdown to New Year in `zone`, aiming at the boundary chosen by `mode`.
pub fn zone_countdown(
    instant: DateTime<Utc>,
    zone: &ZoneId,
    mode: TargetMode,
) -> Result<CountdownResult> {
    let boundaries = new_year_boundaries(instant, zone)?;
    Ok(countdown_to(instant, boundaries.select(instant, mode)))
}

/// Days/hours/minutes/seconds until the next UTC New Year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorldCountdown {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub target: DateTime<Utc>,
}

pub fn world_countdown(instant: DateTime<Utc>) -> Result<WorldCountdown> {
    let target = ZoneId::utc().new_year_instant(instant.year() + 1)?;
    let remaining = (target - instant).num_seconds().max(0);
    Ok(WorldCountdown {
        days: (remaining / SECONDS_PER_DAY) as u64,
        hours: ((remaining % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u32,
        minutes: ((remaining % SECONDS_PER_HOUR) / 60) as u32,
        seconds: (remaining % 60) as u32,
        target,
    })
}

/// True when `zone` is within a day of its New Year, on either side.
///
/// During January the current year's boundary is used, otherwise next year's.
pub fn celebration_near(instant: DateTime<Utc>, zone: &ZoneId) -> Result<bool> {
    let local = zone.local(instant);
    let year = if local.month() == 1 {
        local.year()
    } else {
        local.year() + 1
    };
    let target = zone.new_year_instant(year)?;
    Ok((target - instant).abs() < TimeDelta::hours(24))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn zone(id: &str) -> ZoneId {
        ZoneId::parse(id).unwrap()
    }

    #[test]
    fn london_in_june_counts_to_gmt_midnight() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        let result = zone_countdown(instant, &zone("Europe/London"), TargetMode::Upcoming).unwrap();

        // 200 days until 2026-01-01T00:00Z; BST is over by then.
        assert_eq!(result.hours_remaining, 200 * 24);
        assert_eq!(result.minutes_remaining, 0);
        assert_eq!(result.seconds_remaining, 0);
        assert!(!result.is_past);
        assert!(!result.is_soon);
        assert_eq!(result.target, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn decomposes_and_truncates() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 8, 29, 15).unwrap()
            + TimeDelta::milliseconds(750);
        let result = zone_countdown(instant, &zone("Asia/Tokyo"), TargetMode::Upcoming).unwrap();
        // Tokyo midnight is 15:00Z: 6h 30m 44.25s away.
        assert_eq!(result.hours_remaining, 6);
        assert_eq!(result.minutes_remaining, 30);
        assert_eq!(result.seconds_remaining, 44);
        assert!(result.is_soon);
    }

    #[test]
    fn reaching_the_target_clamps_and_flags_past() {
        let target = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let at_target = countdown_to(target, target);
        assert!(at_target.is_past);
        assert!(!at_target.is_soon);
        assert_eq!(
            (at_target.hours_remaining, at_target.minutes_remaining, at_target.seconds_remaining),
            (0, 0, 0)
        );

        let after = countdown_to(target + TimeDelta::minutes(5), target);
        assert!(after.is_past);
        assert_eq!(after.hours_remaining, 0);
    }

    #[test]
    fn soon_requires_less_than_a_day() {
        let target = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert!(!countdown_to(target - TimeDelta::hours(24), target).is_soon);
        assert!(countdown_to(target - TimeDelta::hours(24) + TimeDelta::seconds(1), target).is_soon);
        assert!(countdown_to(target - TimeDelta::seconds(1), target).is_soon);
    }

    #[test]
    fn upcoming_mode_never_reports_past() {
        let tokyo = zone("Asia/Tokyo");
        let start = tokyo.new_year_instant(2026).unwrap();
        for offset in [0, 1, 59, 3_600, 86_399] {
            let instant = start + TimeDelta::seconds(offset);
            let result = zone_countdown(instant, &tokyo, TargetMode::Upcoming).unwrap();
            assert!(!result.is_past);
            assert_eq!(result.target, tokyo.new_year_instant(2027).unwrap());
        }
    }

    #[test]
    fn recent_mode_holds_the_boundary_inside_the_window() {
        let tokyo = zone("Asia/Tokyo");
        let start = tokyo.new_year_instant(2026).unwrap();
        let mode = TargetMode::Recent {
            window: TimeDelta::minutes(90),
        };

        let inside = zone_countdown(start + TimeDelta::minutes(30), &tokyo, mode).unwrap();
        assert!(inside.is_past);
        assert_eq!(inside.target, start);
        assert_eq!(inside.hours_remaining, 0);

        let outside = zone_countdown(start + TimeDelta::minutes(90), &tokyo, mode).unwrap();
        assert!(!outside.is_past);
        assert_eq!(outside.target, tokyo.new_year_instant(2027).unwrap());
    }

    #[test]
    fn boundaries_bracket_the_instant() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 11, 0, 0).unwrap();
        let b = new_year_boundaries(instant, &zone("Pacific/Kiritimati")).unwrap();
        assert_eq!(b.previous, Utc.with_ymd_and_hms(2025, 12, 31, 10, 0, 0).unwrap());
        assert_eq!(b.next, Utc.with_ymd_and_hms(2026, 12, 31, 10, 0, 0).unwrap());
        assert_eq!(b.since_previous(instant), TimeDelta::hours(1));
    }

    #[test]
    fn world_countdown_splits_days() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 29, 22, 58, 30).unwrap();
        let world = world_countdown(instant).unwrap();
        assert_eq!((world.days, world.hours, world.minutes, world.seconds), (2, 1, 1, 30));
    }

    #[test]
    fn celebration_near_covers_both_sides_of_midnight() {
        let london = zone("Europe/London");
        let before = Utc.with_ymd_and_hms(2025, 12, 31, 6, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 1, 1, 20, 0, 0).unwrap();
        let far = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        assert!(celebration_near(before, &london).unwrap());
        assert!(celebration_near(after, &london).unwrap());
        assert!(!celebration_near(far, &london).unwrap());
    }

    #[test]
    fn skipped_midnight_still_has_a_target() {
        let casey = zone("Antarctica/Casey");
        let instant = Utc.with_ymd_and_hms(1968, 6, 1, 0, 0, 0).unwrap();
        let result = zone_countdown(instant, &casey, TargetMode::Upcoming).unwrap();
        assert_eq!(result.target, Utc.with_ymd_and_hms(1969, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(result.hours_remaining, 214 * 24);

        let abidjan = zone("Africa/Abidjan");
        let instant = Utc.with_ymd_and_hms(1912, 1, 1, 0, 20, 0).unwrap();
        let mode = TargetMode::Recent {
            window: TimeDelta::minutes(90),
        };
        let result = zone_countdown(instant, &abidjan, mode).unwrap();
        assert!(result.is_past);
        assert_eq!(result.target, Utc.with_ymd_and_hms(1912, 1, 1, 0, 16, 8).unwrap());
    }
}
