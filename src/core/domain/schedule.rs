//! Catalog zones ordered by how close they are to midnight.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use super::{
    countdown::{TargetMode, new_year_boundaries},
    zone::ZoneId,
};
use crate::core::{config::ZoneCatalog, error::Result};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Celebrated,
    Incoming,
    Waiting,
}

impl ScheduleStatus {
    pub fn from_hours(hours_until: f64) -> Self {
        if hours_until <= 0.0 {
            ScheduleStatus::Celebrated
        } else if hours_until < 24.0 {
            ScheduleStatus::Incoming
        } else {
            ScheduleStatus::Waiting
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Celebrated => "celebrated",
            ScheduleStatus::Incoming => "incoming",
            ScheduleStatus::Waiting => "waiting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub label: String,
    pub zone: ZoneId,
    pub target: DateTime<Utc>,
    /// Fractional hours from now until `target`; negative once it has passed.
    pub hours_until: f64,
    pub status: ScheduleStatus,
}

/// The default schedule keeps a zone marked as celebrated for `window` after its midnight.
pub fn schedule_mode(window: TimeDelta) -> TargetMode {
    TargetMode::Recent { window }
}

/// Every catalog zone with its target and status, soonest first.
pub fn celebration_schedule(
    instant: DateTime<Utc>,
    catalog: &ZoneCatalog,
    mode: TargetMode,
) -> Result<Vec<ScheduleEntry>> {
    let mut entries = catalog
        .entries
        .iter()
        .map(|entry| {
            let target = new_year_boundaries(instant, &entry.zone)?.select(instant, mode);
            let hours_until = (target - instant).num_milliseconds() as f64 / MILLIS_PER_HOUR;
            Ok(ScheduleEntry {
                label: entry.label.clone(),
                zone: entry.zone,
                target,
                hours_until,
                status: ScheduleStatus::from_hours(hours_until),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.hours_until.total_cmp(&b.hours_until));
    Ok(entries)
}
