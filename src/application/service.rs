//! Application service that composes the core clock operations for the driving adapters.
//!
//! Each public method reads the clock exactly once so that every value it returns
//! describes the same instant.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::{
    CountdownResult, MapOverlay, ScheduleEntry, TargetMode, WorldCountdown, ZoneCatalog, ZoneId,
    celebration_near, celebration_schedule, error::Result, midnight_longitude, ports::Clock,
    recently_celebrated, schedule_mode, should_recenter, world_countdown, zone_countdown,
};

#[derive(Debug, Clone, Serialize)]
pub struct TimeSnapshot {
    pub utc_time: DateTime<Utc>,
    pub midnight_longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneCountdown {
    pub zone: ZoneId,
    pub label: Option<String>,
    pub local_time: String,
    /// Within a day either side of the zone's local new year.
    pub celebration_near: bool,
    #[serde(flatten)]
    pub countdown: CountdownResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct CelebratedSnapshot {
    pub utc_time: DateTime<Utc>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSnapshot {
    pub utc_time: DateTime<Utc>,
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapSnapshot {
    pub utc_time: DateTime<Utc>,
    #[serde(flatten)]
    pub overlay: MapOverlay,
    pub recenter: Option<bool>,
}

/// Everything a dashboard tick renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub utc_time: DateTime<Utc>,
    pub midnight_longitude: f64,
    pub world: WorldCountdown,
    pub recently_celebrated: Vec<String>,
    pub featured: Vec<ZoneCountdown>,
}

pub struct DashboardService {
    clock: Arc<dyn Clock>,
    catalog: Arc<ZoneCatalog>,
}

impl DashboardService {
    pub fn new(clock: Arc<dyn Clock>, catalog: Arc<ZoneCatalog>) -> Self {
        Self { clock, catalog }
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    pub fn time(&self) -> TimeSnapshot {
        let utc_time = self.clock.now();
        TimeSnapshot {
            utc_time,
            midnight_longitude: midnight_longitude(utc_time),
        }
    }

    /// Countdown for an arbitrary zone id. Unknown ids fail with `InvalidZone`.
    #[instrument(skip(self))]
    pub fn countdown(&self, zone_id: &str, mode: TargetMode) -> Result<ZoneCountdown> {
        let zone = ZoneId::parse(zone_id)?;
        self.countdown_at(self.clock.now(), &zone, mode)
    }

    pub fn celebrated(&self) -> Result<CelebratedSnapshot> {
        let utc_time = self.clock.now();
        let labels = recently_celebrated(utc_time, &self.catalog, self.catalog.celebration_window)?;
        Ok(CelebratedSnapshot { utc_time, labels })
    }

    /// The schedule in the requested mode, or the catalog's default grace window.
    pub fn schedule(&self, mode: Option<TargetMode>) -> Result<ScheduleSnapshot> {
        let utc_time = self.clock.now();
        let mode = mode.unwrap_or_else(|| self.default_schedule_mode());
        let entries = celebration_schedule(utc_time, &self.catalog, mode)?;
        Ok(ScheduleSnapshot { utc_time, entries })
    }

    pub fn default_schedule_mode(&self) -> TargetMode {
        schedule_mode(self.catalog.schedule_window)
    }

    pub fn map(&self, center_longitude: Option<f64>) -> MapSnapshot {
        let utc_time = self.clock.now();
        let overlay = MapOverlay::at(utc_time);
        MapSnapshot {
            utc_time,
            recenter: center_longitude
                .map(|center| should_recenter(center, overlay.midnight_longitude)),
            overlay,
        }
    }

    pub fn snapshot(&self) -> Result<DashboardSnapshot> {
        let utc_time = self.clock.now();
        let featured = self
            .catalog
            .featured
            .iter()
            .map(|zone| self.countdown_at(utc_time, zone, TargetMode::Upcoming))
            .collect::<Result<Vec<_>>>()?;
        let recently_celebrated =
            recently_celebrated(utc_time, &self.catalog, self.catalog.celebration_window)?;
        debug!(
            %utc_time,
            celebrated = recently_celebrated.len(),
            "dashboard snapshot computed"
        );
        Ok(DashboardSnapshot {
            utc_time,
            midnight_longitude: midnight_longitude(utc_time),
            world: world_countdown(utc_time)?,
            recently_celebrated,
            featured,
        })
    }

    fn countdown_at(
        &self,
        instant: DateTime<Utc>,
        zone: &ZoneId,
        mode: TargetMode,
    ) -> Result<ZoneCountdown> {
        let countdown = zone_countdown(instant, zone, mode)?;
        Ok(ZoneCountdown {
            zone: *zone,
            label: self.catalog.label_for(zone).map(str::to_string),
            local_time: zone.local(instant).format("%Y-%m-%d %H:%M:%S").to_string(),
            celebration_near: celebration_near(instant, zone)?,
            countdown,
        })
    }
}
