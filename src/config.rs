use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, ensure};
use chrono::TimeDelta;
use serde::Deserialize;

use crate::{
    core::{
        DEFAULT_CELEBRATION_WINDOW_MINUTES, DEFAULT_SCHEDULE_WINDOW_HOURS, ZoneCatalog, ZoneEntry,
        ZoneId,
    },
    paths,
};

/// On-disk catalog definition (`zones.yaml`).
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub zones: Vec<ZoneConfig>,
    #[serde(default)]
    pub featured: Vec<String>,
    #[serde(default = "default_celebration_window_minutes")]
    pub celebration_window_minutes: i64,
    #[serde(default = "default_schedule_window_hours")]
    pub schedule_window_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ZoneConfig {
    pub label: String,
    pub zone: String,
}

fn default_celebration_window_minutes() -> i64 {
    DEFAULT_CELEBRATION_WINDOW_MINUTES
}

fn default_schedule_window_hours() -> i64 {
    DEFAULT_SCHEDULE_WINDOW_HOURS
}

impl CatalogConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let raw = fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read catalog file at {}", path_ref.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("Invalid catalog in {}", path_ref.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Unable to parse catalog YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.zones.is_empty(),
            "Catalog must contain at least one zone"
        );
        ensure!(
            self.celebration_window_minutes > 0,
            "celebration_window_minutes must be > 0"
        );
        ensure!(
            self.schedule_window_hours > 0,
            "schedule_window_hours must be > 0"
        );
        for (idx, zone) in self.zones.iter().enumerate() {
            ensure!(
                !zone.label.trim().is_empty(),
                "Zone #{idx} ({}) must define a label",
                zone.zone
            );
            ZoneId::parse(&zone.zone).with_context(|| format!("Zone #{idx} ('{}')", zone.label))?;
        }
        for featured in &self.featured {
            ZoneId::parse(featured).context("Invalid featured zone")?;
        }
        Ok(())
    }

    /// Convert into the runtime catalog consumed by the core.
    pub fn into_catalog(self) -> Result<ZoneCatalog> {
        let entries = self
            .zones
            .iter()
            .map(|zone| ZoneEntry::new(zone.label.clone(), &zone.zone))
            .collect::<crate::core::Result<Vec<_>>>()?;
        let featured = self
            .featured
            .iter()
            .map(|zone| ZoneId::parse(zone))
            .collect::<crate::core::Result<Vec<_>>>()?;
        Ok(ZoneCatalog::new(
            entries,
            featured,
            TimeDelta::minutes(self.celebration_window_minutes),
            TimeDelta::hours(self.schedule_window_hours),
        )?)
    }
}

impl FromStr for CatalogConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_yaml_str(s)
    }
}

/// Resolve the catalog: an explicit path, then `zones.yaml` in the data dir, then the built-in table.
pub fn load_catalog(explicit: Option<&Path>) -> Result<ZoneCatalog> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "loading catalog from --config");
        return CatalogConfig::from_path(path)?.into_catalog();
    }
    let default_path: PathBuf = paths::default_catalog_path();
    if default_path.is_file() {
        tracing::debug!(path = %default_path.display(), "loading catalog from data dir");
        return CatalogConfig::from_path(&default_path)?.into_catalog();
    }
    tracing::debug!("using built-in catalog");
    Ok(ZoneCatalog::builtin()?)
}
