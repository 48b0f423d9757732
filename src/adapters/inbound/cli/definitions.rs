use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::core::TargetMode;

/// Command-line interface for following New Year around the globe.
#[derive(Debug, Parser)]
#[command(name = "midnight-line")]
#[command(about = "Track the midnight meridian and New Year countdowns per time zone", version)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Verbose logging with timestamps")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, global = true, help = "Pretty-print JSON logs (with --log-json)")]
    pub pretty: bool,

    #[arg(long, global = true, help = "Also write JSON logs under the data directory")]
    pub log_file: bool,

    #[arg(long, global = true, help = "Path to a zone catalog YAML file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_parser = parse_instant,
        help = "Pin the clock to an RFC 3339 instant (e.g. 2025-12-31T11:00:00Z)"
    )]
    pub at: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show UTC time, the midnight longitude, the world countdown and featured cities.
    Now(NowArgs),
    /// Count down to New Year in a single zone.
    Countdown(CountdownArgs),
    /// List catalog zones that crossed midnight within the celebration window.
    Celebrated(CelebratedArgs),
    /// Show every catalog zone ordered by time to midnight.
    Schedule(ScheduleArgs),
    /// Print the map overlay for the midnight line.
    Map(MapArgs),
    /// Re-render the dashboard on a fixed tick.
    Watch(WatchArgs),
    /// Serve the dashboard over HTTP with a server-sent-event tick stream.
    Serve(ServeArgs),
}

#[derive(Debug, Args, Clone, Default)]
pub struct NowArgs {
    #[arg(long, help = "Emit JSON instead of text")]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CountdownArgs {
    #[arg(long, help = "IANA zone identifier (e.g. Asia/Tokyo)")]
    pub zone: String,

    #[arg(
        long,
        value_enum,
        default_value_t = TargetKind::Upcoming,
        help = "Count to the upcoming New Year, or hold the recent one during the celebration window"
    )]
    pub mode: TargetKind,

    #[arg(long, help = "Emit JSON instead of text")]
    pub json: bool,
}

#[derive(Debug, Args, Clone, Default)]
pub struct CelebratedArgs {
    #[arg(long, help = "Emit JSON instead of text")]
    pub json: bool,
}

#[derive(Debug, Args, Clone, Default)]
pub struct ScheduleArgs {
    #[arg(long, value_enum, help = "Target selection (defaults to recent with the schedule window)")]
    pub mode: Option<TargetKind>,

    #[arg(long, help = "Emit JSON instead of text")]
    pub json: bool,
}

#[derive(Debug, Args, Clone, Default)]
pub struct MapArgs {
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Current map centre longitude; reports whether the map should pan"
    )]
    pub center: Option<f64>,

    #[arg(long, help = "Emit JSON instead of text")]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct WatchArgs {
    #[arg(long, help = "Stop after this many ticks (runs until interrupted otherwise)")]
    pub ticks: Option<u64>,

    #[arg(long, default_value_t = 1000, help = "Tick interval in milliseconds")]
    pub interval_ms: u64,
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1", help = "Address to bind")]
    pub bind: String,

    #[arg(long, default_value_t = 8000, help = "Port to listen on")]
    pub port: u16,

    #[arg(long, default_value_t = 1000, help = "SSE tick interval in milliseconds")]
    pub tick_interval_ms: u64,
}

/// Target selection exposed on the CLI and as the `mode` query parameter.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, PartialEq, Eq)]
#[clap(rename_all = "lower")]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Upcoming,
    Recent,
}

impl TargetKind {
    pub fn into_mode(self, window: TimeDelta) -> TargetMode {
        match self {
            TargetKind::Upcoming => TargetMode::Upcoming,
            TargetKind::Recent => TargetMode::Recent { window },
        }
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| format!("invalid RFC 3339 instant '{raw}': {err}"))
}
