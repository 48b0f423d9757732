//! CLI inbound adapter that renders dashboard views as text or JSON.

mod definitions;

pub use definitions::*;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use serde::Serialize;
use tokio::time::MissedTickBehavior;

use crate::{
    application::service::{DashboardService, DashboardSnapshot, ZoneCountdown},
    core::{CountdownResult, WorldCountdown},
};

/// Minimum tick accepted by `watch`.
const MIN_WATCH_INTERVAL: Duration = Duration::from_millis(100);

/// CLI adapter that consumes the `DashboardService` to execute commands.
pub struct CliAdapter {
    service: Arc<DashboardService>,
}

impl CliAdapter {
    pub fn new(service: Arc<DashboardService>) -> Self {
        Self { service }
    }

    /// Execute a CLI command by dispatching to the appropriate service method.
    pub async fn execute(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Now(args) => self.now_command(args),
            Commands::Countdown(args) => self.countdown_command(args),
            Commands::Celebrated(args) => self.celebrated_command(args),
            Commands::Schedule(args) => self.schedule_command(args),
            Commands::Map(args) => self.map_command(args),
            Commands::Watch(args) => self.watch_command(args).await,
            Commands::Serve(_) => Err(anyhow::anyhow!(
                "Serve command should be handled by the composition root"
            )),
        }
    }

    fn now_command(&self, args: NowArgs) -> Result<()> {
        let snapshot = self.service.snapshot()?;
        if args.json {
            return print_json(&snapshot);
        }
        println!("{}", render_snapshot(&snapshot));
        Ok(())
    }

    fn countdown_command(&self, args: CountdownArgs) -> Result<()> {
        let mode = args
            .mode
            .into_mode(self.service.catalog().celebration_window);
        let result = self.service.countdown(&args.zone, mode)?;
        if args.json {
            return print_json(&result);
        }
        println!("{}", render_zone_line(&result));
        Ok(())
    }

    fn celebrated_command(&self, args: CelebratedArgs) -> Result<()> {
        let snapshot = self.service.celebrated()?;
        if args.json {
            return print_json(&snapshot);
        }
        match banner(&snapshot.labels) {
            Some(line) => println!("{line}"),
            None => println!("No zone has crossed midnight in the last window."),
        }
        Ok(())
    }

    fn schedule_command(&self, args: ScheduleArgs) -> Result<()> {
        let mode = args
            .mode
            .map(|kind| kind.into_mode(self.service.catalog().schedule_window));
        let snapshot = self.service.schedule(mode)?;
        if args.json {
            return print_json(&snapshot);
        }
        println!("Celebration schedule at {} UTC", snapshot.utc_time.format("%Y-%m-%d %H:%M:%S"));
        for entry in &snapshot.entries {
            let remaining = if entry.hours_until <= 0.0 {
                "done".to_string()
            } else {
                format_hours_minutes(entry.hours_until)
            };
            println!(
                "- {:<16} {:<32} {:<10} {}",
                entry.label,
                entry.zone.name(),
                entry.status.as_str(),
                remaining
            );
        }
        Ok(())
    }

    fn map_command(&self, args: MapArgs) -> Result<()> {
        let snapshot = self.service.map(args.center);
        if args.json {
            return print_json(&snapshot);
        }
        let overlay = &snapshot.overlay;
        println!(
            "Midnight line at {:.2}° (celebrated band {:.2}° .. {:.2}°)",
            overlay.midnight_longitude, overlay.celebrated_band.west, overlay.celebrated_band.east
        );
        if let Some(recenter) = snapshot.recenter {
            println!("Recenter map: {}", if recenter { "yes" } else { "no" });
        }
        Ok(())
    }

    async fn watch_command(&self, args: WatchArgs) -> Result<()> {
        let period = Duration::from_millis(args.interval_ms).max(MIN_WATCH_INTERVAL);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut rendered = 0u64;
        loop {
            if args.ticks.is_some_and(|limit| rendered >= limit) {
                break;
            }
            interval.tick().await;
            let snapshot = self.service.snapshot()?;
            println!("{}", render_tick(&snapshot));
            rendered += 1;
        }
        tracing::debug!(ticks = rendered, "watch finished");
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `HH:MM:SS` for a countdown, or the greeting once it has passed.
pub fn format_countdown(countdown: &CountdownResult) -> String {
    if countdown.is_past {
        "Happy New Year!".to_string()
    } else {
        format!(
            "{:02}:{:02}:{:02}",
            countdown.hours_remaining, countdown.minutes_remaining, countdown.seconds_remaining
        )
    }
}

pub fn format_world(world: &WorldCountdown) -> String {
    format!(
        "{:02}d {:02}h {:02}m {:02}s",
        world.days, world.hours, world.minutes, world.seconds
    )
}

fn format_hours_minutes(hours: f64) -> String {
    let whole = hours.floor();
    let minutes = ((hours - whole) * 60.0).floor();
    format!("{whole}h {minutes}m")
}

/// The "just arrived" banner, or `None` when nobody is celebrating.
pub fn banner(labels: &[String]) -> Option<String> {
    if labels.is_empty() {
        None
    } else {
        Some(format!("New Year has just arrived in: {}!", labels.join(", ")))
    }
}

fn display_name(countdown: &ZoneCountdown) -> String {
    countdown.label.clone().unwrap_or_else(|| {
        countdown
            .zone
            .name()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .replace('_', " ")
    })
}

fn render_zone_line(countdown: &ZoneCountdown) -> String {
    let marker = if countdown.countdown.is_soon { "*" } else { " " };
    format!(
        "{marker} {:<16} {:>15}  (local {})",
        display_name(countdown),
        format_countdown(&countdown.countdown),
        countdown.local_time
    )
}

fn render_snapshot(snapshot: &DashboardSnapshot) -> String {
    let mut lines = vec![
        format!(
            "UTC {}  midnight longitude {:.2}°",
            snapshot.utc_time.format("%Y-%m-%d %H:%M:%S"),
            snapshot.midnight_longitude
        ),
        format!(
            "World countdown: {} until {} UTC",
            format_world(&snapshot.world),
            snapshot.world.target.format("%Y-%m-%d %H:%M")
        ),
    ];
    if let Some(line) = banner(&snapshot.recently_celebrated) {
        lines.push(line);
    }
    lines.extend(snapshot.featured.iter().map(render_zone_line));
    lines.join("\n")
}

fn render_tick(snapshot: &DashboardSnapshot) -> String {
    let mut line = format!(
        "{} lon={:.2} world={}",
        snapshot.utc_time.format("%H:%M:%S"),
        snapshot.midnight_longitude,
        format_world(&snapshot.world)
    );
    if !snapshot.recently_celebrated.is_empty() {
        line.push_str(&format!(" celebrating={}", snapshot.recently_celebrated.join(",")));
    }
    line
}
