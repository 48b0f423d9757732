use std::{net::SocketAddr, process::ExitCode, sync::Arc, time::Duration};

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;

use midnight_line::{
    adapters::{
        inbound::{
            cli::{CliAdapter, Cli, Commands, ServeArgs},
            server::{ServeOptions, ServerAdapter},
        },
        outbound::clock::{FixedClock, SystemClock},
    },
    application::service::DashboardService,
    config::load_catalog,
    core::ports::Clock,
};

mod tracing_setup;

use tracing_setup::JsonLogFormat;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_format = if cli.pretty {
        JsonLogFormat::Pretty
    } else {
        JsonLogFormat::Compact
    };
    let _guard = tracing_setup::init(cli.verbose, cli.log_json, json_format, cli.log_file);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Command failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let catalog = Arc::new(load_catalog(cli.config.as_deref())?);
    let clock: Arc<dyn Clock> = match cli.at {
        Some(instant) => {
            tracing::debug!(%instant, "clock pinned");
            Arc::new(FixedClock::new(instant))
        }
        None => Arc::new(SystemClock::new()),
    };
    tracing::debug!(zones = catalog.len(), "catalog loaded");
    let service = Arc::new(DashboardService::new(clock, catalog));

    match cli.command {
        Commands::Serve(args) => serve_command(service, args).await,
        command => CliAdapter::new(service).execute(command).await,
    }
}

async fn serve_command(service: Arc<DashboardService>, args: ServeArgs) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .context("Invalid bind/port combination for serve command")?;
    let options = ServeOptions {
        tick_interval: Duration::from_millis(args.tick_interval_ms),
    };
    println!("Serving dashboard API on http://{addr}");
    ServerAdapter::new(service, options).run(addr).await
}
