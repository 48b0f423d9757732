//! HTTP server inbound adapter exposing the dashboard via REST and SSE.

use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context as AnyhowContext, Result};
use axum::response::sse::{Event, KeepAlive};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Sse},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_stream::{StreamExt, wrappers::IntervalStream};
use tracing::{info, warn};

use crate::{
    adapters::inbound::cli::TargetKind,
    application::service::{
        CelebratedSnapshot, DashboardService, MapSnapshot, ScheduleSnapshot, TimeSnapshot,
        ZoneCountdown,
    },
    core::Error as CoreError,
};

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Configuration options for the server adapter.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub tick_interval: Duration,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Server adapter that exposes the `DashboardService` via HTTP.
pub struct ServerAdapter {
    service: Arc<DashboardService>,
    options: ServeOptions,
}

impl ServerAdapter {
    pub fn new(service: Arc<DashboardService>, options: ServeOptions) -> Self {
        Self { service, options }
    }

    /// Run the HTTP server on the given address.
    pub async fn run(self, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .context("failed to bind dashboard listener")?;
        self.run_with_listener(listener).await
    }

    /// Run the HTTP server with an existing listener (useful for tests).
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<()> {
        let state = Arc::new(ServeState::new(self.service, self.options));
        let router = build_router(state);
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "midnight-line serve listening");
        } else {
            info!("midnight-line serve listening");
        }
        axum::serve(listener, router.into_make_service())
            .await
            .context("serve endpoint failed")
    }
}

#[derive(Clone)]
struct ServeState {
    service: Arc<DashboardService>,
    tick_interval: Duration,
}

impl ServeState {
    fn new(service: Arc<DashboardService>, options: ServeOptions) -> Self {
        Self {
            service,
            tick_interval: options.tick_interval.max(MIN_TICK_INTERVAL),
        }
    }
}

fn build_router(state: Arc<ServeState>) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/time", get(time_handler))
        .route("/countdown/{*zone}", get(countdown_handler))
        .route("/celebrated", get(celebrated_handler))
        .route("/schedule", get(schedule_handler))
        .route("/map", get(map_handler))
        .route("/stream", get(stream_handler))
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
    endpoints: [&'static str; 7],
}

#[derive(Deserialize)]
struct ModeQuery {
    mode: Option<TargetKind>,
}

#[derive(Deserialize)]
struct MapQuery {
    center: Option<f64>,
}

fn error_response(err: CoreError) -> (StatusCode, String) {
    let status = match err {
        CoreError::InvalidZone(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        warn!(error = %err, "dashboard request failed");
    }
    (status, err.to_string())
}

async fn health_handler() -> Json<Health> {
    Json(Health {
        status: "online",
        service: "midnight-line",
        endpoints: [
            "/time",
            "/countdown/{zone}",
            "/celebrated",
            "/schedule",
            "/map",
            "/stream",
            "/",
        ],
    })
}

async fn time_handler(State(state): State<Arc<ServeState>>) -> Json<TimeSnapshot> {
    Json(state.service.time())
}

async fn countdown_handler(
    Path(zone): Path<String>,
    Query(query): Query<ModeQuery>,
    State(state): State<Arc<ServeState>>,
) -> Result<Json<ZoneCountdown>, (StatusCode, String)> {
    let window = state.service.catalog().celebration_window;
    let mode = query.mode.unwrap_or(TargetKind::Upcoming).into_mode(window);
    state
        .service
        .countdown(&zone, mode)
        .map(Json)
        .map_err(error_response)
}

async fn celebrated_handler(
    State(state): State<Arc<ServeState>>,
) -> Result<Json<CelebratedSnapshot>, (StatusCode, String)> {
    state.service.celebrated().map(Json).map_err(error_response)
}

async fn schedule_handler(
    Query(query): Query<ModeQuery>,
    State(state): State<Arc<ServeState>>,
) -> Result<Json<ScheduleSnapshot>, (StatusCode, String)> {
    let window = state.service.catalog().schedule_window;
    let mode = query.mode.map(|kind| kind.into_mode(window));
    state.service.schedule(mode).map(Json).map_err(error_response)
}

async fn map_handler(
    Query(query): Query<MapQuery>,
    State(state): State<Arc<ServeState>>,
) -> Json<MapSnapshot> {
    Json(state.service.map(query.center))
}

async fn stream_handler(State(state): State<Arc<ServeState>>) -> impl IntoResponse {
    let tick = state.tick_interval;
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let stream_state = state.clone();
    let stream = IntervalStream::new(interval).map(move |_| {
        let event = match stream_state.service.snapshot() {
            Ok(snapshot) => match serde_json::to_string(&snapshot) {
                Ok(json) => Event::default().event("tick").data(json),
                Err(err) => {
                    tracing::error!(error = %err, "failed to serialize dashboard snapshot");
                    Event::default().comment("serialization_error")
                }
            },
            Err(err) => {
                tracing::error!(error = %err, "serve stream failed to build snapshot");
                Event::default().comment("snapshot_error")
            }
        };
        Result::<Event, Infallible>::Ok(event)
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(tick).text("keep-alive"))
}
