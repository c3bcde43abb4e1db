//! HTTP and WebSocket surface.
//!
//! REST endpoints expose the derived zone state and accept position
//! fixes; the WebSocket endpoint streams evaluation events (including
//! the vibrate request on zone entry) to subscribers. A subscriber
//! unsubscribes by closing the socket.

use std::sync::LazyLock;
use std::time::Instant;

use anyhow::Result;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tokio_graceful_shutdown::SubsystemHandle;

use geofence_core::zone::{MarkerStyle, ZoneStyle, MARKER_STYLE, ZONE_STYLE};
use geofence_core::{projection, Position, Zone, ZoneError, ZoneShape};

use crate::state::AppState;

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// A raw lon/lat fix as reported by a geolocation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionReport {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// A geolocation error reported by a client. Logged, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationError {
    #[serde(default)]
    pub code: Option<i32>,
    pub message: String,
}

/// Response for `GET /v1/state`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    /// Current membership; null until a position has been evaluated
    pub inside: Option<bool>,
    pub position: Option<Position>,
    pub zone_count: usize,
    pub zone_style: ZoneStyle,
    pub marker_style: MarkerStyle,
}

/// One zone in the `GET /v1/zones` listing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rings: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl From<&Zone> for ZoneSummary {
    fn from(zone: &Zone) -> Self {
        let (kind, rings, radius) = match &zone.shape {
            ZoneShape::Polygons { rings } => ("polygon", Some(rings.len()), None),
            ZoneShape::Circle { radius, .. } => ("circle", None, Some(*radius)),
        };
        ZoneSummary {
            id: zone.id,
            name: zone.name.clone(),
            kind: kind.to_string(),
            enabled: zone.enabled,
            rings,
            radius,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime: u64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/state", get(zone_state))
        .route("/v1/zones", get(zones))
        .route("/v1/zones/recenter", post(recenter))
        .route("/v1/position", post(position))
        .route("/v1/position/error", post(position_error))
        .route("/v1/events", get(events))
        .with_state(state)
}

/// Run the HTTP listener until shutdown is requested.
pub async fn serve(subsys: SubsystemHandle, listener: TcpListener, state: AppState) -> Result<()> {
    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { subsys.on_shutdown_requested().await })
        .await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
    })
}

async fn zone_state(State(state): State<AppState>) -> impl IntoResponse {
    let monitor = state.monitor().await;
    Json(StateResponse {
        inside: monitor.zone_state(),
        position: monitor.position(),
        zone_count: monitor.zones().len(),
        zone_style: ZONE_STYLE,
        marker_style: MARKER_STYLE,
    })
}

async fn zones(State(state): State<AppState>) -> impl IntoResponse {
    let monitor = state.monitor().await;
    let summaries: Vec<ZoneSummary> = monitor.zones().zones().iter().map(Into::into).collect();
    Json(summaries)
}

async fn position(
    State(state): State<AppState>,
    Json(report): Json<PositionReport>,
) -> axum::response::Response {
    if !report.longitude.is_finite() || !report.latitude.is_finite() {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "position coordinates must be finite",
        );
    }

    // Project at ingest; the monitor works in projected meters
    let (x, y) = projection::from_lon_lat(report.longitude, report.latitude);
    let position = match report.accuracy {
        Some(accuracy) => Position::with_accuracy(x, y, accuracy),
        None => Position::new(x, y),
    };

    let evaluation = state.ingest_position(position).await;
    Json(evaluation).into_response()
}

async fn position_error(Json(error): Json<GeolocationError>) -> impl IntoResponse {
    log::warn!(
        "geolocation error reported by client: {} (code {:?})",
        error.message,
        error.code
    );
    StatusCode::NO_CONTENT
}

async fn recenter(State(state): State<AppState>) -> axum::response::Response {
    match state.recenter().await {
        Ok(evaluation) => Json(evaluation).into_response(),
        Err(ZoneError::NoPositionFix) => {
            error_response(StatusCode::CONFLICT, ZoneError::NoPositionFix.to_string())
        }
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    }
}

async fn events(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| event_stream(socket, state))
}

async fn event_stream(mut socket: WebSocket, state: AppState) {
    let mut rx = state.subscribe();
    log::debug!("event subscriber connected");

    loop {
        tokio::select! {
            event = rx.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(RecvError::Lagged(missed)) => {
                        log::warn!("event subscriber lagged, {} events dropped", missed);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                let Ok(text) = serde_json::to_string(&event) else {
                    break;
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    // Closing the socket ends the subscription
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    log::debug!("event subscriber disconnected");
}
