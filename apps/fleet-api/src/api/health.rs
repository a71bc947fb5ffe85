//! Operational endpoints: liveness, connection health and manual reconnect.
//!
//! None of these are gated; they must answer while the database is down.

use axum::{Json, Router, extract::State, routing::{get, post}};
use chrono::{DateTime, Utc};
use database::ConnectionState;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(root, health, reconnect),
    components(schemas(HealthResponse, ReconnectResponse)),
    tags(
        (name = "Health", description = "Liveness, database health and manual reconnection")
    )
)]
pub struct ApiDoc;

/// Connection health as reported by `GET /health`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` when the database is connected, `degraded` otherwise
    pub status: String,
    /// `connected` or `disconnected`
    pub database: String,
    /// Consecutive failed attempts since the last success or manual reset
    pub reconnect_attempts: u32,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Most recent failure, absent once connected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<LastError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LastError {
    /// Failure classification, e.g. `tls_handshake_failure`
    pub kind: String,
    pub message: String,
    pub hint: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReconnectResponse {
    pub message: String,
    /// Where to follow the outcome of the new attempt
    pub status: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/reconnect", post(reconnect))
        .with_state(state)
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Server is running", body = String))
)]
async fn root() -> &'static str {
    "server is running"
}

/// Database connection health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Current connection snapshot", body = HealthResponse))
)]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.connection.snapshot();
    let connected = snapshot.state == ConnectionState::Connected;

    Json(HealthResponse {
        status: if connected { "ok" } else { "degraded" }.to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        reconnect_attempts: snapshot.attempts,
        timestamp: snapshot.timestamp,
        message: snapshot.message(),
        last_error: snapshot.last_failure.as_ref().map(|failure| LastError {
            kind: failure.kind.to_string(),
            message: failure.message.clone(),
            hint: failure.hint().to_string(),
        }),
    })
}

/// Reset the retry counter and start a fresh connection attempt.
///
/// Returns as soon as the reset is applied; poll `/health` for the outcome.
#[utoipa::path(
    post,
    path = "/reconnect",
    tag = "Health",
    responses(
        (status = 200, description = "Reconnection triggered", body = ReconnectResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
async fn reconnect(State(state): State<AppState>) -> Result<Json<ReconnectResponse>, axum_helpers::AppError> {
    state.connection.reconnect().await.map_err(|e| {
        tracing::error!(error = %e, "Manual reconnect could not be delivered");
        axum_helpers::AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!("Manual reconnect triggered");
    Ok(Json(ReconnectResponse {
        message: "Reconnection triggered".to_string(),
        status: "Check /health for connection status".to_string(),
    }))
}
