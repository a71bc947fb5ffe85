//! Request gate
//!
//! Short-circuits data routes with `503 Service Unavailable` while the
//! database is not connected, so handlers only ever run against a published
//! store handle.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_helpers::errors::responses::UnavailableBody;
use database::{ConnectionControl, HealthSnapshot};

/// Path clients are pointed at while the gate is closed
pub const HEALTH_CHECK_PATH: &str = "/health";

/// `Retry-After` when no retry is scheduled (connecting, or retries exhausted)
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Database gate middleware
///
/// # Example
///
/// ```ignore
/// let gated = Router::new()
///     .merge(vehicles_router)
///     .layer(axum::middleware::from_fn_with_state(control.clone(), require_connection));
/// ```
pub async fn require_connection(
    State(connection): State<ConnectionControl>,
    request: Request,
    next: Next,
) -> Response {
    if connection.is_connected() {
        return next.run(request).await;
    }

    let snapshot = connection.snapshot();
    tracing::debug!(
        path = %request.uri().path(),
        state = %snapshot.state,
        attempts = snapshot.attempts,
        "Rejecting request while database is unavailable"
    );
    unavailable(&snapshot)
}

fn unavailable(snapshot: &HealthSnapshot) -> Response {
    let retry_after = snapshot
        .next_retry_secs
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

    let body = UnavailableBody {
        error: "Database unavailable".to_string(),
        message: format!(
            "{} Please retry shortly or check {}",
            snapshot.message(),
            HEALTH_CHECK_PATH
        ),
        health_check: HEALTH_CHECK_PATH.to_string(),
    };

    let mut response = (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{ConnectFailure, ConnectionState, ConnectionStatus, FailureKind};
    use http_body_util::BodyExt;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unavailable_uses_pending_retry_delay() {
        let status = ConnectionStatus {
            state: ConnectionState::Disconnected,
            attempts: 2,
            last_failure: Some(ConnectFailure::new(FailureKind::Timeout, "timed out")),
            next_retry_in: Some(Duration::from_secs(10)),
            exhausted: false,
        };

        let response = unavailable(&HealthSnapshot::from_status(&status));

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "10");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Database unavailable");
        assert_eq!(body["healthCheck"], "/health");
        assert!(body["message"].as_str().unwrap().contains("timeout"));
    }

    #[test]
    fn test_unavailable_defaults_retry_after() {
        let status = ConnectionStatus {
            state: ConnectionState::Connecting,
            ..Default::default()
        };

        let response = unavailable(&HealthSnapshot::from_status(&status));

        assert_eq!(response.headers()[header::RETRY_AFTER], "5");
    }
}
