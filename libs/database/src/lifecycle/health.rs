use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use super::failure::ConnectFailure;
use super::state::ConnectionState;

/// Latest lifecycle status as published by the connection driver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    pub attempts: u32,
    /// Most recent failure; cleared on success
    pub last_failure: Option<ConnectFailure>,
    /// Delay of the currently pending retry, if one is scheduled
    pub next_retry_in: Option<Duration>,
    /// Automatic retries have stopped at the ceiling
    pub exhausted: bool,
}

/// Point-in-time view of the connection for health reporting
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub state: ConnectionState,
    pub connected: bool,
    pub attempts: u32,
    pub timestamp: DateTime<Utc>,
    pub last_failure: Option<ConnectFailure>,
    pub exhausted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_retry_secs: Option<u64>,
}

impl HealthSnapshot {
    pub fn from_status(status: &ConnectionStatus) -> Self {
        Self {
            state: status.state,
            connected: status.state == ConnectionState::Connected,
            attempts: status.attempts,
            timestamp: Utc::now(),
            last_failure: status.last_failure.clone(),
            exhausted: status.exhausted,
            next_retry_secs: status.next_retry_in.map(|d| d.as_secs()),
        }
    }

    /// Human-readable one-line summary for operators
    pub fn message(&self) -> String {
        match (self.state, &self.last_failure) {
            (ConnectionState::Connected, _) => "Database connection is healthy".to_string(),
            (ConnectionState::Connecting, _) => "Connecting to the database".to_string(),
            (ConnectionState::Disconnected, Some(failure)) if self.exhausted => format!(
                "Automatic reconnection stopped after {} attempts ({}). {}. POST /reconnect to try again",
                self.attempts,
                failure.kind,
                failure.hint()
            ),
            (ConnectionState::Disconnected, Some(failure)) => {
                let retry = self
                    .next_retry_secs
                    .map(|secs| format!(" Retrying in {secs}s"))
                    .unwrap_or_default();
                format!("Database unavailable ({}). {}.{}", failure.kind, failure.hint(), retry)
            }
            (ConnectionState::Disconnected, None) => "Database not connected yet".to_string(),
        }
    }
}
