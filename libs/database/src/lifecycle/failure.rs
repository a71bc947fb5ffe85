use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Classification of a failed connection attempt.
///
/// Every kind is retried the same way; the distinction only exists so that
/// operators get a useful diagnostic without reading the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    AuthenticationFailure,
    NetworkResolutionFailure,
    TlsHandshakeFailure,
    Timeout,
    Unclassified,
}

impl FailureKind {
    /// Best-effort classification of a driver error message.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if has(&["authentication", "auth failed", "bad auth", "scram"]) {
            FailureKind::AuthenticationFailure
        } else if has(&["ssl", "tls", "alert", "certificate", "handshake"]) {
            FailureKind::TlsHandshakeFailure
        } else if has(&[
            "enotfound",
            "getaddrinfo",
            "dns",
            "failed to lookup",
            "no such host",
            "name resolution",
            "srv record",
        ]) {
            FailureKind::NetworkResolutionFailure
        } else if has(&["timed out", "timeout", "deadline"]) {
            FailureKind::Timeout
        } else {
            FailureKind::Unclassified
        }
    }

    /// Short operator-facing hint for this kind of failure
    pub fn hint(&self) -> &'static str {
        match self {
            FailureKind::AuthenticationFailure => {
                "Check the username and password, and that the database user exists"
            }
            FailureKind::NetworkResolutionFailure => {
                "Check network connectivity and that the cluster address is correct"
            }
            FailureKind::TlsHandshakeFailure => {
                "TLS handshake rejected; the usual cause is that this host's IP is not on the cluster's network access list"
            }
            FailureKind::Timeout => {
                "The cluster did not answer in time; check that it is running and reachable"
            }
            FailureKind::Unclassified => "Unexpected connection error; see the message for details",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::AuthenticationFailure => "authentication_failure",
            FailureKind::NetworkResolutionFailure => "network_resolution_failure",
            FailureKind::TlsHandshakeFailure => "tls_handshake_failure",
            FailureKind::Timeout => "timeout",
            FailureKind::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed connection attempt: its kind plus the underlying message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ConnectFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ConnectFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build a failure whose kind is inferred from the message text
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: FailureKind::classify(&message),
            message,
        }
    }

    /// The attempt did not finish within `limit`
    pub fn timed_out(limit: Duration) -> Self {
        Self::new(
            FailureKind::Timeout,
            format!("connection attempt exceeded {}s", limit.as_secs_f64()),
        )
    }

    pub fn hint(&self) -> &'static str {
        self.kind.hint()
    }
}
