use serde::Serialize;
use std::fmt;
use std::time::Duration;

use super::backoff::BackoffPolicy;

/// Connection state of the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
        }
    }
}

/// Inputs to the lifecycle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Boot, or the pending retry timer fired
    AttemptDue,
    /// The in-flight attempt produced a handle
    Succeeded,
    /// The in-flight attempt failed or timed out
    Failed,
    /// Operator asked for an immediate reconnect
    ManualTrigger,
}

/// Side effects the driver must carry out, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CancelRetry,
    AbortAttempt,
    WithdrawHandle,
    BeginAttempt,
    PublishHandle,
    ScheduleRetry(Duration),
    /// Ceiling reached; nothing further is scheduled
    Exhausted,
}

/// Connection state plus the consecutive failure counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lifecycle {
    state: ConnectionState,
    attempts: u32,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Consecutive failed attempts since the last success or manual trigger
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Apply `event` and return the effects the driver has to execute.
    ///
    /// Events that do not fit the current state (a late timer, a result for an
    /// attempt that was already aborted) leave the lifecycle untouched and
    /// produce no effects.
    pub fn apply(&mut self, event: Event, policy: &BackoffPolicy) -> Vec<Effect> {
        match (self.state, event) {
            (_, Event::ManualTrigger) => {
                self.attempts = 0;
                self.state = ConnectionState::Connecting;
                vec![
                    Effect::CancelRetry,
                    Effect::AbortAttempt,
                    Effect::WithdrawHandle,
                    Effect::BeginAttempt,
                ]
            }
            (ConnectionState::Disconnected, Event::AttemptDue) => {
                self.state = ConnectionState::Connecting;
                vec![Effect::BeginAttempt]
            }
            (ConnectionState::Connecting, Event::Succeeded) => {
                self.state = ConnectionState::Connected;
                self.attempts = 0;
                vec![Effect::PublishHandle]
            }
            (ConnectionState::Connecting, Event::Failed) => {
                self.state = ConnectionState::Disconnected;
                self.attempts = self.attempts.saturating_add(1);
                if policy.allows_retry(self.attempts) {
                    vec![Effect::ScheduleRetry(policy.delay_for(self.attempts))]
                } else {
                    vec![Effect::Exhausted]
                }
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail_n_times(lifecycle: &mut Lifecycle, policy: &BackoffPolicy, n: u32) -> Vec<Effect> {
        let mut last = Vec::new();
        for _ in 0..n {
            assert_eq!(lifecycle.apply(Event::AttemptDue, policy), vec![Effect::BeginAttempt]);
            last = lifecycle.apply(Event::Failed, policy);
        }
        last
    }

    #[test]
    fn test_initial_state() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.state(), ConnectionState::Disconnected);
        assert_eq!(lifecycle.attempts(), 0);
    }

    #[test]
    fn test_success_publishes_and_resets_counter() {
        let policy = BackoffPolicy::default();
        let mut lifecycle = Lifecycle::new();
        fail_n_times(&mut lifecycle, &policy, 3);
        assert_eq!(lifecycle.attempts(), 3);

        lifecycle.apply(Event::AttemptDue, &policy);
        let effects = lifecycle.apply(Event::Succeeded, &policy);

        assert_eq!(effects, vec![Effect::PublishHandle]);
        assert_eq!(lifecycle.state(), ConnectionState::Connected);
        assert_eq!(lifecycle.attempts(), 0);
    }

    #[test]
    fn test_failures_schedule_backoff_delays() {
        let policy = BackoffPolicy::default();
        let mut lifecycle = Lifecycle::new();

        for n in 1..policy.max_attempts {
            let effects = fail_n_times(&mut lifecycle, &policy, 1);
            assert_eq!(lifecycle.attempts(), n);
            assert_eq!(lifecycle.state(), ConnectionState::Disconnected);
            assert_eq!(effects, vec![Effect::ScheduleRetry(policy.delay_for(n))]);
        }
    }

    #[test]
    fn test_ceiling_stops_automatic_retries() {
        let policy = BackoffPolicy::new().with_max_attempts(10);
        let mut lifecycle = Lifecycle::new();

        let effects = fail_n_times(&mut lifecycle, &policy, 10);
        assert_eq!(effects, vec![Effect::Exhausted]);
        assert_eq!(lifecycle.attempts(), 10);

        // A stray late event must not restart anything or move the counter
        assert!(lifecycle.apply(Event::Failed, &policy).is_empty());
        assert_eq!(lifecycle.attempts(), 10);
    }

    #[test]
    fn test_manual_trigger_resets_and_restarts() {
        let policy = BackoffPolicy::default();
        let mut lifecycle = Lifecycle::new();
        fail_n_times(&mut lifecycle, &policy, 10);

        let effects = lifecycle.apply(Event::ManualTrigger, &policy);

        assert_eq!(
            effects,
            vec![
                Effect::CancelRetry,
                Effect::AbortAttempt,
                Effect::WithdrawHandle,
                Effect::BeginAttempt
            ]
        );
        assert_eq!(lifecycle.attempts(), 0);
        assert_eq!(lifecycle.state(), ConnectionState::Connecting);

        let effects = lifecycle.apply(Event::Failed, &policy);
        assert_eq!(lifecycle.attempts(), 1);
        assert_eq!(effects, vec![Effect::ScheduleRetry(policy.delay_for(1))]);
    }

    #[test]
    fn test_manual_trigger_while_connected() {
        let policy = BackoffPolicy::default();
        let mut lifecycle = Lifecycle::new();
        lifecycle.apply(Event::AttemptDue, &policy);
        lifecycle.apply(Event::Succeeded, &policy);

        let effects = lifecycle.apply(Event::ManualTrigger, &policy);
        assert!(effects.contains(&Effect::WithdrawHandle));
        assert_eq!(lifecycle.state(), ConnectionState::Connecting);
    }

    #[test]
    fn test_stale_events_are_ignored() {
        let policy = BackoffPolicy::default();
        let mut lifecycle = Lifecycle::new();

        assert!(lifecycle.apply(Event::Succeeded, &policy).is_empty());
        assert!(lifecycle.apply(Event::Failed, &policy).is_empty());
        assert_eq!(lifecycle, Lifecycle::new());

        lifecycle.apply(Event::AttemptDue, &policy);
        assert!(lifecycle.apply(Event::AttemptDue, &policy).is_empty());

        lifecycle.apply(Event::Succeeded, &policy);
        assert!(lifecycle.apply(Event::AttemptDue, &policy).is_empty());
        assert_eq!(lifecycle.state(), ConnectionState::Connected);
    }

    #[test]
    fn test_counter_never_decreases_on_failure() {
        let policy = BackoffPolicy::new().with_max_attempts(u32::MAX);
        let mut lifecycle = Lifecycle::new();
        let mut previous = 0;
        for _ in 0..50 {
            fail_n_times(&mut lifecycle, &policy, 1);
            assert!(lifecycle.attempts() > previous);
            previous = lifecycle.attempts();
        }
    }
}
