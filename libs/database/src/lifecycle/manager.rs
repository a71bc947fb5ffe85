use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Sleep;
use tracing::{debug, error, info, warn};

use super::backoff::BackoffPolicy;
use super::failure::ConnectFailure;
use super::health::{ConnectionStatus, HealthSnapshot};
use super::state::{ConnectionState, Effect, Event, Lifecycle};
use crate::common::{DatabaseError, DatabaseResult};

/// Something that can perform one connection attempt.
///
/// Implementations should not retry internally; the manager owns retries,
/// backoff and the per-attempt timeout.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Handle published to request handlers once connected
    type Handle: Clone + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Handle, ConnectFailure>;
}

/// Tuning for the connection manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerSettings {
    pub backoff: BackoffPolicy,
    /// Upper bound on a single attempt; expiry counts as a timeout failure
    pub attempt_timeout: Duration,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            backoff: BackoffPolicy::default(),
            attempt_timeout: Duration::from_secs(15),
        }
    }
}

enum Command {
    Reconnect { ack: oneshot::Sender<()> },
    Shutdown { ack: oneshot::Sender<()> },
}

/// Cloneable control surface of a running [`ConnectionManager`].
///
/// Reads are lock-free snapshots of the last published status. The driver
/// stops on [`shutdown`](Self::shutdown) or once every clone has been dropped.
#[derive(Clone)]
pub struct ConnectionControl {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<ConnectionStatus>,
}

impl ConnectionControl {
    /// Manual trigger: cancel any pending retry, reset the failure counter and
    /// start a fresh attempt.
    ///
    /// Returns once the reset has been applied. The outcome of the new attempt
    /// is not awaited; poll [`snapshot`](Self::snapshot) for it.
    pub async fn reconnect(&self) -> DatabaseResult<()> {
        let (ack, applied) = oneshot::channel();
        self.commands
            .send(Command::Reconnect { ack })
            .map_err(|_| DatabaseError::ManagerStopped)?;
        applied.await.map_err(|_| DatabaseError::ManagerStopped)
    }

    /// Stop the driver: drop any in-flight attempt and pending retry, and
    /// withdraw the published handle so the store client can be released.
    ///
    /// Later calls to [`reconnect`](Self::reconnect) fail with
    /// [`DatabaseError::ManagerStopped`].
    pub async fn shutdown(&self) -> DatabaseResult<()> {
        let (ack, applied) = oneshot::channel();
        self.commands
            .send(Command::Shutdown { ack })
            .map_err(|_| DatabaseError::ManagerStopped)?;
        applied.await.map_err(|_| DatabaseError::ManagerStopped)
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status.borrow().clone()
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot::from_status(&self.status.borrow())
    }

    pub fn is_connected(&self) -> bool {
        self.status.borrow().state == ConnectionState::Connected
    }

    /// Watch every published status change
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.clone()
    }
}

/// Read side of the published store handle.
#[derive(Clone)]
pub struct StoreHandle<H> {
    published: watch::Receiver<Option<H>>,
}

impl<H: Clone> StoreHandle<H> {
    /// A handle that is always available, for tools and tests that connect once
    pub fn fixed(handle: H) -> Self {
        let (_tx, published) = watch::channel(Some(handle));
        Self { published }
    }

    /// A handle that never becomes available
    pub fn unavailable() -> Self {
        let (_tx, published) = watch::channel(None);
        Self { published }
    }

    pub fn current(&self) -> Option<H> {
        self.published.borrow().clone()
    }

    /// Current handle, or [`DatabaseError::NotConnected`]
    pub fn get(&self) -> DatabaseResult<H> {
        self.current().ok_or(DatabaseError::NotConnected)
    }
}

type Attempt<H> = BoxFuture<'static, Result<H, ConnectFailure>>;

/// Drives the connection lifecycle of one backing store.
///
/// A single task owns the [`Lifecycle`], the in-flight attempt and the retry
/// timer, so transitions never run concurrently with each other and there is
/// never more than one attempt or one pending retry.
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    settings: ManagerSettings,
    lifecycle: Lifecycle,
    commands: mpsc::UnboundedReceiver<Command>,
    status_tx: watch::Sender<ConnectionStatus>,
    handle_tx: watch::Sender<Option<C::Handle>>,
    attempt: Option<Attempt<C::Handle>>,
    retry: Option<Pin<Box<Sleep>>>,
    next_retry_in: Option<Duration>,
    last_failure: Option<ConnectFailure>,
    exhausted: bool,
}

impl<C: Connector> ConnectionManager<C> {
    /// Start the driver task and make the first attempt immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(connector: C, settings: ManagerSettings) -> (ConnectionControl, StoreHandle<C::Handle>) {
        let (status_tx, status_rx) = watch::channel(ConnectionStatus::default());
        let (handle_tx, handle_rx) = watch::channel(None);
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let manager = Self {
            connector: Arc::new(connector),
            settings,
            lifecycle: Lifecycle::new(),
            commands: command_rx,
            status_tx,
            handle_tx,
            attempt: None,
            retry: None,
            next_retry_in: None,
            last_failure: None,
            exhausted: false,
        };
        tokio::spawn(manager.run());

        (
            ConnectionControl {
                commands: command_tx,
                status: status_rx,
            },
            StoreHandle {
                published: handle_rx,
            },
        )
    }

    async fn run(mut self) {
        self.dispatch(Event::AttemptDue, None);

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Reconnect { ack }) => {
                        info!(
                            previous_attempts = self.lifecycle.attempts(),
                            "Manual reconnect requested"
                        );
                        self.dispatch(Event::ManualTrigger, None);
                        let _ = ack.send(());
                    }
                    Some(Command::Shutdown { ack }) => {
                        info!("Stopping connection driver");
                        self.attempt = None;
                        self.retry = None;
                        self.handle_tx.send_replace(None);
                        let _ = ack.send(());
                        break;
                    }
                    None => {
                        debug!("All connection controls dropped, stopping connection driver");
                        break;
                    }
                },
                outcome = poll_slot(&mut self.attempt) => {
                    self.attempt = None;
                    match outcome {
                        Ok(handle) => self.dispatch(Event::Succeeded, Some(handle)),
                        Err(failure) => {
                            self.last_failure = Some(failure);
                            self.dispatch(Event::Failed, None);
                        }
                    }
                }
                () = poll_slot(&mut self.retry) => {
                    self.retry = None;
                    self.next_retry_in = None;
                    self.dispatch(Event::AttemptDue, None);
                }
            }
        }
    }

    fn dispatch(&mut self, event: Event, mut handle: Option<C::Handle>) {
        let effects = self.lifecycle.apply(event, &self.settings.backoff);

        for effect in effects {
            match effect {
                Effect::CancelRetry => {
                    if self.retry.take().is_some() {
                        debug!("Cancelled pending retry");
                    }
                    self.next_retry_in = None;
                }
                Effect::AbortAttempt => {
                    if self.attempt.take().is_some() {
                        debug!("Aborted in-flight connection attempt");
                    }
                }
                Effect::WithdrawHandle => {
                    self.handle_tx.send_replace(None);
                }
                Effect::BeginAttempt => {
                    self.exhausted = false;
                    self.attempt = Some(self.begin_attempt());
                }
                Effect::PublishHandle => {
                    self.last_failure = None;
                    self.handle_tx.send_replace(handle.take());
                    info!("Database connection established");
                }
                Effect::ScheduleRetry(delay) => {
                    if let Some(failure) = &self.last_failure {
                        warn!(
                            attempt = self.lifecycle.attempts(),
                            max_attempts = self.settings.backoff.max_attempts,
                            kind = %failure.kind,
                            error = %failure.message,
                            hint = failure.hint(),
                            retry_in_secs = delay.as_secs_f64(),
                            "Database connection attempt failed"
                        );
                    }
                    self.retry = Some(Box::pin(tokio::time::sleep(delay)));
                    self.next_retry_in = Some(delay);
                }
                Effect::Exhausted => {
                    self.exhausted = true;
                    let (kind, message, hint) = match &self.last_failure {
                        Some(f) => (f.kind.as_str(), f.message.as_str(), f.hint()),
                        None => ("unknown", "", ""),
                    };
                    error!(
                        attempts = self.lifecycle.attempts(),
                        kind,
                        error = message,
                        hint,
                        "Giving up on automatic reconnection; POST /reconnect to retry"
                    );
                }
            }
        }

        self.publish_status();
    }

    fn begin_attempt(&self) -> Attempt<C::Handle> {
        let connector = Arc::clone(&self.connector);
        let limit = self.settings.attempt_timeout;

        info!(
            attempt = self.lifecycle.attempts() + 1,
            timeout_secs = limit.as_secs_f64(),
            "Starting database connection attempt"
        );

        Box::pin(async move {
            match tokio::time::timeout(limit, connector.connect()).await {
                Ok(result) => result,
                Err(_) => Err(ConnectFailure::timed_out(limit)),
            }
        })
    }

    fn publish_status(&self) {
        self.status_tx.send_replace(ConnectionStatus {
            state: self.lifecycle.state(),
            attempts: self.lifecycle.attempts(),
            last_failure: self.last_failure.clone(),
            next_retry_in: self.next_retry_in,
            exhausted: self.exhausted,
        });
    }
}

/// Await the future in `slot`, or never resolve if the slot is empty.
async fn poll_slot<F>(slot: &mut Option<F>) -> F::Output
where
    F: Future + Unpin,
{
    match slot.as_mut() {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}
