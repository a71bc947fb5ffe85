//! Connection lifecycle for a remote backing store.
//!
//! [`Lifecycle`] is the pure state machine, [`BackoffPolicy`] computes retry
//! delays and [`ConnectionManager`] runs both on a single driver task,
//! publishing [`ConnectionStatus`] and the store handle to the rest of the
//! service.

mod backoff;
mod failure;
mod health;
mod manager;
mod state;

pub use backoff::BackoffPolicy;
pub use failure::{ConnectFailure, FailureKind};
pub use health::{ConnectionStatus, HealthSnapshot};
pub use manager::{ConnectionControl, ConnectionManager, Connector, ManagerSettings, StoreHandle};
pub use state::{ConnectionState, Effect, Event, Lifecycle};
