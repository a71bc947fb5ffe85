//! Store connectivity for the fleet service
//!
//! The [`lifecycle`] module keeps a remote store connected: it retries with
//! exponential backoff up to a ceiling, supports manual reconnects and
//! publishes the current state for health reporting and request gating.
//!
//! # Features
//!
//! - `mongodb` - MongoDB connector, collection listing and JSON helpers
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::lifecycle::ConnectionManager;
//! use database::mongodb::{MongoConfig, MongoConnector};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let settings = config.manager_settings();
//! let (control, store) = ConnectionManager::spawn(MongoConnector::new(config), settings);
//!
//! // later, in a handler
//! let vehicles = store.collection::<Document>("vehicles")?;
//! ```

pub mod common;
pub mod lifecycle;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
pub use lifecycle::{
    BackoffPolicy, ConnectFailure, ConnectionControl, ConnectionManager, ConnectionState,
    ConnectionStatus, Connector, FailureKind, HealthSnapshot, ManagerSettings, StoreHandle,
};
