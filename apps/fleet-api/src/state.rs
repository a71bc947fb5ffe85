//! Application state management.
//!
//! Operational endpoints and the request gate only need the connection
//! control surface; domain routers carry their own services as state.

use database::ConnectionControl;

/// Shared application state.
///
/// Cloning is cheap: the control surface is a channel sender plus a watch
/// receiver.
#[derive(Clone)]
pub struct AppState {
    /// Status snapshots and the manual reconnect trigger
    pub connection: ConnectionControl,
}

impl AppState {
    pub fn new(connection: ConnectionControl) -> Self {
        Self { connection }
    }
}
