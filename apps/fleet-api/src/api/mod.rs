//! API routes module
//!
//! Operational routes are always reachable; vehicle and booking routes sit
//! behind the database gate.

pub mod health;

use axum::{Router, middleware};
use domain_bookings::{BookingRepository, BookingService};
use domain_vehicles::{VehicleRepository, VehicleService};

use crate::gate::require_connection;
use crate::state::AppState;

/// Create all API routes
pub fn routes<V, B>(state: &AppState, vehicles: VehicleService<V>, bookings: BookingService<B>) -> Router
where
    V: VehicleRepository + 'static,
    B: BookingRepository + 'static,
{
    let gated = Router::new()
        .merge(domain_vehicles::handlers::router(vehicles))
        .merge(domain_bookings::handlers::router(bookings))
        .route_layer(middleware::from_fn_with_state(
            state.connection.clone(),
            require_connection,
        ));

    Router::new()
        .merge(health::router(state.clone()))
        .merge(gated)
}
