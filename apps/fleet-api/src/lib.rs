//! Fleet API
//!
//! REST backend for a vehicle rental catalogue. The MongoDB connection is
//! owned by a [`database::ConnectionManager`] that keeps retrying with
//! backoff; data routes answer 503 until it reports a live connection.

pub mod api;
pub mod config;
pub mod gate;
pub mod openapi;
pub mod state;

use axum::Router;
use domain_bookings::{BookingRepository, BookingService};
use domain_vehicles::{VehicleRepository, VehicleService};

pub use state::AppState;

/// Full application router: documentation, middleware and every route.
pub async fn app<V, B>(
    state: AppState,
    vehicles: VehicleService<V>,
    bookings: BookingService<B>,
) -> std::io::Result<Router>
where
    V: VehicleRepository + 'static,
    B: BookingRepository + 'static,
{
    let routes = api::routes(&state, vehicles, bookings);
    axum_helpers::create_router::<openapi::ApiDoc>(routes).await
}
