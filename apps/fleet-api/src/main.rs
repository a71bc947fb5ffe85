use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::ConnectionManager;
use database::mongodb::MongoConnector;
use domain_bookings::{BookingService, MongoBookingRepository};
use domain_vehicles::{MongoVehicleRepository, VehicleService};
use fleet_api::{AppState, config::Config};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        url = %config.mongodb.redacted_url(),
        database = %config.mongodb.database,
        "Starting"
    );

    // The first attempt starts immediately; the server does not wait for it
    let settings = config.mongodb.manager_settings();
    let (connection, store) = ConnectionManager::spawn(MongoConnector::new(config.mongodb.clone()), settings);

    let vehicles = VehicleService::new(MongoVehicleRepository::new(store.clone()));
    let bookings = BookingService::new(MongoBookingRepository::new(store));

    let state = AppState::new(connection);
    let router = fleet_api::app(state.clone(), vehicles, bookings).await?;

    info!("Starting Fleet API with production-ready shutdown (10s timeout)");

    create_production_app(router, &config.server, Duration::from_secs(10), async move {
        info!("Shutting down: stopping database connection driver");
        if let Err(e) = state.connection.shutdown().await {
            tracing::warn!(error = %e, "Connection driver already stopped");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Fleet API shutdown complete");
    Ok(())
}
