//! Vehicles Domain
//!
//! Vehicle catalogue stored in MongoDB: filtered listings, the latest and
//! most-booked showcases, and CRUD on single vehicles.
//!
//! ```text
//! Handlers  ← HTTP endpoints, JSON conversion
//! Service   ← id parsing, timestamps, ranking join
//! Repository← data access (trait + MongoDB implementation)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_vehicles::{handlers, MongoVehicleRepository, VehicleService};
//!
//! let repository = MongoVehicleRepository::new(store.clone());
//! let router = handlers::router(VehicleService::new(repository));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{VehicleError, VehicleResult};
pub use handlers::ApiDoc;
pub use models::{BookingCount, LimitQuery, SortOrder, Vehicle, VehicleFilter};
pub use mongodb::MongoVehicleRepository;
pub use repository::VehicleRepository;
pub use service::VehicleService;
