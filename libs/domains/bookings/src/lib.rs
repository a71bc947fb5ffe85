//! Bookings Domain
//!
//! Bookings stored in MongoDB, served with the booked vehicle attached.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_bookings::{handlers, BookingService, MongoBookingRepository};
//!
//! let repository = MongoBookingRepository::new(store.clone());
//! let router = handlers::router(BookingService::new(repository));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use handlers::ApiDoc;
pub use models::{Booking, BookingFilter};
pub use mongodb::MongoBookingRepository;
pub use repository::BookingRepository;
pub use service::BookingService;
