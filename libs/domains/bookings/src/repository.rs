use async_trait::async_trait;
use mongodb::bson::{Document, oid::ObjectId};

use crate::error::BookingResult;
use crate::models::{Booking, BookingFilter};

/// Data access for bookings and the vehicles they reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings matching `filter`, newest first
    async fn list(&self, filter: BookingFilter) -> BookingResult<Vec<Booking>>;

    /// Insert and return the stored document including its `_id`
    async fn create(&self, booking: Document) -> BookingResult<Booking>;

    /// Vehicles whose `_id` is in `ids`, in no particular order
    async fn find_vehicles(&self, ids: Vec<ObjectId>) -> BookingResult<Vec<Document>>;
}
