use async_trait::async_trait;
use mongodb::bson::{Document, oid::ObjectId};

use crate::error::VehicleResult;
use crate::models::{BookingCount, Vehicle, VehicleFilter};

/// Data access for vehicles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Vehicles matching `filter`, sorted and limited as requested
    async fn list(&self, filter: VehicleFilter) -> VehicleResult<Vec<Vehicle>>;

    /// Most recently created vehicles
    async fn latest(&self, limit: i64) -> VehicleResult<Vec<Vehicle>>;

    /// Vehicle ids with the most bookings, highest first
    async fn booking_counts(&self, limit: i64) -> VehicleResult<Vec<BookingCount>>;

    /// Vehicles whose `_id` is in `ids`, in no particular order
    async fn find_by_ids(&self, ids: Vec<ObjectId>) -> VehicleResult<Vec<Vehicle>>;

    async fn get_by_id(&self, id: ObjectId) -> VehicleResult<Option<Vehicle>>;

    /// Insert and return the stored document including its `_id`
    async fn create(&self, vehicle: Document) -> VehicleResult<Vehicle>;

    /// Apply `changes` with `$set`; `None` if no vehicle has this id
    async fn update(&self, id: ObjectId, changes: Document) -> VehicleResult<Option<Vehicle>>;

    /// `false` if no vehicle has this id
    async fn delete(&self, id: ObjectId) -> VehicleResult<bool>;
}
