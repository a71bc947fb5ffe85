//! Booking Service - business logic layer

use database::mongodb::object_to_document;
use mongodb::bson::{Bson, DateTime, Document, oid::ObjectId};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingFilter, SERVER_FIELDS, VEHICLE_FIELD, vehicle_ref};
use crate::repository::BookingRepository;

/// Booking service providing business logic operations
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Bookings matching `filter`, newest first, each with its `vehicle`
    #[instrument(skip(self))]
    pub async fn list_bookings(&self, filter: BookingFilter) -> BookingResult<Vec<Booking>> {
        let mut bookings = self.repository.list(filter).await?;
        self.attach_vehicles(&mut bookings).await?;
        Ok(bookings)
    }

    /// Store a booking with a server-assigned `createdAt` and return it with its `vehicle`
    #[instrument(skip(self, fields))]
    pub async fn create_booking(&self, fields: Map<String, Value>) -> BookingResult<Booking> {
        let mut booking = object_to_document(fields, &SERVER_FIELDS)
            .map_err(|e| BookingError::InvalidBody(e.to_string()))?;
        booking.insert("createdAt", DateTime::now());

        let mut stored = self.repository.create(booking).await?;
        self.attach_vehicles(std::slice::from_mut(&mut stored)).await?;
        Ok(stored)
    }

    /// Join every booking with its vehicle using a single lookup.
    ///
    /// Bookings whose vehicle is missing or unreferenced get `vehicle: null`.
    async fn attach_vehicles(&self, bookings: &mut [Booking]) -> BookingResult<()> {
        let mut ids: Vec<ObjectId> = bookings.iter().filter_map(vehicle_ref).collect();
        ids.sort();
        ids.dedup();

        let vehicles: HashMap<ObjectId, Document> = self
            .repository
            .find_vehicles(ids)
            .await?
            .into_iter()
            .filter_map(|v| Some((v.get_object_id("_id").ok()?, v)))
            .collect();

        for booking in bookings.iter_mut() {
            let vehicle = vehicle_ref(booking)
                .and_then(|id| vehicles.get(&id).cloned())
                .map(Bson::Document)
                .unwrap_or(Bson::Null);
            booking.insert(VEHICLE_FIELD, vehicle);
        }
        Ok(())
    }
}

impl<R: BookingRepository> Clone for BookingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
