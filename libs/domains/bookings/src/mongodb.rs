//! MongoDB implementation of BookingRepository

use async_trait::async_trait;
use database::mongodb::MongoHandle;
use futures_util::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::error::BookingResult;
use crate::models::{BOOKINGS_COLLECTION, Booking, BookingFilter, VEHICLES_COLLECTION};
use crate::repository::BookingRepository;

/// MongoDB implementation of the BookingRepository
#[derive(Clone)]
pub struct MongoBookingRepository {
    store: MongoHandle,
}

impl MongoBookingRepository {
    pub fn new(store: MongoHandle) -> Self {
        Self { store }
    }

    fn bookings(&self) -> BookingResult<Collection<Document>> {
        Ok(self.store.collection(BOOKINGS_COLLECTION)?)
    }

    fn vehicles(&self) -> BookingResult<Collection<Document>> {
        Ok(self.store.collection(VEHICLES_COLLECTION)?)
    }

    /// Build a MongoDB filter document from BookingFilter
    pub fn build_filter(filter: &BookingFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref email) = filter.user_email {
            doc.insert("userEmail", email);
        }

        // vehicleId is stored either as a hex string or as an ObjectId
        if let Some(ref vehicle_id) = filter.vehicle_id {
            match ObjectId::parse_str(vehicle_id) {
                Ok(oid) => doc.insert("vehicleId", doc! { "$in": [vehicle_id.as_str(), oid] }),
                Err(_) => doc.insert("vehicleId", vehicle_id),
            };
        }

        doc
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: BookingFilter) -> BookingResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .bookings()?
            .find(Self::build_filter(&filter))
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(bookings)
    }

    #[instrument(skip(self, booking))]
    async fn create(&self, booking: Document) -> BookingResult<Booking> {
        let result = self.bookings()?.insert_one(&booking).await?;

        let mut stored = doc! { "_id": result.inserted_id };
        stored.extend(booking);

        tracing::info!(booking_id = ?stored.get("_id"), "Booking created");
        Ok(stored)
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn find_vehicles(&self, ids: Vec<ObjectId>) -> BookingResult<Vec<Document>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let vehicles: Vec<Document> = self
            .vehicles()?
            .find(doc! { "_id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(vehicles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;
    use database::{DatabaseError, StoreHandle};

    #[test]
    fn test_build_filter_by_user_and_vehicle() {
        let oid = ObjectId::parse_str("65f1c0ffee00000000000001").unwrap();
        let filter = BookingFilter {
            user_email: Some("ana@example.com".to_string()),
            vehicle_id: Some(oid.to_hex()),
        };

        assert_eq!(
            MongoBookingRepository::build_filter(&filter),
            doc! {
                "userEmail": "ana@example.com",
                "vehicleId": { "$in": ["65f1c0ffee00000000000001", oid] },
            }
        );
    }

    #[test]
    fn test_build_filter_keeps_non_hex_vehicle_id_as_string() {
        let filter = BookingFilter {
            vehicle_id: Some("legacy-42".to_string()),
            ..Default::default()
        };

        assert_eq!(
            MongoBookingRepository::build_filter(&filter),
            doc! { "vehicleId": "legacy-42" }
        );
    }

    #[test]
    fn test_build_filter_empty() {
        assert_eq!(MongoBookingRepository::build_filter(&BookingFilter::default()), doc! {});
    }

    #[tokio::test]
    async fn test_unconnected_store_reports_not_connected() {
        let repo = MongoBookingRepository::new(StoreHandle::unavailable());

        let result = repo.list(BookingFilter::default()).await;

        assert!(matches!(result, Err(BookingError::Database(DatabaseError::NotConnected))));
    }

    #[tokio::test]
    async fn test_find_vehicles_with_no_ids_skips_the_store() {
        let repo = MongoBookingRepository::new(StoreHandle::unavailable());
        assert!(repo.find_vehicles(Vec::new()).await.unwrap().is_empty());
    }
}
