//! MongoDB implementation of VehicleRepository

use async_trait::async_trait;
use database::mongodb::MongoHandle;
use futures_util::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Bson, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use tracing::instrument;

use crate::error::VehicleResult;
use crate::models::{
    BOOKINGS_COLLECTION, BookingCount, VEHICLES_COLLECTION, Vehicle, VehicleFilter, positive,
};
use crate::repository::VehicleRepository;

/// MongoDB implementation of the VehicleRepository.
///
/// Collections are resolved per call from the published store handle, so the
/// repository can be built before the first connection succeeds.
#[derive(Clone)]
pub struct MongoVehicleRepository {
    store: MongoHandle,
}

impl MongoVehicleRepository {
    pub fn new(store: MongoHandle) -> Self {
        Self { store }
    }

    fn vehicles(&self) -> VehicleResult<Collection<Document>> {
        Ok(self.store.collection(VEHICLES_COLLECTION)?)
    }

    fn bookings(&self) -> VehicleResult<Collection<Document>> {
        Ok(self.store.collection(BOOKINGS_COLLECTION)?)
    }

    /// Build a MongoDB filter document from VehicleFilter
    pub fn build_filter(filter: &VehicleFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            doc.insert("category", category);
        }

        if let Some(ref location) = filter.location {
            doc.insert("location", location);
        }

        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price_filter = doc! {};
            if let Some(min) = filter.min_price {
                price_filter.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price_filter.insert("$lte", max);
            }
            doc.insert("pricePerDay", price_filter);
        }

        doc
    }

    /// Build the sort document, if the filter asks for one
    pub fn build_sort(filter: &VehicleFilter) -> Option<Document> {
        let field = filter.sort_field()?;
        let mut sort = doc! {};
        sort.insert(field, filter.sort_order().direction());
        Some(sort)
    }

    /// Aggregation counting bookings per vehicle, most booked first.
    ///
    /// `vehicleId` may be stored as a hex string or an ObjectId; both forms
    /// are grouped under the hex string so a vehicle is counted once.
    pub fn booking_count_pipeline(limit: i64) -> Vec<Document> {
        vec![
            doc! { "$match": { "vehicleId": { "$type": ["string", "objectId"] } } },
            doc! { "$group": { "_id": { "$toString": "$vehicleId" }, "bookingCount": { "$sum": 1 } } },
            doc! { "$sort": { "bookingCount": -1, "_id": 1 } },
            doc! { "$limit": limit },
        ]
    }
}

fn booking_count(row: &Document) -> Option<BookingCount> {
    let vehicle_id = match row.get("_id")? {
        Bson::String(id) => id.clone(),
        Bson::ObjectId(oid) => oid.to_hex(),
        _ => return None,
    };
    let count = match row.get("bookingCount") {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        _ => 0,
    };
    Some(BookingCount { vehicle_id, count })
}

#[async_trait]
impl VehicleRepository for MongoVehicleRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: VehicleFilter) -> VehicleResult<Vec<Vehicle>> {
        let collection = self.vehicles()?;

        let mut find = collection.find(Self::build_filter(&filter));
        if let Some(sort) = Self::build_sort(&filter) {
            find = find.sort(sort);
        }
        if let Some(limit) = positive(filter.limit) {
            find = find.limit(limit);
        }

        let vehicles: Vec<Vehicle> = find.await?.try_collect().await?;
        Ok(vehicles)
    }

    #[instrument(skip(self))]
    async fn latest(&self, limit: i64) -> VehicleResult<Vec<Vehicle>> {
        let vehicles: Vec<Vehicle> = self
            .vehicles()?
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(vehicles)
    }

    #[instrument(skip(self))]
    async fn booking_counts(&self, limit: i64) -> VehicleResult<Vec<BookingCount>> {
        let pipeline = Self::booking_count_pipeline(limit);
        let rows: Vec<Document> = self.bookings()?.aggregate(pipeline).await?.try_collect().await?;
        Ok(rows.iter().filter_map(booking_count).collect())
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: Vec<ObjectId>) -> VehicleResult<Vec<Vehicle>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let vehicles: Vec<Vehicle> = self
            .vehicles()?
            .find(doc! { "_id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(vehicles)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> VehicleResult<Option<Vehicle>> {
        let vehicle = self.vehicles()?.find_one(doc! { "_id": id }).await?;
        Ok(vehicle)
    }

    #[instrument(skip(self, vehicle))]
    async fn create(&self, vehicle: Document) -> VehicleResult<Vehicle> {
        let result = self.vehicles()?.insert_one(&vehicle).await?;

        let mut stored = doc! { "_id": result.inserted_id };
        stored.extend(vehicle);

        tracing::info!(vehicle_id = ?stored.get("_id"), "Vehicle created");
        Ok(stored)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: Document) -> VehicleResult<Option<Vehicle>> {
        let updated = self
            .vehicles()?
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> VehicleResult<bool> {
        let result = self.vehicles()?.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
