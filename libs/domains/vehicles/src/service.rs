//! Vehicle Service - business logic layer

use database::mongodb::object_to_document;
use mongodb::bson::{DateTime, Document, oid::ObjectId};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{VehicleError, VehicleResult};
use crate::models::{LimitQuery, SERVER_FIELDS, Vehicle, VehicleFilter};
use crate::repository::VehicleRepository;

/// Malformed identifiers can never match a document, so they read as not found
fn parse_id(id: &str) -> VehicleResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| VehicleError::NotFound(id.to_string()))
}

fn writable(fields: Map<String, Value>) -> VehicleResult<Document> {
    object_to_document(fields, &SERVER_FIELDS).map_err(|e| VehicleError::InvalidBody(e.to_string()))
}

/// Vehicle service providing business logic operations
pub struct VehicleService<R: VehicleRepository> {
    repository: Arc<R>,
}

impl<R: VehicleRepository> VehicleService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_vehicles(&self, filter: VehicleFilter) -> VehicleResult<Vec<Vehicle>> {
        self.repository.list(filter).await
    }

    /// Newest vehicles first
    #[instrument(skip(self))]
    pub async fn latest_vehicles(&self, query: LimitQuery) -> VehicleResult<Vec<Vehicle>> {
        self.repository.latest(query.or_default()).await
    }

    /// Vehicles ranked by how often they were booked, each with `bookingCount`.
    ///
    /// Counts whose vehicle id is malformed or no longer exists are skipped.
    #[instrument(skip(self))]
    pub async fn top_rated_vehicles(&self, query: LimitQuery) -> VehicleResult<Vec<Vehicle>> {
        let counts = self.repository.booking_counts(query.or_default()).await?;

        let ids: Vec<ObjectId> = counts
            .iter()
            .filter_map(|c| ObjectId::parse_str(&c.vehicle_id).ok())
            .collect();
        let mut by_id: HashMap<String, Vehicle> = self
            .repository
            .find_by_ids(ids)
            .await?
            .into_iter()
            .filter_map(|v| Some((v.get_object_id("_id").ok()?.to_hex(), v)))
            .collect();

        Ok(counts
            .into_iter()
            .filter_map(|c| {
                let mut vehicle = by_id.remove(&c.vehicle_id)?;
                vehicle.insert("bookingCount", c.count);
                Some(vehicle)
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_vehicle(&self, id: &str) -> VehicleResult<Vehicle> {
        self.repository
            .get_by_id(parse_id(id)?)
            .await?
            .ok_or_else(|| VehicleError::NotFound(id.to_string()))
    }

    /// Store a new vehicle with server-assigned timestamps
    #[instrument(skip(self, fields))]
    pub async fn create_vehicle(&self, fields: Map<String, Value>) -> VehicleResult<Vehicle> {
        let mut vehicle = writable(fields)?;
        let now = DateTime::now();
        vehicle.insert("createdAt", now);
        vehicle.insert("updatedAt", now);

        self.repository.create(vehicle).await
    }

    /// `$set` the given fields and refresh `updatedAt`
    #[instrument(skip(self, fields))]
    pub async fn update_vehicle(&self, id: &str, fields: Map<String, Value>) -> VehicleResult<Vehicle> {
        let oid = parse_id(id)?;
        let mut changes = writable(fields)?;
        changes.insert("updatedAt", DateTime::now());

        self.repository
            .update(oid, changes)
            .await?
            .ok_or_else(|| VehicleError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn delete_vehicle(&self, id: &str) -> VehicleResult<()> {
        if self.repository.delete(parse_id(id)?).await? {
            Ok(())
        } else {
            Err(VehicleError::NotFound(id.to_string()))
        }
    }
}

impl<R: VehicleRepository> Clone for VehicleService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
