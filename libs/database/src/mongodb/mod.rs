//! MongoDB connector and helpers
//!
//! Provides the [`Connector`](crate::lifecycle::Connector) implementation used
//! by the connection manager, a collection listing and JSON conversion.

mod config;
mod connector;
mod health;
mod json;

pub use config::MongoConfig;
pub use connector::{MongoConnector, classify_error};
pub use health::{CollectionReport, inspect_collections};
pub use json::{bson_to_json, document_to_json, json_to_document, object_to_document};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};

use crate::common::DatabaseResult;
use crate::lifecycle::StoreHandle;

/// Published MongoDB database handle
pub type MongoHandle = StoreHandle<Database>;

impl StoreHandle<Database> {
    /// Typed collection on the currently published database
    pub fn collection<T: Send + Sync>(&self, name: &str) -> DatabaseResult<Collection<T>> {
        Ok(self.get()?.collection::<T>(name))
    }
}
