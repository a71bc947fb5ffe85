use mongodb::Database;
use std::time::Instant;

/// Collections visible on a connected database
#[derive(Debug, Clone)]
pub struct CollectionReport {
    pub healthy: bool,
    /// Collection names, sorted
    pub collections: Vec<String>,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// List the collections of `db`, with timing.
///
/// # Example
/// ```ignore
/// let report = inspect_collections(&db).await;
/// if report.healthy {
///     println!("{} collections in {}ms", report.collections.len(), report.response_time_ms);
/// }
/// ```
pub async fn inspect_collections(db: &Database) -> CollectionReport {
    let start = Instant::now();

    match db.list_collection_names().await {
        Ok(mut collections) => {
            collections.sort();
            CollectionReport {
                healthy: true,
                collections,
                message: None,
                response_time_ms: start.elapsed().as_millis() as u64,
            }
        }
        Err(e) => CollectionReport {
            healthy: false,
            collections: Vec::new(),
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_inspect_collections() {
        let client = Client::with_uri_str("mongodb://localhost:27017").await.unwrap();
        let report = inspect_collections(&client.database("fleet_test")).await;
        assert!(report.healthy);
        assert!(report.message.is_none());
    }
}
