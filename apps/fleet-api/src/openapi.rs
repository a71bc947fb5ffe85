//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fleet API",
        version = "0.1.0",
        description = "Vehicle rental REST API over MongoDB with self-healing database connectivity"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for all APIs.
///
/// Every router is merged at the root, so the documents are merged rather
/// than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(crate::api::health::ApiDoc::openapi());
        doc.merge(domain_vehicles::ApiDoc::openapi());
        doc.merge(domain_bookings::ApiDoc::openapi());
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/",
            "/health",
            "/reconnect",
            "/vehicles",
            "/vehicles/latest",
            "/vehicles/top-rated",
            "/vehicles/{id}",
            "/bookings",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
