//! Query string extractor with structured rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Typed query string that rejects with an [`AppError`] body instead of
/// axum's plain-text rejection.
///
/// ```ignore
/// use axum_helpers::extractors::QueryParams;
///
/// async fn list(QueryParams(filter): QueryParams<VehicleFilter>) { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;
        Ok(QueryParams(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use http_body_util::BodyExt;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Page {
        limit: Option<i64>,
    }

    async fn extract(uri: &str) -> Result<QueryParams<Page>, Response> {
        let (mut parts, _) = Request::builder().uri(uri).body(Body::empty()).unwrap().into_parts();
        QueryParams::<Page>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_parses_query() {
        let QueryParams(page) = extract("/vehicles?limit=3").await.unwrap();
        assert_eq!(page.limit, Some(3));

        let QueryParams(page) = extract("/vehicles").await.unwrap();
        assert_eq!(page.limit, None);
    }

    #[tokio::test]
    async fn test_malformed_value_renders_error_response() {
        let rejection = extract("/vehicles?limit=abc").await.unwrap_err();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);

        let bytes = rejection.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 1013);
        assert_eq!(body["error"], "QUERY_EXTRACTION");
        assert!(body["message"].as_str().unwrap().contains("query string"));
    }
}
