//! Extractor for free-form JSON object bodies.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

/// JSON request body that must be an object.
///
/// Rejects with a structured [`AppError`] when the body is not JSON or is a
/// JSON value other than an object.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonObject;
///
/// async fn create(JsonObject(fields): JsonObject) -> String {
///     format!("{} fields", fields.len())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        match value {
            Value::Object(fields) => Ok(JsonObject(fields)),
            _ => Err(AppError::BadRequest("Request body must be a JSON object".to_string()).into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{StatusCode, header}};

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_object() {
        let JsonObject(fields) = JsonObject::from_request(json_request(r#"{"model":"Civic"}"#), &())
            .await
            .unwrap();
        assert_eq!(fields["model"], "Civic");
    }

    #[tokio::test]
    async fn test_rejects_array() {
        let rejection = JsonObject::from_request(json_request("[1,2]"), &()).await.unwrap_err();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_invalid_json() {
        let rejection = JsonObject::from_request(json_request("{not json"), &()).await.unwrap_err();
        assert!(rejection.status().is_client_error());
    }
}
