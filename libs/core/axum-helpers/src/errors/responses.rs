//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
use serde::Serialize;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::{ToResponse, ToSchema};

/// Body returned while a required backing service is unavailable
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableBody {
    pub error: String,
    /// Current diagnostic, suitable for operators
    pub message: String,
    /// Path to poll for recovery
    pub health_check: String,
}

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "DATABASE_ERROR",
        "message": "MongoDB error: Kind: Server selection timeout"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed query string or a body that is not a JSON object",
    content_type = "application/json",
    example = json!({
        "code": 1012,
        "error": "BAD_REQUEST",
        "message": "Request body must be a JSON object"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found (also returned for malformed identifiers)",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Resource not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable - the database is not connected",
    content_type = "application/json",
    example = json!({
        "error": "Database unavailable",
        "message": "Database unavailable (timeout). Retrying in 10s",
        "healthCheck": "/health"
    })
)]
pub struct ServiceUnavailableResponse(pub UnavailableBody);
