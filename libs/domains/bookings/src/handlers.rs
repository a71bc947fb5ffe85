use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    JsonObject, QueryParams,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, ServiceUnavailableResponse},
};
use database::mongodb::document_to_json;
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BookingResult;
use crate::models::BookingFilter;
use crate::repository::BookingRepository;
use crate::service::BookingService;

/// OpenAPI documentation for Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(list_bookings, create_booking),
    components(responses(
        BadRequestResponse,
        InternalServerErrorResponse,
        ServiceUnavailableResponse
    )),
    tags(
        (name = "Bookings", description = "Vehicle bookings")
    )
)]
pub struct ApiDoc;

/// Create the bookings router with all HTTP endpoints
pub fn router<R: BookingRepository + 'static>(service: BookingService<R>) -> Router {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .with_state(Arc::new(service))
}

/// List bookings, newest first, each with its vehicle
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    params(BookingFilter),
    responses(
        (status = 200, description = "Bookings with a `vehicle` field (null if the vehicle is gone)", body = Vec<serde_json::Value>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    QueryParams(filter): QueryParams<BookingFilter>,
) -> BookingResult<Json<Value>> {
    let bookings = service.list_bookings(filter).await?;
    Ok(Json(Value::Array(
        bookings.into_iter().map(document_to_json).collect(),
    )))
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Stored booking with its vehicle", body = serde_json::Value),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    JsonObject(fields): JsonObject,
) -> BookingResult<impl IntoResponse> {
    let booking = service.create_booking(fields).await?;
    Ok((StatusCode::CREATED, Json(document_to_json(booking))))
}
