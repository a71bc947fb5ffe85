use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    JsonObject, QueryParams,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
};
use database::mongodb::document_to_json;
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::VehicleResult;
use crate::models::{LimitQuery, Vehicle, VehicleFilter};
use crate::repository::VehicleRepository;
use crate::service::VehicleService;

/// OpenAPI documentation for Vehicles API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_vehicles,
        latest_vehicles,
        top_rated_vehicles,
        get_vehicle,
        create_vehicle,
        update_vehicle,
        delete_vehicle,
    ),
    components(responses(
        NotFoundResponse,
        BadRequestResponse,
        InternalServerErrorResponse,
        ServiceUnavailableResponse
    )),
    tags(
        (name = "Vehicles", description = "Vehicle catalogue")
    )
)]
pub struct ApiDoc;

/// Create the vehicles router with all HTTP endpoints
pub fn router<R: VehicleRepository + 'static>(service: VehicleService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/latest", get(latest_vehicles))
        .route("/vehicles/top-rated", get(top_rated_vehicles))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .with_state(shared_service)
}

fn to_json(vehicles: Vec<Vehicle>) -> Json<Value> {
    Json(Value::Array(vehicles.into_iter().map(document_to_json).collect()))
}

/// List vehicles with optional filters and sorting
#[utoipa::path(
    get,
    path = "/vehicles",
    tag = "Vehicles",
    params(VehicleFilter),
    responses(
        (status = 200, description = "Matching vehicles", body = Vec<serde_json::Value>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_vehicles<R: VehicleRepository>(
    State(service): State<Arc<VehicleService<R>>>,
    QueryParams(filter): QueryParams<VehicleFilter>,
) -> VehicleResult<Json<Value>> {
    let vehicles = service.list_vehicles(filter).await?;
    Ok(to_json(vehicles))
}

/// Most recently added vehicles
#[utoipa::path(
    get,
    path = "/vehicles/latest",
    tag = "Vehicles",
    params(LimitQuery),
    responses(
        (status = 200, description = "Newest vehicles first", body = Vec<serde_json::Value>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn latest_vehicles<R: VehicleRepository>(
    State(service): State<Arc<VehicleService<R>>>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> VehicleResult<Json<Value>> {
    let vehicles = service.latest_vehicles(query).await?;
    Ok(to_json(vehicles))
}

/// Vehicles ranked by number of bookings
#[utoipa::path(
    get,
    path = "/vehicles/top-rated",
    tag = "Vehicles",
    params(LimitQuery),
    responses(
        (status = 200, description = "Most booked vehicles, each with bookingCount", body = Vec<serde_json::Value>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn top_rated_vehicles<R: VehicleRepository>(
    State(service): State<Arc<VehicleService<R>>>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> VehicleResult<Json<Value>> {
    let vehicles = service.top_rated_vehicles(query).await?;
    Ok(to_json(vehicles))
}

/// Get a vehicle by ID
#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    tag = "Vehicles",
    params(
        ("id" = String, Path, description = "Vehicle ObjectId (hex)")
    ),
    responses(
        (status = 200, description = "Vehicle found", body = serde_json::Value),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_vehicle<R: VehicleRepository>(
    State(service): State<Arc<VehicleService<R>>>,
    Path(id): Path<String>,
) -> VehicleResult<Json<Value>> {
    let vehicle = service.get_vehicle(&id).await?;
    Ok(Json(document_to_json(vehicle)))
}

/// Create a vehicle
#[utoipa::path(
    post,
    path = "/vehicles",
    tag = "Vehicles",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Vehicle created", body = serde_json::Value),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_vehicle<R: VehicleRepository>(
    State(service): State<Arc<VehicleService<R>>>,
    JsonObject(fields): JsonObject,
) -> VehicleResult<impl IntoResponse> {
    let vehicle = service.create_vehicle(fields).await?;
    Ok((StatusCode::CREATED, Json(document_to_json(vehicle))))
}

/// Update fields of a vehicle
#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    tag = "Vehicles",
    params(
        ("id" = String, Path, description = "Vehicle ObjectId (hex)")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated vehicle", body = serde_json::Value),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_vehicle<R: VehicleRepository>(
    State(service): State<Arc<VehicleService<R>>>,
    Path(id): Path<String>,
    JsonObject(fields): JsonObject,
) -> VehicleResult<Json<Value>> {
    let vehicle = service.update_vehicle(&id, fields).await?;
    Ok(Json(document_to_json(vehicle)))
}

/// Delete a vehicle
#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    tag = "Vehicles",
    params(
        ("id" = String, Path, description = "Vehicle ObjectId (hex)")
    ),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_vehicle<R: VehicleRepository>(
    State(service): State<Arc<VehicleService<R>>>,
    Path(id): Path<String>,
) -> VehicleResult<impl IntoResponse> {
    service.delete_vehicle(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
