//! Router tests for the request gate and operational endpoints.
//!
//! The connection manager runs against a scripted connector and the domain
//! services against stub repositories that count calls, so the tests show
//! exactly which requests reach the data layer.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use database::{
    BackoffPolicy, ConnectFailure, ConnectionControl, ConnectionManager, ConnectionState, Connector,
    FailureKind, ManagerSettings,
};
use domain_bookings::{Booking, BookingFilter, BookingRepository, BookingResult, BookingService};
use domain_vehicles::{
    BookingCount, Vehicle, VehicleFilter, VehicleRepository, VehicleResult, VehicleService,
};
use fleet_api::AppState;
use http_body_util::BodyExt;
use mongodb::bson::{Document, oid::ObjectId};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt; // For oneshot()

struct FixedConnector {
    succeed: bool,
    attempts: Calls,
}

#[async_trait]
impl Connector for FixedConnector {
    type Handle = ();

    async fn connect(&self) -> Result<(), ConnectFailure> {
        self.attempts.hit();
        if self.succeed {
            Ok(())
        } else {
            Err(ConnectFailure::new(
                FailureKind::TlsHandshakeFailure,
                "received fatal alert: InternalError",
            ))
        }
    }
}

#[derive(Clone, Default)]
struct Calls(Arc<AtomicUsize>);

impl Calls {
    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

struct CountingVehicles(Calls);

#[async_trait]
impl VehicleRepository for CountingVehicles {
    async fn list(&self, _: VehicleFilter) -> VehicleResult<Vec<Vehicle>> {
        self.0.hit();
        Ok(vec![])
    }
    async fn latest(&self, _: i64) -> VehicleResult<Vec<Vehicle>> {
        self.0.hit();
        Ok(vec![])
    }
    async fn booking_counts(&self, _: i64) -> VehicleResult<Vec<BookingCount>> {
        self.0.hit();
        Ok(vec![])
    }
    async fn find_by_ids(&self, _: Vec<ObjectId>) -> VehicleResult<Vec<Vehicle>> {
        self.0.hit();
        Ok(vec![])
    }
    async fn get_by_id(&self, _: ObjectId) -> VehicleResult<Option<Vehicle>> {
        self.0.hit();
        Ok(None)
    }
    async fn create(&self, vehicle: Document) -> VehicleResult<Vehicle> {
        self.0.hit();
        Ok(vehicle)
    }
    async fn update(&self, _: ObjectId, _: Document) -> VehicleResult<Option<Vehicle>> {
        self.0.hit();
        Ok(None)
    }
    async fn delete(&self, _: ObjectId) -> VehicleResult<bool> {
        self.0.hit();
        Ok(false)
    }
}

struct CountingBookings(Calls);

#[async_trait]
impl BookingRepository for CountingBookings {
    async fn list(&self, _: BookingFilter) -> BookingResult<Vec<Booking>> {
        self.0.hit();
        Ok(vec![])
    }
    async fn create(&self, booking: Document) -> BookingResult<Booking> {
        self.0.hit();
        Ok(booking)
    }
    async fn find_vehicles(&self, _: Vec<ObjectId>) -> BookingResult<Vec<Document>> {
        self.0.hit();
        Ok(vec![])
    }
}

fn settings() -> ManagerSettings {
    ManagerSettings {
        backoff: BackoffPolicy::new()
            .with_base_delay(Duration::from_secs(60))
            .with_max_delay(Duration::from_secs(60)),
        attempt_timeout: Duration::from_secs(5),
    }
}

/// Spawn a manager and wait until its first attempt has settled
async fn spawn_manager_counting(succeed: bool, attempts: Calls) -> ConnectionControl {
    let (control, _store) = ConnectionManager::spawn(FixedConnector { succeed, attempts }, settings());
    let mut status = control.subscribe();
    status
        .wait_for(|s| s.state == ConnectionState::Connected || s.attempts > 0)
        .await
        .unwrap();
    control
}

async fn spawn_manager(succeed: bool) -> ConnectionControl {
    spawn_manager_counting(succeed, Calls::default()).await
}

async fn build_app(control: ConnectionControl, calls: &Calls) -> axum::Router {
    fleet_api::app(
        AppState::new(control),
        VehicleService::new(CountingVehicles(calls.clone())),
        BookingService::new(CountingBookings(calls.clone())),
    )
    .await
    .unwrap()
}

fn gated_requests() -> Vec<Request<Body>> {
    let id = ObjectId::new().to_hex();
    let json = |method: &str, uri: &str| {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"vehicleName\":\"Civic\"}"))
            .unwrap()
    };
    let empty = |method: &str, uri: &str| {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    };

    vec![
        empty("GET", "/vehicles"),
        empty("GET", "/vehicles/latest"),
        empty("GET", "/vehicles/top-rated"),
        empty("GET", &format!("/vehicles/{id}")),
        json("POST", "/vehicles"),
        json("PUT", &format!("/vehicles/{id}")),
        empty("DELETE", &format!("/vehicles/{id}")),
        empty("GET", "/bookings"),
        json("POST", "/bookings"),
    ]
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_gated_routes_return_503_without_touching_repositories() {
    let calls = Calls::default();
    let app = build_app(spawn_manager(false).await, &calls).await;

    for request in gated_requests() {
        let uri = request.uri().to_string();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert!(response.headers().contains_key(header::RETRY_AFTER), "{uri}");

        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "Database unavailable");
        assert_eq!(body["healthCheck"], "/health");
        assert!(body["message"].as_str().unwrap().contains("/health"));
    }

    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn test_gated_routes_pass_through_once_connected() {
    let calls = Calls::default();
    let app = build_app(spawn_manager(true).await, &calls).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/vehicles").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/bookings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert!(calls.count() >= 2);
}

#[tokio::test]
async fn test_root_and_health_are_never_gated() {
    let calls = Calls::default();
    let app = build_app(spawn_manager(false).await, &calls).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"server is running");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
    assert_eq!(body["reconnectAttempts"], 1);
    assert_eq!(body["lastError"]["kind"], "tls_handshake_failure");
    assert!(body["timestamp"].is_string());
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_health_when_connected_reports_zero_attempts() {
    let calls = Calls::default();
    let app = build_app(spawn_manager(true).await, &calls).await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["reconnectAttempts"], 0);
    assert!(body.get("lastError").is_none());
}

#[tokio::test]
async fn test_reconnect_acknowledges_and_resets_attempts() {
    let calls = Calls::default();
    let attempts = Calls::default();
    let control = spawn_manager_counting(false, attempts.clone()).await;
    let app = build_app(control.clone(), &calls).await;
    let mut status = control.subscribe();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reconnect")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Reconnection triggered");

    // The counter was reset, so the fresh attempt fails as attempt 1 again
    let settled = status
        .wait_for(|s| s.state == ConnectionState::Disconnected && attempts.count() == 2)
        .await
        .unwrap()
        .clone();
    assert_eq!(settled.attempts, 1);
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let calls = Calls::default();
    let app = build_app(spawn_manager(true).await, &calls).await;

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response.into_body()).await["error"], "NOT_FOUND");
}
