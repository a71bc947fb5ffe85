use mongodb::bson::Document;
use serde::Deserialize;
use strum::EnumString;
use utoipa::IntoParams;

/// Vehicles are stored and served as opaque documents
pub type Vehicle = Document;

/// Collection holding vehicles
pub const VEHICLES_COLLECTION: &str = "vehicles";

/// Collection holding bookings, aggregated for the top-rated ranking
pub const BOOKINGS_COLLECTION: &str = "bookings";

/// Fields owned by the server; ignored when supplied by clients
pub const SERVER_FIELDS: [&str; 3] = ["_id", "createdAt", "updatedAt"];

/// Number of vehicles returned by the latest and top-rated listings by default
pub const DEFAULT_SHOWCASE_LIMIT: i64 = 6;

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Lenient parse; anything unrecognised sorts ascending
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// Query filters for listing vehicles
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VehicleFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Exact location match
    pub location: Option<String>,
    /// Lower bound on pricePerDay
    pub min_price: Option<f64>,
    /// Upper bound on pricePerDay
    pub max_price: Option<f64>,
    /// `price`, `date`/`newest`, or any field name
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    pub sort_order: Option<String>,
    /// Maximum number of vehicles
    pub limit: Option<i64>,
}

impl VehicleFilter {
    /// Stored field to sort on, if any
    pub fn sort_field(&self) -> Option<&str> {
        match self.sort_by.as_deref()?.trim() {
            "" => None,
            "price" => Some("pricePerDay"),
            "date" | "newest" => Some("createdAt"),
            other => Some(other),
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::parse_lenient(self.sort_order.as_deref())
    }
}

/// `?limit=N` for the showcase listings
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Number of vehicles, default 6
    pub limit: Option<i64>,
}

impl LimitQuery {
    pub fn or_default(self) -> i64 {
        positive(self.limit).unwrap_or(DEFAULT_SHOWCASE_LIMIT)
    }
}

/// Non-positive limits mean "not given"
pub fn positive(limit: Option<i64>) -> Option<i64> {
    limit.filter(|n| *n > 0)
}

/// Booking total for one vehicle, as produced by the ranking aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCount {
    pub vehicle_id: String,
    pub count: i64,
}
