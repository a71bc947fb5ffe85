use mongodb::bson::{Bson, Document, oid::ObjectId};
use serde::Deserialize;
use utoipa::IntoParams;

/// Bookings are stored and served as schemaless documents.
pub type Booking = Document;

pub const BOOKINGS_COLLECTION: &str = "bookings";
pub const VEHICLES_COLLECTION: &str = "vehicles";

/// Key under which the booked vehicle is attached to a booking
pub const VEHICLE_FIELD: &str = "vehicle";

/// Fields owned by the server; ignored in request bodies
pub const SERVER_FIELDS: [&str; 3] = ["_id", "createdAt", "updatedAt"];

/// Query parameters for listing bookings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingFilter {
    /// Only bookings made by this user
    pub user_email: Option<String>,
    /// Only bookings of this vehicle (hex ObjectId)
    pub vehicle_id: Option<String>,
}

/// The booked vehicle's id, if the booking carries a usable one.
///
/// `vehicleId` is normally the hex string of the vehicle's `_id`; an
/// ObjectId value is accepted as well.
pub fn vehicle_ref(booking: &Booking) -> Option<ObjectId> {
    match booking.get("vehicleId")? {
        Bson::String(hex) => ObjectId::parse_str(hex).ok(),
        Bson::ObjectId(oid) => Some(*oid),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_vehicle_ref_accepts_hex_and_object_id() {
        let oid = ObjectId::new();
        assert_eq!(vehicle_ref(&doc! { "vehicleId": oid.to_hex() }), Some(oid));
        assert_eq!(vehicle_ref(&doc! { "vehicleId": oid }), Some(oid));
    }

    #[test]
    fn test_vehicle_ref_ignores_unusable_values() {
        assert_eq!(vehicle_ref(&doc! {}), None);
        assert_eq!(vehicle_ref(&doc! { "vehicleId": "legacy-42" }), None);
        assert_eq!(vehicle_ref(&doc! { "vehicleId": 42 }), None);
        assert_eq!(vehicle_ref(&doc! { "vehicleId": Bson::Null }), None);
    }
}
