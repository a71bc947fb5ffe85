//! Conversion between stored documents and the JSON shape served over HTTP.
//!
//! ObjectIds become their 24-character hex string and dates become RFC 3339
//! strings; every other value uses relaxed extended JSON.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

use crate::common::{DatabaseError, DatabaseResult};

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(key, value)| (key, bson_to_json(value))).collect())
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Convert a JSON object request body into a document.
///
/// Extended JSON (`{"$oid": ...}`, `{"$date": ...}`) is honoured.
pub fn json_to_document(value: Value) -> DatabaseResult<Document> {
    match Bson::try_from(value) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(DatabaseError::Conversion(format!(
            "expected a JSON object, got {:?}",
            other.element_type()
        ))),
        Err(e) => Err(DatabaseError::Conversion(e.to_string())),
    }
}

/// Convert a JSON object into a document, dropping `reserved` top-level keys.
///
/// Used for write bodies where identifiers and timestamps are server-owned.
pub fn object_to_document(mut fields: Map<String, Value>, reserved: &[&str]) -> DatabaseResult<Document> {
    for key in reserved {
        fields.remove(*key);
    }
    json_to_document(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{DateTime, doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_document_to_json_flattens_ids_and_dates() {
        let id = ObjectId::parse_str("65f1c0ffee00000000000001").unwrap();
        let created = DateTime::from_millis(0);
        let doc = doc! {
            "_id": id,
            "vehicleName": "Corolla",
            "pricePerDay": 45.5,
            "seats": 5,
            "createdAt": created,
            "owner": { "ref": id },
            "tags": ["eco", id],
        };

        let value = document_to_json(doc);

        assert_eq!(value["_id"], json!("65f1c0ffee00000000000001"));
        assert_eq!(value["vehicleName"], json!("Corolla"));
        assert_eq!(value["pricePerDay"], json!(45.5));
        assert_eq!(value["seats"], json!(5));
        assert_eq!(value["createdAt"], json!("1970-01-01T00:00:00Z"));
        assert_eq!(value["owner"]["ref"], json!("65f1c0ffee00000000000001"));
        assert_eq!(value["tags"][1], json!("65f1c0ffee00000000000001"));
    }

    #[test]
    fn test_json_to_document() {
        let doc = json_to_document(json!({ "category": "suv", "pricePerDay": 80 })).unwrap();
        assert_eq!(doc.get_str("category").unwrap(), "suv");
        assert!(doc.contains_key("pricePerDay"));
    }

    #[test]
    fn test_object_to_document_drops_reserved_fields() {
        let fields = json!({ "_id": "client-id", "createdAt": "yesterday", "model": "Civic" });
        let Value::Object(fields) = fields else { unreachable!() };

        let doc = object_to_document(fields, &["_id", "createdAt", "updatedAt"]).unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_str("model").unwrap(), "Civic");
    }

    #[test]
    fn test_json_to_document_rejects_non_objects() {
        assert!(matches!(
            json_to_document(json!([1, 2, 3])),
            Err(DatabaseError::Conversion(_))
        ));
    }
}
