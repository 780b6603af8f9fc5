//! Conversion from stored BSON documents to the public wire format.
//!
//! Identifiers are opaque to clients: `ObjectId`s are rendered as plain hex
//! strings rather than extended-JSON `{"$oid": ...}` wrappers, and datetimes
//! as RFC 3339 strings.

use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// Convert a document to its response JSON.
pub fn doc_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
}

pub fn bson_to_json(bson: Bson) -> Value {
    match bson {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Bson::Document(doc) => doc_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
