use mongodb::bson::{oid::ObjectId, Document};
use serde_json::Value;

use crate::error::ApiError;

pub mod auth;
pub mod foods;
pub mod purchases;

/// Parse an opaque id path segment into the storage layer's native id type.
pub(crate) fn parse_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::bad_request(format!("invalid id: {}", id)))
}

/// Convert a request body into a BSON document. Any JSON object is
/// accepted; no fields are required.
pub(crate) fn to_document(payload: &Value) -> Result<Document, ApiError> {
    mongodb::bson::to_document(payload)
        .map_err(|_| ApiError::bad_request("expected a JSON object"))
}
