use axum::{
    extract::{Path, Query, State},
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_id, to_document};
use crate::api::{bson_to_json, doc_to_json};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub email: Option<String>,
}

/// GET /purchase - List purchases, optionally filtered by buyer email.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let filter = match query.email {
        Some(email) => doc! { "buyerEmail": email },
        None => Document::new(),
    };
    let docs: Vec<Document> = state.purchases.find(filter, None).await?.try_collect().await?;

    Ok(Json(Value::Array(docs.into_iter().map(doc_to_json).collect())))
}

/// POST /purchase - Insert a purchase record.
///
/// No cross-check against food existence or price; the record is stored
/// exactly as sent.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(purchase = %payload, "creating purchase");

    let result = state
        .purchases
        .insert_one(to_document(&payload)?, None)
        .await?;

    Ok(Json(json!({
        "acknowledged": true,
        "insertedId": bson_to_json(result.inserted_id),
    })))
}

/// DELETE /purchase/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let result = state.purchases.delete_one(doc! { "_id": id }, None).await?;

    Ok(Json(json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count,
    })))
}
