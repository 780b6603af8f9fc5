use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_id, to_document};
use crate::api::{bson_to_json, doc_to_json};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct MineQuery {
    pub email: Option<String>,
}

/// GET /foods - List foods, optionally filtered by category and price bounds.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let docs: Vec<Document> = state
        .foods
        .find(list_filter(&query), None)
        .await?
        .try_collect()
        .await?;

    Ok(Json(Value::Array(docs.into_iter().map(doc_to_json).collect())))
}

/// Price bounds are inclusive; both filters combine when present.
fn list_filter(query: &ListQuery) -> Document {
    let mut filter = Document::new();

    if let Some(category) = &query.category {
        filter.insert("category", category.as_str());
    }

    let mut price = Document::new();
    if let Some(min) = query.min_price {
        price.insert("$gte", min);
    }
    if let Some(max) = query.max_price {
        price.insert("$lte", max);
    }
    if !price.is_empty() {
        filter.insert("price", price);
    }

    filter
}

/// GET /foods/:id - Fetch a single food. A missing document serializes as
/// null rather than a 404.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let found = state.foods.find_one(doc! { "_id": id }, None).await?;

    Ok(Json(found.map(doc_to_json).unwrap_or(Value::Null)))
}

/// GET /myFoods - Foods added by the authenticated user.
///
/// The query email must equal the email in the verified claims; anything
/// else is forbidden, so a caller can never list another user's foods.
pub async fn mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<MineQuery>,
) -> Result<Json<Value>, ApiError> {
    if user.email() != query.email.as_deref() {
        return Err(ApiError::forbidden("forbidden access"));
    }

    let filter = match query.email {
        Some(email) => doc! { "addedBy.email": email },
        None => Document::new(),
    };
    let docs: Vec<Document> = state.foods.find(filter, None).await?.try_collect().await?;

    Ok(Json(Value::Array(docs.into_iter().map(doc_to_json).collect())))
}

/// POST /foods - Insert a food document. No fields are required.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(food = %payload, "creating food");

    let result = state.foods.insert_one(to_document(&payload)?, None).await?;

    Ok(Json(json!({
        "acknowledged": true,
        "insertedId": bson_to_json(result.inserted_id),
    })))
}

/// PUT /foods/:id - Set the request body's fields on the document.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let update = doc! { "$set": to_document(&payload)? };
    let result = state.foods.update_one(doc! { "_id": id }, update, None).await?;

    let upserted_count = u64::from(result.upserted_id.is_some());
    Ok(Json(json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedId": result.upserted_id.map(bson_to_json),
        "upsertedCount": upserted_count,
    })))
}

/// DELETE /foods/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let result = state.foods.delete_one(doc! { "_id": id }, None).await?;

    Ok(Json(json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count,
    })))
}
