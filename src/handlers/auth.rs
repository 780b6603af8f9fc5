use axum::{http::header::SET_COOKIE, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth;
use crate::config;
use crate::error::ApiError;

/// POST /jwt - Sign the request payload as a token and set the auth cookie.
///
/// The payload becomes the claim set as-is; there is no credential check.
/// Clients are expected to send at least an email field, which the guarded
/// routes later cross-check against their query.
pub async fn issue(Json(payload): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let claims = match payload {
        Value::Object(map) => map,
        _ => return Err(ApiError::bad_request("expected a JSON object")),
    };

    let security = &config::config().security;
    let token =
        auth::generate_token(claims, security).map_err(|e| ApiError::internal(e.to_string()))?;
    let cookie = auth::token_cookie(&token, security);

    Ok((
        [(SET_COOKIE, cookie.to_string())],
        Json(json!({ "success": true })),
    ))
}
