use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use cookie::Cookie;

use crate::auth::{self, AuthUser};
use crate::config;
use crate::error::ApiError;

/// JWT authentication gate.
///
/// Pulls the token from the request cookie, verifies it, and injects the
/// decoded claims for the handler. Requests without a valid token are
/// rejected before any database call is made.
pub async fn verify_token(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = token_from_headers(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Unauthorized access"))?;

    let claims = auth::decode_token(&token, &config::config().security).map_err(|e| {
        tracing::debug!("rejected token: {}", e);
        ApiError::unauthorized("Unauthorized access")
    })?;

    request.extensions_mut().insert(AuthUser { claims });

    Ok(next.run(request).await)
}

/// Find the auth cookie among the request's Cookie headers.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == auth::TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}
