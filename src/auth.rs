use chrono::{Duration, Utc};
use cookie::Cookie;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Name of the cookie carrying the signed token.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token generation failed: {0}")]
    Generation(String),

    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Sign an arbitrary claim payload, stamping issuance and expiry.
///
/// There is no fixed claim struct: the caller's payload is taken as-is
/// (clients are expected to send at least an email field) and only
/// `iat`/`exp` are added.
pub fn generate_token(
    mut claims: Map<String, Value>,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let now = Utc::now();
    let exp = now + Duration::hours(security.jwt_expiry_hours);
    claims.insert("iat".to_string(), Value::from(now.timestamp()));
    claims.insert("exp".to_string(), Value::from(exp.timestamp()));

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify signature and expiry, returning the decoded claim payload.
pub fn decode_token(token: &str, security: &SecurityConfig) -> Result<Value, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Value>(token, &decoding_key, &validation)
        .map_err(|e| TokenError::Invalid(e.to_string()))?;

    Ok(token_data.claims)
}

/// Build the auth cookie. HttpOnly always; Secure only when configured.
pub fn token_cookie(token: &str, security: &SecurityConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token.to_owned()))
        .http_only(true)
        .secure(security.secure_cookies)
        .path("/")
        .build()
}

/// Authenticated identity extracted from the verified token, injected into
/// the request by the auth middleware.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub claims: Value,
}

impl AuthUser {
    pub fn email(&self) -> Option<&str> {
        self.claims.get("email").and_then(Value::as_str)
    }
}
