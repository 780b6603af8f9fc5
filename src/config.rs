use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; credentials ride in the URI.
    pub uri: String,
    pub food_db: String,
    pub purchase_db: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub cors_origin: String,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_parsed("PORT", 5000),
            database: DatabaseConfig {
                uri: env_or("MONGODB_URI", "mongodb://localhost:27017"),
                food_db: env_or("FOOD_DB", "feastlyDB"),
                purchase_db: env_or("PURCHASE_DB", "purchaseDB"),
            },
            security: SecurityConfig {
                // No default: token issuance and verification refuse an empty secret
                jwt_secret: env_or("JWT_SECRET", ""),
                jwt_expiry_hours: env_parsed("JWT_EXPIRY_HOURS", 24),
                cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
                secure_cookies: env_parsed("SECURE_COOKIES", false),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
