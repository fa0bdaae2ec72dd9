use crate::config::Config;
use actix_web::{Error, body::to_bytes, http::StatusCode};
use serde_json::Value;

/// Complete settings for tests: rate limiting off, no real database behind them.
pub fn test_config() -> Config {
    test_config_with(&[])
}

/// `test_config` with some keys replaced.
pub fn test_config_with(overrides: &[(&str, &str)]) -> Config {
    Config::from_lookup(|key: &str| {
        if let Some((_, value)) = overrides.iter().find(|(k, _)| *k == key) {
            return Some(value.to_string());
        }
        let value = match key {
            "APP_ENV" => "test",
            "SECRET_KEY" => "test-secret",
            "ADMIN_USER" => "admin",
            "ADMIN_PASSWORD" => "admin-pass",
            "DB_HOST" => "localhost",
            "DB_PORT" => "3306",
            "DB_USERNAME" => "app",
            "DB_PASSWORD" => "app-pass",
            "DB_NAME" => "users_test",
            "RATE_USERS_PER_MIN" => "0",
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("test config is complete")
}

/// Status and JSON body of an error that left the app as `Err`, the way the
/// server would write it.
pub async fn error_body(err: Error) -> (StatusCode, Value) {
    let resp = err.error_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body()).await.expect("error body");
    (status, serde_json::from_slice(&bytes).expect("JSON error body"))
}
