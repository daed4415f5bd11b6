//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    ACCESS_TOKEN_HOURS, DEFAULT_DATABASE_URL, DEFAULT_PERMISSIONS_PATH, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH, REFRESH_TOKEN_DAYS,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    jwt_refresh_secret: String,
    pub access_token_hours: i64,
    pub refresh_token_days: i64,
    pub api_key: Option<String>,
    pub permissions_path: String,
    pub server_host: String,
    pub server_port: u16,
    pub smtp: SmtpConfig,
}

/// SMTP transport settings. The from-address is resolved at send time
/// from the `email` settings namespace, not from here.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub use_starttls: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_refresh_secret", &"[REDACTED]")
            .field("access_token_hours", &self.access_token_hours)
            .field("refresh_token_days", &self.refresh_token_days)
            .field("permissions_path", &self.permissions_path)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET / JWT_REFRESH_SECRET are not set or are too
    /// short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = required_secret("JWT_SECRET");
        let jwt_refresh_secret = required_secret("JWT_REFRESH_SECRET");

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_refresh_secret,
            access_token_hours: env::var("EXPIRES_IN_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(ACCESS_TOKEN_HOURS),
            refresh_token_days: env::var("EXPIRES_REFRESH_IN_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(REFRESH_TOKEN_DAYS),
            api_key: env::var("API_KEY").ok(),
            permissions_path: env::var("PERMISSIONS_PATH")
                .unwrap_or_else(|_| DEFAULT_PERMISSIONS_PATH.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            smtp: SmtpConfig::from_env(),
        }
    }

    /// Get access-token secret bytes for signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get refresh-token secret bytes for signing/verification.
    pub fn jwt_refresh_secret_bytes(&self) -> &[u8] {
        self.jwt_refresh_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl SmtpConfig {
    fn from_env() -> Self {
        Self {
            host: env::var("SMTP_HOST").ok(),
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: env::var("SMTP_USER").unwrap_or_default(),
            password: env::var("SMTP_PASS").unwrap_or_default(),
            use_starttls: env::var("SMTP_TLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }

    /// SMTP is optional in development; unset host means log-only delivery.
    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

fn required_secret(name: &str) -> String {
    let value = env::var(name).unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            // Development mode: use default but warn
            tracing::warn!("{} not set, using insecure default for development", name);
            format!("dev-{}-minimum-32-characters!!!!!!", name.to_lowercase())
        } else {
            // Production mode: panic
            panic!("{} environment variable must be set in production", name);
        }
    });

    if value.len() < MIN_JWT_SECRET_LENGTH {
        panic!("{} must be at least {} characters long", name, MIN_JWT_SECRET_LENGTH);
    }

    value
}
