//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::constants::{
    DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECONDS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_DATABASE_URL, DEFAULT_FACE_ENCODER_JITTERS, DEFAULT_FACE_EXTRACTION_TIMEOUT_SECONDS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, ENCODER_MODEL_ENV, LANDMARK_MODEL_ENV,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout: Duration,
    /// Rate limiting is disabled when no Redis URL is configured
    pub redis_url: Option<String>,
    /// Key rate limits on `X-Forwarded-For` / `X-Real-IP` instead of the peer address
    pub trust_proxy_headers: bool,
    pub server_host: String,
    pub server_port: u16,
    pub face_extraction_timeout: Duration,
    pub landmark_model: Option<PathBuf>,
    pub encoder_model: Option<PathBuf>,
    pub encoder_jitters: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("database_acquire_timeout", &self.database_acquire_timeout)
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("face_extraction_timeout", &self.face_extraction_timeout)
            .field("landmark_model", &self.landmark_model)
            .field("encoder_model", &self.encoder_model)
            .field("encoder_jitters", &self.encoder_jitters)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            database_acquire_timeout: Duration::from_secs(DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECONDS),
            redis_url: None,
            trust_proxy_headers: false,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            face_extraction_timeout: Duration::from_secs(DEFAULT_FACE_EXTRACTION_TIMEOUT_SECONDS),
            landmark_model: None,
            encoder_model: None,
            encoder_jitters: DEFAULT_FACE_ENCODER_JITTERS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            database_acquire_timeout: parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.database_acquire_timeout),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            trust_proxy_headers: parse_var("TRUST_PROXY_HEADERS")
                .unwrap_or(defaults.trust_proxy_headers),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            face_extraction_timeout: parse_var("FACE_EXTRACTION_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.face_extraction_timeout),
            landmark_model: env::var(LANDMARK_MODEL_ENV).ok().map(PathBuf::from),
            encoder_model: env::var(ENCODER_MODEL_ENV).ok().map(PathBuf::from),
            encoder_jitters: parse_var("FACE_ENCODER_JITTERS").unwrap_or(defaults.encoder_jitters),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse an environment variable, ignoring it (with a warning) when malformed.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring malformed environment variable");
            None
        }
    }
}
