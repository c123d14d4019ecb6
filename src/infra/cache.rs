//! Redis-backed fixed-window counters for rate limiting.

use once_cell::sync::Lazy;
use redis::{aio::ConnectionManager, Client, RedisError, Script};

use crate::config::CACHE_PREFIX_RATE_LIMIT;
use crate::errors::{AppError, AppResult};

/// Increment and arm the window expiry in one atomic step. A counter left
/// without a TTL gets one on its next hit.
const RATE_LIMIT_SCRIPT: &str = r"
local count = redis.call('INCR', KEYS[1])
if redis.call('TTL', KEYS[1]) < 0 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return count
";

static RATE_LIMIT: Lazy<Script> = Lazy::new(|| Script::new(RATE_LIMIT_SCRIPT));

/// Redis cache wrapper with a managed, auto-reconnecting connection.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");
        Ok(Self { connection })
    }

    /// Count one request against `identifier` in the current window.
    ///
    /// Returns `(current_count, is_allowed)`. The window starts with the
    /// first request and the key expires with it.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = rate_limit_key(identifier);
        let mut conn = self.connection.clone();

        let count: u64 = RATE_LIMIT
            .key(&key)
            .arg(window_seconds)
            .invoke_async(&mut conn)
            .await
            .map_err(cache_error)?;

        Ok((count, count <= max_requests))
    }
}

fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier)
}

/// Convert Redis error to AppError
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}
