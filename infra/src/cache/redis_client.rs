//! Redis client with connection retry and the command set the revocation
//! ledger needs: atomic insert-if-absent, existence checks and a sorted-set
//! index for time-ordered purges.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use tl_shared::config::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>;

/// Redis client sharing one multiplexed connection
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of attempts for operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the retry budget from `config`
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let max_retries = config.max_retries.max(1);
        Self::new_with_retry_config(config, max_retries, 100).await
    }

    /// Connect with a custom retry budget
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of attempts
    /// * `retry_delay_ms` - Base delay between attempts in milliseconds
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connect_timeout = Duration::from_secs(config.connection_timeout.max(1));
        let connection =
            Self::create_connection_with_retry(client, max_retries, retry_delay_ms, connect_timeout)
                .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        connect_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match tokio::time::timeout(
                connect_timeout,
                client.get_multiplexed_async_connection(),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(RedisError::from((
                    redis::ErrorKind::IoError,
                    "connection attempt timed out",
                ))),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Apply the configured key prefix
    pub fn make_key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// `SET key value NX EX ttl`, safe to retry
    ///
    /// `value` must be unique to this call. When the key already exists its
    /// value is read back: a match means an earlier attempt of this same call
    /// wrote it before its reply was lost, which still counts as an insert.
    ///
    /// # Returns
    /// * `Ok(true)` - The key was created by this call
    /// * `Ok(false)` - The key already existed and was left untouched
    pub async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<bool, InfrastructureError> {
        debug!("Setting key '{}' if absent with expiry {}s", key, expiry_seconds);

        self.execute_with_retry(|mut conn| -> RedisFuture<bool> {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move {
                let reply = redis::cmd("SET")
                    .arg(&key)
                    .arg(&value)
                    .arg("NX")
                    .arg("EX")
                    .arg(expiry_seconds)
                    .query_async::<_, Option<String>>(&mut conn)
                    .await?;
                if reply.is_some() {
                    return Ok(true);
                }

                let current = conn.get::<_, Option<String>>(&key).await?;
                Ok(current.as_deref() == Some(value.as_str()))
            })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Check whether a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        self.execute_with_retry(|mut conn| -> RedisFuture<bool> {
            let key = key.to_string();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Add a member to a sorted set with the given score
    pub async fn zadd(&self, key: &str, member: &str, score: i64) -> Result<(), InfrastructureError> {
        self.execute_with_retry(|mut conn| -> RedisFuture<()> {
            let key = key.to_string();
            let member = member.to_string();
            Box::pin(async move { conn.zadd::<_, _, _, ()>(key, member, score).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Members of a sorted set with a score strictly below `max_score`
    pub async fn zrange_below(
        &self,
        key: &str,
        max_score: i64,
    ) -> Result<Vec<String>, InfrastructureError> {
        self.execute_with_retry(|mut conn| -> RedisFuture<Vec<String>> {
            let key = key.to_string();
            let max = format!("({}", max_score);
            Box::pin(async move {
                conn.zrangebyscore::<_, _, _, Vec<String>>(key, "-inf", max)
                    .await
            })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Remove members from a sorted set
    pub async fn zrem(&self, key: &str, members: &[String]) -> Result<usize, InfrastructureError> {
        if members.is_empty() {
            return Ok(0);
        }

        self.execute_with_retry(|mut conn| -> RedisFuture<usize> {
            let key = key.to_string();
            let members = members.to_vec();
            Box::pin(async move { conn.zrem::<_, _, usize>(key, members).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Delete keys, returning how many existed
    pub async fn delete_many(&self, keys: &[String]) -> Result<usize, InfrastructureError> {
        if keys.is_empty() {
            return Ok(0);
        }

        self.execute_with_retry(|mut conn| -> RedisFuture<usize> {
            let keys = keys.to_vec();
            Box::pin(async move { conn.del::<_, usize>(keys).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let pong = self
            .execute_with_retry(|mut conn| -> RedisFuture<String> {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!("Redis health check failed: {}", e);
                InfrastructureError::Cache(e)
            })?;

        Ok(pong == "PONG")
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Transient failures worth another attempt
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL before logging it
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
