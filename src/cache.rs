use std::sync::Arc;

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::error::ImportResult;
use crate::track::TrackRecord;

/// Cached search results expire after 24 hours.
pub const CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Key/value store with per-key expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> ImportResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> ImportResult<()>;
    async fn expire(&self, key: &str, seconds: u64) -> ImportResult<()>;
}

/// Redis-backed store sharing one multiplexed connection for the whole run.
pub struct RedisCache {
    conn: redis::aio::MultiplexedConnection,
}

impl RedisCache {
    pub async fn connect(redis_url: &str) -> ImportResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> ImportResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> ImportResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await?;

        Ok(())
    }

    async fn expire(&self, key: &str, seconds: u64) -> ImportResult<()> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        conn.expire::<_, ()>(key, seconds).await?;

        Ok(())
    }
}

/// Cache key for a track. The format is shared with previously written
/// entries, so field values are used raw.
pub fn cache_key(track: &TrackRecord) -> String {
    format!(
        "youtube-data-for-{}-{}",
        track.artist_names, track.track_name
    )
}

/// Maps track records onto cache entries.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn CacheStore>,
}

impl CacheGateway {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub async fn lookup(&self, track: &TrackRecord) -> ImportResult<Option<String>> {
        self.store.get(&cache_key(track)).await
    }

    /// Write the value and (re)arm its expiry to the full TTL.
    pub async fn store(&self, track: &TrackRecord, value: &str) -> ImportResult<()> {
        let key = cache_key(track);
        self.store.set(&key, value).await?;
        self.store.expire(&key, CACHE_TTL_SECS).await
    }
}
