//! Response cache for the API layer
//!
//! An in-process LRU with per-entry TTL, keyed by `endpoint:url`. Expired
//! entries are dropped on read, so no sweeper task is needed.

use crate::error::{Error, Result};
use lru::LruCache;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// A response as stored in the cache: status code plus JSON body
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// HTTP status code
    pub status: u16,

    /// JSON body
    pub body: Value,
}

struct CacheSlot {
    response: CachedResponse,
    inserted: Instant,
}

/// LRU + TTL cache for endpoint responses
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CacheSlot>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache holding up to `capacity` entries for `ttl` each
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| Error::Other("cache capacity must be greater than zero".to_string()))?;

        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        })
    }

    /// Cache key for an endpoint + URL pair
    pub fn key(endpoint: &str, url: &str) -> String {
        format!("{}:{}", endpoint, url)
    }

    /// Look up a fresh entry, evicting it if the TTL has passed
    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(slot) if slot.inserted.elapsed() < self.ttl => {
                debug!("Cache hit for {}", key);
                Some(slot.response.clone())
            }
            Some(_) => {
                debug!("Cache entry for {} expired", key);
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    /// Store a response under a key
    pub async fn insert(&self, key: String, response: CachedResponse) {
        let mut entries = self.entries.lock().await;
        entries.put(
            key,
            CacheSlot {
                response,
                inserted: Instant::now(),
            },
        );
    }
}
