//! Response cache with time-to-live expiration.
//!
//! Expired entries are only removed when a lookup finds them stale; there is
//! no sweeper, so memory grows with the number of distinct requests.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::domain::entities::{GeneratedPrompt, PromptRequest};
use crate::domain::value_objects::{StyleFragments, TargetModel};

/// A cached render
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: GeneratedPrompt,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        // A clock that went backwards counts as age zero
        let age = (now - self.created_at).to_std().unwrap_or_default();
        age < ttl
    }
}

#[derive(Serialize)]
struct NormalizedRequest<'a> {
    idea: &'a str,
    model: TargetModel,
    fragments: &'a StyleFragments,
}

/// Deterministic key for a request: SHA-256 of its normalized JSON form.
///
/// Fragments are resolved first, so omitting a fragment and passing its
/// default produce the same key.
pub fn cache_key(request: &PromptRequest, fragments: &StyleFragments) -> String {
    let normalized = NormalizedRequest {
        idea: &request.idea,
        model: request.model,
        fragments,
    };
    // Serializing plain strings and a unit enum cannot fail
    let bytes = serde_json::to_vec(&normalized).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}

pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`, evicting the entry if it has expired.
    pub async fn get(&self, key: &str, now: DateTime<Utc>) -> Option<GeneratedPrompt> {
        let mut guard = self.entries.lock().await;
        match guard.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl) => Some(entry.value.clone()),
            Some(_) => {
                guard.remove(key);
                tracing::debug!(key = %key, "Evicted expired cache entry");
                None
            }
            None => None,
        }
    }

    /// Store a value, overwriting any previous entry.
    pub async fn insert(&self, key: String, value: GeneratedPrompt, now: DateTime<Utc>) {
        let entry = CacheEntry {
            value,
            created_at: now,
        };
        self.entries.lock().await.insert(key, entry);
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
