use crate::request::Payload;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Key/value store with TTL.
///
/// The gateway assumes nothing stronger than eventual visibility of a prior
/// `set`; atomicity and cross-process consistency are the backend's
/// business. No delete or evict operation is consumed.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Fetch an unexpired value, or `None` when absent.
    async fn get(&self, key: &str) -> Option<Payload>;

    /// Store a value for `ttl`.
    async fn set(&self, key: &str, value: Payload, ttl: Duration);
}

struct Entry {
    value: Payload,
    created_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// In-process cache backend with lazy expiry and oldest-first eviction.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    max_entries: usize,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .filter(|e| !e.is_expired())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_if_needed(&self, entries: &mut HashMap<String, Entry>) {
        entries.retain(|_, e| !e.is_expired());
        while entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.created_at)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    entries.remove(&k);
                }
                None => break,
            }
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Payload> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(entry) = entries.get(key) {
            if entry.is_expired() {
                entries.remove(key);
                return None;
            }
            return Some(entry.value.clone());
        }
        None
    }

    async fn set(&self, key: &str, value: Payload, ttl: Duration) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.evict_if_needed(&mut entries);
        entries.insert(
            key.to_string(),
            Entry {
                value,
                created_at: Instant::now(),
                ttl,
            },
        );
    }
}

/// No-op backend for disabling caching entirely.
#[derive(Default)]
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResultCache for NullCache {
    async fn get(&self, _key: &str) -> Option<Payload> {
        None
    }

    async fn set(&self, _key: &str, _value: Payload, _ttl: Duration) {}
}
