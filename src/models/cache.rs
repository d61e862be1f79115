use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl_seconds: i64) -> Self {
        Self {
            value,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Response cache keyed by the canonical request key. Expiry is checked
/// lazily on read; a stale entry stays in the map until overwritten.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry<Value>>,
    ttl_seconds: i64,
}

impl ResponseCache {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_seconds,
        }
    }

    /// Returns the stored value only while the entry is fresh.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Overwrites any existing entry for `key` with a fresh timestamp.
    pub fn put(&self, key: &str, value: Value) -> Value {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value.clone(), self.ttl_seconds));
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_write_is_visible() {
        let cache = ResponseCache::new(300);
        cache.put("standings/2024", json!({"MRData": {"series": "f1"}}));
        assert_eq!(
            cache.get("standings/2024"),
            Some(json!({"MRData": {"series": "f1"}}))
        );
    }

    #[test]
    fn expired_entry_reads_as_absent() {
        let cache = ResponseCache::new(-1);
        cache.put("laps/2024", json!([1, 2, 3]));
        assert_eq!(cache.get("laps/2024"), None);
        // Expiry is time-based, not read-count-based.
        assert_eq!(cache.get("laps/2024"), None);
    }

    #[test]
    fn put_overwrites_existing_entry() {
        let cache = ResponseCache::new(300);
        cache.put("k", json!("old"));
        cache.put("k", json!("new"));
        assert_eq!(cache.get("k"), Some(json!("new")));
    }

    #[test]
    fn missing_key_is_a_miss() {
        let cache = ResponseCache::new(300);
        assert_eq!(cache.get("never-stored"), None);
    }

    #[test]
    fn entry_with_positive_ttl_is_not_expired() {
        let entry = CacheEntry::new(1u32, 60);
        assert!(!entry.is_expired());
    }
}
