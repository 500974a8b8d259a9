//! In-process TTL caching for the filter-option endpoints.
//!
//! Filter options (distinct years, genre and country names, choice lists)
//! change rarely but are requested on every filter-panel render, so each
//! resource's option payload is cached for one hour. Writes to the
//! underlying tables do not invalidate the cache; staleness up to the TTL
//! is accepted.

use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

/// Cache lifetime for filter-option payloads.
pub const FILTER_OPTIONS_TTL: Duration = Duration::from_secs(60 * 60);

/// A single cached value with an expiry instant.
struct Entry {
    value: Value,
    expires_at: Instant,
}

/// One cache slot holding a JSON payload until its TTL elapses.
pub struct TtlCell {
    ttl: Duration,
    slot: RwLock<Option<Entry>>,
}

impl TtlCell {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached value if present and not expired.
    pub async fn get(&self) -> Option<Value> {
        let guard = self.slot.read().await;
        match guard.as_ref() {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Store a fresh value, restarting the TTL clock.
    pub async fn put(&self, value: Value) {
        let mut guard = self.slot.write().await;
        *guard = Some(Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        });
    }
}

/// Per-resource cells for the four filter-option endpoints.
pub struct FilterOptionsCache {
    pub movies: TtlCell,
    pub people: TtlCell,
    pub ratings: TtlCell,
    pub reviews: TtlCell,
}

impl FilterOptionsCache {
    pub fn new() -> Self {
        Self {
            movies: TtlCell::new(FILTER_OPTIONS_TTL),
            people: TtlCell::new(FILTER_OPTIONS_TTL),
            ratings: TtlCell::new(FILTER_OPTIONS_TTL),
            reviews: TtlCell::new(FILTER_OPTIONS_TTL),
        }
    }
}

impl Default for FilterOptionsCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_cell_misses() {
        let cell = TtlCell::new(Duration::from_secs(60));
        assert!(cell.get().await.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_hits() {
        let cell = TtlCell::new(Duration::from_secs(60));
        cell.put(json!({"years": [1999, 2001]})).await;
        assert_eq!(cell.get().await, Some(json!({"years": [1999, 2001]})));
    }

    #[tokio::test]
    async fn test_expired_entry_misses() {
        let cell = TtlCell::new(Duration::from_millis(10));
        cell.put(json!(1)).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cell.get().await.is_none());
    }

    #[tokio::test]
    async fn test_put_refreshes_expiry() {
        let cell = TtlCell::new(Duration::from_millis(50));
        cell.put(json!("old")).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        cell.put(json!("new")).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cell.get().await, Some(json!("new")));
    }
}
