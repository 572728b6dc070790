use std::time::{Duration, Instant};

/// Single-value TTL memoization cell.
///
/// Used by the backend client to memoize the two read-only health calls for
/// a fixed window, so a dashboard page rendering several status widgets does
/// not hammer the API. Callers wrap it in a `tokio::sync::Mutex` when shared.
pub struct TtlCache<T: Clone> {
    value: Option<T>,
    stored_at: Option<Instant>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            value: None,
            stored_at: None,
            ttl,
        }
    }

    /// Returns the memoized value only while it is still within TTL.
    pub fn get(&self) -> Option<T> {
        if self.is_fresh() {
            self.value.clone()
        } else {
            None
        }
    }

    pub fn put(&mut self, value: T) {
        self.value = Some(value);
        self.stored_at = Some(Instant::now());
    }

    pub fn invalidate(&mut self) {
        self.value = None;
        self.stored_at = None;
    }

    pub fn is_fresh(&self) -> bool {
        match (self.value.as_ref(), self.stored_at) {
            (Some(_), Some(stored_at)) => stored_at.elapsed() <= self.ttl,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn empty_cache_returns_none() {
        let cache = TtlCache::<String>::new(Duration::from_secs(30));
        assert!(cache.get().is_none());
        assert!(!cache.is_fresh());
    }

    #[test]
    fn fresh_value_is_returned() {
        let mut cache = TtlCache::new(Duration::from_secs(30));
        cache.put("healthy".to_string());

        assert_eq!(cache.get().as_deref(), Some("healthy"));
        assert!(cache.is_fresh());
    }

    #[test]
    fn value_expires_after_ttl() {
        let mut cache = TtlCache::new(Duration::from_millis(10));
        cache.put(1_u64);
        thread::sleep(Duration::from_millis(20));

        assert!(cache.get().is_none());
        assert!(!cache.is_fresh());
    }

    #[test]
    fn invalidate_discards_the_value() {
        let mut cache = TtlCache::new(Duration::from_secs(30));
        cache.put(1_u64);
        cache.invalidate();

        assert!(cache.get().is_none());
    }

    #[test]
    fn put_refreshes_the_window() {
        let mut cache = TtlCache::new(Duration::from_millis(50));
        cache.put(1_u64);
        thread::sleep(Duration::from_millis(30));
        cache.put(2_u64);
        thread::sleep(Duration::from_millis(30));

        // 60ms after the first put but only 30ms after the second.
        assert_eq!(cache.get(), Some(2));
    }
}
