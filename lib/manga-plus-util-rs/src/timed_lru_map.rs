use lru::LruCache;
use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::Duration;
use std::time::Instant;

/// A LRU map whose entries are valid for only a certian time period.
///
/// Unlike a cache, values are inserted explicitly.
/// Expired entries are removed lazily, when they are looked up.
pub struct TimedLruMap<K, V> {
    map: std::sync::Mutex<LruCache<K, Entry<V>>>,
    valid_for: Duration,
}

impl<K, V> TimedLruMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Make a new [`TimedLruMap`].
    ///
    /// An entry older than or exactly `valid_for` is treated as missing.
    pub fn new(capacity: NonZeroUsize, valid_for: Duration) -> Self {
        Self {
            map: std::sync::Mutex::new(LruCache::new(capacity)),
            valid_for,
        }
    }

    /// Insert a value, replacing and refreshing any previous one.
    ///
    /// Returns the replaced entry, or the least recently used entry if the map was full.
    pub fn insert(&self, key: K, value: V) -> Option<(K, V)> {
        let entry = Entry {
            created: Instant::now(),
            value,
        };

        self.map
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key, entry)
            .map(|(key, entry)| (key, entry.value))
    }

    /// Get a clone of a live value.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut map = self.map.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match map.get(key) {
            Some(entry) if entry.created.elapsed() < self.valid_for => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            map.pop(key);
        }

        None
    }

    /// Remove an entry.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop(key)
            .map(|entry| entry.value)
    }

    /// The number of stored entries, including ones that expired but were not looked up yet.
    pub fn len(&self) -> usize {
        self.map.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns true if there are no stored entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> std::fmt::Debug for TimedLruMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedLruMap")
            .field("valid_for", &self.valid_for)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Entry<V> {
    created: Instant,
    value: V,
}

#[cfg(test)]
mod test {
    use super::*;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn insert_get() {
        let map = TimedLruMap::new(capacity(4), Duration::from_secs(60));
        assert!(map.insert(String::from("a"), 1).is_none());
        assert_eq!(map.get("a"), Some(1));
        assert_eq!(map.get("b"), None);

        map.insert(String::from("a"), 2);
        assert_eq!(map.get("a"), Some(2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn evicts_least_recently_used() {
        let map = TimedLruMap::new(capacity(2), Duration::from_secs(60));
        map.insert("a", 1);
        map.insert("b", 2);

        // Touch "a" so "b" is the oldest.
        assert_eq!(map.get("a"), Some(1));

        let evicted = map.insert("c", 3);
        assert_eq!(evicted, Some(("b", 2)));
        assert_eq!(map.get("b"), None);
        assert_eq!(map.get("a"), Some(1));
        assert_eq!(map.get("c"), Some(3));
    }

    #[test]
    fn expired_entries_are_dropped() {
        let map = TimedLruMap::new(capacity(2), Duration::ZERO);
        map.insert("a", 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), None);
        assert!(map.is_empty());
    }

    #[test]
    fn remove() {
        let map = TimedLruMap::new(capacity(2), Duration::from_secs(60));
        map.insert("a", 1);
        assert_eq!(map.remove("a"), Some(1));
        assert_eq!(map.remove("a"), None);
    }
}
