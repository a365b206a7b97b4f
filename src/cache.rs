use std::hash::Hash;

/// Describes what a cache is.
///
/// [`crate::LinkedHashMap`] is one: `insert` pushes to the back, evicting the
/// front entry when a bounded map is full, and reads move the entry they find
/// to the back.
pub trait Cache<K, V>
where
    K: Eq + Hash,
{
    /// Push a new element into the Cache, which may evict the oldest item if
    /// the cache is at capacity. Returns the previous value in the cache if the
    /// key already had a value there.
    fn insert(&mut self, k: K, v: V) -> Option<V>;

    /// Get an item from the Cache. This also makes the item the youngest item
    /// in the cache and the least eligible for eviction.
    fn get<'a>(&'a mut self, k: &K) -> Option<&'a V>;

    /// Get a mutable reference to an item from the cache. This also makes the
    /// item the youngest item in the cache and the least eligible for eviction.
    fn get_mut<'a>(&'a mut self, k: &K) -> Option<&'a mut V>;

    /// Removes an item, returning whatever was there.
    fn remove(&mut self, k: &K) -> Option<V>;

    /// Clears the cache entirely.
    fn clear(&mut self);

    /// The number of items stored in the cache right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::Cache;
    use crate::LinkedHashMap;

    /// Fills any cache with `0..n`, keyed and valued the same.
    fn fill<C: Cache<u64, u64>>(cache: &mut C, n: u64) {
        for i in 0..n {
            cache.insert(i, i);
        }
    }

    #[test]
    fn test_cache() {
        let mut cache: LinkedHashMap<u64, u64> = LinkedHashMap::with_capacity(5);

        // fill up the cache
        fill(&mut cache, 5);
        assert_eq!(5, Cache::len(&cache));

        // push one more thing onto the cache, this will evict "0"
        assert_eq!(None, Cache::insert(&mut cache, 5, 5));
        // do it twice, just for good measure
        assert_eq!(Some(5), Cache::insert(&mut cache, 5, 6));
        assert_eq!(5, Cache::len(&cache));

        // verify the "1" is still there, which should make it the youngest item
        assert!(Cache::get(&mut cache, &1).is_some());

        // verify that "2" is now the oldest item and the next to be evicted by
        // putting 6 into the cache
        assert_eq!(None, Cache::insert(&mut cache, 6, 6));
        assert_eq!(None, Cache::get(&mut cache, &2));

        assert_eq!(Some(&6), Cache::get(&mut cache, &5));
        assert_eq!(None, Cache::get(&mut cache, &7));
    }

    #[test]
    fn readme_snippet() {
        let mut cache: LinkedHashMap<usize, String> =
            LinkedHashMap::with_capacity(5);

        cache.insert(0, "Put".to_owned());
        cache.insert(1, "large".to_owned());
        cache.insert(2, "things".to_owned());
        cache.insert(3, "in".to_owned());
        cache.insert(4, "memory".to_owned());
        cache.insert(5, "but not too many".to_owned());

        assert_eq!(None, Cache::get(&mut cache, &0));
        assert_eq!(Some("things".to_owned()), Cache::remove(&mut cache, &2));

        Cache::clear(&mut cache);
        assert!(Cache::is_empty(&cache));
    }
}
