use super::{End, Entry};
use crate::{
    cache::Cache,
    comparator::{Comparator, Equality},
    linked_list::{self, LinkedList, NodeHandle},
};
use log::trace;
use std::{
    borrow::Borrow,
    collections::{hash_map::RandomState, HashMap},
    fmt,
    hash::{BuildHasher, Hash},
    mem,
};

/// A [`HashMap`] from keys to handles into an arena-backed linked list of
/// entries, so that entries can be looked up in O(1) and iterated over in
/// insertion/access order.
///
/// With a non-zero capacity the map behaves like a cache: inserting a new key
/// into a full map first evicts the entry at the end opposite the insertion.
/// [`push_back`](Self::push_back) evicts from the front and
/// [`push_front`](Self::push_front) evicts from the back. [`get`](Self::get)
/// moves the entry it finds to the back, so a map fed with `push_back` keeps
/// the most recently touched entries and drops the oldest ones.
///
/// Capacity, comparator and hasher are fixed when the map is constructed.
/// Maps built without a comparator match values with `PartialEq`; maps built
/// with one use it alone, so the value type needs no equality of its own.
pub struct LinkedHashMap<K, V, S = RandomState>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    index: HashMap<K, NodeHandle, S>,
    order: LinkedList<Entry<K, V>>,
    capacity: usize,
    eq: Equality<V>,
}

/// Iterates over a [`LinkedHashMap`] front to back, or back to front via
/// [`Iterator::rev`].
pub struct LinkedHashMapIter<'a, K, V> {
    inner: linked_list::Iter<'a, Entry<K, V>>,
}

impl<K, V> LinkedHashMap<K, V, RandomState>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    /// An empty map with no capacity limit.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// An empty map holding at most `capacity` entries; zero means unbounded.
    pub fn with_capacity(capacity: usize) -> Self {
        LinkedHashMap::with_capacity_and_hash_builder(
            capacity,
            Default::default(),
        )
    }
}

impl<K, V> LinkedHashMap<K, V, RandomState>
where
    K: Eq + Hash + Clone,
{
    /// Like [`with_capacity`](Self::with_capacity), but
    /// [`contains_value`](Self::contains_value) compares values with `cmp`.
    pub fn with_capacity_and_comparator(
        capacity: usize,
        cmp: Comparator<V>,
    ) -> Self {
        LinkedHashMap::with_capacity_and_comparator_and_hash_builder(
            capacity,
            cmp,
            Default::default(),
        )
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
    S: BuildHasher,
{
    pub fn with_capacity_and_hash_builder(
        capacity: usize,
        hash_builder: S,
    ) -> Self {
        Self::build(capacity, Equality::natural(), hash_builder)
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    pub fn with_capacity_and_comparator_and_hash_builder(
        capacity: usize,
        cmp: Comparator<V>,
        hash_builder: S,
    ) -> Self {
        Self::build(capacity, Equality::Custom(cmp), hash_builder)
    }

    fn build(capacity: usize, eq: Equality<V>, hash_builder: S) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            order: LinkedList::with_capacity(capacity),
            capacity,
            eq,
        }
    }

    /// The most entries this map will hold, or zero if it is unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Drops every entry. Buffers are kept for reuse.
    pub fn clear(&mut self) {
        trace!("clearing linked map of {} entries", self.len());
        self.index.clear();
        self.order.clear();

        #[cfg(test)]
        {
            assert_eq!(0, self.len());
            self.continuity_test();
        }
    }

    /// Same as [`push_back`](Self::push_back).
    pub fn push(&mut self, k: K, v: V) -> Option<V> {
        self.push_back(k, v)
    }

    /// Associates `v` with `k` and moves the entry to the front, returning the
    /// value previously stored under `k`. If `k` is new and the map is full,
    /// the back entry is evicted first.
    pub fn push_front(&mut self, k: K, v: V) -> Option<V> {
        self.push_at(End::Front, k, v)
    }

    /// Associates `v` with `k` and moves the entry to the back, returning the
    /// value previously stored under `k`. If `k` is new and the map is full,
    /// the front entry is evicted first.
    pub fn push_back(&mut self, k: K, v: V) -> Option<V> {
        self.push_at(End::Back, k, v)
    }

    fn push_at(&mut self, end: End, k: K, v: V) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len();

        if let Some(&node) = self.index.get(&k) {
            // update the entry in place; its handle doesn't change
            let previous = self
                .order
                .get_mut(node)
                .map(|entry| mem::replace(&mut entry.value, v));
            self.move_to(end, node);

            #[cfg(test)]
            {
                assert_eq!(original_len, self.len());
                self.continuity_test();
            }

            return previous;
        }

        if self.capacity != 0 && self.len() >= self.capacity {
            // make room before linking so len never passes capacity
            let evicted = self.pop_at(end.opposite());
            trace!(
                "linked map at capacity {}, evicted {:?} entry: {}",
                self.capacity,
                end.opposite(),
                evicted.is_some()
            );
        }

        let entry = Entry {
            key: k.clone(),
            value: v,
        };
        let node = match end {
            End::Front => self.order.push_front(entry),
            End::Back => self.order.push_back(entry),
        };
        self.index.insert(k, node);

        #[cfg(test)]
        {
            if self.capacity != 0 {
                assert!(self.len() <= self.capacity);
            }
            self.continuity_test();
        }

        None
    }

    /// Same as [`poll_front`](Self::poll_front).
    pub fn poll(&mut self) -> Option<(K, V)> {
        self.poll_front()
    }

    /// Removes and returns the front entry.
    pub fn poll_front(&mut self) -> Option<(K, V)> {
        self.pop_at(End::Front)
    }

    /// Removes and returns the back entry.
    pub fn poll_back(&mut self) -> Option<(K, V)> {
        self.pop_at(End::Back)
    }

    fn pop_at(&mut self, end: End) -> Option<(K, V)> {
        let entry = match end {
            End::Front => self.order.pop_front(),
            End::Back => self.order.pop_back(),
        }?;
        self.index.remove(&entry.key);

        #[cfg(test)]
        self.continuity_test();

        Some((entry.key, entry.value))
    }

    /// Same as [`peek_front`](Self::peek_front).
    pub fn peek(&self) -> Option<(&K, &V)> {
        self.peek_front()
    }

    /// The front entry, without touching the order.
    pub fn peek_front(&self) -> Option<(&K, &V)> {
        self.entry_at(self.order.front())
    }

    /// The back entry, without touching the order.
    pub fn peek_back(&self) -> Option<(&K, &V)> {
        self.entry_at(self.order.back())
    }

    fn entry_at(&self, node: Option<NodeHandle>) -> Option<(&K, &V)> {
        node.and_then(|node| self.order.get(node))
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Removes `k`, returning its value. Other entries keep their positions.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(test)]
        let original_len = self.len();

        let node = self.index.remove(k)?;
        let removed = self.order.remove_node(node);

        #[cfg(test)]
        {
            assert_eq!(original_len - 1, self.len());
            self.continuity_test();
        }

        Some(removed.value)
    }

    /// Looks up `k` and, if it is there, moves its entry to the back. A read
    /// never evicts anything.
    pub fn get<Q>(&mut self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.touch(k)?;
        self.order.get(node).map(|entry| &entry.value)
    }

    /// Mutable [`get`](Self::get); also moves the entry to the back.
    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.touch(k)?;
        self.order.get_mut(node).map(|entry| &mut entry.value)
    }

    /// [`get`](Self::get) that hands back a copy of the value, or `default`
    /// when `k` is missing.
    pub fn get_or<Q>(&mut self, k: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(k).cloned().unwrap_or(default)
    }

    fn touch<Q>(&mut self, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = *self.index.get(k)?;
        self.move_to(End::Back, node);

        #[cfg(test)]
        self.continuity_test();

        Some(node)
    }

    fn move_to(&mut self, end: End, node: NodeHandle) {
        match end {
            End::Front => self.order.move_to_front(node),
            End::Back => self.order.move_to_back(node),
        }
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(k)
    }

    /// Whether any entry holds a value equal to `v`. Uses the comparator the
    /// map was built with, or `==` without one. O(n).
    pub fn contains_value(&self, v: &V) -> bool {
        self.order.iter().any(|entry| self.eq.equal(&entry.value, v))
    }

    /// Entries front to back. Call `.rev()` for back to front.
    pub fn iter(&self) -> LinkedHashMapIter<'_, K, V> {
        LinkedHashMapIter {
            inner: self.order.iter(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Calls `cb` on each entry front to back until it returns `false`.
    pub fn iterate<F>(&self, mut cb: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.iter() {
            if !cb(k, v) {
                return;
            }
        }
    }

    /// Calls `cb` on each entry back to front until it returns `false`.
    pub fn reverse_iterate<F>(&self, mut cb: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.iter().rev() {
            if !cb(k, v) {
                return;
            }
        }
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        assert_eq!(self.index.len(), self.order.len());

        // walk the order both ways and make sure it matches the number of
        // keys in the index
        let mut count = 0;
        for _item in self.iter() {
            count += 1;
            assert!(count <= self.len());
        }
        assert_eq!(self.len(), count);
        assert_eq!(self.len(), self.iter().rev().count());

        // every handle in the index points at the entry for its key
        for (k, node) in self.index.iter() {
            match self.order.get(*node) {
                Some(entry) => assert!(entry.key == *k),
                None => panic!("index references a node that doesn't exist"),
            }
        }
    }
}

impl<K, V, S> Default for LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hash_builder(0, S::default())
    }
}

impl<K, V, S> fmt::Debug for LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.push_back(k, v);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = LinkedHashMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Cache<K, V> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        self.push_back(k, v)
    }

    fn get<'a>(&'a mut self, k: &K) -> Option<&'a V> {
        LinkedHashMap::get(self, k)
    }

    fn get_mut<'a>(&'a mut self, k: &K) -> Option<&'a mut V> {
        LinkedHashMap::get_mut(self, k)
    }

    fn remove(&mut self, k: &K) -> Option<V> {
        LinkedHashMap::remove(self, k)
    }

    fn clear(&mut self) {
        LinkedHashMap::clear(self)
    }

    fn len(&self) -> usize {
        LinkedHashMap::len(self)
    }
}

impl<'a, K, V> Iterator for LinkedHashMapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for LinkedHashMapIter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<'a, K, V> ExactSizeIterator for LinkedHashMapIter<'a, K, V> {}

#[cfg(test)]
mod tests {
    use super::LinkedHashMap;
    use crate::comparator::comparator;

    fn keys(map: &LinkedHashMap<u64, u64>) -> Vec<u64> {
        map.keys().copied().collect()
    }

    /// This test adds three elements to the map and removes the middle,
    /// then the head node, to ensure the structure remains consistent
    /// throughout.
    #[test]
    fn test_linked_hash_map_head_removal() {
        let mut linked_hash_map: LinkedHashMap<u64, u64> =
            LinkedHashMap::with_capacity(5);

        assert_eq!(None, linked_hash_map.push(0, 0));
        assert_eq!(None, linked_hash_map.push(1, 1));
        assert_eq!(None, linked_hash_map.push(2, 2));

        assert_eq!(Some(1), linked_hash_map.remove(&1u64));
        assert_eq!(vec![0, 2], keys(&linked_hash_map));
        assert_eq!(Some(0), linked_hash_map.remove(&0u64));
        assert_eq!(Some(2), linked_hash_map.remove(&2u64));
        assert!(linked_hash_map.is_empty());
    }

    /// This test adds three elements to the map and removes the middle,
    /// then the tail node, to ensure the structure remains consistent
    /// throughout.
    #[test]
    fn test_linked_hash_map_tail_removal() {
        let mut linked_hash_map: LinkedHashMap<u64, u64> =
            LinkedHashMap::with_capacity(5);

        assert_eq!(None, linked_hash_map.push(0, 0));
        assert_eq!(None, linked_hash_map.push(1, 1));
        assert_eq!(None, linked_hash_map.push(2, 2));

        assert_eq!(Some(1), linked_hash_map.remove(&1u64));
        assert_eq!(Some(2), linked_hash_map.remove(&2u64));
        assert_eq!(vec![0], keys(&linked_hash_map));
        assert_eq!(Some(0), linked_hash_map.remove(&0u64));
        assert_eq!(None, linked_hash_map.remove(&0u64));
    }

    #[test]
    fn test_push_front_evicts_back() {
        let mut map: LinkedHashMap<u64, u64> = LinkedHashMap::with_capacity(3);
        map.push_front(1, 1);
        map.push_front(2, 2);
        map.push_front(3, 3);
        assert_eq!(vec![3, 2, 1], keys(&map));

        // the back entry goes to make room for the new front
        assert_eq!(None, map.push_front(4, 4));
        assert_eq!(vec![4, 3, 2], keys(&map));

        // an existing key only moves, nothing is evicted
        assert_eq!(Some(2), map.push_front(2, 20));
        assert_eq!(vec![2, 4, 3], keys(&map));
        assert_eq!(3, map.len());
    }

    #[test]
    fn test_mixed_ends() {
        let mut map: LinkedHashMap<u64, u64> = LinkedHashMap::with_capacity(2);
        map.push_back(1, 1);
        map.push_front(2, 2);
        assert_eq!(vec![2, 1], keys(&map));

        // pushing at the back evicts the front
        map.push_back(3, 3);
        assert_eq!(vec![1, 3], keys(&map));

        // pushing an existing key to the other end
        assert_eq!(Some(3), map.push_front(3, 30));
        assert_eq!(vec![3, 1], keys(&map));
    }

    #[test]
    fn test_get_mut_moves_to_back() {
        let mut map: LinkedHashMap<u64, u64> = LinkedHashMap::new();
        map.extend(vec![(1, 1), (2, 2), (3, 3)]);

        if let Some(v) = map.get_mut(&1u64) {
            *v = 10;
        }
        assert_eq!(vec![2, 3, 1], keys(&map));
        assert_eq!(Some((&1, &10)), map.peek_back());
    }

    #[test]
    fn test_contains_value_uses_comparator() {
        // values compare equal when they match case-insensitively
        let mut map: LinkedHashMap<u32, String> =
            LinkedHashMap::with_capacity_and_comparator(
                0,
                comparator(|a: &String, b: &String| {
                    a.to_lowercase().cmp(&b.to_lowercase())
                }),
            );
        map.push(1, "Hello".to_owned());

        assert!(map.contains_value(&"HELLO".to_owned()));
        assert!(!map.contains_value(&"world".to_owned()));

        let mut plain: LinkedHashMap<u32, String> = LinkedHashMap::new();
        plain.push(1, "Hello".to_owned());
        assert!(plain.contains_value(&"Hello".to_owned()));
        assert!(!plain.contains_value(&"HELLO".to_owned()));
    }

    #[test]
    fn test_contains_value_without_partial_eq() {
        struct Reading {
            sensor: &'static str,
            celsius: i32,
        }

        let mut map: LinkedHashMap<u32, Reading> =
            LinkedHashMap::with_capacity_and_comparator(
                2,
                comparator(|a: &Reading, b: &Reading| a.celsius.cmp(&b.celsius)),
            );
        map.push_back(1, Reading { sensor: "attic", celsius: 21 });
        map.push_back(2, Reading { sensor: "cellar", celsius: 12 });

        let same_temperature = Reading { sensor: "anywhere", celsius: 12 };
        assert!(map.contains_value(&same_temperature));
        assert!(!map.contains_value(&Reading { sensor: "cellar", celsius: 30 }));
        assert_eq!(Some("attic"), map.get(&1).map(|r| r.sensor));
    }

    #[test]
    fn test_borrowed_keys() {
        let mut map: LinkedHashMap<String, u32> = LinkedHashMap::new();
        map.push("a".to_owned(), 1);
        map.push("b".to_owned(), 2);

        assert!(map.contains_key("a"));
        assert_eq!(Some(&1), map.get("a"));
        assert_eq!(Some(1), map.remove("a"));
        assert_eq!(5, map.get_or("zzz", 5));
    }

    #[test]
    fn test_debug_is_in_order() {
        let mut map: LinkedHashMap<u64, u64> = LinkedHashMap::new();
        map.push_back(2, 20);
        map.push_front(1, 10);

        assert_eq!("{1: 10, 2: 20}", format!("{:?}", map));
    }
}
