//! Typed sets with the usual set algebra. Every operation that combines two
//! sets hands back a new one and leaves both operands alone.

use std::{
    collections::{hash_map::RandomState, HashSet},
    fmt,
    hash::{BuildHasher, Hash},
};

use rustc_hash::FxBuildHasher;

/// A set of `T`, hashed with `S`.
#[derive(Clone)]
pub struct Set<T, S = RandomState> {
    items: HashSet<T, S>,
}

// integer sets skip SipHash; Fx folds the high product bits back down, so
// keys sharing low zero bits still spread across buckets
pub type IntSet = Set<i64, FxBuildHasher>;
pub type Int32Set = Set<i32, FxBuildHasher>;
pub type Int64Set = Set<i64, FxBuildHasher>;
pub type Uint16Set = Set<u16, FxBuildHasher>;
pub type Uint32Set = Set<u32, FxBuildHasher>;
pub type Uint64Set = Set<u64, FxBuildHasher>;
pub type StringSet = Set<String>;

impl<T, S> Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            items: HashSet::with_hasher(hash_builder),
        }
    }

    /// Adds every item in `items`.
    pub fn insert<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(items);
        self
    }

    /// Removes every item in `items`. Missing items are ignored.
    pub fn delete<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.items.remove(&item);
        }
        self
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Whether every one of `items` is in the set. True for no items.
    pub fn contains_all<I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().all(|item| self.items.contains(&item))
    }

    /// Whether at least one of `items` is in the set. False for no items.
    pub fn contains_any<I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().any(|item| self.items.contains(&item))
    }

    /// Whether every member of `other` is also a member of this set.
    pub fn is_superset(&self, other: &Self) -> bool {
        self.items.is_superset(&other.items)
    }

    /// Same members, regardless of insertion order or duplicates.
    pub fn equal(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.is_superset(other)
    }

    /// Removes and returns an arbitrary member.
    pub fn pop_any(&mut self) -> Option<T>
    where
        T: Clone,
    {
        let item = self.items.iter().next().cloned()?;
        self.items.take(&item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

impl<T, S> Set<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Default,
{
    /// Members of either set.
    pub fn union(&self, other: &Self) -> Self {
        self.items.union(&other.items).cloned().collect()
    }

    /// Members of both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        // walk the smaller side
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .items
            .iter()
            .filter(|item| large.items.contains(*item))
            .cloned()
            .collect()
    }

    /// Members of this set that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.items.difference(&other.items).cloned().collect()
    }

    /// The members in no particular order.
    pub fn unsorted_list(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T, S> Set<T, S>
where
    T: Eq + Hash + Clone + Ord,
    S: BuildHasher,
{
    /// The members, sorted ascending.
    pub fn list(&self) -> Vec<T> {
        let mut list: Vec<T> = self.items.iter().cloned().collect();
        list.sort();
        list
    }
}

impl<T, S> Default for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> PartialEq for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T, S> Eq for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> fmt::Debug for Set<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T, S> FromIterator<T> for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.insert(iter);
        set
    }
}

impl<T, S> Extend<T> for Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert(iter);
    }
}
