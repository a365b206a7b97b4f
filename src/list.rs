//! A general purpose doubly linked list with positional access, value search
//! and an in-place stable sort.

use std::{fmt, mem};

use crate::{
    comparator::{Comparator, Order},
    error::{Error, Result},
    linked_list::{self, LinkedList, NodeHandle},
};

/// A doubly linked list on top of the crate's arena list.
///
/// Value lookups ([`index_of`](Self::index_of), [`contains`](Self::contains),
/// [`remove_value`](Self::remove_value)) and [`sort`](Self::sort) share one
/// ordering, picked at construction: `Ord` for [`new`](Self::new), the given
/// comparator for [`with_comparator`](Self::with_comparator). Two values are
/// equal when that ordering says so. Types without a natural order (`f64`,
/// plain records) go through `with_comparator`.
pub struct List<T> {
    nodes: LinkedList<T>,
    order: Order<T>,
}

/// Iterates over a [`List`] front to back; `.rev()` goes back to front.
pub struct ListIter<'a, T> {
    inner: linked_list::Iter<'a, T>,
}

impl<T: Ord> List<T> {
    pub fn new() -> Self {
        Self::with_order(Order::natural())
    }
}

impl<T> List<T> {
    /// An empty list that compares its values with `cmp` and nothing else.
    pub fn with_comparator(cmp: Comparator<T>) -> Self {
        Self::with_order(Order::Custom(cmp))
    }

    fn with_order(order: Order<T>) -> Self {
        Self {
            nodes: LinkedList::new(),
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push_front(&mut self, v: T) {
        self.nodes.push_front(v);
    }

    pub fn push_back(&mut self, v: T) {
        self.nodes.push_back(v);
    }

    /// Puts every item of `iter` in front of the current contents, keeping
    /// the order `iter` yields them in.
    pub fn extend_front<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        match self.nodes.front() {
            Some(anchor) => {
                for v in iter {
                    self.nodes.insert_before(anchor, v);
                }
            }
            None => self.extend(iter),
        }
    }

    pub fn peek_front(&self) -> Option<&T> {
        self.nodes.front().and_then(|node| self.nodes.get(node))
    }

    pub fn peek_back(&self) -> Option<&T> {
        self.nodes.back().and_then(|node| self.nodes.get(node))
    }

    pub fn poll_front(&mut self) -> Option<T> {
        self.nodes.pop_front()
    }

    pub fn poll_back(&mut self) -> Option<T> {
        self.nodes.pop_back()
    }

    /// The element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let node = self.node_at(index)?;
        self.nodes.get(node).ok_or(self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let node = self.node_at(index)?;
        let err = self.out_of_range(index);
        self.nodes.get_mut(node).ok_or(err)
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, v: T) -> Result<T> {
        self.get_mut(index).map(|slot| mem::replace(slot, v))
    }

    /// Inserts `v` so that it ends up at `index`. `index == len()` appends.
    pub fn add_to(&mut self, index: usize, v: T) -> Result<()> {
        if index == self.len() {
            self.nodes.push_back(v);
        } else {
            let at = self.node_at(index)?;
            self.nodes.insert_before(at, v);
        }
        Ok(())
    }

    /// Removes the element at `index` and returns it.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let node = self.node_at(index)?;
        Ok(self.nodes.remove_node(node))
    }

    /// Calls `cb` on each element front to back until it returns `false`.
    pub fn iterate<F>(&self, mut cb: F)
    where
        F: FnMut(&T) -> bool,
    {
        for v in self.iter() {
            if !cb(v) {
                return;
            }
        }
    }

    /// Calls `cb` on each element back to front until it returns `false`.
    pub fn reverse_iterate<F>(&self, mut cb: F)
    where
        F: FnMut(&T) -> bool,
    {
        for v in self.iter().rev() {
            if !cb(v) {
                return;
            }
        }
    }

    pub fn iter(&self) -> ListIter<'_, T> {
        ListIter {
            inner: self.nodes.iter(),
        }
    }

    /// Walks to the node at `index` from whichever end is closer.
    fn node_at(&self, index: usize) -> Result<NodeHandle> {
        let len = self.len();
        if index >= len {
            return Err(self.out_of_range(index));
        }

        let found = if index < len / 2 {
            let mut cursor = self.nodes.front();
            for _ in 0..index {
                cursor = cursor.and_then(|node| self.nodes.next(node));
            }
            cursor
        } else {
            let mut cursor = self.nodes.back();
            for _ in index..len - 1 {
                cursor = cursor.and_then(|node| self.nodes.prev(node));
            }
            cursor
        };

        found.ok_or(self.out_of_range(index))
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::OutOfRange {
            index,
            len: self.len(),
        }
    }

    /// Position of the first element equal to `v`.
    pub fn index_of(&self, v: &T) -> Option<usize> {
        self.iter().position(|x| self.order.equal(x, v))
    }

    pub fn contains(&self, v: &T) -> bool {
        self.index_of(v).is_some()
    }

    /// Removes the first element equal to `v`. Returns whether one was found.
    pub fn remove_value(&mut self, v: &T) -> bool {
        let order = &self.order;
        let found = self
            .nodes
            .handles()
            .into_iter()
            .zip(self.nodes.iter())
            .find(|(_, x)| order.equal(x, v))
            .map(|(node, _)| node);

        match found {
            Some(node) => {
                self.nodes.remove_node(node);
                true
            }
            None => false,
        }
    }

    /// Sorts ascending. Stable; nodes are relinked, values never move.
    pub fn sort(&mut self) {
        self.sort_by_order(false)
    }

    /// Sorts descending. Stable.
    pub fn sort_reverse(&mut self) {
        self.sort_by_order(true)
    }

    pub fn sort_by_order(&mut self, reverse: bool) {
        let order = &self.order;
        let mut sorted: Vec<(NodeHandle, &T)> = self
            .nodes
            .handles()
            .into_iter()
            .zip(self.nodes.iter())
            .collect();

        sorted.sort_by(|(_, a), (_, b)| {
            let ord = order.compare(a, b);
            if reverse {
                ord.reverse()
            } else {
                ord
            }
        });

        let handles: Vec<NodeHandle> =
            sorted.into_iter().map(|(node, _)| node).collect();
        self.nodes.relink(&handles);
    }
}

impl<T: Clone> List<T> {
    /// Appends a copy of `other`. `other` is left alone.
    pub fn push_back_list(&mut self, other: &List<T>) {
        self.extend(other.iter().cloned());
    }

    /// Prepends a copy of `other`. `other` is left alone.
    pub fn push_front_list(&mut self, other: &List<T>) {
        self.extend_front(other.iter().cloned());
    }

    /// Appends the list to itself: the current contents show up twice.
    pub fn push_back_self(&mut self) {
        for node in self.nodes.handles() {
            if let Some(v) = self.nodes.get(node).cloned() {
                self.nodes.push_back(v);
            }
        }
    }

    /// Prepends the list to itself: the current contents show up twice.
    pub fn push_front_self(&mut self) {
        let anchor = match self.nodes.front() {
            Some(anchor) => anchor,
            None => return,
        };

        for node in self.nodes.handles() {
            if let Some(v) = self.nodes.get(node).cloned() {
                self.nodes.insert_before(anchor, v);
            }
        }
    }

    /// Copies the elements out, front to back.
    pub fn values(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Ord> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut list = Self {
            nodes: LinkedList::with_capacity(self.len()),
            order: self.order.clone(),
        };
        list.extend(self.iter().cloned());
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.nodes.push_back(v);
        }
    }
}

impl<T: Ord> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = ListIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for ListIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, T> ExactSizeIterator for ListIter<'a, T> {}
