//! A linked list that flattens all its nodes onto a Vec for storage, gaining
//! data locality and O(1) access by handle. Both [`crate::LinkedHashMap`] and
//! [`crate::List`] are built on top of it.

/// Alias for the index of a node in the linked list's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle(usize);

/// A node that lives in a linked list.
struct Node<T> {
    /// The value being stored.
    value: T,

    /// The index of the node previous to this one.
    prev: NodeHandle,

    /// The index of the next node in the list.
    next: NodeHandle,
}

/// A doubly linked list whose nodes live in a single contiguous Vec and are
/// addressed by their position in it. Removed slots are freelisted and reused
/// by later pushes; there is no compaction.
///
/// The chain is circular: only the head is tracked and the back of the list
/// is always `head.prev`. A node keeps its slot for as long as it lives, even
/// when it is moved to the front or back, so a [`NodeHandle`] handed out by a
/// push stays valid until that node is removed. The map relies on this to
/// keep its key index pointing at the right nodes without rewriting it on
/// every access.
pub(crate) struct LinkedList<T> {
    /// The nodes in the list. `None` marks a freelisted slot.
    store: Vec<Option<Node<T>>>,

    /// Entries in the list which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,

    /// The first node in the list.
    head: Option<NodeHandle>,
}

impl<T> LinkedList<T> {
    /// Creates a new, empty linked list.
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new linked list with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
        }
    }

    /// The length of this linked list.
    pub(crate) fn len(&self) -> usize {
        self.store.len() - self.free.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Handle of the first node.
    pub(crate) fn front(&self) -> Option<NodeHandle> {
        self.head
    }

    /// Handle of the last node.
    pub(crate) fn back(&self) -> Option<NodeHandle> {
        self.head.map(|head| self.node(head).prev)
    }

    /// Handle of the node after `node`, or `None` at the back.
    pub(crate) fn next(&self, node: NodeHandle) -> Option<NodeHandle> {
        let next = self.node(node).next;
        if Some(next) == self.head {
            None
        } else {
            Some(next)
        }
    }

    /// Handle of the node before `node`, or `None` at the front.
    pub(crate) fn prev(&self, node: NodeHandle) -> Option<NodeHandle> {
        if Some(node) == self.head {
            None
        } else {
            Some(self.node(node).prev)
        }
    }

    /// Gets an element from the list.
    pub(crate) fn get(&self, node: NodeHandle) -> Option<&T> {
        self.store
            .get(node.0)
            .and_then(Option::as_ref)
            .map(|n| &n.value)
    }

    pub(crate) fn get_mut(&mut self, node: NodeHandle) -> Option<&mut T> {
        self.store
            .get_mut(node.0)
            .and_then(Option::as_mut)
            .map(|n| &mut n.value)
    }

    /// Pushes t onto the front of the list and returns a handle to the node.
    pub(crate) fn push_front(&mut self, t: T) -> NodeHandle {
        let idx = self.alloc(t);
        self.link_front(idx);
        idx
    }

    /// Pushes t onto the back of the list and returns a handle to the node.
    pub(crate) fn push_back(&mut self, t: T) -> NodeHandle {
        let idx = self.alloc(t);
        self.link_back(idx);
        idx
    }

    /// Inserts t directly in front of `at`, returning a handle to the new
    /// node.
    pub(crate) fn insert_before(&mut self, at: NodeHandle, t: T) -> NodeHandle {
        let idx = self.alloc(t);
        self.link_before(idx, at);
        if self.head == Some(at) {
            self.head = Some(idx);
        }
        idx
    }

    /// Pops the front node off the list if it exists.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        self.front().map(|node| self.remove_node(node))
    }

    /// Pops the back node off the list if it exists.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        self.back().map(|node| self.remove_node(node))
    }

    /// Remove an arbitrary node from the list, handing back its value. The
    /// slot goes on the freelist and will be overwritten at some later push.
    pub(crate) fn remove_node(&mut self, node: NodeHandle) -> T {
        self.unlink(node);
        self.free.push(node);

        match self.store[node.0].take() {
            Some(n) => n.value,
            None => panic!("node handle {} refers to a freed slot", node.0),
        }
    }

    /// Relinks `node` at the front without moving it in storage.
    pub(crate) fn move_to_front(&mut self, node: NodeHandle) {
        if self.head != Some(node) {
            self.unlink(node);
            self.link_front(node);
        }
    }

    /// Relinks `node` at the back without moving it in storage.
    pub(crate) fn move_to_back(&mut self, node: NodeHandle) {
        if self.back() != Some(node) {
            self.unlink(node);
            self.link_back(node);
        }
    }

    /// Rebuilds the chain so that it visits exactly `order`, front to back.
    /// `order` must be a permutation of the live handles.
    pub(crate) fn relink(&mut self, order: &[NodeHandle]) {
        debug_assert_eq!(order.len(), self.len());

        self.head = None;
        for &node in order {
            self.link_back(node);
        }
    }

    /// Handles of every live node, front to back.
    pub(crate) fn handles(&self) -> Vec<NodeHandle> {
        let mut handles = Vec::with_capacity(self.len());
        let mut cursor = self.front();
        while let Some(node) = cursor {
            handles.push(node);
            cursor = self.next(node);
        }
        handles
    }

    /// Iterates over the values front to back. Use `.rev()` for the other
    /// direction.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.front(),
            back: self.back(),
            remaining: self.len(),
        }
    }

    /// Clears this linked list. Does not free the underlying buffers.
    pub(crate) fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
    }

    fn node(&self, node: NodeHandle) -> &Node<T> {
        match &self.store[node.0] {
            Some(n) => n,
            None => panic!("node handle {} refers to a freed slot", node.0),
        }
    }

    fn node_mut(&mut self, node: NodeHandle) -> &mut Node<T> {
        match &mut self.store[node.0] {
            Some(n) => n,
            None => panic!("node handle {} refers to a freed slot", node.0),
        }
    }

    /// Stores t in the first available slot, or a new one at the end of the
    /// storage vec. The node is not linked into the chain yet.
    fn alloc(&mut self, t: T) -> NodeHandle {
        let n = Node {
            value: t,
            prev: NodeHandle(0),
            next: NodeHandle(0),
        };

        match self.free.pop() {
            Some(idx) => {
                self.store[idx.0] = Some(n);
                idx
            }
            None => {
                self.store.push(Some(n));
                NodeHandle(self.store.len() - 1)
            }
        }
    }

    fn link_front(&mut self, node: NodeHandle) {
        // in a circular chain the front is just the back with the head moved
        self.link_back(node);
        self.head = Some(node);
    }

    fn link_back(&mut self, node: NodeHandle) {
        match self.head {
            Some(head) => self.link_before(node, head),
            None => {
                let n = self.node_mut(node);
                n.prev = node;
                n.next = node;
                self.head = Some(node);
            }
        }
    }

    /// Splices `node` into the chain between `at` and its predecessor.
    fn link_before(&mut self, node: NodeHandle, at: NodeHandle) {
        let prev = self.node(at).prev;

        let n = self.node_mut(node);
        n.prev = prev;
        n.next = at;

        self.node_mut(prev).next = node;
        self.node_mut(at).prev = node;
    }

    /// Links prev to next and next to prev so node doesn't exist in the chain
    /// anymore. The node itself is left in storage.
    fn unlink(&mut self, node: NodeHandle) {
        let (prev, next) = {
            let n = self.node(node);
            (n.prev, n.next)
        };

        if next == node {
            // last node in the chain
            self.head = None;
        } else {
            self.node_mut(prev).next = next;
            self.node_mut(next).prev = prev;

            if self.head == Some(node) {
                self.head = Some(next);
            }
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over a [`LinkedList`].
pub(crate) struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<NodeHandle>,
    back: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.front?);
        self.remaining -= 1;
        self.front = Some(node.next);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.back?);
        self.remaining -= 1;
        self.back = Some(node.prev);
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

#[cfg(test)]
mod tests {
    use super::LinkedList;

    fn values(list: &LinkedList<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    fn reversed(list: &LinkedList<u32>) -> Vec<u32> {
        list.iter().rev().copied().collect()
    }

    #[test]
    fn test_push_both_ends() {
        let mut list = LinkedList::with_capacity(4);
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        list.push_front(0);

        assert_eq!(4, list.len());
        assert_eq!(vec![0, 1, 2, 3], values(&list));
        assert_eq!(vec![3, 2, 1, 0], reversed(&list));
    }

    #[test]
    fn test_pop_reuses_slots() {
        let mut list = LinkedList::new();
        list.push_back(0);
        list.push_back(1);
        list.push_back(2);

        assert_eq!(Some(0), list.pop_front());
        assert_eq!(Some(2), list.pop_back());
        assert_eq!(1, list.len());

        // both freed slots get handed back out before the vec grows
        list.push_back(3);
        list.push_front(4);
        assert_eq!(3, list.store.len());
        assert_eq!(vec![4, 1, 3], values(&list));

        assert_eq!(Some(4), list.pop_front());
        assert_eq!(Some(1), list.pop_front());
        assert_eq!(Some(3), list.pop_front());
        assert_eq!(None, list.pop_front());
        assert_eq!(None, list.pop_back());
        assert!(list.is_empty());
    }

    #[test]
    fn test_handles_survive_moves() {
        let mut list = LinkedList::new();
        let a = list.push_back(10);
        let b = list.push_back(20);
        let c = list.push_back(30);

        list.move_to_front(c);
        assert_eq!(vec![30, 10, 20], values(&list));

        list.move_to_back(a);
        assert_eq!(vec![30, 20, 10], values(&list));

        // moving something already in place is a no-op
        list.move_to_back(a);
        list.move_to_front(c);
        assert_eq!(vec![30, 20, 10], values(&list));

        assert_eq!(Some(&10), list.get(a));
        assert_eq!(Some(&20), list.get(b));
        assert_eq!(Some(&30), list.get(c));
        assert_eq!(vec![10, 20, 30], reversed(&list));
    }

    #[test]
    fn test_remove_middle_head_and_tail() {
        let mut list = LinkedList::new();
        let a = list.push_back(0);
        let b = list.push_back(1);
        let c = list.push_back(2);

        assert_eq!(1, list.remove_node(b));
        assert_eq!(vec![0, 2], values(&list));
        assert_eq!(0, list.remove_node(a));
        assert_eq!(Some(c), list.front());
        assert_eq!(Some(c), list.back());
        assert_eq!(2, list.remove_node(c));
        assert!(list.is_empty());
        assert_eq!(None, list.get(c));
    }

    #[test]
    fn test_neighbours() {
        let mut list = LinkedList::new();
        let a = list.push_back(0);
        let b = list.push_back(1);

        assert_eq!(None, list.prev(a));
        assert_eq!(Some(b), list.next(a));
        assert_eq!(Some(a), list.prev(b));
        assert_eq!(None, list.next(b));
    }

    #[test]
    fn test_insert_before_head() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        let c = list.push_back(3);
        list.insert_before(a, 0);
        list.insert_before(c, 2);

        assert_eq!(vec![0, 1, 2, 3], values(&list));
    }

    #[test]
    fn test_relink() {
        let mut list = LinkedList::new();
        for v in [3, 1, 2] {
            list.push_back(v);
        }

        let mut handles = list.handles();
        handles.sort_by_key(|h| list.get(*h).copied());
        list.relink(&handles);

        assert_eq!(vec![1, 2, 3], values(&list));
        assert_eq!(vec![3, 2, 1], reversed(&list));
    }

    #[test]
    fn test_iter_meets_in_the_middle() {
        let mut list = LinkedList::new();
        for v in 0..4 {
            list.push_back(v);
        }

        let mut iter = list.iter();
        assert_eq!(4, iter.len());
        assert_eq!(Some(&0), iter.next());
        assert_eq!(Some(&3), iter.next_back());
        assert_eq!(Some(&1), iter.next());
        assert_eq!(Some(&2), iter.next_back());
        assert_eq!(None, iter.next());
        assert_eq!(None, iter.next_back());
    }

    #[test]
    fn test_clear() {
        let mut list = LinkedList::new();
        list.push_back(0);
        list.push_back(1);
        list.pop_front();
        list.clear();

        assert_eq!(0, list.len());
        assert_eq!(None, list.front());
        assert_eq!(None, list.back());
        assert_eq!(0, list.iter().count());
    }
}
