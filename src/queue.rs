//! A first-in-first-out queue on a singly linked list.

use std::fmt;

/// An element of the queue. `next` is the index of the element added after
/// this one.
struct Element<T> {
    value: T,
    next: Option<usize>,
}

/// A singly linked FIFO queue whose elements live in one Vec, linked by index.
/// Slots vacated by [`poll`](Queue::poll) are freelisted and reused by
/// [`add`](Queue::add).
pub struct Queue<T> {
    store: Vec<Option<Element<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            store: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Adds `v` at the tail.
    pub fn add(&mut self, v: T) {
        let element = Element {
            value: v,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.store[idx] = Some(element);
                idx
            }
            None => {
                self.store.push(Some(element));
                self.store.len() - 1
            }
        };

        match self.tail.and_then(|tail| self.store[tail].as_mut()) {
            Some(tail) => tail.next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// The head of the queue, left in place.
    pub fn peek(&self) -> Option<&T> {
        self.head
            .and_then(|head| self.store[head].as_ref())
            .map(|e| &e.value)
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        match self.head {
            Some(head) => self.store[head].as_mut().map(|e| &mut e.value),
            None => None,
        }
    }

    /// Removes and returns the head of the queue.
    pub fn poll(&mut self) -> Option<T> {
        let head = self.head?;
        let element = self.store[head].take()?;

        self.free.push(head);
        self.head = element.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;

        Some(element.value)
    }

    /// Head to tail.
    pub fn iter(&self) -> QueueIter<'_, T> {
        QueueIter {
            queue: self,
            cursor: self.head,
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

pub struct QueueIter<'a, T> {
    queue: &'a Queue<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for QueueIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.queue.store[self.cursor?].as_ref()?;
        self.cursor = element.next;
        Some(&element.value)
    }
}
