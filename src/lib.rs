//! A handful of in-memory containers: an order-preserving map that doubles as
//! a bounded cache, a doubly linked list, a FIFO queue and typed sets.
//!
//! ```
//! use mysterious_containers::LinkedHashMap;
//!
//! let mut cache: LinkedHashMap<u32, &str> = LinkedHashMap::with_capacity(2);
//! cache.push_back(1, "a");
//! cache.push_back(2, "b");
//! cache.push_back(3, "c"); // 1 is evicted
//!
//! assert_eq!(Some(&"b"), cache.get(&2)); // 2 moves to the back
//! cache.push_back(4, "d"); // 3 is evicted
//!
//! let keys: Vec<u32> = cache.keys().copied().collect();
//! assert_eq!(vec![2, 4], keys);
//! ```
//!
//! Nothing in here locks; share a container across threads by wrapping it in
//! a mutex of your choosing.

mod cache;
mod comparator;
mod error;
mod linked_list;
mod linked_map;
mod list;
mod queue;
mod set;

pub use cache::Cache;
pub use comparator::{comparator, Comparator};
pub use error::{Error, Result};
pub use linked_map::{LinkedHashMap, LinkedHashMapIter};
pub use list::{List, ListIter};
pub use queue::{Queue, QueueIter};
pub use set::{
    Int32Set, Int64Set, IntSet, Set, StringSet, Uint16Set, Uint32Set,
    Uint64Set,
};
