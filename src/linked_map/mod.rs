pub mod linked_hash_map;

pub use linked_hash_map::{LinkedHashMap, LinkedHashMapIter};

/// What a node in the map's ordered store holds. The key index keeps its own
/// copy of the key plus a handle to this node, never the value.
pub(crate) struct Entry<K, V> {
    key: K,
    value: V,
}

/// Which end of the order an operation works on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

impl End {
    fn opposite(self) -> Self {
        match self {
            End::Front => End::Back,
            End::Back => End::Front,
        }
    }
}
