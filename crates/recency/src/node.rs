//! Arena node and slot handle

/// Index of a node in the list arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(pub(crate) usize);

impl SlotId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One arena slot.
///
/// Sentinels and vacant slots carry no entry.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) entry: Option<(K, V)>,
    pub(crate) prev: SlotId,
    pub(crate) next: SlotId,
}

impl<K, V> Node<K, V> {
    pub(crate) fn sentinel(prev: SlotId, next: SlotId) -> Self {
        Self {
            entry: None,
            prev,
            next,
        }
    }

    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            entry: Some((key, value)),
            prev: SlotId(0),
            next: SlotId(0),
        }
    }
}
