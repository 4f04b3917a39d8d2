//! Recency list backed by a slot arena.
//!
//! ```text
//!   nodes[0]                                         nodes[1]
//!   HEAD ◄──► [mru] ◄──► [ .. ] ◄──► [lru] ◄──► TAIL
//! ```
//!
//! Both sentinels are allocated once and never freed, so every data node
//! always has a live `prev` and `next`. Vacated slots go on a free list and
//! are reused before the arena grows, which keeps `SlotId`s held by the
//! index stable.

use crate::node::{Node, SlotId};

pub(crate) const HEAD: SlotId = SlotId(0);
pub(crate) const TAIL: SlotId = SlotId(1);

/// Doubly-linked recency order, most recently used first.
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Node<K, V>>,
    free_list: Vec<SlotId>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Create an empty list with room for `capacity` data nodes
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(2));
        nodes.push(Node::sentinel(HEAD, TAIL));
        nodes.push(Node::sentinel(HEAD, TAIL));

        Self {
            nodes,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store a new entry and link it right after the head sentinel
    pub(crate) fn push_front(&mut self, key: K, value: V) -> SlotId {
        let node = Node::new(key, value);
        let id = match self.free_list.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                self.nodes.push(node);
                SlotId(self.nodes.len() - 1)
            }
        };

        self.add_front(id);
        self.len += 1;
        id
    }

    /// Mark `id` as most recently used
    pub(crate) fn move_to_front(&mut self, id: SlotId) {
        if self.nodes[HEAD.index()].next == id {
            return;
        }

        self.unlink(id);
        self.add_front(id);
    }

    /// Unlink `id` and free its slot, returning the entry it held
    pub(crate) fn take(&mut self, id: SlotId) -> Option<(K, V)> {
        if id == HEAD || id == TAIL {
            return None;
        }
        if self.nodes.get(id.index())?.entry.is_none() {
            return None;
        }

        self.unlink(id);
        let entry = self.nodes[id.index()].entry.take();
        self.free_list.push(id);
        self.len -= 1;
        entry
    }

    /// Unlink and return the least recently used entry
    ///
    /// Returns `None` when the list holds no data nodes.
    pub(crate) fn remove_last(&mut self) -> Option<(K, V)> {
        let last = self.nodes[TAIL.index()].prev;
        if last == HEAD {
            return None;
        }
        self.take(last)
    }

    /// Least recently used entry, without touching the order
    pub(crate) fn back(&self) -> Option<(&K, &V)> {
        let last = self.nodes[TAIL.index()].prev;
        self.nodes[last.index()]
            .entry
            .as_ref()
            .map(|(key, value)| (key, value))
    }

    pub(crate) fn get(&self, id: SlotId) -> Option<&V> {
        self.nodes
            .get(id.index())
            .and_then(|node| node.entry.as_ref())
            .map(|(_, value)| value)
    }

    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut V> {
        self.nodes
            .get_mut(id.index())
            .and_then(|node| node.entry.as_mut())
            .map(|(_, value)| value)
    }

    /// Iterate from most to least recently used
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            current: self.nodes[HEAD.index()].next,
            remaining: self.len,
        }
    }

    /// Drop every data node; sentinels stay linked to each other
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD.index()].next = TAIL;
        self.nodes[TAIL.index()].prev = HEAD;
        self.free_list.clear();
        self.len = 0;
    }

    fn add_front(&mut self, id: SlotId) {
        let first = self.nodes[HEAD.index()].next;

        let node = &mut self.nodes[id.index()];
        node.prev = HEAD;
        node.next = first;

        self.nodes[first.index()].prev = id;
        self.nodes[HEAD.index()].next = id;
    }

    fn unlink(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = &self.nodes[id.index()];
            (node.prev, node.next)
        };

        self.nodes[prev.index()].next = next;
        self.nodes[next.index()].prev = prev;
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        assert!(self.nodes[HEAD.index()].entry.is_none());
        assert!(self.nodes[TAIL.index()].entry.is_none());

        let mut forward = 0;
        let mut current = self.nodes[HEAD.index()].next;
        while current != TAIL {
            let node = &self.nodes[current.index()];
            assert!(node.entry.is_some(), "linked slot {:?} is vacant", current);
            assert_eq!(self.nodes[node.next.index()].prev, current);
            forward += 1;
            assert!(forward <= self.len, "forward walk longer than len");
            current = node.next;
        }
        assert_eq!(forward, self.len);

        let mut backward = 0;
        let mut current = self.nodes[TAIL.index()].prev;
        while current != HEAD {
            backward += 1;
            assert!(backward <= self.len, "backward walk longer than len");
            current = self.nodes[current.index()].prev;
        }
        assert_eq!(backward, self.len);

        for id in &self.free_list {
            assert!(self.nodes[id.index()].entry.is_none());
        }
        assert_eq!(self.len + self.free_list.len() + 2, self.nodes.len());
    }
}

/// Iterator over list entries, most recently used first
pub(crate) struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    current: SlotId,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }

        let node = &self.nodes[self.current.index()];
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.entry.as_ref().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
