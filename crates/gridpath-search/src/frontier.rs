//! The open set: a min-priority queue with deterministic tie-breaking and an
//! O(1) membership set.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use gridpath_core::Pos;

/// Heap entry, ordered by the composite key `(f, order)`.
///
/// `order` is the insertion counter, so among equal `f` the earliest
/// insertion is popped first. The position never takes part in the
/// comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    f: u32,
    order: u64,
    pos: Pos,
}

impl Entry {
    #[inline]
    fn key(&self) -> (u32, u64) {
        (self.f, self.order)
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier keyed by `(f_score, insertion_order)`.
///
/// The heap may hold stale entries for cells that already left the
/// frontier; [`pop_min`](Frontier::pop_min) skips them by consulting the
/// membership set.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    members: HashSet<Pos>,
    next_order: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `pos` with priority `f` and return its insertion order.
    pub fn push(&mut self, pos: Pos, f: u32) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        self.heap.push(Entry { f, order, pos });
        self.members.insert(pos);
        order
    }

    /// Remove and return the live entry with the lowest `(f, order)` key,
    /// or `None` when the frontier is empty.
    pub fn pop_min(&mut self) -> Option<Pos> {
        while let Some(entry) = self.heap.pop() {
            if self.members.remove(&entry.pos) {
                return Some(entry.pos);
            }
            log::trace!("skipping stale frontier entry for {}", entry.pos);
        }
        None
    }

    /// Whether `pos` is currently enqueued.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.members.contains(&pos)
    }

    /// Whether no live entries remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Total number of successful insertions so far.
    #[inline]
    pub fn insertions(&self) -> u64 {
        self.next_order
    }
}
