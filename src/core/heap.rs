//! Array-based binary max-heap of token frequencies
//!
//! Entries are ordered by frequency (higher first), then by occurrence order
//! (earlier first). Every entry knows the trie node it belongs to, and every
//! move of an entry is reported to a [`SlotTracker`] so the node always knows
//! which slot holds its entry.

use crate::core::trie::NodeId;

/// Receives slot updates for heap entries
pub trait SlotTracker {
    /// Record that the entry owned by `node` now lives at `slot` (`None` once removed)
    fn set_slot(&mut self, node: NodeId, slot: Option<usize>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapEntry {
    pub token: String,
    pub frequency: u64,
    pub occurrence_order: u64,
    pub node: NodeId,
}

impl HeapEntry {
    /// Whether `self` belongs above `other` in the heap
    #[inline]
    pub fn precedes(&self, other: &HeapEntry) -> bool {
        self.frequency > other.frequency
            || (self.frequency == other.frequency
                && self.occurrence_order < other.occurrence_order)
    }
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left_child(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right_child(i: usize) -> usize {
    2 * i + 2
}

#[derive(Debug, Clone)]
pub struct FrequencyHeap {
    entries: Vec<HeapEntry>,
}

impl FrequencyHeap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn entries(&self) -> &[HeapEntry] {
        &self.entries
    }

    /// Append `entry`, restore heap order and return the slot it settled in
    pub fn insert<T: SlotTracker>(&mut self, entry: HeapEntry, tracker: &mut T) -> usize {
        if self.entries.len() == self.entries.capacity() {
            let grow_by = self.entries.capacity().max(1);
            self.entries.reserve_exact(grow_by);
        }

        let slot = self.entries.len();
        tracker.set_slot(entry.node, Some(slot));
        self.entries.push(entry);
        self.sift_up(slot, tracker)
    }

    /// Bump the frequency of the entry at `slot` by one and restore heap order.
    ///
    /// The entry can only move toward the root, so sift-up is enough.
    pub fn increase_key_at<T: SlotTracker>(&mut self, slot: usize, tracker: &mut T) -> usize {
        self.entries[slot].frequency += 1;
        self.sift_up(slot, tracker)
    }

    /// Remove and return the top entry, or `None` when the heap is empty
    pub fn extract_max<T: SlotTracker>(&mut self, tracker: &mut T) -> Option<HeapEntry> {
        if self.entries.is_empty() {
            return None;
        }

        let last = self.entries.len() - 1;
        self.swap_slots(0, last, tracker);
        let top = self.entries.pop()?;
        tracker.set_slot(top.node, None);

        if !self.entries.is_empty() {
            self.sift_down(0, tracker);
        }
        Some(top)
    }

    /// Swap two slots and update both owners in the same step
    fn swap_slots<T: SlotTracker>(&mut self, a: usize, b: usize, tracker: &mut T) {
        if a == b {
            return;
        }
        tracker.set_slot(self.entries[a].node, Some(b));
        tracker.set_slot(self.entries[b].node, Some(a));
        self.entries.swap(a, b);
    }

    fn sift_up<T: SlotTracker>(&mut self, mut i: usize, tracker: &mut T) -> usize {
        while i > 0 {
            let p = parent(i);
            if !self.entries[i].precedes(&self.entries[p]) {
                break;
            }
            self.swap_slots(i, p, tracker);
            i = p;
        }
        i
    }

    fn sift_down<T: SlotTracker>(&mut self, mut i: usize, tracker: &mut T) -> usize {
        let len = self.entries.len();
        loop {
            let left = left_child(i);
            let right = right_child(i);
            if left >= len {
                return i;
            }

            // Right only takes over when it strictly precedes left, so an exact
            // tie between the children goes to the left one.
            let mut best = left;
            if right < len && self.entries[right].precedes(&self.entries[left]) {
                best = right;
            }

            if !self.entries[best].precedes(&self.entries[i]) {
                return i;
            }
            self.swap_slots(i, best, tracker);
            i = best;
        }
    }
}
