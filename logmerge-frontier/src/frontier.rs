// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::HasTimestamp;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Identifier of a source within one merge: its position in the source list.
pub type SourceId = usize;

/// The set of entries pulled from sources but not yet extracted, ordered by timestamp.
///
/// Alongside the heap the frontier counts, per source, how many of that source's
/// entries are resident. Merge drivers use the count to decide when a source
/// needs refilling.
///
/// Entries with equal timestamps come out by ascending source id, and in insertion
/// order within one source. The order therefore depends only on the entries, not
/// on when or in which batches they were inserted.
///
/// # Examples
///
/// ```
/// use logmerge_core::LogEntry;
/// use logmerge_frontier::Frontier;
///
/// let mut frontier = Frontier::new(2);
/// frontier.insert(1, LogEntry::new(20_u64, "b"));
/// frontier.insert(0, LogEntry::new(10_u64, "a"));
///
/// assert_eq!(frontier.resident_count(1), 1);
/// assert_eq!(frontier.extract_min(), Some((0, LogEntry::new(10, "a"))));
/// assert_eq!(frontier.extract_min(), Some((1, LogEntry::new(20, "b"))));
/// assert!(frontier.is_empty());
/// ```
#[derive(Debug)]
pub struct Frontier<T: HasTimestamp> {
    heap: BinaryHeap<Reverse<Slot<T>>>,
    resident: Vec<usize>,
    next_sequence: u64,
}

impl<T: HasTimestamp> Frontier<T> {
    #[must_use]
    pub fn new(source_count: usize) -> Self {
        Self::with_capacity(source_count, source_count)
    }

    /// Creates a frontier with room for `capacity` resident entries.
    #[must_use]
    pub fn with_capacity(source_count: usize, capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            resident: vec![0; source_count],
            next_sequence: 0,
        }
    }

    /// Adds an entry pulled from `source`. O(log n) in the frontier size.
    pub fn insert(&mut self, source: SourceId, entry: T) {
        if source >= self.resident.len() {
            self.resident.resize(source + 1, 0);
        }
        self.resident[source] += 1;

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.heap.push(Reverse(Slot {
            timestamp: entry.timestamp(),
            source,
            sequence,
            entry,
        }));
    }

    /// Removes and returns the entry with the smallest timestamp, with its source.
    pub fn extract_min(&mut self) -> Option<(SourceId, T)> {
        let Reverse(slot) = self.heap.pop()?;
        self.resident[slot.source] -= 1;
        Some((slot.source, slot.entry))
    }

    /// Timestamp of the entry `extract_min` would return next.
    pub fn peek_timestamp(&self) -> Option<T::Timestamp> {
        self.heap.peek().map(|Reverse(slot)| slot.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Number of entries from `source` currently resident; 0 for unknown sources.
    pub fn resident_count(&self, source: SourceId) -> usize {
        self.resident.get(source).copied().unwrap_or(0)
    }
}

#[derive(Debug)]
struct Slot<T: HasTimestamp> {
    timestamp: T::Timestamp,
    source: SourceId,
    sequence: u64,
    entry: T,
}

impl<T: HasTimestamp> Slot<T> {
    fn key(&self) -> (T::Timestamp, SourceId, u64) {
        (self.timestamp, self.source, self.sequence)
    }
}

impl<T: HasTimestamp> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T: HasTimestamp> Eq for Slot<T> {}

impl<T: HasTimestamp> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: HasTimestamp> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
