//! Time-ordered event list
//!
//! # Critical Invariants
//!
//! 1. `pop_earliest` always yields the event with the smallest time
//! 2. Events with equal time come out in insertion order
//! 3. Every inserted event is yielded at most once
//!
//! Ties are broken with a monotonically increasing insertion sequence,
//! which keeps a run deterministic for a fixed seed.

use super::types::{EventKind, ScheduledEvent};
use crate::core::SimTime;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry: the event plus its insertion sequence
#[derive(Debug, Clone, Copy)]
struct Entry {
    event: ScheduledEvent,
    seq: u64,
}

impl Entry {
    fn key(&self) -> (SimTime, u64) {
        (self.event.occurs_at(), self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered multiset of scheduled events
///
/// # Example
///
/// ```rust
/// use intersection_sim_core::events::{EventKind, Timeline};
///
/// let mut timeline = Timeline::new();
/// timeline.schedule(10, EventKind::ChangeToYellowEW);
/// timeline.schedule(5, EventKind::ArriveEast);
/// timeline.schedule(5, EventKind::ArriveWest);
///
/// assert_eq!(timeline.pop_earliest().unwrap().kind(), EventKind::ArriveEast);
/// assert_eq!(timeline.pop_earliest().unwrap().kind(), EventKind::ArriveWest);
/// assert_eq!(timeline.pop_earliest().unwrap().occurs_at(), 10);
/// assert!(timeline.pop_earliest().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event; always succeeds
    pub fn insert(&mut self, event: ScheduledEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { event, seq }));
    }

    /// Convenience wrapper around [`Timeline::insert`]
    pub fn schedule(&mut self, occurs_at: SimTime, kind: EventKind) {
        self.insert(ScheduledEvent::new(occurs_at, kind));
    }

    /// Remove and return the earliest event (earliest-inserted on ties)
    pub fn pop_earliest(&mut self) -> Option<ScheduledEvent> {
        self.heap.pop().map(|Reverse(entry)| entry.event)
    }

    /// Earliest event without removing it
    pub fn peek_earliest(&self) -> Option<&ScheduledEvent> {
        self.heap.peek().map(|Reverse(entry)| &entry.event)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// All pending events in dispatch order
    pub fn pending(&self) -> Vec<ScheduledEvent> {
        let mut entries: Vec<Entry> = self.heap.iter().map(|Reverse(entry)| *entry).collect();
        entries.sort();
        entries.into_iter().map(|entry| entry.event).collect()
    }
}
