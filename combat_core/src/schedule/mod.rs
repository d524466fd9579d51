//! Impact scheduling - ordered queue of future combat events
//!
//! Impacts resolve in non-decreasing time order. Impacts sharing a timestamp
//! resolve by instigator side (player first, then enemies by id), then in
//! the order they were scheduled. No ordering is ever left to chance.

mod impact;

pub use impact::{ImpactId, ImpactKind, PendingImpact};

use crate::time::Micros;
use crate::types::Side;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct Entry {
    id: ImpactId,
    impact: PendingImpact,
}

impl Entry {
    fn key(&self) -> (Micros, Side, ImpactId) {
        (self.impact.time, self.impact.instigator, self.id)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Holds not-yet-resolved impacts and yields the due ones in order
#[derive(Debug, Clone, Default)]
pub struct ImpactScheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_id: u64,
}

impl ImpactScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        ImpactScheduler {
            queue: BinaryHeap::new(),
            next_id: 0,
        }
    }

    /// Insert an impact
    ///
    /// There is no capacity bound; callers cancel impacts a side can no
    /// longer land.
    pub fn schedule(&mut self, impact: PendingImpact) -> ImpactId {
        let id = ImpactId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Entry { id, impact }));
        id
    }

    /// Remove and return every impact with `time <= now`, in resolution order
    pub fn drain_due(&mut self, now: Micros) -> Vec<PendingImpact> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.impact.time > now {
                break;
            }
            if let Some(Reverse(entry)) = self.queue.pop() {
                due.push(entry.impact);
            }
        }
        due
    }

    /// Drop every impact instigated by `side`. Returns how many were dropped.
    pub fn cancel(&mut self, side: Side) -> usize {
        self.cancel_where(|impact| impact.instigator == side)
    }

    /// Drop the cadence-driven impacts (windup, projectile arrival) of `side`
    pub fn cancel_attacks(&mut self, side: Side) -> usize {
        self.cancel_where(|impact| impact.instigator == side && impact.kind.is_attack())
    }

    /// Drop a single impact by id
    pub fn cancel_impact(&mut self, id: ImpactId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|Reverse(entry)| entry.id != id);
        self.queue.len() != before
    }

    /// Drop every impact matching a predicate
    pub fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&PendingImpact) -> bool,
    {
        let before = self.queue.len();
        self.queue.retain(|Reverse(entry)| !predicate(&entry.impact));
        before - self.queue.len()
    }

    /// Time of the earliest pending impact
    pub fn next_due_time(&self) -> Option<Micros> {
        self.queue.peek().map(|Reverse(entry)| entry.impact.time)
    }

    /// Number of impacts instigated by `side` still pending
    pub fn pending_for(&self, side: Side) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(entry)| entry.impact.instigator == side)
            .count()
    }

    /// Pending impacts in resolution order (copies)
    pub fn snapshot(&self) -> Vec<PendingImpact> {
        let mut entries: Vec<&Entry> = self.queue.iter().map(|Reverse(e)| e).collect();
        entries.sort();
        entries.into_iter().map(|e| e.impact).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
