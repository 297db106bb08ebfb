//! Per-priority FIFO buckets with aging promotion
//!
//! This module provides the storage layer of the priority channel: one FIFO
//! queue per priority level, popped highest-first, plus the sweep that
//! promotes expired low-priority slots one level up. The store never blocks
//! and has no side effects beyond its own mutation; all synchronisation
//! lives in the owning channel.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::channel::config::{Priority, PriorityRange};

/// A queued payload plus its promotion deadline.
///
/// Slots are never mutated after enqueue except for their bucket
/// membership and the deadline re-stamp applied on promotion.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub item: T,
    /// When this slot becomes eligible for promotion; `None` when aging
    /// is disabled for the owning channel.
    pub expires_at: Option<Instant>,
}

/// Fixed set of per-priority FIFO queues, indexed by a [`PriorityRange`].
///
/// Invariant: within a bucket, relative enqueue order is preserved; the
/// only cross-bucket movement is [`promote_expired`](Self::promote_expired).
#[derive(Debug)]
pub(crate) struct BucketStore<T> {
    range: PriorityRange,
    /// Index 0 holds the range's minimum priority.
    buckets: Vec<VecDeque<Slot<T>>>,
}

impl<T> BucketStore<T> {
    pub fn new(range: PriorityRange) -> Self {
        Self {
            range,
            buckets: (0..range.levels()).map(|_| VecDeque::new()).collect(),
        }
    }

    /// Append a slot to the bucket for `priority`.
    ///
    /// The owning channel validates the priority before calling.
    pub fn push(&mut self, priority: Priority, slot: Slot<T>) {
        let index = self.range.index_of(priority);
        self.buckets[index].push_back(slot);
    }

    /// Remove and return the front of the highest-priority non-empty
    /// bucket, scanning from max down to min.
    pub fn pop_highest(&mut self) -> Option<Slot<T>> {
        self.buckets
            .iter_mut()
            .rev()
            .find_map(|bucket| bucket.pop_front())
    }

    /// Total number of queued slots across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.len()).sum()
    }

    /// Sum of bucket lengths for priorities at or above `min_priority`.
    pub fn count_from(&self, min_priority: Priority) -> usize {
        if min_priority > self.range.max() {
            return 0;
        }
        let start = if min_priority <= self.range.min() {
            0
        } else {
            self.range.index_of(min_priority)
        };
        self.buckets[start..].iter().map(|bucket| bucket.len()).sum()
    }

    /// Move every expired slot one bucket up, re-stamping its deadline to
    /// `now + interval`.
    ///
    /// Promoted slots land at the tail of the next bucket in their original
    /// relative order. Buckets are processed from the top down, so a slot
    /// climbs at most one level per sweep; the top bucket is never touched.
    /// Returns the number of promoted slots.
    pub fn promote_expired(&mut self, now: Instant, interval: Duration) -> usize {
        let mut promoted_total = 0;

        for level in (0..self.buckets.len().saturating_sub(1)).rev() {
            if self.buckets[level].is_empty() {
                continue;
            }

            let mut kept = VecDeque::with_capacity(self.buckets[level].len());
            let mut promoted = VecDeque::new();
            for slot in self.buckets[level].drain(..) {
                match slot.expires_at {
                    Some(deadline) if deadline <= now => promoted.push_back(Slot {
                        item: slot.item,
                        expires_at: Some(now + interval),
                    }),
                    _ => kept.push_back(slot),
                }
            }

            self.buckets[level] = kept;
            promoted_total += promoted.len();
            self.buckets[level + 1].append(&mut promoted);
        }

        promoted_total
    }
}
