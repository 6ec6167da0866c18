//! Delayed and periodic event scheduling against a [`Millis`] time base.
//!
//! The queue never looks at a clock itself: callers pass the current time to
//! [`TimerQueue::pop_due`] and receive due events one at a time, in due order, with ties broken
//! by scheduling order. Cancellation removes the timer immediately; a cancelled timer can never
//! be returned again.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use crate::foundation::core::Millis;

/// Handle returned when scheduling, used to cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cadence {
    Once,
    Every(u64),
}

#[derive(Debug)]
struct Timer<E> {
    cadence: Cadence,
    // Due time of the currently armed occurrence. Heap keys that disagree are stale.
    due: Millis,
    event: E,
}

/// A timer that came due.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub due: Millis,
    pub event: E,
}

#[derive(Debug)]
pub struct TimerQueue<E> {
    heap: BinaryHeap<Reverse<(Millis, u64, TimerId)>>,
    timers: HashMap<TimerId, Timer<E>>,
    next_id: u64,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            timers: HashMap::new(),
            next_id: 0,
            next_seq: 0,
        }
    }
}

impl<E: Clone> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once at `at`.
    pub fn once(&mut self, at: Millis, event: E) -> TimerId {
        self.insert(at, Cadence::Once, event)
    }

    /// Fire `event` at `first`, then every `interval` ms after that (fixed rate).
    ///
    /// A zero interval is treated as 1 ms so a periodic timer can never spin in place.
    pub fn every(&mut self, first: Millis, interval: u64, event: E) -> TimerId {
        self.insert(first, Cadence::Every(interval.max(1)), event)
    }

    /// Cancel a pending timer. Returns `false` if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Drop every pending timer. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.timers.len();
        self.timers.clear();
        self.heap.clear();
        n
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of live (not fired, not cancelled) timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest due time among live timers.
    pub fn next_due(&mut self) -> Option<Millis> {
        self.discard_stale();
        self.heap.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Periodic timers are re-armed at `due + interval` before being returned, so a caller that
    /// polls late receives every missed occurrence in order.
    pub fn pop_due(&mut self, now: Millis) -> Option<Fired<E>> {
        self.discard_stale();
        let Reverse((due, _, id)) = *self.heap.peek()?;
        if due > now {
            return None;
        }
        self.heap.pop();

        let cadence = self.timers.get(&id)?.cadence;
        match cadence {
            Cadence::Once => {
                let timer = self.timers.remove(&id)?;
                Some(Fired {
                    id,
                    due,
                    event: timer.event,
                })
            }
            Cadence::Every(interval) => {
                let next = due.after(interval);
                let seq = self.bump_seq();
                let timer = self.timers.get_mut(&id)?;
                timer.due = next;
                let event = timer.event.clone();
                self.heap.push(Reverse((next, seq, id)));
                Some(Fired { id, due, event })
            }
        }
    }

    fn insert(&mut self, due: Millis, cadence: Cadence, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.timers.insert(
            id,
            Timer {
                cadence,
                due,
                event,
            },
        );
        self.heap.push(Reverse((due, seq, id)));
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    // Heap entries for cancelled timers are dropped lazily.
    fn discard_stale(&mut self) {
        while let Some(&Reverse((due, _, id))) = self.heap.peek() {
            match self.timers.get(&id) {
                Some(timer) if timer.due == due => break,
                _ => {
                    self.heap.pop();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/timer.rs"]
mod tests;
