//! Virtual-time timer queue.
//!
//! Every simulated delay in the application goes through a [`Scheduler`].
//! Nothing runs on a real clock: callers move time forward with
//! [`Scheduler::advance`] or [`Scheduler::advance_to_next`] and receive the
//! events that became due, one at a time and in due order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Handle returned when an event is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    due_ms: u64,
    id: TimerId,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.id == other.id
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Ties on due time fall back to scheduling order.
impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due_ms, self.id).cmp(&(other.due_ms, other.id))
    }
}

/// A queue of delayed events driven by a virtual millisecond clock.
#[derive(Debug)]
pub struct Scheduler<E> {
    now_ms: u64,
    next_id: u64,
    queue: BinaryHeap<Reverse<Entry<E>>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Number of events still waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Milliseconds until the earliest queued event, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.queue
            .peek()
            .map(|Reverse(entry)| entry.due_ms.saturating_sub(self.now_ms))
    }

    /// Queue `event` to fire `delay_ms` after the current virtual time.
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Entry {
            due_ms: self.now_ms + delay_ms,
            id,
            event,
        }));
        id
    }

    /// Move the clock forward by `ms` and return every event that became due,
    /// ordered by due time.
    pub fn advance(&mut self, ms: u64) -> Vec<E> {
        let target = self.now_ms + ms;
        let mut fired = Vec::new();
        while let Some(event) = self.pop_due(target) {
            fired.push(event);
        }
        self.now_ms = target;
        fired
    }

    /// Jump straight to the earliest queued event and return it.
    pub fn advance_to_next(&mut self) -> Option<E> {
        let due = self.queue.peek().map(|Reverse(entry)| entry.due_ms)?;
        self.pop_due(due)
    }

    fn pop_due(&mut self, limit_ms: u64) -> Option<E> {
        match self.queue.peek() {
            Some(Reverse(entry)) if entry.due_ms <= limit_ms => {}
            _ => return None,
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_fire_in_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule(300, "late");
        sched.schedule(100, "early");
        sched.schedule(200, "middle");

        assert_eq!(sched.advance(1000), vec!["early", "middle", "late"]);
        assert_eq!(sched.now(), 1000);
        assert!(sched.is_idle());
    }

    #[test]
    fn equal_delays_keep_scheduling_order() {
        let mut sched = Scheduler::new();
        sched.schedule(50, 1);
        sched.schedule(50, 2);
        sched.schedule(50, 3);
        assert_eq!(sched.advance(50), vec![1, 2, 3]);
    }

    #[test]
    fn advance_stops_at_target() {
        let mut sched = Scheduler::new();
        sched.schedule(100, 'a');
        sched.schedule(250, 'b');

        assert_eq!(sched.advance(99), Vec::<char>::new());
        assert_eq!(sched.advance(1), vec!['a']);
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.next_due_in(), Some(150));
    }

    #[test]
    fn advance_to_next_moves_clock() {
        let mut sched = Scheduler::new();
        sched.schedule(1500, "done");
        assert_eq!(sched.advance_to_next(), Some("done"));
        assert_eq!(sched.now(), 1500);
        assert_eq!(sched.advance_to_next(), None);
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut sched = Scheduler::new();
        sched.advance(1000);
        sched.schedule(500, "x");
        assert_eq!(sched.next_due_in(), Some(500));
        sched.advance_to_next();
        assert_eq!(sched.now(), 1500);
    }
}
