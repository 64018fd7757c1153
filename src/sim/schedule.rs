//! Virtual-clock timer queue
//!
//! Stands in for `setInterval`/`setTimeout`: callbacks are plain events popped
//! in due-time order and dispatched by the owner, one at a time. Equal due
//! times pop in the order they were scheduled. Time is whole milliseconds.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Milliseconds on the virtual clock
pub type Millis = u64;

/// Handle for cancelling a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(Millis),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    at: Millis,
    seq: u64,
    id: TimerId,
}

#[derive(Debug)]
pub struct Schedule<E> {
    now: Millis,
    next_seq: u64,
    next_id: u64,
    queue: BinaryHeap<Reverse<Pending>>,
    /// Live timers; cancelled ones leave stale queue entries that get skipped
    live: HashMap<TimerId, (Repeat, E)>,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            next_id: 1,
            queue: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }
}

impl<E: Clone> Schedule<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Fire `event` every `period` ms, first one period from now
    pub fn every(&mut self, period: Millis, event: E) -> TimerId {
        let period = period.max(1);
        let id = self.allocate(Repeat::Every(period), event);
        self.push(id, self.now + period);
        id
    }

    /// Fire `event` once, `delay` ms from now
    pub fn after(&mut self, delay: Millis, event: E) -> TimerId {
        let id = self.allocate(Repeat::Once, event);
        self.push(id, self.now + delay);
        id
    }

    /// Returns false if the timer already fired (one-shot) or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id).is_some()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.live.len()
    }

    /// Pop the next live event due at or before `until`, moving the clock to
    /// its due time. Periodic timers re-arm one period later.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, E)> {
        loop {
            let Reverse(head) = self.queue.peek()?;
            if head.at > until {
                return None;
            }
            let Reverse(pending) = self.queue.pop()?;
            let Some((repeat, event)) = self.live.get(&pending.id) else {
                continue;
            };
            let (repeat, event) = (*repeat, event.clone());

            self.now = self.now.max(pending.at);
            match repeat {
                Repeat::Once => {
                    self.live.remove(&pending.id);
                }
                Repeat::Every(period) => self.push(pending.id, pending.at + period),
            }
            return Some((pending.at, event));
        }
    }

    /// Move the clock forward to `until` once everything due has been popped
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

    fn allocate(&mut self, repeat: Repeat, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.live.insert(id, (repeat, event));
        id
    }

    fn push(&mut self, id: TimerId, at: Millis) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Pending { at, seq, id }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(schedule: &mut Schedule<&'static str>, until: Millis) -> Vec<(Millis, &'static str)> {
        let mut fired = Vec::new();
        while let Some(entry) = schedule.pop_due(until) {
            fired.push(entry);
        }
        schedule.settle(until);
        fired
    }

    #[test]
    fn test_fires_in_time_then_schedule_order() {
        let mut s = Schedule::new();
        s.after(20, "late");
        s.after(10, "first");
        s.after(10, "second");

        assert_eq!(
            drain(&mut s, 100),
            vec![(10, "first"), (10, "second"), (20, "late")]
        );
        assert_eq!(s.now(), 100);
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn test_periodic_rearms() {
        let mut s = Schedule::new();
        s.every(1000, "tick");
        assert!(drain(&mut s, 999).is_empty());

        let fired = drain(&mut s, 3000);
        assert_eq!(fired, vec![(1000, "tick"), (2000, "tick"), (3000, "tick")]);
        assert_eq!(s.active_count(), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut s = Schedule::new();
        let id = s.every(100, "tick");
        assert_eq!(drain(&mut s, 250).len(), 2);

        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(!s.is_active(id));
        assert!(drain(&mut s, 1000).is_empty());
    }

    #[test]
    fn test_cancel_after_one_shot_fired() {
        let mut s = Schedule::new();
        let id = s.after(5, "once");
        assert_eq!(drain(&mut s, 5), vec![(5, "once")]);
        assert!(!s.cancel(id));
    }

    #[test]
    fn test_delays_are_relative_to_popped_event() {
        let mut s = Schedule::new();
        s.after(100, "outer");
        let (at, _) = s.pop_due(1000).unwrap();
        assert_eq!(at, 100);
        assert_eq!(s.now(), 100);

        // Scheduled from inside a callback: due at 110, still before `until`
        s.after(10, "inner");
        assert_eq!(s.pop_due(1000), Some((110, "inner")));
    }
}
