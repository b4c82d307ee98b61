use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Milliseconds on the widget's own timeline.
pub type Millis = u64;

#[derive(Debug, Clone, Copy)]
pub struct Timer<K> {
    pub due_ms: Millis,
    pub kind: K,
    seq: u64,
}

impl<K> PartialEq for Timer<K> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<K> Eq for Timer<K> {}

impl<K> Ord for Timer<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by due time, FIFO on ties.
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<K> PartialOrd for Timer<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-threaded timer queue driven by an external clock.
///
/// Nothing fires on its own: the owner calls [`TimerQueue::pop_due`] in a loop
/// with the current time and dispatches whatever comes out. Popping a timer
/// moves `now` to that timer's due time so callbacks can re-arm relative to
/// when they were supposed to run.
#[derive(Debug)]
pub struct TimerQueue<K> {
    now: Millis,
    next_seq: u64,
    timers: BinaryHeap<Timer<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            timers: BinaryHeap::new(),
        }
    }
}

impl<K> TimerQueue<K> {
    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn schedule_at(&mut self, due_ms: Millis, kind: K) {
        debug_assert!(due_ms >= self.now, "timer due time must be >= current time");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer { due_ms, kind, seq });
    }

    pub fn schedule_in(&mut self, delay_ms: Millis, kind: K) {
        self.schedule_at(self.now.saturating_add(delay_ms), kind);
    }

    /// Pop the earliest timer due at or before `until`, advancing `now` to it.
    pub fn pop_due(&mut self, until: Millis) -> Option<Timer<K>> {
        if self.timers.peek()?.due_ms > until {
            return None;
        }
        let timer = self.timers.pop()?;
        self.now = self.now.max(timer.due_ms);
        Some(timer)
    }

    /// Move the clock forward without firing anything (no-op when `until` is in the past).
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.peek().map(|timer| timer.due_ms)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every pending timer. The clock keeps its current time.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        A,
        B,
    }

    #[test]
    fn timers_pop_in_due_order() {
        let mut timers = TimerQueue::default();
        timers.schedule_at(10, Kind::A);
        timers.schedule_at(5, Kind::B);
        timers.schedule_at(20, Kind::A);

        let first = timers.pop_due(100).expect("first timer");
        assert_eq!(first.due_ms, 5);
        assert_eq!(timers.now(), 5);

        let second = timers.pop_due(100).expect("second timer");
        assert_eq!(second.due_ms, 10);

        let third = timers.pop_due(100).expect("third timer");
        assert_eq!(third.due_ms, 20);
        assert_eq!(timers.now(), 20);

        assert!(timers.pop_due(100).is_none());
        assert!(timers.is_empty());
    }

    #[test]
    fn equal_due_times_fire_in_schedule_order() {
        let mut timers = TimerQueue::default();
        timers.schedule_at(7, Kind::B);
        timers.schedule_at(7, Kind::A);

        assert_eq!(timers.pop_due(7).map(|t| t.kind), Some(Kind::B));
        assert_eq!(timers.pop_due(7).map(|t| t.kind), Some(Kind::A));
    }

    #[test]
    fn timers_after_the_horizon_stay_queued() {
        let mut timers = TimerQueue::default();
        timers.schedule_in(3_000, Kind::A);

        assert!(timers.pop_due(2_999).is_none());
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_due(), Some(3_000));

        timers.settle(2_999);
        assert_eq!(timers.now(), 2_999);
        timers.schedule_in(10, Kind::B);
        assert_eq!(timers.pop_due(3_009).map(|t| t.kind), Some(Kind::A));
        assert_eq!(timers.pop_due(3_009).map(|t| t.kind), Some(Kind::B));
    }

    #[test]
    fn clear_drops_pending_timers_but_keeps_time() {
        let mut timers = TimerQueue::default();
        timers.schedule_at(4, Kind::A);
        timers.pop_due(4);
        timers.schedule_in(1, Kind::B);
        timers.clear();
        assert!(timers.is_empty());
        assert_eq!(timers.now(), 4);
    }
}
