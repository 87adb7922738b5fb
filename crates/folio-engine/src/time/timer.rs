use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId(u64);

/// Cooperative single-threaded timer queue.
///
/// Nothing fires on its own: the owner calls [`pop_due`](Self::pop_due) with
/// the current clock value and handles each payload. Timers are ordered by
/// deadline, then by scheduling order, so a timer scheduled for a later
/// deadline never fires before an earlier one and equal deadlines keep FIFO
/// order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `payload` to become due at `at`.
    pub fn schedule(&mut self, at: Duration, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((at, seq), payload);
        self.deadlines.insert(seq, at);
        TimerId(seq)
    }

    /// Cancels a pending timer and returns its payload.
    ///
    /// Returns `None` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let at = self.deadlines.remove(&id.0)?;
        self.entries.remove(&(at, id.0))
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerId, T)> {
        let (&(at, seq), _) = self.entries.first_key_value()?;
        if at > now {
            return None;
        }
        self.deadlines.remove(&seq);
        let payload = self.entries.remove(&(at, seq))?;
        Some((TimerId(seq), payload))
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|&(at, _)| at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    #[test]
    fn nothing_due_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(ms(170), "commit");
        assert!(q.pop_due(ms(169)).is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(950), "cleanup");
        q.schedule(ms(170), "commit");
        assert_eq!(q.pop_due(ms(1_000)).map(|(_, p)| p), Some("commit"));
        assert_eq!(q.pop_due(ms(1_000)).map(|(_, p)| p), Some("cleanup"));
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(0), 1);
        q.schedule(ms(0), 2);
        q.schedule(ms(0), 3);
        let order: Vec<_> = std::iter::from_fn(|| q.pop_due(ms(0)).map(|(_, p)| p)).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(10), "a");
        q.schedule(ms(20), "b");
        assert_eq!(q.cancel(id), Some("a"));
        assert_eq!(q.cancel(id), None);
        assert_eq!(q.pop_due(ms(30)).map(|(_, p)| p), Some("b"));
    }

    #[test]
    fn next_deadline_and_clear() {
        let mut q = TimerQueue::new();
        q.schedule(ms(50), ());
        q.schedule(ms(5), ());
        assert_eq!(q.next_deadline(), Some(ms(5)));
        q.clear();
        assert_eq!(q.next_deadline(), None);
        assert!(q.is_empty());
    }
}
