use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Time source consumed by engines.
///
/// `now` is monotonic and measured from the clock's own origin. `epoch_millis`
/// is wall-clock time and is only used where a fresh, roughly unique number is
/// wanted (burst seeds).
pub trait Clock {
    fn now(&self) -> Duration;
    fn epoch_millis(&self) -> u64;
}

/// Real clock backed by `Instant` and `SystemTime`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn epoch_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually driven clock.
///
/// Clones share the same underlying time, so a test or script can keep one
/// handle and advance it while an engine holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    epoch_base: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock whose `epoch_millis` starts at `base_ms`.
    pub fn with_epoch(base_ms: u64) -> Self {
        Self { now: Rc::new(Cell::new(Duration::ZERO)), epoch_base: base_ms }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Moves the clock to `at`. Going backwards is ignored.
    pub fn set(&self, at: Duration) {
        if at >= self.now.get() {
            self.now.set(at);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn epoch_millis(&self) -> u64 {
        self.epoch_base + self.now.get().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let a = ManualClock::with_epoch(1_000);
        let b = a.clone();
        a.advance_ms(250);
        assert_eq!(b.now(), Duration::from_millis(250));
        assert_eq!(b.epoch_millis(), 1_250);
    }

    #[test]
    fn manual_clock_never_goes_backwards() {
        let c = ManualClock::new();
        c.set(Duration::from_millis(40));
        c.set(Duration::from_millis(10));
        assert_eq!(c.now(), Duration::from_millis(40));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let c = SystemClock::new();
        let a = c.now();
        let b = c.now();
        assert!(b >= a);
    }
}
