use std::time::Duration;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Clock timestamp taken at the tick.
    pub now: Duration,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The clock does not read time itself; the loop passes the current
/// [`Clock::now`](super::Clock::now) value to [`tick`](Self::tick), which keeps
/// it usable with both real and manual clocks.
///
/// Delta time is clamped to avoid pathological values when the loop is paused
/// by the debugger, backgrounded, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Duration>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior when several frames share a timestamp
    /// - maximum prevents animation jumps after long stalls
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Forgets the previous timestamp; the next tick reports `dt_min`.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances the clock to `now` and returns a new `FrameTime`.
    pub fn tick(&mut self, now: Duration) -> FrameTime {
        let raw = match self.last {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        let dt = raw.clamp(self.dt_min, self.dt_max);

        self.last = Some(now);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_uses_minimum_dt() {
        let mut clock = FrameClock::new();
        let ft = clock.tick(Duration::from_millis(500));
        assert_eq!(ft.frame_index, 0);
        assert!((ft.dt - 0.0001).abs() < 1e-6);
    }

    #[test]
    fn dt_is_clamped_after_stall() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::ZERO);
        let ft = clock.tick(Duration::from_secs(3));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn regular_frames_report_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_millis(100));
        let ft = clock.tick(Duration::from_millis(116));
        assert!((ft.dt - 0.016).abs() < 1e-5);
    }
}
