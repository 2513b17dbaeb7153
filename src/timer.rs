use std::time::{Duration, Instant};

/// Handle for the running tick schedule. Dropping it cancels the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    interval: Duration,
    next_due: Instant,
}

impl TickTimer {
    pub fn start(interval: Duration, now: Instant) -> Self {
        TickTimer { interval, next_due: now + interval }
    }

    /// Returns true at most once per interval. A stalled caller gets one tick, not a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
