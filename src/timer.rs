use fugit::{MillisDurationU64, TimerInstantU64};

/// Milliseconds since boot
pub type Instant = TimerInstantU64<1_000>;
pub type Duration = MillisDurationU64;

pub const TICK_MS: u32 = 10;
pub const READ_INTERVAL_MS: u64 = 2000; // DHT11 needs at least 1s between reads

/// A monotonic millisecond clock
pub trait Monotonic {
    fn now(&self) -> Instant;
}

/// Keeps the next instant a sensor poll is due.
/// The main loop checks it every tick instead of blocking for the whole interval.
pub struct PollTimer {
    interval: Duration,
    next_due: Instant,
}

impl PollTimer {
    /// The first poll is due one full interval after `now`
    pub fn new(now: Instant, interval: Duration) -> PollTimer {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Schedules the next poll one interval after `now`
    pub fn rearm(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }
}
