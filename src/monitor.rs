use ufmt::uWrite;

use crate::cycle::{run_cycle, CycleOutcome};
use crate::sensors::HumiditySensor;
use crate::timer::{Duration, Instant, Monotonic, PollTimer};

/// Owns the sensor, the console and the poll schedule.
///
/// The main loop calls [`Monitor::tick`] as often as it likes; a poll cycle
/// only runs when the schedule says it is due.
pub struct Monitor<S, W> {
    sensor: S,
    console: W,
    timer: PollTimer,
}

impl<S: HumiditySensor, W: uWrite> Monitor<S, W> {
    /// The first cycle runs one full `interval` after `now`
    pub fn new(sensor: S, console: W, now: Instant, interval: Duration) -> Self {
        Self {
            sensor,
            console,
            timer: PollTimer::new(now, interval),
        }
    }

    /// Runs a poll cycle if one is due.
    /// The next cycle is scheduled from the instant this one finished writing,
    /// so consecutive outputs are always at least one interval apart. A failed
    /// console write still counts as a finished cycle
    pub fn tick<C: Monotonic>(&mut self, clock: &C) -> Result<Option<CycleOutcome>, W::Error> {
        if !self.timer.is_due(clock.now()) {
            return Ok(None);
        }
        let result = run_cycle(&mut self.sensor, &mut self.console);
        self.timer.rearm(clock.now());
        result.map(Some)
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn console(&self) -> &W {
        &self.console
    }
}
