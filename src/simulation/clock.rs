//! Tick cadences and wall-clock formatting.

use std::time::Duration;

/// Maximum ticks a cadence catches up in one poll, so a stalled frame
/// does not trigger a burst of simulation work.
pub const MAX_CATCH_UP: u32 = 8;

/// Fixed-interval tick source driven by frame time.
///
/// Zombies and humans each get their own cadence so they can advance at
/// different rates.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    accumulator: Duration,
}

impl Cadence {
    /// A cadence firing every `interval_ms` milliseconds.
    pub fn from_millis(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1)),
            accumulator: Duration::ZERO,
        }
    }

    /// Adds `elapsed` and returns how many ticks are now due.
    pub fn poll(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.interval && due < MAX_CATCH_UP {
            self.accumulator -= self.interval;
            due += 1;
        }
        if due == MAX_CATCH_UP {
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Forgets accumulated time, e.g. after a restart.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

/// Formats a duration as `"H hours, M minutes, S seconds"`, rounding to the second.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64().round() as u64;
    let (rest, seconds) = (total / 60, total % 60);
    let (hours, minutes) = (rest / 60, rest % 60);
    format!("{hours} hours, {minutes} minutes, {seconds} seconds")
}
