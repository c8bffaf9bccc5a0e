//! Fixed-step tick pacing.

use std::time::Duration;

/// Turns wall-clock time into whole canonical ticks. A render loop may call
/// [`TickScheduler::advance`] as often as it likes; only complete intervals
/// are reported, so production is never applied twice for the same second.
#[derive(Clone, Debug)]
pub struct TickScheduler {
    interval: Duration,
    accumulated: Duration,
    running: bool,
}

impl TickScheduler {
    /// A stopped scheduler with the given interval (at least 1ms).
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            running: false,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start pacing. Restarting a running scheduler replaces it: the partial
    /// interval is discarded.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulated = Duration::ZERO;
    }

    /// Stop pacing. Safe when never started.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Account for `elapsed` wall time and return how many ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated += elapsed;
        let step = self.interval.as_nanos();
        let total = self.accumulated.as_nanos();
        let rest = u64::try_from(total % step).unwrap_or(u64::MAX);
        self.accumulated = Duration::from_nanos(rest);
        u32::try_from(total / step).unwrap_or(u32::MAX)
    }
}
