use std::time::{Duration, Instant};

/// Tracks when the next tick of a running game is due.
///
/// The deadline is armed from the tick interval in effect when the previous
/// tick fired (or when play began), so input arriving between ticks does not
/// delay the next one.  Disarming the schedule whenever the game stops being
/// runnable guarantees that a stale deadline is never honored after a pause,
/// reset, or game over.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TickSchedule {
    next_tick: Option<Instant>,
}

impl TickSchedule {
    /// Return how long to wait for input before the next tick is due.  If no
    /// tick is pending, one is scheduled for `interval` after `now`.
    pub(crate) fn wait_time(&mut self, now: Instant, interval: Duration) -> Duration {
        self.next_tick
            .get_or_insert(now + interval)
            .saturating_duration_since(now)
    }

    /// Forget any pending tick
    pub(crate) fn disarm(&mut self) {
        self.next_tick = None;
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }
}
