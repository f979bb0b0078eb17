//=========================================================================
// Timers
//=========================================================================
//
// Frame-driven repeating timers.
//
// There are no OS timers in the logic thread: an `Interval` accumulates
// the `dt` it is fed and reports how many periods elapsed. A `TimerSlot`
// holds at most one live interval per subsystem; starting a new one
// always drops the previous one first.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Interval ============================================================

/// Repeating period counter fed with frame deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period: f32,
    accumulated: f32,
}

impl Interval {
    /// Creates an interval. Periods below one microsecond are clamped so
    /// a zero-length period cannot spin forever.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.as_secs_f32().max(1e-6),
            accumulated: 0.0,
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs_f32(self.period)
    }

    /// Advances by `dt` seconds and returns the number of completed periods.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.accumulated += dt.max(0.0);
        let mut fired = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        fired
    }
}

//=== TimerSlot ===========================================================

/// Single live timer handle.
///
/// `start` cancels whatever was running before assigning the new interval,
/// so two intervals can never be live in the same slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerSlot {
    live: Option<Interval>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any live interval, then starts a fresh one.
    pub fn start(&mut self, period: Duration) {
        self.cancel();
        self.live = Some(Interval::new(period));
    }

    /// Drops the live interval, if any.
    pub fn cancel(&mut self) {
        self.live = None;
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Fired periods this frame; always 0 when nothing is live.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.live.as_mut().map_or(0, |interval| interval.tick(dt))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_fires_once_per_period() {
        let mut interval = Interval::new(Duration::from_millis(50));
        assert_eq!(interval.tick(0.049), 0);
        assert_eq!(interval.tick(0.002), 1);
        assert_eq!(interval.tick(0.100), 2);
    }

    #[test]
    fn interval_carries_remainder() {
        let mut interval = Interval::new(Duration::from_millis(100));
        assert_eq!(interval.tick(0.25), 2);
        assert_eq!(interval.tick(0.06), 1);
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut interval = Interval::new(Duration::from_millis(10));
        assert_eq!(interval.tick(-1.0), 0);
        assert_eq!(interval.tick(0.011), 1);
    }

    #[test]
    fn empty_slot_never_fires() {
        let mut slot = TimerSlot::new();
        assert!(!slot.is_live());
        assert_eq!(slot.tick(10.0), 0);
    }

    #[test]
    fn restart_discards_previous_progress() {
        let mut slot = TimerSlot::new();
        slot.start(Duration::from_millis(100));
        assert_eq!(slot.tick(0.09), 0);

        slot.start(Duration::from_millis(100));
        assert_eq!(slot.tick(0.09), 0, "old accumulation must not leak into the new timer");
        assert_eq!(slot.tick(0.02), 1);
    }

    #[test]
    fn cancel_stops_firing() {
        let mut slot = TimerSlot::new();
        slot.start(Duration::from_millis(10));
        slot.cancel();
        assert!(!slot.is_live());
        assert_eq!(slot.tick(1.0), 0);
    }
}
