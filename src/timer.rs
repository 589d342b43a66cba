//! Arming and firing of the periodic auto-complete sweep.
//!
//! The TUI runs a single-threaded poll loop, so the timer is a deadline that
//! the loop checks on every pass rather than a background thread. Disarming
//! clears the deadline; dropping the timer disarms it.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);
/// Longest accepted period. Longer ones are clamped to it.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(86_400);

#[derive(Debug)]
pub struct SweepTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl SweepTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.min(MAX_SWEEP_INTERVAL),
            deadline: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start counting a full period from `now`. Re-arming an armed timer is a no-op.
    pub fn arm(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = self.next_deadline(now);
            debug!(period_secs = self.period.as_secs(), "sweep timer armed");
        }
    }

    pub fn disarm(&mut self) {
        if self.deadline.take().is_some() {
            debug!("sweep timer disarmed");
        }
    }

    /// Arm or disarm to match `enabled`.
    pub fn sync(&mut self, enabled: bool, now: Instant) {
        if enabled {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    /// Returns true once per elapsed period.
    ///
    /// The next deadline is one period after `now`, so a stalled loop fires a
    /// single sweep instead of a burst.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = self.next_deadline(now);
                true
            }
            _ => false,
        }
    }

    /// One period after `now`, or no deadline at all if that is not representable.
    fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let next = now.checked_add(self.period);
        if next.is_none() {
            warn!(period_secs = self.period.as_secs(), "sweep deadline out of range, timer left disarmed");
        }
        next
    }

    /// Time left before the next firing, if armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

impl Drop for SweepTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let start = Instant::now();
        let mut timer = SweepTimer::new(Duration::from_secs(60));
        assert!(!timer.fire_if_due(start + Duration::from_secs(600)));

        timer.arm(start);
        assert!(!timer.fire_if_due(start + Duration::from_secs(59)));
        assert!(timer.fire_if_due(start + Duration::from_secs(60)));
        assert!(!timer.fire_if_due(start + Duration::from_secs(61)));
        assert!(timer.fire_if_due(start + Duration::from_secs(120)));
    }

    #[test]
    fn test_stalled_loop_fires_once() {
        let start = Instant::now();
        let mut timer = SweepTimer::new(Duration::from_secs(60));
        timer.arm(start);
        let late = start + Duration::from_secs(300);
        assert!(timer.fire_if_due(late));
        assert!(!timer.fire_if_due(late));
        assert_eq!(timer.remaining(late), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_disarm_cancels_pending_fire() {
        let start = Instant::now();
        let mut timer = SweepTimer::new(Duration::from_secs(60));
        timer.sync(true, start);
        assert!(timer.is_armed());
        timer.sync(false, start + Duration::from_secs(30));
        assert!(!timer.is_armed());
        assert!(!timer.fire_if_due(start + Duration::from_secs(90)));
        assert_eq!(timer.remaining(start), None);
    }

    #[test]
    fn test_rearm_does_not_reset_deadline() {
        let start = Instant::now();
        let mut timer = SweepTimer::new(Duration::from_secs(60));
        timer.arm(start);
        timer.arm(start + Duration::from_secs(50));
        assert!(timer.fire_if_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_oversized_period_is_clamped() {
        let start = Instant::now();
        let mut timer = SweepTimer::new(Duration::from_secs(u64::MAX));
        timer.arm(start);
        assert_eq!(timer.remaining(start), Some(MAX_SWEEP_INTERVAL));
        assert!(!timer.fire_if_due(start + Duration::from_secs(3600)));
        assert!(timer.fire_if_due(start + MAX_SWEEP_INTERVAL));
    }
}
