//! Per-phase countdown.
//!
//! The timer is polled, not callback-driven: the driver calls
//! [`PhaseTimer::poll`] on every tick and gets `true` exactly once per
//! countdown. Stopping disarms it, so a tick that was already in flight
//! when the phase ended reads as a no-op.

use std::time::{Duration, Instant};

use super::CRITICAL_THRESHOLD;

#[derive(Debug)]
pub struct PhaseTimer {
    deadline: Option<Instant>,
    full: Duration,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self {
            deadline: None,
            full: Duration::ZERO,
        }
    }

    /// Arm the countdown from a phase ceiling. Restarting an armed
    /// timer replaces the previous deadline.
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.deadline = Some(now + duration);
        self.full = duration;
    }

    /// Disarm. Idempotent; a later `poll` never reports expiry.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Extend a running countdown. Returns false when idle.
    pub fn extend(&mut self, by: Duration) -> bool {
        match self.deadline.as_mut() {
            Some(deadline) => {
                *deadline += by;
                self.full += by;
                true
            }
            None => false,
        }
    }

    /// Reports expiry exactly once, disarming the timer as it fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Ceiling-rounded whole seconds left. The displayed integer only
    /// changes when this value does, regardless of tick granularity.
    pub fn display_seconds(&self, now: Instant) -> u64 {
        self.remaining(now).as_secs_f64().ceil() as u64
    }

    /// Derived urgency flag: running and at or under the threshold.
    pub fn is_critical(&self, now: Instant) -> bool {
        self.is_running() && self.remaining(now) <= CRITICAL_THRESHOLD
    }

    /// Fraction of the countdown remaining, for the UI gauge.
    pub fn ratio(&self, now: Instant) -> f64 {
        if self.full.is_zero() {
            return 0.0;
        }
        (self.remaining(now).as_secs_f64() / self.full.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn fires_exactly_once() {
        let start = Instant::now();
        let mut timer = PhaseTimer::new();
        timer.start(start, secs(10));

        assert!(!timer.poll(start + secs(9)));
        assert!(timer.poll(start + secs(10)));
        assert!(!timer.poll(start + secs(11)));
        assert!(!timer.poll(start + secs(60)));
    }

    #[test]
    fn stop_prevents_expiry() {
        let start = Instant::now();
        let mut timer = PhaseTimer::new();
        timer.start(start, secs(10));
        timer.stop();
        timer.stop(); // idempotent

        assert!(!timer.poll(start + secs(20)));
        assert!(!timer.is_running());
    }

    #[test]
    fn extend_only_while_running() {
        let start = Instant::now();
        let mut timer = PhaseTimer::new();

        assert!(!timer.extend(secs(5)));

        timer.start(start, secs(10));
        assert!(timer.extend(secs(5)));
        assert!(!timer.poll(start + secs(14)));
        assert!(timer.poll(start + secs(15)));
    }

    #[test]
    fn display_seconds_rounds_up() {
        let start = Instant::now();
        let mut timer = PhaseTimer::new();
        timer.start(start, secs(10));

        assert_eq!(timer.display_seconds(start), 10);
        assert_eq!(timer.display_seconds(start + Duration::from_millis(100)), 10);
        assert_eq!(timer.display_seconds(start + Duration::from_millis(1001)), 9);
        assert_eq!(timer.display_seconds(start + secs(10)), 0);
    }

    #[test]
    fn critical_flag_is_derived() {
        let start = Instant::now();
        let mut timer = PhaseTimer::new();
        timer.start(start, secs(30));

        assert!(!timer.is_critical(start + secs(24)));
        assert!(timer.is_critical(start + secs(25)));

        timer.stop();
        assert!(!timer.is_critical(start + secs(29)));
    }

    #[test]
    fn idle_timer_reads_zero() {
        let timer = PhaseTimer::new();
        let now = Instant::now();
        assert_eq!(timer.remaining(now), Duration::ZERO);
        assert_eq!(timer.display_seconds(now), 0);
        assert_eq!(timer.ratio(now), 0.0);
    }
}
