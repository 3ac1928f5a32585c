//! # Poll Scheduler
//!
//! Decides when the trip monitor is allowed to hit the backend. Enforces a
//! hard floor between calls, and backs off exponentially while the backend
//! is unreachable.

use std::time::{Duration, Instant};
use tracing::debug;

/// Minimum spacing between two polls, regardless of configuration
const MIN_INTERVAL: Duration = Duration::from_secs(3);

/// Longest interval backoff may reach
const MAX_INTERVAL: Duration = Duration::from_secs(60);

/// Poll timing state for one background loop
#[derive(Debug)]
pub struct PollScheduler {
    /// Interval used while the backend is healthy
    base_interval: Duration,
    /// Interval currently in effect (grows under backoff)
    current_interval: Duration,
    /// When the last poll was issued
    last_poll: Option<Instant>,
}

impl PollScheduler {
    /// Create a scheduler with the given base interval. Intervals below
    /// the floor are clamped up to it.
    pub fn new(base_interval: Duration) -> Self {
        let base_interval = base_interval.max(MIN_INTERVAL);
        Self {
            base_interval,
            current_interval: base_interval,
            last_poll: None,
        }
    }

    /// Whether enough time has passed for the next poll.
    pub fn should_poll(&self) -> bool {
        match self.last_poll {
            Some(at) => at.elapsed() >= self.current_interval,
            None => true,
        }
    }

    /// Record that a poll was just issued.
    pub fn record_poll(&mut self) {
        self.last_poll = Some(Instant::now());
    }

    /// A poll succeeded; return to the base cadence.
    pub fn record_success(&mut self) {
        if self.current_interval != self.base_interval {
            debug!("poll backoff cleared");
        }
        self.current_interval = self.base_interval;
    }

    /// A poll failed; double the interval up to the cap.
    pub fn record_failure(&mut self) {
        self.current_interval = (self.current_interval * 2).min(MAX_INTERVAL);
        debug!(interval_secs = self.current_interval.as_secs(), "poll backoff increased");
    }

    /// Time to wait before the next poll is due.
    pub fn time_until_next(&self) -> Duration {
        match self.last_poll {
            Some(at) => self.current_interval.saturating_sub(at.elapsed()),
            None => Duration::ZERO,
        }
    }

    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_is_enforced() {
        let scheduler = PollScheduler::new(Duration::from_secs(1));
        assert_eq!(scheduler.current_interval(), Duration::from_secs(3));
    }

    #[test]
    fn test_first_poll_is_immediate() {
        let scheduler = PollScheduler::new(Duration::from_secs(5));
        assert!(scheduler.should_poll());
        assert_eq!(scheduler.time_until_next(), Duration::ZERO);
    }

    #[test]
    fn test_poll_spacing() {
        let mut scheduler = PollScheduler::new(Duration::from_secs(5));
        scheduler.record_poll();
        assert!(!scheduler.should_poll());
        assert!(scheduler.time_until_next() <= Duration::from_secs(5));
    }

    #[test]
    fn test_failure_doubles_up_to_cap() {
        let mut scheduler = PollScheduler::new(Duration::from_secs(5));
        scheduler.record_failure();
        assert_eq!(scheduler.current_interval(), Duration::from_secs(10));
        scheduler.record_failure();
        assert_eq!(scheduler.current_interval(), Duration::from_secs(20));
        for _ in 0..10 {
            scheduler.record_failure();
        }
        assert_eq!(scheduler.current_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_success_resets_interval() {
        let mut scheduler = PollScheduler::new(Duration::from_secs(5));
        scheduler.record_failure();
        scheduler.record_failure();
        scheduler.record_success();
        assert_eq!(scheduler.current_interval(), Duration::from_secs(5));
    }
}
