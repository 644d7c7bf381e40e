//! Running batch counters.
//!
//! The driver owns one [`RunTally`] and records every finished run into it;
//! reporting code only ever borrows it.

use std::time::Duration;

use serde::Serialize;

/// Completed/succeeded/failed counts and observed durations for a batch.
#[derive(Debug, Clone, Default)]
pub struct RunTally {
    total: usize,
    succeeded: usize,
    failed: usize,
    durations: Vec<Duration>,
}

impl RunTally {
    /// Empty tally for a batch of `total` configurations.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
            durations: Vec::with_capacity(total),
        }
    }

    /// Record one finished run.
    pub fn record(&mut self, success: bool, duration: Duration) {
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.durations.push(duration);
    }

    /// Configurations in the batch.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Runs recorded so far.
    pub fn completed(&self) -> usize {
        self.durations.len()
    }

    /// Successful runs so far.
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Failed runs so far.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Configurations not yet run.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed())
    }

    /// Completion percentage (0 for an empty batch).
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed() as f64 / self.total as f64 * 100.0
    }

    /// Mean of all observed durations.
    pub fn average_duration(&self) -> Option<Duration> {
        if self.durations.is_empty() {
            return None;
        }
        let sum: Duration = self.durations.iter().sum();
        Some(sum.div_f64(self.durations.len() as f64))
    }

    /// `remaining × average`, once there is a positive average and work left.
    pub fn estimated_remaining(&self) -> Option<Duration> {
        let remaining = self.remaining();
        if remaining == 0 {
            return None;
        }
        self.average_duration()
            .filter(|avg| !avg.is_zero())
            .map(|avg| avg.mul_f64(remaining as f64))
    }

    /// Whether every recorded run succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            total: self.total,
            completed: self.completed(),
            succeeded: self.succeeded,
            failed: self.failed,
            average_secs: self.average_duration().map(|d| d.as_secs_f64()),
        }
    }
}

/// Serializable counters, logged at the end of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallySnapshot {
    /// Configurations in the batch.
    pub total: usize,
    /// Runs recorded.
    pub completed: usize,
    /// Successful runs.
    pub succeeded: usize,
    /// Failed runs.
    pub failed: usize,
    /// Mean run duration in seconds.
    pub average_secs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting() {
        let mut tally = RunTally::new(3);
        tally.record(true, Duration::from_secs(4));
        tally.record(false, Duration::from_secs(2));

        assert_eq!(tally.completed(), 2);
        assert_eq!(tally.succeeded(), 1);
        assert_eq!(tally.failed(), 1);
        assert_eq!(tally.remaining(), 1);
        assert!(!tally.all_succeeded());
    }

    #[test]
    fn test_average_includes_latest() {
        let mut tally = RunTally::new(4);
        tally.record(true, Duration::from_secs(2));
        tally.record(true, Duration::from_secs(4));
        assert_eq!(tally.average_duration(), Some(Duration::from_secs(3)));
        assert_eq!(tally.estimated_remaining(), Some(Duration::from_secs(6)));
    }

    #[test]
    fn test_no_estimate_when_done() {
        let mut tally = RunTally::new(1);
        tally.record(true, Duration::from_secs(10));
        assert_eq!(tally.remaining(), 0);
        assert!(tally.estimated_remaining().is_none());
    }

    #[test]
    fn test_no_estimate_before_first_run() {
        let tally = RunTally::new(5);
        assert!(tally.average_duration().is_none());
        assert!(tally.estimated_remaining().is_none());
    }

    #[test]
    fn test_percent_complete() {
        let mut tally = RunTally::new(11);
        tally.record(true, Duration::from_millis(1));
        assert_eq!(format!("{:.1}", tally.percent_complete()), "9.1");
        assert_eq!(RunTally::new(0).percent_complete(), 0.0);
    }

    #[test]
    fn test_snapshot() {
        let mut tally = RunTally::new(2);
        tally.record(true, Duration::from_secs(1));
        let snap = tally.snapshot();
        assert_eq!(snap.completed, 1);
        assert_eq!(snap.average_secs, Some(1.0));
        let json = serde_json::to_string(&snap).expect("serialize");
        assert!(json.contains("\"succeeded\":1"));
    }
}
