// src/monitor/progress.rs
// =============================================================================
// Turns raw counters into progress figures.
//
// - ProgressSnapshot: what the two stats endpoints said on one poll
// - ProgressTracker: remembers the previous completed-count so it can work
//   out a completion rate, and counts idle snapshots in a row
// - Progress: everything the dashboard needs for one frame
// =============================================================================

use crate::api::{DomainStats, QueueStats};
use std::time::Duration;

/// Width of the dashboard's progress bar, in characters.
pub const BAR_WIDTH: usize = 50;

/// Counters fetched on one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub domains: DomainStats,
    pub queue: QueueStats,
}

impl ProgressSnapshot {
    /// Nothing pending, nothing crawling, nothing processing in the queue.
    ///
    /// Failed or completed counts don't matter here.
    pub fn is_idle(&self) -> bool {
        self.domains.pending_domains == 0
            && self.domains.crawling_domains == 0
            && self.queue.processing == 0
    }

    /// Percent of all domains that completed, 0.0 when there are none.
    pub fn percent_complete(&self) -> f64 {
        let total = self.domains.total_domains.max(1);
        self.domains.completed_domains as f64 / total as f64 * 100.0
    }

    /// Number of filled cells in a bar of `width`, rounded down.
    ///
    /// None when there are no domains at all (no bar is drawn).
    pub fn filled_cells(&self, width: usize) -> Option<usize> {
        let total = self.domains.total_domains;
        if total == 0 {
            return None;
        }

        let completed = self.domains.completed_domains.min(total);
        Some((width as u128 * completed as u128 / total as u128) as usize)
    }
}

/// Figures derived from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Time since monitoring started
    pub elapsed: Duration,
    /// Domains completed per second since the previous poll
    pub rate_per_sec: f64,
    /// Estimated seconds until pending domains are done (0 when unknown)
    pub eta_secs: f64,
    /// True once enough idle snapshots have been seen in a row
    pub finished: bool,
}

/// Keeps the little bit of history the monitor needs between polls.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    interval: Duration,
    required_idle: u32,
    last_completed: u64,
    idle_streak: u32,
}

impl ProgressTracker {
    /// `required_idle` is how many idle snapshots in a row end monitoring
    /// (values below 1 are treated as 1).
    pub fn new(interval: Duration, required_idle: u32) -> Self {
        Self {
            interval,
            required_idle: required_idle.max(1),
            last_completed: 0,
            idle_streak: 0,
        }
    }

    /// Derives rate, ETA and completion from `snapshot`, taken `elapsed`
    /// after monitoring began.
    ///
    /// The rate stays 0 until more than one interval has passed. It is the
    /// change in completed-count since the last snapshot divided by the
    /// interval, so it can go negative if the service's count drops.
    pub fn observe(&mut self, snapshot: &ProgressSnapshot, elapsed: Duration) -> Progress {
        let completed = snapshot.domains.completed_domains;
        let interval_secs = self.interval.as_secs_f64();

        let rate_per_sec = if elapsed > self.interval && interval_secs > 0.0 {
            (completed as f64 - self.last_completed as f64) / interval_secs
        } else {
            0.0
        };

        let eta_secs = if rate_per_sec > 0.0 {
            snapshot.domains.pending_domains as f64 / rate_per_sec
        } else {
            0.0
        };

        if snapshot.is_idle() {
            self.idle_streak += 1;
        } else {
            self.idle_streak = 0;
        }

        let finished = self.idle_streak >= self.required_idle;
        if !finished {
            self.last_completed = completed;
        }

        Progress {
            elapsed,
            rate_per_sec,
            eta_secs,
            finished,
        }
    }
}
