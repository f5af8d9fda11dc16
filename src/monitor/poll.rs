// src/monitor/poll.rs
// =============================================================================
// The polling loop behind the live dashboard.
//
// Each iteration:
// 1. GET domains/stats and GET domains/queue/stats (one after the other);
//    a failed call just means zeros for that half of the snapshot
// 2. Work out rate and ETA from the previous iteration
// 3. Redraw the dashboard
// 4. Stop if the crawl looks finished, otherwise sleep for the interval
//
// A shutdown future (Ctrl+C in main) is raced against both the poll and the
// sleep, so interrupting never waits for the interval to run out.
// =============================================================================

use super::dashboard::{Dashboard, Summary};
use super::progress::{ProgressSnapshot, ProgressTracker};
use crate::api::{ApiClient, DomainStats, QueueStats};
use std::future::Future;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{error, warn};

/// Settings for [`monitor_progress`].
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Time between polls
    pub interval: Duration,
    /// Idle snapshots in a row before the crawl counts as finished
    pub completion_snapshots: u32,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            completion_snapshots: 1,
        }
    }
}

/// How monitoring ended.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorOutcome {
    /// The service went idle; holds the last snapshot and the total runtime
    Completed {
        snapshot: ProgressSnapshot,
        elapsed: Duration,
    },
    /// The operator stopped monitoring
    Interrupted,
}

/// Fetches both halves of a snapshot. Never fails: a call that goes wrong
/// is logged and contributes zeros.
pub async fn fetch_snapshot(client: &ApiClient) -> ProgressSnapshot {
    let domains = client
        .get_data::<DomainStats>("domains/stats", "fetching domain stats")
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "domain stats unavailable, showing zeros");
            DomainStats::default()
        });

    let queue = client
        .get_data::<QueueStats>("domains/queue/stats", "fetching queue stats")
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "queue stats unavailable, showing zeros");
            QueueStats::default()
        });

    ProgressSnapshot { domains, queue }
}

// Writes a frame straight to stdout and flushes it
fn print_frame(frame: &impl std::fmt::Display) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", frame)?;
    stdout.flush()
}

/// Polls until the crawl finishes or `shutdown` resolves.
///
/// Errors inside an iteration (e.g. stdout going away) are logged and the
/// loop carries on after a full interval. There is no error budget.
pub async fn monitor_progress<F>(
    client: &ApiClient,
    options: &MonitorOptions,
    shutdown: F,
) -> MonitorOutcome
where
    F: Future<Output = ()>,
{
    println!(
        "📊 Starting monitoring (checking every {} seconds)...",
        options.interval.as_secs()
    );
    println!("📈 Progress Dashboard:");
    println!("{}", "=".repeat(80));

    tokio::pin!(shutdown);

    let start = Instant::now();
    let mut tracker = ProgressTracker::new(options.interval, options.completion_snapshots);

    loop {
        let iteration = async {
            let snapshot = fetch_snapshot(client).await;
            let progress = tracker.observe(&snapshot, start.elapsed());

            print_frame(&Dashboard {
                snapshot: &snapshot,
                progress: &progress,
            })?;

            Ok::<_, std::io::Error>((snapshot, progress))
        };

        let result = tokio::select! {
            biased;
            _ = &mut shutdown => return stopped_by_user(),
            result = iteration => result,
        };

        match result {
            Ok((snapshot, progress)) if progress.finished => {
                let summary = Summary {
                    snapshot: &snapshot,
                    elapsed: progress.elapsed,
                };
                print!("{}", summary);
                return MonitorOutcome::Completed {
                    snapshot,
                    elapsed: progress.elapsed,
                };
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "monitoring iteration failed");
                println!("❌ Error during monitoring: {}", e);
            }
        }

        tokio::select! {
            biased;
            _ = &mut shutdown => return stopped_by_user(),
            _ = tokio::time::sleep(options.interval) => {}
        }
    }
}

fn stopped_by_user() -> MonitorOutcome {
    println!("\n⏹️  Monitoring stopped by user");
    MonitorOutcome::Interrupted
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does tokio::select! do?
//    - Waits on several futures at once and runs the branch of whichever
//      finishes first; the others are dropped (cancelled)
//    - `biased;` checks branches top to bottom instead of randomly, so a
//      pending Ctrl+C always wins over a poll that's also ready
//
// 2. Why tokio::pin!(shutdown)?
//    - select! needs to poll the same shutdown future on every iteration
//    - Polling through `&mut` requires the future not to move in memory,
//      which is what pinning guarantees
//
// 3. Why is shutdown a generic Future instead of Ctrl+C directly?
//    - main passes Ctrl+C, tests pass a timer or an already-ready future
// -----------------------------------------------------------------------------
