// src/monitor/mod.rs
// =============================================================================
// Watches a running bulk crawl and draws a text dashboard.
//
// Submodules:
// - progress: snapshot counters, rate/ETA maths, idle detection
// - dashboard: the text frames (Display types)
// - poll: the loop that fetches, draws and sleeps
//
// Monitoring ends when the service reports nothing pending, nothing
// crawling and nothing processing. With the default of one idle snapshot a
// brief all-zero moment between queueing events also ends it; raise
// `completion_snapshots` to ride over that.
// =============================================================================

mod dashboard;
mod poll;
mod progress;

pub use poll::{monitor_progress, MonitorOptions, MonitorOutcome};
