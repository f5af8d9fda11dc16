// src/monitor/dashboard.rs
// =============================================================================
// Renders the live dashboard and the final summary as plain text.
//
// Both are Display types, so the monitor prints them and tests compare the
// rendered text. Each frame starts with the ANSI "clear screen, cursor
// home" sequence so the terminal shows one frame at a time.
// =============================================================================

use super::progress::{Progress, ProgressSnapshot, BAR_WIDTH};
use std::fmt;
use std::time::Duration;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

// Formats a counter with thousands separators: 1234567 -> "1,234,567"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

fn minutes(duration: Duration) -> f64 {
    duration.as_secs_f64() / 60.0
}

/// The `|████----|` bar, or None when there's nothing to measure against.
pub fn progress_bar(snapshot: &ProgressSnapshot) -> Option<String> {
    let filled = snapshot.filled_cells(BAR_WIDTH)?;
    Some(format!(
        "{}{}",
        "█".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    ))
}

/// One full dashboard frame.
pub struct Dashboard<'a> {
    pub snapshot: &'a ProgressSnapshot,
    pub progress: &'a Progress,
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        let progress = self.progress;
        let domains = &snapshot.domains;
        let queue = &snapshot.queue;

        writeln!(f, "{}", CLEAR_SCREEN)?;
        writeln!(f, "🔍 **BULK CRAWLING DASHBOARD** 🔍")?;
        writeln!(f, "{}", "=".repeat(80))?;
        writeln!(f, "⏰ Runtime: {:.1} minutes", minutes(progress.elapsed))?;
        writeln!(
            f,
            "📊 Progress: {}/{} domains ({:.1}%)",
            domains.completed_domains,
            domains.total_domains,
            snapshot.percent_complete()
        )?;
        writeln!(f, "🏃 Rate: {:.1} domains/minute", progress.rate_per_sec * 60.0)?;
        writeln!(f, "⏳ ETA: {:.1} minutes remaining", progress.eta_secs / 60.0)?;
        writeln!(f)?;

        writeln!(f, "📋 **DOMAIN STATUS**")?;
        writeln!(f, "  ✅ Completed: {}", format_count(domains.completed_domains))?;
        writeln!(f, "  ⏳ Pending: {}", format_count(domains.pending_domains))?;
        writeln!(f, "  🚀 Crawling: {}", format_count(domains.crawling_domains))?;
        writeln!(f, "  ❌ Failed: {}", format_count(domains.failed_domains))?;
        writeln!(f, "  📧 Emails Sent: {}", format_count(domains.emails_sent))?;
        writeln!(f)?;

        writeln!(f, "🔄 **JOB QUEUE STATUS**")?;
        writeln!(f, "  ⏳ Queue Pending: {}", format_count(queue.pending))?;
        writeln!(f, "  ⚡ Processing: {}", format_count(queue.processing))?;
        writeln!(f, "  ✅ Queue Completed: {}", format_count(queue.completed))?;
        writeln!(f, "  ❌ Queue Failed: {}", format_count(queue.failed))?;
        writeln!(f)?;

        if let Some(bar) = progress_bar(snapshot) {
            writeln!(f, "📈 Progress: |{}| {:.1}%", bar, snapshot.percent_complete())?;
        }

        writeln!(f, "{}", "=".repeat(80))?;
        writeln!(f, "Press Ctrl+C to stop monitoring")
    }
}

/// Printed once when the crawl is done.
pub struct Summary<'a> {
    pub snapshot: &'a ProgressSnapshot,
    pub elapsed: Duration,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domains = &self.snapshot.domains;

        writeln!(f, "\n🎉 **CRAWLING COMPLETED!**")?;
        writeln!(f, "📊 Final Results:")?;
        writeln!(f, "  ✅ Successful: {} domains", format_count(domains.completed_domains))?;
        writeln!(f, "  ❌ Failed: {} domains", format_count(domains.failed_domains))?;
        writeln!(f, "  📧 Emails sent: {}", format_count(domains.emails_sent))?;
        writeln!(f, "  ⏰ Total time: {:.1} minutes", minutes(self.elapsed))
    }
}
