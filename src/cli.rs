// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is one command with a handful of flags:
//
//   bulk-crawl domains.csv [--base-url URL] [--max-concurrent N]
//                          [--monitor-interval SECS] [--no-monitor]
//                          [--completion-snapshots N] [--output FILE]
//   bulk-crawl --retry-failed [--base-url URL]
//
// Every flag that points at the service can also come from an environment
// variable (BULK_CRAWL_*), which is handy in CI.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "bulk-crawl",
    version = "0.1.0",
    about = "Bulk domain crawling tool",
    long_about = "bulk-crawl imports domains and webmaster emails from a CSV file into the \
                  search engine's crawling service, starts a bulk crawl and shows a live \
                  progress dashboard until the crawl finishes. Results are exported to CSV."
)]
pub struct Cli {
    /// CSV file containing domains and webmaster emails
    ///
    /// Required columns: domain, webmaster_email. Optional: max_pages.
    #[arg(required_unless_present = "retry_failed", conflicts_with = "retry_failed")]
    pub csv_file: Option<PathBuf>,

    /// Base URL of the search engine API
    #[arg(long, env = "BULK_CRAWL_BASE_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Maximum concurrent crawl sessions (forwarded to the service)
    #[arg(
        long,
        env = "BULK_CRAWL_MAX_CONCURRENT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_concurrent: u32,

    /// Monitoring check interval in seconds
    #[arg(
        long,
        env = "BULK_CRAWL_MONITOR_INTERVAL",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub monitor_interval: u64,

    /// Skip monitoring (and exporting) after starting the crawl
    #[arg(long)]
    pub no_monitor: bool,

    /// Number of consecutive idle snapshots required before the crawl
    /// is considered finished
    ///
    /// An idle snapshot has no pending domains, no domains crawling and
    /// nothing processing in the job queue. The default of 1 stops at the
    /// first idle snapshot.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub completion_snapshots: u32,

    /// Where to write exported results (default: crawl_results_<timestamp>.csv)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only ask the service to retry its failed crawl and email jobs, then exit
    #[arg(long)]
    pub retry_failed: bool,

    /// Print debug diagnostics to stderr
    #[arg(long, short)]
    pub verbose: bool,
}
