// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Import the domains from the CSV file (stop on failure)
// 3. Start the bulk crawl (stop on failure)
// 4. Unless --no-monitor: watch the dashboard, then export the results
// 5. Exit with proper code (0 = success, 1 = import/start failed, 2 = error,
//    130 = export interrupted by Ctrl+C)
//
// --retry-failed skips all of that and only asks the service to retry its
// failed jobs.
//
// Everything runs on one thread, one request at a time. The only waits are
// the pause between import batches and the sleep between dashboard polls.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod api;        // src/api/ - HTTP client and JSON shapes
mod cli;        // src/cli.rs - command-line parsing
mod crawl;      // src/crawl/ - start a bulk crawl, retry failed jobs
mod export;     // src/export.rs - download results as CSV
mod import;     // src/import/ - CSV reading and batched import
mod logging;    // src/logging.rs - tracing setup
mod monitor;    // src/monitor/ - progress dashboard

use clap::Parser;
use cli::Cli;
use monitor::{MonitorOptions, MonitorOutcome};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use anyhow::Result;

// A single-threaded runtime is enough: nothing here runs concurrently
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    run_with(cli, ctrl_c).await
}

// Runs the stages for already-parsed arguments. `shutdown` makes a fresh
// "stop now" future for each stage that can be interrupted.
//
// Returns:
//   Ok(0)   = everything went through
//   Ok(1)   = import, crawl start or retry failed
//   Ok(130) = Ctrl+C while exporting
//   Err     = unexpected error (bad base URL, client setup)
async fn run_with<S, F>(cli: Cli, shutdown: S) -> Result<i32>
where
    S: Fn() -> F,
    F: Future<Output = ()>,
{
    let client = api::ApiClient::new(&cli.base_url)?;
    info!(api_base = %client.api_base(), "using crawling service");

    println!("🚀 **BULK DOMAIN CRAWLER** 🚀");
    println!("{}", "=".repeat(50));

    if cli.retry_failed {
        return Ok(if crawl::retry_failed_jobs(&client).await { 0 } else { 1 });
    }

    // clap guarantees this when --retry-failed is absent
    let Some(csv_file) = cli.csv_file.as_deref() else {
        anyhow::bail!("a CSV file is required");
    };

    // Step 1: Import domains
    if !import::import_domains_from_csv(&client, csv_file, &import::ImportOptions::default()).await {
        println!("❌ Failed to import domains. Exiting.");
        return Ok(1);
    }

    // Step 2: Start bulk crawl
    let Some(batch_id) = crawl::start_bulk_crawl(&client, cli.max_concurrent).await else {
        println!("❌ Failed to start bulk crawl. Exiting.");
        return Ok(1);
    };
    info!(%batch_id, "bulk crawl running");

    // Step 3: Monitor progress (unless disabled)
    if cli.no_monitor {
        println!("✅ Bulk crawl started successfully!");
        println!("💡 Drop --no-monitor to track progress, or check the web dashboard");
    } else {
        let options = MonitorOptions {
            interval: Duration::from_secs(cli.monitor_interval),
            completion_snapshots: cli.completion_snapshots,
        };

        match monitor::monitor_progress(&client, &options, shutdown()).await {
            MonitorOutcome::Completed { elapsed, .. } => {
                info!(elapsed_secs = elapsed.as_secs(), "crawl finished");
            }
            MonitorOutcome::Interrupted => info!("monitoring interrupted"),
        }

        // Step 4: Export results (a failed export doesn't change the exit code)
        // A new listener: the monitor's one is gone, and without it a second
        // Ctrl+C would be swallowed while the download hangs
        let output = cli.output.clone().unwrap_or_else(export::default_export_path);
        tokio::select! {
            biased;
            _ = shutdown() => {
                println!("\n⏹️  Export stopped by user");
                return Ok(130);
            }
            _ = export::export_results(&client, &output) => {}
        }
    }

    println!("🎉 Bulk crawling process completed!");
    Ok(0)
}

// Resolves on Ctrl+C. If the signal handler can't be installed, never
// resolves, so monitoring just runs until the crawl is done.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
