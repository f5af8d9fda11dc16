// src/crawl/mod.rs
// =============================================================================
// This module asks the service to crawl (or re-crawl) what we imported.
//
// Features:
// - Start one bulk crawl over every imported domain, with fixed per-domain
//   settings and a caller-chosen concurrency
// - Ask the service to retry whatever crawl/email jobs it considers failed
//
// The crawling itself happens on the server. Both calls are single POSTs
// with no retry on our side.
// =============================================================================

mod retry;
mod start;

// Re-export the operator-facing entry points
pub use retry::retry_failed_jobs;
pub use start::start_bulk_crawl;
