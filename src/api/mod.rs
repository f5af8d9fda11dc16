// src/api/mod.rs
// =============================================================================
// This module talks to the crawling service's HTTP API (v2).
//
// Submodules:
// - client: ApiClient, which sends one request at a time and turns HTTP
//   statuses and `success: false` bodies into ApiError values
// - models: the JSON request/response shapes we send and read
//
// Every endpoint lives under `<base-url>/api/v2/`.
// =============================================================================

mod client;
mod models;

pub use client::{ApiClient, ApiError};
pub use models::{
    BulkCrawlRequest, BulkCrawlStarted, BulkImportRequest, DomainRecord, DomainStats, QueueStats,
    RetryOutcome, DEFAULT_MAX_PAGES,
};
