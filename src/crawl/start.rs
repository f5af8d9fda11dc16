// src/crawl/start.rs
// =============================================================================
// Starts a bulk crawl with `POST domains/crawl/bulk`.
//
// The request body is always the same apart from maxConcurrent:
//
//   {
//     "maxConcurrent": 10,
//     "emailNotifications": true,
//     "crawlConfig": { "maxPages": 5, "maxDepth": 3, "politenessDelay": 1000,
//                      "respectRobotsTxt": true, "restrictToSeedDomain": true,
//                      "requestTimeout": 30000 }
//   }
//
// A successful answer carries an opaque batch id in data.batchId.
// =============================================================================

use crate::api::{ApiClient, ApiError, BulkCrawlRequest, BulkCrawlStarted};
use tracing::{debug, warn};

const STAGE: &str = "starting bulk crawl";

/// Sends the start request and returns the batch id.
///
/// A 2xx answer without a usable batch id counts as a failure.
pub async fn request_bulk_crawl(client: &ApiClient, max_concurrent: u32) -> Result<String, ApiError> {
    let request = BulkCrawlRequest::new(max_concurrent);
    debug!(?request, "starting bulk crawl");

    let response = client
        .post_json::<_, BulkCrawlStarted>("domains/crawl/bulk", &request, STAGE)
        .await?;

    response
        .data
        .and_then(|started| started.batch_id())
        .ok_or(ApiError::MissingField {
            stage: STAGE,
            field: "data.batchId",
        })
}

/// Starts the bulk crawl and prints the outcome.
///
/// Returns the batch id, or None if the crawl didn't start.
pub async fn start_bulk_crawl(client: &ApiClient, max_concurrent: u32) -> Option<String> {
    println!(
        "🚀 Starting bulk crawl with {} concurrent workers...",
        max_concurrent
    );

    match request_bulk_crawl(client, max_concurrent).await {
        Ok(batch_id) => {
            println!("✅ Bulk crawl started successfully (Batch ID: {})", batch_id);
            Some(batch_id)
        }
        Err(e @ ApiError::Rejected { .. }) => {
            println!("❌ Failed to start bulk crawl: {}", e);
            None
        }
        Err(e) => {
            warn!(stage = e.stage(), error = %e, "call failed");
            println!("❌ {}", e);
            None
        }
    }
}
