// src/crawl/retry.rs
// =============================================================================
// Asks the service to re-enqueue its failed crawl and email jobs.
//
// `POST domains/jobs/retry` takes no body. The service decides what counts
// as failed, so calling this twice just asks twice.
// =============================================================================

use crate::api::{ApiClient, ApiError, RetryOutcome};
use tracing::warn;

const STAGE: &str = "retrying jobs";

/// Sends the retry request and returns how many jobs the service re-queued.
pub async fn request_retry(client: &ApiClient) -> Result<u64, ApiError> {
    let response = client
        .post::<RetryOutcome>("domains/jobs/retry", STAGE)
        .await?;

    Ok(response.data.unwrap_or_default().retried_count)
}

/// Retries failed jobs and prints the outcome. Returns true on success.
pub async fn retry_failed_jobs(client: &ApiClient) -> bool {
    println!("🔄 Retrying failed jobs...");

    match request_retry(client).await {
        Ok(count) => {
            println!("✅ Successfully retried {} failed jobs", count);
            true
        }
        Err(e @ ApiError::Rejected { .. }) => {
            println!("❌ Failed to retry jobs: {}", e);
            false
        }
        Err(e) => {
            warn!(stage = e.stage(), error = %e, "call failed");
            println!("❌ {}", e);
            false
        }
    }
}
