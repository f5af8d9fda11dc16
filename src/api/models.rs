// src/api/models.rs
// =============================================================================
// JSON shapes exchanged with the crawling service.
//
// The service speaks camelCase JSON and wraps every answer in an envelope:
//
//   { "success": true, "message": "...", "data": { ... } }
//
// Request types derive Serialize, response types derive Deserialize.
// Response counters default to zero so a partial payload still renders.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Pages crawled per domain when the CSV doesn't say otherwise.
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// One domain to import, as read from a CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    pub domain: String,
    pub webmaster_email: String,
    pub max_pages: u32,
}

/// Body of `POST domains/bulk`.
#[derive(Debug, Serialize)]
pub struct BulkImportRequest<'a> {
    pub domains: &'a [DomainRecord],
}

/// Per-domain crawl settings sent with a bulk crawl.
///
/// These are fixed for every run; only `maxConcurrent` on the outer
/// request comes from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlParameters {
    pub max_pages: u32,
    pub max_depth: u32,
    /// Milliseconds between requests to the same domain
    pub politeness_delay: u64,
    pub respect_robots_txt: bool,
    pub restrict_to_seed_domain: bool,
    /// Per-request timeout on the service side, in milliseconds
    pub request_timeout: u64,
}

impl Default for CrawlParameters {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: 3,
            politeness_delay: 1000,
            respect_robots_txt: true,
            restrict_to_seed_domain: true,
            request_timeout: 30_000,
        }
    }
}

/// Body of `POST domains/crawl/bulk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCrawlRequest {
    pub max_concurrent: u32,
    pub email_notifications: bool,
    pub crawl_config: CrawlParameters,
}

impl BulkCrawlRequest {
    pub fn new(max_concurrent: u32) -> Self {
        Self {
            max_concurrent,
            email_notifications: true,
            crawl_config: CrawlParameters::default(),
        }
    }
}

/// The envelope every JSON endpoint answers with.
///
/// `success` is optional: only an explicit `false` counts as a rejection.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// `data` of `POST domains/crawl/bulk`.
///
/// The batch id is opaque: some deployments send a string, others a number.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCrawlStarted {
    #[serde(default)]
    pub batch_id: Option<serde_json::Value>,
}

impl BulkCrawlStarted {
    /// The batch id as text, or None when missing or empty.
    pub fn batch_id(&self) -> Option<String> {
        match self.batch_id.as_ref()? {
            serde_json::Value::String(id) if id.is_empty() => None,
            serde_json::Value::String(id) => Some(id.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// `data` of `POST domains/jobs/retry`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryOutcome {
    pub retried_count: u64,
}

/// `data` of `GET domains/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainStats {
    pub total_domains: u64,
    pub completed_domains: u64,
    pub failed_domains: u64,
    pub crawling_domains: u64,
    pub pending_domains: u64,
    pub emails_sent: u64,
}

/// `data` of `GET domains/queue/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueueStats {
    pub pending: u64,
    pub processing: u64,
    pub completed: u64,
    pub failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_domain_record_uses_camel_case() {
        let record = DomainRecord {
            domain: "example.com".to_string(),
            webmaster_email: "admin@example.com".to_string(),
            max_pages: 5,
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"domain": "example.com", "webmasterEmail": "admin@example.com", "maxPages": 5})
        );
    }

    #[test]
    fn test_bulk_crawl_request_body() {
        let body = serde_json::to_value(BulkCrawlRequest::new(42)).unwrap();
        assert_eq!(
            body,
            json!({
                "maxConcurrent": 42,
                "emailNotifications": true,
                "crawlConfig": {
                    "maxPages": 5,
                    "maxDepth": 3,
                    "politenessDelay": 1000,
                    "respectRobotsTxt": true,
                    "restrictToSeedDomain": true,
                    "requestTimeout": 30000
                }
            })
        );
    }

    #[test]
    fn test_partial_stats_default_to_zero() {
        let stats: DomainStats =
            serde_json::from_value(json!({"totalDomains": 200, "completedDomains": 50})).unwrap();
        assert_eq!(stats.total_domains, 200);
        assert_eq!(stats.completed_domains, 50);
        assert_eq!(stats.pending_domains, 0);
        assert_eq!(stats.emails_sent, 0);
    }

    #[test]
    fn test_batch_id_string_or_number() {
        let started: BulkCrawlStarted =
            serde_json::from_value(json!({"batchId": "batch-7"})).unwrap();
        assert_eq!(started.batch_id(), Some("batch-7".to_string()));

        let started: BulkCrawlStarted = serde_json::from_value(json!({"batchId": 17})).unwrap();
        assert_eq!(started.batch_id(), Some("17".to_string()));

        let started: BulkCrawlStarted = serde_json::from_value(json!({"batchId": ""})).unwrap();
        assert_eq!(started.batch_id(), None);

        let started: BulkCrawlStarted = serde_json::from_value(json!({})).unwrap();
        assert_eq!(started.batch_id(), None);
    }

    #[test]
    fn test_envelope_without_success_flag() {
        let response: ApiResponse<QueueStats> =
            serde_json::from_value(json!({"data": {"pending": 3}})).unwrap();
        assert_eq!(response.success, None);
        assert_eq!(response.data.unwrap().pending, 3);
    }
}
