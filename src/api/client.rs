// src/api/client.rs
// =============================================================================
// A thin wrapper around reqwest for the crawling service's v2 API.
//
// Every call goes through the same steps:
// 1. Build the URL from the versioned base (`<base-url>/api/v2/<path>`)
// 2. Send the request and wait for the whole response
// 3. Reject non-2xx statuses (we never read an error body)
// 4. Decode the JSON envelope and reject `"success": false`
//
// No timeout, retry or backoff here: the service owns all of that. We send
// one request at a time and report what came back.
// =============================================================================

use super::models::ApiResponse;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Versioned prefix every endpoint hangs off.
const API_PREFIX: &str = "api/v2/";

/// Everything that can go wrong with one API call.
///
/// Each variant carries the stage name ("starting bulk crawl", ...) so the
/// message printed to the operator says what we were doing.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid endpoint URL while {stage}: {source}")]
    Url {
        stage: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed while {stage}: {source}")]
    Transport {
        stage: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP Error {} {stage}", .status.as_u16())]
    Status {
        stage: &'static str,
        status: StatusCode,
    },

    #[error("{message}")]
    Rejected {
        stage: &'static str,
        message: String,
    },

    #[error("malformed response while {stage}: {source}")]
    Decode {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("response to {stage} is missing `{field}`")]
    MissingField {
        stage: &'static str,
        field: &'static str,
    },
}

impl ApiError {
    /// What we were doing when the call failed.
    pub fn stage(&self) -> &'static str {
        match self {
            ApiError::Url { stage, .. }
            | ApiError::Transport { stage, .. }
            | ApiError::Status { stage, .. }
            | ApiError::Rejected { stage, .. }
            | ApiError::Decode { stage, .. }
            | ApiError::MissingField { stage, .. } => stage,
        }
    }
}

/// Client for the crawling service.
///
/// Cheap to clone (reqwest's Client is reference counted internally), but
/// the tool only ever needs one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_base: Url,
}

impl ApiClient {
    /// Creates a client for the service at `base_url` (e.g. `http://localhost:3000`).
    ///
    /// Fails if `base_url` isn't an absolute http(s) URL.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid base URL '{}': {}", base_url, e))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!("Base URL must use http or https: {}", base_url);
        }

        // `?k=v` or `#frag` would otherwise swallow the prefix
        base.set_query(None);
        base.set_fragment(None);

        // Normalise to exactly one slash before the prefix so that
        // `http://host` and `http://host/` (and `http://host/proxy/`) all work
        let api_base = Url::parse(&format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            API_PREFIX
        ))?;

        let http = Client::builder().build()?;

        Ok(Self { http, api_base })
    }

    /// The URL every endpoint path is resolved against.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn endpoint(&self, path: &str, stage: &'static str) -> Result<Url, ApiError> {
        self.api_base
            .join(path)
            .map_err(|source| ApiError::Url { stage, source })
    }

    /// POSTs `body` as JSON and returns the decoded envelope.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        stage: &'static str,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, stage)?;
        self.send_json(self.http.post(url).json(body), stage).await
    }

    /// POSTs with no body and returns the decoded envelope.
    pub async fn post<T>(&self, path: &str, stage: &'static str) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, stage)?;
        self.send_json(self.http.post(url), stage).await
    }

    /// GETs a JSON endpoint and returns its `data`, or the default when
    /// the envelope carries none.
    pub async fn get_data<T>(&self, path: &str, stage: &'static str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint(path, stage)?;
        let envelope: ApiResponse<T> = self.send_json(self.http.get(url), stage).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// GETs an endpoint and returns the body bytes untouched.
    pub async fn get_raw(&self, path: &str, stage: &'static str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(path, stage)?;
        let bytes = self.send(self.http.get(url), stage).await?;
        Ok(bytes)
    }

    // Sends a request and returns the body of a 2xx response
    async fn send(&self, request: RequestBuilder, stage: &'static str) -> Result<Vec<u8>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Transport { stage, source })?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), stage, "response received");

        if !status.is_success() {
            return Err(ApiError::Status { stage, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { stage, source })?;

        Ok(body.to_vec())
    }

    async fn send_json<T>(
        &self,
        request: RequestBuilder,
        stage: &'static str,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.send(request, stage).await?;

        let envelope: ApiResponse<T> =
            serde_json::from_slice(&body).map_err(|source| ApiError::Decode { stage, source })?;

        if envelope.success == Some(false) {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("server reported failure while {}", stage));
            return Err(ApiError::Rejected { stage, message });
        }

        Ok(envelope)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why thiserror here and anyhow in main.rs?
//    - Callers match on ApiError variants (e.g. Rejected prints the server's
//      message differently), so it needs to be a real enum
//    - main.rs only reports errors, so anyhow's "any error" type is enough
//
// 2. What is DeserializeOwned?
//    - A serde bound meaning "can be built from JSON without borrowing from
//      the input", needed because the response body is dropped afterwards
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QueueStats;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_api_base_normalised() {
        for base in ["http://localhost:3000", "http://localhost:3000/"] {
            let client = ApiClient::new(base).unwrap();
            assert_eq!(client.api_base().as_str(), "http://localhost:3000/api/v2/");
        }

        let client = ApiClient::new("https://crawler.example.com/proxy").unwrap();
        assert_eq!(
            client.api_base().as_str(),
            "https://crawler.example.com/proxy/api/v2/"
        );
    }

    #[test]
    fn test_api_base_drops_query_and_fragment() {
        let client = ApiClient::new("http://h/?k=v#frag").unwrap();
        assert_eq!(client.api_base().as_str(), "http://h/api/v2/");

        let client = ApiClient::new("http://h/proxy?k=v").unwrap();
        assert_eq!(
            client.endpoint("domains/stats", "test").unwrap().as_str(),
            "http://h/proxy/api/v2/domains/stats"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("ftp://example.com").is_err());
    }

    #[tokio::test]
    async fn test_status_error_carries_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/domains/jobs/retry"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let err = client
            .post::<serde_json::Value>("domains/jobs/retry", "retrying jobs")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                ..
            }
        ));
        assert_eq!(err.stage(), "retrying jobs");
        assert_eq!(err.to_string(), "HTTP Error 503 retrying jobs");
    }

    #[tokio::test]
    async fn test_success_false_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/domains/bulk"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "invalid email"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let err = client
            .post_json::<_, serde_json::Value>("domains/bulk", &json!({"domains": []}), "importing")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Rejected { .. }));
        assert_eq!(err.to_string(), "invalid email");
    }

    #[tokio::test]
    async fn test_get_data_missing_data_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/domains/queue/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let stats: QueueStats = client
            .get_data("domains/queue/stats", "fetching queue stats")
            .await
            .unwrap();

        assert_eq!(stats, QueueStats::default());
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/domains/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let err = client
            .get_data::<QueueStats>("domains/stats", "fetching domain stats")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
