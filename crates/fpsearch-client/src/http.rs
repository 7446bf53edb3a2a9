// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Result, SearchError};
use crate::fingerprint::Fingerprint;
use crate::models::Segment;
use crate::status::{Status, StatusCode};
use crate::transport::{MatchHandle, ResultHandle, SearchTransport};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

const USER_AGENT: &str = concat!("fpsearch/", env!("CARGO_PKG_VERSION"));

/// Pending search registered with the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpPending {
    lookup_id: u64,
}

/// Completed result as returned by the HTTP service.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpResults {
    lookup_id: u64,
    ugc_id: u64,
    #[serde(default)]
    matches: VecDeque<HttpMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpMatch {
    asset_id: u64,
    #[serde(default)]
    segments: VecDeque<Segment>,
}

impl ResultHandle for HttpResults {
    type Match = HttpMatch;

    fn lookup_id(&self) -> u64 {
        self.lookup_id
    }

    fn ugc_id(&self) -> u64 {
        self.ugc_id
    }

    fn next_match(&mut self) -> Option<HttpMatch> {
        self.matches.pop_front()
    }
}

impl MatchHandle for HttpMatch {
    fn asset_id(&self) -> u64 {
        self.asset_id
    }

    fn next_segment(&mut self) -> Option<Segment> {
        self.segments.pop_front()
    }
}

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    fingerprint: &'a str,
    duration: u32,
    algorithm: u32,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    lookup_id: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Search transport backed by a JSON-over-HTTP service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    poll_interval: Duration,
}

impl HttpTransport {
    /// Create a transport with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    /// Create a transport builder for custom configuration.
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, Status> {
        Url::parse(&format!("{}/{}", self.base_url.trim_end_matches('/'), path))
            .map_err(|e| Status::from_code(StatusCode::InvalidInput, e.to_string()))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    type Pending = HttpPending;
    type Results = HttpResults;

    async fn submit(&self, fingerprint: &Fingerprint) -> std::result::Result<HttpPending, Status> {
        let url = self.endpoint("search")?;
        trace!(target: "search", "submit: POST {}", url);

        let body = SubmitBody {
            fingerprint: &fingerprint.hash,
            duration: fingerprint.duration,
            algorithm: fingerprint.algorithm,
        };

        let response = self
            .authorize(self.client.post(url.as_str()))
            .json(&body)
            .send()
            .await
            .map_err(transport_status)?;

        let status = response.status();
        debug!(target: "search", "submit response status: {}", status);

        if !status.is_success() {
            return Err(error_status(response).await);
        }

        let body = response.text().await.map_err(transport_status)?;
        trace!(target: "search", "submit response: {}", body);

        let submitted: SubmitResponse = serde_json::from_str(&body)
            .map_err(|e| Status::from_code(StatusCode::InternalError, e.to_string()))?;

        Ok(HttpPending {
            lookup_id: submitted.lookup_id,
        })
    }

    fn lookup_id(pending: &HttpPending) -> u64 {
        pending.lookup_id
    }

    async fn fetch(&self, pending: HttpPending) -> std::result::Result<HttpResults, Status> {
        let url = self.endpoint(&format!("search/{}", pending.lookup_id))?;

        loop {
            trace!(target: "search", "fetch: GET {}", url);

            let response = self
                .authorize(self.client.get(url.as_str()))
                .send()
                .await
                .map_err(transport_status)?;

            let status = response.status();
            debug!(target: "search", "fetch response status: {}", status);

            if status == reqwest::StatusCode::ACCEPTED {
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }

            if !status.is_success() {
                return Err(error_status(response).await);
            }

            let body = response.text().await.map_err(transport_status)?;
            trace!(target: "search", "fetch response: {}", body);

            return serde_json::from_str(&body)
                .map_err(|e| Status::from_code(StatusCode::InternalError, e.to_string()));
        }
    }
}

fn transport_status(err: reqwest::Error) -> Status {
    let code = if err.is_timeout() {
        StatusCode::DeadlineExceeded
    } else {
        StatusCode::ConnectionError
    };
    Status::from_code(code, err.to_string())
}

async fn error_status(response: reqwest::Response) -> Status {
    let status = response.status();
    let code = match status.as_u16() {
        400 => StatusCode::InvalidInput,
        401 | 403 => StatusCode::Unauthenticated,
        404 => StatusCode::NotFound,
        408 | 504 => StatusCode::DeadlineExceeded,
        _ => StatusCode::InternalError,
    };

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(text);

    Status::from_code(code, format!("HTTP {}: {}", status, message))
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    poll_interval: Duration,
}

impl HttpTransportBuilder {
    /// Create a new builder.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(500),
        }
    }

    /// Send this key as a bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the timeout of each HTTP request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay between polls while a search is still running.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The base URL is not a valid URL format
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<HttpTransport> {
        Url::parse(&self.base_url)
            .map_err(|e| SearchError::Configuration(format!("Invalid base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(HttpTransport {
            client,
            base_url: self.base_url,
            api_key: self.api_key,
            poll_interval: self.poll_interval,
        })
    }
}
