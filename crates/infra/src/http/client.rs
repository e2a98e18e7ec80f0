use std::time::Duration;

use konexus_domain::constants::{DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS};
use konexus_domain::KonexusError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Longest request body written to the debug log.
const MAX_LOGGED_BODY: usize = 4096;

/// Pooled HTTP client shared by every service client.
///
/// Cloning is cheap and shares the connection pool. By default each request
/// is sent once; [`HttpClientBuilder::max_attempts`] opts into retries of
/// 5xx responses and connect failures with exponential backoff.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, KonexusError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// The underlying reqwest client, for callers that need raw access to
    /// the pool (the OAuth bootstrap).
    pub fn inner(&self) -> &ReqwestClient {
        &self.client
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Execute the provided request builder with retry semantics.
    ///
    /// Streaming bodies (multipart uploads) cannot be cloned and are sent
    /// exactly once whatever the configured attempt count.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, KonexusError> {
        let attempts = self.max_attempts.max(1);
        let mut pending = Some(builder);

        for attempt in 0..attempts {
            let Some(current) = pending.take() else { break };
            if attempt + 1 < attempts {
                pending = current.try_clone();
            }
            let can_retry = pending.is_some();

            let request = current.build().map_err(|err| KonexusError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            match request.body().and_then(reqwest::Body::as_bytes) {
                Some(bytes) => debug!(
                    attempt = attempt + 1,
                    %method,
                    %url,
                    body = %truncate(&String::from_utf8_lossy(bytes)),
                    "sending HTTP request"
                ),
                None => debug!(attempt = attempt + 1, %method, %url, "sending HTTP request"),
            }

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if status.is_server_error() && can_retry {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %url, error = %err, "HTTP request failed");

                    if can_retry && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(InfraError::from(err).into());
                }
            }
        }

        Err(KonexusError::Internal("http client exhausted retries without producing a result".into()))
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_attempts: DEFAULT_HTTP_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, KonexusError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        builder = builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| concat!("konexus-client/", env!("CARGO_PKG_VERSION")).to_string()),
        );

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| KonexusError::from(InfraError::from(err)))?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_request() || err.is_connect()
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_LOGGED_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
