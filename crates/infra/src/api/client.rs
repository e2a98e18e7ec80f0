//! JSON API client shared by every resource sub-client
//!
//! Wraps the pooled [`HttpClient`] with a base URL, a per-request timeout and
//! an optional bearer token. Every call is a single HTTP exchange: the
//! request and the full response (status, reason, `Location`, body) are
//! logged at `debug`, non-2xx answers become [`ApiError::Status`] and the
//! body is decoded into the caller's record type.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use konexus_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use reqwest::header::{ACCEPT, AUTHORIZATION, LOCATION};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Query string parameters of a request
pub type Query<'a> = [(&'a str, String)];

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of one service (e.g. "https://alerting.example.com/api")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Percent-encode one path segment.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// API client for one service
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    timeout: Duration,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("authenticated", &self.auth.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create an unauthenticated client for the service at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is empty or is not an
    /// absolute HTTP(S) URL.
    pub fn new(config: ApiClientConfig, http: HttpClient) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim();
        if base_url.is_empty() {
            return Err(ApiError::Config("base URL is required".into()));
        }

        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!("base URL must be http(s): {base_url}")));
        }

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            auth: None,
        })
    }

    /// Attach a bearer token source; every later request carries its token.
    #[must_use]
    pub fn with_auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Absolute URL for an API path (paths start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the status is not 2xx or the
    /// response cannot be deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (status, body) = self.execute(Method::GET, path, |req| req).await?;
        let result = decode(status, &body)?;
        info!(path = %path, "GET request successful");
        Ok(result)
    }

    /// Execute a GET request with query parameters
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> Result<T, ApiError> {
        let (status, body) = self.execute(Method::GET, path, |req| req.query(query)).await?;
        let result = decode(status, &body)?;
        info!(path = %path, "GET request successful");
        Ok(result)
    }

    /// Execute a GET request where 404 (or an empty body) means "nothing
    /// there"
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        match self.execute(Method::GET, path, |req| req).await {
            Ok((status, body)) => decode(status, &body),
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                debug!(path = %path, "resource not found");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let (status, text) = self.execute(Method::POST, path, |req| req.json(body)).await?;
        let result = decode(status, &text)?;
        info!(path = %path, "POST request successful");
        Ok(result)
    }

    /// Execute a POST request with a JSON body and query parameters
    #[instrument(skip(self, body, query), fields(path = %path))]
    pub async fn post_with_query<B, R>(
        &self,
        path: &str,
        query: &Query<'_>,
        body: &B,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let (status, text) =
            self.execute(Method::POST, path, |req| req.query(query).json(body)).await?;
        let result = decode(status, &text)?;
        info!(path = %path, "POST request successful");
        Ok(result)
    }

    /// Execute a PUT request with a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let (status, text) = self.execute(Method::PUT, path, |req| req.json(body)).await?;
        let result = decode(status, &text)?;
        info!(path = %path, "PUT request successful");
        Ok(result)
    }

    /// Execute a DELETE request, discarding any response body
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, |req| req).await?;
        info!(path = %path, "DELETE request successful");
        Ok(())
    }

    /// Execute a multipart POST request
    ///
    /// Multipart bodies are streamed and never retried.
    #[instrument(skip(self, query, form), fields(path = %path))]
    pub async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
        form: Form,
    ) -> Result<R, ApiError> {
        let (status, text) =
            self.execute(Method::POST, path, |req| req.query(query).multipart(form)).await?;
        let result = decode(status, &text)?;
        info!(path = %path, "multipart POST request successful");
        Ok(result)
    }

    async fn execute<F>(
        &self,
        method: Method,
        path: &str,
        configure: F,
    ) -> Result<(StatusCode, String), ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path);
        debug!(%method, url = %url, "API request");

        let mut request = self.http.request(method, &url).header(ACCEPT, "application/json");
        if let Some(auth) = &self.auth {
            let token = auth.access_token().await?;
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = configure(request);

        let response = match tokio::time::timeout(self.timeout, self.http.send(request)).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => {
                warn!(url = %url, "API request timed out");
                return Err(ApiError::Timeout(self.timeout));
            }
        };

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;

        debug!(
            status = status.as_u16(),
            reason = status.canonical_reason().unwrap_or(""),
            location = location.as_deref().unwrap_or(""),
            body = %body,
            "API response"
        );

        if !status.is_success() {
            return Err(ApiError::Status { status, url, body });
        }

        Ok((status, body))
    }
}

/// Deserialize a response body; 204/205 and empty bodies decode from `null`.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if status == StatusCode::NO_CONTENT
        || status == StatusCode::RESET_CONTENT
        || body.trim().is_empty()
    {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "No content response ({}), but response type cannot be deserialized from empty body",
                status.as_u16()
            ))
        });
    }

    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
