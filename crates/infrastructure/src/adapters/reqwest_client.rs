//! HTTP client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. It owns the service base
//! URL and the per-request timeout; requests carry only a relative path.

use std::error::Error as _;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use gencheck_application::ports::{HttpClient, HttpClientError};
use gencheck_domain::{ApiRequest, ApiResponse, HttpMethod};
use reqwest::{Client, Method, Url};
use tracing::debug;

/// HTTP client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a client for `base_url` with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("gencheck/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self::with_client(client, base_url, timeout))
    }

    /// Creates a client around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL's path, keeping any path prefix,
    /// query and fragment of the base URL in place.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the base URL cannot carry a path.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, HttpClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                HttpClientError::InvalidUrl(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(path.trim_start_matches('/').split('/'));
        Ok(url)
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let message = error_chain(error);

        if error.is_connect() {
            if message.to_lowercase().contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: error
                        .url()
                        .and_then(Url::host_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::Body(message);
        }

        HttpClientError::Other(message)
    }
}

/// Joins an error and its sources into one line.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, HttpClientError> {
        let url = self.endpoint_url(&request.path)?;
        let timeout_ms = self.timeout_ms();

        debug!(method = %request.method, url = %url, "sending request");
        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(self.timeout);

        if request.method.has_body()
            && let Some(body) = &request.body
        {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;
        let response = ApiResponse::from_bytes(status, &body_bytes, start.elapsed());

        debug!(
            status,
            elapsed_ms = response.elapsed_ms(),
            bytes = body_bytes.len(),
            "response read"
        );

        Ok(response)
    }
}
