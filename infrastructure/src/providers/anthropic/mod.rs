//! Anthropic Messages API gateway
//!
//! Implements [`LlmGateway`] over plain HTTP. All rate-limit handling lives
//! here: an optional pause before every request, retries with exponential
//! backoff on 429 and 5xx responses, and a semaphore bounding in-flight
//! requests across every debate sharing the gateway.

mod types;

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use debate_application::{CompletionRequest, GatewayError, LlmGateway};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use std::net::IpAddr;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use types::{MessagesRequest, MessagesResponse, error_message};

/// Cap on a single backoff delay
const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Connection and retry settings for [`AnthropicGateway`]
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub max_tokens: u32,
    pub timeout: Option<Duration>,
    /// Pause before every request
    pub sleep_time: Duration,
    pub max_retries: u32,
    /// Delay before the first retry; doubles every attempt
    pub retry_backoff: Duration,
    pub max_concurrent_requests: usize,
}

impl AnthropicConfig {
    pub fn from_file(provider: &FileProviderConfig, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            api_version: provider.api_version.clone(),
            max_tokens: provider.max_tokens,
            timeout: provider.timeout_seconds.map(Duration::from_secs),
            sleep_time: secs(provider.sleep_time),
            max_retries: provider.max_retries,
            retry_backoff: secs(provider.retry_backoff_seconds),
            max_concurrent_requests: provider.max_concurrent_requests.max(1),
        }
    }

    /// Delay before retry number `attempt` (0-based).
    ///
    /// A server-supplied `retry-after` wins over the computed backoff.
    pub fn backoff(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(after) = retry_after {
            return after.min(MAX_BACKOFF);
        }
        let factor = 2u32.saturating_pow(attempt);
        self.retry_backoff.saturating_mul(factor).min(MAX_BACKOFF)
    }
}

fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}

/// A failed attempt and whether it is worth repeating
#[derive(Debug)]
struct Failure {
    error: GatewayError,
    retryable: bool,
    retry_after: Option<Duration>,
}

impl Failure {
    fn fatal(error: GatewayError) -> Self {
        Self {
            error,
            retryable: false,
            retry_after: None,
        }
    }

    fn retry(error: GatewayError, retry_after: Option<Duration>) -> Self {
        Self {
            error,
            retryable: true,
            retry_after,
        }
    }
}

/// Gateway to the Anthropic Messages API
pub struct AnthropicGateway {
    http: Client,
    config: AnthropicConfig,
    permits: Semaphore,
}

impl AnthropicGateway {
    pub fn new(config: AnthropicConfig) -> Result<Self, GatewayError> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::AuthError("API key is empty".to_string()));
        }
        let mut builder = Client::builder();
        if is_loopback(&config.base_url) {
            builder = builder.no_proxy();
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            http,
            permits: Semaphore::new(config.max_concurrent_requests.max(1)),
            config,
        })
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    async fn send_once(&self, body: &MessagesRequest<'_>) -> Result<String, Failure> {
        let url = format!("{}/v1/messages", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, retry_after, &text));
        }

        // The client timeout also covers the body; a stall here is a Timeout.
        let bytes = response.bytes().await.map_err(classify_transport_error)?;
        let parsed: MessagesResponse = serde_json::from_slice(&bytes)
            .map_err(|e| Failure::fatal(GatewayError::Malformed(e.to_string())))?;

        parsed.text().ok_or_else(|| {
            Failure::fatal(GatewayError::Malformed(format!(
                "response contained no text (stop_reason: {})",
                parsed.stop_reason.as_deref().unwrap_or("unknown")
            )))
        })
    }
}

#[async_trait]
impl LlmGateway for AnthropicGateway {
    async fn ask(&self, request: CompletionRequest<'_>) -> Result<String, GatewayError> {
        let body = MessagesRequest::from_completion(&request, self.config.max_tokens);
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| GatewayError::Other("request limiter closed".to_string()))?;

        let mut attempt = 0;
        loop {
            if !self.config.sleep_time.is_zero() {
                tokio::time::sleep(self.config.sleep_time).await;
            }

            debug!(
                model = body.model,
                messages = body.messages.len(),
                attempt,
                "Calling Anthropic Messages API"
            );

            match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err(failure) if failure.retryable && attempt < self.config.max_retries => {
                    let delay = self.config.backoff(attempt, failure.retry_after);
                    warn!(
                        "Request failed ({}), retrying in {:.1}s ({}/{})",
                        failure.error,
                        delay.as_secs_f64(),
                        attempt + 1,
                        self.config.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }
}

/// Local endpoints never go through a system proxy
fn is_loopback(base_url: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(base_url) else {
        return false;
    };
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}

fn classify_transport_error(error: reqwest::Error) -> Failure {
    if error.is_timeout() {
        Failure::retry(GatewayError::Timeout, None)
    } else if error.is_connect() || error.is_body() {
        Failure::retry(GatewayError::ConnectionError(error.to_string()), None)
    } else {
        Failure::fatal(GatewayError::RequestFailed(error.to_string()))
    }
}

fn classify_status(status: StatusCode, retry_after: Option<Duration>, body: &str) -> Failure {
    let message = format!("HTTP {}: {}", status.as_u16(), error_message(body));
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            Failure::retry(GatewayError::RateLimited(message), retry_after)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Failure::fatal(GatewayError::AuthError(message))
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            Failure::retry(GatewayError::Timeout, retry_after)
        }
        // 529 is Anthropic's "overloaded"
        s if s.is_server_error() || s.as_u16() == 529 => {
            Failure::retry(GatewayError::RequestFailed(message), retry_after)
        }
        _ => Failure::fatal(GatewayError::RequestFailed(message)),
    }
}

/// `retry-after` in (possibly fractional) seconds; HTTP dates are ignored
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .map(secs)
}
