//! HTTP LLM Gateway
//!
//! Sends single-turn chat requests to a configured model endpoint and
//! normalizes the reply through [`ProviderKind::extract_text`].
//!
//! Every request waits on the shared [`RateLimiter`] first, carries a
//! bearer token, and is bounded by the endpoint timeout.

use super::rate_limiter::RateLimiter;
use async_trait::async_trait;
use concierge_application::ports::llm_gateway::{GatewayError, LlmGateway};
use concierge_domain::{ChatMessage, ChatRequest, ProviderKind, ResponseFormatError};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved model endpoint settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEndpoint {
    pub provider: ProviderKind,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ModelEndpoint {
    pub fn new(
        provider: ProviderKind,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn validate(&self) -> Result<(), GatewayError> {
        for (field, value) in [
            ("api_url", &self.api_url),
            ("api_key", &self.api_key),
            ("model", &self.model),
        ] {
            if value.trim().is_empty() {
                return Err(GatewayError::Configuration(format!(
                    "model endpoint {} is empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Request body shared by every supported provider.
#[derive(Debug, Serialize)]
pub struct ChatPayload<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// [`LlmGateway`] over plain HTTP (reqwest).
pub struct HttpLlmGateway {
    endpoint: ModelEndpoint,
    client: reqwest::Client,
    limiter: Arc<RateLimiter>,
}

impl HttpLlmGateway {
    /// Build the gateway. Missing endpoint settings fail here, not at the
    /// first call.
    pub fn new(endpoint: ModelEndpoint, limiter: Arc<RateLimiter>) -> Result<Self, GatewayError> {
        endpoint.validate()?;

        let client = reqwest::Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            client,
            limiter,
        })
    }

    pub fn endpoint(&self) -> &ModelEndpoint {
        &self.endpoint
    }

    pub fn build_payload<'a>(&'a self, request: &ChatRequest) -> ChatPayload<'a> {
        ChatPayload {
            model: &self.endpoint.model,
            messages: request.messages(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    fn map_send_error(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout(self.endpoint.timeout)
        } else {
            GatewayError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl LlmGateway for HttpLlmGateway {
    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        self.limiter.wait().await;

        let payload = self.build_payload(request);
        let started = Instant::now();

        let response = self
            .client
            .post(&self.endpoint.api_url)
            .bearer_auth(&self.endpoint.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Model endpoint returned an error status");
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(self.endpoint.timeout)
            } else {
                GatewayError::ResponseFormat(ResponseFormatError(format!(
                    "response body is not JSON: {}",
                    e
                )))
            }
        })?;

        let text = self.endpoint.provider.extract_text(&body)?;
        debug!(
            provider = %self.endpoint.provider,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.len(),
            "Model reply received"
        );
        Ok(text)
    }
}
