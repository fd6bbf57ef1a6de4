//! Structured output use case
//!
//! Asks the model for JSON matching a schema description and recovers the
//! values from whatever text comes back.

use crate::config::execution_params::DEFAULT_STRUCTURED_TEMPERATURE;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use concierge_domain::{ChatRequest, PromptTemplate, StructuredOutputError, recover_json_values};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors from a structured-output request
#[derive(Error, Debug)]
pub enum StructuredRequestError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Parse(#[from] StructuredOutputError),
}

/// Schema-directed JSON requests against the model.
///
/// Parse failures are not retried.
pub struct StructuredOutputParser<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    temperature: f32,
}

impl<G: LlmGateway + 'static> StructuredOutputParser<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            temperature: DEFAULT_STRUCTURED_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Request JSON for `prompt` shaped by `schema`.
    ///
    /// Always returns a list; a single-object reply becomes one element.
    pub async fn request(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Vec<Value>, StructuredRequestError> {
        let request = ChatRequest::new(PromptTemplate::structured_prompt(prompt, schema))
            .with_system(PromptTemplate::structured_system())
            .with_temperature(self.temperature);

        let raw = self.gateway.chat(&request).await?;
        debug!(chars = raw.len(), "Structured reply received");

        Ok(recover_json_values(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedGateway {
        reply: Result<String, GatewayError>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl FixedGateway {
        fn new(reply: Result<String, GatewayError>) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn test_request_recovers_fenced_array() {
        let gateway = Arc::new(FixedGateway::new(Ok(
            "```json\n[{\"command\": \"weather\", \"params\": {}}]\n```".to_string(),
        )));
        let parser = StructuredOutputParser::new(Arc::clone(&gateway));

        let values = parser.request("weather", &json!({"type": "array"})).await.unwrap();
        assert_eq!(values, vec![json!({"command": "weather", "params": {}})]);

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, DEFAULT_STRUCTURED_TEMPERATURE);
        assert_eq!(
            requests[0].system_prompt.as_deref(),
            Some(PromptTemplate::structured_system())
        );
        assert!(requests[0].prompt.contains("\"type\": \"array\""));
    }

    #[tokio::test]
    async fn test_request_with_custom_temperature() {
        let gateway = Arc::new(FixedGateway::new(Ok("{}".to_string())));
        let parser = StructuredOutputParser::new(Arc::clone(&gateway)).with_temperature(0.0);

        parser.request("x", &json!({})).await.unwrap();
        assert_eq!(gateway.requests.lock().unwrap()[0].temperature, 0.0);
    }

    #[tokio::test]
    async fn test_parse_failure_carries_raw_text() {
        let gateway = Arc::new(FixedGateway::new(Ok("I'd rather not.".to_string())));
        let parser = StructuredOutputParser::new(gateway);

        match parser.request("x", &json!({})).await {
            Err(StructuredRequestError::Parse(e)) => assert_eq!(e.raw, "I'd rather not."),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gateway_error_passes_through() {
        let gateway = Arc::new(FixedGateway::new(Err(GatewayError::Timeout(Duration::from_secs(30)))));
        let parser = StructuredOutputParser::new(gateway);

        assert!(matches!(
            parser.request("x", &json!({})).await,
            Err(StructuredRequestError::Gateway(GatewayError::Timeout(_)))
        ));
    }
}
