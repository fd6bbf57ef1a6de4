//! `weather` tool: OpenWeatherMap current conditions.
//!
//! Transient failures (HTTP 429/500/502/503/504 and timeouts) are retried
//! with exponential backoff: 1 s, 2 s, 4 s by default. An error reported
//! in the body (`cod` other than 200) fails without retry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use concierge_domain::tool::{Command, PARAM_LOCATION, ToolData, ToolError, ToolProvider};
use serde_json::{Value, json};

use super::{require_key, send_error};

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_WEATHER_RETRIES: u32 = 3;

const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

pub struct WeatherTool {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    retries: u32,
    backoff: Duration,
}

impl WeatherTool {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_WEATHER_URL.to_string(),
            timeout: DEFAULT_WEATHER_TIMEOUT,
            retries: DEFAULT_WEATHER_RETRIES,
            backoff: Duration::from_secs(1),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Base delay; attempt `n` waits `backoff * 2^n`
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    async fn fetch(&self, location: &str, api_key: &str) -> Result<Value, ToolError> {
        let mut attempt = 0;
        loop {
            let sent = self
                .client
                .get(&self.base_url)
                .query(&[("q", location), ("appid", api_key), ("units", "metric")])
                .timeout(self.timeout)
                .send()
                .await;

            let retryable = match &sent {
                Ok(response) => RETRY_STATUSES.contains(&response.status().as_u16()),
                Err(e) => e.is_timeout(),
            };
            if retryable && attempt < self.retries {
                let delay = backoff_delay(self.backoff, attempt);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "Retrying weather request");
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let response = sent.map_err(|e| {
                if e.is_timeout() {
                    ToolError::timeout("weather request after retries")
                } else {
                    send_error("weather", e)
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                // OpenWeatherMap reports e.g. unknown cities as 404 with a JSON body
                let body: Value = response.json().await.unwrap_or(Value::Null);
                return Err(ToolError::execution_failed(api_message(&body).unwrap_or_else(
                    || format!("Failed to get weather data: HTTP {}", status),
                )));
            }

            return response.json().await.map_err(|e| {
                ToolError::execution_failed(format!("Failed to parse weather data: {}", e))
            });
        }
    }
}

/// `base * 2^attempt`, saturating instead of overflowing.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

fn api_message(body: &Value) -> Option<String> {
    body.get("message").and_then(Value::as_str).map(String::from)
}

/// Map an OpenWeatherMap body to the tool output.
pub fn format_weather(location: &str, body: &Value) -> Result<ToolData, ToolError> {
    let cod = match body.get("cod") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    if let Some(cod) = cod
        && cod != "200"
    {
        return Err(ToolError::execution_failed(
            api_message(body).unwrap_or_else(|| "Unknown error from weather API".to_string()),
        ));
    }

    let output = json!({
        "location": location,
        "temperature": body.pointer("/main/temp"),
        "feels_like": body.pointer("/main/feels_like"),
        "humidity": body.pointer("/main/humidity"),
        "conditions": body.pointer("/weather/0/description"),
        "wind_speed": body.pointer("/wind/speed"),
        "country": body.pointer("/sys/country"),
        "city": body.get("name"),
        "timestamp": body.get("dt"),
    });

    match output {
        Value::Object(map) => Ok(map),
        _ => Ok(ToolData::new()),
    }
}

#[async_trait]
impl ToolProvider for WeatherTool {
    fn command(&self) -> Command {
        Command::Weather
    }

    async fn invoke(&self, params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
        let api_key = require_key(self.api_key.as_deref(), "WEATHER_API_KEY")?;
        let location = params
            .get(PARAM_LOCATION)
            .map(String::as_str)
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| ToolError::invalid_argument("weather requires a location"))?;

        let body = self.fetch(location, api_key).await?;
        format_weather(location, &body)
    }
}
