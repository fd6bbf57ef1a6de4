//! `time` tool: local clock in a named IANA timezone.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use concierge_domain::tool::{Command, PARAM_TIMEZONE, ToolData, ToolError, ToolProvider};
use serde_json::Value;

use crate::location::LocationResolver;

pub struct TimeTool {
    resolver: Arc<LocationResolver>,
}

impl TimeTool {
    pub fn new(resolver: Arc<LocationResolver>) -> Self {
        Self { resolver }
    }

    async fn timezone_name(&self, params: &HashMap<String, String>) -> String {
        if let Some(name) = params.get(PARAM_TIMEZONE).map(|s| s.trim())
            && !name.is_empty()
        {
            return name.to_string();
        }
        let location = self.resolver.resolve().await;
        if location.timezone.trim().is_empty() {
            "UTC".to_string()
        } else {
            location.timezone.clone()
        }
    }
}

/// Describe `now` as seen from `tz`.
pub fn describe_time(tz_name: &str, tz: Tz, now: DateTime<Utc>) -> ToolData {
    let local = now.with_timezone(&tz);

    let mut data = ToolData::new();
    data.insert("timezone".to_string(), Value::from(tz_name));
    data.insert(
        "current_time".to_string(),
        Value::from(local.format("%I:%M %p").to_string()),
    );
    data.insert(
        "date".to_string(),
        Value::from(local.format("%A, %B %d, %Y").to_string()),
    );
    data.insert("unix_timestamp".to_string(), Value::from(now.timestamp()));
    data.insert(
        "utc_offset".to_string(),
        Value::from(local.format("%:z").to_string()),
    );
    data
}

#[async_trait]
impl ToolProvider for TimeTool {
    fn command(&self) -> Command {
        Command::Time
    }

    async fn invoke(&self, params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
        let name = self.timezone_name(params).await;
        let tz: Tz = name
            .parse()
            .map_err(|_| ToolError::invalid_argument(format!("Unknown timezone: {}", name)))?;
        Ok(describe_time(&name, tz, Utc::now()))
    }
}
