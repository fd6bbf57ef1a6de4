//! Behavior configuration (`[behavior]` section)

use crate::config::ConfigError;
use concierge_application::ExecutionParams;
use concierge_application::config::execution_params::{
    DEFAULT_ANSWER_TEMPERATURE, DEFAULT_STRUCTURED_TEMPERATURE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Temperature for plan and draft requests
    pub structured_temperature: f32,
    /// Temperature for the final answer
    pub answer_temperature: f32,
    pub answer_max_tokens: Option<u32>,
    /// Show per-phase progress while a request runs
    pub show_progress: bool,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            structured_temperature: DEFAULT_STRUCTURED_TEMPERATURE,
            answer_temperature: DEFAULT_ANSWER_TEMPERATURE,
            answer_max_tokens: None,
            show_progress: true,
        }
    }
}

impl FileBehaviorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("structured_temperature", self.structured_temperature),
            ("answer_temperature", self.answer_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "behavior.{} must be between 0.0 and 2.0, got {}",
                    name, value
                )));
            }
        }
        if self.answer_max_tokens == Some(0) {
            return Err(ConfigError::Invalid(
                "behavior.answer_max_tokens cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_structured_temperature(self.structured_temperature)
            .with_answer_temperature(self.answer_temperature)
            .with_answer_max_tokens(self.answer_max_tokens)
    }
}
