//! Execution parameters: per-phase model sampling.
//!
//! [`ExecutionParams`] groups the sampling parameters used by
//! [`AnswerRequestUseCase`](crate::use_cases::answer_request::AnswerRequestUseCase).
//! Structured phases (plan, draft) run cold; the final answer runs warmer.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STRUCTURED_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_ANSWER_TEMPERATURE: f32 = 0.7;

/// Sampling parameters for each model call of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Temperature for plan and draft requests.
    pub structured_temperature: f32,
    /// Temperature for the final answer.
    pub answer_temperature: f32,
    /// Optional token cap for the final answer.
    pub answer_max_tokens: Option<u32>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            structured_temperature: DEFAULT_STRUCTURED_TEMPERATURE,
            answer_temperature: DEFAULT_ANSWER_TEMPERATURE,
            answer_max_tokens: None,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_structured_temperature(mut self, temperature: f32) -> Self {
        self.structured_temperature = temperature;
        self
    }

    pub fn with_answer_temperature(mut self, temperature: f32) -> Self {
        self.answer_temperature = temperature;
        self
    }

    pub fn with_answer_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.answer_max_tokens = max_tokens;
        self
    }
}
