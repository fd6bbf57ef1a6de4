//! Orchestration value objects

use crate::tool::{Plan, ToolData};
use serde::{Deserialize, Serialize};

/// Model's first-pass answer plus follow-up search requests.
///
/// `needs_search` is an independent list; it has no positional link to
/// `suggestions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftAnalysis {
    pub draft_answer: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub needs_search: Vec<String>,
}

impl DraftAnalysis {
    pub fn new(draft_answer: impl Into<String>) -> Self {
        Self {
            draft_answer: draft_answer.into(),
            ..Default::default()
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.needs_search.push(query.into());
        self
    }
}

/// Output of one successful plan command, as shown to the drafting model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub command: String,
    pub data: ToolData,
}

/// Data from a follow-up search that succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentItem {
    pub query: String,
    pub data: ToolData,
}

/// Final outcome of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentReply {
    /// All phases completed
    Answer {
        text: String,
        plan: Plan,
        enrichment_count: usize,
    },
    /// At least one plan command failed; later phases were skipped
    Aborted { errors: Vec<String> },
}

impl AgentReply {
    pub fn is_aborted(&self) -> bool {
        matches!(self, AgentReply::Aborted { .. })
    }

    /// Text shown to the user
    pub fn message(&self) -> String {
        match self {
            AgentReply::Answer { text, .. } => text.clone(),
            AgentReply::Aborted { errors } => {
                format!("Error(s) occurred: {}", errors.join("; "))
            }
        }
    }
}
