//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Phase of a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The model chooses tools and parameters
    Planning,
    /// The plan's tool calls run concurrently
    Dispatching,
    /// The model drafts an answer and proposes follow-up searches
    Drafting,
    /// Follow-up searches run; failures are dropped
    Enriching,
    /// The model writes the final answer
    Finalizing,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Planning => "planning",
            Phase::Dispatching => "dispatching",
            Phase::Drafting => "drafting",
            Phase::Enriching => "enriching",
            Phase::Finalizing => "finalizing",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Planning => "Planning",
            Phase::Dispatching => "Running Tools",
            Phase::Drafting => "Drafting",
            Phase::Enriching => "Gathering Additional Information",
            Phase::Finalizing => "Finalizing",
        }
    }

    /// 1-based position in the pipeline
    pub fn ordinal(&self) -> usize {
        match self {
            Phase::Planning => 1,
            Phase::Dispatching => 2,
            Phase::Drafting => 3,
            Phase::Enriching => 4,
            Phase::Finalizing => 5,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert!(Phase::Planning.ordinal() < Phase::Dispatching.ordinal());
        assert!(Phase::Enriching.ordinal() < Phase::Finalizing.ordinal());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Dispatching.to_string(), "Running Tools");
        assert_eq!(Phase::Finalizing.as_str(), "finalizing");
    }
}
