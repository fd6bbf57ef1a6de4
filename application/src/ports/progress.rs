//! Progress notification port
//!
//! Defines the interface for reporting progress while a request is handled.

use concierge_domain::{Phase, Plan, ToolCommand};

/// Callback for progress updates during request handling
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when a tool call completes within a phase
    fn on_tool_complete(&self, phase: &Phase, command: &ToolCommand, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);

    /// Called once the plan has been parsed
    fn on_plan_ready(&self, _plan: &Plan) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_tool_complete(&self, _phase: &Phase, _command: &ToolCommand, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
