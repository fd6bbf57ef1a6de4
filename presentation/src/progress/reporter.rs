//! Progress reporting for request execution

use colored::Colorize;
use concierge_application::ports::progress::ProgressNotifier;
use concierge_domain::{Phase, Plan, ToolCommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with an indicatif spinner or bar per phase
pub struct ProgressReporter {
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            phase_bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_label(phase: &Phase) -> String {
        format!("[{}/5] {}", phase.ordinal(), phase.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = if total_tasks > 1 {
            let pb = ProgressBar::new(total_tasks as u64);
            pb.set_style(Self::bar_style());
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb
        };
        pb.set_prefix(Self::phase_label(phase));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_tool_complete(&self, _phase: &Phase, command: &ToolCommand, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), command.name)
            } else {
                format!("{} {}", "x".red(), command.name)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{}", "done".green()));
            tracing::trace!(phase = phase.as_str(), "Phase finished");
        }
    }

    fn on_plan_ready(&self, plan: &Plan) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(format!("{} command(s) planned", plan.len()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        if total_tasks > 1 {
            println!(
                "{} {} ({} tasks)",
                "->".cyan(),
                phase.display_name().bold(),
                total_tasks
            );
        } else {
            println!("{} {}", "->".cyan(), phase.display_name().bold());
        }
    }

    fn on_tool_complete(&self, _phase: &Phase, command: &ToolCommand, success: bool) {
        if success {
            println!("  {} {}", "v".green(), command.name);
        } else {
            println!("  {} {} (failed)", "x".red(), command.name);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}

    fn on_plan_ready(&self, plan: &Plan) {
        let names: Vec<&str> = plan.iter().map(|c| c.name.as_str()).collect();
        if names.is_empty() {
            println!("  {}", "no tools needed".dimmed());
        } else {
            println!("  plan: {}", names.join(", "));
        }
    }
}
