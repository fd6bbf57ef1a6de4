//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::cli::commands::OutputFormat;
use crate::{ProgressReporter, SimpleProgress};
use concierge_application::{
    AnswerRequestInput, AnswerRequestUseCase, LlmGateway, NoProgress, ProgressNotifier,
    ToolExecutorPort,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

const PROMPT: &str = "You: ";

/// `exit`, in any case, ends the session.
pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Interactive chat REPL
pub struct ChatRepl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> {
    use_case: Arc<AnswerRequestUseCase<G, T>>,
    show_progress: bool,
    fancy_progress: bool,
    output: OutputFormat,
}

impl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> ChatRepl<G, T> {
    pub fn new(use_case: Arc<AnswerRequestUseCase<G, T>>) -> Self {
        Self {
            use_case,
            show_progress: true,
            fancy_progress: true,
            output: OutputFormat::Text,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Plain line-per-event progress instead of spinners
    pub fn with_simple_progress(mut self, simple: bool) -> Self {
        self.fancy_progress = !simple;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("concierge").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if is_exit_command(line) {
                        println!("Bye!");
                        break;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_request(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│             Concierge - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Ask about the weather, news, the time, or anything searchable.");
        println!("Type 'exit' to quit.");
        println!();
    }

    fn progress(&self) -> Box<dyn ProgressNotifier> {
        match (self.show_progress, self.fancy_progress) {
            (false, _) => Box::new(NoProgress),
            (true, true) => Box::new(ProgressReporter::new()),
            (true, false) => Box::new(SimpleProgress),
        }
    }

    async fn process_request(&self, request: &str) {
        println!();

        let progress = self.progress();
        let result = self
            .use_case
            .execute_with_progress(AnswerRequestInput::new(request), progress.as_ref())
            .await;

        match result {
            Ok(reply) => println!("{}", ConsoleFormatter::format(&reply, self.output)),
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e)),
        }
        println!();
    }
}
