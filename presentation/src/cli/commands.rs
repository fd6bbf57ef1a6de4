//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the final reply is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The answer text only
    #[default]
    Text,
    /// The full reply (answer, plan, enrichment count) as JSON
    Json,
}

/// CLI arguments for concierge
#[derive(Parser, Debug)]
#[command(name = "concierge")]
#[command(author, version, about = "Answer questions with live weather, news, search, and time data")]
#[command(long_about = r#"
Concierge answers a request in five phases:
1. Planning: the model picks tool commands for the request
2. Running tools: every command runs concurrently
3. Drafting: the model drafts an answer from the tool outputs
4. Gathering: follow-up searches the draft asked for
5. Finalizing: the model writes the final answer

Configuration files are loaded from (in priority order):
1. CONCIERGE_* environment variables
2. --config <path>        Explicit config file
3. ./concierge.toml       Project-level config
4. ~/.config/concierge/config.toml   Global config

Example:
  concierge "What's the weather in Paris?"
  concierge --provider openai --model gpt-4o-mini "latest AI news"
  concierge          (interactive mode)
"#)]
pub struct Cli {
    /// The request to answer; omit to start interactive mode
    pub question: Option<String>,

    /// Model provider (mistral, openai, anthropic, custom)
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Model name
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_question() {
        let cli = Cli::try_parse_from(["concierge", "weather in Paris"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("weather in Paris"));
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "concierge",
            "-vv",
            "-q",
            "--provider",
            "anthropic",
            "-m",
            "claude",
            "--output",
            "json",
        ])
        .unwrap();
        assert!(cli.question.is_none());
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert_eq!(cli.provider.as_deref(), Some("anthropic"));
        assert_eq!(cli.model.as_deref(), Some("claude"));
        assert_eq!(cli.output, OutputFormat::Json);
    }
}
