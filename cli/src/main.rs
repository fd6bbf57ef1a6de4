//! CLI entrypoint for concierge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use concierge_application::{AnswerRequestInput, AnswerRequestUseCase, NoProgress};
use concierge_infrastructure::{
    ConfigLoader, FileConfig, HttpLlmGateway, LocationResolver, build_registry, env_lookup,
    http_client,
};
use concierge_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Credentials may live in a local .env file
    let dotenv = dotenvy::dotenv();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "Loaded .env file");
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    if let Some(provider) = &cli.provider {
        config.model.provider = Some(provider.clone());
    }
    if let Some(model) = &cli.model {
        config.model.model = Some(model.clone());
    }

    // === Dependency Injection ===
    let endpoint = config.model.endpoint_with(&env_lookup)?;
    info!(provider = %endpoint.provider, model = %endpoint.model, "Starting concierge");

    let limiter = Arc::new(config.model.rate_limiter());
    let gateway = Arc::new(HttpLlmGateway::new(endpoint, limiter)?);

    let fallback = config.defaults.fallback_location();
    let resolver = if config.tools.geolocation {
        LocationResolver::new(http_client()?, fallback)
            .with_url(&config.tools.geolocation_url)
            .with_timeout(config.tools.geolocation_timeout())
    } else {
        LocationResolver::fixed(fallback)
    };
    let resolver = Arc::new(resolver);
    let location = resolver.resolve().await.clone();
    info!(city = %location.city, timezone = %location.timezone, "Using location");

    let defaults = config.defaults.tool_defaults(&location);
    let registry = Arc::new(
        build_registry(&config.tools, defaults, Arc::clone(&resolver), &env_lookup)
            .context("failed to set up tools")?,
    );

    let use_case = Arc::new(AnswerRequestUseCase::with_params(
        gateway,
        registry,
        config.behavior.to_execution_params(),
    ));

    let show_progress = config.behavior.show_progress && !cli.quiet;
    let fancy_progress = std::io::stderr().is_terminal();

    let Some(question) = cli.question else {
        let repl = ChatRepl::new(use_case)
            .with_progress(show_progress)
            .with_simple_progress(!fancy_progress)
            .with_output(cli.output);
        repl.run().await?;
        return Ok(());
    };

    let input = AnswerRequestInput::new(question);
    let result = match (show_progress, fancy_progress) {
        (false, _) => use_case.execute_with_progress(input, &NoProgress).await,
        (true, true) => {
            use_case
                .execute_with_progress(input, &ProgressReporter::new())
                .await
        }
        (true, false) => use_case.execute_with_progress(input, &SimpleProgress).await,
    };

    match result {
        Ok(reply) => {
            println!("{}", ConsoleFormatter::format(&reply, cli.output));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e));
            std::process::exit(1);
        }
    }
}
