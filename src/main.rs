//! Orbit CLI entry point

use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use orbit::cli::{Cli, Command, OutputFormat};
use orbit::config::Config;
use orbit::domain::{BreakdownResult, Importance};
use orbit::llm::OpenRouterClient;
use orbit::service::BreakdownService;

fn setup_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Breakdown {
            title,
            importance,
            format,
        } => cmd_breakdown(&config, &title, importance, format).await,
        Command::Fallback { importance, format } => {
            print_breakdown(&BreakdownService::fallback(importance), format)
        }
        Command::Models => cmd_models(&config),
    }
}

async fn cmd_breakdown(config: &Config, title: &str, importance: Importance, format: OutputFormat) -> Result<()> {
    config.validate()?;

    let backend = Arc::new(OpenRouterClient::from_config(&config.llm)?);
    let service = BreakdownService::new(backend, &config.llm);

    info!(%title, %importance, "Requesting breakdown");
    let result = service.generate(title, importance).await?;

    print_breakdown(&result, format)
}

fn print_breakdown(result: &BreakdownResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => {
            for (idx, step) in result.steps.iter().enumerate() {
                println!("{}. {}", idx + 1, step);
            }
            if !result.motivation.is_empty() {
                println!("\n{}", result.motivation);
            }
        }
    }
    Ok(())
}

fn cmd_models(config: &Config) -> Result<()> {
    for (idx, model) in config.llm.candidate_models().iter().enumerate() {
        let marker = if idx == 0 { " (primary)" } else { "" };
        println!("{}. {}{}", idx + 1, model, marker);
    }
    Ok(())
}
