//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::Importance;

/// Orbit - LLM-assisted task breakdown
#[derive(Parser)]
#[command(
    name = "orbit",
    about = "Break a task into actionable steps, with model failover and a static fallback",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a breakdown for a task title
    Breakdown {
        /// Task title
        title: String,

        /// Importance tier
        #[arg(short, long, default_value = "medium")]
        importance: Importance,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Print the deterministic fallback breakdown (no network)
    Fallback {
        /// Importance tier
        #[arg(short, long, default_value = "medium")]
        importance: Importance,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Show the candidate model order from config
    Models,
}

/// Output format for breakdown commands
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl clap::builder::ValueParserFactory for Importance {
    type Parser = clap::builder::ValueParser;

    fn value_parser() -> Self::Parser {
        clap::builder::ValueParser::new(|s: &str| s.parse::<Importance>())
    }
}
